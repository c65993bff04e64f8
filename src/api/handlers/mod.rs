//! HTTP handlers

pub mod customers;
pub mod health;
pub mod invoices;
pub mod vehicles;
