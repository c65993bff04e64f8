//! Lotkeeper Backend Library
//!
//! Dealership back-office API: vehicle inventory, invoicing and customer
//! records. This library exposes the core components for testing and
//! embedding.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod service;
pub mod validation;
