//! Request middleware: authentication, body and query extraction

pub mod auth;
pub mod body;
pub mod query;

pub use body::JsonPayload;
pub use query::QueryParams;
