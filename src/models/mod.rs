//! Domain models for the dealership back office
//!
//! Models are organized by business object (vehicles, invoices, customers).
//! Request structs are the typed form a payload takes *after* it has passed
//! the untyped validators in `crate::validation`.

mod customer;
mod invoice;
mod vehicle;

pub use customer::*;
pub use invoice::*;
pub use vehicle::*;

use serde::{Deserialize, Serialize};

/// Currencies the dealership transacts in.
pub const CURRENCIES: &[&str] = &["AED", "USD", "CAD"];

/// Settlement currency. AED is the default: the dealership's books are
/// kept in dirhams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Aed,
    Usd,
    Cad,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Aed => write!(f, "AED"),
            Currency::Usd => write!(f, "USD"),
            Currency::Cad => write!(f, "CAD"),
        }
    }
}
