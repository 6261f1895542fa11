// Service exports
pub mod accounts;
pub mod requests;
pub mod seed;

use thiserror::Error;

pub use accounts::{AccountStore, InMemoryAccountStore};
pub use requests::{InMemoryRequestStore, RequestQuery, RequestStore, VolunteerAssignment};
pub use seed::{load_seed, SeedData};

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request is no longer available: {0}")]
    NotAvailable(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
