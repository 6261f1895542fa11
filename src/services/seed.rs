use crate::models::{Account, AidRequest};
use crate::services::{InMemoryAccountStore, InMemoryRequestStore, StoreError};
use serde::Deserialize;
use std::path::Path;

/// Fixture records used to populate the in-memory stores at startup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub requests: Vec<AidRequest>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_stores(self) -> (InMemoryAccountStore, InMemoryRequestStore) {
        (
            InMemoryAccountStore::with_accounts(self.accounts),
            InMemoryRequestStore::with_requests(self.requests),
        )
    }
}

/// Read a seed file of the shape `{"accounts": [...], "requests": [...]}`
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedData, StoreError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let seed = SeedData::from_json(&json)?;

    tracing::info!(
        "Loaded {} accounts and {} requests from {}",
        seed.accounts.len(),
        seed.requests.len(),
        path.display()
    );

    Ok(seed)
}
