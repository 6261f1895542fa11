use crate::models::Account;
use crate::services::StoreError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read/write access to user records
pub trait AccountStore: Send + Sync {
    /// Fetch an account by id
    fn get(&self, id: &str) -> Result<Account, StoreError>;

    /// Insert or replace an account
    fn upsert(&self, account: Account) -> Result<(), StoreError>;
}

/// Account store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts<I: IntoIterator<Item = Account>>(accounts: I) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, id: &str) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("account {}", id)))
    }

    fn upsert(&self, account: Account) -> Result<(), StoreError> {
        tracing::trace!("Upserting account {}", account.id);
        self.accounts.write().insert(account.id.clone(), account);
        Ok(())
    }
}
