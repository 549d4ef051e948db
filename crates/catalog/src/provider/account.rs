use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::account::Account;
use crate::error::{CatalogError, OpResult};

/// Record store for accounts.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn add(&self, account: Account) -> OpResult<()>;
    async fn exists(&self, account_id: &str) -> OpResult<bool>;
    async fn get(&self, account_id: &str) -> OpResult<Account>;
    async fn update(&self, account: Account) -> OpResult<()>;
    async fn list(&self) -> OpResult<Vec<Account>>;
    async fn remove(&self, account_id: &str) -> OpResult<()>;
}

pub type DynAccountProvider = Arc<dyn AccountProvider>;

/// In-memory account store.
pub struct InMemoryAccountProvider {
    accounts: DashMap<String, Account>,
}

impl InMemoryAccountProvider {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl Default for InMemoryAccountProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountProvider for InMemoryAccountProvider {
    async fn add(&self, account: Account) -> OpResult<()> {
        let id = account.account_id.clone();
        if self.accounts.contains_key(&id) {
            return Err(CatalogError::already_exists("account", id));
        }
        self.accounts.insert(id, account);
        Ok(())
    }

    async fn exists(&self, account_id: &str) -> OpResult<bool> {
        Ok(self.accounts.contains_key(account_id))
    }

    async fn get(&self, account_id: &str) -> OpResult<Account> {
        self.accounts
            .get(account_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("account", account_id))
    }

    async fn update(&self, account: Account) -> OpResult<()> {
        let mut entry = self
            .accounts
            .get_mut(&account.account_id)
            .ok_or_else(|| CatalogError::not_found("account", account.account_id.clone()))?;
        *entry = account;
        Ok(())
    }

    async fn list(&self) -> OpResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|entry| entry.clone()).collect();
        accounts.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(accounts)
    }

    async fn remove(&self, account_id: &str) -> OpResult<()> {
        if self.accounts.remove(account_id).is_none() {
            return Err(CatalogError::not_found("account", account_id));
        }
        Ok(())
    }
}
