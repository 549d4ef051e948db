use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Billing account owning projects.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl Account {
    pub fn new(request: &api::AddAccountRequest) -> Self {
        Self {
            account_id: new_entity_id(),
            name: request.name.clone(),
            created: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, request: &api::UpdateAccountRequest) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
    }

    pub fn to_api(&self) -> api::Account {
        api::Account {
            account_id: self.account_id.clone(),
            name: self.name.clone(),
            created: self.created,
        }
    }
}
