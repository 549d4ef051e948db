use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Top-level tenant scoping clusters, nodes, and applications.
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub organization_id: String,
    pub name: String,
    pub email: String,
    pub full_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub created: DateTime<Utc>,
}

impl Organization {
    pub fn new(request: &api::AddOrganizationRequest) -> Self {
        Self {
            organization_id: new_entity_id(),
            name: request.name.clone(),
            email: request.email.clone(),
            full_address: request.full_address.clone(),
            city: request.city.clone(),
            state: request.state.clone(),
            country: request.country.clone(),
            zip_code: request.zip_code.clone(),
            created: Utc::now(),
        }
    }

    /// Apply a partial update; absent fields stay untouched.
    pub fn apply_update(&mut self, request: &api::UpdateOrganizationRequest) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
        if let Some(email) = &request.email {
            self.email = email.clone();
        }
        if let Some(full_address) = &request.full_address {
            self.full_address = full_address.clone();
        }
        if let Some(city) = &request.city {
            self.city = city.clone();
        }
        if let Some(state) = &request.state {
            self.state = state.clone();
        }
        if let Some(country) = &request.country {
            self.country = country.clone();
        }
        if let Some(zip_code) = &request.zip_code {
            self.zip_code = zip_code.clone();
        }
    }

    pub fn to_api(&self) -> api::Organization {
        api::Organization {
            organization_id: self.organization_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            full_address: self.full_address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            zip_code: self.zip_code.clone(),
            created: self.created,
        }
    }
}
