use chrono::{DateTime, Utc};
use common::api;

/// Organization member. The email is the natural key inside the
/// organization; no server-side identifier is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub organization_id: String,
    pub email: String,
    pub name: String,
    pub photo_url: String,
    pub member_since: DateTime<Utc>,
}

impl User {
    pub fn new(request: &api::AddUserRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            email: request.email.clone(),
            name: request.name.clone(),
            photo_url: request.photo_url.clone(),
            member_since: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, request: &api::UpdateUserRequest) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
        if let Some(photo_url) = &request.photo_url {
            self.photo_url = photo_url.clone();
        }
    }

    pub fn to_api(&self) -> api::User {
        api::User {
            organization_id: self.organization_id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            photo_url: self.photo_url.clone(),
            member_since: self.member_since,
        }
    }
}
