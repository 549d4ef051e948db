use common::api;

use crate::entities::account::Account;
use crate::error::{CatalogError, OpResult};
use crate::provider::account::AccountProvider;
use crate::provider::project::ProjectProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_account(
    state: &CatalogState,
    request: api::AddAccountRequest,
) -> OpResult<api::Account> {
    validation::require_field("name", &request.name, &state.limits)?;
    let account = Account::new(&request);
    state.accounts.add(account.clone()).await?;
    Ok(account.to_api())
}

pub async fn get_account(state: &CatalogState, request: api::AccountId) -> OpResult<api::Account> {
    validation::require_field("account_id", &request.account_id, &state.limits)?;
    let account = state.accounts.get(&request.account_id).await?;
    Ok(account.to_api())
}

pub async fn list_accounts(state: &CatalogState) -> OpResult<Vec<api::Account>> {
    let accounts = state.accounts.list().await?;
    Ok(accounts.iter().map(Account::to_api).collect())
}

pub async fn update_account(
    state: &CatalogState,
    request: api::UpdateAccountRequest,
) -> OpResult<api::Account> {
    validation::require_field("account_id", &request.account_id, &state.limits)?;
    if let Some(name) = &request.name {
        validation::require_field("name", name, &state.limits)?;
    }

    let mut account = state.accounts.get(&request.account_id).await?;
    account.apply_update(&request);
    state.accounts.update(account.clone()).await?;
    Ok(account.to_api())
}

/// Remove an account. Refused while projects remain under it.
pub async fn remove_account(
    state: &CatalogState,
    request: api::AccountId,
) -> OpResult<api::Success> {
    validation::require_field("account_id", &request.account_id, &state.limits)?;
    if !state.accounts.exists(&request.account_id).await? {
        return Err(CatalogError::not_found("account", request.account_id));
    }

    let projects = state.projects.list(&request.account_id).await?;
    if !projects.is_empty() {
        return Err(CatalogError::invalid_argument(format!(
            "account {} still owns {} projects",
            request.account_id,
            projects.len()
        )));
    }

    state.accounts.remove(&request.account_id).await?;
    Ok(api::Success {})
}
