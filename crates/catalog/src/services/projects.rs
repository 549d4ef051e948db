use common::api;

use crate::entities::project::Project;
use crate::error::{CatalogError, OpResult};
use crate::provider::account::AccountProvider;
use crate::provider::project::ProjectProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_project(
    state: &CatalogState,
    request: api::AddProjectRequest,
) -> OpResult<api::Project> {
    validation::require_field("owner_account_id", &request.owner_account_id, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;

    if !state.accounts.exists(&request.owner_account_id).await? {
        return Err(CatalogError::not_found(
            "account",
            request.owner_account_id,
        ));
    }

    let project = Project::new(&request);
    state.projects.add(project.clone()).await?;
    Ok(project.to_api())
}

pub async fn get_project(state: &CatalogState, request: api::ProjectId) -> OpResult<api::Project> {
    check_project_fields(state, &request.owner_account_id, &request.project_id).await?;
    let project = state
        .projects
        .get(&request.owner_account_id, &request.project_id)
        .await?;
    Ok(project.to_api())
}

pub async fn list_projects(
    state: &CatalogState,
    request: api::AccountId,
) -> OpResult<Vec<api::Project>> {
    validation::require_field("account_id", &request.account_id, &state.limits)?;
    if !state.accounts.exists(&request.account_id).await? {
        return Err(CatalogError::not_found("account", request.account_id));
    }
    let projects = state.projects.list(&request.account_id).await?;
    Ok(projects.iter().map(Project::to_api).collect())
}

pub async fn update_project(
    state: &CatalogState,
    request: api::UpdateProjectRequest,
) -> OpResult<api::Project> {
    check_project_fields(state, &request.owner_account_id, &request.project_id).await?;
    if let Some(name) = &request.name {
        validation::require_field("name", name, &state.limits)?;
    }

    let mut project = state
        .projects
        .get(&request.owner_account_id, &request.project_id)
        .await?;
    project.apply_update(&request);
    state.projects.update(project.clone()).await?;
    Ok(project.to_api())
}

pub async fn remove_project(
    state: &CatalogState,
    request: api::ProjectId,
) -> OpResult<api::Success> {
    check_project_fields(state, &request.owner_account_id, &request.project_id).await?;
    state
        .projects
        .remove(&request.owner_account_id, &request.project_id)
        .await?;
    Ok(api::Success {})
}

async fn check_project_fields(
    state: &CatalogState,
    owner_account_id: &str,
    project_id: &str,
) -> OpResult<()> {
    validation::require_field("owner_account_id", owner_account_id, &state.limits)?;
    validation::require_field("project_id", project_id, &state.limits)?;
    if !state.accounts.exists(owner_account_id).await? {
        return Err(CatalogError::not_found("account", owner_account_id));
    }
    Ok(())
}
