#[path = "support/common.rs"]
mod support;

use catalog::error::ErrorKind;
use catalog::services::{accounts, organizations, projects, roles, users};
use common::api;
use support::{make_state, seed_organization};

#[tokio::test]
async fn organization_add_validates_name() {
    let state = make_state();
    let err = organizations::add_organization(
        &state,
        api::AddOrganizationRequest {
            name: "  ".to_string(),
            email: String::new(),
            full_address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            zip_code: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(organizations::list_organizations(&state)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn organization_update_is_partial() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;

    let updated = organizations::update_organization(
        &state,
        api::UpdateOrganizationRequest {
            organization_id: org.clone(),
            country: Some("DE".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "acme");
    assert_eq!(updated.country, "DE");

    let fetched = organizations::get_organization(
        &state,
        api::OrganizationId {
            organization_id: org,
        },
    )
    .await
    .unwrap();
    assert_eq!(fetched.country, "DE");
}

#[tokio::test]
async fn duplicate_user_email_is_rejected() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;

    users::add_user(
        &state,
        api::AddUserRequest {
            organization_id: org.clone(),
            email: "dev@acme.test".to_string(),
            name: "Dev One".to_string(),
            photo_url: String::new(),
        },
    )
    .await
    .unwrap();

    let err = users::add_user(
        &state,
        api::AddUserRequest {
            organization_id: org.clone(),
            email: "dev@acme.test".to_string(),
            name: "Dev Two".to_string(),
            photo_url: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    // First registration wins.
    let user = users::get_user(
        &state,
        api::UserId {
            organization_id: org,
            email: "dev@acme.test".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.name, "Dev One");
}

#[tokio::test]
async fn user_update_and_removal() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    users::add_user(
        &state,
        api::AddUserRequest {
            organization_id: org.clone(),
            email: "dev@acme.test".to_string(),
            name: "Dev".to_string(),
            photo_url: String::new(),
        },
    )
    .await
    .unwrap();

    let updated = users::update_user(
        &state,
        api::UpdateUserRequest {
            organization_id: org.clone(),
            email: "dev@acme.test".to_string(),
            name: Some("Developer".to_string()),
            photo_url: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Developer");

    users::remove_user(
        &state,
        api::UserId {
            organization_id: org.clone(),
            email: "dev@acme.test".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(users::list_users(
        &state,
        api::OrganizationId {
            organization_id: org,
        },
    )
    .await
    .unwrap()
    .is_empty());
}

#[tokio::test]
async fn role_lifecycle_is_organization_scoped() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let other = seed_organization(&state, "globex").await;

    let role = roles::add_role(
        &state,
        api::AddRoleRequest {
            organization_id: org.clone(),
            name: "operator".to_string(),
            description: "runs things".to_string(),
            internal: false,
        },
    )
    .await
    .unwrap();

    // Visible in its own organization, absent from another.
    let err = roles::get_role(
        &state,
        api::RoleId {
            organization_id: other,
            role_id: role.role_id.clone(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let updated = roles::update_role(
        &state,
        api::UpdateRoleRequest {
            organization_id: org.clone(),
            role_id: role.role_id.clone(),
            name: None,
            description: Some("operates clusters".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.description, "operates clusters");

    roles::remove_role(
        &state,
        api::RoleId {
            organization_id: org.clone(),
            role_id: role.role_id,
        },
    )
    .await
    .unwrap();
    assert!(roles::list_roles(
        &state,
        api::OrganizationId {
            organization_id: org,
        },
    )
    .await
    .unwrap()
    .is_empty());
}

#[tokio::test]
async fn project_requires_existing_account() {
    let state = make_state();
    let err = projects::add_project(
        &state,
        api::AddProjectRequest {
            owner_account_id: "account-missing".to_string(),
            name: "edge rollout".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn account_removal_is_refused_while_projects_remain() {
    let state = make_state();
    let account = accounts::add_account(
        &state,
        api::AddAccountRequest {
            name: "acme billing".to_string(),
        },
    )
    .await
    .unwrap();

    let project = projects::add_project(
        &state,
        api::AddProjectRequest {
            owner_account_id: account.account_id.clone(),
            name: "edge rollout".to_string(),
        },
    )
    .await
    .unwrap();

    let err = accounts::remove_account(
        &state,
        api::AccountId {
            account_id: account.account_id.clone(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    projects::remove_project(
        &state,
        api::ProjectId {
            owner_account_id: account.account_id.clone(),
            project_id: project.project_id,
        },
    )
    .await
    .unwrap();
    accounts::remove_account(
        &state,
        api::AccountId {
            account_id: account.account_id.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        accounts::get_account(
            &state,
            api::AccountId {
                account_id: account.account_id,
            },
        )
        .await
        .unwrap_err()
        .kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn project_update_renames_in_place() {
    let state = make_state();
    let account = accounts::add_account(
        &state,
        api::AddAccountRequest {
            name: "acme billing".to_string(),
        },
    )
    .await
    .unwrap();
    let project = projects::add_project(
        &state,
        api::AddProjectRequest {
            owner_account_id: account.account_id.clone(),
            name: "edge rollout".to_string(),
        },
    )
    .await
    .unwrap();

    let updated = projects::update_project(
        &state,
        api::UpdateProjectRequest {
            owner_account_id: account.account_id.clone(),
            project_id: project.project_id.clone(),
            name: Some("edge rollout v2".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "edge rollout v2");

    let listed = projects::list_projects(
        &state,
        api::AccountId {
            account_id: account.account_id,
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "edge rollout v2");
}
