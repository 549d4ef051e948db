#[path = "support/common.rs"]
mod support;

use std::collections::HashMap;

use catalog::error::ErrorKind;
use catalog::services::assets;
use chrono::Utc;
use common::api;
use support::{make_state, seed_organization};

async fn seed_asset(
    state: &catalog::state::CatalogState,
    organization_id: &str,
    edge_controller_id: &str,
    labels: HashMap<String, String>,
) -> String {
    let asset = assets::add_asset(
        state,
        api::AddAssetRequest {
            organization_id: organization_id.to_string(),
            edge_controller_id: edge_controller_id.to_string(),
            agent_id: "agent-1".to_string(),
            labels,
            os: Some(api::OperatingSystemInfo {
                name: "Ubuntu".to_string(),
                version: "22.04".to_string(),
                class: api::OsClass::Linux,
                architecture: "x86_64".to_string(),
            }),
            hardware: None,
            storage: Vec::new(),
        },
    )
    .await
    .expect("asset");
    asset.asset_id
}

#[tokio::test]
async fn add_asset_requires_existing_organization() {
    let state = make_state();
    let err = assets::add_asset(
        &state,
        api::AddAssetRequest {
            organization_id: "org-missing".to_string(),
            edge_controller_id: "eic-1".to_string(),
            agent_id: String::new(),
            labels: HashMap::new(),
            os: None,
            hardware: None,
            storage: Vec::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn label_add_mask_merges_with_existing_labels() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let asset_id = seed_asset(
        &state,
        &org,
        "eic-1",
        HashMap::from([("b".to_string(), "2".to_string())]),
    )
    .await;

    let updated = assets::update_asset(
        &state,
        api::UpdateAssetRequest {
            organization_id: org,
            asset_id,
            add_labels: true,
            labels: HashMap::from([("a".to_string(), "1".to_string())]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.labels.get("a").map(String::as_str), Some("1"));
    assert_eq!(updated.labels.get("b").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn label_remove_mask_deletes_only_named_keys() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let asset_id = seed_asset(
        &state,
        &org,
        "eic-1",
        HashMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]),
    )
    .await;

    let updated = assets::update_asset(
        &state,
        api::UpdateAssetRequest {
            organization_id: org,
            asset_id,
            remove_labels: true,
            labels: HashMap::from([("b".to_string(), String::new())]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.labels.len(), 1);
    assert_eq!(updated.labels.get("a").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn flagged_groups_update_independently() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let asset_id = seed_asset(&state, &org, "eic-1", HashMap::new()).await;

    let now = Utc::now();
    let updated = assets::update_asset(
        &state,
        api::UpdateAssetRequest {
            organization_id: org.clone(),
            asset_id: asset_id.clone(),
            update_last_ip: true,
            last_ip: "10.4.4.4".to_string(),
            update_last_alive: true,
            last_alive_timestamp: Some(now),
            update_last_op_summary: true,
            last_op_summary: Some(api::AgentOpSummary {
                operation_id: "op-1".to_string(),
                timestamp: now,
                status: api::AgentOpStatus::Success,
                info: "install ok".to_string(),
            }),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.eic_net_ip, "10.4.4.4");
    assert_eq!(updated.last_alive_timestamp, Some(now));
    assert_eq!(
        updated.last_op_result.as_ref().map(|op| op.status),
        Some(api::AgentOpStatus::Success)
    );

    // A later update without flags leaves everything in place.
    let untouched = assets::update_asset(
        &state,
        api::UpdateAssetRequest {
            organization_id: org,
            asset_id,
            last_ip: "10.9.9.9".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(untouched.eic_net_ip, "10.4.4.4");
}

#[tokio::test]
async fn list_filters_by_edge_controller() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let on_first = seed_asset(&state, &org, "eic-1", HashMap::new()).await;
    let _on_second = seed_asset(&state, &org, "eic-2", HashMap::new()).await;

    let all = assets::list_assets(
        &state,
        api::ListAssetsRequest {
            organization_id: org.clone(),
            edge_controller_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = assets::list_assets(
        &state,
        api::ListAssetsRequest {
            organization_id: org,
            edge_controller_id: Some("eic-1".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].asset_id, on_first);
}

#[tokio::test]
async fn asset_ids_are_scoped_to_their_organization() {
    let state = make_state();
    let org_a = seed_organization(&state, "acme").await;
    let org_b = seed_organization(&state, "globex").await;
    let asset_id = seed_asset(&state, &org_a, "eic-1", HashMap::new()).await;

    let err = assets::get_asset(
        &state,
        api::AssetId {
            organization_id: org_b,
            asset_id: asset_id.clone(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assets::remove_asset(
        &state,
        api::AssetId {
            organization_id: org_a.clone(),
            asset_id,
        },
    )
    .await
    .unwrap();
    assert!(assets::list_assets(
        &state,
        api::ListAssetsRequest {
            organization_id: org_a,
            edge_controller_id: None,
        },
    )
    .await
    .unwrap()
    .is_empty());
}
