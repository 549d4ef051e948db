#[path = "support/common.rs"]
mod support;

use std::collections::HashMap;

use catalog::error::ErrorKind;
use catalog::services::{app_network, applications};
use catalog::state::CatalogState;
use common::api;
use support::{make_state, seed_organization};

fn service_spec(name: &str) -> api::ServiceSpec {
    api::ServiceSpec {
        name: name.to_string(),
        service_type: api::ServiceType::Docker,
        image: format!("{name}:latest"),
        credentials: None,
        specs: Some(api::DeploySpecs {
            cpu: 100,
            memory: 256,
            replicas: 1,
        }),
        storage: Vec::new(),
        exposed_ports: vec![api::PortSpec {
            name: "http".to_string(),
            internal_port: 8080,
            exposed_port: 80,
            endpoints: vec![api::EndpointSpec {
                endpoint_type: api::EndpointType::Rest,
                path: "/".to_string(),
            }],
        }],
        environment_variables: HashMap::new(),
        configs: Vec::new(),
        labels: HashMap::new(),
        deploy_after: Vec::new(),
        run_arguments: Vec::new(),
    }
}

fn descriptor_request(organization_id: &str) -> api::AddAppDescriptorRequest {
    api::AddAppDescriptorRequest {
        request_id: "req-1".to_string(),
        organization_id: organization_id.to_string(),
        name: "web stack".to_string(),
        configuration_options: HashMap::new(),
        environment_variables: HashMap::new(),
        labels: HashMap::from([("app".to_string(), "web".to_string())]),
        rules: vec![api::SecurityRuleSpec {
            name: "frontend to backend".to_string(),
            target_service_group_name: "core".to_string(),
            target_service_name: "backend".to_string(),
            target_port: 8080,
            access: api::PortAccess::AppServices,
            auth_service_group_name: "core".to_string(),
            auth_services: vec!["frontend".to_string()],
            device_group_names: Vec::new(),
        }],
        groups: vec![api::ServiceGroupSpec {
            name: "core".to_string(),
            services: vec![service_spec("frontend"), service_spec("backend")],
            policy: api::CollocationPolicy::SameCluster,
            specs: None,
            labels: HashMap::new(),
        }],
    }
}

async fn seed_descriptor(state: &CatalogState, organization_id: &str) -> api::AppDescriptor {
    applications::add_app_descriptor(state, descriptor_request(organization_id))
        .await
        .expect("descriptor")
}

async fn seed_instance(
    state: &CatalogState,
    organization_id: &str,
    descriptor_id: &str,
) -> api::AppInstance {
    applications::add_app_instance(
        state,
        api::AddAppInstanceRequest {
            organization_id: organization_id.to_string(),
            app_descriptor_id: descriptor_id.to_string(),
            name: "web instance".to_string(),
        },
    )
    .await
    .expect("instance")
}

#[tokio::test]
async fn descriptor_requires_existing_organization() {
    let state = make_state();
    let err = applications::add_app_descriptor(&state, descriptor_request("org-missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn descriptor_with_unresolved_rule_is_rejected_wholesale() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;

    let mut request = descriptor_request(&org);
    request.rules[0].target_service_name = "missing".to_string();
    let err = applications::add_app_descriptor(&state, request)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    // Nothing persisted.
    let listed = applications::list_app_descriptors(
        &state,
        api::OrganizationId {
            organization_id: org,
        },
    )
    .await
    .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn descriptor_lifecycle() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;

    let fetched = applications::get_app_descriptor(
        &state,
        api::AppDescriptorId {
            organization_id: org.clone(),
            app_descriptor_id: descriptor.app_descriptor_id.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(fetched.name, "web stack");
    assert_eq!(fetched.groups.len(), 1);
    assert_eq!(fetched.groups[0].services.len(), 2);

    applications::remove_app_descriptor(
        &state,
        api::AppDescriptorId {
            organization_id: org.clone(),
            app_descriptor_id: descriptor.app_descriptor_id.clone(),
        },
    )
    .await
    .unwrap();
    let err = applications::get_app_descriptor(
        &state,
        api::AppDescriptorId {
            organization_id: org,
            app_descriptor_id: descriptor.app_descriptor_id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn instance_copies_descriptor_configuration() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let instance = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    assert_eq!(instance.app_descriptor_id, descriptor.app_descriptor_id);
    assert_eq!(instance.status, api::AppStatus::Queued);
    assert_eq!(instance.labels, descriptor.labels);
    assert!(instance.groups.is_empty());

    let listed = applications::list_app_instances(
        &state,
        api::OrganizationId {
            organization_id: org,
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn instance_requires_descriptor_in_same_organization() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let other = seed_organization(&state, "globex").await;
    let descriptor = seed_descriptor(&state, &org).await;

    let err = applications::add_app_instance(
        &state,
        api::AddAppInstanceRequest {
            organization_id: other,
            app_descriptor_id: descriptor.app_descriptor_id,
            name: "cross-tenant".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn group_instances_materialize_and_track_service_status() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let instance = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let groups = applications::add_service_group_instances(
        &state,
        api::AddServiceGroupInstancesRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
            service_group_ids: Vec::new(),
        },
    )
    .await
    .unwrap();
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.service_instances.len(), 2);
    assert!(group
        .service_instances
        .iter()
        .all(|s| s.status == api::ServiceStatus::Waiting));

    let target = &group.service_instances[0];
    applications::update_service_status(
        &state,
        api::UpdateServiceStatusRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
            service_group_instance_id: group.service_group_instance_id.clone(),
            service_instance_id: target.service_instance_id.clone(),
            status: api::ServiceStatus::Running,
            endpoints: vec!["frontend.local".to_string()],
            deployed_on_cluster_id: "cluster-1".to_string(),
        },
    )
    .await
    .unwrap();

    applications::update_app_status(
        &state,
        api::UpdateAppStatusRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
            status: api::AppStatus::Running,
        },
    )
    .await
    .unwrap();

    let fetched = applications::get_app_instance(
        &state,
        api::AppInstanceId {
            organization_id: org,
            app_instance_id: instance.app_instance_id,
        },
    )
    .await
    .unwrap();
    assert_eq!(fetched.status, api::AppStatus::Running);
    let service = &fetched.groups[0].service_instances[0];
    assert_eq!(service.status, api::ServiceStatus::Running);
    assert_eq!(service.deployed_on_cluster_id, "cluster-1");
}

#[tokio::test]
async fn unknown_service_instance_fails_status_update() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let instance = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let err = applications::update_service_status(
        &state,
        api::UpdateServiceStatusRequest {
            organization_id: org,
            app_instance_id: instance.app_instance_id,
            service_group_instance_id: "sg-missing".to_string(),
            service_instance_id: "svc-missing".to_string(),
            status: api::ServiceStatus::Running,
            endpoints: Vec::new(),
            deployed_on_cluster_id: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn endpoints_are_addressed_by_derived_fqdn() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let instance = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let registered = applications::add_app_endpoint(
        &state,
        api::AddAppEndpointRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
            service_group_instance_id: "11112222-sg".to_string(),
            service_instance_id: "svc-1".to_string(),
            service_name: "frontend".to_string(),
            protocol: api::AppEndpointProtocol::Https,
            endpoint_instance: api::EndpointInstance {
                endpoint_instance_id: "ep-1".to_string(),
                endpoint_type: api::EndpointType::Web,
                fqdn: "frontend.internal".to_string(),
                port: 443,
            },
        },
    )
    .await
    .unwrap();
    let expected_prefix = format!(
        "frontend.111122.{}.",
        &instance.app_instance_id[..6]
    );
    assert!(registered.global_fqdn.starts_with(&expected_prefix));

    let listed = applications::get_app_endpoints(
        &state,
        api::GetAppEndpointRequest {
            fqdn: registered.global_fqdn.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.endpoints.len(), 1);

    applications::remove_app_endpoints(
        &state,
        api::RemoveAppEndpointsRequest {
            organization_id: org,
            app_instance_id: instance.app_instance_id,
        },
    )
    .await
    .unwrap();
    let err = applications::get_app_endpoints(
        &state,
        api::GetAppEndpointRequest {
            fqdn: registered.global_fqdn,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn zt_network_lifecycle() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let instance = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    applications::add_app_zt_network(
        &state,
        api::AddAppZtNetworkRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
            network_id: "zt-net-1".to_string(),
        },
    )
    .await
    .unwrap();

    applications::remove_app_zt_network(
        &state,
        api::RemoveAppZtNetworkRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
        },
    )
    .await
    .unwrap();

    let err = applications::remove_app_zt_network(
        &state,
        api::RemoveAppZtNetworkRequest {
            organization_id: org,
            app_instance_id: instance.app_instance_id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn removing_instance_detaches_it_everywhere() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let instance = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let endpoint = applications::add_app_endpoint(
        &state,
        api::AddAppEndpointRequest {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
            service_group_instance_id: "sg-1".to_string(),
            service_instance_id: "svc-1".to_string(),
            service_name: "frontend".to_string(),
            protocol: api::AppEndpointProtocol::Http,
            endpoint_instance: api::EndpointInstance {
                endpoint_instance_id: "ep-1".to_string(),
                endpoint_type: api::EndpointType::Web,
                fqdn: "frontend.internal".to_string(),
                port: 80,
            },
        },
    )
    .await
    .unwrap();

    applications::remove_app_instance(
        &state,
        api::AppInstanceId {
            organization_id: org.clone(),
            app_instance_id: instance.app_instance_id.clone(),
        },
    )
    .await
    .unwrap();

    assert!(applications::list_app_instances(
        &state,
        api::OrganizationId {
            organization_id: org.clone(),
        },
    )
    .await
    .unwrap()
    .is_empty());
    // Endpoints of the removed instance were purged.
    let err = applications::get_app_endpoints(
        &state,
        api::GetAppEndpointRequest {
            fqdn: endpoint.global_fqdn,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn connections_join_existing_instances() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let source = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;
    let target = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let request = api::AddConnectionRequest {
        organization_id: org.clone(),
        source_instance_id: source.app_instance_id.clone(),
        target_instance_id: target.app_instance_id.clone(),
        inbound_name: "db".to_string(),
        outbound_name: "db-out".to_string(),
    };
    let connection = app_network::add_connection(&state, request.clone())
        .await
        .unwrap();
    assert_eq!(connection.status, api::ConnectionStatus::Waiting);
    assert_eq!(connection.source_instance_name, source.name);

    // The compound key makes the second add a duplicate.
    let err = app_network::add_connection(&state, request)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    let listed = app_network::list_connections(
        &state,
        api::OrganizationId {
            organization_id: org.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);

    app_network::remove_connection(
        &state,
        api::ConnectionId {
            organization_id: org.clone(),
            source_instance_id: source.app_instance_id,
            target_instance_id: target.app_instance_id,
            inbound_name: "db".to_string(),
            outbound_name: "db-out".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(app_network::list_connections(
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
async fn connection_links_follow_their_connection() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let source = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;
    let target = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let connection = app_network::add_connection(
        &state,
        api::AddConnectionRequest {
            organization_id: org.clone(),
            source_instance_id: source.app_instance_id.clone(),
            target_instance_id: target.app_instance_id.clone(),
            inbound_name: "db".to_string(),
            outbound_name: "db-out".to_string(),
        },
    )
    .await
    .unwrap();

    let link_request = api::AddConnectionLinkRequest {
        organization_id: org.clone(),
        source_instance_id: source.app_instance_id.clone(),
        target_instance_id: target.app_instance_id.clone(),
        inbound_name: "db".to_string(),
        outbound_name: "db-out".to_string(),
        source_cluster_id: "cluster-1".to_string(),
        target_cluster_id: "cluster-2".to_string(),
    };
    let link = app_network::add_connection_link(&state, link_request.clone())
        .await
        .unwrap();
    assert_eq!(link.connection_id, connection.connection_id);

    let err = app_network::add_connection_link(&state, link_request)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    let connection_id = api::ConnectionId {
        organization_id: org.clone(),
        source_instance_id: source.app_instance_id,
        target_instance_id: target.app_instance_id,
        inbound_name: "db".to_string(),
        outbound_name: "db-out".to_string(),
    };
    let links = app_network::list_connection_links(&state, connection_id.clone())
        .await
        .unwrap();
    assert_eq!(links.len(), 1);

    app_network::remove_connection(&state, connection_id.clone())
        .await
        .unwrap();
    let err = app_network::list_connection_links(&state, connection_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn connection_requires_both_instances() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let descriptor = seed_descriptor(&state, &org).await;
    let source = seed_instance(&state, &org, &descriptor.app_descriptor_id).await;

    let err = app_network::add_connection(
        &state,
        api::AddConnectionRequest {
            organization_id: org,
            source_instance_id: source.app_instance_id,
            target_instance_id: "instance-missing".to_string(),
            inbound_name: "db".to_string(),
            outbound_name: "db-out".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
