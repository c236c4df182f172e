//! End-to-end module flows against the mock controller.

mod common;

use serde_json::{Value, json};
use tfab_client::{Controller, ControllerConfig, Error};
use tfab_modules::apply;
use tfab_modules::modules::api_access_list::{self, ApiAccessListParams};
use tfab_modules::modules::bms_vmi::{self, BmsVmiParams, VlanAssignment};
use tfab_modules::modules::fabric::{self, FabricParams};
use tfab_modules::modules::fabric_role_assignment::{
    self, DeviceRole, FabricRoleAssignmentParams,
};
use tfab_modules::modules::firewall_policy::FirewallPolicyParams;
use tfab_modules::modules::firewall_rule::FirewallRuleParams;
use tfab_modules::modules::global_system_config::GlobalSystemConfigParams;
use tfab_modules::modules::global_vrouter_config::GlobalVrouterConfigParams;
use tfab_modules::modules::loadbalancer::{self, LoadbalancerParams};
use tfab_modules::modules::virtual_network::VirtualNetworkParams;
use tfab_modules::{ConfigState, ProjectScope};

use common::MockController;

fn client_for(mock: &MockController) -> Controller {
    Controller::new(ControllerConfig::with_endpoints(
        mock.url(),
        mock.url(),
        "admin",
        "contrail123",
    ))
    .unwrap()
}

fn stored_body(mock: &MockController, object_type: &str, fq_name: &[&str]) -> Option<Value> {
    let fq: Vec<String> = fq_name.iter().map(|s| s.to_string()).collect();
    let state = mock.state.lock().unwrap();
    let uuid = state.find_uuid(object_type, &fq)?;
    Some(state.objects[&uuid].body.clone())
}

#[tokio::test]
async fn test_create_virtual_network_with_subnet() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let mut params = VirtualNetworkParams::new("vn1");
    params.scope = ProjectScope::new("default-domain", "admin");
    params.subnet = Some("10.0.1.0".to_string());
    params.subnet_prefix = Some(24);

    let outcome = apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    let state = mock.state.lock().unwrap();
    let creates = state.requests_to("/api/tenants/config/create-config-object");
    assert_eq!(creates.len(), 1);
    let body = &creates[0].body["virtual-network"];
    assert_eq!(body["fq_name"], json!(["default-domain", "admin", "vn1"]));
    let subnet = &body["network_ipam_refs"][0]["attr"]["ipam_subnets"][0]["subnet"];
    assert_eq!(subnet["ip_prefix"], "10.0.1.0");
    assert_eq!(subnet["ip_prefix_len"], 24);
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_present_twice_converges_to_the_same_document() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let mut params = VirtualNetworkParams::new("vn1");
    params.subnet = Some("10.0.1.0".to_string());
    params.subnet_prefix = Some(24);
    params.vxlan_network_identifier = Some(101);

    apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    let after_create =
        stored_body(&mock, "virtual-network", &["default-domain", "default-project", "vn1"])
            .unwrap();

    let outcome = apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(outcome.changed);
    let after_update =
        stored_body(&mock, "virtual-network", &["default-domain", "default-project", "vn1"])
            .unwrap();

    // Merge-then-submit is stable under re-application; in particular the
    // generated subnet uuid survives instead of being re-rolled.
    assert_eq!(after_create, after_update);

    let state = mock.state.lock().unwrap();
    assert_eq!(state.requests_to("/api/tenants/config/create-config-object").len(), 1);
    assert_eq!(state.requests_to("/api/tenants/config/update-config-object").len(), 1);
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_absent_missing_issues_no_mutation() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let params = FirewallRuleParams::new("fr1");
    let outcome = apply::apply(&controller, &params, ConfigState::Absent)
        .await
        .unwrap();
    assert!(!outcome.changed);

    let state = mock.state.lock().unwrap();
    assert!(state.requests_to("/api/tenants/config/delete").is_empty());
    assert!(state.requests_to("/api/tenants/config/create-config-object").is_empty());
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_absent_existing_deletes_exactly_that_object() {
    let mock = MockController::spawn().await;
    let uuid = mock.state.lock().unwrap().insert_object(
        "virtual-network",
        &["default-domain", "default-project", "vn1"],
        json!({ "fq_name": ["default-domain", "default-project", "vn1"] }),
    );
    let controller = client_for(&mock);

    let params = VirtualNetworkParams::new("vn1");
    let outcome = apply::apply(&controller, &params, ConfigState::Absent)
        .await
        .unwrap();
    assert!(outcome.changed);

    let state = mock.state.lock().unwrap();
    let deletes = state.requests_to("/api/tenants/config/delete");
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].body[0]["deleteIDs"], json!([uuid]));
    assert!(state.objects.is_empty());
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_global_system_config_uses_fixed_fq_name() {
    let mock = MockController::spawn().await;
    mock.state.lock().unwrap().insert_object(
        "global-system-config",
        &["default-global-system-config"],
        json!({
            "fq_name": ["default-global-system-config"],
            "autonomous_system": 64512,
            "ibgp_auto_mesh": true,
            "config_node_refs": [{ "to": ["cfg1"] }],
        }),
    );
    let controller = client_for(&mock);

    let params = GlobalSystemConfigParams {
        autonomous_system: Some(65001),
    };
    apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();

    let state = mock.state.lock().unwrap();
    let resolves = state.requests_to("/fqname-to-id");
    assert_eq!(resolves[0].body["fq_name"], json!(["default-global-system-config"]));
    drop(state);

    let body = stored_body(&mock, "global-system-config", &["default-global-system-config"])
        .unwrap();
    assert_eq!(body["autonomous_system"], 65001);
    assert_eq!(body["ibgp_auto_mesh"], true);
    // Keys the update endpoint rejects were filtered out of the merge.
    assert!(body.get("config_node_refs").is_none());

    mock.shutdown().await;
}

#[tokio::test]
async fn test_update_preserves_fields_absent_from_desired_state() {
    let mock = MockController::spawn().await;
    mock.state.lock().unwrap().insert_object(
        "global-vrouter-config",
        &["default-global-system-config", "default-global-vrouter-config"],
        json!({
            "fq_name": ["default-global-system-config", "default-global-vrouter-config"],
            "encapsulation_priorities": { "encapsulation": ["VXLAN", "MPLSoUDP"] },
        }),
    );
    let controller = client_for(&mock);

    let params = GlobalVrouterConfigParams {
        flow_export_rate: Some(100),
    };
    apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();

    let body = stored_body(
        &mock,
        "global-vrouter-config",
        &["default-global-system-config", "default-global-vrouter-config"],
    )
    .unwrap();
    assert_eq!(body["flow_export_rate"], 100);
    assert_eq!(
        body["encapsulation_priorities"]["encapsulation"],
        json!(["VXLAN", "MPLSoUDP"])
    );

    mock.shutdown().await;
}

#[tokio::test]
async fn test_firewall_policy_with_missing_rule_fails_before_mutating() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let mut params = FirewallPolicyParams::new("fp1");
    params.firewall_rules = Some(vec!["missing-rule".to_string()]);

    let err = apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)), "got {err:?}");

    let state = mock.state.lock().unwrap();
    assert!(state.requests_to("/api/tenants/config/create-config-object").is_empty());
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_firewall_policy_orders_rule_refs() {
    let mock = MockController::spawn().await;
    {
        let mut state = mock.state.lock().unwrap();
        state.insert_object("firewall-rule", &["default-policy-management", "fr1"], json!({}));
        state.insert_object("firewall-rule", &["default-policy-management", "fr2"], json!({}));
    }
    let controller = client_for(&mock);

    let mut params = FirewallPolicyParams::new("fp1");
    params.firewall_rules = Some(vec!["fr1".to_string(), "fr2".to_string()]);
    apply::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();

    let body = stored_body(&mock, "firewall-policy", &["default-policy-management", "fp1"])
        .unwrap();
    let refs = body["firewall_rule_refs"].as_array().unwrap();
    assert_eq!(refs[0]["attr"]["sequence"], "0");
    assert_eq!(refs[0]["to"], json!(["default-policy-management", "fr1"]));
    assert_eq!(refs[1]["attr"]["sequence"], "1");

    mock.shutdown().await;
}

#[tokio::test]
async fn test_fabric_lifecycle_runs_jobs() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let mut params = FabricParams::new("fabric1");
    params.device_password = "lab123".to_string();
    params.management_subnets = vec!["192.168.10.0/24".to_string()];

    // Not onboarded yet: submit the onboard job.
    let outcome = fabric::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(outcome.changed);
    assert!(outcome.message.contains("job-1"), "message: {}", outcome.message);
    {
        let state = mock.state.lock().unwrap();
        let job = &state.jobs[0];
        assert_eq!(
            job["job_template_fq_name"],
            json!(["default-global-system-config", "existing_fabric_onboard_template"])
        );
        assert_eq!(
            job["job_input"]["fabric_fq_name"],
            json!(["default-global-system-config", "fabric1"])
        );
        assert_eq!(
            job["job_input"]["management_subnets"],
            json!([{ "cidr": "192.168.10.0/24" }])
        );
        assert_eq!(job["job_input"]["node_profiles"].as_array().unwrap().len(), 6);
        assert_eq!(job["job_input"]["overlay_ibgp_asn"], 64512);
    }

    // Already onboarded: nothing to do.
    mock.state.lock().unwrap().insert_object(
        "fabric",
        &["default-global-system-config", "fabric1"],
        json!({}),
    );
    let outcome = fabric::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(!outcome.changed);

    // Deletion goes through the deletion template.
    let outcome = fabric::apply(&controller, &params, ConfigState::Absent)
        .await
        .unwrap();
    assert!(outcome.changed);
    {
        let state = mock.state.lock().unwrap();
        assert_eq!(
            state.jobs.last().unwrap()["job_template_fq_name"],
            json!(["default-global-system-config", "fabric_deletion_template"])
        );
    }

    mock.shutdown().await;
}

#[tokio::test]
async fn test_role_assignment_needs_the_fabric() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let params = FabricRoleAssignmentParams {
        fabric: "fabric1".to_string(),
        device_roles: vec![DeviceRole {
            device: "leaf1".to_string(),
            physical_role: "leaf".to_string(),
            routing_bridging_roles: vec!["CRB-Access".to_string()],
        }],
    };
    let err = fabric_role_assignment::apply(&controller, &params)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    mock.state.lock().unwrap().insert_object(
        "fabric",
        &["default-global-system-config", "fabric1"],
        json!({}),
    );
    let outcome = fabric_role_assignment::apply(&controller, &params)
        .await
        .unwrap();
    assert!(outcome.changed);

    let state = mock.state.lock().unwrap();
    let job = state.jobs.last().unwrap();
    assert_eq!(
        job["job_input"]["role_assignments"][0],
        json!({
            "device_fq_name": ["default-global-system-config", "leaf1"],
            "physical_role": "leaf",
            "routing_bridging_roles": ["CRB-Access"],
        })
    );
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_loadbalancer_composite_create() {
    let mock = MockController::spawn().await;
    let controller = client_for(&mock);

    let mut params = LoadbalancerParams::new("lb1");
    params.vip_subnet_uuid = Some("subnet-1".to_string());
    params.member_addresses = vec!["10.0.1.11".to_string(), "10.0.1.12".to_string()];
    params.member_ports = vec![80, 80];

    let outcome = loadbalancer::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    for fq_name in [
        vec!["default-domain", "default-project", "lb1"],
        vec!["default-domain", "default-project", "lb1-healthmonitor"],
        vec!["default-domain", "default-project", "lb1-listener"],
        vec!["default-domain", "default-project", "lb1-pool"],
        vec!["default-domain", "default-project", "lb1-pool", "lb1-member-0"],
        vec!["default-domain", "default-project", "lb1-pool", "lb1-member-1"],
    ] {
        let fq: Vec<String> = fq_name.iter().map(|s| s.to_string()).collect();
        let state = mock.state.lock().unwrap();
        assert!(
            state
                .objects
                .values()
                .any(|object| object.fq_name == fq),
            "missing {fq:?}"
        );
    }

    mock.shutdown().await;
}

#[tokio::test]
async fn test_loadbalancer_rolls_back_on_partial_failure() {
    let mock = MockController::spawn().await;
    // Balancer and healthmonitor go through, the listener create fails.
    mock.state.lock().unwrap().fail_create_after = Some(2);
    let controller = client_for(&mock);

    let mut params = LoadbalancerParams::new("lb1");
    params.vip_subnet_uuid = Some("subnet-1".to_string());

    let err = loadbalancer::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Remote { status: 400, .. }), "got {err:?}");

    let state = mock.state.lock().unwrap();
    assert!(
        state.objects.is_empty(),
        "rollback left objects behind: {:?}",
        state.objects.values().map(|o| o.fq_name.clone()).collect::<Vec<_>>()
    );
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_api_access_list_entry_lifecycle() {
    let mock = MockController::spawn().await;
    mock.state.lock().unwrap().insert_object(
        "api-access-list",
        &["default-domain", "default-project", "default-api-access-list"],
        json!({
            "fq_name": ["default-domain", "default-project", "default-api-access-list"],
            "api_access_list_entries": { "rbac_rule": [] },
        }),
    );
    let controller = client_for(&mock);

    let params = ApiAccessListParams {
        scope: ProjectScope::default(),
        rule_object: "virtual-network".to_string(),
        rule_field: "*".to_string(),
        role_name_list: Some(vec!["_member_".to_string()]),
        role_crud_list: Some(vec!["CRUD".to_string()]),
    };

    let outcome = api_access_list::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(outcome.changed);
    let body = stored_body(
        &mock,
        "api-access-list",
        &["default-domain", "default-project", "default-api-access-list"],
    )
    .unwrap();
    assert_eq!(
        body["api_access_list_entries"]["rbac_rule"][0]["rule_perms"][0],
        json!({ "role_name": "_member_", "role_crud": "CRUD" })
    );

    // The same entry cannot be added twice.
    let err = api_access_list::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    // Removing it goes through an update, not a delete.
    let outcome = api_access_list::apply(&controller, &params, ConfigState::Absent)
        .await
        .unwrap();
    assert!(outcome.changed);
    let body = stored_body(
        &mock,
        "api-access-list",
        &["default-domain", "default-project", "default-api-access-list"],
    )
    .unwrap();
    assert_eq!(body["api_access_list_entries"]["rbac_rule"], json!([]));
    let state = mock.state.lock().unwrap();
    assert!(state.requests_to("/api/tenants/config/delete").is_empty());
    drop(state);

    mock.shutdown().await;
}

#[tokio::test]
async fn test_bms_vmi_binds_and_unbinds_vlans() {
    let mock = MockController::spawn().await;
    let vn_fq = ["default-domain", "admin", "vn1"];
    {
        let mut state = mock.state.lock().unwrap();
        state.insert_object(
            "virtual-port-group",
            &["default-global-system-config", "fabric1", "vpg1"],
            json!({
                "physical_interface_refs": [
                    { "to": ["default-global-system-config", "leaf1", "xe-0/0/1"] }
                ],
            }),
        );
        state.insert_object("virtual-network", &vn_fq, json!({}));
    }
    let controller = client_for(&mock);

    let mut params = BmsVmiParams {
        fabric: "fabric1".to_string(),
        scope: ProjectScope::new("default-domain", "admin"),
        assignments: vec![VlanAssignment {
            virtual_port_group: "vpg1".to_string(),
            virtual_network: "vn1".to_string(),
            vlan_id: 101,
        }],
    };

    let outcome = bms_vmi::apply(&controller, &params, ConfigState::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    let body = stored_body(
        &mock,
        "virtual-machine-interface",
        &["default-domain", "admin", "vpg1-fabric1-vn1-101"],
    )
    .unwrap();
    assert_eq!(
        body["virtual_machine_interface_properties"]["sub_interface_vlan_tag"],
        101
    );
    let bindings = body["virtual_machine_interface_bindings"]["key_value_pair"]
        .as_array()
        .unwrap();
    assert!(bindings.iter().any(|kv| kv["key"] == "vpg" && kv["value"] == "vpg1"));
    let profile = bindings
        .iter()
        .find(|kv| kv["key"] == "profile")
        .unwrap()["value"]
        .as_str()
        .unwrap();
    let profile: Value = serde_json::from_str(profile).unwrap();
    assert_eq!(
        profile["local_link_information"][0],
        json!({ "fabric": "fabric1", "switch_info": "leaf1", "port_id": "xe-0/0/1" })
    );

    // Unbind: the VPG advertises the VMI ref with its vlan tag.
    let vmi_uuid = {
        let state = mock.state.lock().unwrap();
        let fq: Vec<String> = ["default-domain", "admin", "vpg1-fabric1-vn1-101"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        state.find_uuid("virtual-machine-interface", &fq).unwrap()
    };
    {
        let mut state = mock.state.lock().unwrap();
        let vpg_uuid = state
            .find_uuid(
                "virtual-port-group",
                &["default-global-system-config", "fabric1", "vpg1"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>(),
            )
            .unwrap();
        state.objects.get_mut(&vpg_uuid).unwrap().body["virtual_machine_interface_refs"] =
            json!([{ "uuid": vmi_uuid, "attr": { "sub_interface_vlan_tag": 101 } }]);
    }

    params.assignments[0].virtual_network = String::new(); // unused on absent
    let outcome = bms_vmi::apply(&controller, &params, ConfigState::Absent)
        .await
        .unwrap();
    assert!(outcome.changed);
    let state = mock.state.lock().unwrap();
    assert!(!state.objects.contains_key(&vmi_uuid));
    drop(state);

    mock.shutdown().await;
}
