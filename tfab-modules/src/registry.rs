//! Object-type registry: type tags, naming rules, base templates.
//!
//! The controller addresses every object by a fully-qualified name whose
//! shape depends on the type: most objects nest under domain/project, a few
//! are global singletons with fixed names, fabric objects nest under the
//! global system config, and tags encode `type=value` as their terminal
//! segment. This module is the single place those rules live.

use std::fmt;

use serde_json::{Map, Value, json};
use tfab_client::{Error, Result};

pub const DEFAULT_DOMAIN: &str = "default-domain";
pub const DEFAULT_PROJECT: &str = "default-project";
pub const GLOBAL_SYSTEM_CONFIG: &str = "default-global-system-config";
pub const GLOBAL_VROUTER_CONFIG: &str = "default-global-vrouter-config";
pub const POLICY_MANAGEMENT: &str = "default-policy-management";

/// Every object type the modules create, mutate, or reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    ApiAccessList,
    BgpAsAService,
    BgpRouter,
    Fabric,
    FirewallPolicy,
    FirewallRule,
    GlobalSystemConfig,
    GlobalVrouterConfig,
    Loadbalancer,
    LoadbalancerHealthmonitor,
    LoadbalancerListener,
    LoadbalancerMember,
    LoadbalancerPool,
    LogicalRouter,
    NetworkIpam,
    NetworkPolicy,
    PhysicalInterface,
    PhysicalRouter,
    Project,
    SecurityGroup,
    ServiceInstance,
    ServiceTemplate,
    Tag,
    VirtualMachine,
    VirtualMachineInterface,
    VirtualNetwork,
    VirtualPortGroup,
}

impl ObjectType {
    /// The type tag the controller APIs use.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::ApiAccessList => "api-access-list",
            ObjectType::BgpAsAService => "bgp-as-a-service",
            ObjectType::BgpRouter => "bgp-router",
            ObjectType::Fabric => "fabric",
            ObjectType::FirewallPolicy => "firewall-policy",
            ObjectType::FirewallRule => "firewall-rule",
            ObjectType::GlobalSystemConfig => "global-system-config",
            ObjectType::GlobalVrouterConfig => "global-vrouter-config",
            ObjectType::Loadbalancer => "loadbalancer",
            ObjectType::LoadbalancerHealthmonitor => "loadbalancer-healthmonitor",
            ObjectType::LoadbalancerListener => "loadbalancer-listener",
            ObjectType::LoadbalancerMember => "loadbalancer-member",
            ObjectType::LoadbalancerPool => "loadbalancer-pool",
            ObjectType::LogicalRouter => "logical-router",
            ObjectType::NetworkIpam => "network-ipam",
            ObjectType::NetworkPolicy => "network-policy",
            ObjectType::PhysicalInterface => "physical-interface",
            ObjectType::PhysicalRouter => "physical-router",
            ObjectType::Project => "project",
            ObjectType::SecurityGroup => "security-group",
            ObjectType::ServiceInstance => "service-instance",
            ObjectType::ServiceTemplate => "service-template",
            ObjectType::Tag => "tag",
            ObjectType::VirtualMachine => "virtual-machine",
            ObjectType::VirtualMachineInterface => "virtual-machine-interface",
            ObjectType::VirtualNetwork => "virtual-network",
            ObjectType::VirtualPortGroup => "virtual-port-group",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain/project pair addressing project-scoped objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    pub domain: String,
    pub project: String,
}

impl ProjectScope {
    pub fn new(domain: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            project: project.into(),
        }
    }

    pub fn fq_name(&self, name: &str) -> Vec<String> {
        vec![self.domain.clone(), self.project.clone(), name.to_string()]
    }
}

impl Default for ProjectScope {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN, DEFAULT_PROJECT)
    }
}

/// `[default-global-system-config]`, fixed regardless of caller input.
pub fn global_system_config_fq() -> Vec<String> {
    vec![GLOBAL_SYSTEM_CONFIG.to_string()]
}

/// `[default-global-system-config, default-global-vrouter-config]`, fixed.
pub fn global_vrouter_config_fq() -> Vec<String> {
    vec![
        GLOBAL_SYSTEM_CONFIG.to_string(),
        GLOBAL_VROUTER_CONFIG.to_string(),
    ]
}

/// Fabrics live directly under the global system config.
pub fn fabric_fq(name: &str) -> Vec<String> {
    vec![GLOBAL_SYSTEM_CONFIG.to_string(), name.to_string()]
}

/// Fabric-scoped objects (virtual port groups) nest one level deeper.
pub fn fabric_object_fq(fabric: &str, name: &str) -> Vec<String> {
    vec![
        GLOBAL_SYSTEM_CONFIG.to_string(),
        fabric.to_string(),
        name.to_string(),
    ]
}

/// Physical interfaces nest under their physical router.
pub fn physical_interface_fq(physical_router: &str, name: &str) -> Vec<String> {
    vec![
        GLOBAL_SYSTEM_CONFIG.to_string(),
        physical_router.to_string(),
        name.to_string(),
    ]
}

/// Physical routers live directly under the global system config.
pub fn physical_router_fq(name: &str) -> Vec<String> {
    vec![GLOBAL_SYSTEM_CONFIG.to_string(), name.to_string()]
}

/// Global firewall objects hang off the default policy-management node.
pub fn policy_management_fq(name: &str) -> Vec<String> {
    vec![POLICY_MANAGEMENT.to_string(), name.to_string()]
}

/// BGP routers live in the default routing instance of the ip-fabric
/// network.
pub fn bgp_router_fq(name: &str) -> Vec<String> {
    vec![
        DEFAULT_DOMAIN.to_string(),
        DEFAULT_PROJECT.to_string(),
        "ip-fabric".to_string(),
        "__default__".to_string(),
        name.to_string(),
    ]
}

/// Split a `domain:project:name` reference into fq-name segments.
pub fn split_ref(reference: &str) -> Vec<String> {
    reference.split(':').map(str::to_string).collect()
}

/// Keys the web API accepts on a global-system-config update. The merged
/// document is filtered down to these before submission; anything else makes
/// the endpoint reject the call.
pub const GLOBAL_SYSTEM_CONFIG_UPDATE_FIELDS: &[&str] = &[
    "alarm_enable",
    "annotations",
    "autonomous_system",
    "bgp_always_compare_med",
    "bgp_router_refs",
    "bgpaas_parameters",
    "config_version",
    "data_center_interconnect_asn_namespace",
    "data_center_interconnect_loopback_namespace",
    "display_name",
    "enable_4byte_as",
    "enable_security_policy_draft",
    "fast_convergence_parameters",
    "fq_name",
    "graceful_restart_parameters",
    "ibgp_auto_mesh",
    "id_perms:description",
    "id_perms:enable",
    "id_perms:permissions",
    "id_perms:user_visible",
    "igmp_enable",
    "ip_fabric_subnets",
    "mac_aging_time",
    "mac_limit_control",
    "mac_move_control",
    "parent_type",
    "parent_uuid",
    "perms2",
    "plugin_tuning",
    "rd_cluster_seed",
    "supported_device_families",
    "supported_fabric_annotations",
    "supported_vendor_hardwares",
    "tag_refs",
    "user_defined_log_statistics",
    "uuid",
];

/// Fresh `{"<type>": {"fq_name": [...], "parent_type": ...}}` document.
pub fn base_document(
    object_type: ObjectType,
    fq_name: &[String],
    parent_type: Option<&str>,
) -> Value {
    let mut body = Map::new();
    body.insert("fq_name".to_string(), json!(fq_name));
    if let Some(parent) = parent_type {
        body.insert("parent_type".to_string(), json!(parent));
    }
    json!({ object_type.as_str(): Value::Object(body) })
}

/// Mutable access to the body of a `{"<type>": {...}}` envelope.
pub fn body_mut<'a>(
    document: &'a mut Value,
    object_type: ObjectType,
) -> Result<&'a mut Map<String, Value>> {
    document
        .get_mut(object_type.as_str())
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::Decode(format!("document without a {object_type} body")))
}
