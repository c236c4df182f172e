//! virtual-network module.
//!
//! Covers overlay and provider networks: ipam subnets, forwarding
//! properties, route targets, network-policy and tag references.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Error, Result};
use uuid::Uuid;

use crate::apply::{ConfigObject, resolve_required};
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a virtual network.
#[derive(Debug, Clone, Default)]
pub struct VirtualNetworkParams {
    pub name: String,
    pub scope: ProjectScope,
    pub subnet: Option<String>,
    pub subnet_prefix: Option<u8>,
    /// Allocate addresses from the low end of the subnet instead of the top.
    pub addr_from_start: Option<bool>,
    pub default_gateway: Option<String>,
    pub dns_server_address: Option<String>,
    pub enable_dhcp: Option<bool>,
    /// Served to workloads as DHCP option 6.
    pub dns_nameservers: Option<Vec<String>>,
    pub flood_unknown_unicast: bool,
    pub ip_fabric_forwarding: bool,
    pub fabric_snat: bool,
    /// `routed` for fabric-manager routed networks.
    pub virtual_network_category: Option<String>,
    pub rpf: Option<String>,
    pub allow_transit: Option<bool>,
    pub forwarding_mode: Option<String>,
    pub vxlan_network_identifier: Option<u32>,
    pub route_target_list: Option<Vec<String>>,
    pub import_route_target_list: Option<Vec<String>>,
    pub export_route_target_list: Option<Vec<String>>,
    /// `domain:project:name` references; each must already exist.
    pub network_policy_refs: Option<Vec<String>>,
    pub tag_refs: Option<Vec<String>>,
    pub provider_network: bool,
    pub provider_network_physical_network: Option<String>,
    pub provider_network_segmentation_id: Option<u32>,
}

impl VirtualNetworkParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for VirtualNetworkParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::VirtualNetwork
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value> {
        if self.provider_network
            && (self.provider_network_physical_network.is_none()
                || self.provider_network_segmentation_id.is_none())
        {
            return Err(Error::Precondition(
                "provider networks need both physical_network and segmentation_id".into(),
            ));
        }

        // Resolve references before touching the document.
        let mut policy_refs = Vec::new();
        if let Some(refs) = &self.network_policy_refs {
            for reference in refs {
                let fq = registry::split_ref(reference);
                let uuid = resolve_required(controller, ObjectType::NetworkPolicy, &fq).await?;
                policy_refs.push(json!({
                    "to": fq,
                    "uuid": uuid,
                    "attr": { "sequence": { "major": 0, "minor": 0 } },
                }));
            }
        }
        let mut tag_refs = Vec::new();
        if let Some(refs) = &self.tag_refs {
            for reference in refs {
                let fq = registry::split_ref(reference);
                let uuid = resolve_required(controller, ObjectType::Tag, &fq).await?;
                tag_refs.push(json!({ "to": fq, "uuid": uuid }));
            }
        }

        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::VirtualNetwork, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::VirtualNetwork)?;

        // Subnets are only attached when the network has none yet; the
        // controller keys them by generated uuid, so re-submitting a fresh
        // entry on every update would duplicate them.
        if let Some(subnet) = &self.subnet {
            if body.get("network_ipam_refs").is_none() {
                let subnet_uuid = Uuid::new_v4().to_string();
                let mut ipam_subnet = json!({
                    "subnet": {
                        "ip_prefix": subnet,
                        "ip_prefix_len": self.subnet_prefix,
                    },
                    "subnet_uuid": subnet_uuid,
                    "subnet_name": subnet_uuid,
                });
                if let Some(addr_from_start) = self.addr_from_start {
                    ipam_subnet["addr_from_start"] = json!(addr_from_start);
                }
                if let Some(gateway) = &self.default_gateway {
                    ipam_subnet["default_gateway"] = json!(gateway);
                }
                if let Some(dns) = &self.dns_server_address {
                    ipam_subnet["dns_server_address"] = json!(dns);
                }
                if let Some(enable_dhcp) = self.enable_dhcp {
                    ipam_subnet["enable_dhcp"] = json!(enable_dhcp);
                }
                if let Some(nameservers) = &self.dns_nameservers {
                    ipam_subnet["dhcp_option_list"] = json!({
                        "dhcp_option": [{
                            "dhcp_option_name": "6",
                            "dhcp_option_value": nameservers.join(" "),
                        }],
                    });
                }
                body.insert(
                    "network_ipam_refs".to_string(),
                    json!([{
                        "to": ["default-domain", "default-project", "default-network-ipam"],
                        "attr": { "ipam_subnets": [ipam_subnet] },
                    }]),
                );
            }
        }

        if self.flood_unknown_unicast {
            body.insert("flood_unknown_unicast".to_string(), json!(true));
        }
        if self.ip_fabric_forwarding {
            body.insert("ip_fabric_forwarding".to_string(), json!(true));
        }
        if self.fabric_snat {
            body.insert("fabric_snat".to_string(), json!(true));
        }
        if let Some(category) = &self.virtual_network_category {
            body.insert("virtual_network_category".to_string(), json!(category));
        }
        if self.network_policy_refs.is_some() {
            body.insert("network_policy_refs".to_string(), json!(policy_refs));
        }
        if self.tag_refs.is_some() {
            body.insert("tag_refs".to_string(), json!(tag_refs));
        }
        if self.provider_network {
            let properties = body
                .entry("provider_properties".to_string())
                .or_insert_with(|| json!({}));
            properties["physical_network"] = json!(self.provider_network_physical_network);
            properties["segmentation_id"] = json!(self.provider_network_segmentation_id);
        }

        let properties = body
            .entry("virtual_network_properties".to_string())
            .or_insert_with(|| json!({}));
        if let Some(rpf) = &self.rpf {
            properties["rpf"] = json!(rpf);
        }
        if let Some(allow_transit) = self.allow_transit {
            properties["allow_transit"] = json!(allow_transit);
        }
        if let Some(mode) = &self.forwarding_mode {
            properties["forwarding_mode"] = json!(mode);
        }
        if let Some(vni) = self.vxlan_network_identifier {
            properties["vxlan_network_identifier"] = json!(vni);
        }

        if let Some(targets) = &self.route_target_list {
            body.insert(
                "route_target_list".to_string(),
                json!({ "route_target": targets }),
            );
        }
        if let Some(targets) = &self.import_route_target_list {
            body.insert(
                "import_route_target_list".to_string(),
                json!({ "route_target": targets }),
            );
        }
        if let Some(targets) = &self.export_route_target_list {
            body.insert(
                "export_route_target_list".to_string(),
                json!({ "route_target": targets }),
            );
        }

        Ok(doc)
    }
}
