//! logical-router module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a logical router.
#[derive(Debug, Clone, Default)]
pub struct LogicalRouterParams {
    pub name: String,
    pub scope: ProjectScope,
    /// `snat-routing` or `vxlan-routing`.
    pub router_type: Option<String>,
    /// Networks to attach through router interfaces, by name within the
    /// same project.
    pub connected_networks: Option<Vec<String>>,
    /// Bare `asn:id` values; the `target:` prefix is added here.
    pub route_target_list: Option<Vec<String>>,
    pub vxlan_network_identifier: Option<u32>,
    pub physical_router_refs: Option<Vec<String>>,
}

impl LogicalRouterParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for LogicalRouterParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::LogicalRouter
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::LogicalRouter, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::LogicalRouter)?;

        if let Some(router_type) = &self.router_type {
            body.insert("logical_router_type".to_string(), json!(router_type));
        }
        // The controller stores the VNI of a logical router as a string.
        if let Some(vni) = self.vxlan_network_identifier {
            body.insert("vxlan_network_identifier".to_string(), json!(vni.to_string()));
        }
        if let Some(routers) = &self.physical_router_refs {
            let refs: Vec<Value> = routers
                .iter()
                .map(|router| json!({ "to": registry::physical_router_fq(router) }))
                .collect();
            body.insert("physical_router_refs".to_string(), json!(refs));
        }
        if let Some(targets) = &self.route_target_list {
            let targets: Vec<String> =
                targets.iter().map(|target| format!("target:{target}")).collect();
            body.insert(
                "configured_route_target_list".to_string(),
                json!({ "route_target": targets }),
            );
        }
        if let Some(networks) = &self.connected_networks {
            let interfaces: Vec<Value> = networks
                .iter()
                .map(|network| {
                    json!({
                        "parent_type": "project",
                        "fq_name": [self.scope.domain, self.scope.project],
                        "virtual_network_refs": [{
                            "to": self.scope.fq_name(network),
                        }],
                        "virtual_machine_interface_device_owner": "network:router_interface",
                    })
                })
                .collect();
            body.insert("virtual_machine_interface_refs".to_string(), json!(interfaces));
        }

        Ok(doc)
    }
}
