//! bgp-router module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType};

/// Desired attributes of a BGP router (control node or external peer).
#[derive(Debug, Clone, Default)]
pub struct BgpRouterParams {
    pub name: String,
    pub address: String,
    /// control-node, external-control-node or router.
    pub router_type: Option<String>,
    pub vendor: Option<String>,
    pub hold_time: Option<u32>,
    pub admin_down: bool,
    pub address_families: Option<Vec<String>>,
    pub autonomous_system: u32,
    /// Peer router names within the default routing instance.
    pub bgp_router_refs: Option<Vec<String>>,
}

impl BgpRouterParams {
    pub fn new(name: impl Into<String>, address: impl Into<String>, autonomous_system: u32) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            autonomous_system,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for BgpRouterParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::BgpRouter
    }

    fn fq_name(&self) -> Vec<String> {
        registry::bgp_router_fq(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(
                ObjectType::BgpRouter,
                &self.fq_name(),
                Some("routing-instance"),
            )
        });
        let body = registry::body_mut(&mut doc, ObjectType::BgpRouter)?;

        let parameters = body
            .entry("bgp_router_parameters".to_string())
            .or_insert_with(|| json!({}));
        if let Some(router_type) = &self.router_type {
            parameters["router_type"] = json!(router_type);
        }
        parameters["address"] = json!(self.address);
        parameters["identifier"] = json!(self.address);
        if let Some(vendor) = &self.vendor {
            parameters["vendor"] = json!(vendor);
        }
        if let Some(hold_time) = self.hold_time {
            parameters["hold_time"] = json!(hold_time);
        }
        if self.admin_down {
            parameters["admin_down"] = json!(true);
        }
        parameters["autonomous_system"] = json!(self.autonomous_system);
        if let Some(families) = &self.address_families {
            parameters["address_families"] = json!(families);
        }

        if let Some(peers) = &self.bgp_router_refs {
            let refs: Vec<Value> = peers
                .iter()
                .map(|peer| json!({ "to": registry::bgp_router_fq(peer), "attr": null }))
                .collect();
            body.insert("bgp_router_refs".to_string(), json!(refs));
        }

        Ok(doc)
    }
}
