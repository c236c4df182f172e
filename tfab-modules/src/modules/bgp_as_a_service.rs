//! bgp-as-a-service module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a BGPaaS endpoint.
#[derive(Debug, Clone, Default)]
pub struct BgpAsAServiceParams {
    pub name: String,
    pub scope: ProjectScope,
    pub autonomous_system: u32,
    pub bgpaas_ip_address: Option<String>,
    pub hold_time: Option<u32>,
    pub address_families: Option<Vec<String>>,
}

impl BgpAsAServiceParams {
    pub fn new(name: impl Into<String>, autonomous_system: u32) -> Self {
        Self {
            name: name.into(),
            autonomous_system,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for BgpAsAServiceParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::BgpAsAService
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::BgpAsAService, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::BgpAsAService)?;

        body.insert("autonomous_system".to_string(), json!(self.autonomous_system));
        if let Some(address) = &self.bgpaas_ip_address {
            body.insert("bgpaas_ip_address".to_string(), json!(address));
        }

        // Session attributes are only seeded on fresh objects; an existing
        // session keeps whatever was negotiated.
        if body.get("bgpaas_session_attributes").is_none() {
            let mut attributes = json!({});
            if let Some(families) = &self.address_families {
                attributes["address_families"] = json!({ "family": families });
            }
            if let Some(hold_time) = self.hold_time {
                attributes["hold_time"] = json!(hold_time);
            }
            body.insert("bgpaas_session_attributes".to_string(), attributes);
        }

        Ok(doc)
    }
}
