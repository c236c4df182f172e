//! service-template module. Domain-scoped.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType};

/// Desired attributes of a service template.
#[derive(Debug, Clone)]
pub struct ServiceTemplateParams {
    pub name: String,
    pub domain: String,
    pub service_virtualization_type: String,
    /// transparent, in-network or in-network-nat.
    pub service_mode: String,
    pub service_type: String,
    pub version: u32,
    pub interface_type_list: Vec<String>,
}

impl ServiceTemplateParams {
    pub fn new(name: impl Into<String>, service_mode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: registry::DEFAULT_DOMAIN.to_string(),
            service_virtualization_type: "virtual-machine".to_string(),
            service_mode: service_mode.into(),
            service_type: "firewall".to_string(),
            version: 2,
            interface_type_list: vec!["left".to_string(), "right".to_string()],
        }
    }
}

#[async_trait]
impl ConfigObject for ServiceTemplateParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::ServiceTemplate
    }

    fn fq_name(&self) -> Vec<String> {
        vec![self.domain.clone(), self.name.clone()]
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::ServiceTemplate, &self.fq_name(), Some("domain"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::ServiceTemplate)?;

        let properties = body
            .entry("service_template_properties".to_string())
            .or_insert_with(|| json!({}));
        properties["service_virtualization_type"] = json!(self.service_virtualization_type);
        properties["service_mode"] = json!(self.service_mode);
        properties["service_type"] = json!(self.service_type);
        properties["version"] = json!(self.version);
        let interface_types: Vec<Value> = self
            .interface_type_list
            .iter()
            .map(|interface_type| json!({ "service_interface_type": interface_type }))
            .collect();
        properties["interface_type"] = json!(interface_types);

        body.insert(
            "versionList".to_string(),
            json!([{ "text": format!("v{}", self.version), "id": self.version }]),
        );

        Ok(doc)
    }
}
