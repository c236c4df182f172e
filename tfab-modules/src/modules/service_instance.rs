//! service-instance module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a service instance.
#[derive(Debug, Clone, Default)]
pub struct ServiceInstanceParams {
    pub name: String,
    pub scope: ProjectScope,
    pub left_virtual_network: String,
    pub right_virtual_network: String,
    pub mgmt_virtual_network: Option<String>,
    /// Name of the service template within the same domain.
    pub service_template: String,
}

impl ServiceInstanceParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for ServiceInstanceParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::ServiceInstance
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::ServiceInstance, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::ServiceInstance)?;

        let mut interface_list = vec![
            json!({ "virtual_network": self.left_virtual_network }),
            json!({ "virtual_network": self.right_virtual_network }),
        ];
        if let Some(mgmt) = &self.mgmt_virtual_network {
            interface_list.push(json!({ "virtual_network": mgmt }));
        }
        body.insert(
            "service_instance_properties".to_string(),
            json!({
                "interface_list": interface_list,
                "left_virtual_network": self.left_virtual_network,
                "right_virtual_network": self.right_virtual_network,
            }),
        );
        body.insert(
            "service_template_refs".to_string(),
            json!([{ "to": [self.scope.domain, self.service_template] }]),
        );

        Ok(doc)
    }
}
