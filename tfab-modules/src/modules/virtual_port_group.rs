//! virtual-port-group module. Fabric-scoped.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::{ConfigObject, resolve_required};
use crate::registry::{self, ObjectType};

/// Desired attributes of a virtual port group.
#[derive(Debug, Clone, Default)]
pub struct VirtualPortGroupParams {
    pub name: String,
    /// Fabric the group belongs to.
    pub fabric: String,
    /// Member ports as `router:interface` pairs; each must already exist.
    pub physical_interfaces: Option<Vec<String>>,
}

impl VirtualPortGroupParams {
    pub fn new(name: impl Into<String>, fabric: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fabric: fabric.into(),
            physical_interfaces: None,
        }
    }
}

#[async_trait]
impl ConfigObject for VirtualPortGroupParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::VirtualPortGroup
    }

    fn fq_name(&self) -> Vec<String> {
        registry::fabric_object_fq(&self.fabric, &self.name)
    }

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut interface_refs = Vec::new();
        if let Some(interfaces) = &self.physical_interfaces {
            for interface in interfaces {
                let (router, port) = interface.split_once(':').ok_or_else(|| {
                    tfab_client::Error::Precondition(format!(
                        "physical interface {interface} is not a router:interface pair"
                    ))
                })?;
                let fq = registry::physical_interface_fq(router, port);
                let uuid =
                    resolve_required(controller, ObjectType::PhysicalInterface, &fq).await?;
                interface_refs.push(json!({ "to": fq, "uuid": uuid }));
            }
        }

        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::VirtualPortGroup, &self.fq_name(), Some("fabric"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::VirtualPortGroup)?;
        if self.physical_interfaces.is_some() {
            body.insert("physical_interface_refs".to_string(), json!(interface_refs));
        }

        Ok(doc)
    }
}
