//! virtual-machine-interface module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a virtual machine interface.
#[derive(Debug, Clone, Default)]
pub struct VirtualMachineInterfaceParams {
    pub name: String,
    pub scope: ProjectScope,
    /// Network to attach to; only used when creating.
    pub virtual_network: Option<String>,
    /// Fixed MAC; only used when creating.
    pub mac_address: Option<String>,
    pub disable_policy: Option<bool>,
}

impl VirtualMachineInterfaceParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for VirtualMachineInterfaceParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::VirtualMachineInterface
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let creating = current.is_none();
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(
                ObjectType::VirtualMachineInterface,
                &self.fq_name(),
                Some("project"),
            )
        });
        let body = registry::body_mut(&mut doc, ObjectType::VirtualMachineInterface)?;

        if let Some(disable_policy) = self.disable_policy {
            body.insert(
                "virtual_machine_interface_disable_policy".to_string(),
                json!(disable_policy),
            );
        }
        if creating {
            if let Some(mac) = &self.mac_address {
                body.insert(
                    "virtual_machine_interface_mac_addresses".to_string(),
                    json!({ "mac_address": [mac] }),
                );
            }
            if let Some(network) = &self.virtual_network {
                body.insert(
                    "virtual_network_refs".to_string(),
                    json!([{ "to": self.scope.fq_name(network) }]),
                );
            }
        }

        // The update endpoint chokes on the attr/href the fetch decorates
        // virtual_machine_refs with; strip them before re-submission.
        if let Some(vm_refs) = body
            .get_mut("virtual_machine_refs")
            .and_then(Value::as_array_mut)
        {
            for vm_ref in vm_refs {
                if let Some(vm_ref) = vm_ref.as_object_mut() {
                    vm_ref.remove("attr");
                    vm_ref.remove("href");
                }
            }
        }

        Ok(doc)
    }
}
