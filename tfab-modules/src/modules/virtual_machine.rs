//! virtual-machine module.
//!
//! Virtual machines are registered under their bare name with a
//! caller-supplied uuid (the orchestrator owns the id, the controller just
//! mirrors it).

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::{ConfigObject, resolve_required};
use crate::registry::{self, ObjectType};

/// Desired attributes of a virtual machine record.
#[derive(Debug, Clone, Default)]
pub struct VirtualMachineParams {
    pub name: String,
    pub uuid: String,
    /// `domain:project:name` references; each must already exist.
    pub virtual_machine_interface_refs: Option<Vec<String>>,
}

impl VirtualMachineParams {
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            virtual_machine_interface_refs: None,
        }
    }
}

#[async_trait]
impl ConfigObject for VirtualMachineParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::VirtualMachine
    }

    fn fq_name(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut vmi_refs = Vec::new();
        if let Some(refs) = &self.virtual_machine_interface_refs {
            for reference in refs {
                let fq = registry::split_ref(reference);
                let uuid =
                    resolve_required(controller, ObjectType::VirtualMachineInterface, &fq).await?;
                vmi_refs.push(json!({ "to": fq, "uuid": uuid }));
            }
        }

        let mut doc = current.unwrap_or_else(|| {
            let mut doc = registry::base_document(ObjectType::VirtualMachine, &self.fq_name(), None);
            doc[ObjectType::VirtualMachine.as_str()]["uuid"] = json!(self.uuid);
            doc
        });
        let body = registry::body_mut(&mut doc, ObjectType::VirtualMachine)?;
        if self.virtual_machine_interface_refs.is_some() {
            body.insert("virtual_machine_interface_refs".to_string(), json!(vmi_refs));
        }

        Ok(doc)
    }
}
