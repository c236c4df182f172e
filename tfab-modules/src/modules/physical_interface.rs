//! physical-interface module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::{ConfigObject, resolve_required};
use crate::registry::{self, ObjectType};

/// Desired attributes of a physical interface on a fabric device.
#[derive(Debug, Clone, Default)]
pub struct PhysicalInterfaceParams {
    pub name: String,
    /// Device the interface belongs to.
    pub physical_router: String,
    pub domain: String,
    /// Tenants the interface is shared with, as (project, access) pairs;
    /// access is the controller's permission bitmask.
    pub share: Option<Vec<(String, u32)>>,
}

impl PhysicalInterfaceParams {
    pub fn new(name: impl Into<String>, physical_router: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            physical_router: physical_router.into(),
            domain: registry::DEFAULT_DOMAIN.to_string(),
            share: None,
        }
    }
}

#[async_trait]
impl ConfigObject for PhysicalInterfaceParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::PhysicalInterface
    }

    fn fq_name(&self) -> Vec<String> {
        registry::physical_interface_fq(&self.physical_router, &self.name)
    }

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut share_entries = Vec::new();
        if let Some(share) = &self.share {
            for (tenant, access) in share {
                let fq = vec![self.domain.clone(), tenant.clone()];
                let uuid = resolve_required(controller, ObjectType::Project, &fq).await?;
                share_entries.push(json!({ "tenant": uuid, "tenant_access": access }));
            }
        }

        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(
                ObjectType::PhysicalInterface,
                &self.fq_name(),
                Some("physical-router"),
            )
        });
        let body = registry::body_mut(&mut doc, ObjectType::PhysicalInterface)?;
        if self.share.is_some() {
            let perms = body.entry("perms2".to_string()).or_insert_with(|| json!({}));
            perms["share"] = json!(share_entries);
        }

        Ok(doc)
    }
}
