//! global-vrouter-config module. Singleton, present-only.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType};

/// Desired attributes of the global vRouter config.
#[derive(Debug, Clone, Default)]
pub struct GlobalVrouterConfigParams {
    /// Flow export rate from vRouters, samples per second.
    pub flow_export_rate: Option<u32>,
}

#[async_trait]
impl ConfigObject for GlobalVrouterConfigParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::GlobalVrouterConfig
    }

    fn fq_name(&self) -> Vec<String> {
        registry::global_vrouter_config_fq()
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(
                ObjectType::GlobalVrouterConfig,
                &self.fq_name(),
                Some("global-system-config"),
            )
        });
        let body = registry::body_mut(&mut doc, ObjectType::GlobalVrouterConfig)?;
        if let Some(rate) = self.flow_export_rate {
            body.insert("flow_export_rate".to_string(), json!(rate));
        }
        Ok(doc)
    }
}
