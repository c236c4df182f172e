//! global-system-config module.
//!
//! A singleton with a fixed fully-qualified name. The web API rejects
//! updates carrying keys outside its accepted set, so the merged document
//! is filtered before submission.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, GLOBAL_SYSTEM_CONFIG_UPDATE_FIELDS, ObjectType};

/// Desired attributes of the global system config.
#[derive(Debug, Clone, Default)]
pub struct GlobalSystemConfigParams {
    /// Global AS number of the cluster.
    pub autonomous_system: Option<u32>,
}

#[async_trait]
impl ConfigObject for GlobalSystemConfigParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::GlobalSystemConfig
    }

    fn fq_name(&self) -> Vec<String> {
        registry::global_system_config_fq()
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = match current {
            Some(mut current) => {
                let body = registry::body_mut(&mut current, ObjectType::GlobalSystemConfig)?;
                let filtered: Map<String, Value> = body
                    .iter()
                    .filter(|(key, _)| GLOBAL_SYSTEM_CONFIG_UPDATE_FIELDS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                json!({ ObjectType::GlobalSystemConfig.as_str(): filtered })
            }
            None => registry::base_document(ObjectType::GlobalSystemConfig, &self.fq_name(), None),
        };

        let body = registry::body_mut(&mut doc, ObjectType::GlobalSystemConfig)?;
        if let Some(autonomous_system) = self.autonomous_system {
            body.insert("autonomous_system".to_string(), json!(autonomous_system));
        }
        Ok(doc)
    }
}
