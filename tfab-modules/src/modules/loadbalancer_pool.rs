//! loadbalancer-pool module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a load-balancer pool.
#[derive(Debug, Clone, Default)]
pub struct LoadbalancerPoolParams {
    pub name: String,
    pub scope: ProjectScope,
    /// Members already created out-of-band, by uuid.
    pub loadbalancer_member_uuid_list: Option<Vec<String>>,
}

impl LoadbalancerPoolParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for LoadbalancerPoolParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::LoadbalancerPool
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::LoadbalancerPool, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::LoadbalancerPool)?;

        if let Some(members) = &self.loadbalancer_member_uuid_list {
            let members: Vec<Value> = members.iter().map(|uuid| json!({ "uuid": uuid })).collect();
            body.insert("loadbalancer_members".to_string(), json!(members));
        }

        Ok(doc)
    }
}
