//! loadbalancer-member module.
//!
//! Members nest under their pool, so the pool name is part of the member's
//! fully-qualified name and the pool must exist before a member can.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::{ConfigObject, resolve_required};
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a load-balancer pool member.
#[derive(Debug, Clone, Default)]
pub struct LoadbalancerMemberParams {
    pub name: String,
    pub scope: ProjectScope,
    /// Pool the member belongs to.
    pub loadbalancer_pool: String,
    pub address: String,
    pub port: u16,
    pub weight: u32,
    pub subnet_uuid: Option<String>,
}

impl LoadbalancerMemberParams {
    pub fn new(
        name: impl Into<String>,
        pool: impl Into<String>,
        address: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            loadbalancer_pool: pool.into(),
            address: address.into(),
            port,
            weight: 1,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for LoadbalancerMemberParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::LoadbalancerMember
    }

    fn fq_name(&self) -> Vec<String> {
        vec![
            self.scope.domain.clone(),
            self.scope.project.clone(),
            self.loadbalancer_pool.clone(),
            self.name.clone(),
        ]
    }

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value> {
        // The parent pool has to be there before a member can nest under it.
        let pool_fq = self.scope.fq_name(&self.loadbalancer_pool);
        resolve_required(controller, ObjectType::LoadbalancerPool, &pool_fq).await?;

        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(
                ObjectType::LoadbalancerMember,
                &self.fq_name(),
                Some("loadbalancer-pool"),
            )
        });
        let body = registry::body_mut(&mut doc, ObjectType::LoadbalancerMember)?;

        let properties = body
            .entry("loadbalancer_member_properties".to_string())
            .or_insert_with(|| json!({}));
        properties["address"] = json!(self.address);
        properties["protocol_port"] = json!(self.port);
        properties["weight"] = json!(self.weight);
        if let Some(subnet_uuid) = &self.subnet_uuid {
            properties["subnet_id"] = json!(subnet_uuid);
        }

        Ok(doc)
    }
}
