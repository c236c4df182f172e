//! loadbalancer module.
//!
//! Creating a load balancer is a composite operation: the balancer itself
//! plus its health monitor, listener, pool and members, created in
//! dependency order. When a later create fails, the already-created
//! siblings are deleted best-effort in reverse order before the error is
//! surfaced, so a half-built balancer is not left behind.

use serde_json::{Value, json};
use tfab_client::{Controller, Error, Outcome, Result, Session};
use tracing::{info, warn};

use crate::apply::ConfigState;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a load balancer and its satellite objects.
#[derive(Debug, Clone)]
pub struct LoadbalancerParams {
    pub name: String,
    pub scope: ProjectScope,
    /// `native` or `opencontrail`.
    pub loadbalancer_provider: String,
    /// Subnet the VIP is allocated from; required to create.
    pub vip_subnet_uuid: Option<String>,
    pub member_addresses: Vec<String>,
    pub member_ports: Vec<u16>,
}

impl LoadbalancerParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: ProjectScope::default(),
            loadbalancer_provider: "opencontrail".to_string(),
            vip_subnet_uuid: None,
            member_addresses: Vec::new(),
            member_ports: Vec::new(),
        }
    }

    fn satellite_fq(&self, suffix: &str) -> Vec<String> {
        self.scope.fq_name(&format!("{}-{}", self.name, suffix))
    }
}

pub async fn apply(
    controller: &Controller,
    params: &LoadbalancerParams,
    state: ConfigState,
) -> Result<Outcome> {
    let fq_name = params.scope.fq_name(&params.name);
    let uuid = controller
        .resolve(ObjectType::Loadbalancer.as_str(), &fq_name)
        .await?;

    match (state, uuid) {
        (ConfigState::Present, Some(uuid)) => {
            let session = controller.authenticate().await?;
            let mut doc = session
                .fetch_object(ObjectType::Loadbalancer.as_str(), &uuid)
                .await?;
            let body = registry::body_mut(&mut doc, ObjectType::Loadbalancer)?;
            body.insert(
                "loadbalancer_provider".to_string(),
                json!(params.loadbalancer_provider),
            );
            let message = session.update(&doc).await?;
            info!(name = %params.name, "Updated loadbalancer");
            Ok(Outcome::changed(message))
        }
        (ConfigState::Present, None) => create_composite(controller, params).await,
        (ConfigState::Absent, Some(uuid)) => {
            let session = controller.authenticate().await?;
            let message = session
                .delete(ObjectType::Loadbalancer.as_str(), &uuid)
                .await?;
            info!(name = %params.name, %uuid, "Deleted loadbalancer");
            Ok(Outcome::changed(message))
        }
        (ConfigState::Absent, None) => Ok(Outcome::unchanged(format!(
            "loadbalancer {} does not exist",
            fq_name.join(":")
        ))),
    }
}

async fn create_composite(controller: &Controller, params: &LoadbalancerParams) -> Result<Outcome> {
    if params.member_addresses.len() != params.member_ports.len() {
        return Err(Error::Precondition(
            "member address and port lists must be the same length".into(),
        ));
    }
    let vip_subnet_uuid = params.vip_subnet_uuid.as_ref().ok_or_else(|| {
        Error::Precondition("creating a loadbalancer needs the VIP subnet uuid".into())
    })?;

    let pool_fq = params.satellite_fq("pool");
    let mut plan: Vec<(ObjectType, Vec<String>, Value)> = vec![
        (
            ObjectType::Loadbalancer,
            params.scope.fq_name(&params.name),
            json!({
                "loadbalancer": {
                    "fq_name": params.scope.fq_name(&params.name),
                    "parent_type": "project",
                    "loadbalancer_properties": { "vip_subnet_id": vip_subnet_uuid },
                    "loadbalancer_provider": params.loadbalancer_provider,
                }
            }),
        ),
        (
            ObjectType::LoadbalancerHealthmonitor,
            params.satellite_fq("healthmonitor"),
            json!({
                "loadbalancer-healthmonitor": {
                    "fq_name": params.satellite_fq("healthmonitor"),
                    "parent_type": "project",
                }
            }),
        ),
        (
            ObjectType::LoadbalancerListener,
            params.satellite_fq("listener"),
            json!({
                "loadbalancer-listener": {
                    "fq_name": params.satellite_fq("listener"),
                    "parent_type": "project",
                }
            }),
        ),
        (
            ObjectType::LoadbalancerPool,
            pool_fq.clone(),
            json!({
                "loadbalancer-pool": {
                    "fq_name": pool_fq,
                    "parent_type": "project",
                }
            }),
        ),
    ];
    for (index, (address, port)) in params
        .member_addresses
        .iter()
        .zip(&params.member_ports)
        .enumerate()
    {
        let mut member_fq = pool_fq.clone();
        member_fq.push(format!("{}-member-{}", params.name, index));
        plan.push((
            ObjectType::LoadbalancerMember,
            member_fq.clone(),
            json!({
                "loadbalancer-member": {
                    "fq_name": member_fq,
                    "parent_type": "loadbalancer-pool",
                    "loadbalancer_member_properties": {
                        "address": address,
                        "protocol_port": port,
                    },
                }
            }),
        ));
    }

    let session = controller.authenticate().await?;
    let mut created: Vec<(ObjectType, Vec<String>)> = Vec::new();
    for (object_type, fq_name, payload) in &plan {
        if let Err(error) = session.create(payload).await {
            warn!(%object_type, name = %fq_name.join(":"), %error, "Create failed, rolling back");
            roll_back(controller, &session, &created).await;
            return Err(error);
        }
        created.push((*object_type, fq_name.clone()));
    }

    info!(name = %params.name, members = params.member_addresses.len(), "Created loadbalancer composite");
    Ok(Outcome::changed(format!(
        "created loadbalancer {} with healthmonitor, listener, pool and {} members",
        params.name,
        params.member_addresses.len()
    )))
}

/// Reverse-order best-effort deletion of the objects created so far.
async fn roll_back(
    controller: &Controller,
    session: &Session<'_>,
    created: &[(ObjectType, Vec<String>)],
) {
    for (object_type, fq_name) in created.iter().rev() {
        let uuid = match controller.resolve(object_type.as_str(), fq_name).await {
            Ok(Some(uuid)) => uuid,
            Ok(None) => continue,
            Err(error) => {
                warn!(%object_type, name = %fq_name.join(":"), %error, "Rollback resolve failed");
                continue;
            }
        };
        if let Err(error) = session.delete(object_type.as_str(), &uuid).await {
            warn!(%object_type, name = %fq_name.join(":"), %error, "Rollback delete failed");
        }
    }
}
