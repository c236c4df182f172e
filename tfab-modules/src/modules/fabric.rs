//! fabric module.
//!
//! Fabric onboarding and deletion run as background jobs on the controller,
//! not as direct object CRUD. Submission is fire-and-forget: the returned
//! job execution id is only useful for correlating controller logs.

use serde_json::json;
use tfab_client::{Controller, Outcome, Result};
use tracing::info;

use crate::apply::ConfigState;
use crate::registry::{self, GLOBAL_SYSTEM_CONFIG, ObjectType};

const ONBOARD_TEMPLATE: [&str; 2] = [GLOBAL_SYSTEM_CONFIG, "existing_fabric_onboard_template"];
const DELETION_TEMPLATE: [&str; 2] = [GLOBAL_SYSTEM_CONFIG, "fabric_deletion_template"];

/// Node profiles activated on every onboarded fabric.
const NODE_PROFILES: [&str; 6] = [
    "juniper-mx",
    "juniper-qfx10k",
    "juniper-qfx10k-lean",
    "juniper-qfx5k",
    "juniper-qfx5k-lean",
    "juniper-srx",
];

const OVERLAY_IBGP_ASN: u32 = 64512;

/// Desired attributes of a fabric.
#[derive(Debug, Clone)]
pub struct FabricParams {
    pub name: String,
    pub device_username: String,
    pub device_password: String,
    /// Management CIDRs the devices live in.
    pub management_subnets: Vec<String>,
}

impl FabricParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_username: "root".to_string(),
            device_password: String::new(),
            management_subnets: Vec::new(),
        }
    }
}

pub async fn apply(
    controller: &Controller,
    params: &FabricParams,
    state: ConfigState,
) -> Result<Outcome> {
    let fq_name = registry::fabric_fq(&params.name);
    let uuid = controller
        .resolve(ObjectType::Fabric.as_str(), &fq_name)
        .await?;

    match (state, uuid) {
        (ConfigState::Present, Some(_)) => Ok(Outcome::unchanged(format!(
            "fabric {} is already onboarded, nothing to do",
            params.name
        ))),
        (ConfigState::Present, None) => {
            let management_subnets: Vec<_> = params
                .management_subnets
                .iter()
                .map(|cidr| json!({ "cidr": cidr }))
                .collect();
            let node_profiles: Vec<_> = NODE_PROFILES
                .iter()
                .map(|profile| json!({ "node_profile_name": profile }))
                .collect();
            let job_input = json!({
                "fabric_fq_name": fq_name,
                "node_profiles": node_profiles,
                "device_auth": [{
                    "username": params.device_username,
                    "password": params.device_password,
                }],
                "overlay_ibgp_asn": OVERLAY_IBGP_ASN,
                "management_subnets": management_subnets,
                "enterprise_style": true,
            });
            let job = controller.execute_job(&ONBOARD_TEMPLATE, job_input).await?;
            info!(fabric = %params.name, job = ?job.job_execution_id, "Submitted fabric onboard job");
            Ok(Outcome::changed(job_message("onboard", &params.name, &job)))
        }
        (ConfigState::Absent, Some(_)) => {
            let job_input = json!({ "fabric_fq_name": fq_name });
            let job = controller.execute_job(&DELETION_TEMPLATE, job_input).await?;
            info!(fabric = %params.name, job = ?job.job_execution_id, "Submitted fabric deletion job");
            Ok(Outcome::changed(job_message("deletion", &params.name, &job)))
        }
        (ConfigState::Absent, None) => Ok(Outcome::unchanged(format!(
            "fabric {} does not exist",
            params.name
        ))),
    }
}

fn job_message(kind: &str, fabric: &str, job: &tfab_client::JobHandle) -> String {
    match &job.job_execution_id {
        Some(id) => format!("fabric {fabric} {kind} job accepted, execution id {id}"),
        None => format!("fabric {fabric} {kind} job accepted"),
    }
}
