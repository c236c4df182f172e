//! fabric role assignment module.
//!
//! Assigns physical and routing/bridging roles to onboarded devices via the
//! controller's role_assignment job template. There is no absent direction;
//! roles are reassigned by running the job again.

use serde_json::json;
use tfab_client::{Controller, Error, Outcome, Result};
use tracing::info;

use crate::registry::{self, GLOBAL_SYSTEM_CONFIG, ObjectType};

const ROLE_ASSIGNMENT_TEMPLATE: [&str; 2] = [GLOBAL_SYSTEM_CONFIG, "role_assignment_template"];

/// Role assignment for one fabric device.
#[derive(Debug, Clone)]
pub struct DeviceRole {
    pub device: String,
    /// spine or leaf.
    pub physical_role: String,
    /// e.g. CRB-Gateway, Route-Reflector, CRB-Access.
    pub routing_bridging_roles: Vec<String>,
}

/// Desired role layout of a fabric.
#[derive(Debug, Clone)]
pub struct FabricRoleAssignmentParams {
    pub fabric: String,
    pub device_roles: Vec<DeviceRole>,
}

pub async fn apply(controller: &Controller, params: &FabricRoleAssignmentParams) -> Result<Outcome> {
    let fabric_fq = registry::fabric_fq(&params.fabric);
    controller
        .resolve(ObjectType::Fabric.as_str(), &fabric_fq)
        .await?
        .ok_or_else(|| {
            Error::Precondition(format!("fabric {} does not exist", params.fabric))
        })?;

    let role_assignments: Vec<_> = params
        .device_roles
        .iter()
        .map(|role| {
            json!({
                "device_fq_name": [GLOBAL_SYSTEM_CONFIG, role.device],
                "physical_role": role.physical_role,
                "routing_bridging_roles": role.routing_bridging_roles,
            })
        })
        .collect();
    let job_input = json!({
        "fabric_fq_name": fabric_fq,
        "role_assignments": role_assignments,
    });

    let job = controller
        .execute_job(&ROLE_ASSIGNMENT_TEMPLATE, job_input)
        .await?;
    info!(fabric = %params.fabric, devices = params.device_roles.len(), job = ?job.job_execution_id, "Submitted role assignment job");
    let message = match &job.job_execution_id {
        Some(id) => format!(
            "role assignment job for fabric {} accepted, execution id {id}",
            params.fabric
        ),
        None => format!("role assignment job for fabric {} accepted", params.fabric),
    };
    Ok(Outcome::changed(message))
}
