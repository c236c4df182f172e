//! Baremetal VMI module.
//!
//! Wires (virtual-port-group, virtual-network, vlan) tuples together by
//! creating or deleting the baremetal virtual-machine-interface that binds
//! the VLAN onto the port group. The local link information is derived from
//! the port group's physical interface refs, so the server-facing ports do
//! not have to be repeated by the caller.

use serde_json::{Value, json};
use tfab_client::{Controller, Error, Outcome, Result};
use tracing::info;

use crate::apply::{ConfigState, resolve_required};
use crate::registry::{self, ObjectType, ProjectScope};

/// One VLAN-to-network binding on a virtual port group.
#[derive(Debug, Clone)]
pub struct VlanAssignment {
    pub virtual_port_group: String,
    pub virtual_network: String,
    pub vlan_id: u32,
}

/// Desired VLAN bindings within one fabric.
#[derive(Debug, Clone)]
pub struct BmsVmiParams {
    pub fabric: String,
    pub scope: ProjectScope,
    pub assignments: Vec<VlanAssignment>,
}

pub async fn apply(
    controller: &Controller,
    params: &BmsVmiParams,
    state: ConfigState,
) -> Result<Outcome> {
    let session = controller.authenticate().await?;
    let mut messages = Vec::new();

    for assignment in &params.assignments {
        let vpg_fq =
            registry::fabric_object_fq(&params.fabric, &assignment.virtual_port_group);
        let vpg_uuid = controller
            .resolve(ObjectType::VirtualPortGroup.as_str(), &vpg_fq)
            .await?
            .ok_or_else(|| {
                Error::Precondition(format!(
                    "virtual-port-group {} is not available",
                    vpg_fq.join(":")
                ))
            })?;
        let vpg_doc = controller
            .read_object(ObjectType::VirtualPortGroup.as_str(), &vpg_uuid)
            .await?;
        let vpg_body = vpg_doc
            .get(ObjectType::VirtualPortGroup.as_str())
            .ok_or_else(|| Error::Decode("read returned no virtual-port-group body".into()))?;

        match state {
            ConfigState::Present => {
                let vn_fq = params.scope.fq_name(&assignment.virtual_network);
                let vn_uuid =
                    resolve_required(controller, ObjectType::VirtualNetwork, &vn_fq).await?;

                // Mirror the port group's own link layout; the VMI must
                // carry the same switch/port pairs or the controller
                // rewrites the VPG's refs.
                let local_links: Vec<Value> = vpg_body
                    .get("physical_interface_refs")
                    .and_then(Value::as_array)
                    .map(|refs| {
                        refs.iter()
                            .filter_map(|pi_ref| {
                                let to = pi_ref.get("to")?.as_array()?;
                                Some(json!({
                                    "fabric": params.fabric,
                                    "switch_info": to.get(1)?,
                                    "port_id": to.get(2)?,
                                }))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                let profile =
                    serde_json::to_string(&json!({ "local_link_information": local_links }))
                        .map_err(|e| Error::Decode(e.to_string()))?;

                let vmi_name = format!(
                    "{}-{}-{}-{}",
                    assignment.virtual_port_group,
                    params.fabric,
                    assignment.virtual_network,
                    assignment.vlan_id
                );
                let payload = json!({
                    "virtual-machine-interface": {
                        "fq_name": params.scope.fq_name(&vmi_name),
                        "parent_type": "project",
                        "device_owner": "baremetal:None",
                        "virtual_machine_interface_bindings": {
                            "key_value_pair": [
                                { "key": "vpg", "value": assignment.virtual_port_group },
                                { "key": "vnic_type", "value": "baremetal" },
                                { "key": "vif_type", "value": "vrouter" },
                                { "key": "profile", "value": profile },
                            ],
                        },
                        "virtual_network_refs": [{ "to": vn_fq, "uuid": vn_uuid }],
                        "virtual_machine_interface_properties": {
                            "sub_interface_vlan_tag": assignment.vlan_id,
                        },
                    }
                });
                session.create(&payload).await?;
                info!(vmi = %vmi_name, vlan = assignment.vlan_id, "Created baremetal VMI");
                messages.push(format!(
                    "bound vlan {} on {} to {}",
                    assignment.vlan_id,
                    assignment.virtual_port_group,
                    assignment.virtual_network
                ));
            }
            ConfigState::Absent => {
                let vmi_uuid = vpg_body
                    .get("virtual_machine_interface_refs")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .find_map(|vmi_ref| {
                        let tag = vmi_ref
                            .get("attr")?
                            .get("sub_interface_vlan_tag")?
                            .as_u64()?;
                        if tag == u64::from(assignment.vlan_id) {
                            vmi_ref.get("uuid")?.as_str().map(str::to_string)
                        } else {
                            None
                        }
                    })
                    .ok_or_else(|| {
                        Error::Precondition(format!(
                            "no interface with vlan {} on virtual-port-group {}",
                            assignment.vlan_id, assignment.virtual_port_group
                        ))
                    })?;
                session
                    .delete(ObjectType::VirtualMachineInterface.as_str(), &vmi_uuid)
                    .await?;
                info!(vlan = assignment.vlan_id, vpg = %assignment.virtual_port_group, "Deleted baremetal VMI");
                messages.push(format!(
                    "unbound vlan {} from {}",
                    assignment.vlan_id, assignment.virtual_port_group
                ));
            }
        }
    }

    Ok(Outcome::changed(messages.join("; ")))
}
