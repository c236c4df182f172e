//! api-access-list module.
//!
//! Edits rbac entries on the existing `default-api-access-list` rather than
//! creating or deleting the list itself; both directions submit an update
//! of the full document.

use serde_json::{Value, json};
use tfab_client::{Controller, Error, Outcome, Result};
use tracing::info;

use crate::apply::ConfigState;
use crate::registry::{self, ObjectType, ProjectScope};

const DEFAULT_LIST_NAME: &str = "default-api-access-list";

/// One rbac entry keyed by (rule_object, rule_field).
#[derive(Debug, Clone, Default)]
pub struct ApiAccessListParams {
    pub scope: ProjectScope,
    pub rule_object: String,
    pub rule_field: String,
    /// Role names, parallel to `role_crud_list`.
    pub role_name_list: Option<Vec<String>>,
    /// CRUD strings per role, e.g. `CRUD` or `R`.
    pub role_crud_list: Option<Vec<String>>,
}

pub async fn apply(
    controller: &Controller,
    params: &ApiAccessListParams,
    state: ConfigState,
) -> Result<Outcome> {
    let object_type = ObjectType::ApiAccessList;
    let fq_name = params.scope.fq_name(DEFAULT_LIST_NAME);
    let uuid = controller
        .resolve(object_type.as_str(), &fq_name)
        .await?
        .ok_or_else(|| {
            Error::Precondition(format!(
                "{} is not available, cannot edit its entries",
                fq_name.join(":")
            ))
        })?;

    let session = controller.authenticate().await?;
    let mut doc = session.fetch_object(object_type.as_str(), &uuid).await?;
    let body = registry::body_mut(&mut doc, object_type)?;
    let rbac_rule = body
        .get_mut("api_access_list_entries")
        .and_then(|entries| entries.get_mut("rbac_rule"))
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::Decode("api-access-list without rbac_rule entries".into()))?;

    let existing = rbac_rule.iter().position(|entry| {
        entry.get("rule_object").and_then(Value::as_str) == Some(params.rule_object.as_str())
            && entry.get("rule_field").and_then(Value::as_str) == Some(params.rule_field.as_str())
    });

    match state {
        ConfigState::Present => {
            if existing.is_some() {
                return Err(Error::Precondition(format!(
                    "an entry for {}.{} already exists, delete it before re-creating",
                    params.rule_object, params.rule_field
                )));
            }
            let (names, cruds) = match (&params.role_name_list, &params.role_crud_list) {
                (Some(names), Some(cruds)) if names.len() == cruds.len() => (names, cruds),
                _ => {
                    return Err(Error::Precondition(
                        "role_name_list and role_crud_list must be given and the same length"
                            .into(),
                    ));
                }
            };
            let rule_perms: Vec<Value> = names
                .iter()
                .zip(cruds)
                .map(|(name, crud)| json!({ "role_name": name, "role_crud": crud }))
                .collect();
            rbac_rule.push(json!({
                "rule_object": params.rule_object,
                "rule_field": params.rule_field,
                "rule_perms": rule_perms,
            }));
        }
        ConfigState::Absent => {
            let index = existing.ok_or_else(|| {
                Error::Precondition(format!(
                    "no rbac entry matches {}.{}",
                    params.rule_object, params.rule_field
                ))
            })?;
            rbac_rule.remove(index);
        }
    }

    let message = session.update(&doc).await?;
    info!(rule_object = %params.rule_object, state = state.as_str(), "Edited api-access-list");
    Ok(Outcome::changed(message))
}
