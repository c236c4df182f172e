//! Generic resolve-and-apply flow.
//!
//! The controller has no "apply if changed" primitive, only discrete
//! create, update(overwrite) and delete calls. Idempotent upsert/delete is
//! built on top: resolve the fully-qualified name, then dispatch on
//! (state, exists). Updates fetch the current document first and merge the
//! desired fields over it, because an update overwrites the whole object
//! and any field left out would be dropped remotely.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use tfab_client::{Controller, Error, Outcome, Result};

use crate::registry::ObjectType;

/// Desired presence of a configuration object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    Present,
    Absent,
}

impl ConfigState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigState::Present => "present",
            ConfigState::Absent => "absent",
        }
    }
}

/// One configuration object the generic flow can converge.
///
/// `render` builds the document to submit: from the type's base template
/// when creating (`current` is `None`), or merged over the fetched document
/// when updating. Rendering may resolve references, which is why it gets
/// the controller handle; a missing reference is a precondition failure and
/// aborts before any mutating call.
#[async_trait]
pub trait ConfigObject: Send + Sync {
    fn object_type(&self) -> ObjectType;

    fn fq_name(&self) -> Vec<String>;

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value>;
}

/// Converge one object to the desired state.
///
/// Exactly one mutating call is issued, or none when absence already holds.
/// `changed` reports that the controller accepted the call, not that a
/// field actually differed; re-submitting an unchanged document is stable.
pub async fn apply(
    controller: &Controller,
    object: &dyn ConfigObject,
    state: ConfigState,
) -> Result<Outcome> {
    let object_type = object.object_type();
    let fq_name = object.fq_name();
    let uuid = controller.resolve(object_type.as_str(), &fq_name).await?;

    match (state, uuid) {
        (ConfigState::Present, None) => {
            let payload = object.render(controller, None).await?;
            let session = controller.authenticate().await?;
            let message = session.create(&payload).await?;
            info!(%object_type, name = %fq_name.join(":"), "Created object");
            Ok(Outcome::changed(message))
        }
        (ConfigState::Present, Some(uuid)) => {
            let session = controller.authenticate().await?;
            let current = session.fetch_object(object_type.as_str(), &uuid).await?;
            let payload = object.render(controller, Some(current)).await?;
            let message = session.update(&payload).await?;
            info!(%object_type, name = %fq_name.join(":"), %uuid, "Updated object");
            Ok(Outcome::changed(message))
        }
        (ConfigState::Absent, Some(uuid)) => {
            let session = controller.authenticate().await?;
            let message = session.delete(object_type.as_str(), &uuid).await?;
            info!(%object_type, name = %fq_name.join(":"), %uuid, "Deleted object");
            Ok(Outcome::changed(message))
        }
        (ConfigState::Absent, None) => Ok(Outcome::unchanged(format!(
            "{} {} does not exist",
            object_type,
            fq_name.join(":")
        ))),
    }
}

/// Resolve a reference that must already exist.
pub(crate) async fn resolve_required(
    controller: &Controller,
    object_type: ObjectType,
    fq_name: &[String],
) -> Result<String> {
    controller
        .resolve(object_type.as_str(), fq_name)
        .await?
        .ok_or_else(|| {
            Error::Precondition(format!(
                "{} {} does not exist",
                object_type,
                fq_name.join(":")
            ))
        })
}
