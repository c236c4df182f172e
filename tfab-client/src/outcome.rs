//! Invocation outcome.

use serde::Serialize;

/// The only state a module invocation returns to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub changed: bool,
    pub message: String,
}

impl Outcome {
    /// A mutation was accepted by the controller.
    pub fn changed(message: impl Into<String>) -> Self {
        Self {
            changed: true,
            message: message.into(),
        }
    }

    /// The desired state already held; no mutating call was issued.
    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
        }
    }
}
