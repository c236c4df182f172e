//! Idempotent configuration modules for the controller.
//!
//! Each module in [`modules`] maps declarative parameters onto the JSON
//! document one controller object type expects, and converges remote state
//! through the shared resolve-and-apply flow in [`apply`]. Object naming
//! rules and base templates live in [`registry`].

pub mod apply;
pub mod modules;
pub mod registry;

pub use apply::{ConfigObject, ConfigState};
pub use registry::{ObjectType, ProjectScope};
