//! HTTP client for a Tungsten-Fabric-style network controller.
//!
//! The controller exposes two API surfaces:
//! - the config API (plain HTTP, port 8082): name resolution
//!   (`fqname-to-id`) and asynchronous job execution (`execute-job`),
//! - the web API (HTTPS, port 8143): session authentication and the
//!   config-object CRUD endpoints, which require a CSRF token echoed on
//!   every call after login.
//!
//! [`Controller`] wraps the config API and produces a [`Session`] for the
//! web API. Every outbound call carries the configured timeout; there are
//! no retries.

mod client;
mod config;
mod error;
mod outcome;

pub use client::{Controller, JobHandle, Session};
pub use config::ControllerConfig;
pub use error::{Error, Result};
pub use outcome::Outcome;
