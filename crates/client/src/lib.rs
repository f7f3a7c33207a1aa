//! Client for the field-mapping reconciliation workflow.
//!
//! Exposes the building blocks (config, API client, controllers, notifier,
//! workbench) so the `fieldmap` binary, other front ends and integration
//! tests can all drive the same workflow.

pub mod api;
pub mod config;
pub mod console;
pub mod controllers;
pub mod dialog;
pub mod error;
pub mod notifier;
pub mod ui;
pub mod workbench;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpMappingApi, MappingApi};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use notifier::Notifier;
pub use workbench::Workbench;
