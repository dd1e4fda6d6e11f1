//! Grantflow Registry
//!
//! The built-in application workflows and everything derived from them: status
//! groups, filter buckets, determination outcomes and action lookups.
//!
//! The registry is built once per process, either explicitly with [`init`] or
//! lazily on the first call to [`global`], and never changes afterwards.

mod actions;
mod definitions;
mod error;
mod registry;
pub mod stages;
mod statuses;

use std::sync::OnceLock;

use grantflow_config::Settings;

pub use actions::{ActionGroup, ActionMapping, DeterminationOutcome};
pub use definitions::{SingleStageVariant, builtin_definitions};
pub use error::RegistryError;
pub use registry::{OutcomeConflict, WorkflowRegistry};
pub use statuses::{
  StatusBucket, StatusGroups, is_accepted_status, is_active_status, is_dismissed_status,
  is_ext_review_status, is_review_status,
};

static REGISTRY: OnceLock<WorkflowRegistry> = OnceLock::new();

/// Build the process-wide registry from `settings`.
///
/// Fails with [`RegistryError::AlreadyInitialized`] once the registry exists,
/// including when [`global`] already built the default one.
pub fn init(settings: &Settings) -> Result<&'static WorkflowRegistry, RegistryError> {
  if REGISTRY.get().is_some() {
    return Err(RegistryError::AlreadyInitialized);
  }
  let registry = WorkflowRegistry::load(settings)?;
  REGISTRY
    .set(registry)
    .map_err(|_| RegistryError::AlreadyInitialized)?;
  Ok(global())
}

/// The process-wide registry, built from default settings on first use when
/// [`init`] was not called.
///
/// # Panics
///
/// Panics if the built-in workflow tables are invalid.
pub fn global() -> &'static WorkflowRegistry {
  REGISTRY.get_or_init(|| {
    WorkflowRegistry::builtin(&Settings::default())
      .unwrap_or_else(|err| panic!("built-in workflows are invalid: {err}"))
  })
}
