//! Grantflow Config
//!
//! This crate contains the serializable workflow definition types for grantflow.
//! A definition is an ordered list of steps, each step an ordered list of phase
//! definitions, mirroring how the application workflows are authored. These types
//! are plain data: nothing here is validated or normalized. The resolver turns a
//! [`WorkflowDef`] into the engine's workflow model.
//!
//! Definitions can come from:
//! - The built-in tables in `grantflow-registry`
//! - JSON documents listed in [`Settings::workflow_files`]

mod enums;
mod permissions;
mod phase;
mod settings;
mod stage;
mod transition;
mod workflow;

pub use enums::{PermissionPreset, PhaseOutcome, Role};
pub use permissions::PermissionsDef;
pub use phase::{PhaseDef, StepDef};
pub use settings::{DEFAULT_ORG_SHORT_NAME, Settings};
pub use stage::StageDef;
pub use transition::{ActionDef, DetailedAction, TransitionDef};
pub use workflow::WorkflowDef;
