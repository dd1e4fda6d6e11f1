//! Grantflow Workflow
//!
//! This crate provides the resolved workflow model that application submissions
//! move through. A [`Workflow`] is an ordered set of [`Phase`]s grouped into steps;
//! each phase carries a [`PermissionSet`] and its outgoing [`Transition`]s.
//!
//! The model is read-only once built. Collaborators hand in the submission's
//! current phase name and the acting user's [`RoleSet`] and get back what the user
//! may see and do. Writing the new state onto the submission is their job.
//!
//! Key differences from `grantflow-config`:
//! - Shorthand transitions are normalized into full [`Transition`]s
//! - Permission presets are expanded into role sets
//! - Display slugs, background colors and outcomes are derived once

mod error;
mod graph;
mod permission;
mod phase;
mod role;
mod slug;
mod stage;
mod transition;
mod workflow;

pub use error::{ConfigurationError, WorkflowError};
pub use graph::TransitionGraph;
pub use permission::{Action, PermissionSet};
pub use phase::{NewPhase, Phase, outcome_from_name};
pub use role::{RoleSet, UserFlags};
pub use slug::slugify;
pub use stage::Stage;
pub use transition::{ConditionCheck, NoConditions, Transition};
pub use workflow::Workflow;

pub use grantflow_config::{PermissionPreset, PhaseOutcome, Role};

/// Phase every submission starts in before it is submitted.
pub const DRAFT_STATE: &str = "draft";

/// Phase a submission enters when first submitted.
pub const INITIAL_STATE: &str = "in_discussion";
