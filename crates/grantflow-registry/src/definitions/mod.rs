//! The built-in workflow tables.
//!
//! The four single stage workflows share most of their shape and are generated
//! from one builder keyed by phase-name prefix. The concept and proposal
//! workflow is written out on its own.

mod double;
mod single;

use grantflow_config::{DetailedAction, Role, WorkflowDef};

pub use single::SingleStageVariant;

/// Definitions of every built-in workflow, in registration order.
pub fn builtin_definitions() -> Vec<WorkflowDef> {
  vec![
    SingleStageVariant::Plain.definition(),
    SingleStageVariant::External.definition(),
    SingleStageVariant::Community.definition(),
    SingleStageVariant::SameTime.definition(),
    double::definition(),
  ]
}

const SUBMIT: &str = "Submit";
const CREATE_REVISION: &str = "create_revision";

/// Applicant submits the first version of the application.
fn initial_submit() -> DetailedAction {
  DetailedAction {
    display: SUBMIT.to_string(),
    permissions: Some(vec![Role::Applicant]),
    method: Some(CREATE_REVISION.to_string()),
    ..Default::default()
  }
}

/// Anyone working on the submission sends back the requested information.
fn resubmit() -> DetailedAction {
  DetailedAction {
    display: SUBMIT.to_string(),
    permissions: Some(vec![Role::Applicant, Role::Staff, Role::Lead, Role::Admin]),
    method: Some(CREATE_REVISION.to_string()),
    ..Default::default()
  }
}
