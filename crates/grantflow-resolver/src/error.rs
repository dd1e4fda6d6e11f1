use grantflow_workflow::ConfigurationError;
use thiserror::Error;

/// Errors that can occur during workflow resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// Workflow declares no steps.
  #[error("workflow '{workflow}' has no steps")]
  EmptyWorkflow { workflow: String },

  /// A step declares no phases.
  #[error("step {step} of workflow '{workflow}' has no phases")]
  EmptyStep { workflow: String, step: usize },

  /// Transition to a phase that does not exist in the workflow.
  #[error("phase '{phase}' in workflow '{workflow}' has a transition to unknown phase '{target}'")]
  UnknownTransitionTarget {
    workflow: String,
    phase: String,
    target: String,
  },

  /// A phase or the workflow itself is misconfigured.
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),
}
