use thiserror::Error;

/// A workflow definition that cannot be turned into a usable workflow.
///
/// These are startup faults: the tables are static, so a process that hits one
/// should refuse to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  #[error("phase '{phase}' declares both a public and a future name")]
  PublicAndFutureNames { phase: String },

  #[error("phase '{phase}' is declared twice in workflow '{workflow}'")]
  DuplicatePhase { workflow: String, phase: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
  #[error("phase '{phase}' not found in workflow '{workflow}'")]
  PhaseNotFound { workflow: String, phase: String },

  #[error("no transition from '{from}' to '{to}'")]
  TransitionNotFound { from: String, to: String },

  #[error("transition from '{from}' to '{to}' is not permitted for the given roles")]
  TransitionNotPermitted { from: String, to: String },

  #[error("transition from '{from}' to '{to}' requires condition '{condition}'")]
  ConditionNotMet {
    from: String,
    to: String,
    condition: String,
  },

  #[error(transparent)]
  Configuration(#[from] ConfigurationError),
}
