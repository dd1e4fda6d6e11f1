use std::path::PathBuf;

use grantflow_resolver::ResolveError;
use grantflow_workflow::WorkflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("workflow '{0}' not found")]
  WorkflowNotFound(String),

  #[error("workflow '{0}' is registered twice")]
  DuplicateWorkflow(String),

  #[error("workflow registry is already initialized")]
  AlreadyInitialized,

  #[error("failed to read workflow definition {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse workflow definition {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error(transparent)]
  Workflow(#[from] WorkflowError),
}
