use serde::{Deserialize, Serialize};

use crate::phase::StepDef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDef {
  /// Human readable name, e.g. "Concept & Proposal".
  pub name: String,
  /// Registry key stored on submissions, e.g. "double".
  pub admin_name: String,
  pub steps: Vec<StepDef>,
}

impl WorkflowDef {
  /// Parse a definition from a JSON document.
  pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(input)
  }
}
