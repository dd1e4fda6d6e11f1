use serde::{Deserialize, Serialize};

/// The form stage a phase belongs to, e.g. "Concept" or "Proposal".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDef {
  pub name: String,
  #[serde(default)]
  pub has_external_review: bool,
}
