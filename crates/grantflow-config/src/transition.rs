use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// An outgoing transition of a phase, keyed by the target phase name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDef {
  pub target: String,
  pub action: ActionDef,
}

/// The action behind a transition.
///
/// A bare label is shorthand for "staff, lead or admin may do this, no side
/// effect, no conditions".
///
/// ```json
/// "Request More Information"
/// { "display": "Submit", "permissions": ["applicant"], "method": "create_revision" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionDef {
  Label(String),
  Detailed(DetailedAction),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedAction {
  pub display: String,
  /// Roles allowed to take the transition. Staff, lead and admin when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub permissions: Option<Vec<Role>>,
  /// Name of the side-effect method the collaborator runs on the submission.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,
  /// Comma separated condition names, e.g. "not_progressed".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub conditions: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub custom: Option<BTreeMap<String, bool>>,
}

impl ActionDef {
  pub fn display(&self) -> &str {
    match self {
      ActionDef::Label(label) => label,
      ActionDef::Detailed(action) => &action.display,
    }
  }
}

impl TransitionDef {
  pub fn label(target: impl Into<String>, display: impl Into<String>) -> Self {
    Self {
      target: target.into(),
      action: ActionDef::Label(display.into()),
    }
  }

  pub fn detailed(target: impl Into<String>, action: DetailedAction) -> Self {
    Self {
      target: target.into(),
      action: ActionDef::Detailed(action),
    }
  }
}
