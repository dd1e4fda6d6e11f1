use serde::{Deserialize, Serialize};

use crate::enums::{PermissionPreset, Role};

/// Who may edit, review and view a phase.
///
/// Either one of the shared presets by name, or explicit role lists. A missing
/// `view` list means the default visibility (staff, applicant, reviewer, partner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionsDef {
  Preset(PermissionPreset),
  Explicit {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    edit: Vec<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    review: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    view: Option<Vec<Role>>,
  },
}

impl From<PermissionPreset> for PermissionsDef {
  fn from(preset: PermissionPreset) -> Self {
    PermissionsDef::Preset(preset)
  }
}
