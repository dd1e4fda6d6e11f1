//! Runtime settings for building the workflow registry.
//!
//! ```json
//! {
//!   "org_short_name": "OTF",
//!   "workflow_files": ["/etc/grantflow/fellowship.json"]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORG_SHORT_NAME: &str = "OTF";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
  /// Substituted into applicant facing names such as "{org_short_name} Review".
  #[serde(default = "default_org_short_name")]
  pub org_short_name: String,
  /// Extra JSON workflow definitions registered next to the built-in ones.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub workflow_files: Vec<PathBuf>,
}

fn default_org_short_name() -> String {
  DEFAULT_ORG_SHORT_NAME.to_string()
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      org_short_name: default_org_short_name(),
      workflow_files: Vec::new(),
    }
  }
}

impl Settings {
  pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(input)
  }
}
