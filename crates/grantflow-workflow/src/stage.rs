use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use grantflow_config::StageDef;
use serde::Serialize;

/// The form stage a phase belongs to.
///
/// Stages compare by name only.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Stage {
  name: Cow<'static, str>,
  has_external_review: bool,
}

impl Stage {
  pub const fn new_static(name: &'static str, has_external_review: bool) -> Self {
    Self {
      name: Cow::Borrowed(name),
      has_external_review,
    }
  }

  pub fn new(name: impl Into<String>, has_external_review: bool) -> Self {
    Self {
      name: Cow::Owned(name.into()),
      has_external_review,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn has_external_review(&self) -> bool {
    self.has_external_review
  }

  pub fn to_def(&self) -> StageDef {
    StageDef {
      name: self.name.to_string(),
      has_external_review: self.has_external_review,
    }
  }
}

impl PartialEq for Stage {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Hash for Stage {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state);
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

impl From<&StageDef> for Stage {
  fn from(def: &StageDef) -> Self {
    Stage::new(def.name.clone(), def.has_external_review)
  }
}

impl From<&Stage> for StageDef {
  fn from(stage: &Stage) -> Self {
    stage.to_def()
  }
}

impl From<Stage> for StageDef {
  fn from(stage: Stage) -> Self {
    stage.to_def()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_equality_is_by_name() {
    const CONCEPT: Stage = Stage::new_static("Concept", false);
    assert_eq!(CONCEPT, Stage::new("Concept", true));
    assert_ne!(CONCEPT, Stage::new("Proposal", false));
  }

  #[test]
  fn test_def_conversion() {
    let def = StageDef {
      name: "Proposal".to_string(),
      has_external_review: true,
    };
    let stage = Stage::from(&def);
    assert!(stage.has_external_review());
    assert_eq!(stage.to_def(), def);
  }
}
