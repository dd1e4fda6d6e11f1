use serde::{Deserialize, Serialize};

use crate::enums::PhaseOutcome;
use crate::permissions::PermissionsDef;
use crate::stage::StageDef;
use crate::transition::{DetailedAction, TransitionDef};

/// One node of a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDef {
  pub name: String,
  /// Staff facing name.
  pub display: String,
  pub stage: StageDef,
  pub permissions: PermissionsDef,
  /// Applicant facing name. Mutually exclusive with `future`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub public: Option<String>,
  /// Name shown while the phase is still ahead. Mutually exclusive with `public`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub future: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub transitions: Vec<TransitionDef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub outcome: Option<PhaseOutcome>,
}

impl PhaseDef {
  pub fn new(
    name: impl Into<String>,
    display: impl Into<String>,
    stage: impl Into<StageDef>,
    permissions: impl Into<PermissionsDef>,
  ) -> Self {
    Self {
      name: name.into(),
      display: display.into(),
      stage: stage.into(),
      permissions: permissions.into(),
      public: None,
      future: None,
      transitions: Vec::new(),
      outcome: None,
    }
  }

  pub fn public(mut self, public: impl Into<String>) -> Self {
    self.public = Some(public.into());
    self
  }

  pub fn future(mut self, future: impl Into<String>) -> Self {
    self.future = Some(future.into());
    self
  }

  pub fn outcome(mut self, outcome: PhaseOutcome) -> Self {
    self.outcome = Some(outcome);
    self
  }

  /// Add a shorthand transition.
  pub fn to(mut self, target: impl Into<String>, display: impl Into<String>) -> Self {
    self.transitions.push(TransitionDef::label(target, display));
    self
  }

  pub fn to_detailed(mut self, target: impl Into<String>, action: DetailedAction) -> Self {
    self.transitions.push(TransitionDef::detailed(target, action));
    self
  }
}

/// Phases that are alternative states of the same step of progress.
/// The first phase is the one shown in progress indicators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepDef {
  pub phases: Vec<PhaseDef>,
}

impl StepDef {
  pub fn new(phases: Vec<PhaseDef>) -> Self {
    Self { phases }
  }
}

impl From<PhaseDef> for StepDef {
  fn from(phase: PhaseDef) -> Self {
    Self {
      phases: vec![phase],
    }
  }
}
