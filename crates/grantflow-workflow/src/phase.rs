use std::fmt;

use grantflow_config::{PhaseOutcome, TransitionDef};
use serde::Serialize;

use crate::error::ConfigurationError;
use crate::permission::PermissionSet;
use crate::role::RoleSet;
use crate::slug::slugify;
use crate::stage::Stage;
use crate::transition::{ConditionCheck, Transition};

/// Everything needed to build a [`Phase`].
#[derive(Debug, Clone)]
pub struct NewPhase {
  pub name: String,
  pub display: String,
  pub stage: Stage,
  pub permissions: PermissionSet,
  pub step: usize,
  pub public: Option<String>,
  pub future: Option<String>,
  pub transitions: Vec<TransitionDef>,
  pub outcome: Option<PhaseOutcome>,
}

/// A named node of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
  name: String,
  display_name: String,
  display_slug: String,
  public_name: String,
  future_name_staff: String,
  future_name_public: String,
  stage: Stage,
  permissions: PermissionSet,
  step: usize,
  transitions: Vec<Transition>,
  bg_color: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  declared_outcome: Option<PhaseOutcome>,
}

impl Phase {
  /// Build a phase, normalizing its transitions.
  ///
  /// Fails when both a public and a future name are given. A later transition
  /// to the same target replaces the earlier one in place.
  pub fn new(new: NewPhase) -> Result<Self, ConfigurationError> {
    let public = new.public.filter(|name| !name.is_empty());
    let future = new.future.filter(|name| !name.is_empty());
    if public.is_some() && future.is_some() {
      return Err(ConfigurationError::PublicAndFutureNames { phase: new.name });
    }

    let public_name = public.unwrap_or_else(|| new.display.clone());
    let future_name_staff = future.clone().unwrap_or_else(|| new.display.clone());
    let future_name_public = future.unwrap_or_else(|| public_name.clone());

    let mut transitions: Vec<Transition> = Vec::with_capacity(new.transitions.len());
    for def in &new.transitions {
      let transition = Transition::from_def(def);
      match transitions.iter_mut().find(|t| t.target == transition.target) {
        Some(existing) => *existing = transition,
        None => transitions.push(transition),
      }
    }

    Ok(Self {
      display_slug: slugify(&new.display),
      bg_color: bg_color(&new.display),
      name: new.name,
      display_name: new.display,
      public_name,
      future_name_staff,
      future_name_public,
      stage: new.stage,
      permissions: new.permissions,
      step: new.step,
      transitions,
      declared_outcome: new.outcome,
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Staff facing name.
  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  pub fn display_slug(&self) -> &str {
    &self.display_slug
  }

  /// Applicant facing name.
  pub fn public_name(&self) -> &str {
    &self.public_name
  }

  pub fn future_name_staff(&self) -> &str {
    &self.future_name_staff
  }

  pub fn future_name_public(&self) -> &str {
    &self.future_name_public
  }

  pub fn stage(&self) -> &Stage {
    &self.stage
  }

  pub fn permissions(&self) -> &PermissionSet {
    &self.permissions
  }

  pub fn step(&self) -> usize {
    self.step
  }

  pub fn bg_color(&self) -> &'static str {
    self.bg_color
  }

  /// Outgoing transitions in declaration order.
  pub fn transitions(&self) -> &[Transition] {
    &self.transitions
  }

  pub fn transition(&self, target: &str) -> Option<&Transition> {
    self.transitions.iter().find(|t| t.target == target)
  }

  pub fn is_terminal(&self) -> bool {
    self.transitions.is_empty()
  }

  /// Transitions the given roles may take right now.
  pub fn available_transitions(
    &self,
    roles: &RoleSet,
    conditions: &dyn ConditionCheck,
  ) -> Vec<&Transition> {
    self
      .transitions
      .iter()
      .filter(|t| t.is_available(roles, conditions))
      .collect()
  }

  /// The outcome declared in the definition, if any.
  pub fn declared_outcome(&self) -> Option<PhaseOutcome> {
    self.declared_outcome
  }

  /// The declared outcome, or the one implied by the phase name.
  pub fn outcome(&self) -> PhaseOutcome {
    self
      .declared_outcome
      .unwrap_or_else(|| outcome_from_name(&self.name))
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.display_name)
  }
}

/// Classify a phase by its name alone.
///
/// Stored statuses and their filters depend on these exact rules.
pub fn outcome_from_name(name: &str) -> PhaseOutcome {
  if name.contains("accepted") || name == "invited_to_proposal" {
    PhaseOutcome::Accepted
  } else if name.contains("rejected") {
    PhaseOutcome::Dismissed
  } else {
    PhaseOutcome::InProgress
  }
}

fn bg_color(display: &str) -> &'static str {
  match display {
    "Draft" => "bg-gray-200",
    "Screening" | "Proposal Received" => "bg-cyan-200",
    "Internal Review" | "Review" => "bg-yellow-200",
    "Advisory Council Review" => "bg-orange-200",
    "Community Review" | "Open Call (public)" => "bg-amber-200",
    "Ready For Discussion" => "bg-blue-200",
    "More information required" => "bg-sky-200",
    "Ready for Determination"
    | "Ready for Preliminary Determination"
    | "Ready for Final Determination" => "bg-purple-200",
    "Invited for Proposal" => "bg-indigo-200",
    "Accepted" | "Concept Accepted" => "bg-green-200",
    "Accepted but additional info required" => "bg-lime-200",
    "Dismissed" => "bg-rose-200",
    _ => "bg-gray-200",
  }
}
