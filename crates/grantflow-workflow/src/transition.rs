use std::collections::{BTreeMap, BTreeSet};

use grantflow_config::{ActionDef, TransitionDef};
use serde::Serialize;

use crate::role::RoleSet;
use crate::slug::slugify;

/// A permission gated edge from one phase to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
  pub target: String,
  pub display: String,
  pub permissions: RoleSet,
  /// Side effect the collaborator runs when the transition is taken.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,
  /// Names of conditions that must all hold on the submission.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub conditions: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub custom: Option<BTreeMap<String, bool>>,
}

impl Transition {
  /// Normalize a declared transition. A bare label becomes a transition that
  /// staff, lead and admin may take with no side effect and no conditions.
  pub fn from_def(def: &TransitionDef) -> Self {
    match &def.action {
      ActionDef::Label(display) => Self {
        target: def.target.clone(),
        display: display.clone(),
        permissions: RoleSet::staff_lead_admin(),
        method: None,
        conditions: Vec::new(),
        custom: None,
      },
      ActionDef::Detailed(action) => Self {
        target: def.target.clone(),
        display: action.display.clone(),
        permissions: action
          .permissions
          .as_deref()
          .map(RoleSet::from)
          .unwrap_or_else(RoleSet::staff_lead_admin),
        method: action.method.clone(),
        conditions: action
          .conditions
          .as_deref()
          .map(parse_conditions)
          .unwrap_or_default(),
        custom: action.custom.clone(),
      },
    }
  }

  /// Slug of the display label, shared by every transition with the same label.
  pub fn action_slug(&self) -> String {
    slugify(&self.display)
  }

  pub fn is_permitted(&self, roles: &RoleSet) -> bool {
    self.permissions.intersects(roles)
  }

  /// The first declared condition that does not hold, if any.
  pub fn unmet_condition(&self, conditions: &dyn ConditionCheck) -> Option<&str> {
    self
      .conditions
      .iter()
      .map(String::as_str)
      .find(|condition| !conditions.holds(condition))
  }

  pub fn is_available(&self, roles: &RoleSet, conditions: &dyn ConditionCheck) -> bool {
    self.is_permitted(roles) && self.unmet_condition(conditions).is_none()
  }
}

fn parse_conditions(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|condition| !condition.is_empty())
    .map(str::to_string)
    .collect()
}

/// Evaluates named transition conditions against a submission.
///
/// Conditions are owned by the collaborator (e.g. "not_progressed" asks whether
/// a concept was already turned into a proposal).
pub trait ConditionCheck {
  fn holds(&self, condition: &str) -> bool;
}

/// No condition holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConditions;

impl ConditionCheck for NoConditions {
  fn holds(&self, _condition: &str) -> bool {
    false
  }
}

impl ConditionCheck for BTreeSet<String> {
  fn holds(&self, condition: &str) -> bool {
    self.contains(condition)
  }
}

impl<const N: usize> ConditionCheck for [&str; N] {
  fn holds(&self, condition: &str) -> bool {
    self.contains(&condition)
  }
}
