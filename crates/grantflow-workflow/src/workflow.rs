use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigurationError, WorkflowError};
use crate::graph::TransitionGraph;
use crate::phase::Phase;
use crate::role::RoleSet;
use crate::stage::Stage;
use crate::transition::{ConditionCheck, Transition};

/// An ordered set of phases that one kind of application moves through.
#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
  name: String,
  admin_name: String,
  phases: Vec<Phase>,
  #[serde(skip)]
  index: HashMap<String, usize>,
}

impl Workflow {
  /// Build a workflow from phases in declaration order.
  pub fn new(
    name: impl Into<String>,
    admin_name: impl Into<String>,
    phases: Vec<Phase>,
  ) -> Result<Self, ConfigurationError> {
    let admin_name = admin_name.into();
    let mut index = HashMap::with_capacity(phases.len());
    for (position, phase) in phases.iter().enumerate() {
      if index.insert(phase.name().to_string(), position).is_some() {
        return Err(ConfigurationError::DuplicatePhase {
          workflow: admin_name,
          phase: phase.name().to_string(),
        });
      }
    }

    Ok(Self {
      name: name.into(),
      admin_name,
      phases,
      index,
    })
  }

  /// Human readable name, e.g. "Request".
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Key the workflow is registered and stored under, e.g. "single".
  pub fn admin_name(&self) -> &str {
    &self.admin_name
  }

  pub fn len(&self) -> usize {
    self.phases.len()
  }

  pub fn is_empty(&self) -> bool {
    self.phases.is_empty()
  }

  /// Phases in declaration order.
  pub fn phases(&self) -> &[Phase] {
    &self.phases
  }

  pub fn contains(&self, phase: &str) -> bool {
    self.index.contains_key(phase)
  }

  pub fn get(&self, phase: &str) -> Option<&Phase> {
    self.index.get(phase).map(|&position| &self.phases[position])
  }

  /// Look up a phase, failing when a stored status does not belong here.
  pub fn phase(&self, phase: &str) -> Result<&Phase, WorkflowError> {
    self.get(phase).ok_or_else(|| WorkflowError::PhaseNotFound {
      workflow: self.admin_name.clone(),
      phase: phase.to_string(),
    })
  }

  /// Distinct stages in the order they first appear.
  pub fn stages(&self) -> Vec<&Stage> {
    let mut stages: Vec<&Stage> = Vec::new();
    for phase in &self.phases {
      if !stages.contains(&phase.stage()) {
        stages.push(phase.stage());
      }
    }
    stages
  }

  /// Phases grouped by step, steps in the order they first appear.
  pub fn stepped_phases(&self) -> Vec<(usize, Vec<&Phase>)> {
    let mut steps: Vec<(usize, Vec<&Phase>)> = Vec::new();
    for phase in &self.phases {
      match steps.iter_mut().find(|(step, _)| *step == phase.step()) {
        Some((_, phases)) => phases.push(phase),
        None => steps.push((phase.step(), vec![phase])),
      }
    }
    steps
  }

  /// The display phase (first phase) of each step, skipping those the given
  /// roles cannot view. Without roles every display phase is returned.
  pub fn phases_for(&self, roles: Option<&RoleSet>) -> Vec<&Phase> {
    self
      .stepped_phases()
      .into_iter()
      .filter_map(|(_, phases)| phases.first().copied())
      .filter(|phase| roles.is_none_or(|roles| phase.permissions().can_view(roles)))
      .collect()
  }

  /// The latest display phase before `current`'s step that the roles can view.
  ///
  /// Used to show applicants their last visible status instead of an internal
  /// one.
  pub fn previous_visible(&self, current: &Phase, roles: &RoleSet) -> Option<&Phase> {
    let display_phases = self.phases_for(None);
    let position = display_phases
      .iter()
      .position(|phase| phase.step() == current.step())?;

    display_phases[..position]
      .iter()
      .rev()
      .find(|phase| phase.permissions().can_view(roles))
      .copied()
  }

  pub fn graph(&self) -> TransitionGraph {
    TransitionGraph::new(&self.phases)
  }

  /// Transitions out of `phase` the roles may take given the conditions.
  pub fn available_transitions(
    &self,
    phase: &str,
    roles: &RoleSet,
    conditions: &dyn ConditionCheck,
  ) -> Result<Vec<&Transition>, WorkflowError> {
    Ok(self.phase(phase)?.available_transitions(roles, conditions))
  }

  /// Validate moving a submission from `from` to `to` and return the target.
  pub fn check_transition(
    &self,
    from: &str,
    to: &str,
    roles: &RoleSet,
    conditions: &dyn ConditionCheck,
  ) -> Result<&Phase, WorkflowError> {
    let current = self.phase(from)?;
    let transition = current
      .transition(to)
      .ok_or_else(|| WorkflowError::TransitionNotFound {
        from: from.to_string(),
        to: to.to_string(),
      })?;

    if !transition.is_permitted(roles) {
      debug!(workflow = %self.admin_name, phase = from, target = to, roles = %roles, "transition not permitted");
      return Err(WorkflowError::TransitionNotPermitted {
        from: from.to_string(),
        to: to.to_string(),
      });
    }

    if let Some(condition) = transition.unmet_condition(conditions) {
      debug!(workflow = %self.admin_name, phase = from, target = to, condition, "transition condition not met");
      return Err(WorkflowError::ConditionNotMet {
        from: from.to_string(),
        to: to.to_string(),
        condition: condition.to_string(),
      });
    }

    self.phase(to)
  }
}

impl fmt::Display for Workflow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
