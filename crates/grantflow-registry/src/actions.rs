//! Lookups over transitions used by batch actions and determinations.

use std::collections::BTreeMap;

use grantflow_workflow::{Phase, Stage, Transition, Workflow};
use serde::Serialize;

/// Determination outcome a transition leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeterminationOutcome {
  Accepted,
  Rejected,
  MoreInfo,
}

impl DeterminationOutcome {
  pub fn as_str(&self) -> &'static str {
    match self {
      DeterminationOutcome::Accepted => "accepted",
      DeterminationOutcome::Rejected => "rejected",
      DeterminationOutcome::MoreInfo => "more_info",
    }
  }

  /// Classify a transition target by name.
  pub fn classify(target: &str) -> Option<Self> {
    if target.contains("accepted") {
      Some(DeterminationOutcome::Accepted)
    } else if target.contains("rejected") {
      Some(DeterminationOutcome::Rejected)
    } else if target.contains("more_info") {
      Some(DeterminationOutcome::MoreInfo)
    } else if target.contains("invited_to_proposal") {
      Some(DeterminationOutcome::Accepted)
    } else {
      None
    }
  }
}

/// Every transition target that implies a determination, with its outcome.
pub fn determination_transitions<'a>(
  phases: impl IntoIterator<Item = &'a Phase>,
) -> BTreeMap<String, DeterminationOutcome> {
  let mut transitions = BTreeMap::new();
  for phase in phases {
    for transition in phase.transitions() {
      if let Some(outcome) = DeterminationOutcome::classify(&transition.target) {
        transitions.insert(transition.target.clone(), outcome);
      }
    }
  }
  transitions
}

/// Transitions sharing one display label, across phases and workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionGroup {
  pub slug: String,
  pub display: String,
  /// Target phase names in phase order. A target reachable from several
  /// phases appears once per phase.
  pub transitions: Vec<String>,
}

/// Transitions grouped by the slug of their display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionMapping {
  groups: Vec<ActionGroup>,
}

impl ActionMapping {
  pub fn build<'a>(phases: impl IntoIterator<Item = &'a Phase>) -> Self {
    let mut groups: Vec<ActionGroup> = Vec::new();
    for phase in phases {
      for transition in phase.transitions() {
        let slug = transition.action_slug();
        match groups.iter_mut().find(|group| group.slug == slug) {
          Some(group) => {
            group.display = transition.display.clone();
            group.transitions.push(transition.target.clone());
          }
          None => groups.push(ActionGroup {
            slug,
            display: transition.display.clone(),
            transitions: vec![transition.target.clone()],
          }),
        }
      }
    }
    Self { groups }
  }

  pub fn get(&self, slug: &str) -> Option<&ActionGroup> {
    self.groups.iter().find(|group| group.slug == slug)
  }

  pub fn iter(&self) -> impl Iterator<Item = &ActionGroup> {
    self.groups.iter()
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  /// The transition out of `phase` that the action `slug` stands for.
  pub fn transition_for<'p>(&self, slug: &str, phase: &'p Phase) -> Option<&'p Transition> {
    let group = self.get(slug)?;
    phase.transitions().iter().find(|transition| {
      transition.action_slug() == group.slug && group.transitions.contains(&transition.target)
    })
  }
}

/// Phases that start a new stage, mapped to the stage they start.
///
/// A transition into one of these phases moves the submission between stages,
/// e.g. from concept note to proposal.
pub fn stage_change_actions(workflows: &[Workflow]) -> BTreeMap<String, Stage> {
  let mut changes = BTreeMap::new();
  for workflow in workflows {
    for pair in workflow.phases().windows(2) {
      let (previous, next) = (&pair[0], &pair[1]);
      if previous.stage() != next.stage() {
        changes.insert(next.name().to_string(), next.stage().clone());
      }
    }
  }
  changes
}
