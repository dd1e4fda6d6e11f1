use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use grantflow_config::{PhaseOutcome, Settings, WorkflowDef};
use grantflow_resolver::{Resolver, StandardResolver};
use grantflow_workflow::{Phase, RoleSet, Stage, Workflow, outcome_from_name};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::actions::{self, ActionMapping, DeterminationOutcome};
use crate::definitions::builtin_definitions;
use crate::error::RegistryError;
use crate::statuses::{
  self, COMMUNITY_REVIEW_PHASES, DETERMINATION_RESPONSE_PHASES, OPEN_CALL_PHASES, StatusBucket,
  StatusGroups,
};

/// A phase whose declared outcome disagrees with the one its name implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeConflict {
  pub workflow: String,
  pub phase: String,
  pub declared: PhaseOutcome,
  pub by_name: PhaseOutcome,
}

/// Every registered workflow plus the indexes derived from them.
///
/// Workflows are keyed by their admin name. The registry is immutable once
/// built.
#[derive(Debug, Clone)]
pub struct WorkflowRegistry {
  workflows: Vec<Workflow>,
  /// Phase names, deduplicated, in first-seen order.
  statuses: Vec<String>,
  statuses_by_display: BTreeMap<String, BTreeSet<String>>,
  groups: StatusGroups,
  outcome_conflicts: Vec<OutcomeConflict>,
}

impl WorkflowRegistry {
  /// Build a registry from resolved workflows, in registration order.
  pub fn new(workflows: Vec<Workflow>) -> Result<Self, RegistryError> {
    let mut seen = BTreeSet::new();
    for workflow in &workflows {
      if !seen.insert(workflow.admin_name()) {
        return Err(RegistryError::DuplicateWorkflow(
          workflow.admin_name().to_string(),
        ));
      }
    }

    let mut statuses: Vec<String> = Vec::new();
    let mut statuses_by_display: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut outcome_conflicts = Vec::new();

    for workflow in &workflows {
      info!(
        workflow = %workflow.admin_name(),
        name = %workflow.name(),
        phases = workflow.len(),
        "workflow registered"
      );

      for phase in workflow.phases() {
        if !statuses.iter().any(|status| status == phase.name()) {
          statuses.push(phase.name().to_string());
        }
        statuses_by_display
          .entry(phase.display_name().to_string())
          .or_default()
          .insert(phase.name().to_string());

        if let Some(declared) = phase.declared_outcome() {
          let by_name = outcome_from_name(phase.name());
          if declared != by_name {
            warn!(
              workflow = %workflow.admin_name(),
              phase = %phase.name(),
              ?declared,
              ?by_name,
              "declared outcome disagrees with phase name"
            );
            outcome_conflicts.push(OutcomeConflict {
              workflow: workflow.admin_name().to_string(),
              phase: phase.name().to_string(),
              declared,
              by_name,
            });
          }
        }
      }
    }

    let groups = StatusGroups::classify(&workflows);

    Ok(Self {
      workflows,
      statuses,
      statuses_by_display,
      groups,
      outcome_conflicts,
    })
  }

  /// Resolve and register the given definitions.
  pub fn from_definitions(
    definitions: &[WorkflowDef],
    resolver: &dyn Resolver,
  ) -> Result<Self, RegistryError> {
    let workflows = definitions
      .iter()
      .map(|def| resolver.resolve(def))
      .collect::<Result<Vec<_>, _>>()?;
    Self::new(workflows)
  }

  /// The five built-in workflows.
  pub fn builtin(settings: &Settings) -> Result<Self, RegistryError> {
    let resolver = StandardResolver::new(settings);
    Self::from_definitions(&builtin_definitions(), &resolver)
  }

  /// The built-in workflows followed by those in `settings.workflow_files`.
  pub fn load(settings: &Settings) -> Result<Self, RegistryError> {
    let mut definitions = builtin_definitions();
    for path in &settings.workflow_files {
      definitions.push(read_definition(path)?);
    }
    let resolver = StandardResolver::new(settings);
    Self::from_definitions(&definitions, &resolver)
  }

  pub fn workflows(&self) -> &[Workflow] {
    &self.workflows
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.workflows.iter().map(Workflow::admin_name)
  }

  pub fn len(&self) -> usize {
    self.workflows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.workflows.is_empty()
  }

  pub fn get(&self, key: &str) -> Option<&Workflow> {
    self
      .workflows
      .iter()
      .find(|workflow| workflow.admin_name() == key)
  }

  pub fn workflow(&self, key: &str) -> Result<&Workflow, RegistryError> {
    self
      .get(key)
      .ok_or_else(|| RegistryError::WorkflowNotFound(key.to_string()))
  }

  /// Look up the phase a submission is in.
  pub fn phase(&self, workflow: &str, phase: &str) -> Result<&Phase, RegistryError> {
    Ok(self.workflow(workflow)?.phase(phase)?)
  }

  /// Every phase of every workflow, in registration order. Shared phase names
  /// such as the draft state appear once per workflow.
  pub fn phases(&self) -> impl Iterator<Item = &Phase> {
    self.workflows.iter().flat_map(|workflow| workflow.phases())
  }

  /// Every phase name, deduplicated, in first-seen order.
  pub fn statuses(&self) -> &[String] {
    &self.statuses
  }

  /// Phase names grouped by their staff facing display name.
  pub fn statuses_by_display(&self) -> &BTreeMap<String, BTreeSet<String>> {
    &self.statuses_by_display
  }

  pub fn status_groups(&self) -> &StatusGroups {
    &self.groups
  }

  pub fn accepted_statuses(&self) -> &BTreeSet<String> {
    &self.groups.accepted
  }

  pub fn dismissed_statuses(&self) -> &BTreeSet<String> {
    &self.groups.dismissed
  }

  pub fn active_statuses(&self) -> &BTreeSet<String> {
    &self.groups.active
  }

  pub fn ext_review_statuses(&self) -> &BTreeSet<String> {
    &self.groups.ext_review
  }

  /// Phases at or after the external review step of their workflow.
  pub fn ext_or_higher_statuses(&self) -> &BTreeSet<String> {
    &self.groups.ext_or_higher
  }

  /// Review phases, limited to those the roles may review when given.
  pub fn review_statuses(&self, roles: Option<&RoleSet>) -> BTreeSet<String> {
    self.reviewable(roles, statuses::is_review_status)
  }

  /// Undecided phases, limited to those the roles may review when given.
  pub fn review_active_statuses(&self, roles: Option<&RoleSet>) -> BTreeSet<String> {
    self.reviewable(roles, statuses::is_active_status)
  }

  fn reviewable(&self, roles: Option<&RoleSet>, rule: fn(&str) -> bool) -> BTreeSet<String> {
    self
      .phases()
      .filter(|phase| rule(phase.name()))
      .filter(|phase| roles.is_none_or(|roles| phase.permissions().can_review(roles)))
      .map(|phase| phase.name().to_string())
      .collect()
  }

  pub fn determination_phases(&self) -> Vec<&str> {
    self
      .statuses
      .iter()
      .map(String::as_str)
      .filter(|name| statuses::is_determination_phase(name))
      .collect()
  }

  pub fn determination_response_phases(&self) -> &'static [&'static str] {
    DETERMINATION_RESPONSE_PHASES
  }

  pub fn open_call_phases(&self) -> &'static [&'static str] {
    OPEN_CALL_PHASES
  }

  pub fn community_review_phases(&self) -> &'static [&'static str] {
    COMMUNITY_REVIEW_PHASES
  }

  /// Filter buckets grouping statuses across workflows.
  pub fn phases_mapping(&self) -> Vec<StatusBucket> {
    statuses::phases_mapping(&self.statuses)
  }

  pub fn outcome_conflicts(&self) -> &[OutcomeConflict] {
    &self.outcome_conflicts
  }

  pub fn determination_transitions(&self) -> BTreeMap<String, DeterminationOutcome> {
    actions::determination_transitions(self.phases())
  }

  /// Actions grouped by label, for one workflow or for all of them.
  pub fn action_mapping(&self, workflow: Option<&Workflow>) -> ActionMapping {
    match workflow {
      Some(workflow) => ActionMapping::build(workflow.phases()),
      None => ActionMapping::build(self.phases()),
    }
  }

  pub fn stage_change_actions(&self) -> BTreeMap<String, Stage> {
    actions::stage_change_actions(&self.workflows)
  }
}

fn read_definition(path: &Path) -> Result<WorkflowDef, RegistryError> {
  debug!(path = %path.display(), "reading workflow definition");
  let input = fs::read_to_string(path).map_err(|source| RegistryError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  WorkflowDef::from_json(&input).map_err(|source| RegistryError::Parse {
    path: path.to_path_buf(),
    source,
  })
}
