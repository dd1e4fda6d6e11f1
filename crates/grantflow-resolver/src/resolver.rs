use grantflow_config::{PhaseDef, Settings, WorkflowDef};
use grantflow_workflow::{NewPhase, PermissionSet, Phase, Stage, Workflow};
use tracing::debug;

use crate::error::ResolveError;

/// Placeholder replaced with the organisation's short name in phase names.
pub const ORG_SHORT_NAME_PLACEHOLDER: &str = "{org_short_name}";

/// Resolver transforms a WorkflowDef into a Workflow.
pub trait Resolver {
  /// Resolve a workflow definition.
  ///
  /// This process:
  /// 1. Validates the step structure (no empty steps)
  /// 2. Builds every phase, assigning its step from the step position
  /// 3. Validates that every transition targets a phase of the same workflow
  fn resolve(&self, def: &WorkflowDef) -> Result<Workflow, ResolveError>;
}

/// Standard resolver that fills in organisation specific names.
#[derive(Debug, Clone)]
pub struct StandardResolver {
  org_short_name: String,
}

impl StandardResolver {
  pub fn new(settings: &Settings) -> Self {
    Self {
      org_short_name: settings.org_short_name.clone(),
    }
  }

  fn substitute(&self, text: &str) -> String {
    text.replace(ORG_SHORT_NAME_PLACEHOLDER, &self.org_short_name)
  }

  /// Resolve a single phase definition.
  fn resolve_phase(&self, def: &PhaseDef, step: usize) -> Result<Phase, ResolveError> {
    let phase = Phase::new(NewPhase {
      name: def.name.clone(),
      display: self.substitute(&def.display),
      stage: Stage::from(&def.stage),
      permissions: PermissionSet::from_def(&def.permissions),
      step,
      public: def.public.as_deref().map(|name| self.substitute(name)),
      future: def.future.as_deref().map(|name| self.substitute(name)),
      transitions: def.transitions.clone(),
      outcome: def.outcome,
    })?;
    Ok(phase)
  }

  /// Validate that all transitions reference existing phases.
  fn validate_targets(&self, workflow: &Workflow) -> Result<(), ResolveError> {
    for phase in workflow.phases() {
      for transition in phase.transitions() {
        if !workflow.contains(&transition.target) {
          return Err(ResolveError::UnknownTransitionTarget {
            workflow: workflow.admin_name().to_string(),
            phase: phase.name().to_string(),
            target: transition.target.clone(),
          });
        }
      }
    }
    Ok(())
  }
}

impl Default for StandardResolver {
  fn default() -> Self {
    Self::new(&Settings::default())
  }
}

impl Resolver for StandardResolver {
  fn resolve(&self, def: &WorkflowDef) -> Result<Workflow, ResolveError> {
    if def.steps.is_empty() {
      return Err(ResolveError::EmptyWorkflow {
        workflow: def.admin_name.clone(),
      });
    }

    let mut phases = Vec::new();
    for (step, step_def) in def.steps.iter().enumerate() {
      if step_def.phases.is_empty() {
        return Err(ResolveError::EmptyStep {
          workflow: def.admin_name.clone(),
          step,
        });
      }
      for phase_def in &step_def.phases {
        phases.push(self.resolve_phase(phase_def, step)?);
      }
    }

    let workflow = Workflow::new(&def.name, &def.admin_name, phases)?;
    self.validate_targets(&workflow)?;

    debug!(
      workflow = %workflow.admin_name(),
      phases = workflow.len(),
      "workflow resolved"
    );

    Ok(workflow)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use grantflow_config::{PermissionPreset, PhaseOutcome, StageDef, StepDef};
  use grantflow_workflow::ConfigurationError;

  fn request() -> StageDef {
    StageDef {
      name: "Request".to_string(),
      has_external_review: false,
    }
  }

  fn make_phase(name: &str) -> PhaseDef {
    PhaseDef::new(name, "Screening", request(), PermissionPreset::Default)
  }

  fn make_workflow(steps: Vec<StepDef>) -> WorkflowDef {
    WorkflowDef {
      name: "Test".to_string(),
      admin_name: "test".to_string(),
      steps,
    }
  }

  #[test]
  fn test_resolve_simple_workflow() {
    let def = make_workflow(vec![
      make_phase("in_discussion")
        .public("Application Received")
        .to("more_info", "Request More Information")
        .to("rejected", "Dismiss")
        .into(),
      StepDef::new(vec![make_phase("more_info"), make_phase("rejected")]),
    ]);

    let workflow = StandardResolver::default().resolve(&def).unwrap();

    assert_eq!(workflow.admin_name(), "test");
    assert_eq!(workflow.len(), 3);
    assert_eq!(workflow.phase("in_discussion").unwrap().step(), 0);
    assert_eq!(workflow.phase("more_info").unwrap().step(), 1);
    assert_eq!(workflow.phase("rejected").unwrap().step(), 1);
    assert_eq!(
      workflow.phase("in_discussion").unwrap().public_name(),
      "Application Received"
    );
  }

  #[test]
  fn test_resolve_unknown_target() {
    let def = make_workflow(vec![
      make_phase("in_discussion")
        .to("internal_reveiw", "Open Review")
        .into(),
    ]);

    let err = StandardResolver::default().resolve(&def).unwrap_err();
    assert_eq!(
      err,
      ResolveError::UnknownTransitionTarget {
        workflow: "test".to_string(),
        phase: "in_discussion".to_string(),
        target: "internal_reveiw".to_string(),
      }
    );
  }

  #[test]
  fn test_resolve_duplicate_phase() {
    let def = make_workflow(vec![
      make_phase("in_discussion").into(),
      make_phase("in_discussion").into(),
    ]);

    let err = StandardResolver::default().resolve(&def).unwrap_err();
    assert!(matches!(
      err,
      ResolveError::Configuration(ConfigurationError::DuplicatePhase { .. })
    ));
  }

  #[test]
  fn test_resolve_public_and_future() {
    let def = make_workflow(vec![
      make_phase("accepted")
        .public("Accepted")
        .future("Application Outcome")
        .into(),
    ]);

    let err = StandardResolver::default().resolve(&def).unwrap_err();
    assert_eq!(
      err,
      ResolveError::Configuration(ConfigurationError::PublicAndFutureNames {
        phase: "accepted".to_string()
      })
    );
  }

  #[test]
  fn test_resolve_empty_workflow_and_step() {
    let resolver = StandardResolver::default();

    assert!(matches!(
      resolver.resolve(&make_workflow(vec![])),
      Err(ResolveError::EmptyWorkflow { .. })
    ));
    assert!(matches!(
      resolver.resolve(&make_workflow(vec![make_phase("a").into(), StepDef::default()])),
      Err(ResolveError::EmptyStep { step: 1, .. })
    ));
  }

  #[test]
  fn test_org_short_name_is_substituted() {
    let settings = Settings {
      org_short_name: "ACME".to_string(),
      ..Default::default()
    };
    let def = make_workflow(vec![
      PhaseDef::new("internal_review", "Internal Review", request(), PermissionPreset::Default)
        .public("{org_short_name} Review")
        .into(),
    ]);

    let workflow = StandardResolver::new(&settings).resolve(&def).unwrap();
    assert_eq!(
      workflow.phase("internal_review").unwrap().public_name(),
      "ACME Review"
    );
  }

  #[test]
  fn test_declared_outcome_is_kept() {
    let def = make_workflow(vec![
      make_phase("approved").outcome(PhaseOutcome::Accepted).into(),
    ]);

    let workflow = StandardResolver::default().resolve(&def).unwrap();
    assert_eq!(
      workflow.phase("approved").unwrap().declared_outcome(),
      Some(PhaseOutcome::Accepted)
    );
  }

  #[test]
  fn test_resolve_from_json() {
    let input = r#"{
      "name": "Test",
      "admin_name": "test",
      "steps": [
        [{
          "name": "draft",
          "display": "Draft",
          "stage": { "name": "Request" },
          "permissions": "applicant_edit",
          "transitions": [{
            "target": "in_discussion",
            "action": { "display": "Submit", "permissions": ["applicant"] }
          }]
        }],
        [{
          "name": "in_discussion",
          "display": "Screening",
          "stage": { "name": "Request" },
          "permissions": "default"
        }]
      ]
    }"#;
    let def: WorkflowDef = serde_json::from_str(input).unwrap();

    let workflow = StandardResolver::default().resolve(&def).unwrap();
    let submit = workflow
      .phase("draft")
      .unwrap()
      .transition("in_discussion")
      .unwrap();

    assert_eq!(submit.display, "Submit");
    assert!(submit.permissions.contains(grantflow_config::Role::Applicant));
    assert!(!submit.permissions.contains(grantflow_config::Role::Staff));
  }
}
