use grantflow_config::{
  DetailedAction,
  PermissionPreset::{
    self, ApplicantEdit, Default as DefaultPermissions, HiddenFromApplicant, NoPermissions,
    ReviewerReview, StaffEdit,
  },
  PhaseDef, PhaseOutcome, Role, StepDef, WorkflowDef,
};
use grantflow_workflow::{DRAFT_STATE, INITIAL_STATE};

use super::{initial_submit, resubmit};
use crate::stages::{CONCEPT, PROPOSAL};

pub const ADMIN_NAME: &str = "double";
pub const NAME: &str = "Concept & Proposal";

/// Staff move an invited concept on to the proposal draft, once.
fn progress() -> DetailedAction {
  DetailedAction {
    display: "Progress".to_string(),
    permissions: Some(vec![Role::Staff, Role::Lead, Role::Admin]),
    method: Some("progress_application".to_string()),
    conditions: Some("not_progressed".to_string()),
    custom: None,
  }
}

fn concept(name: &str, display: &str, permissions: PermissionPreset) -> PhaseDef {
  PhaseDef::new(name, display, &CONCEPT, permissions)
}

fn proposal(name: &str, display: &str, permissions: PermissionPreset) -> PhaseDef {
  PhaseDef::new(name, display, &PROPOSAL, permissions)
}

pub fn definition() -> WorkflowDef {
  let steps = vec![
    // Concept note
    concept(DRAFT_STATE, "Draft", ApplicantEdit)
      .to_detailed(INITIAL_STATE, initial_submit())
      .into(),
    StepDef::new(vec![
      concept(INITIAL_STATE, "Screening", DefaultPermissions)
        .public("Concept Note Received")
        .to("concept_more_info", "Request More Information")
        .to("concept_internal_review", "Open Review")
        .to("concept_determination", "Ready For Preliminary Determination")
        .to("invited_to_proposal", "Invite to Proposal")
        .to("concept_rejected", "Dismiss"),
      concept("concept_more_info", "More information required", ApplicantEdit)
        .to_detailed(INITIAL_STATE, resubmit())
        .to("concept_determination", "Ready For Preliminary Determination")
        .to("invited_to_proposal", "Invite to Proposal")
        .to("concept_rejected", "Dismiss"),
    ]),
    concept("concept_internal_review", "Internal Review", DefaultPermissions)
      .public("{org_short_name} Review")
      .to("concept_review_discussion", "Close Review")
      .to(INITIAL_STATE, "Screening (revert)")
      .to("invited_to_proposal", "Invite to Proposal")
      .into(),
    StepDef::new(vec![
      concept("concept_review_discussion", "Ready For Discussion", HiddenFromApplicant)
        .to("concept_review_more_info", "Request More Information")
        .to("concept_determination", "Ready For Preliminary Determination")
        .to("concept_internal_review", "Open Review (revert)")
        .to("invited_to_proposal", "Invite to Proposal")
        .to("concept_rejected", "Dismiss"),
      concept("concept_review_more_info", "More information required", ApplicantEdit)
        .to_detailed("concept_review_discussion", resubmit())
        .to("invited_to_proposal", "Invite to Proposal")
        .to("concept_rejected", "Dismiss"),
    ]),
    concept(
      "concept_determination",
      "Ready for Preliminary Determination",
      HiddenFromApplicant,
    )
    .to("concept_review_discussion", "Ready For Discussion (revert)")
    .to("invited_to_proposal", "Invite to Proposal")
    .to("concept_rejected", "Dismiss")
    .into(),
    StepDef::new(vec![
      concept("invited_to_proposal", "Concept Accepted", NoPermissions)
        .future("Preliminary Determination")
        .outcome(PhaseOutcome::Accepted)
        .to_detailed("draft_proposal", progress()),
      concept("concept_rejected", "Dismissed", NoPermissions).outcome(PhaseOutcome::Dismissed),
    ]),
    // Proposal
    proposal("draft_proposal", "Invited for Proposal", ApplicantEdit)
      .to_detailed("proposal_discussion", initial_submit())
      .to("external_review", "Open AC review")
      .to("proposal_rejected", "Dismiss")
      .into(),
    StepDef::new(vec![
      proposal("proposal_discussion", "Proposal Received", DefaultPermissions)
        .to("proposal_more_info", "Request More Information")
        .to("proposal_internal_review", "Open Review")
        .to("external_review", "Open AC review")
        .to("proposal_determination", "Ready For Final Determination")
        .to("proposal_rejected", "Dismiss"),
      proposal("proposal_more_info", "More information required", ApplicantEdit)
        .to_detailed("proposal_discussion", resubmit())
        .to("external_review", "Open AC review")
        .to("proposal_determination", "Ready For Final Determination")
        .to("proposal_rejected", "Dismiss"),
    ]),
    proposal("proposal_internal_review", "Internal Review", DefaultPermissions)
      .public("{org_short_name} Review")
      .to("post_proposal_review_discussion", "Close Review")
      .to("proposal_discussion", "Proposal Received (revert)")
      .into(),
    StepDef::new(vec![
      proposal(
        "post_proposal_review_discussion",
        "Ready For Discussion",
        HiddenFromApplicant,
      )
      .to("post_proposal_review_more_info", "Request More Information")
      .to("external_review", "Open AC review")
      .to("proposal_determination", "Ready For Final Determination")
      .to("proposal_internal_review", "Open Internal Review (revert)")
      .to("proposal_rejected", "Dismiss"),
      proposal(
        "post_proposal_review_more_info",
        "More information required",
        ApplicantEdit,
      )
      .to_detailed("post_proposal_review_discussion", resubmit())
      .to("external_review", "Open AC review")
      .to("proposal_determination", "Ready For Final Determination")
      .to("proposal_rejected", "Dismiss"),
    ]),
    proposal("external_review", "Advisory Council Review", ReviewerReview)
      .to("post_external_review_discussion", "Close Review")
      .to("post_proposal_review_discussion", "Ready For Discussion (revert)")
      .into(),
    StepDef::new(vec![
      proposal(
        "post_external_review_discussion",
        "Ready For Discussion",
        HiddenFromApplicant,
      )
      .to("post_external_review_more_info", "Request More Information")
      .to("proposal_determination", "Ready For Final Determination")
      .to("external_review", "Open AC review (revert)")
      .to("proposal_almost", "Accept but additional info required")
      .to("proposal_accepted", "Accept")
      .to("proposal_rejected", "Dismiss"),
      proposal(
        "post_external_review_more_info",
        "More information required",
        ApplicantEdit,
      )
      .to_detailed("post_external_review_discussion", resubmit())
      .to("proposal_determination", "Ready For Final Determination")
      .to("proposal_rejected", "Dismiss"),
    ]),
    proposal(
      "proposal_determination",
      "Ready for Final Determination",
      HiddenFromApplicant,
    )
    .to("post_external_review_discussion", "Ready For Discussion (revert)")
    .to("proposal_almost", "Accept but additional info required")
    .to("proposal_accepted", "Accept")
    .to("proposal_rejected", "Dismiss")
    .into(),
    StepDef::new(vec![
      proposal("proposal_accepted", "Accepted", StaffEdit)
        .future("Final Determination")
        .outcome(PhaseOutcome::Accepted),
      proposal(
        "proposal_almost",
        "Accepted but additional info required",
        ApplicantEdit,
      )
      .to("proposal_accepted", "Accept")
      .to("post_external_review_discussion", "Ready For Discussion (revert)"),
      proposal("proposal_rejected", "Dismissed", NoPermissions)
        .outcome(PhaseOutcome::Dismissed),
    ]),
  ];

  WorkflowDef {
    name: NAME.to_string(),
    admin_name: ADMIN_NAME.to_string(),
    steps,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_stages_switch_at_draft_proposal() {
    let def = definition();
    let stages: Vec<(&str, &str)> = def
      .steps
      .iter()
      .flat_map(|step| &step.phases)
      .map(|phase| (phase.name.as_str(), phase.stage.name.as_str()))
      .collect();

    let switch = stages
      .iter()
      .position(|(_, stage)| *stage == "Proposal")
      .unwrap();
    assert_eq!(stages[switch].0, "draft_proposal");
    assert!(stages[..switch].iter().all(|(_, stage)| *stage == "Concept"));
    assert!(stages[switch..].iter().all(|(_, stage)| *stage == "Proposal"));
  }

  #[test]
  fn test_progress_is_conditional() {
    let def = definition();
    let invited = def
      .steps
      .iter()
      .flat_map(|step| &step.phases)
      .find(|phase| phase.name == "invited_to_proposal")
      .unwrap();

    let transition = &invited.transitions[0];
    assert_eq!(transition.target, "draft_proposal");
    match &transition.action {
      grantflow_config::ActionDef::Detailed(action) => {
        assert_eq!(action.conditions.as_deref(), Some("not_progressed"));
        assert_eq!(action.method.as_deref(), Some("progress_application"));
      }
      other => panic!("expected a detailed action, got {other:?}"),
    }
  }
}
