use std::collections::BTreeSet;

use grantflow_config::Settings;
use grantflow_registry::{DeterminationOutcome, WorkflowRegistry};
use grantflow_workflow::{
  DRAFT_STATE, INITIAL_STATE, NoConditions, PhaseOutcome, Role, RoleSet, WorkflowError,
};

fn registry() -> WorkflowRegistry {
  WorkflowRegistry::builtin(&Settings::default()).unwrap()
}

fn applicant() -> RoleSet {
  [Role::Applicant].into()
}

fn staff() -> RoleSet {
  [Role::Staff].into()
}

#[test]
fn test_workflow_names() {
  let registry = registry();
  let names: Vec<(&str, &str)> = registry
    .workflows()
    .iter()
    .map(|workflow| (workflow.admin_name(), workflow.name()))
    .collect();

  assert_eq!(
    names,
    vec![
      ("single", "Request"),
      ("single_ext", "Request with external review"),
      ("single_com", "Request with community review"),
      ("single_same", "Request with same time review"),
      ("double", "Concept & Proposal"),
    ]
  );
}

#[test]
fn test_every_workflow_starts_in_draft() {
  let registry = registry();
  for workflow in registry.workflows() {
    let first = &workflow.phases()[0];
    assert_eq!(first.name(), DRAFT_STATE, "{workflow}");
    assert_eq!(first.step(), 0);
    assert!(workflow.contains(INITIAL_STATE), "{workflow}");
  }
}

#[test]
fn test_terminal_phases_are_outcomes() {
  let registry = registry();
  for workflow in registry.workflows() {
    let graph = workflow.graph();
    for terminal in graph.terminals() {
      let phase = workflow.phase(terminal).unwrap();
      assert_ne!(phase.outcome(), PhaseOutcome::InProgress, "{terminal}");
    }
  }
}

#[test]
fn test_phases_for_applicant_skips_hidden_steps() {
  let registry = registry();
  let single = registry.workflow("single").unwrap();

  let all: Vec<&str> = single.phases_for(None).iter().map(|p| p.name()).collect();
  assert_eq!(
    all,
    vec![
      "draft",
      "in_discussion",
      "internal_review",
      "post_review_discussion",
      "determination",
      "accepted",
    ]
  );

  let visible: Vec<&str> = single
    .phases_for(Some(&applicant()))
    .iter()
    .map(|p| p.name())
    .collect();
  assert_eq!(
    visible,
    vec!["draft", "in_discussion", "internal_review", "accepted"]
  );
}

#[test]
fn test_previous_visible_from_internal_review() {
  let registry = registry();
  let single = registry.workflow("single").unwrap();
  let internal_review = single.phase("internal_review").unwrap();

  let previous = single
    .previous_visible(internal_review, &applicant())
    .unwrap();

  assert_eq!(previous.name(), INITIAL_STATE);
}

#[test]
fn test_previous_visible_skips_hidden_discussion() {
  let registry = registry();
  let single = registry.workflow("single").unwrap();
  let accepted = single.phase("accepted").unwrap();

  let previous = single.previous_visible(accepted, &applicant()).unwrap();

  assert_eq!(previous.name(), "internal_review");
}

#[test]
fn test_dismiss_fans_out_across_workflows() {
  let registry = registry();
  let mapping = registry.action_mapping(None);
  let dismiss = mapping.get("dismiss").unwrap();

  assert_eq!(dismiss.display, "Dismiss");
  for target in [
    "rejected",
    "concept_rejected",
    "com_rejected",
    "ext_rejected",
    "same_rejected",
    "proposal_rejected",
  ] {
    assert!(dismiss.transitions.iter().any(|t| t == target), "{target}");
  }
}

#[test]
fn test_action_resolves_per_workflow() {
  let registry = registry();
  let mapping = registry.action_mapping(None);

  let com = registry.phase("single_com", INITIAL_STATE).unwrap();
  let transition = mapping.transition_for("dismiss", com).unwrap();
  assert_eq!(transition.target, "com_rejected");

  let double = registry.phase("double", INITIAL_STATE).unwrap();
  let transition = mapping.transition_for("dismiss", double).unwrap();
  assert_eq!(transition.target, "concept_rejected");

  let accepted = registry.phase("single", "accepted").unwrap();
  assert!(mapping.transition_for("dismiss", accepted).is_none());
  assert!(mapping.transition_for("no-such-action", double).is_none());
}

#[test]
fn test_action_mapping_for_one_workflow() {
  let registry = registry();
  let single = registry.workflow("single").unwrap();
  let mapping = registry.action_mapping(Some(single));

  let dismiss = mapping.get("dismiss").unwrap();
  assert!(dismiss.transitions.iter().all(|t| t == "rejected"));
  assert!(mapping.get("invite-to-proposal").is_none());
}

#[test]
fn test_status_groups_are_disjoint() {
  let registry = registry();
  let statuses: BTreeSet<&str> = registry.statuses().iter().map(String::as_str).collect();

  for status in registry.dismissed_statuses() {
    assert!(statuses.contains(status.as_str()), "{status}");
  }
  let accepted = registry.accepted_statuses();
  let dismissed = registry.dismissed_statuses();
  let active = registry.active_statuses();
  assert!(accepted.is_disjoint(dismissed));
  assert!(accepted.is_disjoint(active));
  assert!(dismissed.is_disjoint(active));
}

#[test]
fn test_status_group_members() {
  let registry = registry();

  assert!(registry.accepted_statuses().contains("invited_to_proposal"));
  assert!(registry.accepted_statuses().contains("proposal_accepted"));
  assert!(registry.dismissed_statuses().contains("same_rejected"));
  assert!(registry.active_statuses().contains("almost"));
  assert!(!registry.active_statuses().contains("invited_to_proposal"));

  let ext: Vec<&str> = registry
    .ext_review_statuses()
    .iter()
    .map(String::as_str)
    .collect();
  assert_eq!(
    ext,
    vec!["com_external_review", "ext_external_review", "external_review"]
  );
}

#[test]
fn test_ext_or_higher_statuses() {
  let registry = registry();
  let statuses = registry.ext_or_higher_statuses();

  assert!(statuses.contains("ext_external_review"));
  assert!(statuses.contains("ext_determination"));
  assert!(statuses.contains("proposal_accepted"));
  assert!(!statuses.contains("ext_internal_review"));
  assert!(!statuses.contains("draft_proposal"));
  assert!(!statuses.iter().any(|status| status.starts_with("same_")));
}

#[test]
fn test_review_statuses_for_roles() {
  let registry = registry();

  let all = registry.review_statuses(None);
  assert!(all.contains("internal_review"));
  assert!(all.contains("post_review_more_info"));
  assert!(!all.contains("post_review_discussion"));

  let reviewer = registry.review_statuses(Some(&[Role::Reviewer].into()));
  assert!(reviewer.contains("ext_external_review"));
  assert!(reviewer.contains("same_internal_review"));
  assert!(reviewer.contains("com_community_review"));
  assert!(!reviewer.contains("internal_review"));

  let community = registry.review_statuses(Some(&[Role::CommunityReviewer].into()));
  assert_eq!(
    community.into_iter().collect::<Vec<_>>(),
    vec!["com_community_review".to_string()]
  );
}

#[test]
fn test_review_active_statuses_for_roles() {
  let registry = registry();

  let all = registry.review_active_statuses(None);
  assert_eq!(&all, registry.active_statuses());

  let reviewer = registry.review_active_statuses(Some(&[Role::Reviewer].into()));
  assert!(reviewer.contains("external_review"));
  assert!(!reviewer.contains("determination"));
}

#[test]
fn test_determination_transitions() {
  let transitions = registry().determination_transitions();

  assert_eq!(
    transitions["invited_to_proposal"],
    DeterminationOutcome::Accepted
  );
  assert_eq!(
    transitions["proposal_rejected"],
    DeterminationOutcome::Rejected
  );
  assert_eq!(
    transitions["concept_more_info"],
    DeterminationOutcome::MoreInfo
  );
  assert!(!transitions.contains_key("determination"));
}

#[test]
fn test_stage_change_actions() {
  let changes = registry().stage_change_actions();

  assert_eq!(changes.len(), 1);
  let stage = &changes["draft_proposal"];
  assert_eq!(stage.name(), "Proposal");
  assert!(stage.has_external_review());
}

#[test]
fn test_determination_phases() {
  let registry = registry();
  let phases = registry.determination_phases();

  assert!(phases.contains(&INITIAL_STATE));
  assert!(phases.contains(&"post_external_review_discussion"));
  assert!(!phases.contains(&"determination"));

  for phase in registry.determination_response_phases() {
    assert!(phases.contains(phase), "{phase}");
  }
  for phase in registry
    .open_call_phases()
    .iter()
    .chain(registry.community_review_phases())
  {
    assert!(registry.statuses().iter().any(|status| status == phase));
  }
}

#[test]
fn test_phases_mapping_dismissed_bucket() {
  let registry = registry();
  let mapping = registry.phases_mapping();
  let dismissed = mapping
    .iter()
    .find(|bucket| bucket.slug == "dismissed")
    .unwrap();

  let expected: BTreeSet<&str> = registry
    .dismissed_statuses()
    .iter()
    .map(String::as_str)
    .collect();
  let actual: BTreeSet<&str> = dismissed.statuses.iter().map(String::as_str).collect();
  assert_eq!(actual, expected);
}

#[test]
fn test_statuses_by_display() {
  let registry = registry();
  let dismissed = &registry.statuses_by_display()["Dismissed"];

  assert!(dismissed.contains("rejected"));
  assert!(dismissed.contains("concept_rejected"));
  assert!(dismissed.contains("proposal_rejected"));
}

#[test]
fn test_revert_cycle_is_representable() {
  let registry = registry();
  let single = registry.workflow("single").unwrap();
  let discussion = single.phase("post_review_discussion").unwrap();

  let revert = discussion.transition("internal_review").unwrap();
  assert_eq!(revert.display, "Open Review (revert)");

  let graph = single.graph();
  assert!(graph.can_reach("post_review_discussion", "internal_review"));
  assert!(graph.can_reach("internal_review", "post_review_discussion"));
}

#[test]
fn test_submit_from_draft_is_applicant_only() {
  let registry = registry();
  let single = registry.workflow("single").unwrap();

  let target = single
    .check_transition(DRAFT_STATE, INITIAL_STATE, &applicant(), &NoConditions)
    .unwrap();
  assert_eq!(target.name(), INITIAL_STATE);

  let err = single
    .check_transition(DRAFT_STATE, INITIAL_STATE, &staff(), &NoConditions)
    .unwrap_err();
  assert!(matches!(err, WorkflowError::TransitionNotPermitted { .. }));
}

#[test]
fn test_progress_requires_condition() {
  let registry = registry();
  let double = registry.workflow("double").unwrap();

  let err = double
    .check_transition(
      "invited_to_proposal",
      "draft_proposal",
      &staff(),
      &NoConditions,
    )
    .unwrap_err();
  assert_eq!(
    err,
    WorkflowError::ConditionNotMet {
      from: "invited_to_proposal".to_string(),
      to: "draft_proposal".to_string(),
      condition: "not_progressed".to_string(),
    }
  );

  let target = double
    .check_transition(
      "invited_to_proposal",
      "draft_proposal",
      &staff(),
      &["not_progressed"],
    )
    .unwrap();
  assert_eq!(target.stage().name(), "Proposal");
}

#[test]
fn test_applicant_actions_in_more_info() {
  let registry = registry();
  let phase = registry.phase("single", "more_info").unwrap();

  let targets: Vec<&str> = phase
    .available_transitions(&applicant(), &NoConditions)
    .into_iter()
    .map(|t| t.target.as_str())
    .collect();
  assert_eq!(targets, vec![INITIAL_STATE]);
  assert!(phase.permissions().can_do(&applicant(), "edit"));
  assert!(!phase.permissions().can_do(&applicant(), "delete"));
}
