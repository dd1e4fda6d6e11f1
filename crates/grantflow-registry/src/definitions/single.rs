use grantflow_config::{
  PermissionPreset::{
    self, ApplicantEdit, CommunityReview, Default as DefaultPermissions, HiddenFromApplicant,
    NoPermissions, ReviewerReview, StaffEdit,
  },
  PhaseDef, PhaseOutcome, StageDef, StepDef, WorkflowDef,
};
use grantflow_workflow::{DRAFT_STATE, INITIAL_STATE, Stage};

use super::{initial_submit, resubmit};
use crate::stages::{REQUEST, REQUEST_COM, REQUEST_EXT, REQUEST_SAME};

/// The single stage request workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleStageVariant {
  /// Internal review only.
  Plain,
  /// Adds an advisory council review after the internal one.
  External,
  /// Adds an open call, community review and advisory council review.
  Community,
  /// Staff and reviewers review at the same time.
  SameTime,
}

impl SingleStageVariant {
  pub fn admin_name(&self) -> &'static str {
    match self {
      SingleStageVariant::Plain => "single",
      SingleStageVariant::External => "single_ext",
      SingleStageVariant::Community => "single_com",
      SingleStageVariant::SameTime => "single_same",
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      SingleStageVariant::Plain => "Request",
      SingleStageVariant::External => "Request with external review",
      SingleStageVariant::Community => "Request with community review",
      SingleStageVariant::SameTime => "Request with same time review",
    }
  }

  /// Prefix of every phase name except the shared draft and initial states.
  pub fn prefix(&self) -> &'static str {
    match self {
      SingleStageVariant::Plain => "",
      SingleStageVariant::External => "ext_",
      SingleStageVariant::Community => "com_",
      SingleStageVariant::SameTime => "same_",
    }
  }

  pub fn stage(&self) -> Stage {
    match self {
      SingleStageVariant::Plain => REQUEST,
      SingleStageVariant::External => REQUEST_EXT,
      SingleStageVariant::Community => REQUEST_COM,
      SingleStageVariant::SameTime => REQUEST_SAME,
    }
  }

  fn has_external_review(&self) -> bool {
    matches!(
      self,
      SingleStageVariant::External | SingleStageVariant::Community
    )
  }

  fn is_community(&self) -> bool {
    *self == SingleStageVariant::Community
  }

  pub fn definition(&self) -> WorkflowDef {
    SingleStageBuilder::new(*self).build()
  }
}

struct SingleStageBuilder {
  variant: SingleStageVariant,
  stage: StageDef,
}

impl SingleStageBuilder {
  fn new(variant: SingleStageVariant) -> Self {
    Self {
      variant,
      stage: variant.stage().to_def(),
    }
  }

  fn name(&self, phase: &str) -> String {
    format!("{}{}", self.variant.prefix(), phase)
  }

  fn phase(
    &self,
    name: &str,
    display: &str,
    permissions: PermissionPreset,
  ) -> PhaseDef {
    PhaseDef::new(self.name(name), display, self.stage.clone(), permissions)
  }

  /// Discussion phase that determination and conditional acceptance fall back to.
  fn last_discussion(&self) -> String {
    if self.variant.has_external_review() {
      self.name("post_external_review_discussion")
    } else {
      self.name("post_review_discussion")
    }
  }

  fn build(&self) -> WorkflowDef {
    let mut steps = vec![self.draft(), self.screening(), self.internal_review(), self.discussion()];
    if self.variant.has_external_review() {
      steps.push(self.external_review());
      steps.push(self.external_discussion());
    }
    steps.push(self.determination());
    steps.push(self.outcomes());

    WorkflowDef {
      name: self.variant.name().to_string(),
      admin_name: self.variant.admin_name().to_string(),
      steps,
    }
  }

  fn draft(&self) -> StepDef {
    PhaseDef::new(DRAFT_STATE, "Draft", self.stage.clone(), ApplicantEdit)
      .to_detailed(INITIAL_STATE, initial_submit())
      .into()
  }

  fn screening(&self) -> StepDef {
    let mut screening =
      PhaseDef::new(INITIAL_STATE, "Screening", self.stage.clone(), DefaultPermissions)
        .public("Application Received")
        .to(self.name("more_info"), "Request More Information");
    if self.variant.is_community() {
      screening = screening.to(self.name("open_call"), "Open Call (public)");
    }
    screening = screening.to(self.name("internal_review"), "Open Review");
    if self.variant.is_community() {
      screening = screening.to(self.name("community_review"), "Open Community Review");
    }
    screening = screening
      .to(self.name("determination"), "Ready For Determination")
      .to(self.name("rejected"), "Dismiss");

    let more_info = self
      .phase("more_info", "More information required", ApplicantEdit)
      .to_detailed(INITIAL_STATE, resubmit())
      .to(self.name("determination"), "Ready For Determination")
      .to(self.name("rejected"), "Dismiss");

    let mut phases = vec![screening, more_info];
    if self.variant.is_community() {
      phases.push(
        self
          .phase("open_call", "Open Call (public)", StaffEdit)
          .to(INITIAL_STATE, "Screening (revert)")
          .to(self.name("rejected"), "Dismiss"),
      );
    }
    StepDef::new(phases)
  }

  fn internal_review(&self) -> StepDef {
    let (display, permissions) = match self.variant {
      SingleStageVariant::SameTime => ("Review", ReviewerReview),
      _ => ("Internal Review", DefaultPermissions),
    };

    let mut review = self
      .phase("internal_review", display, permissions)
      .public("{org_short_name} Review")
      .to(self.name("post_review_discussion"), "Close Review");
    if self.variant.is_community() {
      review = review.to(self.name("community_review"), "Open Community Review");
    }
    review = review.to(INITIAL_STATE, "Screening (revert)");
    if self.variant.is_community() {
      review = review.to(self.name("rejected"), "Dismiss");
    }

    let mut phases = vec![review];
    if self.variant.is_community() {
      phases.push(
        self
          .phase("community_review", "Community Review", CommunityReview)
          .public("{org_short_name} Review")
          .to(self.name("post_review_discussion"), "Close Review")
          .to(self.name("internal_review"), "Open Internal Review (revert)")
          .to(self.name("rejected"), "Dismiss"),
      );
    }
    StepDef::new(phases)
  }

  fn discussion(&self) -> StepDef {
    let mut discussion = self
      .phase("post_review_discussion", "Ready For Discussion", HiddenFromApplicant)
      .to(self.name("post_review_more_info"), "Request More Information");
    if self.variant.has_external_review() {
      discussion = discussion.to(self.name("external_review"), "Open AC review");
    }
    let revert = if self.variant.has_external_review() {
      "Open Internal Review (revert)"
    } else {
      "Open Review (revert)"
    };
    discussion = discussion
      .to(self.name("determination"), "Ready For Determination")
      .to(self.name("internal_review"), revert)
      .to(self.name("rejected"), "Dismiss");

    let more_info = self
      .phase("post_review_more_info", "More information required", ApplicantEdit)
      .to_detailed(self.name("post_review_discussion"), resubmit())
      .to(self.name("determination"), "Ready For Determination")
      .to(self.name("rejected"), "Dismiss");

    StepDef::new(vec![discussion, more_info])
  }

  fn external_review(&self) -> StepDef {
    self
      .phase("external_review", "Advisory Council Review", ReviewerReview)
      .to(self.name("post_external_review_discussion"), "Close Review")
      .to(self.name("post_review_discussion"), "Ready For Discussion (revert)")
      .into()
  }

  fn external_discussion(&self) -> StepDef {
    let discussion = self
      .phase(
        "post_external_review_discussion",
        "Ready For Discussion",
        HiddenFromApplicant,
      )
      .to(self.name("post_external_review_more_info"), "Request More Information")
      .to(self.name("determination"), "Ready For Determination")
      .to(self.name("external_review"), "Open AC review (revert)")
      .to(self.name("almost"), "Accept but additional info required")
      .to(self.name("accepted"), "Accept")
      .to(self.name("rejected"), "Dismiss");

    let more_info = self
      .phase(
        "post_external_review_more_info",
        "More information required",
        ApplicantEdit,
      )
      .to_detailed(self.name("post_external_review_discussion"), resubmit())
      .to(self.name("determination"), "Ready For Determination")
      .to(self.name("rejected"), "Dismiss");

    StepDef::new(vec![discussion, more_info])
  }

  fn determination(&self) -> StepDef {
    self
      .phase("determination", "Ready for Determination", HiddenFromApplicant)
      .to(self.last_discussion(), "Ready For Discussion (revert)")
      .to(self.name("almost"), "Accept but additional info required")
      .to(self.name("accepted"), "Accept")
      .to(self.name("rejected"), "Dismiss")
      .into()
  }

  fn outcomes(&self) -> StepDef {
    StepDef::new(vec![
      self
        .phase("accepted", "Accepted", StaffEdit)
        .future("Application Outcome")
        .outcome(PhaseOutcome::Accepted),
      self
        .phase("almost", "Accepted but additional info required", ApplicantEdit)
        .to(self.name("accepted"), "Accept")
        .to(self.last_discussion(), "Ready For Discussion (revert)"),
      self
        .phase("rejected", "Dismissed", NoPermissions)
        .outcome(PhaseOutcome::Dismissed),
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn phase_names(def: &WorkflowDef) -> Vec<String> {
    def
      .steps
      .iter()
      .flat_map(|step| step.phases.iter().map(|phase| phase.name.clone()))
      .collect()
  }

  #[test]
  fn test_plain_phase_names() {
    let def = SingleStageVariant::Plain.definition();

    assert_eq!(
      phase_names(&def),
      vec![
        "draft",
        "in_discussion",
        "more_info",
        "internal_review",
        "post_review_discussion",
        "post_review_more_info",
        "determination",
        "accepted",
        "almost",
        "rejected",
      ]
    );
    assert_eq!(def.steps.len(), 6);
  }

  #[test]
  fn test_prefixes_leave_shared_states_alone() {
    for variant in [
      SingleStageVariant::External,
      SingleStageVariant::Community,
      SingleStageVariant::SameTime,
    ] {
      let names = phase_names(&variant.definition());
      assert_eq!(names[0], DRAFT_STATE);
      assert_eq!(names[1], INITIAL_STATE);
      for name in &names[2..] {
        assert!(name.starts_with(variant.prefix()), "{name} lacks prefix");
      }
    }
  }

  #[test]
  fn test_community_extras() {
    let names = phase_names(&SingleStageVariant::Community.definition());

    assert!(names.contains(&"com_open_call".to_string()));
    assert!(names.contains(&"com_community_review".to_string()));
    assert!(names.contains(&"com_external_review".to_string()));
  }

  #[test]
  fn test_external_review_steps() {
    assert_eq!(SingleStageVariant::External.definition().steps.len(), 8);
    assert_eq!(SingleStageVariant::SameTime.definition().steps.len(), 6);
  }
}
