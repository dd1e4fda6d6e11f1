use serde::{Deserialize, Serialize};

/// A role an acting user may hold relative to a submission.
///
/// `Lead` and `Applicant` are relational: the collaborator decides whether the
/// user is the lead of, or the applicant on, the submission being acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  Applicant,
  Staff,
  Lead,
  Admin,
  Reviewer,
  Partner,
  CommunityReviewer,
}

impl Role {
  pub const ALL: [Role; 7] = [
    Role::Applicant,
    Role::Staff,
    Role::Lead,
    Role::Admin,
    Role::Reviewer,
    Role::Partner,
    Role::CommunityReviewer,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Applicant => "applicant",
      Role::Staff => "staff",
      Role::Lead => "lead",
      Role::Admin => "admin",
      Role::Reviewer => "reviewer",
      Role::Partner => "partner",
      Role::CommunityReviewer => "community_reviewer",
    }
  }

  /// Parse the snake_case name used in definitions and on the command line.
  pub fn parse(value: &str) -> Option<Self> {
    Role::ALL.into_iter().find(|role| role.as_str() == value)
  }
}

/// Named permission sets shared by many phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionPreset {
  /// Nobody edits or reviews; default visibility.
  NoPermissions,
  /// Staff edit and review.
  Default,
  /// Staff edit and review; only staff and reviewers can see the phase.
  HiddenFromApplicant,
  /// Staff edit; staff and reviewers review.
  ReviewerReview,
  /// Staff edit; staff, reviewers and community reviewers review.
  CommunityReview,
  /// Applicants and partners edit; staff review.
  ApplicantEdit,
  /// Staff and applicants edit.
  StaffApplicantEdit,
  /// Staff edit.
  StaffEdit,
}

/// Declared polarity of a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseOutcome {
  #[default]
  InProgress,
  Accepted,
  Dismissed,
}
