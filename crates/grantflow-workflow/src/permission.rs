use std::fmt;

use grantflow_config::{PermissionPreset, PermissionsDef, Role};
use serde::Serialize;

use crate::role::RoleSet;

/// Something a user may try to do to a submission in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  Edit,
  Review,
  View,
}

impl Action {
  pub fn as_str(&self) -> &'static str {
    match self {
      Action::Edit => "edit",
      Action::Review => "review",
      Action::View => "view",
    }
  }

  pub fn parse(name: &str) -> Option<Self> {
    match name {
      "edit" => Some(Action::Edit),
      "review" => Some(Action::Review),
      "view" => Some(Action::View),
      _ => None,
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which roles may edit, review and view a phase.
///
/// A user may perform an action when they hold any one of the roles listed for
/// it. Visibility is permissive by default, editing and reviewing are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSet {
  edit: RoleSet,
  review: RoleSet,
  view: RoleSet,
}

impl PermissionSet {
  /// Build a permission set. An absent or empty `view` falls back to
  /// [`RoleSet::default_view`].
  pub fn new(edit: RoleSet, review: RoleSet, view: Option<RoleSet>) -> Self {
    let view = view
      .filter(|roles| !roles.is_empty())
      .unwrap_or_else(RoleSet::default_view);
    Self { edit, review, view }
  }

  pub fn preset(preset: PermissionPreset) -> Self {
    let staff = || RoleSet::from([Role::Staff]);
    match preset {
      PermissionPreset::NoPermissions => Self::new(RoleSet::new(), RoleSet::new(), None),
      PermissionPreset::Default => Self::new(staff(), staff(), None),
      PermissionPreset::HiddenFromApplicant => Self::new(
        staff(),
        staff(),
        Some([Role::Staff, Role::Reviewer].into()),
      ),
      PermissionPreset::ReviewerReview => {
        Self::new(staff(), [Role::Staff, Role::Reviewer].into(), None)
      }
      PermissionPreset::CommunityReview => Self::new(
        staff(),
        [Role::Staff, Role::Reviewer, Role::CommunityReviewer].into(),
        None,
      ),
      PermissionPreset::ApplicantEdit => Self::new(
        [Role::Applicant, Role::Partner].into(),
        staff(),
        None,
      ),
      PermissionPreset::StaffApplicantEdit => {
        Self::new([Role::Staff, Role::Applicant].into(), RoleSet::new(), None)
      }
      PermissionPreset::StaffEdit => Self::new(staff(), RoleSet::new(), None),
    }
  }

  pub fn from_def(def: &PermissionsDef) -> Self {
    match def {
      PermissionsDef::Preset(preset) => Self::preset(*preset),
      PermissionsDef::Explicit { edit, review, view } => Self::new(
        edit.as_slice().into(),
        review.as_slice().into(),
        view.as_deref().map(RoleSet::from),
      ),
    }
  }

  /// Check an action by name. Unknown action names are denied.
  pub fn can_do(&self, roles: &RoleSet, action: &str) -> bool {
    Action::parse(action).is_some_and(|action| self.can(roles, action))
  }

  pub fn can(&self, roles: &RoleSet, action: Action) -> bool {
    self.roles_for(action).intersects(roles)
  }

  pub fn can_edit(&self, roles: &RoleSet) -> bool {
    self.can(roles, Action::Edit)
  }

  pub fn can_review(&self, roles: &RoleSet) -> bool {
    self.can(roles, Action::Review)
  }

  pub fn can_view(&self, roles: &RoleSet) -> bool {
    self.can(roles, Action::View)
  }

  pub fn roles_for(&self, action: Action) -> &RoleSet {
    match action {
      Action::Edit => &self.edit,
      Action::Review => &self.review,
      Action::View => &self.view,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::role::UserFlags;

  fn staff_only_edit() -> PermissionSet {
    PermissionSet::new([Role::Staff].into(), RoleSet::new(), None)
  }

  #[test]
  fn test_edit_is_granted_by_any_matching_role() {
    let permissions = staff_only_edit();

    for flags in [
      UserFlags {
        is_apply_staff: true,
        ..Default::default()
      },
      UserFlags {
        is_apply_staff: true,
        is_applicant: true,
        is_reviewer: true,
        ..Default::default()
      },
    ] {
      assert!(permissions.can_edit(&flags.roles()));
    }

    let applicant = UserFlags {
      is_applicant: true,
      is_partner: true,
      ..Default::default()
    };
    assert!(!permissions.can_edit(&applicant.roles()));
  }

  #[test]
  fn test_view_defaults_to_baseline_roles() {
    let permissions = staff_only_edit();

    for role in [Role::Staff, Role::Applicant, Role::Reviewer, Role::Partner] {
      assert!(permissions.can_view(&[role].into()), "{role:?} should view");
    }
    assert!(!permissions.can_view(&[Role::CommunityReviewer].into()));
    assert!(!permissions.can_view(&RoleSet::new()));
  }

  #[test]
  fn test_empty_view_list_falls_back_to_default() {
    let permissions = PermissionSet::new(RoleSet::new(), RoleSet::new(), Some(RoleSet::new()));
    assert_eq!(permissions.roles_for(Action::View), &RoleSet::default_view());
  }

  #[test]
  fn test_unknown_action_is_denied() {
    let permissions = PermissionSet::preset(PermissionPreset::Default);
    let everyone: RoleSet = Role::ALL.into_iter().collect();

    assert!(permissions.can_do(&everyone, "edit"));
    assert!(!permissions.can_do(&everyone, "delete"));
    assert!(!permissions.can_do(&everyone, "EDIT"));
  }

  #[test]
  fn test_hidden_from_applicant_preset() {
    let permissions = PermissionSet::preset(PermissionPreset::HiddenFromApplicant);

    assert!(permissions.can_view(&[Role::Reviewer].into()));
    assert!(!permissions.can_view(&[Role::Applicant].into()));
    assert!(!permissions.can_view(&[Role::Partner].into()));
  }

  #[test]
  fn test_community_review_preset() {
    let permissions = PermissionSet::preset(PermissionPreset::CommunityReview);
    let community: RoleSet = [Role::CommunityReviewer].into();

    assert!(permissions.can_review(&community));
    assert!(!permissions.can_view(&community));
    assert!(!permissions.can_edit(&community));
  }

  #[test]
  fn test_applicant_edit_preset() {
    let permissions = PermissionSet::preset(PermissionPreset::ApplicantEdit);

    assert!(permissions.can_edit(&[Role::Partner].into()));
    assert!(permissions.can_edit(&[Role::Applicant].into()));
    assert!(!permissions.can_edit(&[Role::Staff].into()));
    assert!(permissions.can_review(&[Role::Staff].into()));
  }

  #[test]
  fn test_explicit_definition() {
    let def = PermissionsDef::Explicit {
      edit: vec![Role::Lead],
      review: vec![],
      view: Some(vec![Role::Staff]),
    };
    let permissions = PermissionSet::from_def(&def);

    assert!(permissions.can_edit(&[Role::Lead].into()));
    assert!(!permissions.can_view(&[Role::Applicant].into()));
  }
}
