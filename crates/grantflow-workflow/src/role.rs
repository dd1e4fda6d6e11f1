use std::collections::BTreeSet;
use std::fmt;

use grantflow_config::Role;
use serde::{Deserialize, Serialize};

/// A set of roles, either held by a user or required by a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Who may take a transition that does not say otherwise.
  pub fn staff_lead_admin() -> Self {
    [Role::Staff, Role::Lead, Role::Admin].into()
  }

  /// Who may see a phase whose permissions leave `view` unspecified.
  pub fn default_view() -> Self {
    [Role::Staff, Role::Applicant, Role::Reviewer, Role::Partner].into()
  }

  pub fn with(mut self, role: Role) -> Self {
    self.0.insert(role);
    self
  }

  pub fn insert(&mut self, role: Role) -> bool {
    self.0.insert(role)
  }

  pub fn contains(&self, role: Role) -> bool {
    self.0.contains(&role)
  }

  /// True when at least one role is in both sets.
  pub fn intersects(&self, other: &RoleSet) -> bool {
    self.0.iter().any(|role| other.0.contains(role))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
    self.0.iter().copied()
  }
}

impl FromIterator<Role> for RoleSet {
  fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
  fn from(roles: [Role; N]) -> Self {
    roles.into_iter().collect()
  }
}

impl From<&[Role]> for RoleSet {
  fn from(roles: &[Role]) -> Self {
    roles.iter().copied().collect()
  }
}

impl fmt::Display for RoleSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
    write!(f, "{{{}}}", names.join(", "))
  }
}

/// The role flags a user account exposes, relative to one submission.
///
/// This is the adapter from a user record to the [`RoleSet`] the engine
/// evaluates. `is_lead` and `is_applicant` only make sense for a particular
/// submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFlags {
  #[serde(default)]
  pub is_apply_staff: bool,
  #[serde(default)]
  pub is_applicant: bool,
  #[serde(default)]
  pub is_reviewer: bool,
  #[serde(default)]
  pub is_partner: bool,
  #[serde(default)]
  pub is_community_reviewer: bool,
  #[serde(default)]
  pub is_lead: bool,
  #[serde(default)]
  pub is_admin: bool,
}

impl UserFlags {
  pub fn roles(&self) -> RoleSet {
    let flags = [
      (self.is_applicant, Role::Applicant),
      (self.is_apply_staff, Role::Staff),
      (self.is_lead, Role::Lead),
      (self.is_admin, Role::Admin),
      (self.is_reviewer, Role::Reviewer),
      (self.is_partner, Role::Partner),
      (self.is_community_reviewer, Role::CommunityReviewer),
    ];
    flags
      .into_iter()
      .filter(|(set, _)| *set)
      .map(|(_, role)| role)
      .collect()
  }
}

impl From<UserFlags> for RoleSet {
  fn from(flags: UserFlags) -> Self {
    flags.roles()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_flags_map_to_roles() {
    let flags = UserFlags {
      is_apply_staff: true,
      is_lead: true,
      ..Default::default()
    };
    let roles = flags.roles();

    assert_eq!(roles, RoleSet::from([Role::Staff, Role::Lead]));
    assert!(!roles.contains(Role::Applicant));
  }

  #[test]
  fn test_no_flags_no_roles() {
    assert!(UserFlags::default().roles().is_empty());
  }

  #[test]
  fn test_intersects() {
    let staff = RoleSet::from([Role::Staff]);
    assert!(staff.intersects(&RoleSet::staff_lead_admin()));
    assert!(!staff.intersects(&RoleSet::from([Role::Applicant, Role::Partner])));
    assert!(!RoleSet::new().intersects(&RoleSet::default_view()));
  }

  #[test]
  fn test_display() {
    let roles = RoleSet::from([Role::Reviewer, Role::Applicant]);
    assert_eq!(roles.to_string(), "{applicant, reviewer}");
  }
}
