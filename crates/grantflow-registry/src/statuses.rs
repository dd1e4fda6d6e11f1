//! Status groups derived from phase names.
//!
//! Submissions store the phase name as an opaque status string, and filters
//! elsewhere match on these groups. The rules below are substring matches on
//! the name and must stay exactly as they are: renaming a phase moves it
//! between groups.

use std::collections::BTreeSet;

use grantflow_workflow::{INITIAL_STATE, Workflow};
use serde::Serialize;

/// Names containing "accepted", plus the invitation to submit a proposal.
pub fn is_accepted_status(name: &str) -> bool {
  name.contains("accepted") || name == "invited_to_proposal"
}

pub fn is_dismissed_status(name: &str) -> bool {
  name.contains("rejected")
}

/// Anything not yet decided. "invited" covers `invited_to_proposal`.
pub fn is_active_status(name: &str) -> bool {
  !name.contains("accepted") && !name.contains("rejected") && !name.contains("invited")
}

pub fn is_review_status(name: &str) -> bool {
  name.contains("review") && !name.contains("discussion")
}

pub fn is_ext_review_status(name: &str) -> bool {
  name.ends_with("external_review")
}

/// Discussion phases a determination can be made from. Includes `in_discussion`.
pub fn is_determination_phase(name: &str) -> bool {
  name.contains("_discussion")
}

/// Discussion phases whose determinations send a response to the applicant.
pub const DETERMINATION_RESPONSE_PHASES: &[&str] = &[
  "post_review_discussion",
  "concept_review_discussion",
  "post_external_review_discussion",
  "ext_post_external_review_discussion",
  "com_post_external_review_discussion",
];

pub const OPEN_CALL_PHASES: &[&str] = &["com_open_call"];

pub const COMMUNITY_REVIEW_PHASES: &[&str] = &["com_community_review"];

/// The fixed status groups of a set of workflows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusGroups {
  pub accepted: BTreeSet<String>,
  pub dismissed: BTreeSet<String>,
  pub active: BTreeSet<String>,
  pub review: BTreeSet<String>,
  pub ext_review: BTreeSet<String>,
  pub ext_or_higher: BTreeSet<String>,
}

impl StatusGroups {
  pub fn classify(workflows: &[Workflow]) -> Self {
    let mut groups = Self::default();

    for workflow in workflows {
      for phase in workflow.phases() {
        let name = phase.name();
        if is_accepted_status(name) {
          groups.accepted.insert(name.to_string());
        }
        if is_dismissed_status(name) {
          groups.dismissed.insert(name.to_string());
        }
        if is_active_status(name) {
          groups.active.insert(name.to_string());
        }
        if is_review_status(name) {
          groups.review.insert(name.to_string());
        }
        if is_ext_review_status(name) {
          groups.ext_review.insert(name.to_string());
        }
      }

      // Everything from the workflow's external review step onwards.
      let ext_step = workflow
        .phases()
        .iter()
        .find(|phase| is_ext_review_status(phase.name()))
        .map(|phase| phase.step());
      if let Some(ext_step) = ext_step {
        groups.ext_or_higher.extend(
          workflow
            .phases()
            .iter()
            .filter(|phase| phase.step() >= ext_step)
            .map(|phase| phase.name().to_string()),
        );
      }
    }

    groups
  }
}

/// A named filter bucket grouping related statuses across workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
  pub slug: &'static str,
  pub name: &'static str,
  pub statuses: Vec<String>,
}

/// Build the filter buckets from the deduplicated status list.
pub fn phases_mapping(statuses: &[String]) -> Vec<StatusBucket> {
  let matching = |needle: &str, exclude: &[&str]| -> Vec<String> {
    statuses
      .iter()
      .filter(|status| status.contains(needle) && !exclude.contains(&status.as_str()))
      .cloned()
      .collect()
  };

  vec![
    StatusBucket {
      slug: "received",
      name: "Received",
      statuses: vec![INITIAL_STATE.to_string(), "proposal_discussion".to_string()],
    },
    StatusBucket {
      slug: "internal-review",
      name: "Internal Review",
      statuses: matching("internal_review", &[]),
    },
    StatusBucket {
      slug: "in-discussion",
      name: "Ready for Discussion",
      statuses: matching("discussion", &[INITIAL_STATE, "proposal_discussion"]),
    },
    StatusBucket {
      slug: "more-information",
      name: "More Information Requested",
      statuses: matching("more_info", &[]),
    },
    StatusBucket {
      slug: "invited-for-proposal",
      name: "Invited for Proposal",
      statuses: vec!["draft_proposal".to_string()],
    },
    StatusBucket {
      slug: "external-review",
      name: "Advisory Council Review",
      statuses: matching("external_review", &[]),
    },
    StatusBucket {
      slug: "ready-for-determination",
      name: "Ready for Determination",
      statuses: matching("determination", &[]),
    },
    StatusBucket {
      slug: "accepted",
      name: "Accepted",
      statuses: matching("accepted", &[]),
    },
    StatusBucket {
      slug: "dismissed",
      name: "Dismissed",
      statuses: matching("rejected", &[]),
    },
  ]
}
