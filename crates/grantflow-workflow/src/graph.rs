use std::collections::{HashMap, HashSet, VecDeque};

use crate::phase::Phase;

/// Phase graph of one workflow, for traversal and analysis.
///
/// Cycles are expected (every "revert" transition closes one).
#[derive(Debug, Clone)]
pub struct TransitionGraph {
  /// Adjacency list: phase -> transition targets, in declaration order.
  adjacency: HashMap<String, Vec<String>>,
  /// Reverse adjacency: phase -> phases with a transition into it.
  reverse_adjacency: HashMap<String, Vec<String>>,
  /// Phases no transition leads into, in workflow order.
  entry_points: Vec<String>,
  /// Phases without outgoing transitions, in workflow order.
  terminals: Vec<String>,
}

impl TransitionGraph {
  /// Build the graph from a workflow's phases.
  pub fn new(phases: &[Phase]) -> Self {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut reverse_adjacency: HashMap<String, Vec<String>> = HashMap::new();

    for phase in phases {
      adjacency.entry(phase.name().to_string()).or_default();
      reverse_adjacency.entry(phase.name().to_string()).or_default();
    }

    for phase in phases {
      for transition in phase.transitions() {
        adjacency
          .entry(phase.name().to_string())
          .or_default()
          .push(transition.target.clone());
        reverse_adjacency
          .entry(transition.target.clone())
          .or_default()
          .push(phase.name().to_string());
      }
    }

    let entry_points = phases
      .iter()
      .filter(|phase| reverse_adjacency.get(phase.name()).is_none_or(|v| v.is_empty()))
      .map(|phase| phase.name().to_string())
      .collect();

    let terminals = phases
      .iter()
      .filter(|phase| phase.is_terminal())
      .map(|phase| phase.name().to_string())
      .collect();

    Self {
      adjacency,
      reverse_adjacency,
      entry_points,
      terminals,
    }
  }

  /// Get entry points (phases with no incoming transitions).
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Get terminal phases (no outgoing transitions).
  pub fn terminals(&self) -> &[String] {
    &self.terminals
  }

  pub fn is_terminal(&self, phase: &str) -> bool {
    self.terminals.iter().any(|name| name == phase)
  }

  /// Get transition targets of a phase.
  pub fn downstream(&self, phase: &str) -> &[String] {
    self
      .adjacency
      .get(phase)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Get phases with a transition into the given phase.
  pub fn upstream(&self, phase: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(phase)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Every phase reachable from `start` through one or more transitions,
  /// breadth first. `start` itself is included only if a cycle leads back to it.
  pub fn reachable_from(&self, start: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    let mut queue: VecDeque<&str> = self.downstream(start).iter().map(String::as_str).collect();

    while let Some(phase) = queue.pop_front() {
      if !seen.insert(phase) {
        continue;
      }
      order.push(phase.to_string());
      queue.extend(self.downstream(phase).iter().map(String::as_str));
    }

    order
  }

  pub fn can_reach(&self, from: &str, to: &str) -> bool {
    self.reachable_from(from).iter().any(|phase| phase == to)
  }
}
