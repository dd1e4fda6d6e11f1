use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use grantflow_config::{Settings, WorkflowDef};
use grantflow_registry::WorkflowRegistry;
use grantflow_resolver::{Resolver, StandardResolver};
use grantflow_workflow::{Role, RoleSet};

/// Grantflow - application workflows for grant making
#[derive(Parser)]
#[command(name = "grantflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the settings file (default: ~/.grantflow/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// List the registered workflows
  Workflows,

  /// Show the progress phases of a workflow
  Phases {
    /// Workflow admin name, e.g. single_ext
    workflow: String,

    /// Only show phases visible to these roles
    #[arg(long = "role", value_parser = parse_role)]
    roles: Vec<Role>,
  },

  /// Show the transitions out of a phase that the roles may take
  Transitions {
    workflow: String,

    phase: String,

    #[arg(long = "role", value_parser = parse_role, required = true)]
    roles: Vec<Role>,

    /// Conditions that hold on the submission, e.g. not_progressed
    #[arg(long = "condition")]
    conditions: Vec<String>,
  },

  /// Show actions grouped by label
  Actions {
    /// Limit to one workflow
    #[arg(long)]
    workflow: Option<String>,
  },

  /// Show status groups and filter buckets
  Statuses,

  /// Validate a workflow definition file
  Validate {
    /// Path to the workflow file (JSON)
    workflow_file: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("GRANTFLOW_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let settings = load_settings(cli.config.as_deref())?;

  match cli.command {
    Some(command) => {
      let output = run(command, &settings)?;
      println!("{}", serde_json::to_string_pretty(&output)?);
    }
    None => {
      println!("grantflow - use --help to see available commands");
    }
  }

  Ok(())
}

fn build_registry(settings: &Settings) -> Result<&'static WorkflowRegistry> {
  grantflow_registry::init(settings).context("failed to build workflows")
}

fn run(command: Commands, settings: &Settings) -> Result<Value> {
  let output = match command {
    Commands::Workflows => {
      let workflows: Vec<_> = build_registry(settings)?
        .workflows()
        .iter()
        .map(|workflow| {
          json!({
            "admin_name": workflow.admin_name(),
            "name": workflow.name(),
            "phases": workflow.len(),
            "stages": workflow.stages(),
          })
        })
        .collect();
      json!(workflows)
    }
    Commands::Phases { workflow, roles } => {
      let workflow = build_registry(settings)?.workflow(&workflow)?;
      let roles = (!roles.is_empty()).then(|| roles.into_iter().collect::<RoleSet>());
      let phases: Vec<_> = workflow
        .phases_for(roles.as_ref())
        .into_iter()
        .map(|phase| {
          json!({
            "step": phase.step(),
            "name": phase.name(),
            "display": phase.display_name(),
            "public": phase.public_name(),
            "stage": phase.stage().name(),
          })
        })
        .collect();
      json!(phases)
    }
    Commands::Transitions {
      workflow,
      phase,
      roles,
      conditions,
    } => {
      let roles: RoleSet = roles.into_iter().collect();
      let conditions: BTreeSet<String> = conditions.into_iter().collect();
      let transitions = build_registry(settings)?
        .workflow(&workflow)?
        .available_transitions(&phase, &roles, &conditions)?;
      serde_json::to_value(transitions)?
    }
    Commands::Actions { workflow } => {
      let registry = build_registry(settings)?;
      let workflow = workflow
        .as_deref()
        .map(|key| registry.workflow(key))
        .transpose()?;
      serde_json::to_value(registry.action_mapping(workflow))?
    }
    Commands::Statuses => {
      let registry = build_registry(settings)?;
      json!({
        "statuses": registry.statuses(),
        "groups": registry.status_groups(),
        "mapping": registry.phases_mapping(),
        "determination_transitions": registry.determination_transitions(),
        "stage_changes": registry.stage_change_actions(),
        "outcome_conflicts": registry.outcome_conflicts(),
      })
    }
    Commands::Validate { workflow_file } => validate(&workflow_file, settings)?,
  };

  Ok(output)
}

fn validate(workflow_file: &Path, settings: &Settings) -> Result<Value> {
  let content = fs::read_to_string(workflow_file)
    .with_context(|| format!("failed to read workflow file: {}", workflow_file.display()))?;

  let workflow_def = WorkflowDef::from_json(&content)
    .with_context(|| format!("failed to parse workflow file: {}", workflow_file.display()))?;

  let resolver = StandardResolver::new(settings);
  let workflow = resolver
    .resolve(&workflow_def)
    .context("failed to resolve workflow")?;

  let graph = workflow.graph();
  Ok(json!({
    "admin_name": workflow.admin_name(),
    "name": workflow.name(),
    "phases": workflow.len(),
    "entry_points": graph.entry_points(),
    "terminals": graph.terminals(),
  }))
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
  let path = match path {
    Some(path) => path.to_path_buf(),
    None => {
      let Some(default) = dirs::home_dir().map(|home| home.join(".grantflow").join("config.json"))
      else {
        return Ok(Settings::default());
      };
      if !default.exists() {
        debug!(path = %default.display(), "no settings file, using defaults");
        return Ok(Settings::default());
      }
      default
    }
  };

  let content = fs::read_to_string(&path)
    .with_context(|| format!("failed to read settings file: {}", path.display()))?;
  Settings::from_json(&content)
    .with_context(|| format!("failed to parse settings file: {}", path.display()))
}

fn parse_role(value: &str) -> Result<Role, String> {
  Role::parse(value).ok_or_else(|| {
    let known: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
    format!("unknown role '{value}', expected one of: {}", known.join(", "))
  })
}
