//! Action command handlers
//!
//! Handles all action-related CLI commands: listing, viewing, usage lookup,
//! creation, update, deletion, import/export and audit.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use cds_client::{Action, ActionClient, PipelineUsingAction};
use cds_core::domain::action::Requirement;
use cds_core::domain::audit::ActionAudit;
use cds_core::dto::action::ExportFormat;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::group_resolver::resolve_action_group;
use crate::types::ActionRef;

/// Action subcommands
#[derive(Subcommand)]
pub enum ActionCommands {
    /// List all actions
    List,
    /// Get action details
    Get {
        /// `group/name`, or a name that exists in a single group
        action: String,
    },
    /// Show pipelines using an action
    Usage {
        /// Action name
        name: String,
    },
    /// Create an action from a JSON file
    Create {
        /// Path to the JSON action definition
        #[arg(short, long)]
        file: String,
    },
    /// Update an action from a JSON file
    Update {
        /// Current action name
        name: String,

        /// Path to the JSON action definition
        #[arg(short, long)]
        file: String,
    },
    /// Delete an action
    Delete {
        /// Action name
        name: String,
    },
    /// Export an action
    Export {
        /// Action name
        name: String,

        /// Output format
        #[arg(short, long, default_value = "yaml", value_parser = parse_format)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Import (create or replace) an action from a YAML or JSON file
    Import {
        /// Path to the exported action
        file: String,

        /// Input format, guessed from the file extension when omitted
        #[arg(short, long, value_parser = parse_format)]
        format: Option<ExportFormat>,
    },
    /// Show the change history of an action
    Audit {
        /// Numeric action ID
        action_id: i64,
    },
    /// List the distinct requirements of all actions
    Requirements,
}

fn parse_format(s: &str) -> Result<ExportFormat> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Handle action commands
///
/// Routes action subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The action command to execute
/// * `config` - The CLI configuration
pub async fn handle_action_command(command: ActionCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ActionCommands::List => list_actions(&client).await,
        ActionCommands::Get { action } => get_action(&client, &action).await,
        ActionCommands::Usage { name } => show_usage(&client, &name).await,
        ActionCommands::Create { file } => create_action(&client, &file).await,
        ActionCommands::Update { name, file } => update_action(&client, &name, &file).await,
        ActionCommands::Delete { name } => delete_action(&client, &name).await,
        ActionCommands::Export {
            name,
            format,
            output,
        } => export_action(&client, &name, format, output.as_deref()).await,
        ActionCommands::Import { file, format } => import_action(&client, &file, format).await,
        ActionCommands::Audit { action_id } => show_audit(&client, action_id).await,
        ActionCommands::Requirements => list_requirements(&client).await,
    }
}

/// Read an action definition from a JSON file
fn read_action_file(path: &str) -> Result<Action> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read action file: {}", path))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse action file as JSON: {}", path))
}

/// List all actions, grouped by owning group
async fn list_actions(client: &ActionClient) -> Result<()> {
    let actions = client.list_actions().await?;

    if actions.is_empty() {
        println!("{}", "No actions found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} action(s):", actions.len()).bold());
    println!();

    for (group, actions) in group_actions(&actions) {
        println!("{}", group.cyan().bold());
        for action in actions {
            print_action_summary(action);
        }
        println!();
    }

    Ok(())
}

/// Bucket actions by group name, keeping server order inside each group
fn group_actions(actions: &[Action]) -> BTreeMap<&str, Vec<&Action>> {
    let mut groups: BTreeMap<&str, Vec<&Action>> = BTreeMap::new();
    for action in actions {
        groups
            .entry(action.group_name().unwrap_or("(no group)"))
            .or_default()
            .push(action);
    }
    groups
}

/// Get and display a single action
async fn get_action(client: &ActionClient, reference: &str) -> Result<()> {
    let action_ref = ActionRef::parse(reference);
    let (group, name) = resolve_action_group(client, &action_ref).await?;

    let action = client.get_action(&group, &name).await?;

    print_action_details(&action);

    Ok(())
}

/// Display the pipelines using an action
async fn show_usage(client: &ActionClient, name: &str) -> Result<()> {
    let usages = client.get_usage(name).await?;

    if usages.is_empty() {
        println!("{}", format!("Action {} is not used.", name).yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Action {} is used by {} pipeline(s):", name, usages.len()).bold()
    );
    println!();
    for usage in &usages {
        print_usage(usage);
    }

    Ok(())
}

/// Create an action from a file
async fn create_action(client: &ActionClient, path: &str) -> Result<()> {
    let action = read_action_file(path)?;

    let created = client.create_action(&action).await?;

    tracing::info!("Created action {}", created.name);
    println!("{}", "✓ Action created successfully!".green().bold());
    println!("  ID:    {}", created.id.to_string().cyan());
    println!("  Name:  {}", created.name.bold());
    if let Some(group) = created.group_name() {
        println!("  Group: {}", group.dimmed());
    }

    Ok(())
}

/// Update an action from a file
async fn update_action(client: &ActionClient, name: &str, path: &str) -> Result<()> {
    let action = read_action_file(path)?;

    let updated = client.update_action(name, &action).await?;

    tracing::info!("Updated action {}", name);
    println!("{}", "✓ Action updated successfully!".green().bold());
    if updated.name != name {
        println!("  Renamed: {} → {}", name.dimmed(), updated.name.bold());
    } else {
        println!("  Name: {}", updated.name.bold());
    }

    Ok(())
}

/// Delete an action
async fn delete_action(client: &ActionClient, name: &str) -> Result<()> {
    client.delete_action(name).await?;

    tracing::info!("Deleted action {}", name);
    println!(
        "{}",
        format!("✓ Action {} deleted successfully!", name)
            .green()
            .bold()
    );

    Ok(())
}

/// Export an action to stdout or a file
async fn export_action(
    client: &ActionClient,
    name: &str,
    format: ExportFormat,
    output: Option<&str>,
) -> Result<()> {
    let content = client.export_action(name, format).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write export file: {}", path))?;
            println!(
                "{}",
                format!("✓ Action {} exported to {}", name, path)
                    .green()
                    .bold()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

/// Import an action from a file
async fn import_action(
    client: &ActionClient,
    path: &str,
    format: Option<ExportFormat>,
) -> Result<()> {
    let format = match format.or_else(|| ExportFormat::from_path(path)) {
        Some(format) => format,
        None => anyhow::bail!(
            "Cannot guess the format of {}, pass --format yaml|json",
            path
        ),
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {}", path))?;

    let outcome = client.import_action(content, format).await?;

    let verb = if outcome.created { "created" } else { "updated" };
    tracing::info!("Imported action {} ({})", outcome.action.name, verb);
    println!(
        "{}",
        format!("✓ Action {} {} from {}", outcome.action.name, verb, path)
            .green()
            .bold()
    );

    Ok(())
}

/// Display the audit trail of an action
async fn show_audit(client: &ActionClient, action_id: i64) -> Result<()> {
    let audits = client.get_action_audit(action_id).await?;

    if audits.is_empty() {
        println!("{}", "No audit entries found.".yellow());
        return Ok(());
    }

    for audit in &audits {
        print_audit(audit);
    }

    Ok(())
}

/// List distinct requirements
async fn list_requirements(client: &ActionClient) -> Result<()> {
    let requirements = client.list_requirements().await?;

    if requirements.is_empty() {
        println!("{}", "No requirements found.".yellow());
        return Ok(());
    }

    for requirement in &requirements {
        print_requirement(requirement);
    }

    Ok(())
}

/// Print an action summary
fn print_action_summary(action: &Action) {
    let mut line = format!("  {} {}", "▸".cyan(), action.name.bold());
    if action.deprecated {
        line.push_str(&format!(" {}", "(deprecated)".red()));
    }
    if !action.enabled {
        line.push_str(&format!(" {}", "(disabled)".yellow()));
    }
    println!("{}", line);
    println!("    Type: {}", action.action_type.to_string().dimmed());
    if !action.description.is_empty() {
        println!("    Description: {}", action.description.dimmed());
    }
}

/// Print detailed action information
fn print_action_details(action: &Action) {
    println!("{}", "Action Details:".bold());
    println!("  ID:          {}", action.id.to_string().cyan());
    println!("  Name:        {}", action.name.bold());
    if let Some(group) = action.group_name() {
        println!("  Group:       {}", group);
    }
    println!("  Type:        {}", action.action_type);
    if !action.description.is_empty() {
        println!("  Description: {}", action.description);
    }
    println!("  Enabled:     {}", action.enabled);
    if action.deprecated {
        println!("  {}", "Deprecated".red());
    }

    if !action.parameters.is_empty() {
        println!("\n{}", "Parameters:".bold());
        for p in &action.parameters {
            println!(
                "  - {} {} = {}",
                p.name.cyan(),
                format!("({})", p.parameter_type).dimmed(),
                p.value
            );
        }
    }

    if !action.requirements.is_empty() {
        println!("\n{}", "Requirements:".bold());
        for r in &action.requirements {
            print_requirement(r);
        }
    }

    if !action.actions.is_empty() {
        println!("\n{}", "Steps:".bold());
        for (i, step) in action.actions.iter().enumerate() {
            let label = if step.step_name.is_empty() {
                step.name.clone()
            } else {
                format!("{} ({})", step.step_name, step.name)
            };
            let mut flags = Vec::new();
            if step.optional {
                flags.push("optional");
            }
            if step.always_executed {
                flags.push("always");
            }
            if !step.enabled {
                flags.push("disabled");
            }
            println!("  {}. {} {}", i + 1, label, flags.join(", ").dimmed());
        }
    }
}

/// Print one usage line
fn print_usage(usage: &PipelineUsingAction) {
    println!(
        "  {} {}/{}",
        "▸".cyan(),
        usage.project_key.bold(),
        usage.pipeline_name
    );
    println!("    Project: {}", usage.project_name.dimmed());
    if !usage.action_name.is_empty() {
        println!("    Via:     {}", usage.action_name.dimmed());
    }
    if usage.in_workflow() {
        println!(
            "    Workflow: {} ({})",
            usage.workflow_name.dimmed(),
            usage.workflow_node_name.dimmed()
        );
    }
}

/// Print an audit entry
fn print_audit(audit: &ActionAudit) {
    println!(
        "  {} {} {}",
        audit.versionned.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        audit.change.bold(),
        audit
            .username()
            .map(|u| format!("by {}", u))
            .unwrap_or_default()
            .cyan()
    );
}

/// Print a requirement
fn print_requirement(requirement: &Requirement) {
    println!(
        "  - {} {}: {}",
        requirement.name.cyan(),
        format!("({})", requirement.requirement_type).dimmed(),
        requirement.value
    );
}
