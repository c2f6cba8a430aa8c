use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::{Commands, FormatArg, ProjectArgs, SelectionArgs};
use toolshed::config::Config;
use toolshed::export::{self, ExportFormat};
use toolshed::{DuplicatePolicy, Phase, ProjectMeta, Session, ToolCatalog, ToolRecord};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolshed")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolshed.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => handle_list_command(None, false, false, cli, config),
        Some(Commands::List {
            phase,
            unclassified,
            json,
        }) => handle_list_command(*phase, *unclassified, *json, cli, config),
        Some(Commands::Search { query, json }) => handle_search_command(query, *json, cli, config),
        Some(Commands::Show { name }) => handle_show_command(name, cli, config),
        Some(Commands::Toolbox { selection }) => handle_toolbox_command(selection, cli, config),
        Some(Commands::Plan { project, selection }) => handle_plan_command(project, selection, cli, config),
        Some(Commands::Export {
            project,
            selection,
            formats,
            out_dir,
        }) => handle_export_command(project, selection, formats, out_dir.as_ref(), cli, config),
        Some(Commands::Formats) => handle_formats_command(),
    }
}

fn load_catalog(cli: &Cli, config: &Config) -> Result<Arc<ToolCatalog>> {
    let primary = cli.catalog.as_ref().unwrap_or(&config.catalog.primary);
    let catalog = toolshed::catalog::shared(primary, &config.catalog.fallback).context("Failed to load tool catalog")?;
    if cli.is_verbose() {
        println!("{} {} tools", "Catalog:".cyan(), catalog.len());
    }
    Ok(catalog)
}

/// Start a session and apply the command-line selections to it
fn start_session(project: &ProjectArgs, selection: &SelectionArgs, catalog: &ToolCatalog, config: &Config) -> Session {
    let policy = if selection.allow_duplicates {
        DuplicatePolicy::Allow
    } else {
        config.duplicate_policy()
    };
    let mut session = Session::start(ProjectMeta::new(&project.name, &project.owner), policy);

    for phase in Phase::ALL {
        for name in selection.for_phase(phase) {
            if !catalog.contains(name) {
                warn!("'{}' selected for {} is not in the catalog", name, phase);
                println!("{} '{}' is not in the catalog; kept without description", "Note:".yellow(), name);
            }
            if !session.select(phase, name.as_str()) {
                println!("{} '{}' already selected for {}", "Skipped:".yellow(), name, phase);
            }
        }
    }
    session
}

fn phase_label(phase: Phase) -> ColoredString {
    let (r, g, b) = phase.rgb();
    format!("{:<6}", phase.as_str()).truecolor(r, g, b).bold()
}

fn print_dictionary(records: &[&ToolRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records).context("Failed to serialize tools")?);
        return Ok(());
    }
    if records.is_empty() {
        println!("{}", "No tools found. Try a different search term.".yellow());
        return Ok(());
    }
    for record in records {
        let phase = match record.category {
            Some(phase) => phase_label(phase),
            None => format!("{:<6}", "-").dimmed(),
        };
        println!("{} {}  {}", phase, record.name.bold(), record.description());
        if let Some(url) = &record.more_info_url {
            println!("       {}", url.blue().underline());
        }
    }
    Ok(())
}

fn handle_list_command(phase: Option<Phase>, unclassified: bool, json: bool, cli: &Cli, config: &Config) -> Result<()> {
    info!("Listing tools - phase: {:?}, unclassified: {}", phase, unclassified);
    let catalog = load_catalog(cli, config)?;
    let records: Vec<&ToolRecord> = match phase {
        _ if unclassified => catalog.unclassified(),
        Some(phase) => catalog.by_phase(phase),
        None => catalog.iter().collect(),
    };
    print_dictionary(&records, json)
}

fn handle_search_command(query: &str, json: bool, cli: &Cli, config: &Config) -> Result<()> {
    info!("Searching tools: {:?}", query);
    let catalog = load_catalog(cli, config)?;
    let results = catalog.search(query);
    if !json {
        println!("{} {} of {} tools", "Found:".green(), results.len(), catalog.len());
    }
    print_dictionary(&results, json)
}

fn handle_show_command(name: &str, cli: &Cli, config: &Config) -> Result<()> {
    info!("Showing tool: {}", name);
    let catalog = load_catalog(cli, config)?;
    let Some(tool) = catalog.get(name) else {
        let similar: Vec<&str> = catalog.search(name).iter().map(|t| t.name.as_str()).collect();
        if !similar.is_empty() {
            println!("{} {}", "Did you mean:".yellow(), similar.join(", "));
        }
        return Err(eyre!("Tool not found: {}", name));
    };

    println!("{}", tool.name.bold());
    match tool.category {
        Some(phase) => println!("  Phase:       {}", phase_label(phase)),
        None => println!("  Phase:       {}", "unclassified".dimmed()),
    }
    println!("  Description: {}", tool.description());
    if let Some(url) = &tool.more_info_url {
        println!("  More info:   {}", url.blue().underline());
    }
    for (i, video) in tool.video_urls.iter().enumerate() {
        println!("  Video {}:     {}", i + 1, video.blue().underline());
    }
    Ok(())
}

fn handle_toolbox_command(selection: &SelectionArgs, cli: &Cli, config: &Config) -> Result<()> {
    info!("Showing toolboxes");
    let catalog = load_catalog(cli, config)?;
    let session = start_session(&ProjectArgs::default(), selection, &catalog, config);

    for phase in Phase::ALL {
        let (r, g, b) = phase.rgb();
        println!("{}", format!(" {} Toolbox ", phase).white().bold().on_truecolor(r, g, b));
        let tools = session.get_selections(phase);
        if tools.is_empty() {
            println!("  {}", "No tools selected".dimmed());
        } else {
            for tool in tools {
                println!("  {} {}", "✔".truecolor(r, g, b), tool);
            }
        }
        let available = session.selections().available(phase, &catalog);
        if !available.is_empty() {
            println!("  {} {}", "Available:".dimmed(), available.join(", ").dimmed());
        }
        println!();
    }

    session.end();
    Ok(())
}

fn handle_plan_command(project: &ProjectArgs, selection: &SelectionArgs, cli: &Cli, config: &Config) -> Result<()> {
    info!("Building plan for project: {:?}", project.name);
    let catalog = load_catalog(cli, config)?;
    let session = start_session(project, selection, &catalog, config);
    let plan = session.plan(&catalog);

    let meta = session.meta();
    println!(
        "{} {}   {} {}   {} {}",
        "Project Name:".bold(),
        meta.name(),
        "Owner:".bold(),
        meta.owner(),
        "Created:".bold(),
        meta.created_display()
    );
    println!();

    if plan.is_empty() {
        println!("{}", "No tasks selected for this project plan.".yellow());
    } else {
        println!("The table below outlines the selected tools as tasks in your PDCA project plan.");
        for task in &plan.tasks {
            println!("{} {}  {}", phase_label(task.phase), task.task_name.bold(), task.description);
        }
    }

    session.end();
    Ok(())
}

fn handle_export_command(
    project: &ProjectArgs,
    selection: &SelectionArgs,
    formats: &[FormatArg],
    out_dir: Option<&PathBuf>,
    cli: &Cli,
    config: &Config,
) -> Result<()> {
    let formats = FormatArg::resolve(formats);
    let out_dir = out_dir.unwrap_or(&config.export.out_dir);
    info!("Exporting {:?} to {}", formats, out_dir.display());

    let catalog = load_catalog(cli, config)?;
    let session = start_session(project, selection, &catalog, config);
    let plan = session.plan(&catalog);

    let report = export::export_to_dir(&plan, &formats, out_dir, &config.export_settings())
        .context("Failed to export project plan")?;

    for path in &report.written {
        println!("{} {}", "Wrote:".green(), path.display());
    }
    for format in &report.unavailable {
        println!("{} {} export not available", "Warning:".yellow(), format);
    }

    session.end();
    Ok(())
}

fn handle_formats_command() -> Result<()> {
    for format in ExportFormat::ALL {
        let status = if format.is_available() {
            "available".green()
        } else {
            "not available".red()
        };
        println!("{:<5} {:<18} {}", format.to_string(), format.file_name(), status);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
