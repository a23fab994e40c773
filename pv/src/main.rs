//! Planview - project plan client
//!
//! CLI entry point. Without a subcommand this launches the interactive
//! TUI; the batch subcommands print to stdout instead.

use std::fs;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use planview::cli::{Cli, Command, OutputFormat};
use planview::client::{HttpPlanService, PlanService};
use planview::config::Config;
use planview::plan::resolve_sections;
use planview::render::{render_json, render_text};
use planview::{demo, tui};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = planview::cli::get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Level priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    // Logs go to a file; stdout belongs to the rendered plan and the
    // TUI owns the terminal.
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("Planview loaded config: service={}", config.service.base_url());

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan { prompt, format }) => {
            debug!("main: matched Plan command");
            cmd_plan(&config, &prompt, format).await
        }
        Some(Command::Demo { format }) => {
            debug!("main: matched Demo command");
            cmd_demo(format)
        }
        Some(Command::Health) => {
            debug!("main: matched Health command");
            cmd_health(&config).await
        }
        None => {
            debug!("main: no command, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Request a plan and print it to stdout
async fn cmd_plan(config: &Config, prompt: &str, format: OutputFormat) -> Result<()> {
    debug!(prompt_len = prompt.len(), %format, "cmd_plan: called");
    let service = HttpPlanService::from_config(&config.service).map_err(|e| eyre!(e.to_string()))?;

    let document = service.request_plan(prompt).await.map_err(|e| eyre!(e.to_string()))?;
    debug!("cmd_plan: plan received, resolving sections");

    let sections = resolve_sections(&document);
    match format {
        OutputFormat::Text => print!("{}", render_text(&sections)),
        OutputFormat::Json => println!("{}", render_json(&sections)?),
    }
    Ok(())
}

/// Render the built-in sample plan without touching the network
fn cmd_demo(format: OutputFormat) -> Result<()> {
    debug!(%format, "cmd_demo: called");
    let sections = resolve_sections(&demo::sample_plan());
    match format {
        OutputFormat::Text => print!("{}", render_text(&sections)),
        OutputFormat::Json => println!("{}", render_json(&sections)?),
    }
    Ok(())
}

/// Query the service health endpoint and report it
async fn cmd_health(config: &Config) -> Result<()> {
    debug!("cmd_health: called");
    let service = HttpPlanService::from_config(&config.service).map_err(|e| eyre!(e.to_string()))?;

    let health = service.health().await.map_err(|e| eyre!(e.to_string()))?;
    println!("status: {}", health.status);
    if let Some(message) = &health.message {
        println!("message: {}", message);
    }
    if let Some(initialized) = health.planning_agent_initialized {
        println!("planning agent initialized: {}", initialized);
    }
    Ok(())
}

/// Launch the interactive TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let service = HttpPlanService::from_config(&config.service).map_err(|e| eyre!(e.to_string()))?;
    tui::run(Arc::new(service)).await
}
