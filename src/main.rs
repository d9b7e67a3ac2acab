//! api-smoke - REST API smoke-test checklist
//!
//! Logs in once, checks a fixed list of endpoints in order, and reports
//! pass/fail per endpoint based on the HTTP status code.
//!
//! ## Usage
//!
//! ```bash
//! # Run the checklist against the default base URL
//! api-smoke
//!
//! # Point at another deployment
//! api-smoke run --base-url https://staging.example.com/api --timeout 10
//!
//! # Machine-readable summary
//! api-smoke run --format json --output results.json
//!
//! # Show the checklist
//! api-smoke list
//! ```
//!
//! The process exits with 0 when every endpoint answered 2xx, 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

mod auth;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod utils;

use cli::{Args, RunArgs};
use config::{CheckerConfig, ConfigFile, EnvConfig};
use executor::CheckRunner;
use models::{Endpoint, RunSummary};
use output::{OutputFormat, Reporter, ResultFormatter};
use utils::LogLevel;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    let level = args
        .log_level
        .as_deref()
        .and_then(LogLevel::from_str)
        .unwrap_or(LogLevel::from_verbose(verbose));
    utils::init_logger(level);

    match args.command {
        None => run_checks(RunArgs::default(), &env).await?,
        Some(cli::Command::Run(run_args)) => run_checks(run_args, &env).await?,
        Some(cli::Command::List) => list_endpoints(),
        Some(cli::Command::Config(config_args)) => manage_config(config_args, &env)?,
    }

    Ok(())
}

/// Defaults, then config file, then environment, then flags
fn effective_config(args: &RunArgs, env: &EnvConfig) -> Result<CheckerConfig> {
    let explicit = args.config.as_deref().or(env.config_file.as_deref());
    let file = ConfigFile::resolve(explicit)?;

    let mut config = file.checker.merge_env(env);
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(email) = &args.email {
        config = config.with_email(email);
    }
    if let Some(password) = &args.password {
        config = config.with_password(password);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }

    config.validate()?;
    Ok(config)
}

/// Flag, then `API_SMOKE_FORMAT`, else text
fn output_format(args: &RunArgs, env: &EnvConfig) -> Result<OutputFormat> {
    match args.format.as_deref().or(env.format.as_deref()) {
        Some(name) => OutputFormat::from_str(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown output format: {name}")),
        None => Ok(OutputFormat::Text),
    }
}

/// Run the checklist, reporting to `out` and saving the JSON summary if asked
async fn execute<W: Write>(args: &RunArgs, env: &EnvConfig, out: W) -> Result<RunSummary> {
    let config = effective_config(args, env)?;
    let format = output_format(args, env)?;

    info!(
        "Checking {} with {}s timeout",
        config.base_url, config.timeout_secs
    );

    let mut reporter = Reporter::new(out, format);
    let summary = CheckRunner::new(config)?.run(&mut reporter).await?;

    if let Some(path) = &args.output {
        std::fs::write(path, ResultFormatter::format_json(&summary))
            .with_context(|| format!("Failed to write results to {path}"))?;
        info!("Results written to {}", path);
    }

    Ok(summary)
}

async fn run_checks(args: RunArgs, env: &EnvConfig) -> Result<()> {
    let summary = execute(&args, env, io::stdout()).await?;
    std::process::exit(summary.exit_code());
}

fn list_endpoints() {
    let endpoints = Endpoint::all();
    println!("\nEndpoint checklist ({} total)\n", endpoints.len());
    print!("{}", ResultFormatter::format_endpoint_table(endpoints));
    println!();
}

fn manage_config(args: cli::ConfigArgs, env: &EnvConfig) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            ConfigFile::example().save(path)?;
            println!("✓ Configuration file created: {output}");
        }

        cli::ConfigAction::Show {
            env: show_env,
            format,
            config,
        } => {
            if show_env {
                env.print_summary();
                if !env.has_any() {
                    println!("\nNo API_SMOKE_* variables are set.");
                }
            } else {
                let explicit = config.as_deref().or(env.config_file.as_deref());
                let file = ConfigFile::resolve(explicit)?;
                let output = if format == "json" {
                    serde_json::to_string_pretty(&file)?
                } else {
                    serde_yaml::to_string(&file)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Env => {
            config::env::print_env_help();
        }
    }

    Ok(())
}
