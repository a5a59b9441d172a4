//! Treetable CLI Binary
//!
//! Command-line interface for rendering and navigating tree tables.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::process;
use treetable::logging::init_logging;
use treetable::tooling::cli::{Cli, CliContext, Commands};

fn main() {
    let cli = Cli::parse();

    // Create CLI context
    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(&context, &cli.command) {
        Ok(Some(output)) => {
            println!("{}", output);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(context: &CliContext, command: &Commands) -> anyhow::Result<Option<String>> {
    if let Commands::Shell { query } = command {
        let stdin = io::stdin();
        context
            .run_shell(query, stdin.lock(), io::stdout())
            .context("shell session failed")?;
        return Ok(None);
    }

    let output = context
        .execute(command)
        .with_context(|| format!("{} failed", command_name(command)))?;
    Ok(Some(output))
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Render { .. } => "render",
        Commands::Show { .. } => "show",
        Commands::Sort { .. } => "sort",
        Commands::Filter { .. } => "filter",
        Commands::Page { .. } => "page",
        Commands::Back => "back",
        Commands::Forward => "forward",
        Commands::Url => "url",
        Commands::Shell { .. } => "shell",
        Commands::Config => "config",
    }
}
