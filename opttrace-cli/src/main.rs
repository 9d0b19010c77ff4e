// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! OptTrace CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Version => {
            println!("{} {}", "OptTrace".bold().green(), opttrace::VERSION);
            println!("Query optimizer trace viewer");
            Ok(())
        }

        Commands::Show { file, format } => {
            let config = cli::handlers::load_config(config_path)?;
            cli::handle_show(file, format, &config)
        }

        Commands::Steps { file } => cli::handle_steps(file),

        Commands::Candidates {
            file,
            selected_only,
        } => cli::handle_candidates(file, selected_only),

        Commands::DedupCe { file } => {
            let config = cli::handlers::load_config(config_path)?;
            cli::handle_dedup_ce(file, &config)
        }
    }
}
