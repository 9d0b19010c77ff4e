// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for OptTrace

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// OptTrace CLI - inspect exported optimizer traces
#[derive(Parser)]
#[command(name = "opttrace")]
#[command(about = "OptTrace - inspect exported query optimizer traces")]
#[command(version)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Trace config file controlling JSON output
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// Show a whole optimizer trace
    Show {
        /// Exported trace file
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "tree")]
        format: OutputFormat,
    },

    /// List the rewrite rules that changed the plan
    Steps {
        /// Exported trace file
        file: PathBuf,
    },

    /// List physical candidate plans
    Candidates {
        /// Exported trace file
        file: PathBuf,

        /// Only list candidates that are part of the final plan
        #[arg(short, long)]
        selected_only: bool,
    },

    /// Deduplicate a JSON array of cardinality estimation records
    DedupCe {
        /// File holding a JSON array of CE records
        file: PathBuf,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with plan trees
    Tree,
    /// JSON, re-encoded from the trace
    Json,
}
