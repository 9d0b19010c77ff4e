// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers

use opttrace::{dedup_ce_trace, OptimizeTracer, TraceConfig};
use std::path::{Path, PathBuf};

use crate::cli::commands::OutputFormat;
use crate::cli::output::TraceFormatter;

/// Load the trace config named on the command line, or the default one
pub fn load_config(path: Option<&Path>) -> Result<TraceConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(TraceConfig::from_json_file(path)?),
        None => Ok(TraceConfig::default()),
    }
}

/// Handle `show`
pub fn handle_show(
    file: PathBuf,
    format: OutputFormat,
    config: &TraceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = OptimizeTracer::read_from_file(&file)?;
    print!("{}", TraceFormatter::format(&tracer, format, config)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Handle `steps`
pub fn handle_steps(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = OptimizeTracer::read_from_file(&file)?;
    print!("{}", TraceFormatter::format_steps(tracer.logical.as_ref()));
    Ok(())
}

/// Handle `candidates`
pub fn handle_candidates(
    file: PathBuf,
    selected_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = OptimizeTracer::read_from_file(&file)?;
    print!(
        "{}",
        TraceFormatter::format_candidates(tracer.physical.as_ref(), selected_only)
    );
    Ok(())
}

/// Handle `dedup-ce`
pub fn handle_dedup_ce(
    file: PathBuf,
    config: &TraceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = opttrace::export::read_ce_records(&file)?;
    let deduped = dedup_ce_trace(&records);
    log::info!(
        "Removed {} duplicate CE records",
        records.len() - deduped.len()
    );
    println!("{}", TraceFormatter::format_ce_records(&deduped, config)?);
    Ok(())
}
