// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Trace formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use opttrace::{
    CETraceRecord, LogicalOptimizeTracer, OptimizeTracer, PhysicalOptimizeTracer, TraceConfig,
    TraceError,
};

use crate::cli::commands::OutputFormat;

/// Trace formatter for the different CLI views
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a whole trace in the specified format
    pub fn format(
        tracer: &OptimizeTracer,
        format: OutputFormat,
        config: &TraceConfig,
    ) -> Result<String, TraceError> {
        match format {
            OutputFormat::Tree => Ok(opttrace::explain::format_trace(tracer)),
            OutputFormat::Json => tracer.to_json(config),
        }
    }

    /// Format retained rule applications as a table
    pub fn format_steps(logical: Option<&LogicalOptimizeTracer>) -> String {
        let logical = match logical {
            Some(logical) => logical,
            None => return format!("{}\n", "Logical optimization was not traced".yellow()),
        };
        if logical.steps.is_empty() {
            return format!("{}\n", "No rule changed the plan".yellow());
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Rule Applications".bold().green()));
        output.push_str(&format!("Rules with steps: {}\n\n", logical.steps.len()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["Index", "Rule", "Steps", "Actions"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );

        for rule in &logical.steps {
            let actions = rule
                .steps
                .iter()
                .map(|step| format!("{}. {}", step.index, step.action))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![
                Cell::new(rule.index),
                Cell::new(&rule.rule_name),
                Cell::new(rule.steps.len()),
                Cell::new(actions),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format physical candidates as a table
    pub fn format_candidates(
        physical: Option<&PhysicalOptimizeTracer>,
        selected_only: bool,
    ) -> String {
        let physical = match physical {
            Some(physical) => physical,
            None => return format!("{}\n", "Physical optimization was not traced".yellow()),
        };

        let candidates: Vec<_> = physical
            .candidates
            .values()
            .filter(|c| !selected_only || c.plan.selected)
            .collect();
        if candidates.is_empty() {
            return format!("{}\n", "No candidates found".yellow());
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Physical Candidates".bold().green()));
        output.push_str(&format!(
            "Candidates: {} | Selected: {}\n\n",
            physical.candidates.len(),
            physical.selected_candidates().count()
        ));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["ID", "Type", "Cost", "Mapping", "Selected"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );

        for candidate in candidates {
            let selected = if candidate.plan.selected {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no")
            };
            table.add_row(vec![
                Cell::new(candidate.plan.id),
                Cell::new(&candidate.plan.tp),
                Cell::new(format!("{:.2}", candidate.plan.cost)),
                Cell::new(&candidate.mapping_logical_plan),
                selected,
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format deduplicated CE records as JSON
    pub fn format_ce_records(
        records: &[CETraceRecord],
        config: &TraceConfig,
    ) -> Result<String, TraceError> {
        opttrace::export::ce_records_to_json(records, config)
    }
}
