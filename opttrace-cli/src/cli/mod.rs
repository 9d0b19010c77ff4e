// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for OptTrace
//!
//! Loads exported optimizer traces and renders them as reports or tables.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_candidates, handle_dedup_ce, handle_show, handle_steps};
