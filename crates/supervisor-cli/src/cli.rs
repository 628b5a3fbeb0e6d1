// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "runn", version, about = "Launches and supervises declared child processes")]
pub struct Cli {
    /// Override the config search order (§6) with an explicit path.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter, honors `RUST_LOG` when unset.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start every declared auto-restart service not already recorded as running.
    Start {
        /// Stop all previously recorded processes first, ignoring recorded state.
        #[arg(long)]
        force: bool,
    },
    /// Stop every tracked service.
    Stop,
    /// List tracked services with liveness and uptime.
    List,
}
