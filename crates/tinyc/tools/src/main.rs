// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! tinyc CLI Tool
//!
//! Main entry point for the tinyc command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use tinyc_tools::{CheckArgs, GenerateArgs, PrintArgs, run_check, run_generate, run_print};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinyc")]
#[command(about = "tinyc - syntax tree printer and x86-64 code generator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the syntax tree
    Print(PrintArgs),
    /// Generate x86-64 assembly
    Generate(GenerateArgs),
    /// Validate a program without writing assembly
    Check(CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Print(args) => {
            run_print(&args, &mut stdout).with_context(|| format!("printing {}", args.input.display()))?;
        }
        Commands::Generate(args) => {
            run_generate(&args, &mut stdout).with_context(|| format!("generating assembly for {}", args.input.display()))?;
        }
        Commands::Check(args) => {
            run_check(&args, &mut stdout).with_context(|| format!("checking {}", args.input.display()))?;
        }
    }

    Ok(())
}
