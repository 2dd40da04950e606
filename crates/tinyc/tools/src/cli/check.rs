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

//! Check command: generate and discard, reporting statistics

use super::{ToolResult, load_config, load_program};
use clap::Args;
use std::{io::Write, path::PathBuf};
use tinyc_compiler::{AsmGenerator, GenerationStats};

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON syntax tree to validate
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Generator configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Validate `args.input` by running the generator and print a summary to `out`
pub fn run_check<W: Write>(args: &CheckArgs, out: &mut W) -> ToolResult<GenerationStats> {
    let generator = AsmGenerator::with_config(load_config(args.config.as_deref())?)?;
    let loaded = load_program(&args.input)?;
    let stats = generator.generate(&loaded.tree, &loaded.symbols, &loaded.literals)?.stats;

    writeln!(
        out,
        "ok: {} functions, {} globals, {} literals, {} labels, {} instructions",
        stats.functions, stats.globals, stats.literals, stats.labels, stats.instructions
    )?;
    Ok(stats)
}
