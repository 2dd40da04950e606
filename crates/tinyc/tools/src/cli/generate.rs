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

//! Generate command for producing assembly

use super::{ToolError, ToolResult, load_config, load_program};
use clap::Args;
use std::{fs, io::Write, path::PathBuf};
use tinyc_compiler::{AsmGenerator, GenerationStats};
use tracing::info;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// JSON syntax tree to compile
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output assembly file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generator configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Omit call frame information directives
    #[arg(long)]
    pub no_cfi: bool,

    /// Print the syntax tree to stderr before generating
    #[arg(long)]
    pub print_tree: bool,
}

/// Generate assembly for `args.input`, writing it to the output file or `out`
pub fn run_generate<W: Write>(args: &GenerateArgs, out: &mut W) -> ToolResult<GenerationStats> {
    let mut config = load_config(args.config.as_deref())?;
    if args.no_cfi {
        config.emit_cfi = false;
    }
    let generator = AsmGenerator::with_config(config)?;

    let loaded = load_program(&args.input)?;
    if args.print_tree {
        eprint!("{}", loaded.tree);
    }

    let assembly = generator.generate(&loaded.tree, &loaded.symbols, &loaded.literals)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &assembly.text).map_err(|source| ToolError::Write { path: path.clone(), source })?;
            info!(path = %path.display(), lines = assembly.stats.lines, "wrote assembly");
        }
        None => out.write_all(assembly.text.as_bytes())?,
    }

    Ok(assembly.stats)
}
