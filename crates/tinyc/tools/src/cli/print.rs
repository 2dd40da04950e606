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

//! Print command for dumping a syntax tree

use super::{ToolResult, load_program};
use clap::Args;
use std::{io::Write, path::PathBuf};

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// JSON syntax tree to print
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// Write the indented tree dump of `args.input` to `out`
pub fn run_print<W: Write>(args: &PrintArgs, out: &mut W) -> ToolResult<()> {
    let loaded = load_program(&args.input)?;
    write!(out, "{}", loaded.tree)?;
    Ok(())
}
