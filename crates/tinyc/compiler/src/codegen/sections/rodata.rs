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

//! Read-only data section generator

use crate::{
    codegen::{config::LITERAL_LABEL_PREFIX, context::GenerationContext, error::CodegenResult},
    symbols::{LiteralPool, escape_literal},
};

/// Generator for the literal pool
pub struct RodataGenerator;

impl RodataGenerator {
    /// Emit the `.rodata` marker and one label/string pair per pool entry, in pool order
    pub fn generate(ctx: &mut GenerationContext<'_>, literals: &LiteralPool) -> CodegenResult<()> {
        ctx.directive(".text")?;
        ctx.directive(".section\t.rodata")?;

        for (index, text) in literals.entries().iter().enumerate() {
            ctx.symbol(&Self::label(index))?;
            ctx.directive(&format!(".string {}", escape_literal(text)))?;
        }
        ctx.stats_mut().literals = literals.len();

        Ok(())
    }

    /// Label of the pool entry at `index`
    pub fn label(index: usize) -> String {
        format!("{LITERAL_LABEL_PREFIX}{index}")
    }
}
