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

//! Data section generator

use crate::{
    ast::AstNode,
    codegen::{
        context::GenerationContext,
        error::{CodegenError, CodegenResult},
    },
};

/// Generator for the data section
pub struct DataGenerator;

impl DataGenerator {
    /// Emit the `.data` marker and one zero-initialized 32-bit slot per global.
    /// String globals get the same slot; there is no dedicated string storage.
    pub fn generate(ctx: &mut GenerationContext<'_>, globals: &[AstNode]) -> CodegenResult<()> {
        ctx.directive(".data")?;

        for global in globals {
            let AstNode::VarDecl { name, .. } = global else {
                return Err(CodegenError::MalformedTree {
                    found: global.kind(),
                    context: "a global declaration",
                });
            };
            ctx.write_line(&format!("{name}:\t.long 0"))?;
            ctx.stats_mut().globals += 1;
        }

        Ok(())
    }
}
