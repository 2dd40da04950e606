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

//! Assembly writer utilities for line-oriented text output

use super::error::{CodegenError, CodegenResult};

/// An append-only writer for assembly text with an optional size limit
#[derive(Debug, Clone)]
pub struct AsmWriter {
    buffer: String,
    lines: usize,
    instructions: usize,
    max_size: Option<usize>,
}

impl AsmWriter {
    /// Create a new assembly writer
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            lines: 0,
            instructions: 0,
            max_size: None,
        }
    }

    /// Create a new assembly writer with a maximum size limit in bytes
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size: Some(max_size),
            ..Self::new()
        }
    }

    /// Number of lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of instruction lines written so far
    pub fn instructions(&self) -> usize {
        self.instructions
    }

    /// Get the current size of the output in bytes
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the text written so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Take ownership of the text
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Write an instruction; operands are separated from the mnemonic by a tab
    pub fn instruction(&mut self, mnemonic: &str, operands: &str) -> CodegenResult<()> {
        let line = if operands.is_empty() {
            format!("\t{mnemonic}")
        } else {
            format!("\t{mnemonic}\t{operands}")
        };
        self.write_line(&line)?;
        self.instructions += 1;
        Ok(())
    }

    /// Write an indented assembler directive such as `.text`
    pub fn directive(&mut self, directive: &str) -> CodegenResult<()> {
        self.write_line(&format!("\t{directive}"))
    }

    /// Write a label definition
    pub fn label(&mut self, name: &str) -> CodegenResult<()> {
        self.write_line(&format!("{name}:"))
    }

    /// Write a single line verbatim
    pub fn write_line(&mut self, line: &str) -> CodegenResult<()> {
        self.check_size_limit(self.buffer.len() + line.len() + 1)?;
        self.buffer.push_str(line);
        self.buffer.push('\n');
        self.lines += 1;
        Ok(())
    }

    /// Check if the new size would exceed the limit
    fn check_size_limit(&self, new_size: usize) -> CodegenResult<()> {
        if let Some(max_size) = self.max_size {
            if new_size > max_size {
                return Err(CodegenError::OutputSizeLimitExceeded { actual: new_size, limit: max_size });
            }
        }
        Ok(())
    }
}

impl Default for AsmWriter {
    fn default() -> Self {
        Self::new()
    }
}
