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

//! Configuration for assembly generation

use serde::{Deserialize, Serialize};

/// Prefix of the read-only string literal labels (`.LC0`, `.LC1`, ...)
pub const LITERAL_LABEL_PREFIX: &str = ".LC";

/// Configuration for assembly generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Prefix of control-flow labels
    pub label_prefix: String,

    /// Number of the first allocated label
    pub label_base: u32,

    /// Whether to emit call-frame information directives for unwinding
    pub emit_cfi: bool,

    /// Whether to emit an `endbr64` landing pad at function entry
    pub emit_endbr64: bool,

    /// Maximum output size in bytes (None for unlimited)
    pub max_output_size: Option<usize>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            label_prefix: ".LL".to_string(),
            label_base: 0,
            emit_cfi: true,
            emit_endbr64: true,
            max_output_size: None,
        }
    }
}

impl CodegenConfig {
    /// Frame boilerplate matching what gcc emits for the same functions
    pub fn gcc_compatible() -> Self {
        Self::default()
    }

    /// Bare prologues and epilogues without CFI or CET directives
    pub fn minimal() -> Self {
        Self {
            emit_cfi: false,
            emit_endbr64: false,
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let prefix = &self.label_prefix;
        if prefix.is_empty() {
            return Err("Label prefix must not be empty".to_string());
        }

        if prefix.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(format!("Label prefix '{prefix}' must not start with a digit"));
        }

        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$')) {
            return Err(format!("Label prefix '{prefix}' contains characters that are not valid in a symbol"));
        }

        // `.LC1` followed by label 0 renders as `.LC10`
        if prefix == LITERAL_LABEL_PREFIX || is_numbered(prefix, LITERAL_LABEL_PREFIX) {
            return Err(format!("Label prefix '{prefix}' collides with string literal labels"));
        }

        if let Some(max_size) = self.max_output_size {
            if max_size == 0 {
                return Err("Maximum output size must be greater than 0".to_string());
            }
        }

        Ok(())
    }

    /// Whether `name` could be produced by control-flow or literal label numbering
    pub fn is_reserved_label(&self, name: &str) -> bool {
        is_numbered(name, &self.label_prefix) || is_numbered(name, LITERAL_LABEL_PREFIX)
    }
}

/// `name` is `prefix` followed by one or more decimal digits
fn is_numbered(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}
