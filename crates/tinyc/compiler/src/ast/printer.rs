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

//! Diagnostic tree printer
//!
//! Every node prints one line prefixed by `depth * INDENT_WIDTH` spaces and then
//! its children one level deeper. Nodes with more than one child region get a
//! marker line (`--functions--`, `--body--`, `--ifpart--`, `--elsepart--`)
//! between regions. List elements print one after another at the same depth.

use super::{AstNode, Constant, ValueKind};
use crate::symbols::literal_pool::escape_literal;
use std::fmt::{self, Write};

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 3;

/// Print `node` at `depth` into `out`
pub fn print_tree<W: Write + ?Sized>(node: &AstNode, depth: usize, out: &mut W) -> fmt::Result {
    indent(out, depth)?;

    match node {
        AstNode::Program { globals, functions } => {
            writeln!(out, "Program")?;
            print_list(globals, depth + 1, out)?;
            marker(out, depth + 1, "functions")?;
            print_list(functions, depth + 1, out)?;
        }
        AstNode::VarDecl { name, value_kind } => {
            let ty = match value_kind {
                ValueKind::Int => "int",
                ValueKind::Str => "string",
            };
            writeln!(out, "Variable declaration ({name}) type {ty}")?;
        }
        AstNode::Function { name, params, body } => {
            writeln!(out, "Function def ({name})")?;
            print_list(params, depth + 1, out)?;
            marker(out, depth + 1, "body")?;
            print_list(body, depth + 1, out)?;
        }
        AstNode::StmtBlock { statements } => {
            writeln!(out, "Statement block")?;
            print_list(statements, depth + 1, out)?;
        }
        AstNode::FunCall { name, args } => {
            writeln!(out, "Function call ({name})")?;
            print_list(args, depth + 1, out)?;
        }
        AstNode::Argument { expr } => {
            writeln!(out, "Funcall argument")?;
            print_tree(expr, depth + 1, out)?;
        }
        AstNode::Assignment { name, value } => {
            writeln!(out, "Assignment to ({name})")?;
            print_tree(value, depth + 1, out)?;
        }
        AstNode::While { condition, body } => {
            writeln!(out, "While loop")?;
            print_tree(condition, depth + 1, out)?;
            marker(out, depth + 1, "body")?;
            print_list(body, depth + 1, out)?;
        }
        AstNode::IfThen {
            condition,
            then_body,
            else_body,
        } => {
            writeln!(out, "If then")?;
            print_tree(condition, depth + 1, out)?;
            marker(out, depth + 1, "ifpart")?;
            print_list(then_body, depth + 1, out)?;
            marker(out, depth + 1, "elsepart")?;
            print_list(else_body, depth + 1, out)?;
        }
        AstNode::BinaryExpr { op, lhs, rhs } => {
            writeln!(out, "Expression (op {})", op.code())?;
            print_tree(lhs, depth + 1, out)?;
            print_tree(rhs, depth + 1, out)?;
        }
        AstNode::RelExpr { op, lhs, rhs } => {
            writeln!(out, "Relational expression")?;
            print_tree(lhs, depth + 1, out)?;
            indent(out, depth + 1)?;
            writeln!(out, "relop: {}", op.symbol())?;
            print_tree(rhs, depth + 1, out)?;
        }
        AstNode::VarRef { name } => writeln!(out, "Variable ref ({name})")?,
        AstNode::Constant { value } => match value {
            Constant::Int(v) => writeln!(out, "Int Constant = {v}")?,
            Constant::Str { text, .. } => writeln!(out, "String Constant = ({})", escape_literal(text))?,
        },
    }

    Ok(())
}

fn print_list<W: Write + ?Sized>(nodes: &[AstNode], depth: usize, out: &mut W) -> fmt::Result {
    for node in nodes {
        print_tree(node, depth, out)?;
    }
    Ok(())
}

fn marker<W: Write + ?Sized>(out: &mut W, depth: usize, region: &str) -> fmt::Result {
    indent(out, depth)?;
    writeln!(out, "--{region}--")
}

fn indent<W: Write + ?Sized>(out: &mut W, depth: usize) -> fmt::Result {
    write!(out, "{:width$}", "", width = depth * INDENT_WIDTH)
}
