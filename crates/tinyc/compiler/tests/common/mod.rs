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

//! Shared helpers for the integration tests
//!
//! [`Machine`] interprets the subset of x86-64 the generator emits, which is
//! enough to check the values a lowered function computes.

#![allow(dead_code)]

use std::collections::HashMap;
use tinyc_compiler::{AsmGenerator, AstNode, CodegenConfig, GeneratedAssembly, LiteralPool, SymbolTable};

/// Intern literals, collect globals and generate with the minimal preset
pub fn compile(mut program: AstNode) -> GeneratedAssembly {
    let mut literals = LiteralPool::new();
    literals.intern_tree(&mut program);
    let symbols = SymbolTable::from_program(&program).expect("globals");
    AsmGenerator::with_config(CodegenConfig::minimal())
        .expect("config")
        .generate(&program, &symbols, &literals)
        .expect("generation")
}

/// Trimmed instruction lines with tabs collapsed to spaces
pub fn lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().replace('\t', " ")).collect()
}

const ARGUMENT_NAMES: [(&str, &str); 6] = [
    ("%rdi", "%edi"),
    ("%rsi", "%esi"),
    ("%rdx", "%edx"),
    ("%rcx", "%ecx"),
    ("%r8", "%r8d"),
    ("%r9", "%r9d"),
];

/// A recorded `call`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub callee: String,
    /// All six argument registers at the time of the call
    pub registers: [i64; 6],
}

/// Register and memory state of a simulated function
#[derive(Debug, Default)]
pub struct Machine {
    pub rax: i64,
    pub r11: i64,
    pub stack: Vec<i64>,
    pub globals: HashMap<String, i32>,
    pub arguments: [i64; 6],
    pub calls: Vec<Call>,
    /// `(destination, source)` of the last `cmpl`
    flags: (i32, i32),
}

/// Where string literal `i` appears to live when loaded with `leaq`
pub const LITERAL_BASE: i64 = 0x4000_0000;

impl Machine {
    pub fn eax(&self) -> i32 {
        self.rax as i32
    }

    pub fn global(&self, name: &str) -> i32 {
        self.globals.get(name).copied().unwrap_or(0)
    }

    /// Run the body of `function` in `text`, giving up after `fuel` steps
    pub fn run(text: &str, function: &str, fuel: usize) -> Machine {
        let body = function_body(text, function);
        let labels: HashMap<&str, usize> = body
            .iter()
            .enumerate()
            .filter_map(|(i, line)| line.strip_suffix(':').map(|name| (name, i)))
            .collect();

        let mut machine = Machine::default();
        let mut pc = 0;
        let mut steps = 0;
        while pc < body.len() {
            steps += 1;
            assert!(steps <= fuel, "ran out of fuel in {function}");

            let line = body[pc].as_str();
            pc += 1;
            if line.ends_with(':') || line.starts_with('.') {
                continue;
            }
            let (mnemonic, operands) = line.split_once(' ').unwrap_or((line, ""));
            if let Some(target) = machine.step(mnemonic, operands) {
                pc = *labels.get(target.as_str()).unwrap_or_else(|| panic!("unknown label {target}"));
            }
        }
        machine
    }

    /// Execute one instruction, returning a jump target if control transfers
    fn step(&mut self, mnemonic: &str, operands: &str) -> Option<String> {
        let ops: Vec<&str> = operands.split(", ").collect();
        match (mnemonic, ops.as_slice()) {
            ("endbr64" | "ret", _) => {}
            ("pushq", ["%rbp"]) | ("popq", ["%rbp"]) | ("movq", ["%rsp", "%rbp"]) => {}
            ("pushq", ["%rax"]) => self.stack.push(self.rax),
            ("popq", ["%r11"]) => self.r11 = self.stack.pop().expect("stack underflow"),
            ("movl", [src, "%eax"]) => self.rax = i64::from(self.read_long(src)),
            ("movl", ["%eax", dst]) => self.write_long(dst, self.eax()),
            ("movq", ["%rax", dst]) => {
                let slot = ARGUMENT_NAMES.iter().position(|(quad, _)| quad == dst).expect("argument register");
                self.arguments[slot] = self.rax;
            }
            ("leaq", [src, "%rax"]) => {
                let index: i64 = src.trim_start_matches(".LC").trim_end_matches("(%rip)").parse().expect("literal label");
                self.rax = LITERAL_BASE + index;
            }
            ("addl", ["%r11d", "%eax"]) => self.rax = i64::from((self.r11 as i32).wrapping_add(self.eax())),
            ("subl", ["%r11d", "%eax"]) => self.rax = i64::from(self.eax().wrapping_sub(self.r11 as i32)),
            ("cmpl", ["%eax", "%r11d"]) => self.flags = (self.r11 as i32, self.eax()),
            ("cmpl", ["$0", "%eax"]) => self.flags = (self.eax(), 0),
            ("setl" | "setg" | "setne" | "sete", ["%al"]) => {
                let holds = self.condition(&mnemonic[3..]);
                self.rax = (self.rax & !0xff) | i64::from(holds);
            }
            ("movzbl", ["%al", "%eax"]) => self.rax &= 0xff,
            ("jmp", [target]) => return Some(target.to_string()),
            (jcc, [target]) if jcc.starts_with('j') => {
                if self.condition(&jcc[1..]) {
                    return Some(target.to_string());
                }
            }
            ("call", [callee]) => self.calls.push(Call {
                callee: callee.to_string(),
                registers: self.arguments,
            }),
            _ => panic!("unsupported instruction: {mnemonic} {operands}"),
        }
        None
    }

    fn condition(&self, code: &str) -> bool {
        let (dst, src) = self.flags;
        match code {
            "l" => dst < src,
            "g" => dst > src,
            "le" => dst <= src,
            "ge" => dst >= src,
            "e" => dst == src,
            "ne" => dst != src,
            other => panic!("unsupported condition code {other}"),
        }
    }

    fn read_long(&self, src: &str) -> i32 {
        if let Some(immediate) = src.strip_prefix('$') {
            return immediate.parse().expect("immediate");
        }
        let name = src.strip_suffix("(%rip)").expect("global operand");
        self.global(name)
    }

    fn write_long(&mut self, dst: &str, value: i32) {
        if let Some(name) = dst.strip_suffix("(%rip)") {
            self.globals.insert(name.to_string(), value);
            return;
        }
        let slot = ARGUMENT_NAMES.iter().position(|(_, long)| *long == dst).expect("argument register");
        self.arguments[slot] = i64::from(value);
    }
}

/// Lines between `function:` and its `.size` directive
pub fn function_body(text: &str, function: &str) -> Vec<String> {
    let all = lines(text);
    let start = all.iter().position(|line| *line == format!("{function}:")).unwrap_or_else(|| panic!("no function {function}"));
    all[start + 1..].iter().take_while(|line| !line.starts_with(".size")).cloned().collect()
}
