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

//! End-to-end generation tests

mod common;

use common::{LITERAL_BASE, Machine, compile, function_body, lines};
use tinyc_compiler::{
    ArithOp, AsmGenerator, AstNode, CodegenConfig, CodegenError, LiteralPool, RelOp, SymbolTable, ValueKind,
};

fn main_with(globals: &[&str], body: Vec<AstNode>) -> AstNode {
    AstNode::program(
        globals.iter().map(|name| AstNode::var_decl(*name, ValueKind::Int)).collect(),
        vec![AstNode::function("main", vec![], body)],
    )
}

fn increment(name: &str) -> AstNode {
    AstNode::assign(name, AstNode::binary(ArithOp::Add, AstNode::var_ref(name), AstNode::int(1)))
}

#[test]
fn test_globals_assignments_and_calls() {
    let program = main_with(
        &["a", "b"],
        vec![
            AstNode::assign("a", AstNode::int(1)),
            AstNode::assign("b", AstNode::int(2)),
            AstNode::call("f", vec![AstNode::var_ref("a"), AstNode::var_ref("b")]),
            AstNode::call("g", vec![AstNode::var_ref("b")]),
        ],
    );
    let output = compile(program);
    let all = lines(&output.text);

    let position = |needle: &str| all.iter().position(|line| line == needle).unwrap_or_else(|| panic!("missing {needle}"));
    assert!(position("a: .long 0") < position("b: .long 0"));
    assert!(position("b: .long 0") < position("main:"));
    assert!(position("movl $1, %eax") < position("movl $2, %eax"));

    let body = function_body(&output.text, "main");
    let first_call = body.iter().position(|line| line == "call f").unwrap();
    let moves: Vec<&String> = body[..first_call].iter().filter(|line| line.starts_with("movl %eax, %e")).collect();
    assert_eq!(moves, ["movl %eax, %edi", "movl %eax, %esi"]);

    let second_call = body.iter().position(|line| line == "call g").unwrap();
    assert_eq!(body[second_call - 1], "movl %eax, %edi");

    let machine = Machine::run(&output.text, "main", 1_000);
    assert_eq!(machine.calls.len(), 2);
    assert_eq!(machine.calls[0].registers[..2], [1, 2]);
    assert_eq!(machine.calls[1].callee, "g");
    assert_eq!(machine.calls[1].registers[0], 2);
}

#[test]
fn test_subtraction_operand_order() {
    let ten_minus_three = compile(main_with(&["r"], vec![AstNode::assign("r", AstNode::binary(ArithOp::Sub, AstNode::int(10), AstNode::int(3)))]));
    let body = function_body(&ten_minus_three.text, "main");
    assert_eq!(
        body[2..7],
        ["movl $3, %eax", "pushq %rax", "movl $10, %eax", "popq %r11", "subl %r11d, %eax"]
    );
    assert_eq!(Machine::run(&ten_minus_three.text, "main", 100).global("r"), 7);

    let three_minus_ten = compile(main_with(&["r"], vec![AstNode::assign("r", AstNode::binary(ArithOp::Sub, AstNode::int(3), AstNode::int(10)))]));
    let body = function_body(&three_minus_ten.text, "main");
    assert_eq!(body[2], "movl $10, %eax");
    assert_eq!(body[4], "movl $3, %eax");
    assert_eq!(Machine::run(&three_minus_ten.text, "main", 100).global("r"), -7);
}

#[test]
fn test_nested_arithmetic_evaluates() {
    // (a + 4) - (2 - a) with a = 5
    let expr = AstNode::binary(
        ArithOp::Sub,
        AstNode::binary(ArithOp::Add, AstNode::var_ref("a"), AstNode::int(4)),
        AstNode::binary(ArithOp::Sub, AstNode::int(2), AstNode::var_ref("a")),
    );
    let output = compile(main_with(&["a", "r"], vec![AstNode::assign("a", AstNode::int(5)), AstNode::assign("r", expr)]));
    assert_eq!(Machine::run(&output.text, "main", 100).global("r"), 12);
}

#[test]
fn test_while_branch_targets_exit_label() {
    let cond = AstNode::relational(RelOp::Less, AstNode::var_ref("x"), AstNode::int(5));
    let program = main_with(
        &["x", "flag"],
        vec![
            AstNode::if_then(AstNode::var_ref("flag"), vec![AstNode::call("never", vec![])], vec![]),
            AstNode::while_loop(cond, vec![increment("x")]),
        ],
    );
    let output = compile(program);
    let body = function_body(&output.text, "main");

    let branch = body.iter().position(|line| line.starts_with("jge ")).expect("loop branch");
    let target = body[branch].trim_start_matches("jge ").to_string();
    assert!(body[branch + 1].starts_with("jmp "));
    assert_eq!(body[branch + 2], format!("{target}:"));

    // The preceding conditional owns .LL0; the loop starts at .LL1
    assert_eq!(body.iter().filter(|line| *line == ".LL0:").count(), 1);
    assert_ne!(target, ".LL0");

    let machine = Machine::run(&output.text, "main", 1_000);
    assert_eq!(machine.global("x"), 5);
    assert!(machine.calls.is_empty());
}

#[test]
fn test_nested_loops_use_distinct_labels() {
    let inner = AstNode::while_loop(
        AstNode::relational(RelOp::Less, AstNode::var_ref("j"), AstNode::int(3)),
        vec![increment("j"), increment("total")],
    );
    let outer = AstNode::while_loop(
        AstNode::relational(RelOp::Less, AstNode::var_ref("i"), AstNode::int(4)),
        vec![AstNode::assign("j", AstNode::int(0)), inner, increment("i")],
    );
    let output = compile(main_with(&["i", "j", "total"], vec![outer]));

    let body = function_body(&output.text, "main");
    let mut defined: Vec<&String> = body.iter().filter(|line| line.starts_with(".LL") && line.ends_with(':')).collect();
    assert_eq!(defined.len(), 6);
    defined.sort();
    defined.dedup();
    assert_eq!(defined.len(), 6);
    assert_eq!(output.stats.labels, 6);

    let machine = Machine::run(&output.text, "main", 10_000);
    assert_eq!(machine.global("i"), 4);
    assert_eq!(machine.global("total"), 12);
}

#[test]
fn test_if_else_selects_branch() {
    for (x, expected) in [(1, 10), (9, 20)] {
        let cond = AstNode::relational(RelOp::Greater, AstNode::var_ref("x"), AstNode::int(5));
        let program = main_with(
            &["x", "r"],
            vec![
                AstNode::assign("x", AstNode::int(x)),
                AstNode::if_then(cond, vec![AstNode::assign("r", AstNode::int(20))], vec![AstNode::assign("r", AstNode::int(10))]),
            ],
        );
        let output = compile(program);
        assert_eq!(Machine::run(&output.text, "main", 1_000).global("r"), expected);
    }
}

#[test]
fn test_relational_operators_as_values() {
    let cases = [
        (RelOp::Less, 2, 3, 1),
        (RelOp::Less, 3, 3, 0),
        (RelOp::Greater, 4, 3, 1),
        (RelOp::Equal, 3, 3, 1),
        (RelOp::NotEqual, 3, 3, 0),
    ];
    for (op, lhs, rhs, expected) in cases {
        let value = AstNode::relational(op, AstNode::int(lhs), AstNode::int(rhs));
        let output = compile(main_with(&["r"], vec![AstNode::assign("r", value)]));
        assert_eq!(Machine::run(&output.text, "main", 100).global("r"), expected, "{lhs} {} {rhs}", op.symbol());
    }
}

#[test]
fn test_string_argument_passed_by_address() {
    let program = main_with(
        &["n"],
        vec![
            AstNode::assign("n", AstNode::int(3)),
            AstNode::call("printf", vec![AstNode::str("n=%d\n"), AstNode::var_ref("n")]),
            AstNode::call("puts", vec![AstNode::str("done")]),
            AstNode::call("puts", vec![AstNode::str("n=%d\n")]),
        ],
    );
    let output = compile(program);
    assert!(output.text.contains(".LC0:\n\t.string \"n=%d\\n\"\n.LC1:\n\t.string \"done\"\n"));
    assert_eq!(output.stats.literals, 2);

    let machine = Machine::run(&output.text, "main", 100);
    assert_eq!(machine.calls[0].registers[..2], [LITERAL_BASE, 3]);
    assert_eq!(machine.calls[1].registers[0], LITERAL_BASE + 1);
    assert_eq!(machine.calls[2].registers[0], LITERAL_BASE);
}

#[test]
fn test_multiple_functions_in_order() {
    let program = AstNode::program(
        vec![],
        vec![
            AstNode::function("helper", vec![AstNode::var_decl("p", ValueKind::Int)], vec![]),
            AstNode::function("main", vec![], vec![AstNode::call("helper", vec![AstNode::int(1)])]),
        ],
    );
    let output = compile(program);
    let helper = output.text.find(".globl\thelper").unwrap();
    let main = output.text.find(".globl\tmain").unwrap();
    assert!(helper < main);
    assert_eq!(output.stats.functions, 2);
}

#[test]
fn test_concurrent_generation_matches_sequential() {
    let programs: Vec<AstNode> = (0..8)
        .map(|n| {
            let body = (0..n).map(|_| AstNode::while_loop(AstNode::int(0), vec![increment("x")])).collect();
            main_with(&["x"], body)
        })
        .collect();
    let symbols = SymbolTable::from_program(&programs[0]).unwrap();
    let literals = LiteralPool::new();
    let generator = AsmGenerator::new();

    let sequential: Vec<String> = programs.iter().map(|p| generator.generate(p, &symbols, &literals).unwrap().text).collect();
    let concurrent: Vec<String> = std::thread::scope(|scope| {
        let (generator, symbols, literals) = (&generator, &symbols, &literals);
        let handles: Vec<_> = programs
            .iter()
            .map(|p| scope.spawn(move || generator.generate(p, symbols, literals).unwrap().text))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, concurrent);
}

#[test]
fn test_error_paths() {
    let generator = AsmGenerator::new();
    let literals = LiteralPool::new();

    let write = main_with(&[], vec![AstNode::assign("missing", AstNode::int(1))]);
    let err = generator.generate(&write, &SymbolTable::new(), &literals).unwrap_err();
    assert_eq!(err, CodegenError::UnresolvedReference { name: "missing".to_string() });
    assert_eq!(err.to_string(), "Undefined symbol: missing");

    let read = main_with(&[], vec![AstNode::call("f", vec![AstNode::var_ref("ghost")])]);
    let err = generator.generate(&read, &SymbolTable::new(), &literals).unwrap_err();
    assert_eq!(err, CodegenError::UnresolvedReference { name: "ghost".to_string() });

    let wide = main_with(&[], vec![AstNode::call("f", (1..=7).map(AstNode::int).collect())]);
    let err = generator.generate(&wide, &SymbolTable::new(), &literals).unwrap_err();
    assert!(matches!(err, CodegenError::TooManyArguments { count: 7, max: 6, .. }));

    let misplaced = main_with(&[], vec![AstNode::function("inner", vec![], vec![])]);
    let err = generator.generate(&misplaced, &SymbolTable::new(), &literals).unwrap_err();
    assert!(matches!(err, CodegenError::MalformedTree { context: "a statement", .. }));

    let limited = AsmGenerator::with_config(CodegenConfig {
        max_output_size: Some(64),
        ..CodegenConfig::default()
    })
    .unwrap();
    let err = limited.generate(&main_with(&[], vec![]), &SymbolTable::new(), &literals).unwrap_err();
    assert!(matches!(err, CodegenError::OutputSizeLimitExceeded { limit: 64, .. }));
}

#[test]
fn test_gcc_compatible_output_shape() {
    let mut program = main_with(&["x"], vec![AstNode::assign("x", AstNode::int(1))]);
    let mut literals = LiteralPool::new();
    literals.intern_tree(&mut program);
    let symbols = SymbolTable::from_program(&program).unwrap();
    let text = AsmGenerator::new().generate(&program, &symbols, &literals).unwrap().text;

    let expected = "\
\t.data
x:\t.long 0
\t.text
\t.section\t.rodata
\t.text
\t.globl\tmain
\t.type\tmain, @function
main:
\t.cfi_startproc
\tendbr64
\tpushq\t%rbp
\t.cfi_def_cfa_offset 16
\t.cfi_offset 6, -16
\tmovq\t%rsp, %rbp
\t.cfi_def_cfa_register 6
\tmovl\t$1, %eax
\tmovl\t%eax, x(%rip)
\tpopq\t%rbp
\t.cfi_def_cfa 7, 8
\tret
\t.cfi_endproc
\t.size\tmain, .-main
";
    assert_eq!(text, expected);
}

#[test]
fn test_labels_never_shadow_literals_or_each_other() {
    let config = CodegenConfig {
        label_prefix: ".LCx".to_string(),
        ..CodegenConfig::minimal()
    };
    let mut literals = LiteralPool::new();
    let calls = (0..11).map(|i| AstNode::call("puts", vec![AstNode::str(format!("line {i}"))])).collect();
    let mut program = main_with(&[], vec![AstNode::while_loop(AstNode::int(0), calls)]);
    literals.intern_tree(&mut program);
    let text = AsmGenerator::with_config(config).unwrap().generate(&program, &SymbolTable::new(), &literals).unwrap().text;

    let definitions: Vec<&str> = text.lines().filter_map(|line| line.split_once(':').map(|(name, _)| name)).collect();
    let mut unique = definitions.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), definitions.len(), "duplicate label in:\n{text}");
    assert!(definitions.contains(&".LC10"));
    assert!(definitions.contains(&".LCx0"));

    // `.LC1` would render label 0 as `.LC10`
    let clashing = CodegenConfig {
        label_prefix: ".LC1".to_string(),
        ..CodegenConfig::minimal()
    };
    assert!(matches!(AsmGenerator::with_config(clashing), Err(CodegenError::Configuration(_))));
}

#[test]
fn test_label_numbering_overflow_is_reported() {
    let generator = AsmGenerator::with_config(CodegenConfig {
        label_base: u32::MAX,
        ..CodegenConfig::minimal()
    })
    .unwrap();
    let program = main_with(&[], vec![AstNode::while_loop(AstNode::int(0), vec![])]);

    let err = generator.generate(&program, &SymbolTable::new(), &LiteralPool::new()).unwrap_err();
    assert_eq!(err, CodegenError::LabelSpaceExhausted { base: u32::MAX });
}
