//! Integration tests for the stepvm compiler.
//!
//! Tests cover:
//! - Source rules (comments, blank lines, whitespace, line endings)
//! - Error cases with their line numbers
//! - Every catalog mnemonic compiles at its declared arity
//! - Disassemble → compile roundtrip
//! - Compiled programs running on the executor

use proptest::prelude::*;
use stepvm_common::catalog::ALL_OPCODES;
use stepvm_common::{Opcode, Program, Statement};
use stepvm_compiler::{compile, disassemble, CompileError};
use stepvm_vm::{Executor, MemoryConfig, Step};

// ============================================================
// Helper functions
// ============================================================

fn st(op: Opcode, args: &[i32]) -> Statement {
    Statement::new(op, args).unwrap()
}

fn executor_for(text: &str) -> Executor {
    let mut exec = Executor::new(MemoryConfig::new(16, 8..12, 12..16).unwrap()).unwrap();
    exec.load_program(compile(text).unwrap());
    exec
}

// ============================================================
// Source rules
// ============================================================

#[test]
fn comments_and_blank_lines_are_skipped() {
    let text = "# header\n\nsetc 0 1\n   # indented comment\n\t\nrev 0\n";
    let program = compile(text).unwrap();
    assert_eq!(
        program,
        Program::new(vec![st(Opcode::SetC, &[0, 1]), st(Opcode::Rev, &[0])])
    );
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let program = compile("   add   0  1\t2   \n").unwrap();
    assert_eq!(program.statements(), &[st(Opcode::Add, &[0, 1, 2])]);
}

#[test]
fn crlf_line_endings() {
    let program = compile("setc 0 1\r\nsetc 1 2\r\n").unwrap();
    assert_eq!(program.len(), 2);
}

#[test]
fn negative_operands() {
    let program = compile("subrc -5 0 1\njmpc -1\n").unwrap();
    assert_eq!(program.statements()[0].operands(), &[-5, 0, 1]);
    assert_eq!(program.statements()[1].operands(), &[-1]);
}

#[test]
fn extreme_operands() {
    let program = compile("setc 0 -2147483648\nsetc 1 2147483647\n").unwrap();
    assert_eq!(program.statements()[0].operands(), &[0, i32::MIN]);
    assert_eq!(program.statements()[1].operands(), &[1, i32::MAX]);
}

#[test]
fn jump_targets_are_not_range_checked() {
    assert!(compile("jmpc 1000\n").is_ok());
}

#[test]
fn every_mnemonic_compiles_at_its_arity() {
    for &op in ALL_OPCODES.iter() {
        let operands: Vec<String> = (0..op.arity()).map(|i| i.to_string()).collect();
        let line = format!("{} {}", op.mnemonic(), operands.join(" "));
        let program = compile(&line).unwrap();
        assert_eq!(program.statements()[0].opcode(), op, "{line}");
    }
}

// ============================================================
// Errors
// ============================================================

#[test]
fn unknown_instruction_line_one() {
    assert_eq!(
        compile("addx 1 2"),
        Err(CompileError::UnknownInstruction {
            line: 1,
            token: "addx".to_string()
        })
    );
}

#[test]
fn arity_mismatch_line_one() {
    assert_eq!(
        compile("set 1"),
        Err(CompileError::ArityMismatch {
            line: 1,
            mnemonic: "set",
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn bare_mnemonic_is_malformed_operand() {
    for text in ["set", "jmpc"] {
        assert_eq!(
            compile(text),
            Err(CompileError::MalformedOperand {
                line: 1,
                token: String::new()
            }),
            "{text}"
        );
    }
}

#[test]
fn bare_mnemonic_reported_on_its_line() {
    assert!(matches!(
        compile("setc 0 1\n\nrev\n"),
        Err(CompileError::MalformedOperand { line: 3, .. })
    ));
}

#[test]
fn only_comments_is_empty_program() {
    assert_eq!(
        compile("# only comments\n\n"),
        Err(CompileError::EmptyProgram)
    );
}

#[test]
fn line_numbers_count_skipped_lines() {
    let text = "# comment\n\nsetc 0 1\n\nmul 0 1\n";
    assert_eq!(
        compile(text),
        Err(CompileError::ArityMismatch {
            line: 5,
            mnemonic: "mul",
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn malformed_operand_is_reported() {
    assert_eq!(
        compile("setc 0 1\nsetc 0 1.5\n"),
        Err(CompileError::MalformedOperand {
            line: 2,
            token: "1.5".to_string()
        })
    );
}

#[test]
fn trailing_comment_is_not_allowed() {
    assert_eq!(
        compile("jmpc 0 # forever"),
        Err(CompileError::MalformedOperand {
            line: 1,
            token: "#".to_string()
        })
    );
}

#[test]
fn operand_overflow_is_malformed() {
    assert!(matches!(
        compile("setc 0 99999999999"),
        Err(CompileError::MalformedOperand { line: 1, .. })
    ));
}

#[test]
fn error_message_names_line() {
    let err = compile("setc 0 1\nbogus\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: unknown instruction 'bogus'");
}

// ============================================================
// Roundtrip
// ============================================================

#[test]
fn disassemble_is_canonical() {
    let program = compile("  setc  0   -3 \n# c\nrev 0").unwrap();
    assert_eq!(disassemble(&program), "setc 0 -3\nrev 0\n");
}

fn arb_statement() -> impl Strategy<Value = Statement> {
    (0..ALL_OPCODES.len(), prop::collection::vec(any::<i32>(), 3)).prop_map(|(idx, args)| {
        let op = ALL_OPCODES[idx];
        Statement::new(op, &args[..op.arity()]).unwrap()
    })
}

proptest! {
    #[test]
    fn disassemble_then_compile_roundtrips(
        stmts in prop::collection::vec(arb_statement(), 1..20),
    ) {
        let program = Program::new(stmts);
        let text = disassemble(&program);
        prop_assert_eq!(compile(&text).unwrap(), program);
    }
}

// ============================================================
// Running compiled programs
// ============================================================

#[test]
fn add_then_loop_program() {
    let mut exec = executor_for("setc 0 5\nsetc 1 3\nadd 0 1 2\njmpc 3\n");
    for _ in 0..3 {
        assert_eq!(exec.step_in(), Step::Executed);
    }
    assert_eq!(&exec.memory()[..3], &[5, 3, 8]);
    assert_eq!(exec.counter(), 3);
    assert_eq!(exec.step_in(), Step::Executed);
    assert_eq!(exec.counter(), 3);
    assert_eq!(exec.history().len(), 4);
}

#[test]
fn countdown_loop() {
    let text = "\
# count cell 0 down from 3, bumping cell 1 each pass
setc 0 3
addc 1 1 1
subc 0 1 0
jcnz 1 0
";
    let mut exec = executor_for(text);
    let outcome = exec.run(100);
    assert!(outcome.halted);
    assert_eq!(&exec.memory()[..2], &[0, 3]);
    assert_eq!(exec.counter(), 4);
}

#[test]
fn echo_input_to_output() {
    let text = "\
set 12 8
set 13 9
";
    let mut exec = executor_for(text);
    exec.set_input_text("hi");
    exec.run(10);
    assert_eq!(exec.output_text(), "hi\0\0");
}
