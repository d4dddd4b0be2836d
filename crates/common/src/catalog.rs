//! The fixed instruction catalog.
//!
//! Table order defines opcode numbering: the opcode of an instruction is its
//! index in [`CATALOG`]. Compiler and executor share this numbering, so
//! entries are only ever appended, never reordered.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::numeric::BinaryOp;

/// Identifies an instruction in the catalog.
///
/// The `#[repr(u8)]` discriminant is the catalog index.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Opcode {
    // Assignment
    Set = 0,
    SetC = 1,

    // Arithmetic
    Add = 2,
    AddC = 3,
    AddRc = 4,
    Mul = 5,
    MulC = 6,
    MulRc = 7,
    Sub = 8,
    SubC = 9,
    SubRc = 10,
    Div = 11,
    DivC = 12,
    DivRc = 13,
    Mod = 14,
    ModC = 15,
    ModRc = 16,

    // Bitwise
    And = 17,
    AndC = 18,
    Or = 19,
    OrC = 20,
    Xor = 21,
    XorC = 22,
    Rev = 23,

    // Comparison
    Gt = 24,
    GtC = 25,
    GtRc = 26,
    Lt = 27,
    LtC = 28,
    LtRc = 29,
    Ge = 30,
    GeC = 31,
    GeRc = 32,
    Le = 33,
    LeC = 34,
    LeRc = 35,
    Eq = 36,
    EqC = 37,
    Neq = 38,
    NeqC = 39,

    // Indirection
    Read = 40,
    Write = 41,
    WriteC = 42,

    // Control flow
    Jmp = 43,
    JmpC = 44,
    Jcnz = 45,
}

/// Number of instructions in the catalog.
pub const CATALOG_SIZE: usize = 46;

/// All opcodes, in catalog order.
pub const ALL_OPCODES: [Opcode; CATALOG_SIZE] = [
    Opcode::Set,
    Opcode::SetC,
    Opcode::Add,
    Opcode::AddC,
    Opcode::AddRc,
    Opcode::Mul,
    Opcode::MulC,
    Opcode::MulRc,
    Opcode::Sub,
    Opcode::SubC,
    Opcode::SubRc,
    Opcode::Div,
    Opcode::DivC,
    Opcode::DivRc,
    Opcode::Mod,
    Opcode::ModC,
    Opcode::ModRc,
    Opcode::And,
    Opcode::AndC,
    Opcode::Or,
    Opcode::OrC,
    Opcode::Xor,
    Opcode::XorC,
    Opcode::Rev,
    Opcode::Gt,
    Opcode::GtC,
    Opcode::GtRc,
    Opcode::Lt,
    Opcode::LtC,
    Opcode::LtRc,
    Opcode::Ge,
    Opcode::GeC,
    Opcode::GeRc,
    Opcode::Le,
    Opcode::LeC,
    Opcode::LeRc,
    Opcode::Eq,
    Opcode::EqC,
    Opcode::Neq,
    Opcode::NeqC,
    Opcode::Read,
    Opcode::Write,
    Opcode::WriteC,
    Opcode::Jmp,
    Opcode::JmpC,
    Opcode::Jcnz,
];

/// How an operand is meant to be read. Documentation only: the compiler and
/// executor never check operand values against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandKind {
    /// A literal value.
    Constant,
    /// A memory address whose content is used.
    Address,
    /// A memory address holding another address.
    Pointer,
}

impl OperandKind {
    pub fn name(self) -> &'static str {
        match self {
            OperandKind::Constant => "constant",
            OperandKind::Address => "address",
            OperandKind::Pointer => "pointer",
        }
    }
}

/// Instruction families, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Assignment,
    Arithmetic,
    Bitwise,
    Comparison,
    Indirection,
    ControlFlow,
}

/// All groups, in catalog order.
pub const ALL_GROUPS: [Group; 6] = [
    Group::Assignment,
    Group::Arithmetic,
    Group::Bitwise,
    Group::Comparison,
    Group::Indirection,
    Group::ControlFlow,
];

impl Group {
    pub fn name(self) -> &'static str {
        match self {
            Group::Assignment => "assignment",
            Group::Arithmetic => "arithmetic",
            Group::Bitwise => "bitwise",
            Group::Comparison => "comparison",
            Group::Indirection => "indirection",
            Group::ControlFlow => "control flow",
        }
    }
}

/// Where the two inputs of a binary instruction come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Form {
    /// `op a b c`: both inputs are addresses.
    Addresses,
    /// `opc a b c`: `b` is a constant.
    ConstRight,
    /// `oprc a b c`: `a` is a constant.
    ConstLeft,
}

/// The transition an instruction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semantics {
    /// `[a] = [b]`
    CopyValue,
    /// `[a] = b`
    Assign,
    /// `[c] = lhs op rhs`, inputs chosen by the form.
    Binary(BinaryOp, Form),
    /// `[a] = ![a]`
    Invert,
    /// `[b] = [[a]]`
    Load,
    /// `[[a]] = [b]`
    Store,
    /// `[[a]] = b`
    StoreConst,
    /// jump to `[a]`
    Jump,
    /// jump to `a`
    JumpConst,
    /// jump to `a` if `[b] != 0`
    JumpIfNonZero,
}

/// Operand name and kind.
pub type OperandSpec = (&'static str, OperandKind);

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionInfo {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    pub group: Group,
    pub operands: &'static [OperandSpec],
    pub semantics: Semantics,
    /// One-line description with `{a}`-style operand placeholders.
    pub description: &'static str,
}

impl InstructionInfo {
    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}

use OperandKind::{Address, Constant, Pointer};

const A: &[OperandSpec] = &[("a", Address)];
const C: &[OperandSpec] = &[("a", Constant)];
const AA: &[OperandSpec] = &[("a", Address), ("b", Address)];
const AC: &[OperandSpec] = &[("a", Address), ("b", Constant)];
const PA: &[OperandSpec] = &[("a", Pointer), ("b", Address)];
const PC: &[OperandSpec] = &[("a", Pointer), ("b", Constant)];
const CA: &[OperandSpec] = &[("a", Constant), ("b", Address)];
const AAA: &[OperandSpec] = &[("a", Address), ("b", Address), ("c", Address)];
const ACA: &[OperandSpec] = &[("a", Address), ("b", Constant), ("c", Address)];
const CAA: &[OperandSpec] = &[("a", Constant), ("b", Address), ("c", Address)];

const fn entry(
    opcode: Opcode,
    mnemonic: &'static str,
    group: Group,
    operands: &'static [OperandSpec],
    semantics: Semantics,
    description: &'static str,
) -> InstructionInfo {
    InstructionInfo {
        opcode,
        mnemonic,
        group,
        operands,
        semantics,
        description,
    }
}

const fn binary(
    opcode: Opcode,
    mnemonic: &'static str,
    group: Group,
    op: BinaryOp,
    form: Form,
    description: &'static str,
) -> InstructionInfo {
    let operands = match form {
        Form::Addresses => AAA,
        Form::ConstRight => ACA,
        Form::ConstLeft => CAA,
    };
    entry(opcode, mnemonic, group, operands, Semantics::Binary(op, form), description)
}

use crate::numeric::BinaryOp as B;
use Form::{Addresses, ConstLeft, ConstRight};
use Group::{Arithmetic, Assignment, Bitwise, Comparison, ControlFlow, Indirection};

/// The catalog, indexed by opcode.
pub static CATALOG: [InstructionInfo; CATALOG_SIZE] = [
    entry(Opcode::Set, "set", Assignment, AA, Semantics::CopyValue, "set {a} to the value of {b}"),
    entry(Opcode::SetC, "setc", Assignment, AC, Semantics::Assign, "set {a} to {b}"),
    binary(Opcode::Add, "add", Arithmetic, B::Add, Addresses, "add {a} and {b}, store in {c}"),
    binary(Opcode::AddC, "addc", Arithmetic, B::Add, ConstRight, "add {a} and {b}, store in {c}"),
    binary(Opcode::AddRc, "addrc", Arithmetic, B::Add, ConstLeft, "add {a} and {b}, store in {c}"),
    binary(Opcode::Mul, "mul", Arithmetic, B::Mul, Addresses, "multiply {a} by {b}, store in {c}"),
    binary(Opcode::MulC, "mulc", Arithmetic, B::Mul, ConstRight, "multiply {a} by {b}, store in {c}"),
    binary(Opcode::MulRc, "mulrc", Arithmetic, B::Mul, ConstLeft, "multiply {a} by {b}, store in {c}"),
    binary(Opcode::Sub, "sub", Arithmetic, B::Sub, Addresses, "subtract {b} from {a}, store in {c}"),
    binary(Opcode::SubC, "subc", Arithmetic, B::Sub, ConstRight, "subtract {b} from {a}, store in {c}"),
    binary(Opcode::SubRc, "subrc", Arithmetic, B::Sub, ConstLeft, "subtract {b} from {a}, store in {c}"),
    binary(Opcode::Div, "div", Arithmetic, B::Div, Addresses, "divide {a} by {b}, store in {c}"),
    binary(Opcode::DivC, "divc", Arithmetic, B::Div, ConstRight, "divide {a} by {b}, store in {c}"),
    binary(Opcode::DivRc, "divrc", Arithmetic, B::Div, ConstLeft, "divide {a} by {b}, store in {c}"),
    binary(Opcode::Mod, "mod", Arithmetic, B::Mod, Addresses, "{a} modulo {b}, store in {c}"),
    binary(Opcode::ModC, "modc", Arithmetic, B::Mod, ConstRight, "{a} modulo {b}, store in {c}"),
    binary(Opcode::ModRc, "modrc", Arithmetic, B::Mod, ConstLeft, "{a} modulo {b}, store in {c}"),
    binary(Opcode::And, "and", Bitwise, B::And, Addresses, "bitwise and of {a} and {b}, store in {c}"),
    binary(Opcode::AndC, "andc", Bitwise, B::And, ConstRight, "bitwise and of {a} and {b}, store in {c}"),
    binary(Opcode::Or, "or", Bitwise, B::Or, Addresses, "bitwise or of {a} and {b}, store in {c}"),
    binary(Opcode::OrC, "orc", Bitwise, B::Or, ConstRight, "bitwise or of {a} and {b}, store in {c}"),
    binary(Opcode::Xor, "xor", Bitwise, B::Xor, Addresses, "bitwise xor of {a} and {b}, store in {c}"),
    binary(Opcode::XorC, "xorc", Bitwise, B::Xor, ConstRight, "bitwise xor of {a} and {b}, store in {c}"),
    entry(Opcode::Rev, "rev", Bitwise, A, Semantics::Invert, "invert every bit of {a}"),
    binary(Opcode::Gt, "gt", Comparison, B::Gt, Addresses, "store 1 in {c} if {a} > {b}, else 0"),
    binary(Opcode::GtC, "gtc", Comparison, B::Gt, ConstRight, "store 1 in {c} if {a} > {b}, else 0"),
    binary(Opcode::GtRc, "gtrc", Comparison, B::Gt, ConstLeft, "store 1 in {c} if {a} > {b}, else 0"),
    binary(Opcode::Lt, "lt", Comparison, B::Lt, Addresses, "store 1 in {c} if {a} < {b}, else 0"),
    binary(Opcode::LtC, "ltc", Comparison, B::Lt, ConstRight, "store 1 in {c} if {a} < {b}, else 0"),
    binary(Opcode::LtRc, "ltrc", Comparison, B::Lt, ConstLeft, "store 1 in {c} if {a} < {b}, else 0"),
    binary(Opcode::Ge, "ge", Comparison, B::Ge, Addresses, "store 1 in {c} if {a} >= {b}, else 0"),
    binary(Opcode::GeC, "gec", Comparison, B::Ge, ConstRight, "store 1 in {c} if {a} >= {b}, else 0"),
    binary(Opcode::GeRc, "gerc", Comparison, B::Ge, ConstLeft, "store 1 in {c} if {a} >= {b}, else 0"),
    binary(Opcode::Le, "le", Comparison, B::Le, Addresses, "store 1 in {c} if {a} <= {b}, else 0"),
    binary(Opcode::LeC, "lec", Comparison, B::Le, ConstRight, "store 1 in {c} if {a} <= {b}, else 0"),
    binary(Opcode::LeRc, "lerc", Comparison, B::Le, ConstLeft, "store 1 in {c} if {a} <= {b}, else 0"),
    binary(Opcode::Eq, "eq", Comparison, B::Eq, Addresses, "store 1 in {c} if {a} == {b}, else 0"),
    binary(Opcode::EqC, "eqc", Comparison, B::Eq, ConstRight, "store 1 in {c} if {a} == {b}, else 0"),
    binary(Opcode::Neq, "neq", Comparison, B::Neq, Addresses, "store 1 in {c} if {a} != {b}, else 0"),
    binary(Opcode::NeqC, "neqc", Comparison, B::Neq, ConstRight, "store 1 in {c} if {a} != {b}, else 0"),
    entry(Opcode::Read, "read", Indirection, PA, Semantics::Load, "read the cell {a} points to into {b}"),
    entry(Opcode::Write, "write", Indirection, PA, Semantics::Store, "write {b} into the cell {a} points to"),
    entry(Opcode::WriteC, "writec", Indirection, PC, Semantics::StoreConst, "write {b} into the cell {a} points to"),
    entry(Opcode::Jmp, "jmp", ControlFlow, A, Semantics::Jump, "jump to the statement index stored in {a}"),
    entry(Opcode::JmpC, "jmpc", ControlFlow, C, Semantics::JumpConst, "jump to statement {a}"),
    entry(Opcode::Jcnz, "jcnz", ControlFlow, CA, Semantics::JumpIfNonZero, "jump to statement {a} if {b} is not 0"),
];

fn mnemonic_index() -> &'static HashMap<&'static str, Opcode> {
    static INDEX: OnceLock<HashMap<&'static str, Opcode>> = OnceLock::new();
    INDEX.get_or_init(|| CATALOG.iter().map(|info| (info.mnemonic, info.opcode)).collect())
}

impl Opcode {
    /// Catalog entry for this opcode.
    pub fn info(self) -> &'static InstructionInfo {
        &CATALOG[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    pub fn arity(self) -> usize {
        self.info().arity()
    }

    pub fn group(self) -> Group {
        self.info().group
    }

    /// Look up an opcode by its exact, case-sensitive mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        mnemonic_index().get(mnemonic).copied()
    }
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_OPCODES
            .get(usize::from(value))
            .copied()
            .ok_or(DecodeError::UnknownOpcode(value))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Iterate the catalog entries belonging to `group`, in catalog order.
pub fn instructions_in(group: Group) -> impl Iterator<Item = &'static InstructionInfo> {
    CATALOG.iter().filter(move |info| info.group == group)
}
