//! Decoded instruction representation.
//!
//! Instructions are produced once by the loader and are read-only afterwards.
//! Each belongs to one of five operand-shape classes, which fixes how many
//! operands it takes and how the decode stage resolves them.

use std::fmt;
use std::str::FromStr;

/// The ten supported mnemonics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// `add rd, rs, rt`
    Add,
    /// `sub rd, rs, rt`
    Sub,
    /// `mul rd, rs, rt`
    Mul,
    /// `slt rd, rs, rt` (signed less-than)
    Slt,
    /// `addi rt, rs, imm`
    Addi,
    /// `beq rs, rt, label`
    Beq,
    /// `bne rs, rt, label`
    Bne,
    /// `j label`
    J,
    /// `lw rt, address`
    Lw,
    /// `sw rt, address`
    Sw,
}

impl Mnemonic {
    /// Every supported mnemonic.
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Slt,
        Self::Addi,
        Self::Beq,
        Self::Bne,
        Self::J,
        Self::Lw,
        Self::Sw,
    ];

    /// Assembly spelling of the mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Slt => "slt",
            Self::Addi => "addi",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::J => "j",
            Self::Lw => "lw",
            Self::Sw => "sw",
        }
    }

    /// Operand-shape class of the mnemonic.
    pub const fn class(self) -> InstClass {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Slt => InstClass::ArithReg,
            Self::Addi => InstClass::ArithImm,
            Self::Beq | Self::Bne => InstClass::Branch,
            Self::J => InstClass::Jump,
            Self::Lw | Self::Sw => InstClass::Memory,
        }
    }

    /// Returns true for the conditional branches.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self, Self::Beq | Self::Bne)
    }
}

impl FromStr for Mnemonic {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.name() == s).ok_or(())
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand-shape class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstClass {
    /// Three register operands (add/sub/mul/slt).
    ArithReg,
    /// Two registers and a literal (addi).
    ArithImm,
    /// Two registers and a label (beq/bne).
    Branch,
    /// A register and a memory address expression (lw/sw).
    Memory,
    /// A single label (j).
    Jump,
}

impl InstClass {
    /// Number of operand tokens an instruction of this class takes.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::ArithReg | Self::ArithImm | Self::Branch => 3,
            Self::Memory => 2,
            Self::Jump => 1,
        }
    }
}

/// Memory operand of a load or store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    /// A literal byte address, already validated by the loader.
    Literal(i64),
    /// `offset(base)`; the offset text is parsed when the instruction is decoded.
    BaseOffset {
        /// Base register index.
        base: usize,
        /// Offset literal as written (empty means zero).
        offset: String,
    },
}

/// Resolved operands, one shape per class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operands {
    /// `rd <- rs op rt`
    ArithReg {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs: usize,
        /// Second source register.
        rt: usize,
    },
    /// `rt <- rs + imm`
    ArithImm {
        /// Destination register.
        rt: usize,
        /// Source register.
        rs: usize,
        /// Immediate operand.
        imm: i32,
    },
    /// Conditional branch comparing `rs` and `rt`.
    Branch {
        /// First compared register.
        rs: usize,
        /// Second compared register.
        rt: usize,
        /// Target label name.
        label: String,
    },
    /// Load destination or store source plus address.
    Memory {
        /// Loaded register (lw) or stored register (sw).
        rt: usize,
        /// Address expression.
        address: Address,
    },
    /// Unconditional jump.
    Jump {
        /// Target label name.
        label: String,
    },
}

/// One instruction of the program store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub mnemonic: Mnemonic,
    /// Resolved operand fields.
    pub operands: Operands,
    /// Source tokens (label stripped), kept for diagnostics.
    pub tokens: Vec<String>,
}

impl Instruction {
    /// Register this instruction writes, if any.
    pub fn dest(&self) -> Option<usize> {
        match self.operands {
            Operands::ArithReg { rd, .. } => Some(rd),
            Operands::ArithImm { rt, .. } => Some(rt),
            Operands::Memory { rt, .. } if self.mnemonic == Mnemonic::Lw => Some(rt),
            _ => None,
        }
    }

    /// Label this instruction transfers control to, if any.
    pub fn label(&self) -> Option<&str> {
        match &self.operands {
            Operands::Branch { label, .. } | Operands::Jump { label } => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Parses a decimal integer literal.
///
/// ```
/// use mipsim_core::isa::instruction::parse_literal;
///
/// assert_eq!(parse_literal("-12"), Some(-12));
/// assert_eq!(parse_literal("0x10"), None);
/// ```
pub fn parse_literal(token: &str) -> Option<i32> {
    token.parse().ok()
}
