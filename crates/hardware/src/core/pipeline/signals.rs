//! Pipeline control signals and the control decoder.
//!
//! This module defines the nine control bits that steer an instruction through
//! the datapath. It performs:
//! 1. **Operation Classification:** The 2-bit ALUOp field selecting address, compare or
//!    function-field arithmetic.
//! 2. **Operand Selection:** Register-destination and ALU-source selects.
//! 3. **Memory Control:** Read, write and memory-to-register selects.
//! 4. **Decoding:** A pure mapping from mnemonic to signals.

use crate::isa::{InstClass, Mnemonic};

/// The 2-bit ALUOp field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `00`: address arithmetic (loads, stores, immediate add, jump).
    #[default]
    Add = 0b00,
    /// `01`: subtract-and-test for branches.
    Compare = 0b01,
    /// `10`: operation chosen by the function field (register arithmetic).
    Function = 0b10,
}

/// Control signals for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlSignals {
    /// Destination comes from the `rd` field rather than `rt`.
    pub reg_dst: bool,
    /// ALU operation class.
    pub alu_op: AluOp,
    /// Second ALU operand is the immediate rather than the second register.
    pub alu_src: bool,
    /// Branch or jump; a PC correction may occur when it completes.
    pub branch: bool,
    /// Reads data memory.
    pub mem_read: bool,
    /// Writes data memory.
    pub mem_write: bool,
    /// Writes the register file.
    pub reg_write: bool,
    /// Register write data comes from memory rather than the ALU.
    pub mem_to_reg: bool,
}

impl ControlSignals {
    /// Control decoder: the fixed signals for a mnemonic.
    ///
    /// The mapping is a pure function of the mnemonic's class, so identical
    /// mnemonics always yield identical signals.
    ///
    /// ```
    /// use mipsim_core::core::pipeline::signals::ControlSignals;
    /// use mipsim_core::isa::Mnemonic;
    ///
    /// let lw = ControlSignals::decode(Mnemonic::Lw);
    /// assert!(lw.mem_read && lw.reg_write && lw.mem_to_reg);
    /// assert_eq!(lw.bits(), 0b0_00_1_0_1_0_1_1);
    /// ```
    pub const fn decode(mnemonic: Mnemonic) -> Self {
        let off = Self {
            reg_dst: false,
            alu_op: AluOp::Add,
            alu_src: false,
            branch: false,
            mem_read: false,
            mem_write: false,
            reg_write: false,
            mem_to_reg: false,
        };
        match mnemonic.class() {
            InstClass::ArithReg => Self {
                reg_dst: true,
                alu_op: AluOp::Function,
                reg_write: true,
                ..off
            },
            InstClass::ArithImm => Self {
                alu_src: true,
                reg_write: true,
                ..off
            },
            InstClass::Memory => match mnemonic {
                Mnemonic::Lw => Self {
                    alu_src: true,
                    mem_read: true,
                    reg_write: true,
                    mem_to_reg: true,
                    ..off
                },
                _ => Self {
                    alu_src: true,
                    mem_write: true,
                    ..off
                },
            },
            InstClass::Branch => Self {
                alu_op: AluOp::Compare,
                branch: true,
                ..off
            },
            InstClass::Jump => Self {
                branch: true,
                ..off
            },
        }
    }

    /// Packs the signals MSB-first as
    /// `RegDst ALUOp1 ALUOp0 ALUSrc Branch MemRead MemWrite RegWrite MemToReg`.
    pub const fn bits(self) -> u16 {
        ((self.reg_dst as u16) << 8)
            | ((self.alu_op as u16) << 6)
            | ((self.alu_src as u16) << 5)
            | ((self.branch as u16) << 4)
            | ((self.mem_read as u16) << 3)
            | ((self.mem_write as u16) << 2)
            | ((self.reg_write as u16) << 1)
            | (self.mem_to_reg as u16)
    }
}
