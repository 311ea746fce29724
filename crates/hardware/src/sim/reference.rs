//! Non-pipelined reference interpreter.
//!
//! Executes a program one instruction at a time with no overlap, so its final
//! registers and memory are what any correct pipeline must reproduce. It shares
//! the ALU, register file and memory model with the pipeline, and checks labels
//! and addresses the same way decode does.

use crate::common::error::SimError;
use crate::core::arch::gpr::Gpr;
use crate::core::cpu::memory::{DataMemory, data_word_index};
use crate::core::units::alu::Alu;
use crate::isa::instruction::parse_literal;
use crate::isa::{Address, Instruction, Mnemonic, Operands};
use crate::sim::program::Program;

/// Sequential interpreter over a loaded program.
#[derive(Debug)]
pub struct ReferenceInterpreter<'a> {
    program: &'a Program,
    regs: Gpr,
    memory: DataMemory,
    memory_bytes: usize,
    pc: usize,
    steps: u64,
}

impl<'a> ReferenceInterpreter<'a> {
    /// Creates an interpreter with zeroed registers and memory.
    pub fn new(program: &'a Program, memory_bytes: usize) -> Self {
        Self {
            program,
            regs: Gpr::new(),
            memory: DataMemory::new(memory_bytes),
            memory_bytes,
            pc: 0,
            steps: 0,
        }
    }

    /// Registers.
    pub const fn regs(&self) -> &Gpr {
        &self.regs
    }

    /// Data memory.
    pub const fn memory(&self) -> &DataMemory {
        &self.memory
    }

    /// Index of the next instruction to execute.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Instructions executed so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Executes until the program falls off its end or `max_steps` instructions ran.
    ///
    /// Returns `true` if the program finished.
    ///
    /// # Errors
    ///
    /// Returns the same error categories the pipeline raises at decode.
    pub fn run(&mut self, max_steps: u64) -> Result<bool, SimError> {
        while self.pc < self.program.len() {
            if self.steps >= max_steps {
                return Ok(false);
            }
            self.step()?;
        }
        Ok(true)
    }

    fn step(&mut self) -> Result<(), SimError> {
        let program = self.program;
        let Some(inst) = program.get(self.pc) else {
            return Ok(());
        };
        self.steps += 1;
        let mut next = self.pc + 1;

        match &inst.operands {
            Operands::ArithReg { rd, rs, rt } => {
                let value = Alu::execute(inst.mnemonic, self.regs.read(*rs), self.regs.read(*rt));
                self.regs.write(*rd, value);
            }
            Operands::ArithImm { rt, rs, imm } => {
                let value = Alu::execute(inst.mnemonic, self.regs.read(*rs), *imm);
                self.regs.write(*rt, value);
            }
            Operands::Branch { rs, rt, label } => {
                let target = self.label(inst, label)?;
                if Alu::execute(inst.mnemonic, self.regs.read(*rs), self.regs.read(*rt)) == 0 {
                    next = target;
                }
            }
            Operands::Jump { label } => next = self.label(inst, label)?,
            Operands::Memory { rt, address } => {
                let word = self.word(inst, address)?;
                let fault = || SimError::InvalidAddress {
                    tokens: inst.tokens.clone(),
                };
                if inst.mnemonic == Mnemonic::Lw {
                    let value = self.memory.read(word).ok_or_else(fault)?;
                    self.regs.write(*rt, value);
                } else {
                    self.memory
                        .write(word, self.regs.read(*rt))
                        .ok_or_else(fault)?;
                }
            }
        }

        self.pc = next;
        Ok(())
    }

    fn label(&self, inst: &Instruction, label: &str) -> Result<usize, SimError> {
        self.program
            .resolve_label(label)
            .ok_or_else(|| SimError::InvalidLabel {
                tokens: inst.tokens.clone(),
            })
    }

    fn word(&self, inst: &Instruction, address: &Address) -> Result<usize, SimError> {
        let addr = match address {
            Address::Literal(addr) => *addr,
            Address::BaseOffset { base, offset } => {
                let offset = if offset.is_empty() {
                    0
                } else {
                    parse_literal(offset).ok_or_else(|| SimError::Syntax {
                        tokens: inst.tokens.clone(),
                    })?
                };
                i64::from(self.regs.read(*base)) + i64::from(offset)
            }
        };
        data_word_index(addr, self.program.len(), self.memory_bytes).ok_or_else(|| {
            SimError::InvalidAddress {
                tokens: inst.tokens.clone(),
            }
        })
    }
}
