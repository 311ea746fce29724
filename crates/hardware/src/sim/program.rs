//! Program store: the decoded instruction list and its label table.

use std::collections::HashMap;

use crate::common::constants::WORD_BYTES;
use crate::isa::Instruction;

/// Decoded program, immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    /// Label name to instruction index; `None` marks a label defined more than once.
    labels: HashMap<String, Option<usize>>,
}

impl Program {
    /// Builds a program from decoded instructions and a label table.
    pub const fn new(
        instructions: Vec<Instruction>,
        labels: HashMap<String, Option<usize>>,
    ) -> Self {
        Self {
            instructions,
            labels,
        }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at a program index.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Resolves a label to the index of the instruction it precedes.
    ///
    /// Returns `None` if the label was never defined or was defined more than once.
    pub fn resolve_label(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied().flatten()
    }

    /// Bytes occupied by the program itself; data addresses start here.
    pub fn footprint_bytes(&self) -> usize {
        self.instructions.len() * WORD_BYTES
    }
}
