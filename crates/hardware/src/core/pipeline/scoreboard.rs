//! Sequence-number scoreboard for register dependency tracking and forwarding.
//!
//! Every fetched instruction receives a fresh sequence number. The scoreboard
//! maps each architectural register to the sequence number of its latest
//! in-flight producer, and each in-flight sequence number to its pending
//! result, completion flag and program index. Forwarding is a lookup by
//! producer identity, so it does not depend on how many stages separate a
//! producer from its consumer.
//!
//! A separate reserved slot tracks the one outstanding control transfer
//! (branch or jump) that fetch must wait on under the stall policy.

use std::collections::BTreeMap;
use std::fmt;

use crate::common::constants::NUM_REGISTERS;
use crate::isa::abi::REG_ZERO;

/// Opaque identifier of an in-flight instruction, increasing in fetch order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(pub u64);

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bookkeeping for one in-flight instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// Program index the instruction was fetched from.
    pub index: usize,
    /// Register the instruction will write, once decoded.
    pub dest: Option<usize>,
    /// Pending result, available for forwarding before commit.
    pub result: Option<i32>,
    /// Set once the instruction has done its last architecturally visible work.
    pub completed: bool,
}

/// Where a source operand's value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Read from the committed register file.
    Committed(i32),
    /// Forwarded from an in-flight producer's pending-result slot.
    Forwarded {
        /// Producing instruction.
        producer: Seq,
        /// Forwarded value.
        value: i32,
    },
    /// The producer has not computed its result yet.
    Pending(Seq),
}

impl Operand {
    /// The operand value, if it can be determined this cycle.
    pub const fn value(self) -> Option<i32> {
        match self {
            Self::Committed(value) | Self::Forwarded { value, .. } => Some(value),
            Self::Pending(_) => None,
        }
    }
}

/// Scoreboard / forwarding table.
#[derive(Clone, Debug)]
pub struct Scoreboard {
    /// Latest in-flight writer per register (`$zero` is always `None`).
    producers: [Option<Seq>; NUM_REGISTERS],
    /// Outstanding control transfer, if any.
    control: Option<Seq>,
    /// Per-sequence-number state, ordered oldest first.
    in_flight: BTreeMap<Seq, InFlight>,
    next: u64,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Creates an empty scoreboard. The first allocated sequence number is 1.
    pub fn new() -> Self {
        Self {
            producers: [None; NUM_REGISTERS],
            control: None,
            in_flight: BTreeMap::new(),
            next: 1,
        }
    }

    /// Allocates the next sequence number for an instruction fetched from `index`.
    pub fn allocate(&mut self, index: usize) -> Seq {
        let seq = Seq(self.next);
        self.next += 1;
        let _ = self.in_flight.insert(
            seq,
            InFlight {
                index,
                dest: None,
                result: None,
                completed: false,
            },
        );
        seq
    }

    /// State of an in-flight instruction.
    pub fn entry(&self, seq: Seq) -> Option<&InFlight> {
        self.in_flight.get(&seq)
    }

    /// Number of in-flight instructions.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Records `seq` as the latest writer of `reg`. No-op for `$zero`.
    pub fn set_producer(&mut self, reg: usize, seq: Seq) {
        if reg == REG_ZERO || reg >= NUM_REGISTERS {
            return;
        }
        self.producers[reg] = Some(seq);
        if let Some(entry) = self.in_flight.get_mut(&seq) {
            entry.dest = Some(reg);
        }
    }

    /// Latest in-flight writer of `reg`, or `None` if the register file is current.
    pub fn producer(&self, reg: usize) -> Option<Seq> {
        self.producers.get(reg).copied().flatten()
    }

    /// Resolves a source register: pending-result slot of its producer if one is
    /// in flight, else the committed value.
    pub fn read(&self, reg: usize, committed: i32) -> Operand {
        let Some(producer) = self.producer(reg) else {
            return Operand::Committed(committed);
        };
        match self.in_flight.get(&producer).and_then(|e| e.result) {
            Some(value) => Operand::Forwarded { producer, value },
            None if self.in_flight.contains_key(&producer) => Operand::Pending(producer),
            None => Operand::Committed(committed),
        }
    }

    /// Fills the pending-result slot of `seq`.
    pub fn publish(&mut self, seq: Seq, value: i32) {
        if let Some(entry) = self.in_flight.get_mut(&seq) {
            entry.result = Some(value);
        }
    }

    /// Sets the completion flag of `seq`.
    pub fn complete(&mut self, seq: Seq) {
        if let Some(entry) = self.in_flight.get_mut(&seq) {
            entry.completed = true;
        }
    }

    /// True if `seq` has completed or is no longer in flight.
    pub fn is_complete(&self, seq: Seq) -> bool {
        self.in_flight.get(&seq).is_none_or(|e| e.completed)
    }

    /// Registers `seq` as the outstanding control transfer.
    pub const fn set_control(&mut self, seq: Seq) {
        self.control = Some(seq);
    }

    /// The outstanding control transfer, if any.
    pub const fn control(&self) -> Option<Seq> {
        self.control
    }

    /// True while a registered control transfer has not completed.
    pub fn control_pending(&self) -> bool {
        self.control.is_some_and(|seq| !self.is_complete(seq))
    }

    /// Commits `seq` at writeback.
    ///
    /// Clears every register whose latest producer is exactly `seq` (a
    /// younger writer keeps its claim) and drops the control marker if it
    /// names `seq`. The entry is forgotten, so it reads as complete.
    pub fn retire(&mut self, seq: Seq) {
        for slot in &mut self.producers {
            if *slot == Some(seq) {
                *slot = None;
            }
        }
        if self.control == Some(seq) {
            self.control = None;
        }
        let _ = self.in_flight.remove(&seq);
    }

    /// Discards every instruction younger than `seq`.
    ///
    /// Used on a branch misprediction. Surviving entries are walked oldest
    /// first to rebuild the producer table so the latest surviving writer of
    /// each register wins. Returns the number of discarded instructions.
    pub fn squash_younger(&mut self, seq: Seq) -> usize {
        let squashed = self.in_flight.split_off(&Seq(seq.0 + 1)).len();
        if self.control.is_some_and(|c| c > seq) {
            self.control = None;
        }
        self.producers = [None; NUM_REGISTERS];
        for (&tag, entry) in &self.in_flight {
            if let Some(reg) = entry.dest {
                self.producers[reg] = Some(tag);
            }
        }
        squashed
    }
}
