//! Error taxonomy and process exit codes.
//!
//! This module defines every way a simulation run can fail. It provides:
//! 1. **Run Errors:** `SimError`, one variant per diagnostic category, each carrying
//!    the source tokens of the offending instruction.
//! 2. **Exit Codes:** `ExitCode`, the numeric status a front end returns per category.
//! 3. **Host Errors:** `ConfigError` and `TraceError` for failures outside the
//!    simulated program (bad configuration, malformed branch traces).

use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Numeric process status returned for each outcome category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// The program ran to completion.
    Success = 0,
    /// A register token was not recognized.
    InvalidRegister = 1,
    /// A label was used but never defined, or defined more than once.
    InvalidLabel = 2,
    /// A data address was unaligned or outside the data segment.
    InvalidAddress = 3,
    /// An instruction or literal was malformed.
    SyntaxError = 4,
    /// The program does not fit in instruction memory.
    MemoryLimit = 5,
    /// The host environment failed (unreadable input, bad configuration, broken output).
    Host = 6,
}

impl ExitCode {
    /// Returns the raw status value handed to the operating system.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A fatal simulation error.
///
/// All categories are fatal: the run halts at the point of detection and no
/// further cycle reports are produced.
#[derive(Debug, Error)]
pub enum SimError {
    /// A register operand is not one of the architectural register names.
    #[error("Invalid register provided or syntax error in providing register")]
    InvalidRegister {
        /// Tokens of the offending instruction.
        tokens: Vec<String>,
    },

    /// A label is undefined, or was defined more than once.
    #[error("Label used not defined or defined too many times")]
    InvalidLabel {
        /// Tokens of the offending instruction.
        tokens: Vec<String>,
    },

    /// A data address is unaligned, inside the program footprint, or past the memory bound.
    #[error("Unaligned or invalid memory address specified")]
    InvalidAddress {
        /// Tokens of the offending instruction.
        tokens: Vec<String>,
    },

    /// Malformed instruction: unknown mnemonic, wrong operand count or a bad literal.
    #[error("Syntax error encountered")]
    Syntax {
        /// Tokens of the offending instruction.
        tokens: Vec<String>,
    },

    /// The program has at least as many instructions as memory has words.
    #[error("Memory limit exceeded")]
    MemoryLimit {
        /// Number of instructions in the rejected program.
        instructions: usize,
        /// Tokens of the first instruction, where execution would have started.
        tokens: Vec<String>,
    },

    /// The program source could not be read.
    #[error("failed to read program '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A cycle report could not be delivered to its sink.
    #[error("failed to write cycle report: {0}")]
    Report(#[from] io::Error),
}

impl SimError {
    /// Returns the exit code for this error's category.
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidRegister { .. } => ExitCode::InvalidRegister,
            Self::InvalidLabel { .. } => ExitCode::InvalidLabel,
            Self::InvalidAddress { .. } => ExitCode::InvalidAddress,
            Self::Syntax { .. } => ExitCode::SyntaxError,
            Self::MemoryLimit { .. } => ExitCode::MemoryLimit,
            Self::Io { .. } | Self::Report(_) => ExitCode::Host,
        }
    }

    /// Returns the tokens of the instruction that caused the error, if any.
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::InvalidRegister { tokens }
            | Self::InvalidLabel { tokens }
            | Self::InvalidAddress { tokens }
            | Self::Syntax { tokens }
            | Self::MemoryLimit { tokens, .. } => tokens,
            Self::Io { .. } | Self::Report(_) => &[],
        }
    }

    /// Renders the diagnostic printed on failure.
    ///
    /// The category message is followed by `Error encountered at:` and the
    /// offending tokens, each followed by a single space.
    ///
    /// ```
    /// use mipsim_core::common::error::SimError;
    ///
    /// let err = SimError::Syntax { tokens: vec!["addi".into(), "$t0".into(), "x".into()] };
    /// assert_eq!(
    ///     err.diagnostic(),
    ///     "Syntax error encountered\nError encountered at:\naddi $t0 x \n"
    /// );
    /// ```
    pub fn diagnostic(&self) -> String {
        let mut out = format!("{self}\n");
        if matches!(self, Self::Io { .. } | Self::Report(_)) {
            return out;
        }
        out.push_str("Error encountered at:\n");
        for token in self.tokens() {
            let _ = write!(out, "{token} ");
        }
        out.push('\n');
        out
    }
}

/// Invalid simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Memory size is zero or not a whole number of words.
    #[error("memory size {0} must be a nonzero multiple of 4 bytes")]
    MemorySize(usize),

    /// Initial predictor counter value does not fit in two bits.
    #[error("initial counter value {0} is outside the 2-bit range 0..=3")]
    InitialCounter(u8),

    /// Combined predictor table exceeds the addressable index range.
    #[error("combined predictor table of {size} entries exceeds the maximum of 65536")]
    TableTooLarge {
        /// Requested table size.
        size: usize,
    },

    /// Combined predictor table has no entries.
    #[error("combined predictor table must have at least one entry")]
    EmptyTable,

    /// Configuration JSON could not be decoded.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A malformed line in a branch trace.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct TraceError {
    /// 1-based line number in the trace.
    pub line: usize,
    /// What was wrong with the line.
    pub reason: String,
}
