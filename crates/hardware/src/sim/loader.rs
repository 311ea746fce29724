//! Program Loader.
//!
//! Turns assembly source text into a [`Program`]. It performs:
//! 1. **Tokenizing:** Strips `#` comments and splits on spaces, tabs and commas.
//! 2. **Label collection:** Records `label:` definitions in every accepted spelling;
//!    a label defined twice is poisoned so any later use fails at decode.
//! 3. **Validation:** Rejects unknown mnemonics, wrong operand counts, bad register
//!    names, non-numeric immediates and out-of-range literal addresses.
//! 4. **Capacity check:** Rejects programs that do not fit in instruction memory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::common::constants::WORD_BYTES;
use crate::common::error::SimError;
use crate::core::cpu::memory::data_word_index;
use crate::isa::abi::register_index;
use crate::isa::instruction::parse_literal;
use crate::isa::{Address, InstClass, Instruction, Mnemonic, Operands};
use crate::sim::program::Program;

/// Most tokens an instruction line keeps; extra tokens are folded into the last one.
const MAX_TOKENS: usize = 4;

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Assembly source file.
/// * `memory_bytes` - Size of the data memory the program will run against.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, otherwise any error
/// from [`parse_program`].
pub fn load_program(path: impl AsRef<Path>, memory_bytes: usize) -> Result<Program, SimError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&source, memory_bytes)
}

/// Parses assembly source into a program.
///
/// # Errors
///
/// Returns [`SimError::MemoryLimit`] when the program has at least
/// `memory_bytes / 4` instructions (naming the first instruction), or the
/// first validation error found, in source order.
///
/// ```
/// use mipsim_core::sim::loader::parse_program;
///
/// let program = parse_program("start: addi $t0, $zero, 5\n  j start # loop\n", 1 << 20).unwrap();
/// assert_eq!(program.len(), 2);
/// assert_eq!(program.resolve_label("start"), Some(0));
/// ```
pub fn parse_program(source: &str, memory_bytes: usize) -> Result<Program, SimError> {
    let mut labels: HashMap<String, Option<usize>> = HashMap::new();
    let mut lines: Vec<Vec<String>> = Vec::new();

    for line in source.lines() {
        let mut tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        if let Some(label) = split_label(&mut tokens) {
            let index = lines.len();
            let _ = labels
                .entry(label)
                .and_modify(|slot| *slot = None)
                .or_insert(Some(index));
        }
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() > MAX_TOKENS {
            let tail = tokens.split_off(MAX_TOKENS - 1).join(" ");
            tokens.push(tail);
        }
        lines.push(tokens);
    }

    if lines.len() >= memory_bytes / WORD_BYTES {
        return Err(SimError::MemoryLimit {
            instructions: lines.len(),
            tokens: lines.first().cloned().unwrap_or_default(),
        });
    }

    let program_len = lines.len();
    let instructions = lines
        .into_iter()
        .map(|tokens| parse_instruction(tokens, program_len, memory_bytes))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Program::new(instructions, labels))
}

/// Strips the comment and splits a line into tokens.
fn tokenize(line: &str) -> Vec<String> {
    let code = line.split('#').next().unwrap_or_default();
    code.split([',', ' ', '\t', '\r'])
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Removes a leading label definition from the tokens and returns its name.
///
/// Accepts `label:`, `label:inst`, `label :inst` and `label : inst`.
fn split_label(tokens: &mut Vec<String>) -> Option<String> {
    let first = tokens.first()?;
    if let Some(label) = first.strip_suffix(':') {
        let label = label.to_owned();
        let _ = tokens.remove(0);
        return Some(label);
    }
    if let Some((label, rest)) = first.split_once(':') {
        let (label, rest) = (label.to_owned(), rest.to_owned());
        tokens[0] = rest;
        return Some(label);
    }
    let rest = tokens.get(1)?.strip_prefix(':')?.to_owned();
    let label = tokens.remove(0);
    if rest.is_empty() {
        let _ = tokens.remove(0);
    } else {
        tokens[0] = rest;
    }
    Some(label)
}

/// Validates one instruction's tokens and resolves its operands.
fn parse_instruction(
    tokens: Vec<String>,
    program_len: usize,
    memory_bytes: usize,
) -> Result<Instruction, SimError> {
    let syntax = |tokens: &[String]| SimError::Syntax {
        tokens: tokens.to_vec(),
    };
    let reg = |token: &str, tokens: &[String]| {
        register_index(token).ok_or_else(|| SimError::InvalidRegister {
            tokens: tokens.to_vec(),
        })
    };

    let mnemonic: Mnemonic = tokens[0].parse().map_err(|()| syntax(&tokens))?;
    let class = mnemonic.class();
    if tokens.len() != class.operand_count() + 1 {
        return Err(syntax(&tokens));
    }

    let operands = match class {
        InstClass::ArithReg => Operands::ArithReg {
            rd: reg(&tokens[1], &tokens)?,
            rs: reg(&tokens[2], &tokens)?,
            rt: reg(&tokens[3], &tokens)?,
        },
        InstClass::ArithImm => Operands::ArithImm {
            rt: reg(&tokens[1], &tokens)?,
            rs: reg(&tokens[2], &tokens)?,
            imm: parse_literal(&tokens[3]).ok_or_else(|| syntax(&tokens))?,
        },
        InstClass::Branch => Operands::Branch {
            rs: reg(&tokens[1], &tokens)?,
            rt: reg(&tokens[2], &tokens)?,
            label: tokens[3].clone(),
        },
        InstClass::Jump => Operands::Jump {
            label: tokens[1].clone(),
        },
        InstClass::Memory => {
            let rt = reg(&tokens[1], &tokens)?;
            let expr = tokens[2].as_str();
            let address = if let Some(inner) = expr.strip_suffix(')') {
                let (offset, base) = inner.split_once('(').ok_or_else(|| syntax(&tokens))?;
                Address::BaseOffset {
                    base: reg(base, &tokens)?,
                    offset: offset.to_owned(),
                }
            } else {
                let addr = i64::from(parse_literal(expr).ok_or_else(|| syntax(&tokens))?);
                if data_word_index(addr, program_len, memory_bytes).is_none() {
                    return Err(SimError::InvalidAddress { tokens });
                }
                Address::Literal(addr)
            };
            Operands::Memory { rt, address }
        }
    };

    Ok(Instruction {
        mnemonic,
        operands,
        tokens,
    })
}
