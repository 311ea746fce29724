//! Cycle engine.
//!
//! One call to [`tick`] advances the pipeline by one clock cycle. The five
//! stages are evaluated in reverse order (writeback, memory, execute, decode,
//! fetch) so that each stage consumes the latch its predecessor wrote in the
//! previous cycle before that predecessor overwrites it. This lets a single
//! set of latches hold four in-flight instructions without double buffering.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};

/// Advances the pipeline by one cycle.
///
/// # Errors
///
/// Returns the first fatal error raised by a stage. The cycle is abandoned at
/// that point and the CPU should not be stepped again.
pub fn tick(cpu: &mut Cpu) -> Result<(), SimError> {
    cpu.stats.cycles += 1;

    wb_stage(cpu);
    mem_stage(cpu)?;
    execute_stage(cpu)?;
    decode_stage(cpu)?;
    fetch_stage(cpu);

    trace!("cycle {:>5} {}", cpu.stats.cycles, cpu.pipeline_diagram());
    Ok(())
}

/// Ticks until the pipeline drains or `max_cycles` is reached.
///
/// Returns the number of cycles run by this call. Used where the per-cycle
/// reports are not needed.
///
/// # Errors
///
/// Propagates the first stage error.
pub fn run_to_drain(cpu: &mut Cpu, max_cycles: Option<u64>) -> Result<u64, SimError> {
    let start = cpu.stats.cycles;
    while !cpu.is_drained() {
        if max_cycles.is_some_and(|max| cpu.stats.cycles >= max) {
            break;
        }
        tick(cpu)?;
    }
    Ok(cpu.stats.cycles - start)
}
