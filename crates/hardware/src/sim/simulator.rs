//! Simulator: owns the CPU and drives the run loop.
//!
//! The simulator produces one [`CycleReport`] for the initial state and one
//! after each tick, draining the memory delta as it goes, until the pipeline
//! is empty or the configured cycle cap is hit.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::common::error::{ConfigError, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::engine;
use crate::sim::program::Program;
use crate::sim::report::CycleReport;
use crate::stats::SimStats;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The pipeline drained after the last instruction retired.
    Completed {
        /// Cycles simulated.
        cycles: u64,
    },
    /// The configured `max_cycles` cap stopped the run first.
    CycleLimit {
        /// Cycles simulated.
        cycles: u64,
    },
}

impl Outcome {
    /// Cycles simulated, however the run ended.
    pub const fn cycles(self) -> u64 {
        match self {
            Self::Completed { cycles } | Self::CycleLimit { cycles } => cycles,
        }
    }
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// Simulation state.
    pub cpu: Cpu,
    max_cycles: Option<u64>,
}

impl Simulator {
    /// Creates a simulator for `program` under `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(program: Program, config: &Config) -> Result<Self, ConfigError> {
        let cpu = Cpu::new(Arc::new(program), config)?;
        Ok(Self {
            cpu,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Report of the state before the first cycle.
    pub fn initial_report(&mut self) -> CycleReport {
        self.report()
    }

    /// True once the pipeline has drained.
    pub fn is_finished(&self) -> bool {
        self.cpu.is_drained()
    }

    /// Runs one cycle and reports the resulting state.
    ///
    /// # Errors
    ///
    /// Returns the fatal error raised during the cycle, if any.
    pub fn step(&mut self) -> Result<CycleReport, SimError> {
        engine::tick(&mut self.cpu)?;
        Ok(self.report())
    }

    /// Runs to completion, writing every cycle report to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal simulation error, or [`SimError::Report`] if
    /// `out` cannot be written. Reports for cycles before the failure have
    /// already been written.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Outcome, SimError> {
        self.run_with(|report| {
            write!(out, "{report}")?;
            Ok(())
        })
    }

    /// Runs to completion, handing each cycle report to `sink`.
    ///
    /// # Errors
    ///
    /// Returns the first error from a cycle or from `sink`.
    pub fn run_with<F>(&mut self, mut sink: F) -> Result<Outcome, SimError>
    where
        F: FnMut(&CycleReport) -> Result<(), SimError>,
    {
        info!(
            instructions = self.cpu.program.len(),
            policy = ?self.cpu.policy,
            "simulation started"
        );
        sink(&self.initial_report())?;

        while !self.is_finished() {
            if let Some(max) = self.max_cycles
                && self.cpu.stats.cycles >= max
            {
                debug!(max, "cycle limit reached");
                return Ok(Outcome::CycleLimit {
                    cycles: self.cpu.stats.cycles,
                });
            }
            let report = self.step()?;
            sink(&report)?;
        }

        info!(cycles = self.cpu.stats.cycles, "simulation finished");
        debug!("final registers:\n{}", self.cpu.regs.dump());
        Ok(Outcome::Completed {
            cycles: self.cpu.stats.cycles,
        })
    }

    /// Run statistics so far.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    fn report(&mut self) -> CycleReport {
        CycleReport {
            cycle: self.cpu.stats.cycles,
            registers: self.cpu.regs.snapshot(),
            memory_delta: self.cpu.memory.take_delta(),
        }
    }
}
