//! Workload sources.
//!
//! - **Legacy text files**: whitespace-separated `pid arrival burst` lines
//!   with the scalar parameters in one of three historical layouts.
//! - **TOML scenarios**: see `config::Scenario`.
//! - **Random generation**: seeded Bernoulli arrivals.

mod generator;
mod parser;

pub use generator::WorkloadGenerator;
pub use parser::{parse_legacy, LegacyLayout};

use std::fs;
use std::path::Path;

use crate::config::{Scenario, SimulationConfig};
use crate::error::Result;
use crate::models::{Discipline, ProcessDescriptor, Ticks};

/// Processes plus the scalar parameters read alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workload {
    pub processes: Vec<ProcessDescriptor>,
    pub context_switch: Ticks,
    /// Present only when the source carries one.
    pub time_quantum: Option<Ticks>,
}

impl Workload {
    /// Loads a workload file.
    ///
    /// `.toml` files are scenarios; anything else is read as a legacy text
    /// file in the layout historically used for `discipline`.
    pub fn from_path<P: AsRef<Path>>(path: P, discipline: Discipline) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().is_some_and(|ext| ext == "toml") {
            return Ok(Scenario::from_file(path)?.into());
        }
        let text = fs::read_to_string(path)?;
        parse_legacy(&text, LegacyLayout::for_discipline(discipline))
    }

    /// Applies the workload's parameters on top of `config`.
    pub fn apply_to(&self, config: &SimulationConfig) -> SimulationConfig {
        let mut merged = config.clone().with_context_switch(self.context_switch);
        if merged.time_quantum.is_none() {
            merged.time_quantum = self.time_quantum;
        }
        merged
    }
}

impl From<Scenario> for Workload {
    fn from(scenario: Scenario) -> Self {
        Self {
            processes: scenario.processes,
            context_switch: scenario.simulation.context_switch,
            time_quantum: scenario.simulation.time_quantum,
        }
    }
}
