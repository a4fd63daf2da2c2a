//! Simulation configuration and TOML scenario files.
//!
//! ```toml
//! [simulation]
//! discipline = "round_robin"
//! time_quantum = 2
//! context_switch = 1
//!
//! [[processes]]
//! id = 1
//! arrival_time = 0
//! burst_time = 5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Discipline, ProcessDescriptor, Ticks};

/// How negative waiting times are treated by the metrics reducer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitingTimeMode {
    /// Any negative waiting or turnaround time is an engine defect.
    #[default]
    Strict,
    /// Clamp Round Robin waiting times at zero, as the legacy reports did.
    /// FCFS and SRTF stay strict.
    ClampRoundRobin,
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduling discipline.
    pub discipline: Discipline,
    /// Round Robin time quantum. Ignored by other disciplines.
    #[serde(default)]
    pub time_quantum: Option<Ticks>,
    /// Context switch cost. Reported only, never added to the timeline.
    #[serde(default)]
    pub context_switch: Ticks,
    /// Negative waiting time handling.
    #[serde(default)]
    pub waiting_time: WaitingTimeMode,
}

impl SimulationConfig {
    /// Creates a configuration with no quantum and zero context switch.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            time_quantum: None,
            context_switch: 0,
            waiting_time: WaitingTimeMode::Strict,
        }
    }

    /// Round Robin with the given quantum.
    pub fn round_robin(time_quantum: Ticks) -> Self {
        Self::new(Discipline::RoundRobin).with_time_quantum(time_quantum)
    }

    pub fn with_time_quantum(mut self, time_quantum: Ticks) -> Self {
        self.time_quantum = Some(time_quantum);
        self
    }

    pub fn with_context_switch(mut self, context_switch: Ticks) -> Self {
        self.context_switch = context_switch;
        self
    }

    pub fn with_waiting_time_mode(mut self, mode: WaitingTimeMode) -> Self {
        self.waiting_time = mode;
        self
    }

    /// Same parameters under another discipline.
    pub fn for_discipline(&self, discipline: Discipline) -> Self {
        Self {
            discipline,
            ..self.clone()
        }
    }

    /// Quantum to report alongside results (RR only).
    pub(crate) fn effective_quantum(&self) -> Option<Ticks> {
        if self.discipline.needs_quantum() {
            self.time_quantum
        } else {
            None
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Discipline::Fcfs)
    }
}

/// A complete scenario: parameters plus the process set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub processes: Vec<ProcessDescriptor>,
}

impl Scenario {
    /// Parses a scenario from a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads a scenario from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_from_toml() {
        let scenario = Scenario::from_toml_str(
            r#"
            [simulation]
            discipline = "rr"
            time_quantum = 2
            context_switch = 1

            [[processes]]
            id = 1
            arrival_time = 0
            burst_time = 5

            [[processes]]
            id = 2
            arrival_time = 1
            burst_time = 3
            "#,
        )
        .unwrap();

        assert_eq!(scenario.simulation.discipline, Discipline::RoundRobin);
        assert_eq!(scenario.simulation.time_quantum, Some(2));
        assert_eq!(scenario.simulation.context_switch, 1);
        assert_eq!(scenario.simulation.waiting_time, WaitingTimeMode::Strict);
        assert_eq!(scenario.processes.len(), 2);
        assert_eq!(scenario.processes[1], ProcessDescriptor::new(2, 1, 3));
    }

    #[test]
    fn test_scenario_defaults() {
        let scenario = Scenario::from_toml_str(
            r#"
            [simulation]
            discipline = "srtf"
            waiting_time = "clamp_round_robin"
            "#,
        )
        .unwrap();
        assert_eq!(scenario.simulation.time_quantum, None);
        assert_eq!(scenario.simulation.context_switch, 0);
        assert_eq!(
            scenario.simulation.waiting_time,
            WaitingTimeMode::ClampRoundRobin
        );
        assert!(scenario.processes.is_empty());
    }

    #[test]
    fn test_bad_toml() {
        let err = Scenario::from_toml_str("[simulation]\ndiscipline = \"lottery\"").unwrap_err();
        assert!(matches!(err, crate::Error::Toml(_)));
    }

    #[test]
    fn test_for_discipline_keeps_parameters() {
        let rr = SimulationConfig::round_robin(3).with_context_switch(2);
        let fcfs = rr.for_discipline(Discipline::Fcfs);
        assert_eq!(fcfs.context_switch, 2);
        assert_eq!(fcfs.effective_quantum(), None);
        assert_eq!(rr.effective_quantum(), Some(3));
    }
}
