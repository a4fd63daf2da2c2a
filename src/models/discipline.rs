//! Scheduling disciplines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A CPU scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// First-Come-First-Served, non-preemptive.
    #[serde(alias = "FCFS")]
    Fcfs,
    /// Round Robin with a fixed time quantum.
    #[serde(alias = "rr", alias = "RR")]
    RoundRobin,
    /// Shortest-Remaining-Time-First, preemptive at tick granularity.
    #[serde(alias = "srt", alias = "SRTF")]
    Srtf,
}

impl Discipline {
    /// All disciplines, in reporting order.
    pub const ALL: [Discipline; 3] = [Discipline::Fcfs, Discipline::RoundRobin, Discipline::Srtf];

    /// Short label (e.g., "FCFS").
    pub fn label(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::RoundRobin => "RR",
            Discipline::Srtf => "SRTF",
        }
    }

    /// Whether the discipline needs a time quantum.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, Discipline::RoundRobin)
    }

    /// Whether running processes can be interrupted.
    pub fn is_preemptive(&self) -> bool {
        !matches!(self, Discipline::Fcfs)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Discipline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Discipline::Fcfs),
            "rr" | "round_robin" | "round-robin" | "roundrobin" => Ok(Discipline::RoundRobin),
            "srtf" | "srt" => Ok(Discipline::Srtf),
            _ => Err(Error::UnknownDiscipline(s.to_string())),
        }
    }
}
