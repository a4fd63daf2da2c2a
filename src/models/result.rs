//! Simulation result (frozen run output).

use serde::{Deserialize, Serialize};

use super::{Discipline, ProcessId, ProcessState, Ticks, Timeline};

/// The complete, immutable output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    discipline: Discipline,
    processes: Vec<ProcessState>,
    timeline: Timeline,
    end_time: Ticks,
    total_time: Ticks,
    active_time: Ticks,
    context_switch: Ticks,
    time_quantum: Option<Ticks>,
}

impl SimulationResult {
    /// Freezes the output of a finished run.
    ///
    /// `total_time` is the utilization denominator: the explicit clock at
    /// termination for Round Robin, the latest finish (measured from tick 0)
    /// for FCFS, and the latest finish minus the earliest arrival for SRTF.
    pub(crate) fn new(
        discipline: Discipline,
        processes: Vec<ProcessState>,
        timeline: Timeline,
        end_time: Ticks,
        active_time: Ticks,
        context_switch: Ticks,
        time_quantum: Option<Ticks>,
    ) -> Self {
        let max_finish = processes
            .iter()
            .filter_map(|p| p.finish_time())
            .max()
            .unwrap_or(0);
        let total_time = match discipline {
            Discipline::RoundRobin => end_time,
            Discipline::Fcfs => max_finish,
            Discipline::Srtf => {
                let min_arrival = processes
                    .iter()
                    .map(|p| p.arrival_time())
                    .min()
                    .unwrap_or(0);
                max_finish - min_arrival
            }
        };

        Self {
            discipline,
            processes,
            timeline,
            end_time,
            total_time,
            active_time,
            context_switch,
            time_quantum,
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Finalized process states, in input order.
    pub fn processes(&self) -> &[ProcessState] {
        &self.processes
    }

    pub fn process(&self, id: ProcessId) -> Option<&ProcessState> {
        self.processes.iter().find(|p| p.id() == id)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Clock value when the run terminated.
    pub fn end_time(&self) -> Ticks {
        self.end_time
    }

    /// Denominator for CPU utilization.
    pub fn total_time(&self) -> Ticks {
        self.total_time
    }

    /// Sum of all occupied ticks.
    pub fn active_time(&self) -> Ticks {
        self.active_time
    }

    /// Context switch cost, reported but never applied.
    pub fn context_switch(&self) -> Ticks {
        self.context_switch
    }

    pub fn time_quantum(&self) -> Option<Ticks> {
        self.time_quantum
    }

    /// Latest completion time.
    pub fn makespan(&self) -> Ticks {
        self.processes
            .iter()
            .filter_map(|p| p.finish_time())
            .max()
            .unwrap_or(0)
    }

    /// Sum of burst times across all processes.
    pub fn total_burst_time(&self) -> Ticks {
        self.processes.iter().map(|p| p.burst_time()).sum()
    }
}
