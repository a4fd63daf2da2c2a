//! Scheduling performance metrics (KPIs).
//!
//! Reduces a finished [`SimulationResult`] to per-process and aggregate
//! indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | finish - arrival - burst |
//! | Turnaround time | finish - arrival |
//! | Response time | first dispatch - arrival |
//! | CPU utilization | active_time / total_time * 100 (0 if total_time = 0) |
//! | Throughput | processes / total_time (0 if total_time = 0) |
//!
//! `total_time` is the latest finish for FCFS, the latest finish minus the
//! earliest arrival for SRTF, and the clock at termination for Round Robin.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::WaitingTimeMode;
use crate::error::{Error, Result};
use crate::models::{Discipline, ProcessId, ProcessState, SimulationResult, Ticks};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Metrics of a single process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub start_time: Ticks,
    pub finish_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    pub response_time: Ticks,
}

/// Aggregate metrics of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub discipline: Discipline,
    /// Per-process metrics, in input order.
    pub processes: Vec<ProcessMetrics>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    /// Percentage (0..=100).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    pub total_time: Ticks,
    pub active_time: Ticks,
    pub makespan: Ticks,
    pub context_switch: Ticks,
    pub time_quantum: Option<Ticks>,
}

impl MetricsSummary {
    /// Computes metrics from a finished run.
    ///
    /// # Errors
    /// - `InvalidInput` (`EmptyInput`) if the result holds no processes.
    /// - `InvariantViolation` if a process never finished, or a waiting,
    ///   turnaround, or response time is negative (unless `mode` clamps
    ///   Round Robin waiting times).
    pub fn calculate(result: &SimulationResult, mode: WaitingTimeMode) -> Result<Self> {
        let states = result.processes();
        if states.is_empty() {
            return Err(Error::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::EmptyInput,
                "No processes to summarize",
            )]));
        }

        let clamp = mode == WaitingTimeMode::ClampRoundRobin
            && result.discipline() == Discipline::RoundRobin;

        let processes = states
            .iter()
            .map(|p| process_metrics(p, clamp))
            .collect::<Result<Vec<_>>>()?;

        let n = processes.len() as f64;
        let average_waiting_time = mean(processes.iter().map(|m| m.waiting_time), n);
        let average_turnaround_time = mean(processes.iter().map(|m| m.turnaround_time), n);
        let average_response_time = mean(processes.iter().map(|m| m.response_time), n);

        let total_time = result.total_time();
        let active_time = result.active_time();
        let (cpu_utilization, throughput) = if total_time == 0 {
            (0.0, 0.0)
        } else {
            (
                active_time as f64 / total_time as f64 * 100.0,
                n / total_time as f64,
            )
        };

        debug!(
            discipline = %result.discipline(),
            average_waiting_time,
            average_turnaround_time,
            cpu_utilization,
            "metrics computed"
        );

        Ok(Self {
            discipline: result.discipline(),
            processes,
            average_waiting_time,
            average_turnaround_time,
            average_response_time,
            cpu_utilization,
            throughput,
            total_time,
            active_time,
            makespan: result.makespan(),
            context_switch: result.context_switch(),
            time_quantum: result.time_quantum(),
        })
    }

    /// Metrics for one process.
    pub fn process(&self, id: ProcessId) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.id == id)
    }

    /// Sum of waiting times.
    pub fn total_waiting_time(&self) -> Ticks {
        self.processes.iter().map(|m| m.waiting_time).sum()
    }
}

fn mean(values: impl Iterator<Item = Ticks>, n: f64) -> f64 {
    values.sum::<Ticks>() as f64 / n
}

fn process_metrics(p: &ProcessState, clamp_waiting: bool) -> Result<ProcessMetrics> {
    let (Some(start), Some(finish)) = (p.start_time(), p.finish_time()) else {
        return Err(Error::invariant(format!(
            "process {} has no start or finish time after the run",
            p.id()
        )));
    };

    let turnaround_time = finish - p.arrival_time();
    let response_time = start - p.arrival_time();
    if turnaround_time < 0 || response_time < 0 {
        return Err(Error::invariant(format!(
            "process {} has negative turnaround ({}) or response ({}) time",
            p.id(),
            turnaround_time,
            response_time
        )));
    }

    let raw_waiting = turnaround_time - p.burst_time();
    let waiting_time = if raw_waiting >= 0 {
        raw_waiting
    } else if clamp_waiting {
        warn!(pid = p.id(), raw_waiting, "clamping negative round robin waiting time");
        0
    } else {
        return Err(Error::invariant(format!(
            "process {} has negative waiting time {}",
            p.id(),
            raw_waiting
        )));
    };

    Ok(ProcessMetrics {
        id: p.id(),
        arrival_time: p.arrival_time(),
        burst_time: p.burst_time(),
        start_time: start,
        finish_time: finish,
        waiting_time,
        turnaround_time,
        response_time,
    })
}
