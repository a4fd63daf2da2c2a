//! Simulation engine and KPI evaluation.
//!
//! # Engine
//!
//! `Simulator` validates the input, owns a fresh process table per run, and
//! drives a `DispatchPolicy` until every process finishes. The result is a
//! frozen `SimulationResult` (timeline plus finalized process states).
//!
//! # KPI
//!
//! `MetricsSummary` computes waiting, turnaround, and response times, their
//! averages, CPU utilization, and throughput.

mod engine;
mod kpi;

pub use engine::{compare_disciplines, Simulator};
pub use kpi::{MetricsSummary, ProcessMetrics};
