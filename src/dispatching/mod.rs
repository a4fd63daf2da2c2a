//! Dispatch policies for the single-CPU simulator.
//!
//! Each discipline is a [`DispatchPolicy`]: given the clock and the process
//! table, it decides what the CPU does next. The surrounding run loop,
//! timeline, and metrics are shared (see `scheduler::Simulator`).
//!
//! | Policy | Preemption | Slice |
//! |--------|-----------|-------|
//! | `Fcfs` | none | whole remaining burst |
//! | `RoundRobin` | at quantum expiry | `min(remaining, quantum)` |
//! | `Srtf` | every tick | 1 |
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{Dispatch, DispatchPolicy, Srtf};
//! use u_cpusched::models::{ProcessDescriptor, ProcessState};
//!
//! let table = vec![
//!     ProcessState::new(ProcessDescriptor::new(1, 0, 5)),
//!     ProcessState::new(ProcessDescriptor::new(2, 0, 2)),
//! ];
//! let mut policy = Srtf::new();
//! assert_eq!(policy.select(0, &table), Dispatch::Run { index: 1, slice: 1 });
//! ```

mod fcfs;
mod round_robin;
mod srtf;

pub use fcfs::Fcfs;
pub use round_robin::RoundRobin;
pub use srtf::Srtf;

use std::fmt::Debug;

use crate::models::{ProcessState, Ticks};

/// What the CPU does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Run `processes[index]` for `slice` ticks starting now.
    Run { index: usize, slice: Ticks },
    /// Nothing is runnable; idle until the given tick.
    IdleUntil(Ticks),
    /// Every process has finished.
    Finished,
}

/// A scheduling discipline's next-process decision.
///
/// `processes` is the run's process table in input order. The run loop
/// applies every `Run` decision to that table before calling `select`
/// again, so a policy may carry its own queue state between calls.
pub trait DispatchPolicy: Debug {
    /// Policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Decides the next dispatch at `clock`.
    fn select(&mut self, clock: Ticks, processes: &[ProcessState]) -> Dispatch;
}

/// Input indices ordered by arrival time, ties keeping input order.
pub(crate) fn arrival_order(processes: &[ProcessState]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    // sort_by_key is stable
    order.sort_by_key(|&i| processes[i].arrival_time());
    order
}
