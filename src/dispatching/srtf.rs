//! Shortest-Remaining-Time-First.

use super::{Dispatch, DispatchPolicy};
use crate::models::{ProcessState, Ticks};

/// Preemptive SRTF, re-evaluated every tick.
///
/// Among processes with `arrival_time <= clock` and remaining work, picks the
/// smallest remaining time; ties go to the earliest arrival, then the lowest
/// ID. Each decision runs exactly one tick.
///
/// When nothing is available the policy idles straight to the earliest
/// pending arrival: the available set cannot change before then, so the
/// result equals stepping one idle tick at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srtf;

impl Srtf {
    pub fn new() -> Self {
        Self
    }

    /// Index of the process SRTF would run at `clock`, if any.
    pub fn pick(clock: Ticks, processes: &[ProcessState]) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_available(clock))
            .min_by_key(|(_, p)| (p.remaining_time(), p.arrival_time(), p.id()))
            .map(|(i, _)| i)
    }
}

impl DispatchPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn select(&mut self, clock: Ticks, processes: &[ProcessState]) -> Dispatch {
        if let Some(index) = Self::pick(clock, processes) {
            return Dispatch::Run { index, slice: 1 };
        }

        processes
            .iter()
            .filter(|p| !p.is_finished())
            .map(|p| p.arrival_time())
            .min()
            .map_or(Dispatch::Finished, Dispatch::IdleUntil)
    }
}
