//! First-Come-First-Served.

use super::{arrival_order, Dispatch, DispatchPolicy};
use crate::models::{ProcessState, Ticks};

/// Non-preemptive FCFS.
///
/// Runs processes to completion in arrival order; equal arrivals keep input
/// order. When the next process has not arrived yet, the CPU idles until it
/// does.
#[derive(Debug, Clone, Default)]
pub struct Fcfs {
    order: Option<Vec<usize>>,
    cursor: usize,
}

impl Fcfs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select(&mut self, clock: Ticks, processes: &[ProcessState]) -> Dispatch {
        let order = self.order.get_or_insert_with(|| arrival_order(processes));

        // Skip anything already finished (each process is dispatched once).
        while let Some(&i) = order.get(self.cursor) {
            if !processes[i].is_finished() {
                break;
            }
            self.cursor += 1;
        }

        let Some(&index) = order.get(self.cursor) else {
            return Dispatch::Finished;
        };
        let process = &processes[index];
        if process.arrival_time() > clock {
            return Dispatch::IdleUntil(process.arrival_time());
        }

        self.cursor += 1;
        Dispatch::Run {
            index,
            slice: process.remaining_time(),
        }
    }
}
