//! Round Robin time slicing.

use std::collections::VecDeque;

use super::{arrival_order, Dispatch, DispatchPolicy};
use crate::models::{ProcessState, Ticks};

/// Preemptive Round Robin with a fixed quantum.
///
/// # Queue discipline
/// 1. Processes with `arrival_time <= clock` join the ready queue in arrival
///    order (equal arrivals keep input order).
/// 2. The head runs for `min(remaining, quantum)`.
/// 3. A preempted process rejoins at the tail only after every process that
///    arrived during its slice has been admitted.
/// 4. With an empty queue, the CPU idles to the next arrival.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: Ticks,
    order: Option<Vec<usize>>,
    next_arrival: usize,
    ready: VecDeque<usize>,
    preempted: Option<usize>,
}

impl RoundRobin {
    /// Creates a policy with the given quantum (must be positive; the
    /// simulator validates this before a run).
    pub fn new(quantum: Ticks) -> Self {
        Self {
            quantum,
            order: None,
            next_arrival: 0,
            ready: VecDeque::new(),
            preempted: None,
        }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    /// Processes currently waiting in the ready queue (head first).
    pub fn ready_queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.ready.iter().copied()
    }
}

impl DispatchPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select(&mut self, clock: Ticks, processes: &[ProcessState]) -> Dispatch {
        let order = self.order.get_or_insert_with(|| arrival_order(processes));

        while let Some(&i) = order.get(self.next_arrival) {
            if processes[i].arrival_time() > clock {
                break;
            }
            self.ready.push_back(i);
            self.next_arrival += 1;
        }

        // The previous slice's process goes behind everything that arrived
        // while it ran.
        if let Some(prev) = self.preempted.take() {
            if !processes[prev].is_finished() {
                self.ready.push_back(prev);
            }
        }

        if let Some(index) = self.ready.pop_front() {
            self.preempted = Some(index);
            return Dispatch::Run {
                index,
                slice: processes[index].remaining_time().min(self.quantum),
            };
        }

        match order.get(self.next_arrival) {
            Some(&i) => Dispatch::IdleUntil(processes[i].arrival_time()),
            None => Dispatch::Finished,
        }
    }
}
