//! Process records.
//!
//! A [`ProcessDescriptor`] is the immutable input. A [`ProcessState`] wraps a
//! descriptor with the bookkeeping a single simulation run mutates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Abstract simulation time unit.
pub type Ticks = i64;

/// Process identifier (unique, positive).
pub type ProcessId = u32;

/// A process to be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Tick at which the process becomes runnable.
    pub arrival_time: Ticks,
    /// Total CPU time the process needs.
    pub burst_time: Ticks,
}

impl ProcessDescriptor {
    /// Creates a descriptor.
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }
}

/// Run-owned state of one process.
///
/// Fields are private so that `start_time` and `finish_time` can only be set
/// through [`ProcessState::execute`], which sets each exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    descriptor: ProcessDescriptor,
    remaining_time: Ticks,
    start_time: Option<Ticks>,
    finish_time: Option<Ticks>,
}

impl ProcessState {
    /// Creates a fresh, not-yet-dispatched state.
    pub fn new(descriptor: ProcessDescriptor) -> Self {
        Self {
            descriptor,
            remaining_time: descriptor.burst_time,
            start_time: None,
            finish_time: None,
        }
    }

    #[inline]
    pub fn descriptor(&self) -> &ProcessDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn id(&self) -> ProcessId {
        self.descriptor.id
    }

    #[inline]
    pub fn arrival_time(&self) -> Ticks {
        self.descriptor.arrival_time
    }

    #[inline]
    pub fn burst_time(&self) -> Ticks {
        self.descriptor.burst_time
    }

    /// CPU time still owed to this process.
    #[inline]
    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    /// Tick of the first dispatch, `None` if never dispatched.
    pub fn start_time(&self) -> Option<Ticks> {
        self.start_time
    }

    /// Completion tick, `None` while unfinished.
    pub fn finish_time(&self) -> Option<Ticks> {
        self.finish_time
    }

    /// Whether all burst time has been granted.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether the process is runnable at `clock`.
    #[inline]
    pub fn is_available(&self, clock: Ticks) -> bool {
        self.descriptor.arrival_time <= clock && self.remaining_time > 0
    }

    /// Grants `ticks` of CPU starting at `clock`.
    ///
    /// Records `start_time` on the first grant and `finish_time` when the
    /// remaining time reaches zero. Returns whether the process finished.
    pub fn execute(&mut self, clock: Ticks, ticks: Ticks) -> Result<bool> {
        if ticks <= 0 || ticks > self.remaining_time {
            return Err(Error::invariant(format!(
                "process {} granted {} ticks with {} remaining",
                self.id(),
                ticks,
                self.remaining_time
            )));
        }
        if clock < self.descriptor.arrival_time {
            return Err(Error::invariant(format!(
                "process {} dispatched at {} before its arrival at {}",
                self.id(),
                clock,
                self.descriptor.arrival_time
            )));
        }

        let end = clock.checked_add(ticks).ok_or_else(|| {
            Error::invariant(format!(
                "process {} slice of {} ticks at {} overflows the clock",
                self.id(),
                ticks,
                clock
            ))
        })?;

        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
        self.remaining_time -= ticks;

        if self.remaining_time == 0 {
            self.finish_time = Some(end);
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let s = ProcessState::new(ProcessDescriptor::new(1, 2, 5));
        assert_eq!(s.remaining_time(), 5);
        assert_eq!(s.start_time(), None);
        assert_eq!(s.finish_time(), None);
        assert!(!s.is_available(1));
        assert!(s.is_available(2));
    }

    #[test]
    fn test_execute_sets_start_once() {
        let mut s = ProcessState::new(ProcessDescriptor::new(1, 0, 5));
        assert!(!s.execute(3, 2).unwrap());
        assert!(!s.execute(7, 2).unwrap());
        assert_eq!(s.start_time(), Some(3));
        assert_eq!(s.remaining_time(), 1);

        assert!(s.execute(10, 1).unwrap());
        assert_eq!(s.start_time(), Some(3));
        assert_eq!(s.finish_time(), Some(11));
        assert!(s.is_finished());
        assert!(!s.is_available(20));
    }

    #[test]
    fn test_execute_rejects_overrun() {
        let mut s = ProcessState::new(ProcessDescriptor::new(1, 0, 2));
        let err = s.execute(0, 3).unwrap_err();
        assert!(err.is_defect());
        assert_eq!(s.remaining_time(), 2);
    }

    #[test]
    fn test_execute_rejects_early_dispatch() {
        let mut s = ProcessState::new(ProcessDescriptor::new(4, 5, 2));
        assert!(s.execute(4, 1).unwrap_err().is_defect());
        assert_eq!(s.start_time(), None);
    }

    #[test]
    fn test_execute_rejects_clock_overflow() {
        let mut s = ProcessState::new(ProcessDescriptor::new(1, 0, 5));
        assert!(s.execute(Ticks::MAX - 1, 5).unwrap_err().is_defect());
        assert_eq!(s.start_time(), None);
        assert_eq!(s.remaining_time(), 5);
    }

    #[test]
    fn test_finished_cannot_run_again() {
        let mut s = ProcessState::new(ProcessDescriptor::new(1, 0, 1));
        assert!(s.execute(0, 1).unwrap());
        assert!(s.execute(1, 1).is_err());
        assert_eq!(s.finish_time(), Some(1));
    }
}
