//! Execution timeline.
//!
//! An append-only sequence of run-length occupancy entries. FCFS appends one
//! entry per process, Round Robin one per slice, SRTF one per tick. Idle time
//! is never stored; it is the space between entries.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Ticks};
use crate::error::{Error, Result};

/// The CPU ran `process_id` during `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// First occupied tick.
    pub start: Ticks,
    /// Number of occupied ticks (> 0).
    pub duration: Ticks,
    /// Running process.
    pub process_id: ProcessId,
}

impl TimelineEntry {
    /// Creates an entry.
    pub fn new(start: Ticks, duration: Ticks, process_id: ProcessId) -> Self {
        Self {
            start,
            duration,
            process_id,
        }
    }

    /// Exclusive end tick.
    #[inline]
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }

    /// Whether `tick` falls inside this entry.
    #[inline]
    pub fn contains(&self, tick: Ticks) -> bool {
        self.start <= tick && tick < self.end()
    }
}

/// An interval during which the CPU was idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleGap {
    pub start: Ticks,
    pub end: Ticks,
}

impl IdleGap {
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Ordered, non-overlapping CPU occupancy record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    ///
    /// Fails if the entry is empty or starts before the previous entry ends.
    pub fn push(&mut self, entry: TimelineEntry) -> Result<()> {
        if entry.duration <= 0 {
            return Err(Error::invariant(format!(
                "timeline entry for process {} at {} has non-positive duration {}",
                entry.process_id, entry.start, entry.duration
            )));
        }
        if let Some(last) = self.entries.last() {
            if entry.start < last.end() {
                return Err(Error::invariant(format!(
                    "timeline entry for process {} at {} overlaps process {} ending at {}",
                    entry.process_id,
                    entry.start,
                    last.process_id,
                    last.end()
                )));
            }
        }
        self.entries.push(entry);
        Ok(())
    }

    /// All entries in time order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unit-level view: one `(tick, process_id)` pair per occupied tick.
    pub fn units(&self) -> impl Iterator<Item = (Ticks, ProcessId)> + '_ {
        self.entries
            .iter()
            .flat_map(|e| (e.start..e.end()).map(move |t| (t, e.process_id)))
    }

    /// Total occupied ticks.
    pub fn occupied_units(&self) -> Ticks {
        self.entries.iter().map(|e| e.duration).sum()
    }

    /// Occupied ticks for one process.
    pub fn units_for(&self, process_id: ProcessId) -> Ticks {
        self.entries
            .iter()
            .filter(|e| e.process_id == process_id)
            .map(|e| e.duration)
            .sum()
    }

    /// Process running at `tick`, `None` if the CPU was idle.
    pub fn process_at(&self, tick: Ticks) -> Option<ProcessId> {
        // Entries are sorted by start, so binary search on the end.
        let idx = self.entries.partition_point(|e| e.end() <= tick);
        self.entries
            .get(idx)
            .filter(|e| e.contains(tick))
            .map(|e| e.process_id)
    }

    /// First tick at which `process_id` ran.
    pub fn first_dispatch(&self, process_id: ProcessId) -> Option<Ticks> {
        self.entries
            .iter()
            .find(|e| e.process_id == process_id)
            .map(|e| e.start)
    }

    /// Exclusive end of the last entry (0 if empty).
    pub fn end(&self) -> Ticks {
        self.entries.last().map(|e| e.end()).unwrap_or(0)
    }

    /// Merges adjacent entries of the same process with no gap between them.
    pub fn coalesced(&self) -> Vec<TimelineEntry> {
        let mut merged: Vec<TimelineEntry> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match merged.last_mut() {
                Some(last) if last.process_id == entry.process_id && last.end() == entry.start => {
                    last.duration += entry.duration;
                }
                _ => merged.push(*entry),
            }
        }
        merged
    }

    /// Idle intervals between `origin` and the last entry.
    pub fn idle_gaps(&self, origin: Ticks) -> Vec<IdleGap> {
        let mut gaps = Vec::new();
        let mut cursor = origin;
        for entry in &self.entries {
            if entry.start > cursor {
                gaps.push(IdleGap {
                    start: cursor,
                    end: entry.start,
                });
            }
            cursor = cursor.max(entry.end());
        }
        gaps
    }
}
