//! Simulation domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `ProcessDescriptor` | Immutable input (id, arrival, burst) |
//! | `ProcessState` | Run-owned bookkeeping (remaining, start, finish) |
//! | `Timeline` | Ordered CPU occupancy entries |
//! | `SimulationResult` | Frozen output of one run |
//! | `Discipline` | FCFS, Round Robin, or SRTF |

mod discipline;
mod process;
mod result;
mod timeline;

pub use discipline::Discipline;
pub use process::{ProcessDescriptor, ProcessId, ProcessState, Ticks};
pub use result::SimulationResult;
pub use timeline::{IdleGap, Timeline, TimelineEntry};
