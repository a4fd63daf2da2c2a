//! Single-CPU process scheduling simulator.
//!
//! Simulates First-Come-First-Served, Round Robin, and
//! Shortest-Remaining-Time-First on an abstract integer time axis and derives
//! waiting time, turnaround time, response time, and CPU utilization along
//! with a Gantt-ready execution timeline. Every run is deterministic.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessDescriptor`, `ProcessState`,
//!   `Timeline`, `SimulationResult`, `Discipline`
//! - **`dispatching`**: `DispatchPolicy` and the `Fcfs`, `RoundRobin`, `Srtf`
//!   policies
//! - **`scheduler`**: The shared run loop (`Simulator`) and `MetricsSummary`
//! - **`validation`**: Input checks (empty input, bad processes, bad quantum)
//! - **`config`**: `SimulationConfig` and TOML scenarios
//! - **`workload`**: Legacy text formats and seeded random generation
//! - **`report`**: Text Gantt chart and segment views
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::ProcessDescriptor;
//! use u_cpusched::scheduler::Simulator;
//!
//! let processes = vec![
//!     ProcessDescriptor::new(1, 0, 5),
//!     ProcessDescriptor::new(2, 1, 3),
//! ];
//! let (result, metrics) = Simulator::round_robin(2).evaluate(&processes).unwrap();
//! assert_eq!(result.timeline().occupied_units(), 8);
//! assert!((metrics.cpu_utilization - 100.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{Error, Result};
