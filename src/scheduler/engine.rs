//! Shared single-CPU run loop.
//!
//! # Algorithm
//!
//! 1. Validate processes and parameters (nothing runs on bad input).
//! 2. Build a fresh `ProcessState` table in input order.
//! 3. Repeatedly ask the policy for a [`Dispatch`]:
//!    - `Run`: grant the slice, append a timeline entry, advance the clock.
//!    - `IdleUntil`: jump the clock forward (no timeline entry).
//!    - `Finished`: stop.
//! 4. Freeze everything into a [`SimulationResult`].
//!
//! The loop checks the policy as it goes: an idle target that does not move
//! the clock forward, or `Finished` with work outstanding, is an invariant
//! violation.

use tracing::{debug, trace};

use crate::config::SimulationConfig;
use crate::dispatching::{Dispatch, DispatchPolicy, Fcfs, RoundRobin, Srtf};
use crate::error::{Error, Result};
use crate::models::{
    Discipline, ProcessDescriptor, ProcessState, SimulationResult, Ticks, Timeline, TimelineEntry,
};
use crate::scheduler::MetricsSummary;
use crate::validation::validate_input;

/// Single-CPU scheduling simulator.
///
/// # Example
///
/// ```
/// use u_cpusched::models::ProcessDescriptor;
/// use u_cpusched::scheduler::Simulator;
///
/// let processes = vec![
///     ProcessDescriptor::new(1, 0, 5),
///     ProcessDescriptor::new(2, 1, 3),
/// ];
/// let result = Simulator::fcfs().run(&processes).unwrap();
/// assert_eq!(result.process(2).unwrap().finish_time(), Some(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// FCFS simulator.
    pub fn fcfs() -> Self {
        Self::new(SimulationConfig::new(Discipline::Fcfs))
    }

    /// Round Robin simulator with the given quantum.
    pub fn round_robin(time_quantum: Ticks) -> Self {
        Self::new(SimulationConfig::round_robin(time_quantum))
    }

    /// SRTF simulator.
    pub fn srtf() -> Self {
        Self::new(SimulationConfig::new(Discipline::Srtf))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the configured discipline over `processes`.
    ///
    /// The descriptors are only read; every run builds its own state.
    pub fn run(&self, processes: &[ProcessDescriptor]) -> Result<SimulationResult> {
        validate_input(processes, &self.config)?;
        let mut policy = self.policy()?;
        self.execute(processes, policy.as_mut())
    }

    /// Runs and reduces in one step.
    pub fn evaluate(
        &self,
        processes: &[ProcessDescriptor],
    ) -> Result<(SimulationResult, MetricsSummary)> {
        let result = self.run(processes)?;
        let summary = MetricsSummary::calculate(&result, self.config.waiting_time)?;
        Ok((result, summary))
    }

    fn policy(&self) -> Result<Box<dyn DispatchPolicy>> {
        Ok(match self.config.discipline {
            Discipline::Fcfs => Box::new(Fcfs::new()),
            Discipline::Srtf => Box::new(Srtf::new()),
            Discipline::RoundRobin => {
                // validate_input guarantees a positive quantum for RR
                let quantum = self
                    .config
                    .time_quantum
                    .ok_or_else(|| Error::invariant("round robin started without a quantum"))?;
                Box::new(RoundRobin::new(quantum))
            }
        })
    }

    fn execute(
        &self,
        processes: &[ProcessDescriptor],
        policy: &mut dyn DispatchPolicy,
    ) -> Result<SimulationResult> {
        let mut table: Vec<ProcessState> =
            processes.iter().copied().map(ProcessState::new).collect();
        let mut timeline = Timeline::new();
        let mut clock = 0;
        let mut active_time = 0;

        debug!(
            policy = policy.name(),
            processes = table.len(),
            quantum = ?self.config.effective_quantum(),
            "simulation started"
        );

        loop {
            match policy.select(clock, &table) {
                Dispatch::Run { index, slice } => {
                    let process = table.get_mut(index).ok_or_else(|| {
                        Error::invariant(format!(
                            "{} selected index {} outside the process table",
                            policy.name(),
                            index
                        ))
                    })?;
                    let finished = process.execute(clock, slice)?;
                    trace!(clock, pid = process.id(), slice, finished, "dispatch");

                    timeline.push(TimelineEntry::new(clock, slice, process.id()))?;
                    clock = clock
                        .checked_add(slice)
                        .ok_or_else(|| Error::invariant(format!("clock overflow at {clock}")))?;
                    active_time += slice;
                }
                Dispatch::IdleUntil(until) => {
                    if until <= clock {
                        return Err(Error::invariant(format!(
                            "{} idled to {} at clock {}",
                            policy.name(),
                            until,
                            clock
                        )));
                    }
                    trace!(from = clock, until, "idle");
                    clock = until;
                }
                Dispatch::Finished => break,
            }
        }

        if let Some(p) = table.iter().find(|p| !p.is_finished()) {
            return Err(Error::invariant(format!(
                "{} finished with process {} still owed {} ticks",
                policy.name(),
                p.id(),
                p.remaining_time()
            )));
        }

        debug!(
            policy = policy.name(),
            end_time = clock,
            active_time,
            entries = timeline.len(),
            "simulation finished"
        );

        Ok(SimulationResult::new(
            self.config.discipline,
            table,
            timeline,
            clock,
            active_time,
            self.config.context_switch,
            self.config.effective_quantum(),
        ))
    }
}

/// Runs FCFS, Round Robin, and SRTF over the same descriptors.
///
/// Each run owns its own process states. The quantum (and other parameters)
/// come from `config`; its `discipline` field is ignored.
pub fn compare_disciplines(
    processes: &[ProcessDescriptor],
    config: &SimulationConfig,
) -> Result<Vec<(SimulationResult, MetricsSummary)>> {
    Discipline::ALL
        .iter()
        .map(|&d| Simulator::new(config.for_discipline(d)).evaluate(processes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaitingTimeMode;
    use crate::validation::ValidationErrorKind;

    fn procs(specs: &[(u32, i64, i64)]) -> Vec<ProcessDescriptor> {
        specs
            .iter()
            .map(|&(id, a, b)| ProcessDescriptor::new(id, a, b))
            .collect()
    }

    fn finish(result: &SimulationResult, id: u32) -> i64 {
        result.process(id).unwrap().finish_time().unwrap()
    }

    // ======================== FCFS ========================

    #[test]
    fn test_fcfs_single_process() {
        let (result, summary) = Simulator::fcfs().evaluate(&procs(&[(1, 0, 4)])).unwrap();
        assert_eq!(finish(&result, 1), 4);
        assert_eq!(summary.processes[0].waiting_time, 0);
        assert_eq!(summary.processes[0].turnaround_time, 4);
    }

    #[test]
    fn test_fcfs_two_processes() {
        let (result, summary) = Simulator::fcfs()
            .evaluate(&procs(&[(1, 0, 5), (2, 1, 3)]))
            .unwrap();
        assert_eq!(finish(&result, 1), 5);
        assert_eq!(finish(&result, 2), 8);
        assert_eq!(summary.process(2).unwrap().waiting_time, 4);
        assert_eq!(
            result.timeline().entries(),
            &[TimelineEntry::new(0, 5, 1), TimelineEntry::new(5, 3, 2)]
        );
    }

    #[test]
    fn test_fcfs_idle_gap_is_implicit() {
        let result = Simulator::fcfs()
            .run(&procs(&[(1, 0, 2), (2, 6, 1)]))
            .unwrap();
        assert_eq!(result.timeline().len(), 2);
        assert_eq!(result.process(2).unwrap().start_time(), Some(6));
        let gaps = result.timeline().idle_gaps(0);
        assert_eq!(gaps.len(), 1);
        assert_eq!((gaps[0].start, gaps[0].end), (2, 6));
        assert_eq!(result.end_time(), 7);
    }

    #[test]
    fn test_fcfs_stable_for_equal_arrivals() {
        let result = Simulator::fcfs()
            .run(&procs(&[(3, 0, 2), (1, 0, 2)]))
            .unwrap();
        assert_eq!(result.timeline().entries()[0].process_id, 3);
    }

    // ======================== Round Robin ========================

    #[test]
    fn test_rr_quantum_two() {
        let result = Simulator::round_robin(2)
            .run(&procs(&[(1, 0, 5), (2, 1, 3)]))
            .unwrap();
        let units: Vec<_> = result.timeline().units().collect();
        assert_eq!(
            units,
            vec![(0, 1), (1, 1), (2, 2), (3, 2), (4, 1), (5, 1), (6, 2), (7, 1)]
        );
        assert_eq!(result.timeline().occupied_units(), 8);
        assert_eq!(result.active_time(), 8);
        assert_eq!(result.total_time(), 8);
        assert_eq!(result.time_quantum(), Some(2));
    }

    #[test]
    fn test_rr_idle_before_first_arrival() {
        let result = Simulator::round_robin(2)
            .run(&procs(&[(1, 3, 2)]))
            .unwrap();
        assert_eq!(result.process(1).unwrap().start_time(), Some(3));
        assert_eq!(result.end_time(), 5);
        // RR measures utilization against the explicit clock
        assert_eq!(result.total_time(), 5);
    }

    #[test]
    fn test_rr_rejects_bad_quantum() {
        let err = Simulator::round_robin(0)
            .run(&procs(&[(1, 0, 2)]))
            .unwrap_err();
        assert!(!err.is_defect());
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::InvalidQuantum
        );
    }

    // ======================== SRTF ========================

    #[test]
    fn test_srtf_preempts_for_shorter_arrival() {
        let result = Simulator::srtf()
            .run(&procs(&[(1, 0, 7), (2, 2, 4), (3, 4, 1), (4, 5, 4)]))
            .unwrap();
        // Classic textbook case
        assert_eq!(finish(&result, 3), 5);
        assert_eq!(finish(&result, 2), 7);
        assert_eq!(finish(&result, 4), 11);
        assert_eq!(finish(&result, 1), 16);
        assert_eq!(result.process(2).unwrap().start_time(), Some(2));
        assert_eq!(result.timeline().len(), 16);
    }

    #[test]
    fn test_srtf_idle_then_run() {
        let result = Simulator::srtf().run(&procs(&[(1, 4, 2)])).unwrap();
        assert_eq!(result.process(1).unwrap().start_time(), Some(4));
        assert_eq!(finish(&result, 1), 6);
        assert_eq!(result.total_time(), 2);
    }

    #[test]
    fn test_late_first_arrival_utilization_by_discipline() {
        let processes = procs(&[(1, 4, 2)]);

        let (fcfs, fcfs_summary) = Simulator::fcfs().evaluate(&processes).unwrap();
        assert_eq!(fcfs.total_time(), 6);
        assert!((fcfs_summary.cpu_utilization - 100.0 / 3.0).abs() < 1e-10);

        let (srtf, srtf_summary) = Simulator::srtf().evaluate(&processes).unwrap();
        assert_eq!(srtf.total_time(), 2);
        assert!((srtf_summary.cpu_utilization - 100.0).abs() < 1e-10);
    }

    // ======================== Shared ========================

    #[test]
    fn test_clock_overflow_is_rejected_before_running() {
        for sim in [Simulator::fcfs(), Simulator::round_robin(2), Simulator::srtf()] {
            let err = sim
                .evaluate(&procs(&[(1, Ticks::MAX - 1, 5)]))
                .unwrap_err();
            assert!(!err.is_defect());
            assert_eq!(
                err.validation_errors()[0].kind,
                ValidationErrorKind::InvalidProcess
            );
        }
    }

    #[test]
    fn test_empty_input_is_error() {
        for sim in [Simulator::fcfs(), Simulator::round_robin(2), Simulator::srtf()] {
            let err = sim.run(&[]).unwrap_err();
            assert_eq!(
                err.validation_errors()[0].kind,
                ValidationErrorKind::EmptyInput
            );
        }
    }

    #[test]
    fn test_invalid_process_is_error() {
        let err = Simulator::srtf()
            .run(&procs(&[(1, 0, 0)]))
            .unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::InvalidProcess
        );
    }

    #[test]
    fn test_context_switch_reported_not_applied() {
        let config = SimulationConfig::new(Discipline::Fcfs).with_context_switch(3);
        let result = Simulator::new(config)
            .run(&procs(&[(1, 0, 2), (2, 0, 2)]))
            .unwrap();
        assert_eq!(result.context_switch(), 3);
        assert_eq!(finish(&result, 2), 4);
    }

    #[test]
    fn test_descriptors_untouched_and_results_repeatable() {
        let input = procs(&[(1, 0, 5), (2, 1, 3), (3, 2, 1)]);
        let snapshot = input.clone();
        let sim = Simulator::round_robin(2);
        let first = sim.evaluate(&input).unwrap();
        let second = sim.evaluate(&input).unwrap();
        assert_eq!(input, snapshot);
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);

        let carried: Vec<ProcessDescriptor> =
            first.0.processes().iter().map(|p| *p.descriptor()).collect();
        assert_eq!(carried, input);
    }

    #[test]
    fn test_evaluate_uses_configured_waiting_mode() {
        let config = SimulationConfig::round_robin(3)
            .with_waiting_time_mode(WaitingTimeMode::ClampRoundRobin);
        let sim = Simulator::new(config);
        assert_eq!(sim.config().discipline, Discipline::RoundRobin);
        assert_eq!(sim.config().waiting_time, WaitingTimeMode::ClampRoundRobin);

        let (_, summary) = sim.evaluate(&procs(&[(1, 0, 4), (2, 2, 4)])).unwrap();
        assert_eq!(summary.process(2).unwrap().waiting_time, 2);
    }

    #[test]
    fn test_compare_disciplines() {
        let input = procs(&[(1, 0, 5), (2, 1, 3)]);
        let all = compare_disciplines(&input, &SimulationConfig::round_robin(2)).unwrap();
        assert_eq!(all.len(), 3);
        let disciplines: Vec<_> = all.iter().map(|(r, _)| r.discipline()).collect();
        assert_eq!(disciplines, Discipline::ALL.to_vec());
        for (result, _) in &all {
            assert_eq!(result.timeline().occupied_units(), 8);
        }
    }

    #[derive(Debug)]
    struct StuckPolicy;

    impl DispatchPolicy for StuckPolicy {
        fn name(&self) -> &'static str {
            "STUCK"
        }

        fn select(&mut self, clock: i64, _processes: &[ProcessState]) -> Dispatch {
            Dispatch::IdleUntil(clock)
        }
    }

    #[derive(Debug)]
    struct QuitterPolicy;

    impl DispatchPolicy for QuitterPolicy {
        fn name(&self) -> &'static str {
            "QUIT"
        }

        fn select(&mut self, _clock: i64, _processes: &[ProcessState]) -> Dispatch {
            Dispatch::Finished
        }
    }

    #[test]
    fn test_non_advancing_idle_is_defect() {
        let err = Simulator::fcfs()
            .execute(&procs(&[(1, 0, 1)]), &mut StuckPolicy)
            .unwrap_err();
        assert!(err.is_defect());
    }

    #[test]
    fn test_premature_finish_is_defect() {
        let err = Simulator::fcfs()
            .execute(&procs(&[(1, 0, 1)]), &mut QuitterPolicy)
            .unwrap_err();
        assert!(err.is_defect());
    }
}
