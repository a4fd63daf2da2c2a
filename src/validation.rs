//! Input validation for simulation runs.
//!
//! Checks the process set and discipline parameters before a run starts.
//! Detects:
//! - Empty process sets
//! - Non-positive burst times, negative arrival times, zero IDs
//! - Duplicate process IDs
//! - Process sets whose clock would overflow `Ticks`
//! - Missing or non-positive Round Robin time quantum
//! - Negative context switch cost
//!
//! Every problem is collected; nothing is simulated unless all checks pass.

use std::collections::HashSet;

use crate::config::SimulationConfig;
use crate::models::{ProcessDescriptor, Ticks};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Bad burst time, arrival time, or ID (including duplicates).
    InvalidProcess,
    /// Round Robin quantum missing or not positive.
    InvalidQuantum,
    /// Negative context switch cost.
    InvalidContextSwitch,
    /// No processes were supplied.
    EmptyInput,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. At least one process
/// 2. `id > 0`
/// 3. `arrival_time >= 0`
/// 4. `burst_time > 0`
/// 5. No duplicate IDs
/// 6. Latest arrival plus total burst fits in `Ticks`
pub fn validate_processes(processes: &[ProcessDescriptor]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "No processes to schedule",
        ));
    }

    let mut seen = HashSet::new();
    for p in processes {
        if p.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcess,
                "Process ID must be positive, got 0",
            ));
        }
        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcess,
                format!(
                    "Process {} has negative arrival time {}",
                    p.id, p.arrival_time
                ),
            ));
        }
        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcess,
                format!(
                    "Process {} has non-positive burst time {}",
                    p.id, p.burst_time
                ),
            ));
        }
        if !seen.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcess,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
    }

    // The clock never passes the latest arrival plus the sum of all bursts.
    let horizon = processes
        .iter()
        .filter(|p| p.burst_time > 0)
        .try_fold(0 as Ticks, |acc, p| acc.checked_add(p.burst_time))
        .and_then(|work| {
            let latest = processes.iter().map(|p| p.arrival_time.max(0)).max()?;
            latest.checked_add(work)
        });
    if !processes.is_empty() && horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidProcess,
            "Arrival and burst times overflow the simulation clock",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates discipline parameters.
pub fn validate_parameters(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.discipline.needs_quantum() {
        match config.time_quantum {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantum,
                "Round Robin requires a time quantum",
            )),
            Some(q) if q <= 0 => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantum,
                format!("Time quantum must be positive, got {q}"),
            )),
            Some(_) => {}
        }
    }

    if config.context_switch < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidContextSwitch,
            format!(
                "Context switch cost must be non-negative, got {}",
                config.context_switch
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates both the process set and the parameters, merging all errors.
pub fn validate_input(
    processes: &[ProcessDescriptor],
    config: &SimulationConfig,
) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(mut e) = validate_processes(processes) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_parameters(config) {
        errors.append(&mut e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Discipline;

    fn sample_processes() -> Vec<ProcessDescriptor> {
        vec![
            ProcessDescriptor::new(1, 0, 5),
            ProcessDescriptor::new(2, 1, 3),
            ProcessDescriptor::new(3, 4, 1),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_processes(&sample_processes()).is_ok());
        assert!(validate_input(&sample_processes(), &SimulationConfig::round_robin(2)).is_ok());
    }

    #[test]
    fn test_empty_input() {
        let errors = validate_processes(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInput);
    }

    #[test]
    fn test_duplicate_id() {
        let processes = vec![
            ProcessDescriptor::new(1, 0, 5),
            ProcessDescriptor::new(1, 2, 3),
        ];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidProcess && e.message.contains("Duplicate")));
    }

    #[test]
    fn test_non_positive_burst() {
        let processes = vec![
            ProcessDescriptor::new(1, 0, 0),
            ProcessDescriptor::new(2, 0, -3),
        ];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidProcess));
    }

    #[test]
    fn test_negative_arrival_and_zero_id() {
        let processes = vec![ProcessDescriptor::new(0, -1, 2)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let errors = validate_processes(&[ProcessDescriptor::new(1, Ticks::MAX - 1, 5)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidProcess);

        let processes = vec![
            ProcessDescriptor::new(1, 0, Ticks::MAX / 2 + 1),
            ProcessDescriptor::new(2, 0, Ticks::MAX / 2 + 1),
        ];
        assert!(validate_processes(&processes).is_err());

        // Right at the edge is still fine
        assert!(validate_processes(&[ProcessDescriptor::new(1, Ticks::MAX - 5, 5)]).is_ok());
    }

    #[test]
    fn test_quantum_checks() {
        let mut config = SimulationConfig::round_robin(0);
        let errors = validate_parameters(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);

        config.time_quantum = None;
        let errors = validate_parameters(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);

        // Quantum is irrelevant for FCFS
        let fcfs = SimulationConfig::new(Discipline::Fcfs);
        assert!(validate_parameters(&fcfs).is_ok());
    }

    #[test]
    fn test_negative_context_switch() {
        let config = SimulationConfig::new(Discipline::Srtf).with_context_switch(-1);
        let errors = validate_parameters(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidContextSwitch);
    }

    #[test]
    fn test_multiple_errors() {
        let config = SimulationConfig::round_robin(-2).with_context_switch(-1);
        let errors = validate_input(&[], &config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
