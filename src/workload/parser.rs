//! Legacy workload text formats.
//!
//! | Layout | Header | Body | Trailer |
//! |--------|--------|------|---------|
//! | `ContextSwitchHeader` | context switch | processes | - |
//! | `QuantumHeader` | quantum, context switch | processes | - |
//! | `ContextSwitchTrailer` | - | processes | context switch |
//!
//! Process lines are `pid arrival burst`. Blank lines are skipped. Values are
//! only parsed here; range checks happen in `validation`.

use super::Workload;
use crate::error::{Error, Result};
use crate::models::{Discipline, ProcessDescriptor, Ticks};

/// Where the scalar parameters sit in a legacy file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyLayout {
    /// First line: context switch.
    ContextSwitchHeader,
    /// First line: time quantum; second line: context switch.
    QuantumHeader,
    /// Last line: context switch.
    ContextSwitchTrailer,
}

impl LegacyLayout {
    /// Layout historically used for each discipline's input file.
    pub fn for_discipline(discipline: Discipline) -> Self {
        match discipline {
            Discipline::Fcfs => LegacyLayout::ContextSwitchHeader,
            Discipline::RoundRobin => LegacyLayout::QuantumHeader,
            Discipline::Srtf => LegacyLayout::ContextSwitchTrailer,
        }
    }
}

/// Parses a legacy workload file.
pub fn parse_legacy(text: &str, layout: LegacyLayout) -> Result<Workload> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let (time_quantum, context_switch, body) = match layout {
        LegacyLayout::ContextSwitchHeader => {
            let [cs, body @ ..] = &lines[..] else {
                return Err(missing("context switch"));
            };
            (None, parse_scalar(*cs, "context switch")?, body)
        }
        LegacyLayout::QuantumHeader => {
            let [quantum, cs, body @ ..] = &lines[..] else {
                return Err(missing("time quantum and context switch"));
            };
            (
                Some(parse_scalar(*quantum, "time quantum")?),
                parse_scalar(*cs, "context switch")?,
                body,
            )
        }
        LegacyLayout::ContextSwitchTrailer => {
            let [body @ .., cs] = &lines[..] else {
                return Err(missing("context switch"));
            };
            (None, parse_scalar(*cs, "context switch")?, body)
        }
    };

    let processes = body
        .iter()
        .map(|&line| parse_process(line))
        .collect::<Result<Vec<_>>>()?;

    Ok(Workload {
        processes,
        context_switch,
        time_quantum,
    })
}

type Line<'a> = (usize, &'a str);

fn missing(what: &str) -> Error {
    Error::Parse {
        line: 0,
        message: format!("missing {what} line"),
    }
}

fn parse_scalar((line, text): Line<'_>, what: &str) -> Result<Ticks> {
    text.parse().map_err(|_| Error::Parse {
        line,
        message: format!("expected {what} as an integer, got '{text}'"),
    })
}

fn parse_process((line, text): Line<'_>) -> Result<ProcessDescriptor> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [id, arrival, burst] = fields[..] else {
        return Err(Error::Parse {
            line,
            message: format!(
                "expected 'pid arrival burst', got {} field(s)",
                fields.len()
            ),
        });
    };

    let bad = |name: &str, value: &str| Error::Parse {
        line,
        message: format!("invalid {name} '{value}'"),
    };
    Ok(ProcessDescriptor::new(
        id.parse().map_err(|_| bad("process id", id))?,
        arrival.parse().map_err(|_| bad("arrival time", arrival))?,
        burst.parse().map_err(|_| bad("burst time", burst))?,
    ))
}
