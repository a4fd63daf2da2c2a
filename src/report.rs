//! Text renderings of a simulation result.
//!
//! - `render_gantt`: one row per process, `#` where it held the CPU.
//! - `render_segments`: the coalesced timeline with idle gaps, in time order.

use crate::models::{SimulationResult, Ticks, Timeline};

/// Widest chart `render_gantt` draws, in ticks.
pub const MAX_GANTT_WIDTH: Ticks = 200;

/// Renders a textual Gantt chart.
///
/// ```text
///      0123456789
/// P1   ##..##.#
/// P2   ..##..#.
/// ```
///
/// The chart starts at the earliest arrival and spans at most
/// [`MAX_GANTT_WIDTH`] ticks; a note line marks a cut-off chart. A tens
/// ruler line is added above the units ruler once the run reaches tick 10.
pub fn render_gantt(result: &SimulationResult) -> String {
    let origin = result
        .processes()
        .iter()
        .map(|p| p.arrival_time())
        .min()
        .unwrap_or(0);
    let end = result.end_time().max(origin);
    let stop = end.min(origin.saturating_add(MAX_GANTT_WIDTH));

    let labels: Vec<String> = result
        .processes()
        .iter()
        .map(|p| format!("P{}", p.id()))
        .collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0) + 2;
    let pad = " ".repeat(width);

    let mut lines = Vec::new();
    if end >= 10 {
        let tens: String = (origin..stop)
            .map(|t| if t % 10 == 0 { digit(t / 10 % 10) } else { ' ' })
            .collect();
        lines.push(format!("{pad}{}", tens.trim_end()));
    }
    let units: String = (origin..stop).map(|t| digit(t % 10)).collect();
    lines.push(format!("{pad}{units}"));

    let timeline = result.timeline();
    for (label, process) in labels.iter().zip(result.processes()) {
        let mut row = vec!['.'; (stop - origin) as usize];
        for entry in timeline
            .entries()
            .iter()
            .filter(|e| e.process_id == process.id())
        {
            for t in entry.start.max(origin)..entry.end().min(stop) {
                row[(t - origin) as usize] = '#';
            }
        }
        let row: String = row.into_iter().collect();
        lines.push(format!("{label:width$}{row}"));
    }

    if stop < end {
        lines.push(format!("(cut at tick {stop} of {end})"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders the timeline as `[start-end P<id>]` segments, idle gaps included.
pub fn render_segments(timeline: &Timeline) -> String {
    let mut parts = Vec::new();
    let mut cursor: Ticks = 0;
    for entry in timeline.coalesced() {
        if entry.start > cursor {
            parts.push(format!("[{}-{} idle]", cursor, entry.start));
        }
        parts.push(format!("[{}-{} P{}]", entry.start, entry.end(), entry.process_id));
        cursor = entry.end();
    }
    parts.join(" ")
}

fn digit(n: Ticks) -> char {
    char::from_digit(n as u32, 10).unwrap_or('?')
}
