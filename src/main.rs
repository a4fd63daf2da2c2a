use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_cpusched::config::{Scenario, SimulationConfig, WaitingTimeMode};
use u_cpusched::models::{Discipline, ProcessDescriptor, SimulationResult};
use u_cpusched::report;
use u_cpusched::scheduler::{compare_disciplines, MetricsSummary, Simulator};
use u_cpusched::workload::{Workload, WorkloadGenerator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Single-CPU scheduling simulator (FCFS, RR, SRTF)", long_about = None)]
struct Args {
    /// Workload file: a `.toml` scenario or a legacy text file
    input: Option<PathBuf>,

    /// Scheduling discipline: fcfs, rr, or srtf
    #[arg(short, long)]
    discipline: Option<Discipline>,

    /// Round Robin time quantum (overrides the workload file)
    #[arg(short, long)]
    quantum: Option<i64>,

    /// Context switch cost to report (overrides the workload file)
    #[arg(long)]
    context_switch: Option<i64>,

    /// Generate a random workload instead of reading a file
    #[arg(long, conflicts_with = "input")]
    random: bool,

    /// Arrival horizon for --random
    #[arg(long, default_value_t = 20)]
    horizon: i64,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Run all three disciplines and compare them
    #[arg(long)]
    compare: bool,

    /// Clamp negative Round Robin waiting times to zero (legacy reports)
    #[arg(long)]
    clamp_rr_waiting: bool,

    /// Print a text Gantt chart
    #[arg(short, long)]
    gantt: bool,

    /// Save metrics to a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print aggregate metrics only
    #[arg(long)]
    quiet: bool,
}

#[derive(Tabled)]
struct ProcessRow {
    #[tabled(rename = "Process")]
    id: String,
    #[tabled(rename = "Arrival")]
    arrival: i64,
    #[tabled(rename = "Burst")]
    burst: i64,
    #[tabled(rename = "Start")]
    start: i64,
    #[tabled(rename = "Finish")]
    finish: i64,
    #[tabled(rename = "Waiting")]
    waiting: i64,
    #[tabled(rename = "Turnaround")]
    turnaround: i64,
    #[tabled(rename = "Response")]
    response: i64,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Discipline")]
    discipline: String,
    #[tabled(rename = "Avg waiting")]
    waiting: String,
    #[tabled(rename = "Avg turnaround")]
    turnaround: String,
    #[tabled(rename = "Avg response")]
    response: String,
    #[tabled(rename = "CPU util")]
    utilization: String,
    #[tabled(rename = "Makespan")]
    makespan: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let (processes, config) = load(&args)?;
    info!(
        processes = processes.len(),
        discipline = %config.discipline,
        "workload loaded"
    );

    let runs = if args.compare {
        compare_disciplines(&processes, &config).context("comparison failed")?
    } else {
        vec![Simulator::new(config.clone())
            .evaluate(&processes)
            .context("simulation failed")?]
    };

    println!("Context switch: {}", config.context_switch);
    if let Some(q) = reported_quantum(&config, args.compare) {
        println!("Time quantum: {q}");
    }

    for (result, summary) in &runs {
        print_run(result, summary, &args);
    }

    if args.compare {
        print_comparison(&runs);
    }

    if let Some(path) = &args.output {
        let summaries: Vec<&MetricsSummary> = runs.iter().map(|(_, s)| s).collect();
        let json = serde_json::to_string_pretty(&summaries)?;
        fs::write(path, json).with_context(|| format!("could not write {}", path.display()))?;
        info!(path = %path.display(), "metrics saved");
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(args: &Args) -> Result<(Vec<ProcessDescriptor>, SimulationConfig)> {
    let discipline = args.discipline.unwrap_or(Discipline::Fcfs);

    let (processes, mut config) = match &args.input {
        Some(path) if is_toml(path) => {
            let scenario = Scenario::from_file(path)
                .with_context(|| format!("could not load scenario {}", path.display()))?;
            let mut config = scenario.simulation;
            if let Some(d) = args.discipline {
                config.discipline = d;
            }
            (scenario.processes, config)
        }
        Some(path) => {
            let workload = Workload::from_path(path, discipline)
                .with_context(|| format!("could not load workload {}", path.display()))?;
            let config = workload.apply_to(&SimulationConfig::new(discipline));
            (workload.processes, config)
        }
        None if args.random => {
            let processes = WorkloadGenerator::new(args.seed)
                .with_horizon(args.horizon)
                .generate();
            (processes, SimulationConfig::new(discipline))
        }
        None => bail!("no workload given: pass an input file or --random"),
    };

    if let Some(q) = args.quantum {
        config.time_quantum = Some(q);
    }
    if let Some(cs) = args.context_switch {
        config.context_switch = cs;
    }
    if args.clamp_rr_waiting {
        config = config.with_waiting_time_mode(WaitingTimeMode::ClampRoundRobin);
    }
    Ok((processes, config))
}

/// Quantum worth printing: only when a Round Robin run will use it.
fn reported_quantum(config: &SimulationConfig, compare: bool) -> Option<i64> {
    config
        .time_quantum
        .filter(|_| config.discipline.needs_quantum() || compare)
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

fn print_run(result: &SimulationResult, summary: &MetricsSummary, args: &Args) {
    println!("\n=== {} ===", summary.discipline);

    if !args.quiet {
        let rows: Vec<ProcessRow> = summary
            .processes
            .iter()
            .map(|m| ProcessRow {
                id: format!("P{}", m.id),
                arrival: m.arrival_time,
                burst: m.burst_time,
                start: m.start_time,
                finish: m.finish_time,
                waiting: m.waiting_time,
                turnaround: m.turnaround_time,
                response: m.response_time,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    println!("Average waiting time:    {:.2}", summary.average_waiting_time);
    println!("Average turnaround time: {:.2}", summary.average_turnaround_time);
    println!("Average response time:   {:.2}", summary.average_response_time);
    println!("CPU utilization:         {:.2}%", summary.cpu_utilization);
    println!("Throughput:              {:.3} processes/tick", summary.throughput);

    if args.gantt {
        println!("\n{}", report::render_segments(result.timeline()));
        print!("{}", report::render_gantt(result));
    }
}

fn print_comparison(runs: &[(SimulationResult, MetricsSummary)]) {
    let rows: Vec<ComparisonRow> = runs
        .iter()
        .map(|(_, s)| ComparisonRow {
            discipline: s.discipline.to_string(),
            waiting: format!("{:.2}", s.average_waiting_time),
            turnaround: format!("{:.2}", s.average_turnaround_time),
            response: format!("{:.2}", s.average_response_time),
            utilization: format!("{:.2}%", s.cpu_utilization),
            makespan: s.makespan,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantum_reported_only_for_round_robin() {
        let fcfs = SimulationConfig::new(Discipline::Fcfs).with_time_quantum(4);
        assert_eq!(reported_quantum(&fcfs, false), None);
        assert_eq!(reported_quantum(&fcfs, true), Some(4));
        assert_eq!(reported_quantum(&SimulationConfig::round_robin(2), false), Some(2));
        assert_eq!(reported_quantum(&SimulationConfig::new(Discipline::Srtf), true), None);
    }

    #[test]
    fn test_cli_flags_parse() {
        let args = Args::parse_from(["u-cpusched", "--random", "-d", "rr", "-q", "3", "--clamp-rr-waiting"]);
        let (processes, config) = load(&args).unwrap();
        assert!(!processes.is_empty());
        assert_eq!(config.discipline, Discipline::RoundRobin);
        assert_eq!(config.time_quantum, Some(3));
        assert_eq!(config.waiting_time, WaitingTimeMode::ClampRoundRobin);
    }
}
