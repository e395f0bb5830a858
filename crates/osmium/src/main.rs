use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use osmium_core::deadlock::{detect, Snapshot};
use osmium_core::memory::{plan, Demand, FitStrategy};
use osmium_core::paging::{simulate, ReplacementPolicy};
use osmium_core::report::{DeadlockReport, MemoryReport, PagingReport, SchedulingReport};
use osmium_core::scheduling::{self, ProcessSpec, SchedulingPolicy};
use osmium_core::DemoReport;
use osmium_utils::{info, init_logging, init_logging_for_tui};

mod render;
mod samples;
mod scenario;

/// Interactive terminal demos of classic operating systems algorithms.
#[derive(Parser, Debug)]
#[command(name = "osmium")]
#[command(version)]
#[command(about = "Interactive terminal demos of classic operating systems algorithms", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Detect deadlock in a resource snapshot
    Deadlock
    {
        /// JSON scenario file (a built-in sample runs when omitted)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Use headless mode (no TUI, just print the report and exit)
        #[arg(long, default_value_t = false)]
        headless: bool,
    },
    /// Replay a page reference string under replacement policies
    Paging
    {
        /// JSON scenario file (a built-in sample runs when omitted)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Replacement policy to simulate
        #[arg(long, value_enum, default_value = "all")]
        policy: PolicyArg,
        /// Use headless mode (no TUI, just print the report and exit)
        #[arg(long, default_value_t = false)]
        headless: bool,
    },
    /// Schedule a process batch under CPU disciplines
    Schedule
    {
        /// JSON scenario file (a built-in sample runs when omitted)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Scheduling discipline to simulate
        #[arg(long, value_enum, default_value = "all")]
        policy: DisciplineArg,
        /// Use headless mode (no TUI, just print the report and exit)
        #[arg(long, default_value_t = false)]
        headless: bool,
    },
    /// Place memory demands into fixed partitions
    Memory
    {
        /// JSON scenario file (a built-in sample runs when omitted)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Fit strategy to simulate
        #[arg(long, value_enum, default_value = "all")]
        strategy: StrategyArg,
        /// Use headless mode (no TUI, just print the report and exit)
        #[arg(long, default_value_t = false)]
        headless: bool,
    },
}

/// Page replacement policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg
{
    Fifo,
    Lru,
    Optimal,
    All,
}

impl PolicyArg
{
    fn policies(self) -> Vec<ReplacementPolicy>
    {
        match self {
            Self::Fifo => vec![ReplacementPolicy::Fifo],
            Self::Lru => vec![ReplacementPolicy::Lru],
            Self::Optimal => vec![ReplacementPolicy::Optimal],
            Self::All => ReplacementPolicy::ALL.to_vec(),
        }
    }
}

/// Scheduling discipline selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisciplineArg
{
    Fcfs,
    Sjf,
    RoundRobin,
    All,
}

impl DisciplineArg
{
    fn disciplines(self, quantum: u64) -> Vec<SchedulingPolicy>
    {
        match self {
            Self::Fcfs => vec![SchedulingPolicy::Fcfs],
            Self::Sjf => vec![SchedulingPolicy::Sjf],
            Self::RoundRobin => vec![SchedulingPolicy::RoundRobin { quantum }],
            Self::All => vec![
                SchedulingPolicy::Fcfs,
                SchedulingPolicy::Sjf,
                SchedulingPolicy::RoundRobin { quantum },
            ],
        }
    }
}

/// Fit strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg
{
    FirstFit,
    BestFit,
    All,
}

impl StrategyArg
{
    fn strategies(self) -> Vec<FitStrategy>
    {
        match self {
            Self::FirstFit => vec![FitStrategy::FirstFit],
            Self::BestFit => vec![FitStrategy::BestFit],
            Self::All => FitStrategy::ALL.to_vec(),
        }
    }
}

fn main()
{
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file; headless runs
    // log straight to the console (reads RUST_LOG and OSMIUM_LOG_FORMAT)
    let headless = matches!(
        cli.command,
        Commands::Deadlock { headless: true, .. }
            | Commands::Paging { headless: true, .. }
            | Commands::Schedule { headless: true, .. }
            | Commands::Memory { headless: true, .. }
    );

    if headless {
        if let Err(e) = init_logging() {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
        if let Err(e) = run_headless(&cli.command) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    } else {
        if let Err(e) = init_logging_for_tui(None) {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("Failed to start async runtime: {e}");
                process::exit(1);
            }
        };
        if let Err(e) = rt.block_on(run_interactive(&cli.command)) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_headless(command: &Commands) -> Result<(), Box<dyn std::error::Error>>
{
    let report = build_report(command)?;
    render::print_report(&report);
    Ok(())
}

async fn run_interactive(command: &Commands) -> Result<(), Box<dyn std::error::Error>>
{
    let report = build_report(command)?;
    osmium_ui::run_tui(report).await?;
    Ok(())
}

/// Load the scenario (or fall back to the sample) and run the demo
fn build_report(command: &Commands) -> Result<DemoReport, Box<dyn std::error::Error>>
{
    match command {
        Commands::Deadlock { scenario, .. } => {
            let data = match scenario {
                Some(path) => scenario::load(path)?,
                None => samples::deadlock(),
            };
            info!("Detecting deadlock over {} processes", data.processes.len());

            let snapshot = Snapshot::build(
                &data.processes,
                &data.resources,
                &data.totals,
                &data.allocation,
                &data.request,
            )?;
            let detection = detect(&snapshot);

            Ok(DemoReport::Deadlock(DeadlockReport { snapshot, detection }))
        }
        Commands::Paging { scenario, policy, .. } => {
            let data = match scenario {
                Some(path) => scenario::load(path)?,
                None => samples::paging(),
            };
            info!("Replaying {} page references", data.reference.len());

            let mut runs = Vec::new();
            for policy in policy.policies() {
                runs.push(simulate(policy, &data.reference, data.capacity)?);
            }

            Ok(DemoReport::Paging(PagingReport {
                reference: data.reference,
                capacity: data.capacity,
                runs,
            }))
        }
        Commands::Schedule { scenario, policy, .. } => {
            let data = match scenario {
                Some(path) => scenario::load(path)?,
                None => samples::scheduling(),
            };
            info!("Scheduling {} processes", data.processes.len());

            let specs: Vec<ProcessSpec> = data
                .processes
                .iter()
                .map(|p| ProcessSpec::new(&p.name, p.arrival, p.burst))
                .collect();

            let mut runs = Vec::new();
            for discipline in policy.disciplines(data.quantum) {
                runs.push(scheduling::run(discipline, &specs)?);
            }

            Ok(DemoReport::Scheduling(SchedulingReport { runs }))
        }
        Commands::Memory { scenario, strategy, .. } => {
            let data = match scenario {
                Some(path) => scenario::load(path)?,
                None => samples::memory(),
            };
            info!("Placing {} demands into {} blocks", data.demands.len(), data.blocks.len());

            let demands: Vec<Demand> = data
                .demands
                .iter()
                .map(|d| Demand::new(&d.process, d.size))
                .collect();

            let plans = strategy
                .strategies()
                .into_iter()
                .map(|strategy| plan(strategy, &data.blocks, &demands))
                .collect();

            Ok(DemoReport::Memory(MemoryReport { plans }))
        }
    }
}
