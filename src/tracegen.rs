use anyhow::{Context, Result};
use clap::Parser;
use rsched::{SchedulingPolicy, TraceReader, TraceWriter, VirtualTraceReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Priority scheduling demo trace generator")]
struct Cli {
    /// Number of processes to schedule
    #[arg(long, default_value_t = 5)]
    processes: usize,
    /// Random seed; the same seed always yields the same trace
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Largest burst time a process may get
    #[arg(long, default_value_t = 8)]
    max_burst: u32,
    /// Latest arrival time a process may get
    #[arg(long, default_value_t = 12)]
    max_arrival: u32,
    /// Output file (default: trace.json, or trace.json.br with --brotli)
    #[arg(long)]
    out: Option<String>,
    /// Write Brotli-compressed JSON
    #[arg(long)]
    brotli: bool,
    /// Schedule preemptively instead of run-to-completion
    #[arg(long)]
    preemptive: bool,
    /// Pretty-print the JSON (ignored with --brotli)
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.processes == 0 {
        anyhow::bail!("--processes must be at least 1");
    }
    if cli.max_burst == 0 {
        anyhow::bail!("--max-burst must be at least 1");
    }

    let output_path = cli.out.clone().unwrap_or_else(|| {
        if cli.brotli {
            "trace.json.br".to_string()
        } else {
            "trace.json".to_string()
        }
    });
    let output_path = if cli.brotli && !output_path.ends_with(".br") {
        format!("{}.br", output_path)
    } else {
        output_path
    };

    let policy = if cli.preemptive {
        SchedulingPolicy::Preemptive
    } else {
        SchedulingPolicy::NonPreemptive
    };
    let reader = VirtualTraceReader::with_config(cli.processes, cli.max_burst, cli.max_arrival, cli.seed)
        .policy(policy);
    let trace = reader.read()?;

    let mut writer = TraceWriter::new(&output_path)?.pretty(cli.pretty && !cli.brotli);
    writer
        .write_trace(&trace)
        .with_context(|| format!("Failed to write trace to {}", output_path))?;
    writer.finish()?;

    println!(
        "Trace written to: {} ({} steps, {} processes)",
        output_path,
        trace.step_count(),
        trace.statistics.process_details.len()
    );
    Ok(())
}
