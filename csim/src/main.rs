use std::fs::File;
use std::time::Instant;
use clap::Parser;
use csimlib::config::CacheConfig;
use csimlib::io::get_reader;
use csimlib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Simulates a set-associative cache against a valgrind memory trace"))]
struct Args {
    /// Number of set index bits
    #[arg(short = 's', long)]
    set_bits: u32,

    /// Number of lines per set
    #[arg(short = 'E', long)]
    associativity: u32,

    /// Number of block offset bits
    #[arg(short = 'b', long)]
    block_bits: u32,

    /// Path of the memory trace to replay
    #[arg(short, long)]
    trace: String,

    /// Echo every data record with the outcome of each of its references
    #[arg(short, long)]
    verbose: bool,

    /// Emit the result as JSON instead of the summary line
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    let config = CacheConfig::new(args.set_bits, args.associativity, args.block_bits)?;
    let mut simulator = Simulator::new(&config, args.verbose)?;
    let trace_file = File::open(&args.trace).map_err(|e| format!("Couldn't open the trace file at path {}: {e}", args.trace))?;
    let trace_reader = get_reader(trace_file)?;
    let result = simulator.simulate(trace_reader)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(result).map_err(|e| format!("Couldn't serialise the output {e}"))?);
    } else {
        println!("{result}");
    }
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed cache geometry: {config:?}");
        println!("Uninitialised cache lines: {}", simulator.get_uninitialised_line_count())
    }
    Ok(())
}
