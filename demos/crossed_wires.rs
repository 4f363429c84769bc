use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{bail, eyre};

use adder_rs::adder::ripple_carry;
use adder_rs::circuit::CircuitGraph;
use adder_rs::eval::Assignment;
use adder_rs::parse::parse_puzzle;
use adder_rs::repair::Repair;
use adder_rs::wire::Wire;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Circuit description (initial values, blank line, gates).
    #[arg(value_name = "FILE", required_unless_present = "bits")]
    input: Option<PathBuf>,

    /// Use a correct reference adder of this width instead of reading a file.
    #[arg(long, value_name = "INT", conflicts_with = "input")]
    bits: Option<usize>,

    /// Swap the drivers of two wires before anything else, e.g. `--swap z05,c05`.
    #[arg(long, value_name = "A,B")]
    swap: Vec<String>,

    /// Write the repaired circuit in DOT format.
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Skip the repair search.
    #[arg(long)]
    no_repair: bool,

    /// Log level.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let log_level: simplelog::LevelFilter = args.log_level.parse().map_err(|e| eyre!("{}", e))?;
    simplelog::TermLogger::init(
        log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let (mut circuit, initial) = match (&args.input, args.bits) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path)?;
            let puzzle = parse_puzzle(&text)?;
            (puzzle.circuit()?, puzzle.initial)
        }
        (None, Some(bits)) => (CircuitGraph::new(ripple_carry(bits))?, Assignment::new()),
        (None, None) => bail!("either an input file or --bits is required"),
    };
    println!("circuit: {} gates, {} input bits", circuit.len(), circuit.input_width());

    for pair in args.swap.iter() {
        let (a, b) = pair
            .split_once(',')
            .ok_or_else(|| eyre!("bad --swap '{}', expected 'a,b'", pair))?;
        circuit.swap(&Wire::new(a.trim()), &Wire::new(b.trim()))?;
        println!("swapped {} and {}", a, b);
    }

    if !initial.is_empty() {
        let values = circuit.evaluate(&initial)?;
        match circuit.output_value(&values) {
            Some(value) => println!("Solution 1: {}", value),
            None => println!("Solution 1: some output wires were never resolved"),
        }
    }

    let mut highlight = Vec::new();
    if !args.no_repair {
        let report = Repair::new(&mut circuit).run()?;
        println!("defective bits: {:?}", report.defective_bits);
        for swap in report.swaps.iter() {
            println!("- {}", swap);
        }
        println!("Solution 2: {}", report.answer());
        highlight = report.wires().into_iter().cloned().collect();
    }

    if let Some(path) = &args.dot {
        let dot = circuit.to_dot(&highlight)?;
        println!("DOT in {:?}", path);
        std::fs::write(path, dot)?;
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
