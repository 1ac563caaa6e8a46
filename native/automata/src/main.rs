//! automata - load an automaton from JSON, determinize it and report.

use anyhow::Context;
use automata::Layout;
use automata::formlang::{codec, subset_construction};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "automata")]
#[command(about = "Determinize a finite automaton stored as JSON")]
#[command(version)]
struct Cli {
    /// Automaton document to load
    #[arg(default_value = "automaton.json")]
    path: PathBuf,

    /// Input to test against the determinized automaton (repeatable)
    #[arg(short, long = "accept", value_name = "INPUT")]
    accept: Vec<String>,

    /// Write the determinized automaton as JSON to this path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = File::open(&cli.path)
        .with_context(|| format!("failed to open {}", cli.path.display()))?;
    let (automaton, _) = codec::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to decode {}", cli.path.display()))?;
    info!(
        "loaded {} with {} states",
        cli.path.display(),
        automaton.states().len()
    );

    let dfa = if automaton.is_deterministic() {
        info!("automaton is already deterministic");
        automaton
    } else {
        let construction = subset_construction(&automaton);
        for (index, subset) in construction.subsets().iter().enumerate() {
            println!("New state: {index} with {subset:?}");
        }
        construction.into_automaton()
    };
    print!("{dfa}");

    for input in &cli.accept {
        let verdict = if dfa.is_accepted(input) { "accepted" } else { "rejected" };
        println!("{input:?}: {verdict}");
    }

    if let Some(output) = &cli.output {
        let file = File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        codec::to_writer(BufWriter::new(file), &dfa, &Layout::new())
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("wrote {}", output.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
