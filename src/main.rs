//! Circuit Scope - Analog Circuit Teaching Simulator
//!
//! Prints the oscilloscope trace of one of the teaching circuits, optionally
//! with an explanation from the Gemini API.
//!
//! # Usage
//!
//! ```bash
//! circuit-scope --list
//! circuit-scope band-pass --set freq=1600 --format plot
//! API_KEY=... circuit-scope photodiode --set lux=1200 --format summary --explain
//! ```

use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use circuit_scope::{
    circuit::controls_for,
    error::{CircuitScopeError, Result},
    explain::{markup, ExplainConfig, Explainer},
    output, CircuitType, SimulationController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// time,input,output[,input2] rows
    Csv,
    /// ASCII oscilloscope
    Plot,
    /// Parameters and trace ranges
    Summary,
}

/// Analog circuit teaching simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit to simulate (see --list)
    #[arg(value_name = "CIRCUIT", default_value = "inverting")]
    circuit: String,

    /// Override a parameter, e.g. --set rf=4000 (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Plot)]
    format: Format,

    /// Ask the explanation backend about the circuit (reads API_KEY)
    #[arg(short, long)]
    explain: bool,

    /// Generative model used for --explain
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// List circuits and their parameters, then exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();

    if args.list {
        write_circuit_list(&mut stdout)?;
        return Ok(());
    }

    let circuit: CircuitType = args.circuit.parse()?;
    let mut sim = SimulationController::with_circuit(circuit);
    for assignment in &args.set {
        let (key, value) = parse_assignment(assignment)?;
        sim.try_set_parameter(key, value)?;
    }

    match args.format {
        Format::Csv => output::write_csv(sim.samples(), &mut stdout)?,
        Format::Plot => {
            writeln!(stdout, "{circuit}")?;
            output::write_plot(sim.samples(), &mut stdout)?;
            if let Some(note) = output::plot_note(circuit) {
                writeln!(stdout, "{note}")?;
            }
        }
        Format::Summary => output::write_summary(circuit, sim.params(), sim.samples(), &mut stdout)?,
    }

    if args.explain {
        let mut config = ExplainConfig::from_env();
        if let Some(model) = args.model {
            config = config.with_model(model);
        }
        let explainer = Explainer::gemini(config);
        sim.explain_with(&explainer);
        if let Some(text) = sim.explanation() {
            writeln!(stdout)?;
            writeln!(stdout, "{}", markup::to_ansi(text))?;
        }
    }

    stdout.flush()?;
    Ok(())
}

/// Parse `key=value`.
fn parse_assignment(input: &str) -> Result<(&str, f64)> {
    let invalid = || CircuitScopeError::InvalidAssignment {
        input: input.to_string(),
    };
    let (key, value) = input.split_once('=').ok_or_else(invalid)?;
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;
    Ok((key.trim(), value))
}

fn write_circuit_list<W: Write>(writer: &mut W) -> Result<()> {
    for circuit in CircuitType::ALL {
        writeln!(writer, "{:<16} {}", circuit.slug(), circuit)?;
        for ctrl in controls_for(circuit) {
            writeln!(
                writer,
                "    {:<6} {:<28} {} .. {} {} (step {})",
                ctrl.id, ctrl.label, ctrl.min, ctrl.max, ctrl.unit, ctrl.step
            )?;
        }
    }
    Ok(())
}
