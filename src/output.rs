//! Text renderings of a trace: CSV, a summary, and a terminal oscilloscope.
//!
//! Non-finite samples are never drawn. CSV leaves their cells empty and the
//! plot skips them.

use std::io::Write;

use crate::circuit::{CircuitType, ParameterSet};
use crate::error::Result;
use crate::signal::SampleSequence;
use crate::RAIL_VOLTAGE;

/// Rows of the terminal plot, top (+12 V) to bottom (−12 V).
pub const PLOT_ROWS: usize = 25;

/// Write the trace as CSV.
///
/// Format:
/// ```csv
/// time,input,output
/// 0,0,0
/// 1,0.0418,-0.0837
/// ```
///
/// Two-input circuits get an extra `input2` column.
pub fn write_csv<W: Write>(samples: &SampleSequence, writer: &mut W) -> Result<()> {
    let two_inputs = samples.has_input2();
    if two_inputs {
        writeln!(writer, "time,input,output,input2")?;
    } else {
        writeln!(writer, "time,input,output")?;
    }
    for p in samples {
        write!(writer, "{},{},{}", p.time, cell(p.input), cell(p.output))?;
        if two_inputs {
            write!(writer, ",{}", p.input2.map(cell).unwrap_or_default())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn cell(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        String::new()
    }
}

/// Min and max of the finite values of one trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRange {
    pub min: f64,
    pub max: f64,
}

impl TraceRange {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.filter(|v| v.is_finite()).fold(None, |acc, v| {
            Some(match acc {
                None => TraceRange { min: v, max: v },
                Some(r) => TraceRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                },
            })
        })
    }
}

/// Per-trace ranges of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSummary {
    pub input: Option<TraceRange>,
    pub input2: Option<TraceRange>,
    pub output: Option<TraceRange>,
    pub non_finite: usize,
}

impl TraceSummary {
    pub fn of(samples: &SampleSequence) -> Self {
        Self {
            input: TraceRange::of(samples.iter().map(|p| p.input)),
            input2: TraceRange::of(samples.iter().filter_map(|p| p.input2)),
            output: TraceRange::of(samples.iter().map(|p| p.output)),
            non_finite: samples.non_finite_count(),
        }
    }
}

/// Write a human readable summary of the circuit state and trace.
pub fn write_summary<W: Write>(
    circuit: CircuitType,
    params: &ParameterSet,
    samples: &SampleSequence,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "{circuit}")?;
    for (key, value) in params.iter() {
        match crate::circuit::control(circuit, key) {
            Some(d) => {
                let prec = d.display_precision();
                writeln!(writer, "  {key:<6} = {value:.prec$} {}", d.unit)?;
            }
            // Defaults without a control, such as the summing amplifier's freq
            None => writeln!(writer, "  {key:<6} = {value}")?,
        }
    }

    let summary = TraceSummary::of(samples);
    let traces = [("input", summary.input), ("input2", summary.input2), ("output", summary.output)];
    for (name, range) in traces {
        match range {
            Some(r) => writeln!(writer, "  {name:<6}   {:>9.4} .. {:>9.4} V", r.min, r.max)?,
            None if name == "input2" => {}
            None => writeln!(writer, "  {name:<6}   (no finite samples)")?,
        }
    }
    if summary.non_finite > 0 {
        writeln!(writer, "  {} of {} samples are not finite", summary.non_finite, samples.len())?;
    }
    Ok(())
}

/// Draw the trace as ASCII art with a fixed ±12 V vertical axis.
///
/// `i` marks the input, `j` the second input, `o` the output and `*` a
/// point where input and output overlap. One column per sample.
pub fn write_plot<W: Write>(samples: &SampleSequence, writer: &mut W) -> Result<()> {
    let width = samples.len();
    let mut grid = vec![vec![' '; width]; PLOT_ROWS];
    let zero_row = row_for(0.0).unwrap_or(PLOT_ROWS / 2);
    grid[zero_row].iter_mut().for_each(|c| *c = '-');

    for (col, p) in samples.iter().enumerate() {
        if let Some(row) = p.input2.and_then(row_for) {
            grid[row][col] = 'j';
        }
        if let Some(row) = row_for(p.input) {
            grid[row][col] = 'i';
        }
        if let Some(row) = row_for(p.output) {
            grid[row][col] = if grid[row][col] == 'i' { '*' } else { 'o' };
        }
    }

    for (n, row) in grid.iter().enumerate() {
        let label = match n {
            0 => format!("{:>+4}", RAIL_VOLTAGE),
            _ if n == zero_row => format!("{:>4}", 0),
            _ if n == PLOT_ROWS - 1 => format!("{:>+4}", -RAIL_VOLTAGE),
            _ => "    ".to_string(),
        };
        writeln!(writer, "{label} |{}", row.iter().collect::<String>())?;
    }
    Ok(())
}

/// Footnote explaining what the plotted input trace means, if it is not a
/// plain voltage.
pub fn plot_note(circuit: CircuitType) -> Option<&'static str> {
    match circuit {
        CircuitType::PhotodiodeSensor => Some("* input shows relative light intensity"),
        CircuitType::BandPassFilter => Some("* input frequency sets the attenuation"),
        _ => None,
    }
}

/// Grid row for a voltage, or `None` if it cannot be drawn.
fn row_for(v: f64) -> Option<usize> {
    if !v.is_finite() || v.abs() > RAIL_VOLTAGE {
        return None;
    }
    let span = (PLOT_ROWS - 1) as f64;
    let frac = (RAIL_VOLTAGE - v) / (2.0 * RAIL_VOLTAGE);
    Some((frac * span).round() as usize)
}
