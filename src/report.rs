//! Human-readable result reports.
//!
//! Perceptron results are written as `Actual:` / `Classified:` blocks, Hopfield
//! results as side-by-side `Input:` / `Recalled:` grids.

use ndarray::ArrayView1;
use std::fmt::Write as _;
use std::path::Path;

use crate::core::{NetError, NetResult};
use crate::data::{Classification, LabelTable, Sample};
use crate::recall::RecallOutcome;
use crate::utils::join_values;

/// One Perceptron classification block.
///
/// ```text
/// Actual:
/// A
/// 1 -1 -1 -1 -1 -1 -1
/// Classified:
/// Undecided
/// 1 1 -1 -1 -1 -1 -1
/// ```
///
/// An unlabelled sample prints `?` as its actual label; a sample without a
/// target prints no code line under it.
pub fn format_classification(
    sample: &Sample,
    output: ArrayView1<'_, i8>,
    table: &LabelTable,
) -> String {
    let mut out = String::from("Actual:\n");
    match sample.label() {
        Some(label) => out.push(label),
        None => out.push('?'),
    }
    out.push('\n');
    if let Some(target) = sample.target() {
        let _ = writeln!(out, "{}", join_values(target.view()));
    }

    out.push_str("Classified:\n");
    match table.resolve(output) {
        Classification::Label(label) => {
            // Exact match: the output is the label's code
            let _ = writeln!(out, "{label}");
            let _ = writeln!(out, "{}", join_values(output));
        }
        Classification::Undecided => {
            let _ = writeln!(out, "{}", Classification::Undecided);
            let _ = writeln!(out, "{}", join_values(output));
        }
    }
    out
}

/// Render a flattened pattern as a `rows × columns` grid: `O` for `+1`, space otherwise.
///
/// # Errors
/// `ShapeMismatch` if the pattern length is not `rows * columns`.
pub fn render_grid(pattern: ArrayView1<'_, i8>, rows: usize, columns: usize) -> NetResult<String> {
    if pattern.len() != rows * columns {
        return Err(NetError::ShapeMismatch(format!(
            "pattern has {} values, grid is {rows}x{columns}",
            pattern.len()
        )));
    }
    let mut out = String::with_capacity(rows * (columns + 1));
    for r in 0..rows {
        for c in 0..columns {
            out.push(if pattern[r * columns + c] == 1 { 'O' } else { ' ' });
        }
        out.push('\n');
    }
    Ok(out)
}

/// One Hopfield recall block: input grid, recalled grid, and a note if the
/// sweep cap was reached.
pub fn format_recall(
    input: ArrayView1<'_, i8>,
    outcome: &RecallOutcome,
    rows: usize,
    columns: usize,
) -> NetResult<String> {
    let mut out = String::from("Input:\n");
    out.push_str(&render_grid(input, rows, columns)?);
    out.push_str("Recalled:\n");
    out.push_str(&render_grid(outcome.pattern.view(), rows, columns)?);
    if !outcome.converged {
        let _ = writeln!(
            out,
            "(did not converge after {} sweeps; showing last state)",
            outcome.sweeps
        );
    }
    Ok(out)
}

/// Write a report, creating parent directories as needed.
pub fn write_report(path: &Path, text: &str) -> NetResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    log::info!("Results saved to {}", path.display());
    Ok(())
}
