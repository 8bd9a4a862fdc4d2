//! Save/load trained weights as plain text.
//!
//! ## Perceptron
//!
//! ```text
//! <input nodes>
//! <output nodes>
//! <theta>
//!
//! <input nodes rows of output-node weights, 6 decimals>
//!
//! <output-node bias weights>
//! ```
//!
//! ## Hopfield
//!
//! ```text
//! <nodes>
//! <nodes rows of nodes integers>
//! ```
//!
//! Loaders skip blank lines and read only the first token of header lines.
//! Anything that does not fit the layout is rejected; no partial store is returned.

use ndarray::{Array1, Array2};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use crate::core::{HopfieldWeights, NetError, NetResult, PerceptronWeights, WeightStore};

/// Non-blank lines with their 1-based numbers.
fn content_lines(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect()
}

fn take_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> NetResult<(usize, &'a str)> {
    lines
        .next()
        .ok_or_else(|| NetError::parse(0, format!("unexpected end of file, expected {what}")))
}

fn header<T: FromStr>(line_no: usize, line: &str, what: &str) -> NetResult<T> {
    line.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| NetError::parse(line_no, format!("invalid {what}: '{line}'")))
}

fn row<T: FromStr>(line_no: usize, line: &str, expected: usize) -> NetResult<Vec<T>> {
    let values: Vec<T> = line
        .split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| NetError::parse(line_no, format!("'{token}' is not a number")))
        })
        .collect::<NetResult<_>>()?;
    if values.len() != expected {
        return Err(NetError::parse(
            line_no,
            format!("expected {expected} values, found {}", values.len()),
        ));
    }
    Ok(values)
}

fn ensure_consumed<'a>(mut lines: impl Iterator<Item = (usize, &'a str)>) -> NetResult<()> {
    match lines.next() {
        Some((line_no, _)) => Err(NetError::parse(line_no, "unexpected trailing content")),
        None => Ok(()),
    }
}

fn write_file(path: &Path, contents: &str) -> NetResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Render Perceptron weights in the text layout.
pub fn perceptron_to_string(weights: &PerceptronWeights) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", weights.input_dim());
    let _ = writeln!(out, "{}", weights.output_dim());
    let _ = writeln!(out, "{}", weights.theta);
    out.push('\n');

    for r in weights.w.rows() {
        let line: Vec<String> = r.iter().map(|v| format!("{v:.6}")).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out.push('\n');

    let bias: Vec<String> = weights.b.iter().map(|v| format!("{v:.6}")).collect();
    let _ = writeln!(out, "{}", bias.join(" "));
    out
}

/// Parse Perceptron weights from the text layout.
///
/// # Errors
/// `Parse` for any deviation from the layout, `ShapeMismatch` never escapes
/// since the header dimensions drive every row read.
pub fn parse_perceptron(text: &str) -> NetResult<PerceptronWeights> {
    let mut lines = content_lines(text).into_iter();

    let (no, line) = take_line(&mut lines, "input node count")?;
    let n_in: usize = header(no, line, "input node count")?;
    let (no, line) = take_line(&mut lines, "output node count")?;
    let n_out: usize = header(no, line, "output node count")?;
    let (no, line) = take_line(&mut lines, "theta")?;
    let theta: f64 = header(no, line, "theta")?;

    let mut flat = Vec::with_capacity(n_in * n_out);
    for r in 0..n_in {
        let (no, line) = take_line(&mut lines, &format!("weight row {}", r + 1))?;
        flat.extend(row::<f64>(no, line, n_out)?);
    }
    let (no, line) = take_line(&mut lines, "bias weights")?;
    let bias = row::<f64>(no, line, n_out)?;
    ensure_consumed(lines)?;

    let w = Array2::from_shape_vec((n_in, n_out), flat)
        .map_err(|e| NetError::ShapeMismatch(format!("failed to rebuild weight matrix: {e}")))?;
    PerceptronWeights::from_parts(w, Array1::from_vec(bias), theta)
}

/// Render a Hopfield matrix in the text layout.
pub fn hopfield_to_string(weights: &HopfieldWeights) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", weights.nodes());
    for r in weights.matrix().rows() {
        let line: Vec<String> = r.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

/// Parse a Hopfield matrix from the text layout.
///
/// # Errors
/// `Parse` for malformed text, `InvalidConfig` for a non-zero diagonal.
pub fn parse_hopfield(text: &str) -> NetResult<HopfieldWeights> {
    let mut lines = content_lines(text).into_iter();

    let (no, line) = take_line(&mut lines, "node count")?;
    let n: usize = header(no, line, "node count")?;

    let mut flat = Vec::with_capacity(n * n);
    for r in 0..n {
        let (no, line) = take_line(&mut lines, &format!("matrix row {}", r + 1))?;
        flat.extend(row::<i32>(no, line, n)?);
    }
    ensure_consumed(lines)?;

    let w = Array2::from_shape_vec((n, n), flat)
        .map_err(|e| NetError::ShapeMismatch(format!("failed to rebuild weight matrix: {e}")))?;
    HopfieldWeights::from_matrix(w)
}

/// Write Perceptron weights, creating parent directories as needed.
pub fn save_perceptron(weights: &PerceptronWeights, path: &Path) -> NetResult<()> {
    write_file(path, &perceptron_to_string(weights))
}

/// Load Perceptron weights from a file.
pub fn load_perceptron(path: &Path) -> NetResult<PerceptronWeights> {
    let text = std::fs::read_to_string(path)?;
    parse_perceptron(&text)
}

/// Write a Hopfield matrix, creating parent directories as needed.
pub fn save_hopfield(weights: &HopfieldWeights, path: &Path) -> NetResult<()> {
    write_file(path, &hopfield_to_string(weights))
}

/// Load a Hopfield matrix from a file.
pub fn load_hopfield(path: &Path) -> NetResult<HopfieldWeights> {
    let text = std::fs::read_to_string(path)?;
    parse_hopfield(&text)
}

/// Write either kind of store in its own layout.
pub fn save_weights(store: &WeightStore, path: &Path) -> NetResult<()> {
    match store {
        WeightStore::Perceptron(weights) => save_perceptron(weights, path),
        WeightStore::Hopfield(weights) => save_hopfield(weights, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::fs;

    fn sample_perceptron() -> PerceptronWeights {
        PerceptronWeights::from_parts(
            array![[0.5, -1.25], [0.1234567, 2.0], [-0.000001, 0.0]],
            array![1.5, -0.5],
            0.2,
        )
        .unwrap()
    }

    #[test]
    fn test_perceptron_layout() {
        let text = perceptron_to_string(&sample_perceptron());
        let expected = "3\n2\n0.2\n\n0.500000 -1.250000\n0.123457 2.000000\n-0.000001 0.000000\n\n1.500000 -0.500000\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_perceptron_text_round_trip() {
        let original = sample_perceptron();
        let loaded = parse_perceptron(&perceptron_to_string(&original)).unwrap();
        assert_eq!(loaded.w.dim(), original.w.dim());
        assert_abs_diff_eq!(loaded.theta, 0.2, epsilon = 1e-12);
        for (a, b) in original.w.iter().zip(loaded.w.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
        for (a, b) in original.b.iter().zip(loaded.b.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_perceptron_header_comments_allowed() {
        let text = "2\t\t// Number of input nodes\n1\t\t//Number of output nodes\n0\t\t// Theta\n\n0.5\n-0.5\n\n1.0\n";
        let loaded = parse_perceptron(text).unwrap();
        assert_eq!(loaded.w, array![[0.5], [-0.5]]);
        assert_eq!(loaded.b, array![1.0]);
    }

    #[test]
    fn test_perceptron_malformed() {
        // Short row
        assert!(matches!(
            parse_perceptron("2\n2\n0\n\n1 1\n1\n\n0 0\n"),
            Err(NetError::Parse { line: 6, .. })
        ));
        // Missing bias line
        assert!(parse_perceptron("1\n1\n0\n\n1\n").is_err());
        // Non-numeric
        assert!(parse_perceptron("1\n1\n0\n\nabc\n\n0\n").is_err());
        // Trailing content
        assert!(parse_perceptron("1\n1\n0\n\n1\n\n0\n7\n").is_err());
    }

    #[test]
    fn test_hopfield_layout_and_round_trip() {
        let mut memory = HopfieldWeights::zeros(3);
        memory.learn(array![1i8, -1, 1].view()).unwrap();
        let text = hopfield_to_string(&memory);
        assert_eq!(text, "3\n0 -1 1\n-1 0 -1\n1 -1 0\n");
        assert_eq!(parse_hopfield(&text).unwrap(), memory);
    }

    #[test]
    fn test_hopfield_rejects_diagonal() {
        assert!(matches!(
            parse_hopfield("2\n1 0\n0 0\n"),
            Err(NetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_hopfield_malformed() {
        assert!(parse_hopfield("2\n0 1\n").is_err());
        assert!(parse_hopfield("2\n0 1 2\n1 0\n").is_err());
        assert!(parse_hopfield("x\n").is_err());
    }

    #[test]
    fn test_file_round_trip_creates_directory() {
        let dir = std::env::temp_dir()
            .join("assocnet_test_checkpoint")
            .join("nested");
        let p_path = dir.join("perceptron.txt");
        let h_path = dir.join("hopfield.txt");

        save_weights(&sample_perceptron().into(), &p_path).unwrap();
        let mut memory = HopfieldWeights::zeros(2);
        memory.learn(array![1i8, 1].view()).unwrap();
        save_weights(&memory.clone().into(), &h_path).unwrap();

        assert!(p_path.exists());
        assert_eq!(load_perceptron(&p_path).unwrap().input_dim(), 3);
        assert_eq!(load_hopfield(&h_path).unwrap(), memory);

        let _ = fs::remove_dir_all(std::env::temp_dir().join("assocnet_test_checkpoint"));
    }

    #[test]
    fn test_load_nonexistent() {
        assert!(matches!(
            load_perceptron(Path::new("/nonexistent/weights.txt")),
            Err(NetError::Io(_))
        ));
        assert!(load_hopfield(Path::new("/nonexistent/weights.txt")).is_err());
    }
}
