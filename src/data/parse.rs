//! Parser for the fixed-format dataset text files.
//!
//! ## Layout
//!
//! ```text
//! 5          // rows
//! 3          // columns
//! 7          // output dimension (optional line)
//! 2          // sample count
//!
//! -1  1 -1
//!  1 -1  1
//! ...        (rows lines of columns values)
//! 1 -1 -1 -1 -1 -1 -1   (output vector, only with an output dimension)
//! A                     (optional label)
//!
//! ...next sample
//! ```
//!
//! The header is everything before the first blank line: three values mean
//! rows, columns, count; four mean rows, columns, output dimension, count. Only
//! the first token of a header line is read, so trailing comments are allowed.
//! Blank lines between sample lines are ignored.
//!
//! A label line is a single one-character token other than `1`, which keeps it
//! apart from a one-column grid row.

use ndarray::Array1;
use std::path::Path;

use super::samples::{Dataset, Sample};
use crate::core::{NetError, NetResult};
use crate::utils::is_bipolar;

/// Non-blank body lines with a read position.
struct Cursor<'a> {
    lines: Vec<(usize, &'a str)>,
    pos: usize,
    end_line: usize,
}

impl<'a> Cursor<'a> {
    fn next(&mut self, what: &str) -> NetResult<(usize, &'a str)> {
        let line = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or_else(|| NetError::parse(self.end_line, format!("unexpected end of file, expected {what}")))?;
        self.pos += 1;
        Ok(line)
    }

    fn peek(&self) -> Option<(usize, &'a str)> {
        self.lines.get(self.pos).copied()
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }
}

fn header_value(line_no: usize, line: &str, name: &str) -> NetResult<usize> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| NetError::parse(line_no, format!("missing {name}")))?;
    token
        .parse::<usize>()
        .map_err(|_| NetError::parse(line_no, format!("{name} must be a non-negative integer, found '{token}'")))
}

/// Parse one line of exactly `expected` bipolar integers.
fn bipolar_row(line_no: usize, line: &str, expected: usize) -> NetResult<Vec<i8>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(NetError::parse(
            line_no,
            format!("expected {expected} values, found {}", tokens.len()),
        ));
    }
    tokens
        .iter()
        .map(|token| {
            let value = token
                .parse::<i8>()
                .map_err(|_| NetError::parse(line_no, format!("'{token}' is not an integer")))?;
            if is_bipolar(value) {
                Ok(value)
            } else {
                Err(NetError::parse(line_no, format!("value {value} is not bipolar")))
            }
        })
        .collect()
}

fn label_of(line: &str) -> Option<char> {
    let mut tokens = line.split_whitespace();
    let token = tokens.next()?;
    if tokens.next().is_some() || token == "1" {
        return None;
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Parse dataset text into a [`Dataset`].
///
/// # Errors
/// `Parse` with the 1-based line number of the first malformed line, or of the
/// end of file when samples are missing.
pub fn parse_dataset(text: &str) -> NetResult<Dataset> {
    let mut numbered = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));
    let end_line = text.lines().count().max(1);

    let mut header = Vec::new();
    for (line_no, line) in numbered.by_ref() {
        if line.is_empty() {
            if header.is_empty() {
                continue;
            }
            break;
        }
        header.push((line_no, line));
    }

    let (rows, columns, output_dim, count) = match header.as_slice() {
        [r, c, n] => (
            header_value(r.0, r.1, "rows")?,
            header_value(c.0, c.1, "columns")?,
            None,
            header_value(n.0, n.1, "sample count")?,
        ),
        [r, c, o, n] => (
            header_value(r.0, r.1, "rows")?,
            header_value(c.0, c.1, "columns")?,
            Some(header_value(o.0, o.1, "output dimension")?),
            header_value(n.0, n.1, "sample count")?,
        ),
        [] => return Err(NetError::parse(end_line, "missing header")),
        lines => {
            return Err(NetError::parse(
                lines[0].0,
                format!("header must have 3 or 4 lines, found {}", lines.len()),
            ))
        }
    };

    let first_header_line = header[0].0;
    if rows == 0 || columns == 0 {
        return Err(NetError::parse(first_header_line, "rows and columns must be positive"));
    }
    if output_dim == Some(0) {
        return Err(NetError::parse(first_header_line, "output dimension must be positive"));
    }

    let mut cursor = Cursor {
        lines: numbered.filter(|(_, l)| !l.is_empty()).collect(),
        pos: 0,
        end_line,
    };

    let mut samples = Vec::with_capacity(count);
    for idx in 0..count {
        let mut pixels = Vec::with_capacity(rows * columns);
        for _ in 0..rows {
            let (line_no, line) = cursor.next(&format!("grid row of sample {}", idx + 1))?;
            pixels.extend(bipolar_row(line_no, line, columns)?);
        }
        let mut sample = Sample::new(Array1::from_vec(pixels))?;

        if let Some(dim) = output_dim {
            let (line_no, line) = cursor.next(&format!("output vector of sample {}", idx + 1))?;
            let target = bipolar_row(line_no, line, dim)?;
            sample = sample.with_target(Array1::from_vec(target))?;
        }

        if let Some(label) = cursor.peek().and_then(|(_, line)| label_of(line)) {
            cursor.pos += 1;
            sample = sample.with_label(label);
        }

        samples.push(sample);
    }

    if cursor.remaining() > 0 {
        log::warn!(
            "Ignoring {} line(s) after the {count} declared samples",
            cursor.remaining()
        );
    }

    Ok(Dataset {
        rows,
        columns,
        output_dim,
        samples,
    })
}

/// Read and parse a dataset file.
///
/// # Errors
/// `Io` if the file cannot be read, otherwise as [`parse_dataset`].
pub fn load_dataset(path: &Path) -> NetResult<Dataset> {
    let text = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(&text)?;
    log::debug!(
        "Loaded {} samples ({}x{}) from {}",
        dataset.len(),
        dataset.rows,
        dataset.columns,
        path.display()
    );
    Ok(dataset)
}
