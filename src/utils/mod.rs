//! Helpers for bipolar vectors.

use ndarray::ArrayView1;

use crate::core::{NetError, NetResult};

/// True if `v` is `+1` or `-1`.
#[inline]
pub fn is_bipolar(v: i8) -> bool {
    v == 1 || v == -1
}

/// Check that every component is `+1` or `-1`.
///
/// # Errors
/// `NotBipolar` naming the first offending position.
pub fn check_bipolar(values: ArrayView1<'_, i8>) -> NetResult<()> {
    match values.iter().position(|&v| !is_bipolar(v)) {
        Some(index) => Err(NetError::NotBipolar {
            index,
            value: i64::from(values[index]),
        }),
        None => Ok(()),
    }
}

/// Number of positions where two vectors differ.
///
/// # Errors
/// `ShapeMismatch` if the lengths differ.
pub fn hamming_distance(a: ArrayView1<'_, i8>, b: ArrayView1<'_, i8>) -> NetResult<usize> {
    if a.len() != b.len() {
        return Err(NetError::ShapeMismatch(format!(
            "cannot compare vectors of length {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Render a vector as space-separated integers.
pub fn join_values(values: ArrayView1<'_, i8>) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
