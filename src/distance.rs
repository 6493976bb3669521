use crate::{KMeansError, Point, Primitive, Result};

/// Sum of squared coordinate differences between **a** and **b**.
///
/// Overflows to infinity once the distance exceeds roughly the square root of `T::MAX`
/// (about `1e154` for `f64`). Use [`distance`] to compare far apart points.
pub fn squared_distance<T: Primitive>(a: &Point<T>, b: &Point<T>) -> Result<T> {
    if a.dims() != b.dims() {
        return Err(KMeansError::DimensionMismatch { expected: a.dims(), got: b.dims() });
    }
    Ok(a.coords().iter().zip(b.coords().iter())
        .map(|(&av, &bv)| av - bv)     // <a> - <b>
        .map(|v| v * v)                // <vec_components> ^2
        .sum())                        // sum(<vec_components>^2)
}

/// Euclidean (L2) distance between **a** and **b**.
///
/// Fails with [`KMeansError::DimensionMismatch`] if the points differ in dimensionality.
///
/// Stays finite when the squared distance overflows `T`, as long as every coordinate
/// difference itself is finite.
pub fn distance<T: Primitive>(a: &Point<T>, b: &Point<T>) -> Result<T> {
    let squared = squared_distance(a, b)?;
    if squared.is_finite() {
        return Ok(squared.sqrt());
    }
    // rescale by the largest coordinate difference, hypot-style
    let diffs = || a.coords().iter().zip(b.coords().iter()).map(|(&av, &bv)| (av - bv).abs());
    let scale = diffs().fold(T::zero(), T::max);
    if !scale.is_finite() {
        return Ok(scale);
    }
    Ok(scale * diffs().map(|d| d / scale).map(|v| v * v).sum::<T>().sqrt())
}
