use crate::{KMeansError, Primitive, Result};
use std::fmt;
use std::ops::Index;

/// A fixed-dimensionality tuple of finite real numbers.
///
/// Points are validated once, at construction, and are immutable afterwards. Clusters only ever
/// hold references to the caller's points; the one place a point is copied is when a center is
/// handed to a fresh cluster generation.
///
/// Any finite coordinates are accepted. Means and [`distance`](crate::distance) stay finite up to
/// the limits of `T`, but [`squared_distance`](crate::squared_distance) and cluster inertia
/// overflow to infinity once points lie more than about `1e154` apart (`f64`). Points whose
/// coordinate differences themselves exceed `T::MAX` are at infinite distance from each other.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<T: Primitive> {
    coords: Box<[T]>,
}
impl<T: Primitive> Point<T> {
    /// Create a new point from its coordinates.
    ///
    /// ## Errors
    /// - [`KMeansError::ZeroDimensions`] if **coords** is empty
    /// - [`KMeansError::NonFiniteCoordinate`] if any coordinate is NaN or infinite
    pub fn new(coords: impl Into<Vec<T>>) -> Result<Self> {
        let coords = coords.into();
        if coords.is_empty() {
            return Err(KMeansError::ZeroDimensions);
        }
        if let Some(axis) = coords.iter().position(|c| !c.is_finite()) {
            return Err(KMeansError::NonFiniteCoordinate { axis });
        }
        Ok(Self { coords: coords.into_boxed_slice() })
    }

    /// Builds a point from already computed coordinates (means), skipping validation.
    pub(crate) fn from_computed(coords: Vec<T>) -> Self {
        debug_assert!(!coords.is_empty());
        Self { coords: coords.into_boxed_slice() }
    }

    /// Dimensionality D of this point.
    pub fn dims(&self) -> usize { self.coords.len() }

    pub fn coords(&self) -> &[T] { &self.coords }

    pub(crate) fn check_dims(&self, expected: usize) -> Result<()> {
        if self.dims() != expected {
            return Err(KMeansError::DimensionMismatch { expected, got: self.dims() });
        }
        Ok(())
    }
}

impl<T: Primitive> Index<usize> for Point<T> {
    type Output = T;
    fn index(&self, axis: usize) -> &T { &self.coords[axis] }
}

impl<T: Primitive> TryFrom<Vec<T>> for Point<T> {
    type Error = KMeansError;
    fn try_from(coords: Vec<T>) -> Result<Self> { Point::new(coords) }
}

impl<T: Primitive, const D: usize> TryFrom<[T; D]> for Point<T> {
    type Error = KMeansError;
    fn try_from(coords: [T; D]) -> Result<Self> { Point::new(coords.to_vec()) }
}

impl<T: Primitive> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Split a flat sample buffer into points.
///
/// ## Arguments
/// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
/// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
/// - **sample_dims**: Amount of dimensions each sample from the **samples** vector has
///
/// ## Errors
/// - [`KMeansError::ZeroDimensions`] if **sample_dims** is 0
/// - [`KMeansError::InvalidParameter`] if `sample_cnt * sample_dims` does not fit a `usize`
/// - [`KMeansError::DimensionMismatch`] if **samples** does not hold exactly that many values
pub fn points_from_row_major<T: Primitive>(samples: &[T], sample_cnt: usize, sample_dims: usize) -> Result<Vec<Point<T>>> {
    if sample_dims == 0 {
        return Err(KMeansError::ZeroDimensions);
    }
    let expected = sample_cnt.checked_mul(sample_dims).ok_or_else(|| KMeansError::InvalidParameter(
        format!("{} samples of {} dimensions overflow the buffer length", sample_cnt, sample_dims)))?;
    if samples.len() != expected {
        return Err(KMeansError::DimensionMismatch { expected, got: samples.len() });
    }
    samples.chunks_exact(sample_dims)
        .map(|s| Point::new(s.to_vec()))
        .collect()
}

/// Returns the shared dimensionality of all given points, or `None` if there are none.
///
/// Fails with [`KMeansError::DimensionMismatch`] at the first point that disagrees with the first one.
pub fn check_uniform_dims<'p, T: Primitive>(points: impl IntoIterator<Item = &'p Point<T>>) -> Result<Option<usize>> {
    let mut dims = None;
    for p in points {
        match dims {
            None => dims = Some(p.dims()),
            Some(d) => p.check_dims(d)?,
        }
    }
    Ok(dims)
}
