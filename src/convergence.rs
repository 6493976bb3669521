use crate::{KMeansError, Point, Primitive, Result};

/// Absolute + relative tolerance used to decide whether two generations of centers are equal.
///
/// Two coordinates `previous` and `current` are close when
/// `|previous - current| <= absolute + relative * |current|`.
/// Equal values (including equal infinities) are always close. A non-finite value is close
/// only to an equal value, so an overflowed mean never counts as settled.
///
/// [`k_mean`](crate::k_mean) rejects tolerances with negative or non-finite terms before the
/// first pass. Callers using [`Tolerance::is_close`] or [`Tolerance::all_close`] directly can
/// run the same check through [`Tolerance::validate`].
///
/// ## Default
/// `Tolerance { absolute: 1e-8, relative: 1e-5 }`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<T: Primitive> {
    pub absolute: T,
    pub relative: T,
}
impl<T: Primitive> Default for Tolerance<T> {
    fn default() -> Self {
        Self {
            absolute: T::lossy_from_f64(1e-8),
            relative: T::lossy_from_f64(1e-5),
        }
    }
}
impl<T: Primitive> Tolerance<T> {
    pub fn new(absolute: T, relative: T) -> Self {
        Self { absolute, relative }
    }

    /// Tolerance requiring bit-for-bit identical centers.
    pub fn exact() -> Self {
        Self { absolute: T::zero(), relative: T::zero() }
    }

    /// Fails with [`KMeansError::InvalidParameter`] if either term is negative, NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if !(self.absolute.is_finite() && self.absolute >= T::zero()) {
            return Err(KMeansError::InvalidParameter(format!(
                "absolute tolerance must be finite and >= 0, got {}", self.absolute)));
        }
        if !(self.relative.is_finite() && self.relative >= T::zero()) {
            return Err(KMeansError::InvalidParameter(format!(
                "relative tolerance must be finite and >= 0, got {}", self.relative)));
        }
        Ok(())
    }

    pub fn is_close(&self, previous: T, current: T) -> bool {
        if !previous.is_finite() || !current.is_finite() {
            return previous == current;
        }
        previous == current
            || (previous - current).abs() <= self.absolute + self.relative * current.abs()
    }

    /// Element-wise, coordinate-wise comparison of two center generations.
    /// Generations of differing length or dimensionality are never close.
    pub fn all_close(&self, previous: &[Point<T>], current: &[Point<T>]) -> bool {
        previous.len() == current.len()
            && previous.iter().zip(current.iter()).all(|(p, c)| {
                p.dims() == c.dims()
                    && p.coords().iter().zip(c.coords().iter()).all(|(&pv, &cv)| self.is_close(pv, cv))
            })
    }
}


/// Upper bound on the number of assignment passes of a single run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassLimit {
    /// Keep iterating until the centers settle, however long that takes.
    Unbounded,
    /// Fail with [`KMeansError::NonConvergence`] once this many passes ran without the centers
    /// settling. A run that converges exactly on the last allowed pass succeeds.
    AtMost(usize),
}
impl Default for PassLimit {
    fn default() -> Self { PassLimit::AtMost(300) }
}
impl PassLimit {
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            PassLimit::AtMost(0) => Err(KMeansError::InvalidParameter("pass limit must be at least 1".to_string())),
            _ => Ok(()),
        }
    }
}


/// State of a running convergence loop after a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopState {
    Running,
    Converged,
}

/// Per-run bookkeeping for the convergence test and the pass limit.
pub(crate) struct ConvergenceLogic<T: Primitive> {
    tolerance: Tolerance<T>,
    limit: PassLimit,
    passes: usize,
}
impl<T: Primitive> ConvergenceLogic<T> {
    pub fn new(tolerance: Tolerance<T>, limit: PassLimit) -> Self {
        Self { tolerance, limit, passes: 0 }
    }

    pub fn passes(&self) -> usize { self.passes }

    /// Has to be called once per finished pass with the centers the pass was run with and the
    /// means it produced.
    pub fn next(&mut self, previous: &[Point<T>], current: &[Point<T>]) -> Result<LoopState> {
        self.passes += 1;
        if self.tolerance.all_close(previous, current) {
            return Ok(LoopState::Converged);
        }
        match self.limit {
            PassLimit::AtMost(max) if self.passes >= max => Err(KMeansError::NonConvergence { passes: self.passes }),
            _ => Ok(LoopState::Running),
        }
    }
}
