use crate::{distance, KMeansError, Point, Primitive, Result};

/// One reference center together with the points assigned to it during a single pass.
///
/// A cluster belongs to exactly one pass. Its center is fixed at construction and never moved;
/// the next pass builds a fresh generation of clusters around the computed means instead.
///
/// ## Lifetimes
/// - **'a**: Lifetime of the caller's point slice. Members are references into it.
#[derive(Clone, Debug)]
pub struct Cluster<'a, T: Primitive> {
    index: usize,
    center: Point<T>,
    members: Vec<&'a Point<T>>,
}
impl<'a, T: Primitive> Cluster<'a, T> {
    /// Create an empty cluster around **center**. **index** is the cluster's position within its pass.
    pub fn new(index: usize, center: Point<T>) -> Self {
        Self { index, center, members: Vec::new() }
    }

    pub fn index(&self) -> usize { self.index }

    pub fn center(&self) -> &Point<T> { &self.center }

    /// Members in assignment order.
    pub fn members(&self) -> &[&'a Point<T>] { &self.members }

    pub fn len(&self) -> usize { self.members.len() }

    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Euclidean distance from **point** to this cluster's center.
    pub fn distance_to(&self, point: &Point<T>) -> Result<T> {
        distance::distance(point, &self.center)
    }

    /// Append **point** to the members.
    pub fn add(&mut self, point: &'a Point<T>) {
        self.members.push(point);
    }

    /// Coordinate-wise arithmetic mean of all members. Stays finite for members near the limits
    /// of `T`, where the plain coordinate sum would overflow.
    ///
    /// ## Errors
    /// - [`KMeansError::EmptyCluster`] if nothing was assigned to this cluster
    /// - [`KMeansError::DimensionMismatch`] if a member's dimensionality differs from the center's
    pub fn mean(&self) -> Result<Point<T>> {
        if self.members.is_empty() {
            return Err(KMeansError::EmptyCluster { cluster: self.index });
        }
        let dims = self.center.dims();
        let mut sums = vec![T::zero(); dims];
        for m in self.members.iter() {
            m.check_dims(dims)?;
            sums.iter_mut().zip(m.coords().iter().cloned())
                .for_each(|(s, v)| *s += v);
        }
        let cnt = T::lossy_from_usize(self.members.len());
        if sums.iter().all(|s| s.is_finite()) {
            sums.iter_mut().for_each(|s| *s = *s / cnt);
            return Ok(Point::from_computed(sums));
        }
        // the plain sum overflowed, scale every member down before adding
        let mut means = vec![T::zero(); dims];
        for m in self.members.iter() {
            means.iter_mut().zip(m.coords().iter().cloned())
                .for_each(|(s, v)| *s += v / cnt);
        }
        Ok(Point::from_computed(means))
    }

    /// Sum of squared distances from every member to the center (not to the mean).
    pub fn inertia(&self) -> Result<T> {
        self.members.iter()
            .map(|m| distance::squared_distance(m, &self.center))
            .sum()
    }
}
