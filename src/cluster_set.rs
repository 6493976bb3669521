use crate::{Cluster, Point, Primitive, Result};
use std::ops::Index;

/// The ordered clusters of one assignment pass, index-aligned with the centers that pass was run with.
///
/// This is also the result of a k-means run, where it holds the clusters of the final pass.
///
/// ## Fields
/// - **clusters**: One [`Cluster`] per center, in center order
/// - **assignments**: Vector mapping each input point (in input order) to its cluster index
/// - **passes**: Amount of assignment passes that were run to produce this set
#[derive(Clone, Debug)]
pub struct ClusterSet<'a, T: Primitive> {
    clusters: Vec<Cluster<'a, T>>,
    assignments: Vec<usize>,
    passes: usize,
}
impl<'a, T: Primitive> ClusterSet<'a, T> {
    pub(crate) fn new(clusters: Vec<Cluster<'a, T>>, assignments: Vec<usize>) -> Self {
        Self { clusters, assignments, passes: 1 }
    }

    pub(crate) fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Amount of clusters (k).
    pub fn k(&self) -> usize { self.clusters.len() }

    pub fn passes(&self) -> usize { self.passes }

    pub fn clusters(&self) -> &[Cluster<'a, T>] { &self.clusters }

    pub fn into_clusters(self) -> Vec<Cluster<'a, T>> { self.clusters }

    pub fn assignments(&self) -> &[usize] { &self.assignments }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster<'a, T>> { self.clusters.iter() }

    /// Centers of all clusters, in cluster order. Feeding these back in as seeds reproduces this set.
    pub fn centers(&self) -> Vec<Point<T>> {
        self.clusters.iter().map(|c| c.center().clone()).collect()
    }

    /// Total sum of squared distances from every point to its cluster's center.
    pub fn inertia(&self) -> Result<T> {
        self.clusters.iter().map(|c| c.inertia()).sum()
    }
}

impl<'a, T: Primitive> Index<usize> for ClusterSet<'a, T> {
    type Output = Cluster<'a, T>;
    fn index(&self, idx: usize) -> &Cluster<'a, T> { &self.clusters[idx] }
}

impl<'s, 'a, T: Primitive> IntoIterator for &'s ClusterSet<'a, T> {
    type Item = &'s Cluster<'a, T>;
    type IntoIter = std::slice::Iter<'s, Cluster<'a, T>>;
    fn into_iter(self) -> Self::IntoIter { self.clusters.iter() }
}

impl<'a, T: Primitive> IntoIterator for ClusterSet<'a, T> {
    type Item = Cluster<'a, T>;
    type IntoIter = std::vec::IntoIter<Cluster<'a, T>>;
    fn into_iter(self) -> Self::IntoIter { self.clusters.into_iter() }
}
