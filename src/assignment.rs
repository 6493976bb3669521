use crate::{Cluster, ClusterSet, KMeansError, Point, Primitive, Result};
use rayon::prelude::*;

/// Index of the cluster whose center is nearest to **point**. Exact ties go to the lowest index.
fn nearest_cluster<T: Primitive>(clusters: &[Cluster<'_, T>], point: &Point<T>) -> Result<usize> {
    let mut best = (0, T::infinity());
    for c in clusters {
        let dist = c.distance_to(point)?;
        if dist < best.1 {
            best = (c.index(), dist);
        }
    }
    Ok(best.0)
}

/// Run a single assignment pass.
///
/// Creates one fresh [`Cluster`] per center (preserving center order) and appends every point,
/// in input order, to the cluster with the nearest center.
///
/// ## Arguments
/// - **points**: Points to assign; they are referenced, not copied
/// - **centers**: The k centers for this pass
/// - **parallel**: Search the nearest centers on the rayon thread-pool. The result is identical
///   to the sequential search.
///
/// ## Errors
/// - [`KMeansError::NoCenters`] if **centers** is empty
/// - [`KMeansError::DimensionMismatch`] if a point and a center differ in dimensionality
///
/// Clusters that received no point are returned empty; only their [`Cluster::mean`] fails.
pub fn assign<'a, T: Primitive>(points: &'a [Point<T>], centers: &[Point<T>], parallel: bool) -> Result<ClusterSet<'a, T>> {
    if centers.is_empty() {
        return Err(KMeansError::NoCenters);
    }
    let mut clusters: Vec<Cluster<'a, T>> = centers.iter().cloned().enumerate()
        .map(|(idx, center)| Cluster::new(idx, center))
        .collect();

    let assignments: Vec<usize> = if parallel {
        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (points.len() / rayon::current_num_threads()).max(1);
        let clusters = &clusters;
        points.par_iter()
            .with_min_len(work_packet_size)
            .map(|p| nearest_cluster(clusters, p))
            .collect::<Result<_>>()?
    } else {
        points.iter()
            .map(|p| nearest_cluster(&clusters, p))
            .collect::<Result<_>>()?
    };

    // single sequential append, so member order never depends on thread scheduling
    points.iter().zip(assignments.iter().cloned())
        .for_each(|(p, idx)| clusters[idx].add(p));

    Ok(ClusterSet::new(clusters, assignments))
}
