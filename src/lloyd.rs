use crate::{
    assignment, check_uniform_dims, distance,
    convergence::{ConvergenceLogic, LoopState},
    ClusterSet, EmptyClusterPolicy, KMeansConfig, KMeansError, Point, Primitive, Result,
};
use log::{debug, info, log_enabled, trace, warn, Level};

/// Means of all clusters of a pass, in cluster order, with **policy** applied to empty clusters.
fn next_centers<T: Primitive>(clusters: &ClusterSet<'_, T>, policy: EmptyClusterPolicy) -> Result<Vec<Point<T>>> {
    clusters.iter()
        .map(|c| match c.mean() {
            Err(KMeansError::EmptyCluster { cluster }) if policy == EmptyClusterPolicy::RetainCenter => {
                warn!("cluster {} has no members, keeping its center {}", cluster, c.center());
                Ok(c.center().clone())
            }
            mean => mean,
        })
        .collect()
}

/// Largest distance any center moved between two generations.
fn max_shift<T: Primitive>(previous: &[Point<T>], current: &[Point<T>]) -> Result<T> {
    previous.iter().zip(current.iter())
        .map(|(p, c)| distance::distance(p, c))
        .try_fold(T::zero(), |acc, d| d.map(|d| acc.max(d)))
}

/// Lloyd's k-means iteration, starting from caller-supplied seed centers.
///
/// Every pass assigns each point to its nearest center (see [`assignment::assign`]) and computes
/// the means of the resulting clusters. When those means equal the centers of the pass (within
/// the configured [`Tolerance`](crate::Tolerance)) the run has converged, and the clusters of that
/// last pass are returned. Otherwise the means become the next pass's centers.
///
/// ## Arguments
/// - **points**: The points to partition. All of them must have the same dimensionality.
/// - **seeds**: The k initial centers, with the same dimensionality as the points.
/// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
///
/// ## Returns
/// The [`ClusterSet`] of the final pass, holding each cluster's final center and members.
///
/// ## Errors
/// - [`KMeansError::NoCenters`] if **seeds** is empty
/// - [`KMeansError::DimensionMismatch`] if points and seeds do not share one dimensionality
/// - [`KMeansError::EmptyCluster`] if a cluster ends a pass without members and the config's
///   [`EmptyClusterPolicy`] is [`EmptyClusterPolicy::Abort`]
/// - [`KMeansError::NonConvergence`] if the config's [`PassLimit`](crate::PassLimit) is reached
/// - [`KMeansError::InvalidParameter`] for a negative or non-finite tolerance, or a pass limit of 0
///
/// ## Example
/// ```rust
/// use kpartition::*;
///
/// fn main() -> Result<()> {
///     let points = points_from_row_major(&[0.0, 0.0, 0.0, 1.0, 10.0, 0.0, 10.0, 1.0], 4, 2)?;
///     let seeds = vec![Point::new(vec![0.0, 0.0])?, Point::new(vec![10.0, 0.0])?];
///
///     let result = k_mean(&points, &seeds, &KMeansConfig::default())?;
///
///     assert_eq!(result.passes(), 2);
///     assert_eq!(result[0].center().coords(), &[0.0, 0.5]);
///     assert_eq!(result[1].center().coords(), &[10.0, 0.5]);
///     Ok(())
/// }
/// ```
pub fn k_mean<'a, T: Primitive>(points: &'a [Point<T>], seeds: &[Point<T>], config: &KMeansConfig<'_, T>) -> Result<ClusterSet<'a, T>> {
    if seeds.is_empty() {
        return Err(KMeansError::NoCenters);
    }
    config.tolerance.validate()?;
    config.pass_limit.validate()?;
    let dims = check_uniform_dims(points.iter().chain(seeds.iter()))?;
    trace!("k-means over {} points with k = {}, dims = {:?}, {:?}", points.len(), seeds.len(), dims, config);

    let mut logic = ConvergenceLogic::new(config.tolerance, config.pass_limit);
    let mut centers = seeds.to_vec();
    loop {
        let clusters = assignment::assign(points, &centers, config.parallel)?;
        let means = next_centers(&clusters, config.empty_cluster_policy)?;

        // Notify subscriber about finished pass
        (config.pass_done)(logic.passes() + 1, &centers, &means);
        if log_enabled!(Level::Debug) {
            debug!("pass {} done, largest center shift: {:e}", logic.passes() + 1, max_shift(&centers, &means)?);
        }

        match logic.next(&centers, &means)? {
            LoopState::Converged => {
                info!("converged after {} passes", logic.passes());
                return Ok(clusters.with_passes(logic.passes()));
            }
            LoopState::Running => centers = means,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::{blobs, membership, pt, pts};
    use crate::{points_from_row_major, PassLimit, Tolerance};
    use proptest::prelude::*;
    use rand::prelude::*;
    use std::cell::RefCell;

    #[test]
    fn two_groups_settle_after_second_pass() {
        let points = pts(&[&[0.0, 0.0], &[0.0, 1.0], &[10.0, 0.0], &[10.0, 1.0]]);
        let seeds = pts(&[&[0.0, 0.0], &[10.0, 0.0]]);

        let res = k_mean(&points, &seeds, &KMeansConfig::default()).unwrap();
        assert_eq!(res.passes(), 2);
        assert_eq!(res.centers(), pts(&[&[0.0, 0.5], &[10.0, 0.5]]));
        assert_eq!(res[0].members(), &[&points[0], &points[1]]);
        assert_eq!(res[1].members(), &[&points[2], &points[3]]);
        assert_eq!(res.assignments(), &[0, 0, 1, 1]);
        assert_approx_eq!(res.inertia().unwrap(), 1.0);
    }

    #[test]
    fn single_point_single_cluster() {
        let points = pts(&[&[5.0, 5.0]]);
        let res = k_mean(&points, &pts(&[&[0.0, 0.0]]), &KMeansConfig::default()).unwrap();
        assert_eq!(res.k(), 1);
        assert_eq!(res[0].center(), &pt(&[5.0, 5.0]));
        assert_eq!(res[0].members(), &[&points[0]]);
        assert_eq!(res.passes(), 2);
    }

    #[test]
    fn seeds_at_the_fixed_point_need_one_pass() {
        let points = pts(&[&[0.0, 0.0], &[0.0, 1.0], &[10.0, 0.0], &[10.0, 1.0]]);
        let res = k_mean(&points, &pts(&[&[0.0, 0.5], &[10.0, 0.5]]), &KMeansConfig::default()).unwrap();
        assert_eq!(res.passes(), 1);
    }

    #[test]
    fn huge_coordinates_do_not_settle_on_the_seed() {
        let points = pts(&[&[1e308, 0.0], &[1e308, 0.0]]);
        let res = k_mean(&points, &pts(&[&[0.0, 0.0]]), &KMeansConfig::default()).unwrap();
        assert_eq!(res.passes(), 2);
        assert_eq!(res.centers(), pts(&[&[1e308, 0.0]]));
        assert!(res.inertia().unwrap() == 0.0);

        let points = pts(&[&[f64::MAX, -f64::MAX], &[f64::MAX, -f64::MAX], &[0.0, 0.0], &[1.0, 0.0]]);
        let res = k_mean(&points, &pts(&[&[f64::MAX, -f64::MAX], &[0.0, 0.0]]), &KMeansConfig::default()).unwrap();
        assert_eq!(res.assignments(), &[0, 0, 1, 1]);
        assert_eq!(res.centers(), pts(&[&[f64::MAX, -f64::MAX], &[0.5, 0.0]]));
        assert!(res.centers().iter().all(|c| c.coords().iter().all(|v| v.is_finite())));
    }

    #[test]
    fn equidistant_point_goes_to_lower_index() {
        // (5,0) is equidistant to both seeds; cluster 0 takes it in every run
        let points = pts(&[&[5.0, 0.0], &[0.0, 0.0], &[10.0, 0.0]]);
        let seeds = pts(&[&[0.0, 0.0], &[10.0, 0.0]]);
        for parallel in [false, true] {
            let conf = KMeansConfig::build().parallel(parallel).build();
            for _ in 0..5 {
                let res = k_mean(&points, &seeds, &conf).unwrap();
                assert_eq!(res.assignments()[0], 0);
            }
        }
    }

    #[test]
    fn empty_cluster_aborts_by_default() {
        let points = pts(&[&[1.0, 1.0], &[1.0, 1.0]]);
        let seeds = pts(&[&[0.0, 0.0], &[5.0, 5.0]]);
        for _ in 0..3 {
            assert_eq!(k_mean(&points, &seeds, &KMeansConfig::default()).unwrap_err(),
                KMeansError::EmptyCluster { cluster: 1 });
        }
    }

    #[test]
    fn empty_cluster_retains_center() {
        let samples = vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0];
        let points = points_from_row_major(&samples, 3, 2).unwrap();
        let seeds = pts(&[&[2.0, 0.0], &[1337.0, 0.0]]);
        let conf = KMeansConfig::build().empty_cluster_policy(EmptyClusterPolicy::RetainCenter).build();

        let res = k_mean(&points, &seeds, &conf).unwrap();
        assert_eq!(res.passes(), 1);
        assert_eq!(res.assignments(), &[0, 0, 0]);
        assert_eq!(res.centers(), seeds);
        assert!(res[1].is_empty());
        assert_approx_eq!(res.inertia().unwrap(), 2.0);
    }

    #[test]
    fn no_points() {
        let seeds = pts(&[&[0.0, 0.0]]);
        assert_eq!(k_mean(&[], &seeds, &KMeansConfig::default()).unwrap_err(), KMeansError::EmptyCluster { cluster: 0 });

        let conf = KMeansConfig::build().empty_cluster_policy(EmptyClusterPolicy::RetainCenter).build();
        let res = k_mean(&[], &seeds, &conf).unwrap();
        assert_eq!(res.centers(), seeds);
        assert_eq!(res.passes(), 1);
    }

    #[test]
    fn input_validation() {
        let points = pts(&[&[0.0, 0.0], &[1.0, 1.0]]);
        let conf = KMeansConfig::default();
        assert_eq!(k_mean(&points, &[], &conf).unwrap_err(), KMeansError::NoCenters);
        assert_eq!(k_mean(&points, &pts(&[&[0.0, 0.0, 0.0]]), &conf).unwrap_err(),
            KMeansError::DimensionMismatch { expected: 2, got: 3 });
        assert_eq!(k_mean(&pts(&[&[0.0, 0.0], &[1.0]]), &pts(&[&[0.0, 0.0]]), &conf).unwrap_err(),
            KMeansError::DimensionMismatch { expected: 2, got: 1 });

        let conf = KMeansConfig::build().tolerance(Tolerance::new(-1.0, 0.0)).build();
        assert!(matches!(k_mean(&points, &points, &conf), Err(KMeansError::InvalidParameter(_))));
        let conf = KMeansConfig::build().pass_limit(PassLimit::AtMost(0)).build();
        assert!(matches!(k_mean(&points, &points, &conf), Err(KMeansError::InvalidParameter(_))));
    }

    #[test]
    fn pass_limit() {
        let points = pts(&[&[0.0, 0.0], &[0.0, 1.0], &[10.0, 0.0], &[10.0, 1.0]]);
        let seeds = pts(&[&[0.0, 0.0], &[10.0, 0.0]]);

        let conf = KMeansConfig::build().pass_limit(PassLimit::AtMost(1)).build();
        assert_eq!(k_mean(&points, &seeds, &conf).unwrap_err(), KMeansError::NonConvergence { passes: 1 });

        // converging on the last allowed pass is fine
        let conf = KMeansConfig::build().pass_limit(PassLimit::AtMost(2)).build();
        assert_eq!(k_mean(&points, &seeds, &conf).unwrap().passes(), 2);

        let conf = KMeansConfig::build().pass_limit(PassLimit::Unbounded).build();
        assert_eq!(k_mean(&points, &seeds, &conf).unwrap().passes(), 2);
    }

    #[test]
    fn pass_done_reports_every_pass() {
        let points = pts(&[&[0.0, 0.0], &[0.0, 1.0], &[10.0, 0.0], &[10.0, 1.0]]);
        let seeds = pts(&[&[0.0, 0.0], &[10.0, 0.0]]);
        let seen = RefCell::new(Vec::new());
        let callback = |pass: usize, centers: &[Point<f64>], means: &[Point<f64>]| {
            seen.borrow_mut().push((pass, centers.to_vec(), means.to_vec()));
        };
        let conf = KMeansConfig::build().pass_done(&callback).build();
        k_mean(&points, &seeds, &conf).unwrap();

        let seen = seen.into_inner();
        let settled = pts(&[&[0.0, 0.5], &[10.0, 0.5]]);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (1, seeds.clone(), settled.clone()));
        assert_eq!(seen[1], (2, settled.clone(), settled));
    }

    #[test]
    fn iris_petals() {
        let samples = vec![1.4f64, 0.2, 1.4, 0.2, 1.3, 0.2, 1.5, 0.2, 1.4, 0.2, 1.7, 0.4, 1.4, 0.3, 1.5, 0.2, 1.4, 0.2, 1.5, 0.1, 1.5, 0.2, 1.6, 0.2, 1.4, 0.1, 1.1, 0.1, 1.2, 0.2, 1.5, 0.4, 1.3, 0.4, 1.4, 0.3, 1.7, 0.3, 1.5, 0.3, 1.7, 0.2, 1.5, 0.4, 1.0, 0.2, 1.7, 0.5, 1.9, 0.2, 1.6, 0.2, 1.6, 0.4, 1.5, 0.2, 1.4, 0.2, 1.6, 0.2, 1.6, 0.2, 1.5, 0.4, 1.5, 0.1, 1.4, 0.2, 1.5, 0.2, 1.2, 0.2, 1.3, 0.2, 1.4, 0.1, 1.3, 0.2, 1.5, 0.2, 1.3, 0.3, 1.3, 0.3, 1.3, 0.2, 1.6, 0.6, 1.9, 0.4, 1.4, 0.3, 1.6, 0.2, 1.4, 0.2, 1.5, 0.2, 1.4, 0.2, 4.7, 1.4, 4.5, 1.5, 4.9, 1.5, 4.0, 1.3, 4.6, 1.5, 4.5, 1.3, 4.7, 1.6, 3.3, 1.0, 4.6, 1.3, 3.9, 1.4, 3.5, 1.0, 4.2, 1.5, 4.0, 1.0, 4.7, 1.4, 3.6, 1.3, 4.4, 1.4, 4.5, 1.5, 4.1, 1.0, 4.5, 1.5, 3.9, 1.1, 4.8, 1.8, 4.0, 1.3, 4.9, 1.5, 4.7, 1.2, 4.3, 1.3, 4.4, 1.4, 4.8, 1.4, 5.0, 1.7, 4.5, 1.5, 3.5, 1.0, 3.8, 1.1, 3.7, 1.0, 3.9, 1.2, 5.1, 1.6, 4.5, 1.5, 4.5, 1.6, 4.7, 1.5, 4.4, 1.3, 4.1, 1.3, 4.0, 1.3, 4.4, 1.2, 4.6, 1.4, 4.0, 1.2, 3.3, 1.0, 4.2, 1.3, 4.2, 1.2, 4.2, 1.3, 4.3, 1.3, 3.0, 1.1, 4.1, 1.3, 6.0, 2.5, 5.1, 1.9, 5.9, 2.1, 5.6, 1.8, 5.8, 2.2, 6.6, 2.1, 4.5, 1.7, 6.3, 1.8, 5.8, 1.8, 6.1, 2.5, 5.1, 2.0, 5.3, 1.9, 5.5, 2.1, 5.0, 2.0, 5.1, 2.4, 5.3, 2.3, 5.5, 1.8, 6.7, 2.2, 6.9, 2.3, 5.0, 1.5, 5.7, 2.3, 4.9, 2.0, 6.7, 2.0, 4.9, 1.8, 5.7, 2.1, 6.0, 1.8, 4.8, 1.8, 4.9, 1.8, 5.6, 2.1, 5.8, 1.6, 6.1, 1.9, 6.4, 2.0, 5.6, 2.2, 5.1, 1.5, 5.6, 1.4, 6.1, 2.3, 5.6, 2.4, 5.5, 1.8, 4.8, 1.8, 5.4, 2.1, 5.6, 2.4, 5.1, 2.3, 5.1, 1.9, 5.9, 2.3, 5.7, 2.5, 5.2, 2.3, 5.0, 1.9, 5.2, 2.0, 5.4, 2.3, 5.1, 1.8];
        let points = points_from_row_major(&samples, 150, 2).unwrap();
        let seeds = vec![points[0].clone(), points[50].clone(), points[100].clone()];

        let res = k_mean(&points, &seeds, &KMeansConfig::default()).unwrap();

        // setosa (the first 50 samples) is separated perfectly
        assert_eq!(&res.assignments()[..50], &[0; 50][..]);
        assert!(res.assignments()[50..].iter().all(|&a| a != 0));
        assert_approx_eq!(res[0].center()[0], 1.462, 1e-9);
        assert_approx_eq!(res[0].center()[1], 0.246, 1e-9);
        assert_eq!(res.iter().map(|c| c.len()).sum::<usize>(), 150);
    }

    #[test] fn blobs_are_recovered_f32() { blobs_are_recovered::<f32>(); }
    #[test] fn blobs_are_recovered_f64() { blobs_are_recovered::<f64>(); }

    fn blobs_are_recovered<T: Primitive>() {
        let mut rnd = StdRng::seed_from_u64(1);
        let points = blobs::<T>(&mut rnd, 3, 200, 4, 10.0);
        let seeds = vec![points[0].clone(), points[200].clone(), points[400].clone()];

        let res = k_mean(&points, &seeds, &KMeansConfig::build().parallel(true).build()).unwrap();
        for (i, &a) in res.assignments().iter().enumerate() {
            assert_eq!(a, i / 200);
        }
        for c in res.iter() {
            assert_eq!(c.len(), 200);
            let expected = T::lossy_from_f64(100.0 * c.index() as f64);
            c.center().coords().iter().for_each(|&v| assert!((v - expected).abs() < T::lossy_from_f64(2.0)));
        }
    }


    fn small_dataset() -> impl Strategy<Value = (Vec<Point<f64>>, usize)> {
        (1usize..4, 1usize..40).prop_flat_map(|(dims, cnt)| {
            (prop::collection::vec(prop::collection::vec(-100.0..100.0f64, dims), cnt), 1..=cnt.min(5))
        }).prop_map(|(coords, k)| (coords.into_iter().map(|c| pt(&c)).collect(), k))
    }

    fn retaining() -> KMeansConfig<'static, f64> {
        KMeansConfig::build().empty_cluster_policy(EmptyClusterPolicy::RetainCenter).build()
    }

    type Summary = (Vec<Point<f64>>, Vec<usize>, usize, Vec<(Vec<f64>, usize)>);

    fn summary(res: Result<ClusterSet<'_, f64>>) -> Result<Summary> {
        res.map(|s| (s.centers(), s.assignments().to_vec(), s.passes(), membership(&s)))
    }

    proptest! {
        #[test]
        fn single_cluster_is_the_centroid((points, _) in small_dataset(), seed_idx in 0usize..40) {
            let seed = vec![points[seed_idx % points.len()].clone()];
            let res = k_mean(&points, &seed, &KMeansConfig::default()).unwrap();

            prop_assert!(res.passes() <= 2);
            prop_assert_eq!(res[0].members().len(), points.len());
            for (m, p) in res[0].members().iter().zip(points.iter()) {
                prop_assert!(std::ptr::eq(*m, p));
            }
            let dims = points[0].dims();
            for d in 0..dims {
                let centroid = points.iter().map(|p| p[d]).sum::<f64>() / points.len() as f64;
                prop_assert!((res[0].center()[d] - centroid).abs() <= 1e-8 + 1e-5 * centroid.abs());
            }
        }

        #[test]
        fn runs_are_deterministic((points, k) in small_dataset()) {
            let seeds = points[..k].to_vec();

            let first = summary(k_mean(&points, &seeds, &retaining()));
            let second = summary(k_mean(&points, &seeds, &retaining()));
            let par_conf = KMeansConfig::build()
                .empty_cluster_policy(EmptyClusterPolicy::RetainCenter).parallel(true).build();
            let parallel = summary(k_mean(&points, &seeds, &par_conf));
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first, &parallel);
        }

        #[test]
        fn converged_centers_are_a_fixed_point((points, k) in small_dataset()) {
            let seeds = points[..k].to_vec();
            if let Ok(first) = k_mean(&points, &seeds, &retaining()) {
                let again = k_mean(&points, &first.centers(), &retaining()).unwrap();
                prop_assert_eq!(again.passes(), 1);
                prop_assert_eq!(again.centers(), first.centers());
                prop_assert_eq!(again.assignments(), first.assignments());
            }
        }
    }
}
