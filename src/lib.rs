//! # kpartition - API documentation
//!
//! Kpartition is a small rust library that partitions a set of points into k groups using
//! Lloyd's k-means iteration, starting from initial centers supplied by the caller.
//!
//! ## Design target
//! The crate covers the clustering engine only: distance computation, the assignment policy,
//! centroid recomputation and the convergence loop. Where the points and the initial centers come
//! from, and what is done with the result, is up to the caller.
//! The whole calculation is a pure function of its inputs: the same points and seeds always yield
//! the same clusters, whether the assignment step runs sequentially or on the rayon thread-pool.
//!
//! ## Algorithm
//! Every pass builds one fresh [`Cluster`] per center and assigns each point to the cluster whose
//! center is nearest (Euclidean distance, exact ties go to the lowest cluster index). The means of
//! the clusters are then compared against the centers of the pass. If all coordinates match within
//! the configured [`Tolerance`], the run has converged and the clusters of that pass are returned.
//! Otherwise the means become the centers of the next pass.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kpartition::*;
//!
//! fn main() -> Result<()> {
//!     let points = vec![
//!         Point::new(vec![0.0, 0.0])?, Point::new(vec![0.0, 1.0])?,
//!         Point::new(vec![10.0, 0.0])?, Point::new(vec![10.0, 1.0])?,
//!     ];
//!     let seeds = vec![Point::new(vec![0.0, 0.0])?, Point::new(vec![10.0, 0.0])?];
//!
//!     let result = k_mean(&points, &seeds, &KMeansConfig::default())?;
//!     for cluster in result.iter() {
//!         println!("Cluster {}: center {} members {:?}", cluster.index() + 1, cluster.center(), cluster.members());
//!     }
//!     println!("Inertia: {}", result.inertia()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Example (using the status event callback)
//! ```rust
//! use kpartition::*;
//!
//! fn main() -> Result<()> {
//!     let samples = vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0, 11.0, 0.0, 12.0, 0.0];
//!     let points = points_from_row_major(&samples, 5, 2)?;
//!     let seeds = vec![points[0].clone(), points[1].clone()];
//!
//!     let conf = KMeansConfig::build()
//!         .pass_done(&|pass, centers: &[Point<f64>], means: &[Point<f64>]| {
//!             println!("Pass {}: {:?} -> {:?}", pass, centers, means)
//!         })
//!         .pass_limit(PassLimit::AtMost(50))
//!         .build();
//!
//!     let result = k_mean(&points, &seeds, &conf)?;
//!     println!("Assignments: {:?}", result.assignments());
//!     Ok(())
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`k_mean`] function. It borrows the caller's points, so the
//! returned [`ClusterSet`] holds references into them instead of copies. A single assignment pass is
//! available on its own as [`assign`].
//!
//! Behaviour of a run is configured with [`KMeansConfig`]: the convergence [`Tolerance`], a
//! [`PassLimit`] guarding against runs that never settle, the [`EmptyClusterPolicy`] and whether the
//! assignment step runs in parallel. All failures are reported as [`KMeansError`].

#[macro_use] mod helpers;
mod error;
mod primitive;
mod point;
mod distance;
mod cluster;
mod cluster_set;
mod assignment;
mod convergence;
mod config;
mod lloyd;

pub use error::{KMeansError, Result};
pub use primitive::Primitive;
pub use point::{Point, points_from_row_major, check_uniform_dims};
pub use distance::{distance, squared_distance};
pub use cluster::Cluster;
pub use cluster_set::ClusterSet;
pub use assignment::assign;
pub use convergence::{Tolerance, PassLimit};
pub use config::{KMeansConfig, KMeansConfigBuilder, EmptyClusterPolicy, PassDoneCallbackFn};
pub use lloyd::k_mean;
