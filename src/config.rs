use crate::{PassLimit, Point, Primitive, Tolerance};

/// Callback that is called after each pass
/// ## Arguments
/// - **pass**: Number of the finished pass (starting at 1)
/// - **centers**: The centers this pass assigned points to
/// - **means**: The freshly computed centers for the next pass
pub type PassDoneCallbackFn<'a, T> = &'a dyn Fn(usize, &[Point<T>], &[Point<T>]);

/// What to do with a cluster that ended a pass without any members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Abort the run with [`KMeansError::EmptyCluster`](crate::KMeansError::EmptyCluster).
    Abort,
    /// Keep the cluster's previous center for the next pass. The cluster may stay empty
    /// until convergence, in which case it is part of the result without members.
    RetainCenter,
}
impl Default for EmptyClusterPolicy {
    fn default() -> Self { EmptyClusterPolicy::Abort }
}

/// This is a structure holding the configuration options for a k-means run, such as
/// the convergence tolerance, the pass limit, or a callback that can be set to get status
/// information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    pub(crate) tolerance: Tolerance<T>,
    pub(crate) pass_limit: PassLimit,
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
    pub(crate) parallel: bool,
    pub(crate) pass_done: PassDoneCallbackFn<'a, T>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            pass_limit: PassLimit::default(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
            parallel: false,
            pass_done: &|_, _, _| {},
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub fn tolerance(&self) -> Tolerance<T> { self.tolerance }
    pub fn pass_limit(&self) -> PassLimit { self.pass_limit }
    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy { self.empty_cluster_policy }
    pub fn parallel(&self) -> bool { self.parallel }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("tolerance", &self.tolerance)
            .field("pass_limit", &self.pass_limit)
            .field("empty_cluster_policy", &self.empty_cluster_policy)
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the tolerance used to decide whether the centers stopped moving.
    /// ## Default
    /// [`Tolerance`] `{ absolute: 1e-8, relative: 1e-5 }`
    pub fn tolerance(mut self, tolerance: Tolerance<T>) -> Self {
        self.config.tolerance = tolerance; self
    }
    /// Set the maximum amount of passes. For more information, see documentation of [`PassLimit`].
    /// ## Default
    /// [`PassLimit::AtMost`] `(300)`
    pub fn pass_limit(mut self, pass_limit: PassLimit) -> Self {
        self.config.pass_limit = pass_limit; self
    }
    /// Set how clusters without members are handled.
    /// ## Default
    /// [`EmptyClusterPolicy::Abort`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Run the nearest-center search of each pass on the rayon thread-pool.
    /// ## Default
    /// `false`
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel; self
    }
    /// Set the callback that should be called after each pass of a running calculation.
    pub fn pass_done(mut self, pass_done: PassDoneCallbackFn<'a, T>) -> Self {
        self.config.pass_done = pass_done; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}
