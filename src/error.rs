//! Error types for the clustering engine.

use thiserror::Error;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, KMeansError>;

/// Errors that can abort a k-means run.
///
/// None of these are recovered inside the crate; a failed run yields no
/// usable [`ClusterSet`](crate::ClusterSet).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// Two points (or a point and a center) differ in dimensionality.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A cluster ended its assignment pass without members, so it has no mean.
    #[error("cluster {cluster} has no members, its mean is undefined")]
    EmptyCluster { cluster: usize },

    /// The pass limit was hit before the centers settled within tolerance.
    #[error("centers did not converge within {passes} passes")]
    NonConvergence { passes: usize },

    /// No initial centers were supplied (k = 0).
    #[error("at least one initial center is required")]
    NoCenters,

    /// A point was constructed without coordinates.
    #[error("a point needs at least one coordinate")]
    ZeroDimensions,

    /// A point coordinate is NaN or infinite.
    #[error("coordinate on axis {axis} is not finite")]
    NonFiniteCoordinate { axis: usize },

    /// A configuration value is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = KMeansError::DimensionMismatch { expected: 2, got: 3 };
        assert_eq!(err.to_string(), "dimension mismatch: expected 2, got 3");

        let err = KMeansError::EmptyCluster { cluster: 4 };
        assert_eq!(err.to_string(), "cluster 4 has no members, its mean is undefined");

        let err = KMeansError::NonConvergence { passes: 300 };
        assert_eq!(err.to_string(), "centers did not converge within 300 passes");

        let err = KMeansError::NonFiniteCoordinate { axis: 1 };
        assert_eq!(err.to_string(), "coordinate on axis 1 is not finite");

        let err = KMeansError::InvalidParameter("relative tolerance must be finite and >= 0".to_string());
        assert_eq!(err.to_string(), "invalid parameter: relative tolerance must be finite and >= 0");
    }

    #[test]
    fn errors_compare_by_kind_and_payload() {
        assert_eq!(KMeansError::NoCenters, KMeansError::NoCenters);
        assert_ne!(KMeansError::EmptyCluster { cluster: 0 }, KMeansError::EmptyCluster { cluster: 1 });
    }
}
