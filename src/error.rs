use thiserror::Error;

/// Error types for the lloyd-kmeans library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// k, the tolerance, or another setting is unusable for this dataset
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The dataset has no points (or points with no coordinates)
    #[error("Empty dataset: at least one point with at least one coordinate is required")]
    EmptyDataset,

    /// A point or centroid disagrees with the dataset's dimensionality
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A point could not be compared against any centroid
    #[error("Point {index} could not be assigned to any centroid (non-comparable distances)")]
    UnassignablePoint { index: usize },

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,
}
