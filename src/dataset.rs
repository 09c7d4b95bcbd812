use crate::error::KMeansError;
use ndarray::{Array2, ArrayView2};

/// Build a dataset matrix (rows = points) from individually owned points.
///
/// Every row must have the same, non-zero length; the first row fixes the
/// dimensionality for the rest.
pub fn dataset_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>, KMeansError> {
    let first = rows.first().ok_or(KMeansError::EmptyDataset)?;
    let n_features = first.len();
    if n_features == 0 {
        return Err(KMeansError::EmptyDataset);
    }

    let mut flat = Vec::with_capacity(rows.len() * n_features);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_features {
            return Err(KMeansError::DimensionMismatch(format!(
                "point {} has {} coordinates, expected {}",
                i,
                row.len(),
                n_features
            )));
        }
        flat.extend_from_slice(row);
    }

    Array2::from_shape_vec((rows.len(), n_features), flat)
        .map_err(|e| KMeansError::DimensionMismatch(e.to_string()))
}

/// Return `(n_samples, n_features)`, rejecting datasets without points or coordinates.
pub(crate) fn dataset_shape(data: &ArrayView2<f64>) -> Result<(usize, usize), KMeansError> {
    let (n_samples, n_features) = data.dim();
    if n_samples == 0 || n_features == 0 {
        return Err(KMeansError::EmptyDataset);
    }
    Ok((n_samples, n_features))
}

/// Check that a centroid set has the dataset's dimensionality.
pub(crate) fn check_centroid_dim(
    centroids: &ArrayView2<f64>,
    n_features: usize,
) -> Result<(), KMeansError> {
    if centroids.ncols() != n_features {
        return Err(KMeansError::DimensionMismatch(format!(
            "Expected {} features, got {} in centroids",
            n_features,
            centroids.ncols()
        )));
    }
    Ok(())
}
