use crate::error::KMeansError;
use ndarray::{Array2, ArrayView2, Axis};

/// Result of one assignment pass: for each centroid index, the dataset rows
/// placed under it.
///
/// Buckets are keyed by centroid index only, so two centroids with identical
/// coordinates still own separate buckets. Row indices inside a bucket keep
/// dataset order. The partition borrows the dataset instead of copying points.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    data: ArrayView2<'a, f64>,
    buckets: Vec<Vec<usize>>,
    labels: Vec<Option<usize>>,
    distances: Vec<f64>,
}

impl<'a> Partition<'a> {
    /// Build a partition from per-point assignments.
    ///
    /// `assignments[i]` is `Some((cluster, squared_distance))`, or `None` for a
    /// point left out of every bucket.
    pub(crate) fn from_assignments(
        data: ArrayView2<'a, f64>,
        k: usize,
        assignments: &[Option<(usize, f64)>],
    ) -> Self {
        let mut buckets = vec![Vec::new(); k];
        let mut labels = Vec::with_capacity(assignments.len());
        let mut distances = Vec::with_capacity(assignments.len());

        for (i, assignment) in assignments.iter().enumerate() {
            match *assignment {
                Some((cluster, dist)) => {
                    buckets[cluster].push(i);
                    labels.push(Some(cluster));
                    distances.push(dist);
                }
                None => {
                    labels.push(None);
                    distances.push(f64::NAN);
                }
            }
        }

        Self {
            data,
            buckets,
            labels,
            distances,
        }
    }

    /// Build a partition from explicit buckets of row indices into `data`.
    ///
    /// Rows that appear in no bucket are treated as unassigned. Distances are
    /// measured against each bucket's mean.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a row index is out of range or listed
    /// more than once.
    pub fn from_buckets(
        data: ArrayView2<'a, f64>,
        buckets: Vec<Vec<usize>>,
    ) -> Result<Self, KMeansError> {
        let n_samples = data.nrows();
        let mut labels = vec![None; n_samples];
        let mut distances = vec![f64::NAN; n_samples];

        for (cluster, bucket) in buckets.iter().enumerate() {
            for &row in bucket {
                if row >= n_samples {
                    return Err(KMeansError::InvalidConfiguration(format!(
                        "bucket {} refers to row {}, dataset has {} rows",
                        cluster, row, n_samples
                    )));
                }
                if labels[row].is_some() {
                    return Err(KMeansError::InvalidConfiguration(format!(
                        "row {} appears in more than one bucket",
                        row
                    )));
                }
                labels[row] = Some(cluster);
            }

            if let Some(mean) = data.select(Axis(0), bucket).mean_axis(Axis(0)) {
                for &row in bucket {
                    distances[row] = crate::distance::squared_euclidean(&data.row(row), &mean.view());
                }
            }
        }

        Ok(Self {
            data,
            buckets,
            labels,
            distances,
        })
    }

    /// Number of buckets (one per centroid)
    pub fn k(&self) -> usize {
        self.buckets.len()
    }

    /// Dimensionality of the partitioned points
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }

    /// The dataset this partition refers to
    pub fn data(&self) -> &ArrayView2<'a, f64> {
        &self.data
    }

    /// Row indices assigned to `cluster`, in dataset order
    pub fn bucket(&self, cluster: usize) -> &[usize] {
        &self.buckets[cluster]
    }

    /// All buckets, indexed by centroid
    pub fn buckets(&self) -> &[Vec<usize>] {
        &self.buckets
    }

    /// Number of points in each bucket
    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Copy of the points assigned to `cluster`, one per row
    pub fn bucket_points(&self, cluster: usize) -> Array2<f64> {
        self.data.select(Axis(0), &self.buckets[cluster])
    }

    /// Per-point cluster label; `None` for points left unassigned
    pub fn labels(&self) -> &[Option<usize>] {
        &self.labels
    }

    /// Squared distance from each point to the centroid it was assigned to
    /// (NaN when unassigned)
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of points placed in some bucket
    pub fn n_assigned(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Rows that were left out of every bucket
    pub fn unassigned(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Sum of squared distances of assigned points to their centroids
    pub fn inertia(&self) -> f64 {
        self.distances.iter().filter(|d| !d.is_nan()).sum()
    }
}
