use crate::error::KMeansError;

/// How the fit loop decides that two consecutive centroid sets are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Convergence {
    /// Every coordinate must compare equal with `==` or keep its exact bit
    /// pattern. Floating-point means rarely recur exactly, so this mode often
    /// runs to the iteration limit.
    Exact,
    /// Every coordinate of every centroid may move by at most this amount.
    /// A coordinate with an unchanged bit pattern, NaN and infinities
    /// included, has not moved.
    Tolerance(f64),
}

/// What the aggregation step does with a centroid whose bucket came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the previous centroid unchanged.
    #[default]
    Retain,
    /// Move the centroid onto the point lying farthest from its assigned centroid,
    /// skipping points that are the last member of their own cluster. With no
    /// such point left the previous centroid is kept.
    ReseedFarthest,
}

/// What the assignment step does with a point that matches no centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnassignablePolicy {
    /// Abort the pass with [`KMeansError::UnassignablePoint`].
    #[default]
    Fail,
    /// Report the point to the observer and leave it out of the partition.
    Drop,
}

/// Configuration for the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of assign/recompute iterations. Zero returns the
    /// initial centroids untouched.
    pub max_iters: usize,

    /// Per-coordinate convergence tolerance. `None` switches to exact equality.
    pub equality_tolerance: Option<f64>,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Handling of clusters that lose all their points
    pub empty_cluster_policy: EmptyClusterPolicy,

    /// Handling of points that cannot be compared against any centroid
    pub unassignable_policy: UnassignablePolicy,

    /// Run the per-point nearest-centroid search on the rayon pool
    pub parallel: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 100,
            equality_tolerance: Some(1e-8),
            seed: 0,
            empty_cluster_policy: EmptyClusterPolicy::Retain,
            unassignable_policy: UnassignablePolicy::Fail,
            parallel: true,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance (`None` for exact equality)
    pub fn with_equality_tolerance(mut self, tol: Option<f64>) -> Self {
        self.equality_tolerance = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the empty cluster policy
    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Set the unassignable point policy
    pub fn with_unassignable_policy(mut self, policy: UnassignablePolicy) -> Self {
        self.unassignable_policy = policy;
        self
    }

    /// Enable or disable parallel assignment
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The equality policy the fit loop uses for its convergence test.
    pub fn convergence(&self) -> Convergence {
        match self.equality_tolerance {
            Some(tol) => Convergence::Tolerance(tol),
            None => Convergence::Exact,
        }
    }

    /// Check the settings that do not depend on the dataset.
    pub fn validate(&self) -> Result<(), KMeansError> {
        if self.k == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "k must be greater than 0".to_string(),
            ));
        }

        if let Some(tol) = self.equality_tolerance {
            if !tol.is_finite() || tol < 0.0 {
                return Err(KMeansError::InvalidConfiguration(format!(
                    "equality tolerance must be a finite non-negative number, got {}",
                    tol
                )));
            }
        }

        Ok(())
    }

    /// Check the settings against a dataset of `n_samples` points.
    pub fn validate_for(&self, n_samples: usize) -> Result<(), KMeansError> {
        self.validate()?;

        if self.k > n_samples {
            return Err(KMeansError::InvalidConfiguration(format!(
                "k ({}) is greater than the number of samples ({})",
                self.k, n_samples
            )));
        }

        Ok(())
    }
}
