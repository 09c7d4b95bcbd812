use crate::algorithm::{
    assign_points, initialize_centroids, kmeans_lloyd, predict_labels, recompute_centroids,
    run_lloyd, FitResult, Termination,
};
use crate::config::KMeansConfig;
use crate::dataset::dataset_shape;
use crate::error::KMeansError;
use crate::observer::{FitObserver, NoopObserver};
use crate::partition::Partition;
use ndarray::{Array1, Array2, ArrayView2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// K-means clustering with Lloyd's algorithm over ndarray data.
///
/// Rows of the input matrix are points. The model never modifies the data it
/// is given. Each stage of the fit loop is also exposed on its own so that it
/// can be driven step by step.
///
/// # Example
///
/// ```
/// use lloyd_kmeans::KMeans;
/// use ndarray::array;
///
/// let data = array![[1.0, 2.0], [1.5, 1.8], [5.0, 8.0], [8.0, 8.0], [1.0, 0.6], [9.0, 11.0]];
///
/// let mut kmeans = KMeans::new(2);
/// let centroids = kmeans.fit(&data.view()).unwrap();
/// assert_eq!(centroids.dim(), (2, 2));
///
/// let labels = kmeans.predict(&data.view()).unwrap();
/// assert_eq!(labels[0], labels[1]);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Receiver of fit events
    observer: Arc<dyn FitObserver>,

    /// Number of features seen by the last successful fit (0 before fitting)
    d: usize,

    /// Outcome of the last successful fit
    fitted: Option<FitResult>,
}

impl KMeans {
    /// Create a new instance with the default configuration and `k` clusters.
    ///
    /// `k` is validated when fitting.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new instance with a custom configuration.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
            d: 0,
            fitted: None,
        }
    }

    /// Report fit events to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn FitObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Fit the model to the data and return the final centroids.
    ///
    /// Centroids are initialized from `config.seed`, so repeated fits of the
    /// same data give the same answer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The dataset is empty
    /// - k is 0 or larger than the number of samples, or the tolerance is invalid
    /// - A point cannot be assigned under the `Fail` policy
    ///
    /// On error the previous fit, if any, is kept.
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<Array2<f64>, KMeansError> {
        let result = kmeans_lloyd(data, &self.config, self.observer.as_ref())?;
        Ok(self.store(data, result))
    }

    /// Fit the model starting from the given centroids instead of sampling them.
    pub fn fit_from(
        &mut self,
        data: &ArrayView2<f64>,
        initial_centroids: &ArrayView2<f64>,
    ) -> Result<Array2<f64>, KMeansError> {
        let result = run_lloyd(
            data,
            initial_centroids.to_owned(),
            &self.config,
            self.observer.as_ref(),
        )?;
        Ok(self.store(data, result))
    }

    fn store(&mut self, data: &ArrayView2<f64>, result: FitResult) -> Array2<f64> {
        self.d = data.ncols();
        let centroids = result.centroids.clone();
        self.fitted = Some(result);
        centroids
    }

    /// Predict cluster assignments for new data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    /// - A point has no comparable distance to any centroid
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let fitted = self.fitted.as_ref().ok_or(KMeansError::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(KMeansError::DimensionMismatch(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        predict_labels(data, &fitted.centroids.view(), self.config.parallel)
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.fit(data)?;
        self.predict(data)
    }

    /// Sample k distinct data points as starting centroids, seeded from `config.seed`.
    pub fn initialize_centroids(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>, KMeansError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        initialize_centroids(data, self.config.k, &mut rng)
    }

    /// Run one assignment pass against `centroids`.
    pub fn assign_points<'a>(
        &self,
        data: &ArrayView2<'a, f64>,
        centroids: &ArrayView2<f64>,
    ) -> Result<Partition<'a>, KMeansError> {
        dataset_shape(data)?;
        if centroids.nrows() != self.config.k {
            return Err(KMeansError::InvalidConfiguration(format!(
                "expected {} centroids, got {}",
                self.config.k,
                centroids.nrows()
            )));
        }
        assign_points(data, centroids, &self.config, self.observer.as_ref(), 0)
    }

    /// Recompute centroids from a partition; empty buckets fall back on `previous`.
    pub fn recompute_centroids(
        &self,
        partition: &Partition<'_>,
        previous: &ArrayView2<f64>,
    ) -> Result<Array2<f64>, KMeansError> {
        recompute_centroids(partition, previous, &self.config, self.observer.as_ref(), 0)
    }

    /// Get the centroids of the fitted model.
    ///
    /// # Returns
    ///
    /// Returns `Some(&Array2<f64>)` if the model has been fitted, `None` otherwise.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.fitted.as_ref().map(|f| &f.centroids)
    }

    /// Number of iterations the last fit ran
    pub fn n_iterations(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.n_iterations)
    }

    /// How the last fit ended
    pub fn termination(&self) -> Option<Termination> {
        self.fitted.as_ref().map(|f| f.termination)
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features (dimensions); 0 before fitting.
    pub fn d(&self) -> usize {
        self.d
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
