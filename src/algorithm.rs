use crate::config::{EmptyClusterPolicy, KMeansConfig, UnassignablePolicy};
use crate::dataset::{check_centroid_dim, dataset_shape};
use crate::distance::{centroids_equal, compute_centroid_shift, nearest_centroid};
use crate::error::KMeansError;
use crate::observer::{FitEvent, FitObserver};
use crate::partition::Partition;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// How a fit run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The recomputed centroids matched the previous ones under the equality policy
    Converged,
    /// `max_iters` cycles ran without convergence
    IterationLimitReached,
}

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Final (k, d) centroid set
    pub centroids: Array2<f64>,
    /// Number of assign/recompute cycles that ran
    pub n_iterations: usize,
    /// Why the run stopped
    pub termination: Termination,
}

/// Initialize centroids by randomly selecting k distinct data points.
///
/// Indices are sampled without replacement and the selected rows are copied,
/// so `data` is never reordered.
pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Result<Array2<f64>, KMeansError> {
    let (n_samples, _) = dataset_shape(data)?;

    if k == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "k must be greater than 0".to_string(),
        ));
    }

    if k > n_samples {
        return Err(KMeansError::InvalidConfiguration(format!(
            "k ({}) is greater than the number of samples ({})",
            k, n_samples
        )));
    }

    let indices: Vec<usize> = (0..n_samples).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    Ok(data.select(Axis(0), &selected))
}

/// Place every point under its nearest centroid.
///
/// Ties go to the lowest centroid index. With `config.parallel` the
/// per-point search runs on the rayon pool; results are gathered in dataset
/// order, so the partition is the same either way.
///
/// # Errors
///
/// * `EmptyDataset` if `data` has no points
/// * `InvalidConfiguration` if there are no centroids
/// * `DimensionMismatch` if centroids and points differ in length
/// * `UnassignablePoint` if a point has no comparable distance to any
///   centroid and `config.unassignable_policy` is `Fail`
pub fn assign_points<'a>(
    data: &ArrayView2<'a, f64>,
    centroids: &ArrayView2<f64>,
    config: &KMeansConfig,
    observer: &dyn FitObserver,
    iteration: usize,
) -> Result<Partition<'a>, KMeansError> {
    let (n_samples, n_features) = dataset_shape(data)?;
    check_centroid_dim(centroids, n_features)?;

    let k = centroids.nrows();
    if k == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "cannot assign points to an empty centroid set".to_string(),
        ));
    }

    let assignments: Vec<Option<(usize, f64)>> = if config.parallel {
        (0..n_samples)
            .into_par_iter()
            .map(|i| nearest_centroid(&data.row(i), centroids))
            .collect()
    } else {
        data.outer_iter()
            .map(|point| nearest_centroid(&point, centroids))
            .collect()
    };

    for (index, _) in assignments.iter().enumerate().filter(|(_, a)| a.is_none()) {
        let dropped = config.unassignable_policy == UnassignablePolicy::Drop;
        observer.on_event(&FitEvent::UnassignablePoint {
            iteration,
            index,
            dropped,
        });
        if !dropped {
            return Err(KMeansError::UnassignablePoint { index });
        }
    }

    let partition = Partition::from_assignments(data.clone(), k, &assignments);
    observer.on_event(&FitEvent::ClusterSizes {
        iteration,
        sizes: partition.bucket_sizes(),
    });

    Ok(partition)
}

/// Recompute each centroid as the mean of its bucket.
///
/// The mean is a running per-coordinate sum divided by the bucket size. A
/// bucket with no points keeps `previous`'s centroid bit for bit, unless
/// `config.empty_cluster_policy` asks for reseeding; then the centroid moves
/// onto the assigned point lying farthest from its own centroid. Rows are
/// never handed out twice, ties go to the lower row index, and a point is
/// skipped when taking it would leave its own cluster empty.
///
/// # Errors
///
/// * `InvalidConfiguration` if `previous` does not hold one centroid per bucket
/// * `DimensionMismatch` if `previous` and the partitioned points differ in length
pub fn recompute_centroids(
    partition: &Partition<'_>,
    previous: &ArrayView2<f64>,
    config: &KMeansConfig,
    observer: &dyn FitObserver,
    iteration: usize,
) -> Result<Array2<f64>, KMeansError> {
    let k = partition.k();
    let n_features = partition.dim();

    if previous.nrows() != k {
        return Err(KMeansError::InvalidConfiguration(format!(
            "partition has {} buckets but {} previous centroids were given",
            k,
            previous.nrows()
        )));
    }
    check_centroid_dim(previous, n_features)?;

    let data = partition.data();
    let mut centroids = Array2::zeros((k, n_features));
    let mut empty_clusters = Vec::new();

    for (cluster_idx, bucket) in partition.buckets().iter().enumerate() {
        let mut row = centroids.row_mut(cluster_idx);
        if bucket.is_empty() {
            row.assign(&previous.row(cluster_idx));
            empty_clusters.push(cluster_idx);
            continue;
        }

        let mut sum: Array1<f64> = Array1::zeros(n_features);
        for &point_idx in bucket {
            sum += &data.row(point_idx);
        }
        sum /= bucket.len() as f64;
        row.assign(&sum);
    }

    match config.empty_cluster_policy {
        EmptyClusterPolicy::Retain => {
            for &cluster in &empty_clusters {
                observer.on_event(&FitEvent::EmptyClusterRetained { iteration, cluster });
            }
        }
        EmptyClusterPolicy::ReseedFarthest => {
            let mut candidates: Vec<(usize, f64)> = partition
                .distances()
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, d)| !d.is_nan())
                .collect();
            // stable sort keeps lower row indices first among equal distances
            candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
            let mut candidates = candidates.into_iter();

            // a donor cluster must keep at least one point
            let mut remaining = partition.bucket_sizes();
            let labels = partition.labels();

            for &cluster in &empty_clusters {
                let donor = candidates.by_ref().find(|&(point, _)| match labels[point] {
                    Some(owner) if remaining[owner] > 1 => {
                        remaining[owner] -= 1;
                        true
                    }
                    _ => false,
                });
                match donor {
                    Some((point, _)) => {
                        centroids.row_mut(cluster).assign(&data.row(point));
                        observer.on_event(&FitEvent::EmptyClusterReseeded {
                            iteration,
                            cluster,
                            point,
                        });
                    }
                    None => {
                        observer.on_event(&FitEvent::EmptyClusterRetained { iteration, cluster });
                    }
                }
            }
        }
    }

    Ok(centroids)
}

/// Run Lloyd's algorithm from the given starting centroids.
///
/// Each iteration assigns every point, recomputes the centroids, and then
/// stops with `Converged` if the candidate equals the current set under the
/// configured equality policy, or with `IterationLimitReached` once
/// `max_iters` iterations have run. Either way the candidate set is returned.
/// With `max_iters == 0` the starting centroids come back untouched.
pub fn run_lloyd(
    data: &ArrayView2<f64>,
    initial_centroids: Array2<f64>,
    config: &KMeansConfig,
    observer: &dyn FitObserver,
) -> Result<FitResult, KMeansError> {
    let (n_samples, n_features) = dataset_shape(data)?;
    config.validate_for(n_samples)?;

    if initial_centroids.nrows() != config.k {
        return Err(KMeansError::InvalidConfiguration(format!(
            "expected {} initial centroids, got {}",
            config.k,
            initial_centroids.nrows()
        )));
    }
    check_centroid_dim(&initial_centroids.view(), n_features)?;

    let convergence = config.convergence();
    observer.on_event(&FitEvent::RunStarted {
        n_samples,
        n_features,
        k: config.k,
        max_iters: config.max_iters,
        convergence,
    });

    if config.max_iters == 0 {
        observer.on_event(&FitEvent::IterationLimitReached { iterations: 0 });
        return Ok(FitResult {
            centroids: initial_centroids,
            n_iterations: 0,
            termination: Termination::IterationLimitReached,
        });
    }

    let mut centroids = initial_centroids;
    let mut iteration = 0;

    loop {
        iteration += 1;
        observer.on_event(&FitEvent::IterationStarted { iteration });

        let partition = assign_points(data, &centroids.view(), config, observer, iteration)?;
        let candidate =
            recompute_centroids(&partition, &centroids.view(), config, observer, iteration)?;

        let shift = compute_centroid_shift(&centroids.view(), &candidate.view());
        let converged = centroids_equal(&centroids.view(), &candidate.view(), convergence);
        observer.on_event(&FitEvent::IterationFinished {
            iteration,
            shift,
            converged,
        });

        if converged {
            observer.on_event(&FitEvent::Converged {
                iterations: iteration,
            });
            return Ok(FitResult {
                centroids: candidate,
                n_iterations: iteration,
                termination: Termination::Converged,
            });
        }

        if iteration >= config.max_iters {
            observer.on_event(&FitEvent::IterationLimitReached {
                iterations: iteration,
            });
            return Ok(FitResult {
                centroids: candidate,
                n_iterations: iteration,
                termination: Termination::IterationLimitReached,
            });
        }

        centroids = candidate;
    }
}

/// Run k-means with random initialization seeded from `config.seed`.
pub fn kmeans_lloyd(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    observer: &dyn FitObserver,
) -> Result<FitResult, KMeansError> {
    let (n_samples, _) = dataset_shape(data)?;
    config.validate_for(n_samples)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let centroids = initialize_centroids(data, config.k, &mut rng)?;

    run_lloyd(data, centroids, config, observer)
}

/// Label each point with its nearest centroid
pub fn predict_labels(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    parallel: bool,
) -> Result<Array1<usize>, KMeansError> {
    let (n_samples, n_features) = dataset_shape(data)?;
    check_centroid_dim(centroids, n_features)?;

    let nearest = |i: usize| {
        nearest_centroid(&data.row(i), centroids)
            .map(|(label, _)| label)
            .ok_or(KMeansError::UnassignablePoint { index: i })
    };

    let labels: Result<Vec<usize>, KMeansError> = if parallel {
        (0..n_samples).into_par_iter().map(nearest).collect()
    } else {
        (0..n_samples).map(nearest).collect()
    };

    Ok(Array1::from(labels?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Convergence;
    use crate::observer::{EventLog, NoopObserver};
    use approx::assert_relative_eq;
    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use std::collections::HashSet;

    fn toy_data() -> Array2<f64> {
        array![
            [1.0, 2.0],
            [1.5, 1.8],
            [5.0, 8.0],
            [8.0, 8.0],
            [1.0, 0.6],
            [9.0, 11.0]
        ]
    }

    #[test]
    fn test_initialize_centroids() {
        let data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let centroids = initialize_centroids(&data.view(), 5, &mut rng).unwrap();

        assert_eq!(centroids.nrows(), 5);
        assert_eq!(centroids.ncols(), 8);
    }

    #[test]
    fn test_initialize_centroids_distinct_rows() {
        // row i is [i, i], so a centroid's value gives away its source row
        let data = Array2::from_shape_fn((20, 2), |(i, _)| i as f64);
        let before = data.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let centroids = initialize_centroids(&data.view(), 20, &mut rng).unwrap();

        let rows: HashSet<u64> = centroids.column(0).iter().map(|v| v.to_bits()).collect();
        assert_eq!(rows.len(), 20);
        assert_eq!(data, before);
    }

    #[test]
    fn test_initialize_centroids_invalid_k() {
        let data = toy_data();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(matches!(
            initialize_centroids(&data.view(), 0, &mut rng),
            Err(KMeansError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            initialize_centroids(&data.view(), 7, &mut rng),
            Err(KMeansError::InvalidConfiguration(_))
        ));

        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            initialize_centroids(&empty.view(), 1, &mut rng),
            Err(KMeansError::EmptyDataset)
        );
    }

    #[test]
    fn test_assign_points() {
        let data = array![[1.0, 1.0], [2.0, 2.0], [8.0, 8.0], [9.0, 9.0]];
        let centroids = array![[1.0, 1.0], [9.0, 9.0]];
        let config = KMeansConfig::new(2);

        let partition =
            assign_points(&data.view(), &centroids.view(), &config, &NoopObserver, 0).unwrap();

        assert_eq!(partition.bucket(0), &[0, 1]);
        assert_eq!(partition.bucket(1), &[2, 3]);
    }

    #[test]
    fn test_assign_points_serial_matches_parallel() {
        let data = Array2::random((500, 4), Uniform::new(-1.0, 1.0));
        let centroids = data.select(Axis(0), &[0, 1, 2, 3, 4]);

        let parallel = KMeansConfig::new(5).with_parallel(true);
        let serial = KMeansConfig::new(5).with_parallel(false);

        let a = assign_points(&data.view(), &centroids.view(), &parallel, &NoopObserver, 0).unwrap();
        let b = assign_points(&data.view(), &centroids.view(), &serial, &NoopObserver, 0).unwrap();

        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn test_assign_points_duplicate_centroids_stay_separate() {
        let data = array![[0.0, 0.0], [0.1, 0.0], [5.0, 5.0]];
        let centroids = array![[0.0, 0.0], [0.0, 0.0], [5.0, 5.0]];
        let config = KMeansConfig::new(3);

        let partition =
            assign_points(&data.view(), &centroids.view(), &config, &NoopObserver, 0).unwrap();

        assert_eq!(partition.bucket_sizes(), vec![2, 0, 1]);
    }

    #[test]
    fn test_assign_points_dimension_mismatch() {
        let data = array![[1.0, 1.0], [2.0, 2.0]];
        let centroids = array![[1.0, 1.0, 1.0]];
        let config = KMeansConfig::new(1);

        let result = assign_points(&data.view(), &centroids.view(), &config, &NoopObserver, 0);
        assert!(matches!(result, Err(KMeansError::DimensionMismatch(_))));
    }

    #[test]
    fn test_assign_points_unassignable_fails_by_default() {
        let data = array![[1.0, 1.0], [f64::NAN, 2.0]];
        let centroids = array![[1.0, 1.0]];
        let config = KMeansConfig::new(1);
        let log = EventLog::new();

        let result = assign_points(&data.view(), &centroids.view(), &config, &log, 3);

        assert_eq!(result.unwrap_err(), KMeansError::UnassignablePoint { index: 1 });
        assert_eq!(
            log.events(),
            vec![FitEvent::UnassignablePoint {
                iteration: 3,
                index: 1,
                dropped: false
            }]
        );
    }

    #[test]
    fn test_assign_points_unassignable_dropped_when_configured() {
        let data = array![[1.0, 1.0], [f64::NAN, 2.0], [3.0, 3.0]];
        let centroids = array![[1.0, 1.0]];
        let config = KMeansConfig::new(1).with_unassignable_policy(UnassignablePolicy::Drop);
        let log = EventLog::new();

        let partition = assign_points(&data.view(), &centroids.view(), &config, &log, 0).unwrap();

        assert_eq!(partition.bucket(0), &[0, 2]);
        assert_eq!(partition.unassigned(), vec![1]);
        assert!(log.events().contains(&FitEvent::UnassignablePoint {
            iteration: 0,
            index: 1,
            dropped: true
        }));
    }

    #[test]
    fn test_recompute_centroids_means() {
        let data = array![[1.0, 1.0], [3.0, 3.0], [10.0, 10.0], [14.0, 14.0]];
        let partition =
            Partition::from_buckets(data.view(), vec![vec![0, 1], vec![2, 3]]).unwrap();
        let previous = array![[0.0, 0.0], [0.0, 0.0]];

        let centroids = recompute_centroids(
            &partition,
            &previous.view(),
            &KMeansConfig::new(2),
            &NoopObserver,
            0,
        )
        .unwrap();

        assert_relative_eq!(centroids[[0, 0]], 2.0, epsilon = 1e-6);
        assert_relative_eq!(centroids[[0, 1]], 2.0, epsilon = 1e-6);
        assert_relative_eq!(centroids[[1, 0]], 12.0, epsilon = 1e-6);
        assert_relative_eq!(centroids[[1, 1]], 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_recompute_centroids_retains_empty() {
        let data = array![[1.0, 1.0], [3.0, 3.0]];
        let partition = Partition::from_buckets(data.view(), vec![vec![0, 1], vec![]]).unwrap();
        let stale = [0.1 + 0.2, -7.3e-12];
        let previous = array![[0.0, 0.0], [stale[0], stale[1]]];
        let log = EventLog::new();

        let centroids =
            recompute_centroids(&partition, &previous.view(), &KMeansConfig::new(2), &log, 4)
                .unwrap();

        assert_eq!(centroids[[1, 0]].to_bits(), stale[0].to_bits());
        assert_eq!(centroids[[1, 1]].to_bits(), stale[1].to_bits());
        assert_eq!(
            log.events(),
            vec![FitEvent::EmptyClusterRetained {
                iteration: 4,
                cluster: 1
            }]
        );
    }

    #[test]
    fn test_recompute_centroids_reseeds_farthest() {
        let data = array![[0.0, 0.0], [1.0, 0.0], [10.0, 0.0]];
        let partition =
            Partition::from_buckets(data.view(), vec![vec![0, 1, 2], vec![]]).unwrap();
        let previous = array![[0.0, 0.0], [-50.0, -50.0]];
        let config =
            KMeansConfig::new(2).with_empty_cluster_policy(EmptyClusterPolicy::ReseedFarthest);
        let log = EventLog::new();

        let centroids =
            recompute_centroids(&partition, &previous.view(), &config, &log, 1).unwrap();

        assert_eq!(centroids.row(1), data.row(2));
        assert_eq!(
            log.events(),
            vec![FitEvent::EmptyClusterReseeded {
                iteration: 1,
                cluster: 1,
                point: 2
            }]
        );
    }

    #[test]
    fn test_recompute_centroids_reseed_skips_sole_member() {
        let data = array![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [40.0, 0.0]];
        // row 3 is the farthest point but the only member of cluster 1
        let assignments = [
            Some((0, 0.0)),
            Some((0, 1.0)),
            Some((0, 4.0)),
            Some((1, 900.0)),
        ];
        let partition = Partition::from_assignments(data.view(), 3, &assignments);
        let previous = array![[0.0, 0.0], [10.0, 0.0], [-50.0, -50.0]];
        let config =
            KMeansConfig::new(3).with_empty_cluster_policy(EmptyClusterPolicy::ReseedFarthest);
        let log = EventLog::new();

        let centroids =
            recompute_centroids(&partition, &previous.view(), &config, &log, 2).unwrap();

        assert_eq!(centroids.row(1), data.row(3));
        assert_eq!(centroids.row(2), data.row(2));
        assert_eq!(
            log.events(),
            vec![FitEvent::EmptyClusterReseeded {
                iteration: 2,
                cluster: 2,
                point: 2
            }]
        );
    }

    #[test]
    fn test_recompute_centroids_reseed_retains_without_donor() {
        let data = array![[0.0, 0.0], [5.0, 0.0]];
        let partition =
            Partition::from_buckets(data.view(), vec![vec![0], vec![1], vec![]]).unwrap();
        let previous = array![[0.0, 0.0], [5.0, 0.0], [-50.0, -50.0]];
        let config =
            KMeansConfig::new(3).with_empty_cluster_policy(EmptyClusterPolicy::ReseedFarthest);
        let log = EventLog::new();

        let centroids =
            recompute_centroids(&partition, &previous.view(), &config, &log, 1).unwrap();

        assert_eq!(centroids.row(2), previous.row(2));
        assert_eq!(
            log.events(),
            vec![FitEvent::EmptyClusterRetained {
                iteration: 1,
                cluster: 2
            }]
        );
    }

    #[test]
    fn test_recompute_centroids_shape_checks() {
        let data = array![[1.0, 1.0], [3.0, 3.0]];
        let partition = Partition::from_buckets(data.view(), vec![vec![0], vec![1]]).unwrap();
        let config = KMeansConfig::new(2);

        let wrong_k = array![[0.0, 0.0]];
        assert!(matches!(
            recompute_centroids(&partition, &wrong_k.view(), &config, &NoopObserver, 0),
            Err(KMeansError::InvalidConfiguration(_))
        ));

        let wrong_dim = array![[0.0], [0.0]];
        assert!(matches!(
            recompute_centroids(&partition, &wrong_dim.view(), &config, &NoopObserver, 0),
            Err(KMeansError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_run_lloyd_converges_from_fixed_point() {
        let data = array![[0.0, 0.0], [2.0, 0.0], [10.0, 10.0], [12.0, 10.0]];
        let fixed_point = array![[1.0, 0.0], [11.0, 10.0]];
        let config = KMeansConfig::new(2).with_equality_tolerance(None);

        let result = run_lloyd(&data.view(), fixed_point.clone(), &config, &NoopObserver).unwrap();

        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.centroids, fixed_point);
    }

    #[test]
    fn test_run_lloyd_iteration_limit() {
        let data = toy_data();
        let start = array![[1.0, 2.0], [1.5, 1.8]];
        let config = KMeansConfig::new(2).with_max_iters(1);
        let log = EventLog::new();

        let result = run_lloyd(&data.view(), start, &config, &log).unwrap();

        assert_eq!(result.termination, Termination::IterationLimitReached);
        assert_eq!(result.n_iterations, 1);
        assert_eq!(
            log.events().last(),
            Some(&FitEvent::IterationLimitReached { iterations: 1 })
        );
    }

    #[test]
    fn test_run_lloyd_zero_iterations_returns_start() {
        let data = toy_data();
        let start = array![[1.0, 2.0], [9.0, 11.0]];
        let config = KMeansConfig::new(2).with_max_iters(0);

        let result = run_lloyd(&data.view(), start.clone(), &config, &NoopObserver).unwrap();

        assert_eq!(result.n_iterations, 0);
        assert_eq!(result.termination, Termination::IterationLimitReached);
        assert_eq!(result.centroids, start);
    }

    #[test]
    fn test_run_lloyd_rejects_wrong_start() {
        let data = toy_data();
        let config = KMeansConfig::new(2);

        let too_few = array![[1.0, 2.0]];
        assert!(matches!(
            run_lloyd(&data.view(), too_few, &config, &NoopObserver),
            Err(KMeansError::InvalidConfiguration(_))
        ));

        let wrong_dim = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(matches!(
            run_lloyd(&data.view(), wrong_dim, &config, &NoopObserver),
            Err(KMeansError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_kmeans_toy_dataset() {
        let data = toy_data();
        let config = KMeansConfig::new(2).with_max_iters(100).with_seed(42);

        let result = kmeans_lloyd(&data.view(), &config, &NoopObserver).unwrap();

        let mut centroids: Vec<(f64, f64)> = result
            .centroids
            .outer_iter()
            .map(|c| (c[0], c[1]))
            .collect();
        centroids.sort_by(|a, b| a.0.total_cmp(&b.0));

        assert_relative_eq!(centroids[0].0, 7.0 / 6.0, epsilon = 0.5);
        assert_relative_eq!(centroids[0].1, 4.4 / 3.0, epsilon = 0.5);
        assert_relative_eq!(centroids[1].0, 22.0 / 3.0, epsilon = 0.5);
        assert_relative_eq!(centroids[1].1, 9.0, epsilon = 0.5);
    }

    #[test]
    fn test_kmeans_event_sequence() {
        let data = toy_data();
        let config = KMeansConfig::new(2).with_seed(3);
        let log = EventLog::new();

        let result = kmeans_lloyd(&data.view(), &config, &log).unwrap();
        let events = log.events();

        assert!(matches!(
            events.first(),
            Some(FitEvent::RunStarted {
                n_samples: 6,
                n_features: 2,
                k: 2,
                max_iters: 100,
                convergence: Convergence::Tolerance(_)
            })
        ));
        let started = events
            .iter()
            .filter(|e| matches!(e, FitEvent::IterationStarted { .. }))
            .count();
        assert_eq!(started, result.n_iterations);
        for event in &events {
            if let FitEvent::ClusterSizes { sizes, .. } = event {
                assert_eq!(sizes.iter().sum::<usize>(), 6);
            }
        }
        assert_eq!(
            events.last(),
            Some(&FitEvent::Converged {
                iterations: result.n_iterations
            })
        );
    }

    #[test]
    fn test_predict_labels() {
        let data = array![[0.0, 0.0], [10.0, 10.0], [5.0, 5.0]];
        let centroids = array![[0.0, 0.0], [10.0, 10.0]];

        let labels = predict_labels(&data.view(), &centroids.view(), true).unwrap();

        assert_eq!(labels, Array1::from(vec![0, 1, 0]));
    }
}
