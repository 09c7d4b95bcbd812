//! # lloyd-kmeans
//!
//! K-means clustering with Lloyd's algorithm, working on ndarray matrices
//! whose rows are points.
//!
//! ## Features
//!
//! - **Deterministic**: seeded initialization, lowest-index tie-breaking, and
//!   a parallel assignment pass whose result matches the serial one
//! - **Tolerance or exact convergence**: per-coordinate epsilon by default,
//!   bitwise equality on request
//! - **Explicit empty-cluster policy**: keep the stale centroid (default) or
//!   reseed it onto the farthest point
//! - **Stage-level API**: initialization, assignment and recomputation can be
//!   called on their own
//! - **Observer hook**: every step of a run is reported to a [`FitObserver`];
//!   [`TracingObserver`] forwards them to `tracing`
//!
//! ## Example
//!
//! ```rust
//! use lloyd_kmeans::{KMeans, KMeansConfig};
//! use ndarray::array;
//!
//! let data = array![[1.0, 1.0], [1.2, 0.8], [8.0, 8.0], [8.3, 7.9]];
//!
//! let config = KMeansConfig::new(2)
//!     .with_max_iters(50)
//!     .with_equality_tolerance(Some(1e-6))
//!     .with_seed(7);
//!
//! let mut kmeans = KMeans::with_config(config);
//! let labels = kmeans.fit_predict(&data.view()).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```
//!
//! ## Observing a run
//!
//! ```rust
//! use lloyd_kmeans::{EventLog, FitEvent, KMeans};
//! use ndarray::array;
//! use std::sync::Arc;
//!
//! let data = array![[0.0, 0.0], [0.5, 0.0], [9.0, 9.0]];
//! let log = Arc::new(EventLog::new());
//!
//! let mut kmeans = KMeans::new(2).with_observer(log.clone());
//! kmeans.fit(&data.view()).unwrap();
//!
//! assert!(matches!(log.events()[0], FitEvent::RunStarted { k: 2, .. }));
//! ```

mod algorithm;
mod config;
mod dataset;
mod distance;
mod error;
mod kmeans;
mod observer;
mod partition;

pub use algorithm::{
    assign_points, initialize_centroids, kmeans_lloyd, predict_labels, recompute_centroids,
    run_lloyd, FitResult, Termination,
};
pub use config::{Convergence, EmptyClusterPolicy, KMeansConfig, UnassignablePolicy};
pub use dataset::dataset_from_rows;
pub use distance::{centroids_equal, squared_euclidean};
pub use error::KMeansError;
pub use kmeans::KMeans;
pub use observer::{EventLog, FitEvent, FitObserver, NoopObserver, TracingObserver};
pub use partition::Partition;
