//! Observability hook for the fit loop.
//!
//! The algorithm never logs on its own. It reports [`FitEvent`]s to a
//! [`FitObserver`] and leaves rendering to the observer. Iterations are
//! numbered from 1; events raised by a stage invoked on its own, outside a
//! fit run, carry iteration 0.

use crate::config::Convergence;
use std::sync::Mutex;

/// Something that happened during a fit run.
#[derive(Debug, Clone, PartialEq)]
pub enum FitEvent {
    /// A fit run passed validation and is about to initialize or iterate.
    RunStarted {
        n_samples: usize,
        n_features: usize,
        k: usize,
        max_iters: usize,
        convergence: Convergence,
    },
    /// An assign/recompute cycle begins.
    IterationStarted { iteration: usize },
    /// Bucket sizes right after an assignment pass.
    ClusterSizes { iteration: usize, sizes: Vec<usize> },
    /// A cluster had no points and kept its previous centroid.
    EmptyClusterRetained { iteration: usize, cluster: usize },
    /// A cluster had no points and was moved onto a dataset point.
    EmptyClusterReseeded {
        iteration: usize,
        cluster: usize,
        point: usize,
    },
    /// A point could not be compared against any centroid.
    UnassignablePoint {
        iteration: usize,
        index: usize,
        dropped: bool,
    },
    /// An assign/recompute cycle finished.
    IterationFinished {
        iteration: usize,
        shift: f64,
        converged: bool,
    },
    /// The recomputed centroids matched the previous ones.
    Converged { iterations: usize },
    /// The iteration budget ran out before convergence.
    IterationLimitReached { iterations: usize },
}

/// Receiver of [`FitEvent`]s.
pub trait FitObserver: Send + Sync {
    fn on_event(&self, event: &FitEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FitObserver for NoopObserver {
    fn on_event(&self, _event: &FitEvent) {}
}

/// Observer that renders events through `tracing`.
///
/// Per-iteration detail goes out at `debug`, terminal states at `info`, and
/// empty or unassignable clusters at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FitObserver for TracingObserver {
    fn on_event(&self, event: &FitEvent) {
        match event {
            FitEvent::RunStarted {
                n_samples,
                n_features,
                k,
                max_iters,
                convergence,
            } => tracing::info!(
                n_samples,
                n_features,
                k,
                max_iters,
                convergence = ?convergence,
                "training k-means"
            ),
            FitEvent::IterationStarted { iteration } => {
                tracing::debug!(iteration, "iteration started")
            }
            FitEvent::ClusterSizes { iteration, sizes } => {
                tracing::debug!(iteration, sizes = ?sizes, "points assigned")
            }
            FitEvent::EmptyClusterRetained { iteration, cluster } => {
                tracing::warn!(iteration, cluster, "empty cluster kept its previous centroid")
            }
            FitEvent::EmptyClusterReseeded {
                iteration,
                cluster,
                point,
            } => tracing::warn!(iteration, cluster, point, "empty cluster reseeded"),
            FitEvent::UnassignablePoint {
                iteration,
                index,
                dropped,
            } => tracing::warn!(
                iteration,
                index,
                dropped,
                "point has no comparable distance to any centroid"
            ),
            FitEvent::IterationFinished {
                iteration,
                shift,
                converged,
            } => tracing::debug!(iteration, shift, converged, "iteration finished"),
            FitEvent::Converged { iterations } => {
                tracing::info!(iterations, "k-means converged")
            }
            FitEvent::IterationLimitReached { iterations } => {
                tracing::info!(iterations, "k-means stopped at the iteration limit")
            }
        }
    }
}

/// Observer that keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<FitEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<FitEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl FitObserver for EventLog {
    fn on_event(&self, event: &FitEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
