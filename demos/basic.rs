//! Basic example demonstrating lloyd-kmeans usage
//!
//! Run with: cargo run --example basic --release

use lloyd_kmeans::{EventLog, FitEvent, KMeans, KMeansConfig};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

fn main() {
    println!("=== lloyd-kmeans example ===\n");

    // Generate synthetic data: 3 clusters in 2D for easy visualization
    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;

    println!("Generating {} samples with {} features...", n_samples, n_features);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut data = Array2::<f64>::zeros((n_samples, n_features));

    // Cluster centers
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];

    for i in 0..n_samples {
        let cluster_idx = i % 3;
        data[[i, 0]] = centers[cluster_idx][0] + rng.gen_range(-1.0..1.0);
        data[[i, 1]] = centers[cluster_idx][1] + rng.gen_range(-1.0..1.0);
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    let config = KMeansConfig::new(n_clusters)
        .with_max_iters(100)
        .with_equality_tolerance(Some(1e-6))
        .with_seed(42);

    println!("Running k-means with k={}...\n", n_clusters);

    let log = Arc::new(EventLog::new());
    let mut kmeans = KMeans::with_config(config).with_observer(log.clone());
    let centroids = kmeans.fit(&data.view()).expect("Training failed");

    for event in log.events() {
        match event {
            FitEvent::IterationFinished { iteration, shift, .. } => {
                println!("  Iteration {}: shift = {:.6}", iteration, shift)
            }
            FitEvent::EmptyClusterRetained { cluster, .. } => {
                println!("  Cluster {} was empty and kept its centroid", cluster)
            }
            FitEvent::Converged { iterations } => {
                println!("  Converged after {} iterations", iterations)
            }
            FitEvent::IterationLimitReached { iterations } => {
                println!("  Stopped at the limit of {} iterations", iterations)
            }
            _ => {}
        }
    }

    println!("\nLearned centroids:");
    for (i, centroid) in centroids.outer_iter().enumerate() {
        println!("  Centroid {}: ({:.4}, {:.4})", i, centroid[0], centroid[1]);
    }
    println!();

    let labels = kmeans.predict(&data.view()).expect("Prediction failed");

    let mut cluster_counts = vec![0usize; n_clusters];
    for &label in labels.iter() {
        cluster_counts[label] += 1;
    }

    println!("Cluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }

    println!("\n=== Done! ===");
}
