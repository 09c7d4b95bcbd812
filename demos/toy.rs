//! Cluster a six-point toy dataset into two groups and print the centroids.
//!
//! Run with: cargo run --example toy

use lloyd_kmeans::{dataset_from_rows, KMeans, KMeansConfig, TracingObserver};
use std::sync::Arc;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // Example dataset (2-dimensional points)
    let data = dataset_from_rows(&[
        vec![1.0, 2.0],
        vec![1.5, 1.8],
        vec![5.0, 8.0],
        vec![8.0, 8.0],
        vec![1.0, 0.6],
        vec![9.0, 11.0],
    ])?;

    let config = KMeansConfig::new(2).with_max_iters(100);
    let mut kmeans = KMeans::with_config(config).with_observer(Arc::new(TracingObserver));

    let centroids = kmeans.fit(&data.view())?;

    println!("Final centroids:");
    for centroid in centroids.outer_iter() {
        println!("{:?}", centroid.to_vec());
    }

    Ok(())
}
