//! Cluster the rows of a `.npy` matrix and save the centroids as `.npy`.
//!
//! Usage: `kmeans-npy --input data.npy --output centroids.npy -k 8 [--seed 0] [--max-iters 100] [--tol 1e-8 | --exact]`
//!
//! Logging is controlled through `RUST_LOG`; set `RUST_LOG_FORMAT=json` for JSON lines.

use anyhow::Context;
use clap::Parser;
use lloyd_kmeans::{EmptyClusterPolicy, KMeans, KMeansConfig, TracingObserver, UnassignablePolicy};
use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about = "Lloyd's k-means over a 2-D float64 .npy matrix")]
struct Args {
    /// Input matrix, one point per row
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the (k, d) centroid matrix
    #[arg(short, long)]
    output: PathBuf,

    /// Number of clusters
    #[arg(short)]
    k: usize,

    /// Seed for centroid initialization
    #[arg(long, default_value_t = 0, env = "KMEANS_SEED")]
    seed: u64,

    /// Maximum number of iterations
    #[arg(long, default_value_t = 100)]
    max_iters: usize,

    /// Per-coordinate convergence tolerance
    #[arg(long, default_value_t = 1e-8, conflicts_with = "exact")]
    tol: f64,

    /// Require exactly equal centroids to stop early
    #[arg(long)]
    exact: bool,

    /// Move empty clusters onto the farthest point instead of keeping them
    #[arg(long)]
    reseed_empty: bool,

    /// Skip points that match no centroid instead of failing
    #[arg(long)]
    drop_unassignable: bool,

    /// Assign points on a single thread
    #[arg(long)]
    serial: bool,
}

impl Args {
    fn config(&self) -> KMeansConfig {
        KMeansConfig::new(self.k)
            .with_seed(self.seed)
            .with_max_iters(self.max_iters)
            .with_equality_tolerance((!self.exact).then_some(self.tol))
            .with_empty_cluster_policy(if self.reseed_empty {
                EmptyClusterPolicy::ReseedFarthest
            } else {
                EmptyClusterPolicy::Retain
            })
            .with_unassignable_policy(if self.drop_unassignable {
                UnassignablePolicy::Drop
            } else {
                UnassignablePolicy::Fail
            })
            .with_parallel(!self.serial)
    }
}

fn init_tracing() {
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let reader = BufReader::new(
        File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?,
    );
    let data: Array2<f64> = Array2::read_npy(reader)
        .with_context(|| format!("reading {} as a 2-D float64 array", args.input.display()))?;

    tracing::info!(
        path = %args.input.display(),
        n_samples = data.nrows(),
        n_features = data.ncols(),
        "loaded data"
    );

    let mut kmeans = KMeans::with_config(args.config()).with_observer(Arc::new(TracingObserver));
    let centroids = kmeans.fit(&data.view())?;

    let writer = BufWriter::new(
        File::create(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?,
    );
    centroids.write_npy(writer)?;

    tracing::info!(
        path = %args.output.display(),
        k = centroids.nrows(),
        iterations = kmeans.n_iterations().unwrap_or(0),
        termination = ?kmeans.termination(),
        "saved centroids"
    );

    Ok(())
}
