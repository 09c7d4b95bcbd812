use crate::config::Convergence;
use ndarray::{ArrayView1, ArrayView2, Zip};
use rayon::prelude::*;

/// Squared Euclidean distance between two points of equal length.
///
/// The square root is never taken: it is monotonic, so comparing squared
/// distances picks the same nearest centroid.
#[inline]
pub fn squared_euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    Zip::from(a).and(b).fold(0.0, |acc, &x, &y| {
        let d = x - y;
        acc + d * d
    })
}

/// Find the nearest centroid for a single point.
///
/// Centroids are scanned in index order and only a strictly smaller distance
/// replaces the current best, so ties resolve to the lowest index. Distances
/// that are NaN cannot be ordered and are skipped; `None` means no centroid
/// produced a comparable distance.
///
/// # Returns
/// * `(index, squared_distance)` of the winning centroid
pub fn nearest_centroid(
    point: &ArrayView1<f64>,
    centroids: &ArrayView2<f64>,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_euclidean(point, &centroid);
        if dist.is_nan() {
            continue;
        }

        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((j, dist)),
        }
    }

    best
}

/// Whether a coordinate stayed put between two centroid sets.
///
/// Identical bit patterns count as unchanged, so a centroid holding an
/// infinity or a retained NaN still matches its own copy.
#[inline]
fn coordinate_unchanged(old: f64, new: f64, tol: f64) -> bool {
    old.to_bits() == new.to_bits() || (new - old).abs() <= tol
}

/// Largest absolute per-coordinate difference between two centroid sets.
///
/// Bit-identical coordinates contribute zero; any other pair whose difference
/// is NaN contributes infinity.
pub fn max_coordinate_delta(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
) -> f64 {
    Zip::from(old_centroids)
        .and(new_centroids)
        .fold(0.0f64, |acc, &old, &new| {
            if old.to_bits() == new.to_bits() {
                return acc;
            }
            let d = (new - old).abs();
            if d.is_nan() {
                f64::INFINITY
            } else {
                acc.max(d)
            }
        })
}

/// Whether two centroid sets are equal under the given convergence policy.
///
/// Under either policy a coordinate whose bits did not change is equal, even
/// when it is NaN or infinite.
pub fn centroids_equal(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
    convergence: Convergence,
) -> bool {
    if old_centroids.dim() != new_centroids.dim() {
        return false;
    }

    let tol = match convergence {
        Convergence::Exact => 0.0,
        Convergence::Tolerance(tol) => tol,
    };

    Zip::from(old_centroids)
        .and(new_centroids)
        .all(|&old, &new| coordinate_unchanged(old, new, tol))
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
) -> f64 {
    let k = old_centroids.nrows();

    (0..k)
        .into_par_iter()
        .map(|i| {
            let old_c = old_centroids.row(i);
            let new_c = new_centroids.row(i);
            squared_euclidean(&old_c, &new_c).sqrt()
        })
        .sum()
}
