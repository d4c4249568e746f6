//! Magnitude kernels shared by the projection and proximal routines.
//!
//! The dual-norm ball is invariant under sign flips and permutations, so
//! every projection reduces to a sorted non-negative problem: take
//! magnitudes, sort descending, solve, and scatter the result back through
//! the recorded permutation with the original signs.

use crate::types::DualNorm;
use scirs2_core::ndarray_ext::{Array1, ArrayView1};
use scirs2_core::numeric::Float;

/// Sort entries by decreasing magnitude.
///
/// Returns the sorted magnitudes together with the permutation `perm` such
/// that `sorted[i] == |z[perm[i]]|`. The sort is stable, so ties keep their
/// original relative order.
///
/// # Examples
///
/// ```
/// use lrinorm_core::ops::sort_by_magnitude;
/// use scirs2_core::ndarray_ext::array;
///
/// let z = array![3.0, -5.0, 1.0];
/// let (sorted, perm) = sort_by_magnitude(&z.view());
/// assert_eq!(sorted, vec![5.0, 3.0, 1.0]);
/// assert_eq!(perm, vec![1, 0, 2]);
/// ```
pub fn sort_by_magnitude<T: Float>(z: &ArrayView1<T>) -> (Vec<T>, Vec<usize>) {
    let mut perm: Vec<usize> = (0..z.len()).collect();
    perm.sort_by(|&i, &j| {
        z[j].abs()
            .partial_cmp(&z[i].abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted = perm.iter().map(|&i| z[i].abs()).collect();
    (sorted, perm)
}

/// Scatter sorted-domain magnitudes back to the original order and signs.
///
/// `out[perm[i]] = sign(z[perm[i]]) * values[i]`, where `perm` is the
/// permutation produced by [`sort_by_magnitude`]. Zero entries of `z` keep
/// a positive sign.
pub fn scatter_signed<T: Float>(z: &ArrayView1<T>, perm: &[usize], values: &[T]) -> Array1<T> {
    debug_assert_eq!(z.len(), perm.len());
    debug_assert_eq!(z.len(), values.len());
    let mut out = Array1::zeros(z.len());
    for (i, &j) in perm.iter().enumerate() {
        out[j] = if z[j] < T::zero() {
            -values[i]
        } else {
            values[i]
        };
    }
    out
}

/// Truncated norm of an already sorted non-negative slice: the `ℓq` norm of
/// its first `r` entries.
pub fn rnorm_sorted<T: Float>(sorted: &[T], r: usize, q: DualNorm) -> T {
    let top = &sorted[..r.min(sorted.len())];
    match q {
        DualNorm::L1 => top.iter().fold(T::zero(), |acc, &v| acc + v),
        DualNorm::L2 => top
            .iter()
            .fold(T::zero(), |acc, &v| acc + v * v)
            .sqrt(),
    }
}

/// Truncated norm `‖z‖_{ℓq,r}`: the `ℓq` norm of the `r` largest-magnitude
/// entries of `z`.
///
/// # Examples
///
/// ```
/// use lrinorm_core::{ops::rnorm, DualNorm};
/// use scirs2_core::ndarray_ext::array;
///
/// let z = array![1.0f64, -4.0, 2.0, 3.0];
/// assert!((rnorm(&z.view(), 2, DualNorm::L1) - 7.0).abs() < 1e-12);
/// assert!((rnorm(&z.view(), 2, DualNorm::L2) - 5.0).abs() < 1e-12);
/// ```
pub fn rnorm<T: Float>(z: &ArrayView1<T>, r: usize, q: DualNorm) -> T {
    let (sorted, _) = sort_by_magnitude(z);
    rnorm_sorted(&sorted, r, q)
}
