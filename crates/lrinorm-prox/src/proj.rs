//! Euclidean projection onto the ball of the truncated norm `‖·‖_{ℓq,r}`.
//!
//! The truncated norm of a vector is the `ℓq` norm of its `r` largest
//! magnitudes; its ball is the polar set of the low-rank-inducing norm's
//! ball, so this projection is the dual half of the Moreau decomposition
//! used by the proximal operators in [`crate::prox`].
//!
//! For an input sorted by decreasing magnitude the KKT conditions stratify
//! the projection into a head of individually shrunk entries, a tied block
//! sharing one value `m` that straddles position `r`, and an untouched
//! tail. The block is located by two nested integer searches: `t` counts
//! block entries at positions below `r`, `s` counts block entries past it.
//! For `q = 1` the shrinkage is a shift and may drive the tied value
//! negative, in which case a third search over `k` (the number of surviving
//! positive entries) replaces the block solution and clamps the rest to
//! zero. Each search runs under the strategy chosen in the caller's
//! [`SearchPlan`].
//!
//! # References
//!
//! - C. Grussler, A. Rantzer and P. Giselsson (2018):
//!   "Low-Rank Optimization with Convex Constraints",
//!   IEEE Transactions on Automatic Control.
//! - C. Grussler and P. Giselsson (2016):
//!   "Low-Rank Inducing Norms with Optimality Interpretations".

use lrinorm_core::ops::{rnorm_sorted, scatter_signed, sort_by_magnitude};
use lrinorm_core::search::SearchError;
use lrinorm_core::{DualNorm, SearchInit, SearchPlan, ThresholdParams, Verdict};
use scirs2_core::ndarray_ext::{Array1, ArrayView1};
use scirs2_core::numeric::{Float, NumCast};
use thiserror::Error;

/// Errors raised by the dual-ball projection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    /// The ball radius is negative, so the ball is empty.
    #[error("projection radius must be non-negative, got {0}")]
    InvalidRadius(f64),

    /// `r` does not satisfy `1 <= r <= len(z)`.
    #[error("r must satisfy 1 <= r <= {bound}, got {r}")]
    RankOutOfRange {
        /// The offending rank.
        r: usize,
        /// The admissible upper bound.
        bound: usize,
    },

    /// A nested search exhausted its candidate interval.
    #[error(transparent)]
    SearchDiverged(#[from] SearchError),
}

/// Projection of `z` onto `{y : ‖y‖_{ℓq,r} ≤ radius}`.
///
/// Returns the projection together with the converged search parameters.
/// The parameters are all unset exactly when `‖z‖_{ℓq,r} ≤ radius` (the
/// projection is then `z` itself) or when `radius` is zero (the ball is
/// the origin); `k` is set only when the zero-clamp search ran, which can
/// happen for `q = 1` only.
///
/// `tol` is the relative threshold for snapping residual magnitudes
/// `|z_i| - |y_i|` to exact zero, measured against `‖z‖_{ℓq,r}`.
///
/// # Errors
///
/// [`ProjError::RankOutOfRange`] for an invalid `r`,
/// [`ProjError::InvalidRadius`] for a negative radius, and
/// [`ProjError::SearchDiverged`] when a nested search exhausts its
/// candidate interval without an accepted probe.
///
/// # Examples
///
/// ```
/// use lrinorm_core::{DualNorm, SearchInit, SearchPlan};
/// use lrinorm_prox::proj_rnorm_ball;
/// use scirs2_core::ndarray_ext::array;
///
/// let z = array![5.0f64, 3.0, 1.0];
/// let (y, params) = proj_rnorm_ball(
///     &z.view(),
///     1,
///     DualNorm::L2,
///     2.0,
///     &SearchPlan::default(),
///     &SearchInit::default(),
///     1e-12,
/// )?;
///
/// // The two largest entries tie at the ball radius, the rest is untouched.
/// assert!((y[0] - 2.0).abs() < 1e-9);
/// assert!((y[1] - 2.0).abs() < 1e-9);
/// assert!((y[2] - 1.0).abs() < 1e-9);
/// assert_eq!(params.t, Some(1));
/// assert_eq!(params.s, Some(1));
/// # Ok::<(), lrinorm_prox::ProjError>(())
/// ```
pub fn proj_rnorm_ball<T>(
    z: &ArrayView1<T>,
    r: usize,
    q: DualNorm,
    radius: T,
    plan: &SearchPlan,
    init: &SearchInit,
    tol: f64,
) -> Result<(Array1<T>, ThresholdParams), ProjError>
where
    T: Float + NumCast,
{
    let n = z.len();
    if r == 0 || r > n {
        return Err(ProjError::RankOutOfRange { r, bound: n });
    }
    if radius < T::zero() {
        return Err(ProjError::InvalidRadius(
            radius.to_f64().unwrap_or(f64::NAN),
        ));
    }

    let (a, perm) = sort_by_magnitude(z);
    let norm_rq = rnorm_sorted(&a, r, q);
    if norm_rq <= radius {
        return Ok((z.to_owned(), ThresholdParams::unset()));
    }
    if radius == T::zero() {
        return Ok((Array1::zeros(n), ThresholdParams::unset()));
    }

    let (mut y, params) = project_sorted(&a, r, q, radius, plan, init)?;

    // Residual magnitudes below tol * ||z||_{lq,r} are exact zeros.
    let snap = T::from(tol).unwrap_or_else(T::zero) * norm_rq;
    for (yi, &ai) in y.iter_mut().zip(a.iter()) {
        if ai - *yi <= snap {
            *yi = ai;
        }
    }

    Ok((scatter_signed(z, &perm, &y), params))
}

/// One `(t, s)` candidate: the Lagrange multiplier and the tied-block value.
struct Candidate<T> {
    mult: T,
    m: T,
}

/// Value taken by a head entry under the candidate's multiplier.
fn head_value<T: Float>(q: DualNorm, a_i: T, cand: &Candidate<T>) -> T {
    match q {
        DualNorm::L1 => a_i - cand.mult,
        DualNorm::L2 => a_i / (T::one() + cand.mult),
    }
}

/// Solve the stratified KKT system for fixed `(t, s)`.
///
/// `p1`/`p2` are prefix sums of the sorted magnitudes and their squares.
fn candidate<T: Float + NumCast>(
    q: DualNorm,
    p1: &[T],
    p2: &[T],
    r: usize,
    t: usize,
    s: usize,
    radius: T,
) -> Candidate<T> {
    let h = r - t;
    let b = p1[r + s] - p1[h];
    let tt = T::from(t).unwrap();
    let ts = T::from(t + s).unwrap();
    match q {
        DualNorm::L1 => {
            let a1 = p1[h];
            let denom = T::from(h * (t + s) + t * t).unwrap();
            let lambda = (ts * a1 + tt * b - ts * radius) / denom;
            Candidate {
                mult: lambda,
                m: (b - lambda * tt) / ts,
            }
        }
        DualNorm::L2 => {
            let mu = solve_scale_multiplier(p2[h], b, tt, ts, radius);
            Candidate {
                mult: mu,
                m: b / (mu * tt + ts),
            }
        }
    }
}

/// Scalar root of `A2/(1+μ)² + t·(B/(tμ+t+s))² = radius²` for `μ ≥ 0`.
///
/// The left-hand side is strictly decreasing in `μ`, so an expanding
/// bracket followed by bisection converges unconditionally.
fn solve_scale_multiplier<T: Float>(a2: T, b: T, tt: T, ts: T, radius: T) -> T {
    let two = T::one() + T::one();
    let gap = |mu: T| {
        let head = a2 / ((T::one() + mu) * (T::one() + mu));
        let block_m = b / (tt * mu + ts);
        head + tt * block_m * block_m - radius * radius
    };

    if gap(T::zero()) <= T::zero() {
        return T::zero();
    }
    let mut hi = T::one();
    while gap(hi) > T::zero() {
        hi = hi * two;
    }
    let mut lo = T::zero();
    for _ in 0..200 {
        let mid = (lo + hi) / two;
        if gap(mid) > T::zero() {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= T::epsilon() * (T::one() + hi) {
            break;
        }
    }
    (lo + hi) / two
}

/// Projection of a sorted non-negative magnitude vector with an active
/// constraint. Returns the sorted-domain projection and the converged
/// search parameters.
fn project_sorted<T: Float + NumCast>(
    a: &[T],
    r: usize,
    q: DualNorm,
    radius: T,
    plan: &SearchPlan,
    init: &SearchInit,
) -> Result<(Vec<T>, ThresholdParams), ProjError> {
    let n = a.len();

    let mut p1 = vec![T::zero(); n + 1];
    let mut p2 = vec![T::zero(); n + 1];
    for i in 0..n {
        p1[i + 1] = p1[i] + a[i];
        p2[i + 1] = p2[i] + a[i] * a[i];
    }

    // Outer search over t; each probe resolves s by running the inner
    // search before judging the head/block boundary.
    let mut found_s = init.s;
    let mut inner_failure = None;
    let outer = plan.t.locate("t", 1, r, init.t, |t| {
        let inner = plan.s.locate("s", 0, n - r, init.s, |s| {
            let cand = candidate(q, &p1, &p2, r, t, s, radius);
            if r + s < n && a[r + s] > cand.m {
                return Verdict::Low; // tail entry belongs in the block
            }
            if a[r + s - 1] < cand.m {
                return Verdict::High; // block entry belongs in the tail
            }
            Verdict::Accept
        });
        match inner {
            Ok(s) => {
                let cand = candidate(q, &p1, &p2, r, t, s, radius);
                let h = r - t;
                if h >= 1 && head_value(q, a[h - 1], &cand) < cand.m {
                    return Verdict::Low; // head entry belongs in the block
                }
                if head_value(q, a[h], &cand) > cand.m {
                    return Verdict::High; // block entry belongs in the head
                }
                found_s = s;
                Verdict::Accept
            }
            Err(err) => {
                inner_failure = Some(err);
                Verdict::High
            }
        }
    });
    let t = match outer {
        Ok(t) => t,
        Err(err) => return Err(ProjError::SearchDiverged(inner_failure.unwrap_or(err))),
    };
    let s = found_s;
    let cand = candidate(q, &p1, &p2, r, t, s, radius);

    let mut params = ThresholdParams {
        t: Some(t),
        s: Some(s),
        k: None,
    };

    // Negative tied value (q = 1 only): the true projection clamps entries
    // to zero; locate the number k of surviving positive entries.
    if matches!(q, DualNorm::L1) && cand.m < T::zero() {
        let k = plan.k.locate("k", 1, r, init.k, |k| {
            let lambda = (p1[k] - radius) / T::from(k).unwrap();
            if k < n && a[k] > lambda {
                return Verdict::Low; // entry k survives as well
            }
            if a[k - 1] <= lambda {
                return Verdict::High; // entry k - 1 cannot survive
            }
            let tail = p1[n] - p1[k];
            if tail > lambda * T::from(r - k).unwrap() {
                return Verdict::Low; // clamped mass exceeds the subgradient budget
            }
            Verdict::Accept
        })?;
        let lambda = (p1[k] - radius) / T::from(k).unwrap();
        params.k = Some(k);

        let mut y = vec![T::zero(); n];
        for i in 0..k {
            y[i] = a[i] - lambda;
        }
        return Ok((y, params));
    }

    let h = r - t;
    let mut y = Vec::with_capacity(n);
    for (i, &ai) in a.iter().enumerate() {
        if i < h {
            y.push(head_value(q, ai, &cand));
        } else if i < r + s {
            y.push(cand.m);
        } else {
            y.push(ai);
        }
    }
    Ok((y, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrinorm_core::ops::rnorm;
    use lrinorm_core::SearchStrategy;
    use scirs2_core::ndarray_ext::array;

    fn defaults() -> (SearchPlan, SearchInit) {
        (SearchPlan::default(), SearchInit::default())
    }

    #[test]
    fn l1_tie_straddles_the_rank_position() {
        let z = array![5.0, 3.0, 1.0];
        let (plan, init) = defaults();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 1, DualNorm::L1, 2.0, &plan, &init, 1e-12).unwrap();
        assert!((y[0] - 2.0).abs() < 1e-12);
        assert!((y[1] - 2.0).abs() < 1e-12);
        assert!((y[2] - 1.0).abs() < 1e-12);
        assert_eq!(params.t, Some(1));
        assert_eq!(params.s, Some(1));
        assert_eq!(params.k, None);
    }

    #[test]
    fn l2_rank_one_ball_matches_l1_rank_one_ball() {
        // For r = 1 both truncated norms reduce to the largest magnitude.
        let z = array![5.0, 3.0, 1.0];
        let (plan, init) = defaults();
        let (y1, _) =
            proj_rnorm_ball(&z.view(), 1, DualNorm::L1, 2.0, &plan, &init, 1e-12).unwrap();
        let (y2, _) =
            proj_rnorm_ball(&z.view(), 1, DualNorm::L2, 2.0, &plan, &init, 1e-12).unwrap();
        for (a, b) in y1.iter().zip(y2.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn l1_full_tie_over_all_entries() {
        let z = array![5.0, 4.0, 3.0];
        let (plan, init) = defaults();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L1, 2.0, &plan, &init, 1e-12).unwrap();
        for v in y.iter() {
            assert!((v - 1.0).abs() < 1e-12, "expected full tie at 1, got {}", v);
        }
        assert_eq!(params.t, Some(2));
        assert_eq!(params.s, Some(1));
    }

    #[test]
    fn l2_head_and_tie_split() {
        let z = array![5.0, 3.0, 0.5];
        let (plan, init) = defaults();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L2, 2.0, &plan, &init, 1e-12).unwrap();
        // Head entry scaled, second entry tied, tail untouched.
        assert_eq!(params.t, Some(1));
        assert_eq!(params.s, Some(0));
        assert!((y[2] - 0.5).abs() < 1e-12);
        let norm = rnorm(&y.view(), 2, DualNorm::L2);
        assert!((norm - 2.0).abs() < 1e-9, "constraint not tight: {}", norm);
        // Scaled head stays above the tied value.
        assert!(y[0] > y[1]);
    }

    #[test]
    fn l1_zero_clamp_path_sets_k() {
        let z = array![5.0, 0.1, 0.0];
        let (plan, init) = defaults();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L1, 1.0, &plan, &init, 1e-12).unwrap();
        assert!((y[0] - 1.0).abs() < 1e-12);
        assert!(y[1].abs() < 1e-12);
        assert!(y[2].abs() < 1e-12);
        assert_eq!(params.k, Some(1));
        assert!(params.t.is_some());
        assert!(params.s.is_some());
    }

    #[test]
    fn signs_and_order_are_restored() {
        let z = array![-3.0, 5.0, -1.0];
        let (plan, init) = defaults();
        let (y, _) =
            proj_rnorm_ball(&z.view(), 1, DualNorm::L2, 2.0, &plan, &init, 1e-12).unwrap();
        assert!((y[0] - (-2.0)).abs() < 1e-12);
        assert!((y[1] - 2.0).abs() < 1e-12);
        assert!((y[2] - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn feasible_input_is_its_own_projection() {
        let z = array![0.5, -0.25, 0.1];
        let (plan, init) = defaults();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L1, 10.0, &plan, &init, 1e-12).unwrap();
        for (a, b) in y.iter().zip(z.iter()) {
            assert_eq!(a, b);
        }
        assert!(params.is_unset());
    }

    #[test]
    fn zero_radius_projects_to_the_origin() {
        let z = array![1.0, -2.0];
        let (plan, init) = defaults();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 1, DualNorm::L2, 0.0, &plan, &init, 1e-12).unwrap();
        assert!(y.iter().all(|&v| v == 0.0));
        assert!(params.is_unset());
    }

    #[test]
    fn negative_radius_is_rejected() {
        let z = array![1.0, 2.0];
        let (plan, init) = defaults();
        let err = proj_rnorm_ball(&z.view(), 1, DualNorm::L1, -1.0, &plan, &init, 1e-12)
            .unwrap_err();
        assert!(matches!(err, ProjError::InvalidRadius(_)));
    }

    #[test]
    fn rank_bounds_are_enforced() {
        let z = array![1.0, 2.0, 3.0];
        let (plan, init) = defaults();
        for r in [0usize, 4, 10] {
            let err = proj_rnorm_ball(&z.view(), r, DualNorm::L1, 1.0, &plan, &init, 1e-12)
                .unwrap_err();
            assert_eq!(err, ProjError::RankOutOfRange { r, bound: 3 });
        }
    }

    #[test]
    fn linear_plan_agrees_with_binary_plan() {
        let z = array![5.0, 4.0, 3.0, 0.5];
        let init = SearchInit::default();
        for q in [DualNorm::L1, DualNorm::L2] {
            let (yb, pb) =
                proj_rnorm_ball(&z.view(), 2, q, 2.0, &SearchPlan::default(), &init, 1e-12)
                    .unwrap();
            let (yl, pl) =
                proj_rnorm_ball(&z.view(), 2, q, 2.0, &SearchPlan::linear(), &init, 1e-12)
                    .unwrap();
            assert_eq!(pb, pl);
            for (a, b) in yb.iter().zip(yl.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn custom_init_converges_from_above() {
        // Solution has t = 1; starting the binary t search at r walks down.
        let z = array![5.0, 3.0, 0.5];
        let plan = SearchPlan::default();
        let init = SearchInit { t: 2, s: 1, k: 2 };
        let (y, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L2, 2.0, &plan, &init, 1e-12).unwrap();
        assert_eq!(params.t, Some(1));
        assert_eq!(params.s, Some(0));
        let norm = rnorm(&y.view(), 2, DualNorm::L2);
        assert!((norm - 2.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_search_converges_from_above() {
        let z = array![5.0, 0.1, 0.0];
        let plan = SearchPlan::default();
        let init = SearchInit { t: 1, s: 0, k: 2 };
        let (_, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L1, 1.0, &plan, &init, 1e-12).unwrap();
        assert_eq!(params.k, Some(1));
    }

    #[test]
    fn single_entry_vector_clamps_to_the_radius() {
        let z = array![4.0];
        let (plan, init) = defaults();
        for q in [DualNorm::L1, DualNorm::L2] {
            let (y, params) =
                proj_rnorm_ball(&z.view(), 1, q, 1.5, &plan, &init, 1e-12).unwrap();
            assert!((y[0] - 1.5).abs() < 1e-9);
            assert_eq!(params.t, Some(1));
            assert_eq!(params.s, Some(0));
        }
    }

    #[test]
    fn strategies_can_be_mixed_per_parameter() {
        let z = array![5.0, 4.0, 3.0];
        let plan = SearchPlan {
            t: SearchStrategy::Linear,
            s: SearchStrategy::Binary,
            k: SearchStrategy::Binary,
        };
        let init = SearchInit::default();
        let (y, params) =
            proj_rnorm_ball(&z.view(), 2, DualNorm::L1, 2.0, &plan, &init, 1e-12).unwrap();
        assert_eq!(params.t, Some(2));
        for v in y.iter() {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }
}
