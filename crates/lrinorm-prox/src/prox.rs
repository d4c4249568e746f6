//! Proximal operators of the low-rank-inducing Frobenius and spectral norms.
//!
//! For an integer target rank `r > 0`, the low-rank-inducing norm
//! `‖·‖_{ℓp,r*}` (with `p = 2` or `p = ∞`) penalizes deviation from rank
//! `r` while staying convex. Its proximal operator
//!
//! ```text
//! prox(Z) = argmin_X  γ·‖X‖_{ℓp,r*} + 0.5·‖X − Z‖_F²
//! ```
//!
//! is evaluated through the Moreau decomposition `X = Z − Y`, where `Y` is
//! the Euclidean projection of `Z` onto the `γ`-ball of the truncated dual
//! norm `‖·‖_{ℓq,r}` (`q = 2` for `p = 2`, `q = 1` for `p = ∞`). The
//! matrix-valued operator reduces to the vector-valued one on the singular
//! value spectrum: the norms are unitarily invariant, so the proximal
//! operator shrinks singular values and reuses the singular vectors
//! unchanged.

use crate::proj::{proj_rnorm_ball, ProjError};
use lrinorm_core::{InvalidNorm, NormP, ProxOptions, ThresholdParams};
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use scirs2_linalg::svd;
use std::iter::Sum;
use thiserror::Error;

/// Errors raised by the proximal dispatcher.
#[derive(Error, Debug)]
pub enum ProxError {
    /// The norm selector is neither `2` nor infinity.
    #[error(transparent)]
    InvalidNorm(#[from] InvalidNorm),

    /// `r` exceeds the mode-appropriate dimension bound (or is zero).
    #[error("r must satisfy 1 <= r <= {bound} for this input, got {r}")]
    RankOutOfRange {
        /// The offending rank.
        r: usize,
        /// The admissible upper bound: `min(m, n)` for matrices, the
        /// length for vectors.
        bound: usize,
    },

    /// The singular value decomposition failed.
    #[error("SVD failed: {0}")]
    Svd(String),

    /// The dual-ball search failed; propagated unchanged.
    #[error(transparent)]
    Search(#[from] ProjError),
}

/// Proximal operator of `γ·‖·‖_{ℓp,r*}` for a matrix argument.
///
/// Computes the economy SVD `Z = U·diag(S)·Vᵀ`, projects the singular
/// value vector onto the dual-norm ball, and reassembles
/// `X = U·diag(S − y)·Vᵀ`. Returns `X` together with the converged search
/// parameters; the parameters are all unset exactly when
/// `‖Z‖_{ℓq,r} ≤ γ`, in which case `X` is the zero matrix.
///
/// # Errors
///
/// [`ProxError::RankOutOfRange`] when `r` is zero or exceeds `min(m, n)`
/// (checked before any decomposition work); [`ProxError::Svd`] and
/// [`ProxError::Search`] propagate collaborator failures without retrying.
///
/// # Examples
///
/// ```
/// use lrinorm_core::{NormP, ProxOptions};
/// use lrinorm_prox::prox_norm_rast;
/// use scirs2_core::ndarray_ext::array;
///
/// let z = array![[5.0f64, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 1.0]];
/// let (x, params) = prox_norm_rast(&z.view(), 1, NormP::Two, 2.0, &ProxOptions::default())?;
///
/// // The spectrum (5, 3, 1) shrinks to (3, 1, 0).
/// assert!((x[[0, 0]] - 3.0).abs() < 1e-9);
/// assert!((x[[1, 1]] - 1.0).abs() < 1e-9);
/// assert!(x[[2, 2]].abs() < 1e-9);
/// assert!(params.t.is_some() && params.s.is_some() && params.k.is_none());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn prox_norm_rast<T>(
    z: &ArrayView2<T>,
    r: usize,
    p: NormP,
    gamma: T,
    opts: &ProxOptions,
) -> Result<(Array2<T>, ThresholdParams), ProxError>
where
    T: Float + NumCast + NumAssign + Sum + Send + Sync + ScalarOperand + std::fmt::Debug + 'static,
{
    let (rows, cols) = z.dim();
    let bound = rows.min(cols);
    if r == 0 || r > bound {
        return Err(ProxError::RankOutOfRange { r, bound });
    }
    let q = p.dual();

    let (u, s, vt) = svd(z, false, None).map_err(|e| {
        ProxError::Svd(format!(
            "economy SVD of a {}x{} input failed: {}",
            rows, cols, e
        ))
    })?;

    let (y, params) = proj_rnorm_ball(&s.view(), r, q, gamma, &opts.search, &opts.init, opts.tol)?;

    // Moreau decomposition on the spectrum; singular vectors are reused.
    let shrunk = &s - &y;
    let x = u.dot(&Array2::from_diag(&shrunk)).dot(&vt);
    Ok((x, params))
}

/// Proximal operator of `γ·‖·‖_{ℓp,r*}` for a vector argument.
///
/// Direct Moreau decomposition: `x = z − y` with `y` the projection of `z`
/// onto the `γ`-ball of the truncated dual norm. The rank bound in vector
/// mode is the vector length.
///
/// # Errors
///
/// [`ProxError::RankOutOfRange`] when `r` is zero or exceeds `len(z)`;
/// [`ProxError::Search`] propagates dual-ball search failures.
///
/// # Examples
///
/// ```
/// use lrinorm_core::{NormP, ProxOptions};
/// use lrinorm_prox::prox_norm_rast_vec;
/// use scirs2_core::ndarray_ext::array;
///
/// let z = array![5.0f64, 3.0, 1.0];
/// let (x, params) = prox_norm_rast_vec(&z.view(), 1, NormP::Two, 2.0, &ProxOptions::default())?;
///
/// assert!((x[0] - 3.0).abs() < 1e-9);
/// assert!((x[1] - 1.0).abs() < 1e-9);
/// assert!(x[2].abs() < 1e-9);
/// assert!(params.t.is_some());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn prox_norm_rast_vec<T>(
    z: &ArrayView1<T>,
    r: usize,
    p: NormP,
    gamma: T,
    opts: &ProxOptions,
) -> Result<(Array1<T>, ThresholdParams), ProxError>
where
    T: Float + NumCast,
{
    let bound = z.len();
    if r == 0 || r > bound {
        return Err(ProxError::RankOutOfRange { r, bound });
    }
    let q = p.dual();

    let (y, params) = proj_rnorm_ball(z, r, q, gamma, &opts.search, &opts.init, opts.tol)?;
    let x = z - &y;
    Ok((x, params))
}
