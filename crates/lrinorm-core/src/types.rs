//! Configuration and result types for the low-rank-inducing norm operators.
//!
//! The original formulation exposes three tuning knobs for the nested
//! dual-ball search: which strategy to use per parameter (binary or linear),
//! where each search starts, and the relative tolerance for deciding when a
//! computed magnitude is an exact zero. All three are modelled here as
//! immutable `Copy` value objects so that concurrent calls can never alias
//! or mutate each other's configuration.

use thiserror::Error;

/// Error raised when the norm selector is neither `2` nor infinity.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("p can only be equal to 2 or inf, got {0}")]
pub struct InvalidNorm(pub f64);

/// Norm selector for the low-rank-inducing norm `‖·‖_{ℓp,r*}`.
///
/// Only the Frobenius-type (`p = 2`) and spectral-type (`p = ∞`) variants
/// exist; every other exponent is rejected at construction.
///
/// # Examples
///
/// ```
/// use lrinorm_core::NormP;
///
/// assert_eq!(NormP::from_f64(2.0).unwrap(), NormP::Two);
/// assert_eq!(NormP::from_f64(f64::INFINITY).unwrap(), NormP::Inf);
/// assert!(NormP::from_f64(3.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormP {
    /// Frobenius-type `ℓ2` norm (self-dual exponent).
    Two,
    /// Spectral-type `ℓ∞` norm (dual exponent 1).
    Inf,
}

impl NormP {
    /// Parse a numeric selector, accepting exactly `2.0` and `f64::INFINITY`.
    pub fn from_f64(p: f64) -> Result<Self, InvalidNorm> {
        if p == 2.0 {
            Ok(NormP::Two)
        } else if p == f64::INFINITY {
            Ok(NormP::Inf)
        } else {
            Err(InvalidNorm(p))
        }
    }

    /// The Hölder-dual exponent consumed by the dual-ball search.
    pub fn dual(self) -> DualNorm {
        match self {
            NormP::Two => DualNorm::L2,
            NormP::Inf => DualNorm::L1,
        }
    }
}

/// Exponent of the truncated dual norm `‖·‖_{ℓq,r}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualNorm {
    /// Sum of the `r` largest magnitudes (dual of the spectral-type norm).
    L1,
    /// `ℓ2` norm of the `r` largest magnitudes (dual of the Frobenius-type norm).
    L2,
}

/// Strategy for one nested integer search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Bisect the candidate interval; probes the configured start value first.
    Binary,
    /// Step one candidate at a time from the start value, following the
    /// direction each probe indicates.
    Linear,
}

/// Per-parameter strategy selection for the nested searches.
///
/// The `k` strategy is only consulted for the spectral-type norm
/// (`p = ∞`), whose dual-ball projection may clamp entries to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlan {
    /// Strategy for the outer search over `t`.
    pub t: SearchStrategy,
    /// Strategy for the inner search over `s`.
    pub s: SearchStrategy,
    /// Strategy for the zero-clamp search over `k`.
    pub k: SearchStrategy,
}

impl Default for SearchPlan {
    fn default() -> Self {
        Self {
            t: SearchStrategy::Binary,
            s: SearchStrategy::Binary,
            k: SearchStrategy::Binary,
        }
    }
}

impl SearchPlan {
    /// All three searches linear.
    pub fn linear() -> Self {
        Self {
            t: SearchStrategy::Linear,
            s: SearchStrategy::Linear,
            k: SearchStrategy::Linear,
        }
    }
}

/// Starting values for the nested searches.
///
/// Binary searches probe the start value before bisecting; linear searches
/// walk away from it one candidate at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInit {
    /// Start value for `t` (default 1).
    pub t: usize,
    /// Start value for `s` (default 0).
    pub s: usize,
    /// Start value for `k` (default 1).
    pub k: usize,
}

impl Default for SearchInit {
    fn default() -> Self {
        Self { t: 1, s: 0, k: 1 }
    }
}

/// Converged values of the nested search parameters.
///
/// All fields are `None` exactly when the input already lies inside the
/// dual-norm ball, in which case no search runs and the proximal operator
/// maps the input to zero. `k` is additionally `None` whenever the
/// zero-clamp search was not required (always for `p = 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThresholdParams {
    /// Converged size of the tied block inside the top `r` positions.
    pub t: Option<usize>,
    /// Converged extension of the tied block past position `r`.
    pub s: Option<usize>,
    /// Converged number of surviving positive entries on the zero-clamp path.
    pub k: Option<usize>,
}

impl ThresholdParams {
    /// The no-search sentinel: every field unset.
    pub fn unset() -> Self {
        Self::default()
    }

    /// True when no threshold search ran (feasible input).
    pub fn is_unset(&self) -> bool {
        self.t.is_none() && self.s.is_none() && self.k.is_none()
    }
}

/// Options accepted by the proximal dispatcher.
///
/// # Examples
///
/// ```
/// use lrinorm_core::ProxOptions;
///
/// let opts = ProxOptions::default();
/// assert_eq!(opts.tol, 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxOptions {
    /// Per-parameter search strategy selection.
    pub search: SearchPlan,
    /// Per-parameter search start values.
    pub init: SearchInit,
    /// Relative tolerance for snapping computed magnitudes to exact zero,
    /// measured against the truncated norm of the input.
    pub tol: f64,
}

impl Default for ProxOptions {
    fn default() -> Self {
        Self {
            search: SearchPlan::default(),
            init: SearchInit::default(),
            tol: 1e-12,
        }
    }
}
