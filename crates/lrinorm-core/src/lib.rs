//! # lrinorm-core
//!
//! Foundational building blocks for the low-rank-inducing norm stack:
//!
//! - **Norm selection** ([`NormP`], [`DualNorm`]) with the Hölder dual
//!   mapping used by the proximal operators (`p = ∞` pairs with `q = 1`,
//!   `p = 2` is self-dual)
//! - **Search configuration** ([`SearchPlan`], [`SearchInit`]) - immutable
//!   value objects selecting binary or linear search per nested parameter
//! - **Converged parameters** ([`ThresholdParams`]) - the `t`/`s`/`k`
//!   thresholds produced by the dual-ball search, `None` when no search
//!   was needed
//! - **Integer search engine** ([`SearchStrategy::locate`]) - the
//!   strategy-selectable root finder shared by all nested searches
//! - **Magnitude kernels** ([`ops`]) - sort-by-magnitude with permutation
//!   tracking, signed scatter, and truncated norm evaluation
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext` and the numeric
//! traits from `scirs2_core::numeric`. Direct use of `ndarray` or
//! `num-traits` is not permitted in this workspace.
//!
//! ## Quick Start
//!
//! ```
//! use lrinorm_core::{DualNorm, NormP, SearchInit, SearchPlan};
//! use lrinorm_core::ops::rnorm;
//! use scirs2_core::ndarray_ext::array;
//!
//! // The spectral-type selector maps to the l1 truncated dual norm
//! assert_eq!(NormP::Inf.dual(), DualNorm::L1);
//!
//! // Truncated norm: l2 norm of the two largest magnitudes
//! let z = array![3.0f64, -4.0, 1.0];
//! let norm = rnorm(&z.view(), 2, DualNorm::L2);
//! assert!((norm - 5.0).abs() < 1e-12);
//!
//! // Default search configuration: binary everywhere, t0 = 1, s0 = 0, k0 = 1
//! let plan = SearchPlan::default();
//! let init = SearchInit::default();
//! assert_eq!(init.t, 1);
//! # let _ = (plan, init);
//! ```

pub mod ops;
pub mod search;
pub mod types;


pub use search::{SearchError, Verdict};
pub use types::{
    DualNorm, InvalidNorm, NormP, ProxOptions, SearchInit, SearchPlan, SearchStrategy,
    ThresholdParams,
};
