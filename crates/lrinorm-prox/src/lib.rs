//! # lrinorm-prox - Low-Rank-Inducing Norm Proximal Operators
//!
//! Proximal operators of the low-rank-inducing Frobenius and spectral
//! norms `‖·‖_{ℓp,r*}` for integer target rank `r`, evaluated via Moreau
//! decomposition through the Euclidean projection onto the ball of the
//! truncated dual norm.
//!
//! ## Overview
//!
//! Given an input `Z`, a rank `r`, a norm selector `p ∈ {2, ∞}` and a
//! weight `γ ≥ 0`, the crate solves
//!
//! ```text
//! minimize_X  γ·‖X‖_{ℓp,r*} + 0.5·‖X − Z‖_F²
//! ```
//!
//! and returns the minimizer together with the converged parameters of the
//! nested threshold searches. Two entry points cover the two argument
//! shapes:
//!
//! - [`prox_norm_rast`] - matrix mode: an economy SVD reduces the problem
//!   to the singular value spectrum, which shrinks while the singular
//!   vectors are reused unchanged (the norms are unitarily invariant).
//! - [`prox_norm_rast_vec`] - vector mode: the Moreau decomposition is
//!   applied to the entries directly.
//!
//! The dual half of the decomposition, [`proj_rnorm_ball`], is exposed as
//! well: it projects onto `{y : ‖y‖_{ℓq,r} ≤ γ}` using up to three nested
//! integer searches (`t`, `s`, and, for the spectral-type norm, `k`),
//! each selectable between binary and linear search with configurable
//! start values.
//!
//! ## Quick Start
//!
//! ```
//! use lrinorm_core::{NormP, ProxOptions};
//! use lrinorm_prox::prox_norm_rast_vec;
//! use scirs2_core::ndarray_ext::array;
//!
//! let z = array![5.0f64, 3.0, 1.0];
//! let (x, params) = prox_norm_rast_vec(&z.view(), 1, NormP::Two, 2.0, &ProxOptions::default())?;
//!
//! assert!((x[0] - 3.0).abs() < 1e-9);
//! assert!(params.t.is_some());
//!
//! // A feasible input (already inside the dual-norm ball) maps to zero
//! // and no search runs.
//! let (x, params) = prox_norm_rast_vec(&z.view(), 1, NormP::Two, 100.0, &ProxOptions::default())?;
//! assert!(x.iter().all(|&v| v.abs() < 1e-12));
//! assert!(params.is_unset());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`; the economy SVD
//! comes from `scirs2_linalg`. Direct use of `ndarray` is not permitted in
//! this workspace.
//!
//! ## References
//!
//! - C. Grussler, A. Rantzer and P. Giselsson (2018):
//!   "Low-Rank Optimization with Convex Constraints",
//!   IEEE Transactions on Automatic Control.
//! - C. Grussler and P. Giselsson (2016):
//!   "Low-Rank Inducing Norms with Optimality Interpretations".
//! - C. Grussler (2017): "Rank Reduction with Convex Constraints",
//!   PhD Thesis, Lund University.

#![deny(warnings)]

pub mod proj;
pub mod prox;

#[cfg(test)]
mod property_tests;

pub use proj::{proj_rnorm_ball, ProjError};
pub use prox::{prox_norm_rast, prox_norm_rast_vec, ProxError};
