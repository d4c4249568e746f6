//! Property-based tests for the proximal operators and the dual-ball
//! projection.
//!
//! These verify the mathematical invariants that must hold for every
//! input: Moreau consistency, monotone shrinkage, dual-ball membership,
//! the feasibility short-circuit, and strategy independence.

use crate::{proj_rnorm_ball, prox_norm_rast, prox_norm_rast_vec};
use lrinorm_core::ops::rnorm;
use lrinorm_core::{NormP, ProxOptions, SearchPlan};
use proptest::prelude::*;
use scirs2_core::ndarray_ext::{Array1, Array2};

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 48,
        ..ProptestConfig::default()
    }
}

/// A vector, a valid rank for it, and a penalty weight.
fn vec_instance() -> impl Strategy<Value = (Vec<f64>, usize, f64)> {
    prop::collection::vec(-10.0f64..10.0, 1..16).prop_flat_map(|values| {
        let n = values.len();
        (Just(values), 1..=n, 0.01f64..20.0)
    })
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn moreau_decomposition_holds((values, r, gamma) in vec_instance()) {
        let z = Array1::from_vec(values);
        let opts = ProxOptions::default();
        for p in [NormP::Two, NormP::Inf] {
            let q = p.dual();
            let (x, params) = prox_norm_rast_vec(&z.view(), r, p, gamma, &opts).unwrap();
            let (y, proj_params) =
                proj_rnorm_ball(&z.view(), r, q, gamma, &opts.search, &opts.init, opts.tol)
                    .unwrap();
            prop_assert_eq!(params, proj_params);
            for ((xi, yi), zi) in x.iter().zip(y.iter()).zip(z.iter()) {
                prop_assert!((xi + yi - zi).abs() < 1e-10);
            }
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn prox_shrinks_componentwise((values, r, gamma) in vec_instance()) {
        let z = Array1::from_vec(values);
        let opts = ProxOptions::default();
        for p in [NormP::Two, NormP::Inf] {
            let (x, _) = prox_norm_rast_vec(&z.view(), r, p, gamma, &opts).unwrap();
            for (xi, zi) in x.iter().zip(z.iter()) {
                prop_assert!(xi.abs() <= zi.abs() + 1e-10);
                prop_assert!(xi * zi >= -1e-10, "sign flip: {} from {}", xi, zi);
            }
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn projection_lands_in_the_dual_ball((values, r, gamma) in vec_instance()) {
        let z = Array1::from_vec(values);
        let opts = ProxOptions::default();
        for p in [NormP::Two, NormP::Inf] {
            let q = p.dual();
            let (y, params) =
                proj_rnorm_ball(&z.view(), r, q, gamma, &opts.search, &opts.init, opts.tol)
                    .unwrap();
            let norm_y = rnorm(&y.view(), r, q);
            prop_assert!(norm_y <= gamma * (1.0 + 1e-8) + 1e-10);
            // Unset parameters exactly on the feasible path.
            let feasible = rnorm(&z.view(), r, q) <= gamma;
            prop_assert_eq!(params.is_unset(), feasible);
            // On the active path the constraint is tight.
            if !feasible {
                prop_assert!(norm_y >= gamma * (1.0 - 1e-6) - 1e-10);
            }
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn linear_and_binary_plans_agree((values, r, gamma) in vec_instance()) {
        let z = Array1::from_vec(values);
        let binary = ProxOptions::default();
        let linear = ProxOptions {
            search: SearchPlan::linear(),
            ..ProxOptions::default()
        };
        for p in [NormP::Two, NormP::Inf] {
            let (xb, pb) = prox_norm_rast_vec(&z.view(), r, p, gamma, &binary).unwrap();
            let (xl, pl) = prox_norm_rast_vec(&z.view(), r, p, gamma, &linear).unwrap();
            prop_assert_eq!(pb, pl);
            for (a, b) in xb.iter().zip(xl.iter()) {
                prop_assert!((a - b).abs() < 1e-10);
            }
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn spectral_ordering_is_preserved((values, r, gamma) in vec_instance()) {
        // Sorted non-negative input (a singular value spectrum) stays
        // sorted and non-negative after the prox.
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.abs().partial_cmp(&a.abs()).unwrap());
        let s = Array1::from_vec(sorted.iter().map(|v| v.abs()).collect());
        let opts = ProxOptions::default();
        for p in [NormP::Two, NormP::Inf] {
            let (x, _) = prox_norm_rast_vec(&s.view(), r, p, gamma, &opts).unwrap();
            for w in x.as_slice().unwrap().windows(2) {
                prop_assert!(w[0] >= w[1] - 1e-10);
            }
            prop_assert!(x.iter().all(|&v| v >= -1e-12));
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn matrix_prox_preserves_shape_and_shrinks(
        rows in 2usize..6,
        cols in 2usize..6,
        r in 1usize..3,
        gamma in 0.1f64..10.0,
        seed in 0u64..1_000,
    ) {
        prop_assume!(r <= rows.min(cols));
        // Deterministic pseudo-random entries from the seed.
        let z = Array2::from_shape_fn((rows, cols), |(i, j)| {
            let v = seed as f64 + (i * cols + j) as f64;
            (v * 12.9898).sin() * 5.0
        });
        let opts = ProxOptions::default();
        for p in [NormP::Two, NormP::Inf] {
            let (x, _) = prox_norm_rast(&z.view(), r, p, gamma, &opts).unwrap();
            prop_assert_eq!(x.dim(), z.dim());
            let norm_x: f64 = x.iter().map(|v| v * v).sum::<f64>().sqrt();
            let norm_z: f64 = z.iter().map(|v| v * v).sum::<f64>().sqrt();
            prop_assert!(norm_x <= norm_z + 1e-9);
        }
    }
}
