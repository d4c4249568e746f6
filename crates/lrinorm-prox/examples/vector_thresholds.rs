//! Vector-mode proximal operators and search configuration.
//!
//! Compares the Frobenius-type and spectral-type penalties on the same
//! vector, and shows that binary and linear threshold searches land on the
//! same parameters.
//!
//! Run with: cargo run --example vector_thresholds --release

use anyhow::Result;
use lrinorm_core::{NormP, ProxOptions, SearchPlan};
use lrinorm_prox::prox_norm_rast_vec;
use scirs2_core::ndarray_ext::array;

fn main() -> Result<()> {
    println!("{}", "=".repeat(72));
    println!("Vector-mode prox of the low-rank-inducing norms");
    println!("{}", "=".repeat(72));

    let z = array![5.0, -4.0, 3.0, -0.5, 0.1];
    println!("\nz = {z}");

    for (label, p) in [("p = 2", NormP::Two), ("p = inf", NormP::Inf)] {
        println!("\n--- {label}, r = 2, gamma = 2 ---");
        let binary = ProxOptions::default();
        let linear = ProxOptions {
            search: SearchPlan::linear(),
            ..ProxOptions::default()
        };

        let (xb, pb) = prox_norm_rast_vec(&z.view(), 2, p, 2.0, &binary)?;
        let (xl, pl) = prox_norm_rast_vec(&z.view(), 2, p, 2.0, &linear)?;

        println!("binary search: x = {xb}");
        println!(
            "  t = {:?}, s = {:?}, k = {:?}",
            pb.t, pb.s, pb.k
        );
        println!("linear search: x = {xl}");
        assert_eq!(pb, pl, "strategies must converge to the same thresholds");
    }

    // A weight that dominates the dual norm short-circuits: the prox is
    // zero and no search runs.
    let (x, params) = prox_norm_rast_vec(&z.view(), 2, NormP::Two, 100.0, &ProxOptions::default())?;
    println!("\ngamma = 100 (feasible input): x = {x}");
    println!("params unset: {}", params.is_unset());

    println!("\n{}", "=".repeat(72));
    Ok(())
}
