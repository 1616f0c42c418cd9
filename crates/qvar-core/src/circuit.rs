//! Single-qubit tail-probability circuit.
//!
//! A qubit prepared with `RY(θ)` where `θ = 2·asin(√α)` measures "1" with
//! probability α in the computational basis, so one rotation plus one
//! measurement estimates the CDF level directly from shot counts.

use crate::error::{Error, Result};

/// Rotation angle that encodes quantile level `alpha` into a single qubit.
pub fn tail_rotation_angle(alpha: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(Error::InvalidQuantile(alpha));
    }
    Ok(2.0 * alpha.sqrt().asin())
}

/// Render the tail circuit as an OPENQASM 3 program.
pub fn tail_circuit_qasm(alpha: f64) -> Result<String> {
    let theta = tail_rotation_angle(alpha)?;
    Ok(format!(
        "OPENQASM 3.0;\n\
         include \"stdgates.inc\";\n\
         bit[1] c;\n\
         qubit[1] q;\n\
         ry({theta:.12}) q[0];\n\
         c[0] = measure q[0];\n"
    ))
}
