//! Principal-component reduction of the covariance matrix.
//!
//! The three-asset return space collapses onto the eigenvector with the
//! largest eigenvalue. Eigenvectors are sign-ambiguous, so the component is
//! canonicalized against a reference score sequence: when the projected
//! scores correlate negatively with the reference, the vector is negated.
//! The portfolio's sensitivity to the component is the scalar `|w·v1|`.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};

use crate::portfolio::ReturnMatrix;

/// Leading eigenpair of a covariance matrix.
#[derive(Debug, Clone)]
pub struct PrincipalComponent {
    /// Unit eigenvector, sign-aligned to the reference score sequence.
    pub vector: Vector3<f64>,
    /// Its eigenvalue (variance explained along the component).
    pub eigenvalue: f64,
}

/// Pearson correlation between two equally long sequences.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let mean_a = a[..n].iter().sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().sum::<f64>() / n as f64;
    let mut num = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        num += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    let den = (var_a * var_b).sqrt();
    if den <= 1e-12 { 0.0 } else { num / den }
}

/// Project centered returns onto a component, one score per period.
pub fn project_scores(
    history: &ReturnMatrix,
    mean: &Vector3<f64>,
    component: &Vector3<f64>,
) -> Vec<f64> {
    (0..history.nrows())
        .map(|period| ((history.row(period) - mean.transpose()) * component)[(0, 0)])
        .collect()
}

/// Leading principal component of `covariance`, sign-aligned so the scores
/// projected from `history` correlate non-negatively with `reference`.
pub fn principal_component(
    covariance: &Matrix3<f64>,
    history: &ReturnMatrix,
    mean: &Vector3<f64>,
    reference: &[f64],
) -> PrincipalComponent {
    let eigen = SymmetricEigen::new(*covariance);
    let mut leading = 0;
    for i in 1..eigen.eigenvalues.len() {
        if eigen.eigenvalues[i] > eigen.eigenvalues[leading] {
            leading = i;
        }
    }
    let mut vector = eigen.eigenvectors.column(leading).into_owned();
    let eigenvalue = eigen.eigenvalues[leading];

    let scores = project_scores(history, mean, &vector);
    if correlation(&scores, reference) < 0.0 {
        vector = -vector;
    }
    PrincipalComponent { vector, eigenvalue }
}

/// Sensitivity of the portfolio to the component: `k = |w·v1|`.
pub fn scaling_factor(weights: &Vector3<f64>, component: &Vector3<f64>) -> f64 {
    weights.dot(component).abs()
}
