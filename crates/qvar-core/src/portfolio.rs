//! Closed-form portfolio statistics for the three-asset reference study.
//!
//! The annual-return history and covariance matrix are the published inputs
//! of the study this tool reconstructs. Optimal mean-variance weights follow
//! `w = (λ/2)·Σ⁻¹·μ` and the theoretical expected return is `E = w·μ`.
//!
//! The covariance matrix is taken as a literal from the study rather than
//! recomputed from the history, matching the published figures exactly.

use nalgebra::{Matrix3, SMatrix, Vector3};
use serde::Serialize;

use crate::error::{Error, Result};

/// Seven years of annual returns for the three assets, in study order.
pub const RETURN_HISTORY: [[f64; 3]; 7] = [
    [0.027, -0.046, -0.377],
    [0.001, 0.034, 0.207],
    [0.01, -0.006, 0.032],
    [0.049, 0.333, 0.787],
    [0.051, 0.34, 0.243],
    [0.47, 0.246, 0.527],
    [0.367, 0.918, 1.102],
];

/// Risk-aversion level λ used by the mean-variance weights.
pub const RISK_AVERSION: f64 = 5.0;

/// Annual-return matrix: one row per period, one column per asset.
pub type ReturnMatrix = SMatrix<f64, 7, 3>;

/// The return history as a matrix.
pub fn return_matrix() -> ReturnMatrix {
    ReturnMatrix::from_fn(|period, asset| RETURN_HISTORY[period][asset])
}

/// Published covariance matrix Σ, same asset ordering as the history.
pub fn covariance() -> Matrix3<f64> {
    Matrix3::new(
        0.037602905, 0.038592381, 0.057048119, //
        0.038592381, 0.110059476, 0.142509524, //
        0.057048119, 0.142509524, 0.24143881,
    )
}

/// Per-asset mean of the return history.
pub fn mean_returns(history: &ReturnMatrix) -> Vector3<f64> {
    let mut mean = Vector3::zeros();
    for period in 0..history.nrows() {
        for asset in 0..3 {
            mean[asset] += history[(period, asset)];
        }
    }
    mean / history.nrows() as f64
}

/// Optimal mean-variance weights `w = (λ/2)·Σ⁻¹·μ`.
///
/// Fails when Σ is singular, because the inversion is undefined.
pub fn optimal_weights(
    covariance: &Matrix3<f64>,
    mean: &Vector3<f64>,
    risk_aversion: f64,
) -> Result<Vector3<f64>> {
    let inverse = covariance.try_inverse().ok_or(Error::SingularCovariance)?;
    Ok(inverse * mean * (risk_aversion / 2.0))
}

/// Theoretical expected portfolio return `E = w·μ`.
pub fn expected_return(weights: &Vector3<f64>, mean: &Vector3<f64>) -> f64 {
    weights.dot(mean)
}

/// Derived portfolio statistics consumed by the VaR pipeline.
#[derive(Debug, Clone)]
pub struct PortfolioModel {
    pub history: ReturnMatrix,
    pub mean: Vector3<f64>,
    pub covariance: Matrix3<f64>,
    pub weights: Vector3<f64>,
    pub expected_return: f64,
}

impl PortfolioModel {
    /// Build the model for the published reference study.
    pub fn reference() -> Result<Self> {
        let history = return_matrix();
        let mean = mean_returns(&history);
        let covariance = covariance();
        let weights = optimal_weights(&covariance, &mean, RISK_AVERSION)?;
        let expected_return = expected_return(&weights, &mean);
        Ok(Self {
            history,
            mean,
            covariance,
            weights,
            expected_return,
        })
    }
}

/// Flat summary of the model for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub mean_returns: [f64; 3],
    pub weights: [f64; 3],
    pub expected_return: f64,
    pub risk_aversion: f64,
}

impl From<&PortfolioModel> for PortfolioSummary {
    fn from(model: &PortfolioModel) -> Self {
        Self {
            mean_returns: [model.mean[0], model.mean[1], model.mean[2]],
            weights: [model.weights[0], model.weights[1], model.weights[2]],
            expected_return: model.expected_return,
            risk_aversion: RISK_AVERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_returns() {
        let mean = mean_returns(&return_matrix());
        assert!((mean[0] - 0.975 / 7.0).abs() < 1e-12);
        assert!((mean[1] - 1.819 / 7.0).abs() < 1e-12);
        assert!((mean[2] - 2.521 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_weight_equation_round_trip() {
        // w = (λ/2)·Σ⁻¹·μ  ⇔  (2/λ)·Σ·w = μ
        let model = PortfolioModel::reference().unwrap();
        let recovered = model.covariance * model.weights * (2.0 / RISK_AVERSION);
        assert!((recovered - model.mean).norm() < 1e-9);
    }

    #[test]
    fn test_weights_match_closed_form() {
        let model = PortfolioModel::reference().unwrap();
        assert!((model.weights[0] - 4.875227).abs() < 1e-5);
        assert!((model.weights[1] - 3.631859).abs() < 1e-5);
        assert!((model.weights[2] - 0.433485).abs() < 1e-5);
    }

    #[test]
    fn test_expected_return() {
        let model = PortfolioModel::reference().unwrap();
        assert!((model.expected_return - 1.778931).abs() < 1e-4);
    }

    #[test]
    fn test_singular_covariance_rejected() {
        let mean = mean_returns(&return_matrix());
        let result = optimal_weights(&Matrix3::zeros(), &mean, RISK_AVERSION);
        assert!(matches!(result, Err(Error::SingularCovariance)));
    }

    #[test]
    fn test_summary_mirrors_model() {
        let model = PortfolioModel::reference().unwrap();
        let summary = PortfolioSummary::from(&model);
        assert_eq!(summary.expected_return, model.expected_return);
        assert_eq!(summary.weights[2], model.weights[2]);
        assert_eq!(summary.risk_aversion, RISK_AVERSION);
    }
}
