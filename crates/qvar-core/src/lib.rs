//! # qvar-core
//!
//! **Quantum-assisted portfolio Value-at-Risk estimation.**
//!
//! `qvar-core` reconstructs a published three-asset VaR study: closed-form
//! mean-variance statistics, a PCA reduction of the covariance matrix to a
//! single dominant risk factor, a single-qubit circuit whose measurement
//! statistics estimate the tail probability at the chosen confidence level,
//! and a normal-quantile inversion that maps the result back into
//! portfolio-return units.
//!
//! ## Quick Start
//!
//! ```no_run
//! use qvar_core::{
//!     CONFIDENCE_LEVEL, PortfolioModel, REFERENCE_SCORES, RuntimeConfig, VarReport,
//!     estimate_tail_probability, loss_stats, principal_component, scaling_factor,
//! };
//!
//! let model = PortfolioModel::reference().unwrap();
//! let component = principal_component(
//!     &model.covariance,
//!     &model.history,
//!     &model.mean,
//!     &REFERENCE_SCORES,
//! );
//! let k = scaling_factor(&model.weights, &component.vector);
//! let loss = loss_stats(&REFERENCE_SCORES).unwrap();
//!
//! let tail = estimate_tail_probability(RuntimeConfig::default(), CONFIDENCE_LEVEL, 10_000);
//! let report = VarReport::build(&model, k, loss, tail, CONFIDENCE_LEVEL).unwrap();
//! println!("portfolio VaR: {:.4}", report.portfolio_var);
//! ```
//!
//! ## Architecture
//!
//! Portfolio statistics → PCA scaling → tail probability (remote sampler or
//! demo fallback) → quantile inversion → portfolio-space VaR.
//!
//! The remote round trip is the only I/O. Every failure inside it collapses
//! into a tagged [`TailEstimate::Fallback`] carrying the published demo
//! constant, so the pipeline always completes while callers can still tell
//! measured data from the canned value.

pub mod circuit;
pub mod error;
pub mod pca;
pub mod portfolio;
pub mod result;
pub mod runtime;
pub mod var;

pub use circuit::{tail_circuit_qasm, tail_rotation_angle};
pub use error::{Error, Result};
pub use pca::{PrincipalComponent, correlation, principal_component, project_scores, scaling_factor};
pub use portfolio::{
    PortfolioModel, PortfolioSummary, RETURN_HISTORY, RISK_AVERSION, ReturnMatrix, covariance,
    expected_return, mean_returns, optimal_weights, return_matrix,
};
pub use result::{Counts, JobStatus, PREFERRED_REGISTER, PubResult, SamplerResult};
pub use runtime::{
    DEFAULT_BACKEND, DEFAULT_BASE_URL, DEFAULT_SHOTS, DEMO_TAIL_PROBABILITY, RuntimeClient,
    RuntimeConfig, TOKEN_ENV, TailEstimate, estimate_tail_probability,
};
pub use var::{
    CONFIDENCE_LEVEL, LossStats, REFERENCE_PORTFOLIO_VAR, REFERENCE_SCORES, VarReport, loss_stats,
    portfolio_space_var, score_space_var,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
