//! Error types shared across the library.
//!
//! Remote failures during tail estimation are additionally absorbed into
//! [`crate::runtime::TailEstimate::Fallback`]; everything else propagates.

use thiserror::Error;

/// Unified error type for qvar operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure (connect, timeout, TLS).
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The runtime service answered with a non-success status.
    #[error("runtime API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected wire shape.
    #[error("failed to decode runtime response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No bearer token in the config or the token environment variable.
    #[error("no runtime auth token configured (set {})", crate::runtime::TOKEN_ENV)]
    MissingToken,

    /// The remote job reached a terminal state other than DONE.
    #[error("job ended in state {0}")]
    JobFailed(String),

    /// A completed result carried no measurement register.
    #[error("result contains no measurement register")]
    MissingRegister,

    /// The covariance matrix is not invertible.
    #[error("covariance matrix is singular; optimal weights are undefined")]
    SingularCovariance,

    /// Probability or quantile level outside the supported range.
    #[error("quantile level {0} is out of range")]
    InvalidQuantile(f64),

    /// Loss distribution with non-positive dispersion.
    #[error("degenerate loss distribution (sigma = {0})")]
    DegenerateLoss(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
