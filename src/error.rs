//! errors reported by the coreset algorithms.
//!
//! In-memory algorithms return [CoresetError] directly, persistence goes through `anyhow`
//! and may carry a [CoresetError] that callers can recover with `downcast_ref`.

use thiserror::Error;

/// Error kinds of the crate. All are reported synchronously, nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoresetError {
    /// out of range gamma/eps/eta, zero k, mismatched array lengths ...
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// empty dataset, all zero cost vector
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    /// unrecognized sensitivity scheme tag
    #[error("unsupported sensitivity scheme: {0}")]
    UnsupportedScheme(String),
}

/// check that an outlier fraction is in the open interval (0,1)
pub(crate) fn check_gamma(gamma: f64) -> Result<(), CoresetError> {
    if !(gamma > 0. && gamma < 1.) {
        return Err(CoresetError::InvalidParameter(format!(
            "gamma must be in (0,1), got {}",
            gamma
        )));
    }
    Ok(())
}

/// check the approximation slack, must be finite and >= 0
pub(crate) fn check_eps(eps: f64) -> Result<(), CoresetError> {
    if !(eps.is_finite() && eps >= 0.) {
        return Err(CoresetError::InvalidParameter(format!(
            "eps must be >= 0, got {}",
            eps
        )));
    }
    Ok(())
}
