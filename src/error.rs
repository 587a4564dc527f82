/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Error types for configuration, analysis and simulation.
//!
//! Degenerate numeric conditions (empty boundary mask, uniform field, zero
//! gradient) are never errors; each estimator resolves them to a defined
//! fallback value. Only configuration, file and shape problems surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type produced by the analysis engine.
pub type Result<T> = core::result::Result<T, BindError>;

/// Errors raised while loading, saving or validating a [`BoundaryConfig`].
///
/// [`BoundaryConfig`]: crate::config::BoundaryConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// Reading or writing the configuration file failed.
    #[error("configuration I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON or a field has the wrong type.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A parameter violates its constraint.
    #[error("configuration error: {field} {reason}")]
    Invalid {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
    /// A method selector string did not name a known method.
    #[error("invalid {kind} method: {value:?}")]
    UnknownMethod {
        /// Which selector was being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors raised by the boundary-analysis engine.
#[derive(Debug, Error)]
pub enum BindError {
    /// The field rank is outside the supported set {1, 2}.
    #[error("unsupported field dimensionality: rank {ndim} (expected 1 or 2)")]
    UnsupportedDimensionality {
        /// Rank of the rejected field.
        ndim: usize,
    },
    /// The field has no cells.
    #[error("field contains no cells")]
    EmptyField,
    /// The engine was constructed with an invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by the synthetic field generators.
#[derive(Debug, Error, PartialEq)]
pub enum SimulatorError {
    /// Boundary sharpness must be positive and finite.
    #[error("boundary sharpness must be positive and finite, got {0}")]
    InvalidSharpness(f64),
    /// The requested shape has an unsupported rank.
    #[error("unsupported shape rank {0}")]
    UnsupportedShape(usize),
    /// The requested shape has a zero-length axis.
    #[error("shape must have at least one cell per axis")]
    EmptyShape,
    /// Noise parameters were rejected by the sampler.
    #[error("invalid noise distribution: {0}")]
    Noise(String),
}
