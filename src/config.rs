/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Analysis parameters with validation and JSON persistence.
//!
//! - [`BoundaryConfig`]: thresholds, method selectors and numeric-stability constants.
//! - [`BoundaryMethod`]: boundary detector selector (gradient / laplacian).
//! - [`EntropyMethod`]: local entropy selector (shannon / renyi).
//!
//! # Invariants
//!
//! - **CFG-001**: `phi_critical`, `transformation_beta`, `high_flux_threshold` and
//!   `creative_decoherence_threshold` are strictly positive.
//! - **CFG-002**: `0 ≤ initial_trust ≤ 1`.
//! - **CFG-003**: `epsilon > 0` and `phi_normalization > 0`.
//! - **CFG-004**: Validation reports the first violated constraint only.

use core::fmt;
use core::str::FromStr;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

// ─── Method selectors ───────────────────────────────────────────────────────

/// How boundary cells are located in a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMethod {
    /// Gaussian-smoothed gradient magnitude above the 90th percentile.
    #[default]
    Gradient,
    /// Absolute discrete Laplacian above the 90th percentile.
    Laplacian,
}

impl BoundaryMethod {
    /// Lowercase selector name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryMethod::Gradient => "gradient",
            BoundaryMethod::Laplacian => "laplacian",
        }
    }
}

impl fmt::Display for BoundaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gradient" => Ok(BoundaryMethod::Gradient),
            "laplacian" => Ok(BoundaryMethod::Laplacian),
            other => Err(ConfigError::UnknownMethod {
                kind: "boundary detection",
                value: other.to_string(),
            }),
        }
    }
}

/// Which entropy functional is applied to each local-window histogram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyMethod {
    /// Shannon entropy, natural log.
    #[default]
    Shannon,
    /// Rényi entropy of order [`BoundaryConfig::renyi_order`].
    Renyi,
}

impl EntropyMethod {
    /// Lowercase selector name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntropyMethod::Shannon => "shannon",
            EntropyMethod::Renyi => "renyi",
        }
    }
}

impl fmt::Display for EntropyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntropyMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shannon" => Ok(EntropyMethod::Shannon),
            "renyi" => Ok(EntropyMethod::Renyi),
            other => Err(ConfigError::UnknownMethod {
                kind: "entropy calculation",
                value: other.to_string(),
            }),
        }
    }
}

// ─── BoundaryConfig ─────────────────────────────────────────────────────────

/// Parameters for one analysis engine.
///
/// Construct once (defaults, struct update syntax, or [`BoundaryConfig::from_json`]),
/// call [`BoundaryConfig::validate`], then share read-only. Missing keys in a JSON
/// file take their default; unknown keys are rejected.
///
/// Fields marked *reserved* are carried for collaborators and future iterative
/// algorithms; the engine does not read them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryConfig {
    /// Φ above which a state is assessed as critical. Default 4.3.
    pub phi_critical: f64,
    /// Decay rate in `1 − exp(−β · flux)`. Default 0.73.
    pub transformation_beta: f64,
    /// Information flux (bits/s) above which a transformation is imminent. Default 1e8.
    pub high_flux_threshold: f64,
    /// Decoherence above which a state is assessed as creative. Default 1.0.
    pub creative_decoherence_threshold: f64,

    /// Boundary detector. Default [`BoundaryMethod::Gradient`].
    pub boundary_detection_method: BoundaryMethod,
    /// Local entropy functional. Default [`EntropyMethod::Shannon`].
    pub entropy_calculation_method: EntropyMethod,
    /// Order α of the Rényi entropy (used only with [`EntropyMethod::Renyi`]). Default 2.0.
    pub renyi_order: f64,
    /// Divisor applied to raw Φ before clamping to [0, 10]. Default 1e6.
    pub phi_normalization: f64,
    /// Integration window in seconds (reserved). Default 0.1.
    pub integration_time_window: f64,
    /// Spatial resolution in metres (reserved). Default 0.001.
    pub spatial_resolution: f64,

    /// Hexagons per side of the collaborator topology. Default 7.
    pub hex_grid_size: u32,
    /// Neighbours per hexagon (reserved). Default 6.
    pub hex_connectivity: u32,

    /// Collaborator trust decay rate (reserved). Default 0.1.
    pub trust_decay_rate: f64,
    /// Collaborator trust growth rate (reserved). Default 0.3.
    pub trust_growth_rate: f64,
    /// Collaborator starting trust in [0, 1]. Default 0.5.
    pub initial_trust: f64,

    /// Added to every histogram bin and normal denominator. Default 1e-10.
    pub epsilon: f64,
    /// Iteration cap for iterative estimators (reserved). Default 1000.
    pub max_iterations: u32,
    /// Convergence criterion for iterative estimators (reserved). Default 1e-6.
    pub convergence_threshold: f64,
}

impl BoundaryConfig {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file and validate it.
    ///
    /// Fails with [`ConfigError::NotFound`] when `path` does not exist.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.to_path_buf() });
        }
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "loaded boundary configuration");
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON, creating parent directories.
    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        info!(path = %path.display(), "saved boundary configuration");
        Ok(())
    }

    /// Check every constraint in declaration order and report the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(bool, &'static str, &'static str); 8] = [
            (positive(self.phi_critical), "phi_critical", "must be positive"),
            (positive(self.transformation_beta), "transformation_beta", "must be positive"),
            (positive(self.high_flux_threshold), "high_flux_threshold", "must be positive"),
            (
                positive(self.creative_decoherence_threshold),
                "creative_decoherence_threshold",
                "must be positive",
            ),
            (self.hex_grid_size > 0, "hex_grid_size", "must be positive"),
            (
                (0.0..=1.0).contains(&self.initial_trust),
                "initial_trust",
                "must be between 0 and 1",
            ),
            (positive(self.epsilon), "epsilon", "must be positive"),
            (positive(self.phi_normalization), "phi_normalization", "must be positive"),
        ];

        for (ok, field, reason) in checks {
            if !ok {
                return Err(ConfigError::Invalid { field, reason });
            }
        }

        if self.entropy_calculation_method == EntropyMethod::Renyi
            && !(positive(self.renyi_order) && (self.renyi_order - 1.0).abs() > f64::EPSILON)
        {
            return Err(ConfigError::Invalid {
                field: "renyi_order",
                reason: "must be positive and different from 1",
            });
        }

        Ok(())
    }
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            phi_critical: 4.3,
            transformation_beta: 0.73,
            high_flux_threshold: 1e8,
            creative_decoherence_threshold: 1.0,
            boundary_detection_method: BoundaryMethod::Gradient,
            entropy_calculation_method: EntropyMethod::Shannon,
            renyi_order: 2.0,
            phi_normalization: 1e6,
            integration_time_window: 0.1,
            spatial_resolution: 0.001,
            hex_grid_size: 7,
            hex_connectivity: 6,
            trust_decay_rate: 0.1,
            trust_growth_rate: 0.3,
            initial_trust: 0.5,
            epsilon: 1e-10,
            max_iterations: 1000,
            convergence_threshold: 1e-6,
        }
    }
}

fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

// ─── Tests ──────────────────────────────────────────────────────────────────
