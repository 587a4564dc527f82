/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Threshold classification of a boundary state.
//!
//! - [`Assessment`]: four-level emergence phase, chosen by first-match priority.
//! - [`Classification`]: the full record (threshold flags, transformation
//!   probability, assessment) handed to downstream collaborators.
//!
//! # Invariants
//!
//! - **PHS-001**: Priority is Φ → flux → decoherence → subcritical.
//! - **PHS-002**: All threshold comparisons are strict.
//! - **PHS-003**: `transformation_probability = 1 − exp(−β · flux)` is 0 at zero
//!   flux and strictly increasing in flux.
//! - **PHS-004**: Classification is a pure function of (config, state).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BoundaryConfig;
use crate::state::BoundaryState;

// ─── Assessment ──────────────────────────────────────────────────────────────

/// Overall emergence assessment of one boundary state.
///
/// ```text
///  Φ > φ_critical ──────────────▶ Critical
///  else flux > high_flux ───────▶ ImminentTransformation
///  else decoherence > creative ─▶ CreativeState
///  else ────────────────────────▶ Subcritical
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    /// Integrated information above the critical threshold.
    Critical,
    /// Information flux above the high-flux threshold.
    ImminentTransformation,
    /// Boundary dispersion above the creative threshold.
    CreativeState,
    /// No threshold crossed.
    Subcritical,
}

impl Assessment {
    /// Human-readable summary line.
    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Critical => "CRITICAL: emergence conditions met",
            Assessment::ImminentTransformation => "HIGH FLUX: transformation imminent",
            Assessment::CreativeState => "CREATIVE: novel states emerging",
            Assessment::Subcritical => "SUBCRITICAL: building toward emergence",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Classification ─────────────────────────────────────────────────────────

/// Threshold flags and assessment for one boundary state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// `phi_integrated > phi_critical`.
    pub phi_above_critical: bool,
    /// `information_flux > high_flux_threshold`.
    pub high_flux: bool,
    /// `decoherence_rate > creative_decoherence_threshold`.
    pub creative_decoherence: bool,
    /// `1 − exp(−β · flux)` in [0, 1).
    pub transformation_probability: f64,
    /// First-match assessment.
    pub assessment: Assessment,
}

impl Classification {
    /// Apply `config` thresholds to `state`.
    pub fn evaluate(config: &BoundaryConfig, state: &BoundaryState) -> Self {
        let phi_above_critical = state.phi_integrated() > config.phi_critical;
        let high_flux = state.information_flux() > config.high_flux_threshold;
        let creative_decoherence =
            state.decoherence_rate() > config.creative_decoherence_threshold;

        let assessment = match (phi_above_critical, high_flux, creative_decoherence) {
            (true, _, _) => Assessment::Critical,
            (false, true, _) => Assessment::ImminentTransformation,
            (false, false, true) => Assessment::CreativeState,
            (false, false, false) => Assessment::Subcritical,
        };

        Self {
            phi_above_critical,
            high_flux,
            creative_decoherence,
            transformation_probability: transformation_probability(
                config.transformation_beta,
                state.information_flux(),
            ),
            assessment,
        }
    }
}

/// Probability that a boundary with the given flux transforms: `1 − exp(−β · flux)`.
pub fn transformation_probability(beta: f64, flux: f64) -> f64 {
    -(-beta * flux).exp_m1()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
