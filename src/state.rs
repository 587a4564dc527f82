/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! The value object produced by one boundary analysis.
//!
//! # Serialized layout
//!
//! ```text
//! {
//!   "entropy_gradient": [f64; 3],
//!   "normal_vector":    [f64; 3],
//!   "information_flux": f64,
//!   "decoherence_rate": f64,
//!   "phi_integrated":   f64,
//!   "timestamp":        f64   // Unix seconds
//! }
//! ```
//!
//! Deserialization goes through [`BoundaryState::new`], so a loaded record
//! satisfies the same normal-vector invariant as a freshly computed one.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Boundary measurements captured at one instant.
///
/// Immutable after construction. `normal_vector` is either a unit vector or
/// exactly zero (when the constructor receives an exact zero vector).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundaryStateRecord")]
pub struct BoundaryState {
    entropy_gradient: [f64; 3],
    normal_vector: [f64; 3],
    information_flux: f64,
    decoherence_rate: f64,
    phi_integrated: f64,
    timestamp: f64,
}

#[derive(Deserialize)]
struct BoundaryStateRecord {
    entropy_gradient: [f64; 3],
    normal_vector: [f64; 3],
    information_flux: f64,
    decoherence_rate: f64,
    phi_integrated: f64,
    timestamp: f64,
}

impl From<BoundaryStateRecord> for BoundaryState {
    fn from(r: BoundaryStateRecord) -> Self {
        BoundaryState::new(
            r.entropy_gradient,
            r.normal_vector,
            r.information_flux,
            r.decoherence_rate,
            r.phi_integrated,
            r.timestamp,
        )
    }
}

impl BoundaryState {
    /// Build a state, normalizing `normal_vector` unless its magnitude is exactly zero.
    ///
    /// `timestamp` is in Unix seconds.
    pub fn new(
        entropy_gradient: [f64; 3],
        normal_vector: [f64; 3],
        information_flux: f64,
        decoherence_rate: f64,
        phi_integrated: f64,
        timestamp: f64,
    ) -> Self {
        Self {
            entropy_gradient,
            normal_vector: normalize(normal_vector),
            information_flux,
            decoherence_rate,
            phi_integrated,
            timestamp,
        }
    }

    /// Build a state stamped with the given wall-clock time.
    pub fn captured(
        entropy_gradient: [f64; 3],
        normal_vector: [f64; 3],
        information_flux: f64,
        decoherence_rate: f64,
        phi_integrated: f64,
        at: DateTime<Utc>,
    ) -> Self {
        let timestamp = at.timestamp_micros() as f64 / 1e6;
        Self::new(
            entropy_gradient,
            normal_vector,
            information_flux,
            decoherence_rate,
            phi_integrated,
            timestamp,
        )
    }

    /// Spatial entropy gradient ∇S (trailing components zero for 1-D fields).
    pub fn entropy_gradient(&self) -> [f64; 3] {
        self.entropy_gradient
    }

    /// Unit boundary normal n̂ (or the zero vector).
    pub fn normal_vector(&self) -> [f64; 3] {
        self.normal_vector
    }

    /// Information flux |∇S · n̂| in bits/s.
    pub fn information_flux(&self) -> f64 {
        self.information_flux
    }

    /// Dispersion of field values at boundary cells.
    pub fn decoherence_rate(&self) -> f64 {
        self.decoherence_rate
    }

    /// Integrated information Φ in [0, 10].
    pub fn phi_integrated(&self) -> f64 {
        self.phi_integrated
    }

    /// Capture time in Unix seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Capture time as a UTC datetime, if the timestamp is representable.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        let micros = (self.timestamp * 1e6).round();
        if !micros.is_finite() {
            return None;
        }
        Utc.timestamp_micros(micros as i64).single()
    }
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if norm > 0.0 {
        [v[0] / norm, v[1] / norm, v[2] / norm]
    } else {
        v
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
