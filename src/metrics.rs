/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Scalar reductions over the boundary mask: decoherence and integrated information Φ.
//!
//! # Invariants
//!
//! - **MET-001**: An empty mask gives decoherence 0 and Φ 0.
//! - **MET-002**: Decoherence is the population standard deviation (divisor N) of
//!   field values at boundary cells, so it is never negative.
//! - **MET-003**: Φ is clamped to [`PHI_MIN`, `PHI_MAX`].

use ndarray::{ArrayD, ArrayViewD, Zip};

use crate::boundary::boundary_count;

/// Lower clamp of Φ.
pub const PHI_MIN: f64 = 0.0;

/// Upper clamp of Φ.
pub const PHI_MAX: f64 = 10.0;

/// Default divisor applied to raw Φ (empirical; keeps typical flux values in range).
pub const DEFAULT_PHI_NORMALIZATION: f64 = 1e6;

/// Dispersion of field values at boundary cells.
pub fn decoherence(field: &ArrayViewD<'_, f64>, mask: &ArrayD<bool>) -> f64 {
    let mut values = Vec::new();
    Zip::from(field).and(mask).for_each(|&v, &on_boundary| {
        if on_boundary {
            values.push(v);
        }
    });
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt()
}

/// Fraction of all cells flagged as boundary cells.
pub fn partition_ratio(mask: &ArrayD<bool>) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    boundary_count(mask) as f64 / mask.len() as f64
}

/// Integrated information Φ from the mask, flux and field size.
///
/// ```text
/// Φ = clamp(flux × partition_ratio × log₂(field_size) / normalization, 0, 10)
/// ```
pub fn phi(mask: &ArrayD<bool>, flux: f64, field_size: usize, normalization: f64) -> f64 {
    if boundary_count(mask) == 0 {
        return 0.0;
    }
    let raw = flux * partition_ratio(mask) * (field_size as f64).log2();
    (raw / normalization).clamp(PHI_MIN, PHI_MAX)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
