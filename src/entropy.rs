/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Local-window entropy and its spatial gradient.
//!
//! Every cell gets the entropy of the 5-wide (per axis) window centred on it,
//! with edge replication at the borders. The window values are binned into a
//! 10-bin histogram spanning the window's own `[min, max]`, `epsilon` is added
//! to every bin, and the resulting distribution is scored by the configured
//! [`LocalEntropy`] functional. The gradient of that local-entropy field,
//! averaged per axis, is the entropy gradient ∇S.
//!
//! # Invariants
//!
//! - **ENT-001**: Window extent 5, bin count 10, natural logarithm.
//! - **ENT-002**: No bin is ever empty after smoothing, so `ln(0)` never occurs.
//! - **ENT-003**: ∇S is a 3-vector; trailing components are zero for 1-D fields.
//! - **ENT-004**: Fields of rank other than 1 or 2 are rejected, never truncated.

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use tracing::trace;

use crate::config::{BoundaryConfig, EntropyMethod};
use crate::error::{BindError, Result};
use crate::filters::gradient_axis;

/// Extent of the local window along every axis.
pub const ENTROPY_WINDOW: usize = 5;

/// Number of histogram bins per window.
pub const HISTOGRAM_BINS: usize = 10;

// ─── Entropy functionals ─────────────────────────────────────────────────────

/// Entropy functional applied to a smoothed window histogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocalEntropy {
    /// `H = −Σ pᵢ ln pᵢ`.
    Shannon,
    /// `H_α = ln(Σ pᵢ^α) / (1 − α)`.
    Renyi {
        /// Order α (> 0, ≠ 1).
        order: f64,
    },
}

impl LocalEntropy {
    /// Select the functional named by the configuration.
    pub fn from_config(config: &BoundaryConfig) -> Self {
        match config.entropy_calculation_method {
            EntropyMethod::Shannon => LocalEntropy::Shannon,
            EntropyMethod::Renyi => LocalEntropy::Renyi { order: config.renyi_order },
        }
    }

    /// Entropy of non-negative `weights`, normalized to a distribution first.
    pub fn evaluate(&self, weights: &[f64]) -> f64 {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        match *self {
            LocalEntropy::Shannon => weights
                .iter()
                .map(|w| w / total)
                .filter(|&p| p > 0.0)
                .map(|p| -p * p.ln())
                .sum(),
            LocalEntropy::Renyi { order } => {
                let power_sum: f64 = weights.iter().map(|w| (w / total).powf(order)).sum();
                power_sum.ln() / (1.0 - order)
            }
        }
    }
}

/// Counts of `values` in [`HISTOGRAM_BINS`] equal-width bins over `[min, max]`.
///
/// A constant input spans `[v − 0.5, v + 0.5]`. The last bin is closed on the right.
pub fn histogram(values: &[f64]) -> [f64; HISTOGRAM_BINS] {
    let mut counts = [0.0; HISTOGRAM_BINS];
    if values.is_empty() {
        return counts;
    }
    let (mut first, mut last) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if first == last {
        first -= 0.5;
        last += 0.5;
    }

    let bins = HISTOGRAM_BINS;
    let step = (last - first) / bins as f64;
    let edge = |k: usize| if k == bins { last } else { first + k as f64 * step };

    for &v in values {
        let mut idx = (((v - first) / (last - first)) * bins as f64) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        if v < edge(idx) && idx > 0 {
            idx -= 1;
        } else if idx != bins - 1 && v >= edge(idx + 1) {
            idx += 1;
        }
        counts[idx] += 1.0;
    }
    counts
}

// ─── Estimator ───────────────────────────────────────────────────────────────

/// Computes ∇S from a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntropyGradientEstimator {
    entropy: LocalEntropy,
    epsilon: f64,
}

impl EntropyGradientEstimator {
    /// Create an estimator with an explicit functional and bin smoothing constant.
    pub fn new(entropy: LocalEntropy, epsilon: f64) -> Self {
        Self { entropy, epsilon }
    }

    /// Create an estimator from the configured method, Rényi order and `epsilon`.
    pub fn from_config(config: &BoundaryConfig) -> Self {
        Self::new(LocalEntropy::from_config(config), config.epsilon)
    }

    /// Per-cell entropy of the surrounding window, same shape as `field`.
    pub fn local_entropy(&self, field: &ArrayViewD<'_, f64>) -> ArrayD<f64> {
        let offsets = window_offsets(field.ndim());
        let shape = field.shape().to_vec();
        let mut window = Vec::with_capacity(offsets.len());
        let mut coord = vec![0usize; field.ndim()];

        ArrayD::from_shape_fn(field.raw_dim(), |idx| {
            window.clear();
            for offset in &offsets {
                for (axis, &delta) in offset.iter().enumerate() {
                    let p = idx[axis] as isize + delta;
                    coord[axis] = p.clamp(0, shape[axis] as isize - 1) as usize;
                }
                window.push(field[IxDyn(&coord)]);
            }
            let mut hist = histogram(&window);
            for bin in hist.iter_mut() {
                *bin += self.epsilon;
            }
            self.entropy.evaluate(&hist)
        })
    }

    /// Entropy gradient ∇S as a fixed 3-vector.
    ///
    /// 1-D: `(mean ∂S, 0, 0)`. 2-D: `(mean ∂₀S, mean ∂₁S, 0)`.
    pub fn gradient(&self, field: &ArrayViewD<'_, f64>, _mask: &ArrayD<bool>) -> Result<[f64; 3]> {
        let ndim = field.ndim();
        if !(1..=2).contains(&ndim) {
            return Err(BindError::UnsupportedDimensionality { ndim });
        }

        let entropy = self.local_entropy(field);
        let mut out = [0.0; 3];
        for (axis, slot) in out.iter_mut().enumerate().take(ndim) {
            *slot = gradient_axis(&entropy.view(), axis).mean().unwrap_or(0.0);
        }
        trace!(gradient = ?out, "entropy gradient");
        Ok(out)
    }
}

/// All offsets of a centred [`ENTROPY_WINDOW`]-wide hypercube, last axis fastest.
fn window_offsets(ndim: usize) -> Vec<Vec<isize>> {
    let half = (ENTROPY_WINDOW / 2) as isize;
    let mut offsets = vec![Vec::with_capacity(ndim)];
    for _ in 0..ndim {
        offsets = offsets
            .into_iter()
            .flat_map(|prefix| {
                (-half..=half).map(move |d| {
                    let mut next = prefix.clone();
                    next.push(d);
                    next
                })
            })
            .collect();
    }
    offsets
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2};

    fn shannon() -> EntropyGradientEstimator {
        EntropyGradientEstimator::new(LocalEntropy::Shannon, 1e-10)
    }

    #[test]
    fn test_histogram_spans_min_max() {
        let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        // Edges 0,1,…,10; last bin holds 9 and 10.
        assert_eq!(h, [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_histogram_constant_window_lands_in_middle_bin() {
        let h = histogram(&[3.0; 25]);
        assert_eq!(h.iter().sum::<f64>(), 25.0);
        assert_eq!(h[5], 25.0);
    }

    #[test]
    fn test_histogram_two_values_fill_end_bins() {
        let h = histogram(&[0.0, 0.0, 0.0, 1.0, 1.0]);
        assert_eq!(h[0], 3.0);
        assert_eq!(h[9], 2.0);
    }

    #[test]
    fn test_shannon_of_uniform_distribution() {
        let e = LocalEntropy::Shannon.evaluate(&[1.0; 10]);
        assert_relative_eq!(e, 10f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_renyi_of_uniform_distribution_matches_shannon() {
        let e = LocalEntropy::Renyi { order: 2.0 }.evaluate(&[1.0; 10]);
        assert_relative_eq!(e, 10f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_renyi_order_two_is_collision_entropy() {
        let e = LocalEntropy::Renyi { order: 2.0 }.evaluate(&[3.0, 1.0]);
        assert_relative_eq!(e, -(0.75f64 * 0.75 + 0.25 * 0.25).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_window_offsets_count() {
        assert_eq!(window_offsets(1).len(), 5);
        assert_eq!(window_offsets(2).len(), 25);
        assert_eq!(window_offsets(2)[0], vec![-2, -2]);
        assert_eq!(window_offsets(2)[1], vec![-2, -1]);
    }

    #[test]
    fn test_local_entropy_of_constant_field_is_near_zero() {
        let field = Array2::<f64>::from_elem((8, 8), 1.0).into_dyn();
        let s = shannon().local_entropy(&field.view());
        assert!(s.iter().all(|&v| v >= 0.0 && v < 1e-6));
    }

    #[test]
    fn test_constant_field_has_zero_gradient() {
        let field = Array2::<f64>::from_elem((8, 8), 2.0).into_dyn();
        let mask = field.mapv(|_| false);
        let g = shannon().gradient(&field.view(), &mask).unwrap();
        assert_eq!(g, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_one_dimensional_gradient_pads_trailing_zeros() {
        let field = Array1::from_iter((0..30).map(|i| if i < 15 { 0.0 } else { 1.0 })).into_dyn();
        let mask = field.mapv(|_| false);
        let g = shannon().gradient(&field.view(), &mask).unwrap();
        assert_eq!(g[1], 0.0);
        assert_eq!(g[2], 0.0);
        assert!(g[0].is_finite());
    }

    #[test]
    fn test_rank_three_rejected() {
        let field = ArrayD::<f64>::zeros(IxDyn(&[3, 3, 3]));
        let mask = field.mapv(|_| false);
        let err = shannon().gradient(&field.view(), &mask).unwrap_err();
        assert!(matches!(err, BindError::UnsupportedDimensionality { ndim: 3 }));
    }

    #[test]
    fn test_entropy_peaks_at_step() {
        let field = Array1::from_iter((0..30).map(|i| if i < 15 { 0.0 } else { 1.0 })).into_dyn();
        let s = shannon().local_entropy(&field.view());
        assert!(s[IxDyn(&[14])] > s[IxDyn(&[5])]);
        assert!(s[IxDyn(&[15])] > s[IxDyn(&[25])]);
    }
}
