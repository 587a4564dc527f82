/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Boundary orientation from the raw field gradient.

use ndarray::{ArrayD, ArrayViewD, Zip};
use tracing::trace;

use crate::error::{BindError, Result};
use crate::filters::gradient_axis;

/// Canonical axis returned when no orientation can be estimated.
pub const CANONICAL_NORMAL: [f64; 3] = [1.0, 0.0, 0.0];

/// Estimates a unit normal n̂ for the detected boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalEstimator {
    epsilon: f64,
}

impl NormalEstimator {
    /// `epsilon` is added to the magnitude before normalizing.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Normal vector averaged over masked cells.
    ///
    /// 1-D fields always return [`CANONICAL_NORMAL`]. For 2-D fields the
    /// per-axis gradient is averaged over the boundary and embedded as
    /// `(∂₁, ∂₀, 0) / (|∂| + ε)`. An empty mask also yields [`CANONICAL_NORMAL`].
    pub fn normal(&self, field: &ArrayViewD<'_, f64>, mask: &ArrayD<bool>) -> Result<[f64; 3]> {
        match field.ndim() {
            1 => return Ok(CANONICAL_NORMAL),
            2 => {}
            ndim => return Err(BindError::UnsupportedDimensionality { ndim }),
        }

        let grad_y = gradient_axis(field, 0);
        let grad_x = gradient_axis(field, 1);

        let mut count = 0usize;
        let (mut sum_x, mut sum_y) = (0.0, 0.0);
        Zip::from(mask)
            .and(&grad_x)
            .and(&grad_y)
            .for_each(|&on_boundary, &gx, &gy| {
                if on_boundary {
                    count += 1;
                    sum_x += gx;
                    sum_y += gy;
                }
            });

        if count == 0 {
            return Ok(CANONICAL_NORMAL);
        }

        let (avg_x, avg_y) = (sum_x / count as f64, sum_y / count as f64);
        let norm = (avg_x * avg_x + avg_y * avg_y).sqrt() + self.epsilon;
        let normal = [avg_x / norm, avg_y / norm, 0.0];
        trace!(?normal, boundary_cells = count, "normal estimate");
        Ok(normal)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, IxDyn};

    fn estimator() -> NormalEstimator {
        NormalEstimator::new(1e-10)
    }

    #[test]
    fn test_one_dimensional_field_uses_canonical_axis() {
        let field = Array1::from_iter((0..10).map(|i| i as f64)).into_dyn();
        let mask = field.mapv(|_| true);
        assert_eq!(estimator().normal(&field.view(), &mask).unwrap(), CANONICAL_NORMAL);
    }

    #[test]
    fn test_empty_mask_falls_back() {
        let field = Array2::from_shape_fn((6, 6), |(i, j)| (i + j) as f64).into_dyn();
        let mask = field.mapv(|_| false);
        assert_eq!(estimator().normal(&field.view(), &mask).unwrap(), CANONICAL_NORMAL);
    }

    #[test]
    fn test_column_ramp_points_along_x() {
        // Value grows along axis 1 (columns) only.
        let field = Array2::from_shape_fn((6, 6), |(_, j)| 2.0 * j as f64).into_dyn();
        let mask = field.mapv(|_| true);
        let n = estimator().normal(&field.view(), &mask).unwrap();
        assert_relative_eq!(n[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(n[1], 0.0, epsilon = 1e-12);
        assert_eq!(n[2], 0.0);
    }

    #[test]
    fn test_row_ramp_points_along_y() {
        let field = Array2::from_shape_fn((6, 6), |(i, _)| -(i as f64)).into_dyn();
        let mask = field.mapv(|_| true);
        let n = estimator().normal(&field.view(), &mask).unwrap();
        assert_relative_eq!(n[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(n[1], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_only_masked_cells_contribute() {
        let field = Array2::from_shape_fn((4, 4), |(i, j)| if j == 3 { 10.0 * i as f64 } else { 0.0 })
            .into_dyn();
        let mut mask = field.mapv(|_| false);
        mask[IxDyn(&[0, 0])] = true;
        let n = estimator().normal(&field.view(), &mask).unwrap();
        // Cell (0,0) sees no gradient at all.
        assert_eq!(n, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rank_three_rejected() {
        let field = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2]));
        let mask = field.mapv(|_| true);
        assert!(matches!(
            estimator().normal(&field.view(), &mask),
            Err(BindError::UnsupportedDimensionality { ndim: 3 })
        ));
    }
}
