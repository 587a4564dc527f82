/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Separable numeric kernels over dense n-dimensional fields.
//!
//! All filters run one 1-D correlation per axis. Out-of-range samples use
//! symmetric reflection about the array edge:
//!
//! ```text
//!   d c b a | a b c d | d c b a
//! ```
//!
//! # Invariants
//!
//! - **FLT-001**: Output shape equals input shape for every filter.
//! - **FLT-002**: A constant field has exactly zero Laplacian and centred gradient, and
//!   an identical Gaussian-derivative response at every cell.
//! - **FLT-003**: Gaussian kernels are truncated at `round(4σ)` samples each side.

use ndarray::{ArrayD, ArrayViewD, Axis, Zip};

/// Gaussian kernels extend this many standard deviations each side.
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Map a possibly out-of-range index onto `[0, n)` by symmetric reflection.
fn reflect_index(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period);
    if m < n as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Correlate every lane along `axis` with `weights` (odd length, centred).
pub fn correlate_axis(input: &ArrayViewD<'_, f64>, axis: usize, weights: &[f64]) -> ArrayD<f64> {
    let mut out = ArrayD::<f64>::zeros(input.raw_dim());
    let radius = (weights.len() / 2) as isize;
    let n = input.len_of(Axis(axis));

    Zip::from(out.lanes_mut(Axis(axis)))
        .and(input.lanes(Axis(axis)))
        .for_each(|mut dst, src| {
            for c in 0..n {
                let mut acc = 0.0;
                for (k, w) in weights.iter().enumerate() {
                    let j = reflect_index(c as isize + k as isize - radius, n);
                    acc += w * src[j];
                }
                dst[c] = acc;
            }
        });
    out
}

/// Correlation weights of a sampled Gaussian (`order = 0`) or its first derivative (`order = 1`).
///
/// The derivative weights are `φ(j) · j / σ²`, so an increasing signal yields a
/// positive response.
pub fn gaussian_weights(sigma: f64, order: u8) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let sigma2 = sigma * sigma;
    let mut phi: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 / sigma2 * (x * x) as f64).exp())
        .collect();
    let total: f64 = phi.iter().sum();
    for p in phi.iter_mut() {
        *p /= total;
    }
    if order == 0 {
        return phi;
    }
    (-radius..=radius)
        .zip(phi)
        .map(|(x, p)| p * x as f64 / sigma2)
        .collect()
}

/// Gradient magnitude of the field smoothed by a Gaussian of width `sigma`.
///
/// For each axis the field is differentiated along that axis and smoothed along
/// all others; the per-axis responses combine as a Euclidean norm.
pub fn gaussian_gradient_magnitude(field: &ArrayViewD<'_, f64>, sigma: f64) -> ArrayD<f64> {
    let smooth = gaussian_weights(sigma, 0);
    let deriv = gaussian_weights(sigma, 1);
    let mut sum_sq = ArrayD::<f64>::zeros(field.raw_dim());

    for axis in 0..field.ndim() {
        let mut response = field.to_owned();
        for other in 0..field.ndim() {
            let weights = if other == axis { &deriv } else { &smooth };
            response = correlate_axis(&response.view(), other, weights);
        }
        Zip::from(&mut sum_sq).and(&response).for_each(|s, &r| *s += r * r);
    }
    sum_sq.mapv_into(f64::sqrt)
}

/// Discrete Laplacian: sum over axes of the `[1, -2, 1]` second difference.
pub fn laplace(field: &ArrayViewD<'_, f64>) -> ArrayD<f64> {
    let mut out = ArrayD::<f64>::zeros(field.raw_dim());
    for axis in 0..field.ndim() {
        out += &correlate_axis(field, axis, &[1.0, -2.0, 1.0]);
    }
    out
}

/// First derivative along `axis` with unit spacing.
///
/// Centred differences in the interior, one-sided differences at both ends.
/// An axis of length 1 has zero derivative.
pub fn gradient_axis(field: &ArrayViewD<'_, f64>, axis: usize) -> ArrayD<f64> {
    let mut out = ArrayD::<f64>::zeros(field.raw_dim());
    let n = field.len_of(Axis(axis));
    if n < 2 {
        return out;
    }

    Zip::from(out.lanes_mut(Axis(axis)))
        .and(field.lanes(Axis(axis)))
        .for_each(|mut dst, src| {
            dst[0] = src[1] - src[0];
            dst[n - 1] = src[n - 1] - src[n - 2];
            for i in 1..n - 1 {
                dst[i] = (src[i + 1] - src[i - 1]) / 2.0;
            }
        });
    out
}

/// The `q`-th percentile (0–100) with linear interpolation between order statistics.
///
/// Returns 0.0 for an empty input. NaNs sort last.
pub fn percentile<I>(values: I, q: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(f64::total_cmp);

    let pos = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);
    if frac >= 0.5 {
        b - (b - a) * (1.0 - frac)
    } else {
        a + (b - a) * frac
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, IxDyn};

    #[test]
    fn test_reflect_index_mirrors_edges() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(2, 4), 2);
        assert_eq!(reflect_index(-3, 1), 0);
    }

    #[test]
    fn test_gaussian_weights_sum_to_one() {
        let w = gaussian_weights(1.0, 0);
        assert_eq!(w.len(), 9);
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(w[4], w.iter().cloned().fold(f64::MIN, f64::max));
    }

    #[test]
    fn test_derivative_weights_antisymmetric() {
        let w = gaussian_weights(1.0, 1);
        assert_eq!(w.len(), 9);
        assert_relative_eq!(w[4], 0.0);
        for k in 0..4 {
            assert_relative_eq!(w[k], -w[8 - k], epsilon = 1e-15);
        }
        assert!(w[8] > 0.0);
    }

    #[test]
    fn test_derivative_of_ramp_is_one_in_interior() {
        let ramp = Array1::from_iter((0..20).map(|i| i as f64)).into_dyn();
        let d = correlate_axis(&ramp.view(), 0, &gaussian_weights(1.0, 1));
        // Σ φ(j)·j² = 1 for a Gaussian truncated at 4σ (to ~1e-3).
        assert_relative_eq!(d[IxDyn(&[10])], 1.0, epsilon = 2e-3);
    }

    #[test]
    fn test_laplace_of_spike() {
        let field = array![0.0, 0.0, 1.0, 0.0, 0.0].into_dyn();
        let lap = laplace(&field.view());
        assert_eq!(lap.as_slice().unwrap(), &[0.0, 1.0, -2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_laplace_2d_sums_axes() {
        let field = array![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]].into_dyn();
        let lap = laplace(&field.view());
        assert_relative_eq!(lap[IxDyn(&[1, 1])], -4.0);
        assert_relative_eq!(lap[IxDyn(&[0, 1])], 1.0);
    }

    #[test]
    fn test_gradient_axis_centred_and_one_sided() {
        let field = array![1.0, 2.0, 4.0, 7.0, 11.0].into_dyn();
        let g = gradient_axis(&field.view(), 0);
        assert_eq!(g.as_slice().unwrap(), &[1.0, 1.5, 2.5, 3.5, 4.0]);
    }

    #[test]
    fn test_gradient_axis_2d_per_axis() {
        let field = array![[1.0, 2.0, 6.0], [3.0, 5.0, 7.0]].into_dyn();
        let g0 = gradient_axis(&field.view(), 0);
        let g1 = gradient_axis(&field.view(), 1);
        assert_eq!(g0.as_slice().unwrap(), &[2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
        assert_eq!(g1.as_slice().unwrap(), &[1.0, 2.5, 4.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_gradient_single_cell_axis_is_zero() {
        let field = array![[1.0, 5.0, 9.0]].into_dyn();
        let g0 = gradient_axis(&field.view(), 0);
        assert!(g0.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_constant_field_has_zero_responses() {
        let field = ArrayD::<f64>::from_elem(IxDyn(&[6, 7]), 3.25);
        let mag = gaussian_gradient_magnitude(&field.view(), 1.0);
        let lap = laplace(&field.view());
        assert!(mag.iter().all(|&v| v.abs() < 1e-12));
        assert!(lap.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        // pos = 0.9 × 9 = 8.1 → 9 + 0.1 × 1
        assert_relative_eq!(percentile(v.clone(), 90.0), 9.1, epsilon = 1e-12);
        assert_relative_eq!(percentile(v.clone(), 50.0), 5.5, epsilon = 1e-12);
        assert_relative_eq!(percentile(v, 100.0), 10.0);
        assert_eq!(percentile(Vec::<f64>::new(), 90.0), 0.0);
    }
}
