/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! Synthetic fields with known boundary structure, for demos and tests.
//!
//! Coordinates span `[-5, 5]` along every axis. Rows run along y (axis 0),
//! columns along x (axis 1).

use ndarray::{Array1, Array2, ArrayD};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::SimulatorError;

/// Standard deviation of the noise added to two-phase systems.
pub const TWO_PHASE_NOISE: f64 = 0.05;

/// Radius of the circular boundary in two-phase systems.
pub const TWO_PHASE_RADIUS: f64 = 2.5;

/// Generators for test fields. All randomness comes from the caller's `rng`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundarySimulator;

impl BoundarySimulator {
    /// Two phases separated by a sigmoid boundary of width `sharpness`.
    ///
    /// - 1-D: `1 / (1 + exp(−x / s))`, boundary at `x = 0`.
    /// - 2-D: `1 / (1 + exp(−(R − 2.5) / s))`, circular boundary around the origin.
    ///
    /// Gaussian noise with σ = [`TWO_PHASE_NOISE`] is added to every cell.
    pub fn two_phase_system<R: Rng + ?Sized>(
        shape: &[usize],
        sharpness: f64,
        rng: &mut R,
    ) -> Result<ArrayD<f64>, SimulatorError> {
        if !(sharpness.is_finite() && sharpness > 0.0) {
            return Err(SimulatorError::InvalidSharpness(sharpness));
        }
        check_shape(shape)?;
        let sigmoid = |d: f64| 1.0 / (1.0 + (-d / sharpness).exp());

        let clean = match shape {
            &[n] => linspace(n).mapv(sigmoid).into_dyn(),
            &[rows, cols] => {
                let (y, x) = (linspace(rows), linspace(cols));
                Array2::from_shape_fn((rows, cols), |(i, j)| {
                    let r = (x[j] * x[j] + y[i] * y[i]).sqrt();
                    sigmoid(r - TWO_PHASE_RADIUS)
                })
                .into_dyn()
            }
            _ => return Err(SimulatorError::UnsupportedShape(shape.len())),
        };
        add_noise(clean, TWO_PHASE_NOISE, rng)
    }

    /// A sequence of 2-D fields whose boundaries sharpen and multiply over time.
    ///
    /// Step `t` has organization `o = t / timesteps`: `1 + ⌊3o⌋` circular regions
    /// of radius 1.5 and width `0.5 − 0.4o` at random centres in `[-3, 3]²`,
    /// min-max normalized, plus noise with σ = `0.2 (1 − o)`.
    pub fn emergence_sequence<R: Rng + ?Sized>(
        timesteps: usize,
        shape: [usize; 2],
        rng: &mut R,
    ) -> Result<Vec<ArrayD<f64>>, SimulatorError> {
        check_shape(&shape)?;
        let [rows, cols] = shape;
        let (y, x) = (linspace(rows), linspace(cols));

        let mut states = Vec::with_capacity(timesteps);
        for t in 0..timesteps {
            let organization = t as f64 / timesteps as f64;
            let width = 0.5 - 0.4 * organization;
            let regions = 1 + (3.0 * organization) as usize;

            let mut data = Array2::<f64>::zeros((rows, cols));
            for _ in 0..regions {
                let cx = rng.gen_range(-3.0..3.0);
                let cy = rng.gen_range(-3.0..3.0);
                data.indexed_iter_mut().for_each(|((i, j), v)| {
                    let r = ((x[j] - cx).powi(2) + (y[i] - cy).powi(2)).sqrt();
                    *v += 1.0 / (1.0 + (-(r - 1.5) / width).exp());
                });
            }

            let (lo, hi) = data
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            data.mapv_inplace(|v| (v - lo) / (hi - lo + 1e-10));

            states.push(add_noise(data.into_dyn(), 0.2 * (1.0 - organization), rng)?);
        }
        Ok(states)
    }
}

fn check_shape(shape: &[usize]) -> Result<(), SimulatorError> {
    if !(1..=2).contains(&shape.len()) {
        return Err(SimulatorError::UnsupportedShape(shape.len()));
    }
    if shape.iter().any(|&n| n == 0) {
        return Err(SimulatorError::EmptyShape);
    }
    Ok(())
}

/// `n` evenly spaced samples over `[-5, 5]` (a single sample sits at −5).
fn linspace(n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from_elem(1, -5.0);
    }
    Array1::linspace(-5.0, 5.0, n)
}

fn add_noise<R: Rng + ?Sized>(
    mut data: ArrayD<f64>,
    std_dev: f64,
    rng: &mut R,
) -> Result<ArrayD<f64>, SimulatorError> {
    let noise = Normal::new(0.0, std_dev).map_err(|e| SimulatorError::Noise(e.to_string()))?;
    data.mapv_inplace(|v| v + noise.sample(rng));
    Ok(data)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
