//! # bind-core
//!
//! Boundary Information Neural Dynamics: information-theoretic descriptors of
//! boundaries in spatial data fields.
//!
//! ---
//!
//! ## What it computes
//!
//! Given a dense numeric field of rank 1 or 2, the engine finds the cells where
//! the field changes fastest (the *boundary*) and reduces what happens there to
//! a handful of numbers.
//!
//! **Entropy gradient ∇S**: every cell is scored by the entropy of its local
//! 5-cell window; the spatial gradient of that entropy landscape, averaged per
//! axis, says which way disorder increases.
//!
//! **Boundary normal n̂**: the raw field gradient averaged over boundary cells
//! gives the boundary's orientation.
//!
//! **Information flux** `|∇S · n̂|`, **decoherence rate** (dispersion of boundary
//! values) and **integrated information Φ** (flux weighted by boundary coverage
//! and field size, clamped to [0, 10]) complete the [`BoundaryState`].
//!
//! A [`Classification`] then compares the state against configured thresholds.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! field → BoundaryDetector → mask ─┬→ EntropyGradientEstimator → ∇S ┐
//!                                  ├→ NormalEstimator → n̂ ─────────┴→ flux
//!                                  ├→ decoherence
//!                                  └→ phi(mask, flux, size)
//!                                          ↓
//!                                    BoundaryState → history
//!                                          ↓
//!                                    Classification
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`config`] | [`BoundaryConfig`], [`BoundaryMethod`], [`EntropyMethod`] | Parameters, validation, JSON load/save |
//! | [`state`] | [`BoundaryState`] | Immutable result of one analysis |
//! | [`filters`] | — | Gaussian derivative, Laplacian, centred differences, percentile |
//! | [`boundary`] | [`BoundaryDetector`] | Boundary mask from gradient or Laplacian response |
//! | [`entropy`] | [`EntropyGradientEstimator`], [`LocalEntropy`] | Windowed Shannon / Rényi entropy and its gradient |
//! | [`normal`] | [`NormalEstimator`] | Boundary orientation |
//! | [`metrics`] | — | Decoherence and Φ reductions |
//! | [`phase`] | [`Classification`], [`Assessment`] | Threshold classifier |
//! | [`monitor`] | [`BoundaryMonitor`] | Orchestration and append-only history |
//! | [`simulator`] | [`BoundarySimulator`] | Synthetic two-phase and emergence fields |
//!
//! ## Example
//!
//! ```rust
//! use bind_core::{BoundaryMonitor, BoundarySimulator};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let field = BoundarySimulator::two_phase_system(&[64, 64], 0.1, &mut rng).unwrap();
//!
//! let monitor = BoundaryMonitor::default();
//! let state = monitor.analyze(&field).unwrap();
//! let verdict = monitor.classify(&state);
//!
//! assert!((0.0..=10.0).contains(&state.phi_integrated()));
//! assert_eq!(monitor.history_len(), 1);
//! println!("{}", verdict.assessment);
//! ```
//!
//! ## Python
//!
//! Enable the `python-ffi` feature to build the `bind_core` extension module.
//!
//! ## License
//!
//! MIT.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod boundary;
pub mod config;
pub mod entropy;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod monitor;
pub mod normal;
pub mod phase;
pub mod simulator;
pub mod state;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use boundary::BoundaryDetector;
pub use config::{BoundaryConfig, BoundaryMethod, EntropyMethod};
pub use entropy::{EntropyGradientEstimator, LocalEntropy};
pub use error::{BindError, ConfigError, Result, SimulatorError};
pub use monitor::BoundaryMonitor;
pub use normal::NormalEstimator;
pub use phase::{Assessment, Classification};
pub use simulator::BoundarySimulator;
pub use state::BoundaryState;
