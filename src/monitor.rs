/*
 * This source code is licensed under the MIT License.
 * See LICENSE in the root directory for full details.
 */

//! The boundary-analysis engine and its append-only history.
//!
//! # Pipeline
//!
//! ```text
//! field ─▶ BoundaryDetector ─▶ mask
//!            │                  │
//!            ├─▶ EntropyGradientEstimator(field, mask) ─▶ ∇S ─┐
//!            ├─▶ NormalEstimator(field, mask) ────────▶ n̂ ───┴▶ flux = |∇S · n̂|
//!            ├─▶ decoherence(field, mask)
//!            └─▶ phi(mask, flux, field size)
//!                              ─▶ BoundaryState ─▶ history
//! ```
//!
//! # Invariants
//!
//! - **MON-001**: Each successful [`BoundaryMonitor::analyze`] appends exactly one state.
//! - **MON-002**: A failed call leaves history unchanged.
//! - **MON-003**: History is never reordered, mutated or truncated.
//! - **MON-004**: The configuration is validated before the engine exists.

use std::sync::Arc;

use chrono::Utc;
use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::boundary::{boundary_count, BoundaryDetector};
use crate::config::BoundaryConfig;
use crate::entropy::EntropyGradientEstimator;
use crate::error::{BindError, Result};
use crate::metrics::{decoherence, phi};
use crate::normal::NormalEstimator;
use crate::phase::Classification;
use crate::state::BoundaryState;

/// Detects and characterizes information boundaries in dense fields.
///
/// `BoundaryMonitor` is `Send + Sync`; concurrent callers may share one instance.
/// Computation runs without holding any lock; only the history append is serialized.
#[derive(Debug)]
pub struct BoundaryMonitor {
    config: Arc<BoundaryConfig>,
    detector: BoundaryDetector,
    entropy: EntropyGradientEstimator,
    normal: NormalEstimator,
    history: RwLock<Vec<BoundaryState>>,
}

impl BoundaryMonitor {
    /// Create an engine from a configuration, validating it first.
    pub fn new(config: BoundaryConfig) -> Result<Self> {
        Self::with_shared_config(Arc::new(config))
    }

    /// Create an engine that shares `config` with other components.
    pub fn with_shared_config(config: Arc<BoundaryConfig>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: Arc<BoundaryConfig>) -> Self {
        Self {
            detector: BoundaryDetector::new(config.boundary_detection_method),
            entropy: EntropyGradientEstimator::from_config(&config),
            normal: NormalEstimator::new(config.epsilon),
            history: RwLock::new(Vec::new()),
            config,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Boundary mask of `field` under the configured detector.
    pub fn detect<S, D>(&self, field: &ArrayBase<S, D>) -> ArrayD<bool>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        self.detector.detect(&field.view().into_dyn())
    }

    /// Analyze one field of rank 1 or 2 and append the resulting state to history.
    pub fn analyze<S, D>(&self, field: &ArrayBase<S, D>) -> Result<BoundaryState>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let field = field.view().into_dyn();
        let ndim = field.ndim();
        if !(1..=2).contains(&ndim) {
            warn!(ndim, "rejected field of unsupported rank");
            return Err(BindError::UnsupportedDimensionality { ndim });
        }
        if field.is_empty() {
            warn!(shape = ?field.shape(), "rejected empty field");
            return Err(BindError::EmptyField);
        }

        let mask = self.detector.detect(&field);
        let entropy_gradient = self.entropy.gradient(&field, &mask)?;
        let normal = self.normal.normal(&field, &mask)?;

        let information_flux = entropy_gradient
            .iter()
            .zip(normal.iter())
            .map(|(g, n)| g * n)
            .sum::<f64>()
            .abs();
        let decoherence_rate = decoherence(&field, &mask);
        let phi_integrated =
            phi(&mask, information_flux, field.len(), self.config.phi_normalization);

        let state = BoundaryState::captured(
            entropy_gradient,
            normal,
            information_flux,
            decoherence_rate,
            phi_integrated,
            Utc::now(),
        );

        debug!(
            shape = ?field.shape(),
            boundary_cells = boundary_count(&mask),
            information_flux,
            decoherence_rate,
            phi_integrated,
            "analyzed field"
        );

        self.history.write().push(state.clone());
        Ok(state)
    }

    /// Analyze fields in order, stopping at the first failure.
    ///
    /// States appended before the failure stay in history.
    pub fn analyze_sequence<'a, I, S, D>(&self, fields: I) -> Result<Vec<BoundaryState>>
    where
        I: IntoIterator<Item = &'a ArrayBase<S, D>>,
        S: Data<Elem = f64> + 'a,
        D: Dimension + 'a,
    {
        fields.into_iter().map(|field| self.analyze(field)).collect()
    }

    /// Threshold classification of `state` under this engine's configuration.
    pub fn classify(&self, state: &BoundaryState) -> Classification {
        Classification::evaluate(&self.config, state)
    }

    /// Snapshot of every recorded state, oldest first.
    pub fn history(&self) -> Vec<BoundaryState> {
        self.history.read().clone()
    }

    /// Number of recorded states.
    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    /// Most recently recorded state.
    pub fn latest(&self) -> Option<BoundaryState> {
        self.history.read().last().cloned()
    }
}

impl Default for BoundaryMonitor {
    fn default() -> Self {
        Self::assemble(Arc::new(BoundaryConfig::default()))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
