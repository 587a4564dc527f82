//! Python FFI bindings via PyO3.
//!
//! Exposes the analysis engine to Python collaborators (for example the
//! multi-repository agent) through `analyze`, `classify` and `history` only.
//! Fields are passed as a flat list (1-D) or a list of equal-length rows (2-D).
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from bind_core import BoundaryConfig, BoundaryMonitor
//!
//! monitor = BoundaryMonitor(BoundaryConfig.from_json("config/bind.json"))
//! state = monitor.analyze([[0.0, 0.1, 0.9], [0.0, 0.2, 1.0], [0.1, 0.1, 0.9]])
//! print(state.information_flux, state.phi_integrated)
//! print(monitor.classify(state)["assessment"])
//! ```

use ndarray::{Array1, Array2};
use pyo3::exceptions::{PyFileNotFoundError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::BoundaryConfig as RustBoundaryConfig;
use crate::error::{BindError, ConfigError};
use crate::monitor::BoundaryMonitor as RustBoundaryMonitor;
use crate::state::BoundaryState as RustBoundaryState;

// ── Error mapping ────────────────────────────────────────────────────────────

fn config_err(e: ConfigError) -> PyErr {
    match e {
        ConfigError::NotFound { .. } => PyFileNotFoundError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn bind_err(e: BindError) -> PyErr {
    match e {
        BindError::Config(inner) => config_err(inner),
        other => PyValueError::new_err(other.to_string()),
    }
}

// ── Field input ──────────────────────────────────────────────────────────────

/// A Python field: list of rows (2-D) or flat list (1-D).
#[derive(FromPyObject)]
enum PyField {
    Grid(Vec<Vec<f64>>),
    Line(Vec<f64>),
}

fn grid_to_array(rows: Vec<Vec<f64>>) -> PyResult<Array2<f64>> {
    let width = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != width) {
        return Err(PyValueError::new_err("field rows must all have the same length"));
    }
    let height = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((height, width), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

// ── BoundaryConfig ───────────────────────────────────────────────────────────

/// Analysis parameters. `BoundaryConfig()` gives the defaults.
#[pyclass(name = "BoundaryConfig")]
#[derive(Clone)]
pub struct PyBoundaryConfig {
    inner: RustBoundaryConfig,
}

#[pymethods]
impl PyBoundaryConfig {
    /// Construct the default configuration.
    #[new]
    pub fn new() -> Self {
        Self { inner: RustBoundaryConfig::default() }
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Raises FileNotFoundError when the path does not exist and ValueError
    /// when a value is malformed or violates its constraint.
    #[staticmethod]
    pub fn from_json(path: &str) -> PyResult<Self> {
        RustBoundaryConfig::from_json(path).map(|inner| Self { inner }).map_err(config_err)
    }

    /// Save the configuration as JSON, creating parent directories.
    pub fn to_json(&self, path: &str) -> PyResult<()> {
        self.inner.to_json(path).map_err(config_err)
    }

    /// Raise ValueError on the first violated constraint.
    pub fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(config_err)
    }

    /// Φ threshold for a critical assessment.
    #[getter]
    pub fn phi_critical(&self) -> f64 {
        self.inner.phi_critical
    }
    /// Flux threshold for an imminent transformation.
    #[getter]
    pub fn high_flux_threshold(&self) -> f64 {
        self.inner.high_flux_threshold
    }
    /// Decoherence threshold for a creative state.
    #[getter]
    pub fn creative_decoherence_threshold(&self) -> f64 {
        self.inner.creative_decoherence_threshold
    }
    /// Decay rate of the transformation probability.
    #[getter]
    pub fn transformation_beta(&self) -> f64 {
        self.inner.transformation_beta
    }
    /// Boundary detection method name.
    #[getter]
    pub fn boundary_detection_method(&self) -> &'static str {
        self.inner.boundary_detection_method.as_str()
    }
    /// Entropy calculation method name.
    #[getter]
    pub fn entropy_calculation_method(&self) -> &'static str {
        self.inner.entropy_calculation_method.as_str()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "BoundaryConfig(phi_critical={}, boundary_detection_method='{}', entropy_calculation_method='{}')",
            self.inner.phi_critical,
            self.inner.boundary_detection_method,
            self.inner.entropy_calculation_method,
        )
    }
}

// ── BoundaryState ────────────────────────────────────────────────────────────

/// Boundary measurements from one analysis (read-only).
#[pyclass(name = "BoundaryState")]
#[derive(Clone)]
pub struct PyBoundaryState {
    inner: RustBoundaryState,
}

#[pymethods]
impl PyBoundaryState {
    /// Entropy gradient as [x, y, z].
    #[getter]
    pub fn entropy_gradient(&self) -> [f64; 3] {
        self.inner.entropy_gradient()
    }
    /// Unit boundary normal as [x, y, z].
    #[getter]
    pub fn normal_vector(&self) -> [f64; 3] {
        self.inner.normal_vector()
    }
    /// Information flux in bits/s.
    #[getter]
    pub fn information_flux(&self) -> f64 {
        self.inner.information_flux()
    }
    /// Dispersion of boundary values.
    #[getter]
    pub fn decoherence_rate(&self) -> f64 {
        self.inner.decoherence_rate()
    }
    /// Integrated information Φ in [0, 10].
    #[getter]
    pub fn phi_integrated(&self) -> f64 {
        self.inner.phi_integrated()
    }
    /// Capture time in Unix seconds.
    #[getter]
    pub fn timestamp(&self) -> f64 {
        self.inner.timestamp()
    }

    /// Flat dict with the six serialized keys.
    pub fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let d = PyDict::new_bound(py);
        d.set_item("entropy_gradient", self.inner.entropy_gradient().to_vec())?;
        d.set_item("normal_vector", self.inner.normal_vector().to_vec())?;
        d.set_item("information_flux", self.inner.information_flux())?;
        d.set_item("decoherence_rate", self.inner.decoherence_rate())?;
        d.set_item("phi_integrated", self.inner.phi_integrated())?;
        d.set_item("timestamp", self.inner.timestamp())?;
        Ok(d)
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "BoundaryState(information_flux={:.3e}, decoherence_rate={:.3}, phi_integrated={:.3})",
            self.inner.information_flux(),
            self.inner.decoherence_rate(),
            self.inner.phi_integrated(),
        )
    }
}

// ── BoundaryMonitor ──────────────────────────────────────────────────────────

/// Boundary-analysis engine with an append-only history.
///
/// Example::
///
///     monitor = BoundaryMonitor()
///     for frame in frames:
///         state = monitor.analyze(frame)
///         print(monitor.classify(state)["assessment"])
///     print(len(monitor))  # == len(frames)
#[pyclass(name = "BoundaryMonitor")]
pub struct PyBoundaryMonitor {
    inner: RustBoundaryMonitor,
}

#[pymethods]
impl PyBoundaryMonitor {
    /// Create a monitor. Raises ValueError if `config` is invalid.
    #[new]
    #[pyo3(signature = (config=None))]
    pub fn new(config: Option<&PyBoundaryConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.inner.clone()).unwrap_or_default();
        RustBoundaryMonitor::new(config).map(|inner| Self { inner }).map_err(bind_err)
    }

    /// Analyze a 1-D or 2-D field and record the resulting state.
    pub fn analyze(&self, field: PyField) -> PyResult<PyBoundaryState> {
        let result = match field {
            PyField::Grid(rows) => self.inner.analyze(&grid_to_array(rows)?),
            PyField::Line(values) => self.inner.analyze(&Array1::from_vec(values)),
        };
        result.map(|inner| PyBoundaryState { inner }).map_err(bind_err)
    }

    /// Classify a state against the configured thresholds.
    ///
    /// Returns a dict with `phi_above_critical`, `high_flux`,
    /// `creative_decoherence`, `transformation_probability` and `assessment`.
    pub fn classify<'py>(
        &self,
        py: Python<'py>,
        state: &PyBoundaryState,
    ) -> PyResult<Bound<'py, PyDict>> {
        let c = self.inner.classify(&state.inner);
        let d = PyDict::new_bound(py);
        d.set_item("phi_above_critical", c.phi_above_critical)?;
        d.set_item("high_flux", c.high_flux)?;
        d.set_item("creative_decoherence", c.creative_decoherence)?;
        d.set_item("transformation_probability", c.transformation_probability)?;
        d.set_item("assessment", c.assessment.label())?;
        Ok(d)
    }

    /// All recorded states, oldest first.
    pub fn history(&self) -> Vec<PyBoundaryState> {
        self.inner.history().into_iter().map(|inner| PyBoundaryState { inner }).collect()
    }

    /// Number of recorded states.
    pub fn __len__(&self) -> usize {
        self.inner.history_len()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("BoundaryMonitor(history={})", self.inner.history_len())
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// BIND: boundary information analysis Python bindings.
#[pymodule]
pub fn bind_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBoundaryConfig>()?;
    m.add_class::<PyBoundaryState>()?;
    m.add_class::<PyBoundaryMonitor>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
