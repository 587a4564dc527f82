//! Configuration persistence and state serialization.
//!
//! Files are written into a `tempfile::TempDir` that is removed on drop.

use bind_core::{
    Assessment, BoundaryConfig, BoundaryMethod, BoundaryMonitor, BoundaryState, Classification,
    ConfigError, EntropyMethod,
};
use ndarray::Array2;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn ramp(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| if j > n / 2 { 1.0 + 0.01 * i as f64 } else { 0.0 })
}

// ── Config files ─────────────────────────────────────────────────────────────

#[test]
fn test_round_trip_through_nested_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("bind.json");

    let config = BoundaryConfig {
        phi_critical: 3.1,
        boundary_detection_method: BoundaryMethod::Laplacian,
        entropy_calculation_method: EntropyMethod::Renyi,
        renyi_order: 0.5,
        hex_grid_size: 11,
        ..BoundaryConfig::default()
    };
    config.to_json(&path).unwrap();
    assert!(path.exists());

    let loaded = BoundaryConfig::from_json(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_saved_file_uses_lowercase_method_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bind.json");
    BoundaryConfig::default().to_json(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["boundary_detection_method"], "gradient");
    assert_eq!(value["entropy_calculation_method"], "shannon");
    assert_eq!(value["phi_critical"], 4.3);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    match BoundaryConfig::from_json(&path) {
        Err(ConfigError::NotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "phi_critical": 2.0, "boundary_detection_method": "laplacian" }"#)
        .unwrap();

    let config = BoundaryConfig::from_json(&path).unwrap();
    assert_eq!(config.phi_critical, 2.0);
    assert_eq!(config.boundary_detection_method, BoundaryMethod::Laplacian);
    assert_eq!(config.transformation_beta, 0.73);
}

#[test]
fn test_invalid_value_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{ "phi_critical": -1.0 }"#).unwrap();

    assert!(matches!(
        BoundaryConfig::from_json(&path),
        Err(ConfigError::Invalid { field: "phi_critical", .. })
    ));
}

#[test]
fn test_unknown_method_is_a_parse_error() {
    let err = BoundaryConfig::from_json_str(r#"{ "boundary_detection_method": "wavelet" }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    assert!(matches!(BoundaryConfig::from_json_str("{ not json"), Err(ConfigError::Parse(_))));
}

// ── State and classification records ─────────────────────────────────────────

#[test]
fn test_state_serializes_six_flat_keys() {
    let monitor = BoundaryMonitor::default();
    let state = monitor.analyze(&ramp(16)).unwrap();

    let value = serde_json::to_value(&state).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    for key in [
        "entropy_gradient",
        "normal_vector",
        "information_flux",
        "decoherence_rate",
        "phi_integrated",
        "timestamp",
    ] {
        assert!(keys.iter().any(|k| k == key), "missing {}", key);
    }
    assert_eq!(keys.len(), 6);
    assert_eq!(value["entropy_gradient"].as_array().unwrap().len(), 3);
}

#[test]
fn test_deserialized_state_renormalizes_normal() {
    let raw = r#"{
        "entropy_gradient": [0.0, 0.0, 0.0],
        "normal_vector": [3.0, 4.0, 0.0],
        "information_flux": 1.0,
        "decoherence_rate": 0.5,
        "phi_integrated": 0.1,
        "timestamp": 1700000000.0
    }"#;
    let state: BoundaryState = serde_json::from_str(raw).unwrap();
    let n = state.normal_vector();
    assert!((n[0] - 0.6).abs() < 1e-12);
    assert!((n[1] - 0.8).abs() < 1e-12);
}

#[test]
fn test_classification_serializes_snake_case_assessment() {
    let config = BoundaryConfig::default();
    let state = BoundaryState::new([0.0; 3], [1.0, 0.0, 0.0], 0.0, 2.0, 0.0, 0.0);
    let verdict = Classification::evaluate(&config, &state);
    assert_eq!(verdict.assessment, Assessment::CreativeState);

    let value = serde_json::to_value(verdict).unwrap();
    assert_eq!(value["assessment"], "creative_state");
    assert_eq!(value["creative_decoherence"], true);
    assert_eq!(value["transformation_probability"], 0.0);
}
