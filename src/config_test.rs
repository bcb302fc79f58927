#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_are_valid() {
    assert!(ComposerConfig::default().validate().is_ok());
}

#[test]
fn empty_object_yields_defaults() {
    let cfg = ComposerConfig::from_json("{}").unwrap();
    assert_eq!(cfg, ComposerConfig::default());
}

#[test]
fn partial_object_overrides_only_named_fields() {
    let cfg = ComposerConfig::from_json(r##"{"snap_increment_deg": 45, "artboard_color": "#000"}"##).unwrap();
    assert_eq!(cfg.snap_increment_deg, 45.0);
    assert_eq!(cfg.artboard_color, Color::rgb(0, 0, 0));
    assert_eq!(cfg.settle_duration_ticks, ComposerConfig::default().settle_duration_ticks);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = ComposerConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn bad_color_is_parse_error() {
    let err = ComposerConfig::from_json(r#"{"background": "purple-ish"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn out_of_range_values_are_invalid() {
    let cases = [
        r#"{"artboard_aspect": 0}"#,
        r#"{"palette": []}"#,
        r#"{"text_contrast_min": 30}"#,
        r#"{"hold_smoothing": 0}"#,
        r#"{"hold_smoothing": 1.5}"#,
        r#"{"scale_min": 2, "scale_max": 1}"#,
        r#"{"size_min": -1}"#,
        r#"{"drift_speed_min": 0}"#,
        r#"{"export_scale": 0}"#,
        r#"{"click_tolerance_px": -3}"#,
    ];
    for json in cases {
        let err = ComposerConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{json}: {err}");
    }
}

#[test]
fn invalid_error_names_field() {
    let err = ComposerConfig::from_json(r#"{"scale_min": 2, "scale_max": 1}"#).unwrap_err();
    assert!(err.to_string().contains("scale_max"));
}

#[test]
fn derived_values() {
    let cfg = ComposerConfig::default();
    assert!((cfg.snap_increment() - 15f64.to_radians()).abs() < 1e-12);
    assert!((cfg.wheel_rotate_step() - 5f64.to_radians()).abs() < 1e-12);
    assert_eq!(cfg.settle(), Settle { duration: 45, amplitude: 0.05 });
}

#[test]
fn round_trips_through_json() {
    let cfg = ComposerConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(ComposerConfig::from_json(&json).unwrap(), cfg);
}
