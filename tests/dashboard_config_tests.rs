use sheet_charts::DashboardError;
use sheet_charts::api::{DEFAULT_PALETTE, DashboardConfig};
use sheet_charts::core::DecimationAlgorithm;
use sheet_charts::interaction::ZoomBehavior;
use sheet_charts::render::DecimationOptions;

#[test]
fn defaults_describe_the_shared_sheet() {
    let config = DashboardConfig::default();
    assert!(config.sheet_url.ends_with("output=csv"));
    assert_eq!(config.time_column, "H");
    assert_eq!(config.value_columns, vec!["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(config.date_format, "%Y-%m-%d %H:%M:%S");
    assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
    assert_eq!(config.chart_height_px, 400);
    assert!(config.validate().is_ok());
    assert_eq!(config.palette_colors().expect("palette").len(), 7);
}

#[test]
fn empty_json_document_uses_defaults() {
    let config = DashboardConfig::from_json_str("{}").expect("empty config");
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn json_round_trip_keeps_overrides() {
    let config = DashboardConfig::default()
        .with_sheet_url("https://example.invalid/export.csv")
        .with_time_column("Timestamp")
        .with_value_columns(["Temp", "Humidity"])
        .with_chart_size(1024, 300)
        .with_zoom(ZoomBehavior { wheel_speed: 0.25 })
        .with_decimation(DecimationOptions {
            enabled: false,
            algorithm: DecimationAlgorithm::Lttb,
            samples: Some(200),
        });

    let json = config.to_json_pretty().expect("serialize");
    let parsed = DashboardConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn partial_json_overrides_selected_fields() {
    let config = DashboardConfig::from_json_str(r#"{"value_columns": ["B"], "zoom": {"wheel_speed": 0.5}}"#)
        .expect("partial config");
    assert_eq!(config.value_columns, vec!["B"]);
    assert!((config.zoom.wheel_speed - 0.5).abs() <= f64::EPSILON);
    assert_eq!(config.time_column, "H");
}

#[test]
fn invalid_documents_are_config_errors() {
    let cases = [
        r#"{"palette": ["hsl(0, 100%, 50%)"]}"#,
        r#"{"palette": []}"#,
        r#"{"time_column": ""}"#,
        r#"{"value_columns": ["A", "H"]}"#,
        r#"{"chart_height_px": 0}"#,
        r#"{"zoom": {"wheel_speed": -1.0}}"#,
        r#"{"decimation": {"enabled": true, "algorithm": "Lttb", "samples": 2}}"#,
        r#"{"sheet_url": 5}"#,
    ];
    for case in cases {
        assert!(
            matches!(DashboardConfig::from_json_str(case), Err(DashboardError::InvalidConfig(_))),
            "expected config error for {case}"
        );
    }
}
