use super::*;

#[test]
fn empty_document_yields_defaults() {
    let cfg = IndicatorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, IndicatorConfig::default());
    assert_eq!(cfg.style.radius, 20.0);
    assert_eq!(cfg.style.line_width, 2.0);
    assert_eq!(cfg.style.stroke_color, Rgba8::RED);
    assert_eq!(cfg.style.background, Rgba8::WHITE);
    assert_eq!(cfg.reveal.duration().unwrap(), Duration::from_secs(1));
    assert_eq!(cfg.reveal.ease, Ease::EaseInEaseOut);
}

#[test]
fn partial_document_overrides_fields() {
    let cfg = IndicatorConfig::from_json_str(
        r##"{"style": {"radius": 32, "stroke_color": "#00ff00"}, "reveal": {"ease": "linear"}}"##,
    )
    .unwrap();
    assert_eq!(cfg.style.radius, 32.0);
    assert_eq!(cfg.style.line_width, 2.0);
    assert_eq!(cfg.style.stroke_color, Rgba8::rgba(0, 255, 0, 255));
    assert_eq!(cfg.reveal.ease, Ease::Linear);
    assert_eq!(cfg.reveal.duration_secs, 1.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = IndicatorConfig::from_json_str(r##"{"style": {"colour": "#fff"}}"##).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn out_of_range_values_fail_validation() {
    for doc in [
        r#"{"style": {"radius": 0}}"#,
        r#"{"style": {"radius": -3}}"#,
        r#"{"style": {"line_width": -1}}"#,
        r#"{"reveal": {"duration_secs": 0}}"#,
        r#"{"reveal": {"duration_secs": -0.5}}"#,
        r#"{"reveal": {"duration_secs": 1e300}}"#,
    ] {
        let err = IndicatorConfig::from_json_str(doc).unwrap_err();
        assert!(err.to_string().contains("validation error:"), "{doc}: {err}");
    }
}

#[test]
fn json_roundtrip_through_a_file() {
    let mut cfg = IndicatorConfig::default();
    cfg.reveal.duration_secs = 0.25;
    cfg.style.background = Rgba8::rgba(10, 20, 30, 255);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indicator.json");
    std::fs::write(&path, cfg.to_json_pretty().unwrap()).unwrap();

    let back = IndicatorConfig::from_json_path(&path).unwrap();
    assert_eq!(back, cfg);
    assert_eq!(back.reveal.duration().unwrap(), Duration::from_millis(250));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = IndicatorConfig::from_json_path(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, RevealError::Io(_)));
}
