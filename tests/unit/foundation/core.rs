use super::*;

#[test]
fn hex_parses_with_and_without_alpha() {
    assert_eq!(Rgba8::parse_hex("#ff0000").unwrap(), Rgba8::RED);
    assert_eq!(
        Rgba8::parse_hex("FFFFFF80").unwrap(),
        Rgba8::rgba(255, 255, 255, 128)
    );
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
}

#[test]
fn color_serde_uses_hex_and_accepts_arrays() {
    let json = serde_json::to_string(&Rgba8::RED).unwrap();
    assert_eq!(json, "\"#ff0000ff\"");

    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 255));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
}

#[test]
fn fps_rejects_zero_and_covers_durations() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());

    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_to_cover(1.0), 30);
    assert_eq!(fps.frames_to_cover(0.01), 1);
    assert!((fps.frame_duration().as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
}
