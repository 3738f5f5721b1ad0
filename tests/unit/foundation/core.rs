use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));

    let c: Color = serde_json::from_value(json!("0000ff80")).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 128));
}

#[test]
fn parses_names_and_arrays() {
    let c: Color = serde_json::from_value(json!("White")).unwrap();
    assert_eq!(c, Color::WHITE);

    let c: Color = serde_json::from_value(json!([10, 20, 30])).unwrap();
    assert_eq!(c, Color::rgb(10, 20, 30));

    let c: Color = serde_json::from_value(json!([10, 20, 30, 40])).unwrap();
    assert_eq!(c, Color::rgba(10, 20, 30, 40));
}

#[test]
fn rejects_malformed_colors() {
    assert!(serde_json::from_value::<Color>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<Color>(json!("#gg0000")).is_err());
    assert!(serde_json::from_value::<Color>(json!([1, 2])).is_err());
    assert!(serde_json::from_value::<Color>(json!("chartreuse-ish")).is_err());
}

#[test]
fn display_roundtrips_through_parse() {
    let c = Color::rgba(1, 2, 254, 127);
    assert_eq!(Color::parse(&c.to_string()).unwrap(), c);
}

#[test]
fn premul_scales_channels_by_alpha() {
    assert_eq!(Color::WHITE.to_premul(), [255, 255, 255, 255]);
    assert_eq!(Color::rgba(255, 0, 0, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Color::rgba(200, 100, 0, 128).to_premul(), [100, 50, 0, 128]);
}

#[test]
fn anchor_uses_snake_case_names() {
    assert_eq!(serde_json::to_value(Anchor::Top).unwrap(), json!("top"));
    let a: Anchor = serde_json::from_value(json!("bottom")).unwrap();
    assert_eq!(a, Anchor::Bottom);
}
