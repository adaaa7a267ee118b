use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#ff0000"), Some(Color::rgb(255, 0, 0)));
    assert_eq!(Color::parse("#999"), Some(Color::rgb(0x99, 0x99, 0x99)));
    assert_eq!(
        Color::parse("#797878ff"),
        Some(Color::rgba(0x79, 0x78, 0x78, 0xff))
    );
    assert_eq!(Color::parse("#12345"), None);
    assert_eq!(Color::parse("#gg0000"), None);
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        Color::parse("rgba(29, 230, 76, 1)"),
        Some(Color::rgb(29, 230, 76))
    );
    let c = Color::parse("rgba(0,0,0,0.08)").unwrap();
    assert_eq!((c.r, c.g, c.b), (0, 0, 0));
    assert_eq!(c.a, 20);
    let red = Color::parse("hsl(0, 100%, 50%)").unwrap();
    assert_eq!(red, Color::rgb(255, 0, 0));
}

#[test]
fn parses_names_case_insensitively() {
    assert_eq!(Color::parse("White"), Some(Color::WHITE));
    assert_eq!(Color::parse("grey"), Color::parse("gray"));
    assert_eq!(Color::parse("not-a-colour"), None);
}

#[test]
fn css_output_round_trips_through_parse() {
    let c = Color::rgb_alpha(10, 20, 30, 0.5);
    assert!(c.to_css().starts_with("rgba(10,20,30,"));
    assert_eq!(Color::rgb(255, 107, 107).to_css(), "#ff6b6b");
}

#[test]
fn serde_accepts_strings_and_arrays() {
    let c: Color = serde_json::from_value(json!("#4ecdc4")).unwrap();
    assert_eq!(c, Color::rgb(0x4e, 0xcd, 0xc4));
    let c: Color = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));
    assert!(serde_json::from_value::<Color>(json!("nope")).is_err());
    assert_eq!(serde_json::to_value(Color::WHITE).unwrap(), json!("#ffffff"));
}

#[test]
fn contrasting_text_picks_readable_ink() {
    assert_eq!(Color::rgb(255, 230, 109).contrasting_text(), Color::INK);
    assert_eq!(Color::rgb(20, 20, 80).contrasting_text(), Color::WHITE);
    assert_eq!(Color::WHITE.contrasting_text(), Color::INK);
    assert_eq!(Color::BLACK.contrasting_text(), Color::WHITE);
}

#[test]
fn hsl_grey_when_unsaturated() {
    assert_eq!(Color::from_hsl(200.0, 0.0, 0.5), Color::rgb(128, 128, 128));
}
