use super::*;

fn temp_file(name: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "planviz_config_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let cfg = RenderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.background, Color::rgb(0xf8, 0xf9, 0xfa));
    assert_eq!(cfg.effects.camera_flash_ms, 1000);
    assert_eq!(cfg.effects.capture_marker, "(take-image");
    assert_eq!(cfg.depot.max_visible_packages, 3);
}

#[test]
fn partial_json_keeps_section_defaults() {
    let cfg: RenderConfig = serde_json::from_str(
        r##"{ "canvas": { "width": 1024 }, "background": "#ffffff", "depot": { "min_cols": 4 } }"##,
    )
    .unwrap();
    assert_eq!(cfg.canvas.width, 1024);
    assert_eq!(cfg.canvas.height, 600);
    assert_eq!(cfg.background, Color::WHITE);
    assert_eq!(cfg.depot.min_cols, 4);
    assert_eq!(cfg.depot.min_rows, 5);
    assert_eq!(cfg.viewport, ViewportConfig::default());
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut cfg = RenderConfig::default();
    cfg.canvas.height = 0;
    assert!(matches!(cfg.validate(), Err(PlanvizError::Validation(_))));

    let mut cfg = RenderConfig::default();
    cfg.viewport.min_scale = 6.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.viewport.zoom_step = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.effects.capture_marker.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.rovers.cell_step_y = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.rovers.cell_step_x = MAX_CELL_STEP + 1;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.depot.min_cols = MAX_GRID_CELLS + 1;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_json_file_validates() {
    let ok = temp_file("ok.json", r#"{ "gripper": { "robot_offset_y": 40 } }"#);
    let cfg = RenderConfig::from_json_file(&ok).unwrap();
    assert_eq!(cfg.gripper.robot_offset_y, 40.0);

    let bad = temp_file("bad.json", r#"{ "canvas": { "width": 0, "height": 10 } }"#);
    assert!(RenderConfig::from_json_file(&bad).is_err());

    let broken = temp_file("broken.json", "{ nope");
    assert!(matches!(
        RenderConfig::from_json_file(&broken),
        Err(PlanvizError::Serde(_))
    ));

    assert!(RenderConfig::from_json_file(Path::new("/definitely/missing.json")).is_err());
}

#[test]
fn asset_dir_comes_from_config_without_override() {
    if std::env::var_os(ASSET_DIR_ENV).is_some() {
        return;
    }
    let cfg = AssetConfig {
        dir: Some(PathBuf::from("/srv/assets")),
    };
    assert_eq!(cfg.resolved_dir(), Some(PathBuf::from("/srv/assets")));
    assert_eq!(AssetConfig::default().resolved_dir(), None);
}
