use std::path::PathBuf;

use super::*;
use crate::render::ops::{DrawCmd, Recorder};
use crate::foundation::core::Size;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "planviz_assets_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32) {
    image::save_buffer_with_format(
        path,
        &vec![90u8; (w * h * 4) as usize],
        w,
        h,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();
}

#[test]
fn placeholders_only_never_loads() {
    let assets = AssetManager::placeholders_only();
    assert_eq!(assets.load_blocking(), 0);
    for kind in AssetKind::ALL {
        assert!(!assets.is_loaded(kind));
        assert!(assets.image(kind).is_none());
    }
}

#[test]
fn load_blocking_fills_present_files_and_skips_broken_ones() {
    let dir = temp_dir("blocking");
    write_png(&dir.join("robot.png"), 4, 3);
    std::fs::write(dir.join("truck.png"), b"definitely not a png").unwrap();

    let assets = AssetManager::new(Some(dir.clone()));
    assert_eq!(assets.load_blocking(), 1);

    let robot = assets.image(AssetKind::Robot).unwrap();
    assert_eq!((robot.width, robot.height), (4, 3));
    assert!(robot.path.is_absolute());
    assert!(!assets.is_loaded(AssetKind::Truck));
    assert!(!assets.is_loaded(AssetKind::Camera));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn background_loader_shares_slots_with_clones() {
    let dir = temp_dir("spawn");
    write_png(&dir.join("rover.png"), 2, 2);
    write_png(&dir.join("camera.png"), 1, 1);

    let assets = AssetManager::new(Some(dir.clone()));
    let view = assets.clone();
    let loaded = assets.spawn_loader().join().unwrap();
    assert_eq!(loaded, 2);
    assert!(view.is_loaded(AssetKind::Rover));
    assert!(view.is_loaded(AssetKind::Camera));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn insert_is_first_write_wins() {
    let assets = AssetManager::placeholders_only();
    let first = ImageRef {
        kind: AssetKind::Package,
        path: "/a/package.png".into(),
        width: 10,
        height: 10,
    };
    assets.insert(first.clone());
    assets.insert(ImageRef {
        path: "/b/package.png".into(),
        ..first.clone()
    });
    assert_eq!(assets.image(AssetKind::Package), Some(&first));
}

#[test]
fn draw_asset_falls_back_to_placeholder_colour() {
    let rect = Rect::new(0.0, 0.0, 40.0, 30.0);
    let assets = AssetManager::placeholders_only();

    let mut rec = Recorder::new(Size::new(100.0, 100.0));
    draw_asset(&mut rec, &assets, AssetKind::Truck, rect);
    assert_eq!(rec.fills_of(AssetKind::Truck.placeholder()).len(), 1);
    assert!(rec.images(AssetKind::Truck).is_empty());

    assets.insert(ImageRef {
        kind: AssetKind::Truck,
        path: "/x/truck.png".into(),
        width: 8,
        height: 8,
    });
    let mut rec = Recorder::new(Size::new(100.0, 100.0));
    draw_asset(&mut rec, &assets, AssetKind::Truck, rect);
    assert_eq!(
        rec.commands(),
        &[DrawCmd::Image {
            asset: AssetKind::Truck,
            rect
        }]
    );
}
