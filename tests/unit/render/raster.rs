use super::*;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
<rect x="0" y="0" width="2" height="2" fill="#ff0000"/>
<rect x="2" y="0" width="2" height="2" fill="#000000" fill-opacity="0.5"/>
</svg>"##;

#[test]
fn rasterizes_at_intrinsic_size_with_straight_alpha() {
    let frame = rasterize_svg(RED_SQUARE, &RasterOptions::default()).unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    let half = frame.pixel(3, 1).unwrap();
    assert_eq!(&half[..3], &[0, 0, 0]);
    assert!((126..=129).contains(&half[3]));
    assert_eq!(frame.pixel(4, 0), None);
}

#[test]
fn invalid_svg_is_an_error() {
    assert!(rasterize_svg("<svg", &RasterOptions::default()).is_err());
}

#[test]
fn demultiply_restores_straight_colour() {
    let mut px = [64u8, 0, 0, 128, 10, 20, 30, 0];
    demultiply(&mut px);
    assert_eq!(px[0], 128);
    assert_eq!(&px[4..], &[10, 20, 30, 0]);
}

#[test]
fn write_png_round_trips_dimensions() {
    let dir = std::env::temp_dir().join(format!(
        "planviz_raster_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.png");

    let frame = RasterFrame {
        width: 3,
        height: 2,
        data: vec![200; 3 * 2 * 4],
    };
    frame.write_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    let _ = std::fs::remove_dir_all(&dir);
}
