use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions() {
    let img = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 128]).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let info = decode_image(&buf).unwrap();
    assert_eq!(
        info,
        ImageInfo {
            width: 2,
            height: 1
        }
    );
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}
