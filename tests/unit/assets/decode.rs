use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let frame = decode_frame_image(&buf).unwrap();
    assert_eq!(frame.width, 1);
    assert_eq!(frame.height, 1);
    assert_eq!(
        frame.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_frame_image(b"not an image").unwrap_err();
    assert!(matches!(err, ScrollreelError::Decode(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = load_frame_file(Path::new("definitely/not/here.webp")).unwrap_err();
    assert!(err.to_string().contains("definitely/not/here.webp"));
}

#[test]
fn from_premul_checks_buffer_length() {
    assert!(FrameImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(FrameImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(FrameImage::from_premul(0, 2, vec![]).is_err());
}

#[test]
fn unpremultiply_restores_opaque_and_half_alpha() {
    let mut px = vec![10u8, 20, 30, 255, 100, 50, 200, 128, 9, 9, 9, 0];
    let orig = px.clone();
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &orig[..4]);
    for (a, b) in px[4..7].iter().zip(&orig[4..7]) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
    }
    assert_eq!(&px[8..], &[0, 0, 0, 0]);
}
