use super::*;

#[test]
fn frame_index_next_increments() {
    assert_eq!(FrameIndex(0).next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 70_000).is_err());
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!(c.rgba_len(), 48);
}

#[test]
fn bounding_box_from_origin_extent() {
    let b = BoundingBox::from_origin_extent([100.0, 200.0], [50.0, 20.0]).unwrap();
    assert_eq!(b.x_max, 150.0);
    assert_eq!(b.y_max, 220.0);
    assert!(b.contains(Point::new(120.0, 210.0)));
    assert!(!b.contains(Point::new(99.0, 210.0)));
    assert!(BoundingBox::from_origin_extent([0.0, 0.0], [0.0, 1.0]).is_err());
}

#[test]
fn to_pixels_flips_northing() {
    let b = BoundingBox::from_origin_extent([0.0, 0.0], [100.0, 100.0]).unwrap();
    let t = b.to_pixels(200.0, 200.0);
    let lower_left = t * Point::new(0.0, 0.0);
    let upper_right = t * Point::new(100.0, 100.0);
    assert!((lower_left.x - 0.0).abs() < 1e-9);
    assert!((lower_left.y - 200.0).abs() < 1e-9);
    assert!((upper_right.x - 200.0).abs() < 1e-9);
    assert!((upper_right.y - 0.0).abs() < 1e-9);
}

#[test]
fn to_pixels_centers_on_aspect_mismatch() {
    let b = BoundingBox::from_origin_extent([0.0, 0.0], [100.0, 50.0]).unwrap();
    let t = b.to_pixels(100.0, 100.0);
    let top_left = t * Point::new(0.0, 50.0);
    assert!((top_left.y - 25.0).abs() < 1e-9);
}

#[test]
fn premul_and_lerp() {
    let c = Rgba8Premul::from_straight_rgba(255, 0, 0, 128);
    assert_eq!(c, Rgba8Premul { r: 128, g: 0, b: 0, a: 128 });

    let a = Rgba8Premul::opaque(0, 0, 0);
    let b = Rgba8Premul::opaque(200, 100, 50);
    assert_eq!(a.lerp(b, 0.5), Rgba8Premul::opaque(100, 50, 25));
    assert_eq!(a.lerp(b, 2.0), b);
}
