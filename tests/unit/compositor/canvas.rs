use super::*;

fn solid(w: u32, h: u32, px: Rgba8) -> Image {
    Image::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn blank_canvas_is_fully_transparent() {
    let c = blank_canvas(3, 2);
    assert_eq!(c.dimensions(), (3, 2));
    assert!(c.as_raw().iter().all(|&v| v == 0));
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn over_half_alpha_on_opaque_blends() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 128]);
    assert_eq!(out[3], 255);
    for c in &out[..3] {
        assert!(c.abs_diff(128) <= 1, "{c}");
    }
}

#[test]
fn paste_clips_to_canvas_bounds() {
    let mut c = blank_canvas(4, 4);
    paste(&mut c, &solid(3, 3, [9, 9, 9, 255]), 2, -1);

    for y in 0..4 {
        for x in 0..4 {
            let inside = x >= 2 && y <= 1;
            let a = c.get_pixel(x, y).0[3];
            assert_eq!(a == 255, inside, "pixel ({x},{y})");
        }
    }
}

#[test]
fn paste_entirely_outside_is_noop() {
    let mut c = blank_canvas(4, 4);
    paste(&mut c, &solid(4, 4, [1, 2, 3, 255]), -4, 0);
    paste(&mut c, &solid(4, 4, [1, 2, 3, 255]), 0, 4);
    paste(&mut c, &solid(4, 4, [1, 2, 3, 255]), 100, -100);
    assert!(c.as_raw().iter().all(|&v| v == 0));
}

#[test]
fn center_offset_floors_negative_overflow() {
    assert_eq!(center_offset(10, 4), 3);
    assert_eq!(center_offset(10, 5), 2);
    assert_eq!(center_offset(80, 113), -17);
}

#[test]
fn paste_centered_crops_larger_source_evenly() {
    let mut c = blank_canvas(2, 2);
    let mut src = solid(4, 4, [0, 0, 0, 255]);
    src.put_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
    paste_centered(&mut c, &src);
    assert_eq!(c.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(c.get_pixel(1, 1).0, [0, 0, 0, 255]);
}

#[test]
fn with_opacity_scales_alpha_only() {
    let src = solid(2, 2, [50, 60, 70, 200]);
    let half = with_opacity(&src, 0.5);
    assert!(half.pixels().all(|p| p.0 == [50, 60, 70, 100]));

    let none = with_opacity(&src, 0.0);
    assert!(none.pixels().all(|p| p.0[3] == 0));

    assert_eq!(with_opacity(&src, 1.0), src);
}
