use image::imageops::{self, FilterType};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::foundation::core::Image;
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Pixel size of `width x height` scaled by `scale`, truncated toward zero.
///
/// May return zero extents; [`resize`] turns those into a transparent 1x1 patch.
pub fn scaled_dims(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    let w = (f64::from(width) * scale) as u32;
    let h = (f64::from(height) * scale) as u32;
    (w, h)
}

/// Resample `src` to `new_width x new_height` with a Catmull-Rom (bicubic) filter.
///
/// Filtering happens on premultiplied pixels so transparent texels do not bleed colour into the
/// edges. A zero-sized target yields a single fully transparent pixel.
pub fn resize(src: &Image, new_width: u32, new_height: u32) -> Image {
    if new_width == 0 || new_height == 0 {
        return Image::new(1, 1);
    }
    if src.dimensions() == (new_width, new_height) {
        return src.clone();
    }

    let mut premul = src.clone();
    premultiply_rgba8_in_place(&mut premul);
    let mut out = imageops::resize(&premul, new_width, new_height, FilterType::CatmullRom);
    unpremultiply_rgba8_in_place(&mut out);
    out
}

/// Rotate `src` counter-clockwise by `degrees` about its centre.
///
/// With `expand` the output grows to the bounding box of the rotated image; otherwise it keeps
/// the input size and the rotated corners are clipped. Uncovered pixels are transparent.
pub fn rotate(src: &Image, degrees: f64, expand: bool) -> Image {
    let (w, h) = src.dimensions();
    if !degrees.is_finite() || degrees.rem_euclid(360.0) == 0.0 || w == 0 || h == 0 {
        return src.clone();
    }

    let theta = degrees.to_radians();
    let (out_w, out_h) = if expand {
        rotated_bounds(w, h, theta)
    } else {
        (w, h)
    };

    // Output pixel centres map back into source space: screen-space counter-clockwise rotation
    // with y pointing down is kurbo's `rotate(-theta)`, so the inverse is `rotate(theta)`.
    let inverse = Affine::translate(Vec2::new(f64::from(w) / 2.0, f64::from(h) / 2.0))
        * Affine::rotate(theta)
        * Affine::translate(Vec2::new(
            -f64::from(out_w) / 2.0,
            -f64::from(out_h) / 2.0,
        ));

    let mut premul = src.clone();
    premultiply_rgba8_in_place(&mut premul);

    let mut out = Image::new(out_w, out_h);
    for (ox, oy, px) in out.enumerate_pixels_mut() {
        let p = inverse * Point::new(f64::from(ox) + 0.5, f64::from(oy) + 0.5);
        px.0 = sample_bilinear(&premul, p.x - 0.5, p.y - 0.5);
    }
    unpremultiply_rgba8_in_place(&mut out);
    out
}

fn rotated_bounds(w: u32, h: u32, theta: f64) -> (u32, u32) {
    let rect = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
    let bbox = Affine::rotate(-theta).transform_rect_bbox(rect);
    // Trig noise at right angles must not add a pixel row.
    let snap = |v: f64| ((v - 1e-6).ceil().max(1.0)) as u32;
    (snap(bbox.width()), snap(bbox.height()))
}

fn sample_bilinear(premul: &Image, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (i64::from(premul.width()), i64::from(premul.height()));
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    if x0 + 1 < 0 || y0 + 1 < 0 || x0 >= w || y0 >= h {
        return [0, 0, 0, 0];
    }

    let texel = |tx: i64, ty: i64| -> [f64; 4] {
        if tx < 0 || ty < 0 || tx >= w || ty >= h {
            return [0.0; 4];
        }
        let p = premul.get_pixel(tx as u32, ty as u32).0;
        [
            f64::from(p[0]),
            f64::from(p[1]),
            f64::from(p[2]),
            f64::from(p[3]),
        ]
    };

    let t00 = texel(x0, y0);
    let t10 = texel(x0 + 1, y0);
    let t01 = texel(x0, y0 + 1);
    let t11 = texel(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = t00[i] + (t10[i] - t00[i]) * fx;
        let bottom = t01[i] + (t11[i] - t01[i]) * fx;
        out[i] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    // Keep premultiplied invariants after rounding.
    let a = out[3];
    for c in &mut out[..3] {
        *c = (*c).min(a);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/resample.rs"]
mod tests;
