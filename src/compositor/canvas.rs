use crate::foundation::core::{Canvas, Image};
use crate::foundation::math::mul_div255_u16;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Allocate a fully transparent `(0,0,0,0)` canvas.
pub fn blank_canvas(width: u32, height: u32) -> Canvas {
    Canvas::new(width, height)
}

/// Source-over blend of two straight-alpha pixels.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u32::from(mul_div255_u16(u16::from(dst[3]), (255 - sa) as u16));
    let out_a = sa + da;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa + u32::from(dst[i]) * da;
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

/// Composite `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Pixels landing outside `dst` are dropped; offsets may be negative or beyond the canvas.
pub fn paste(dst: &mut Canvas, src: &Image, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let dst_stride = dw as usize * 4;
    let src_stride = sw as usize * 4;
    let run = (x1 - x0) as usize * 4;
    let src_raw = src.as_raw();
    let dst_raw: &mut [u8] = &mut **dst;

    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let d_off = dy as usize * dst_stride + x0 as usize * 4;
        let s_off = sy * src_stride + (x0 - x) as usize * 4;
        let d_row = &mut dst_raw[d_off..d_off + run];
        let s_row = &src_raw[s_off..s_off + run];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

/// Offset that centres an `inner` extent inside an `outer` one, flooring like integer division.
pub fn center_offset(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2)
}

/// Paste `src` centred on `dst`; larger sources overflow evenly and are cropped.
pub fn paste_centered(dst: &mut Canvas, src: &Image) {
    let x = center_offset(dst.width(), src.width());
    let y = center_offset(dst.height(), src.height());
    paste(dst, src, x, y);
}

/// Copy of `src` with every alpha value multiplied by `opacity` (clamped to `[0, 1]`).
pub fn with_opacity(src: &Image, opacity: f64) -> Image {
    let opacity = opacity.clamp(0.0, 1.0);
    let mut out = src.clone();
    if opacity >= 1.0 {
        return out;
    }
    for px in out.pixels_mut() {
        px.0[3] = (f64::from(px.0[3]) * opacity) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/canvas.rs"]
mod tests;
