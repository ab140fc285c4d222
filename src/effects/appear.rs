//! Appear family: the image enters an empty frame.

use crate::effects::schedule::{FrameStep, render_steps};
use crate::foundation::core::{FrameSequence, Image};
use crate::foundation::math::linspace;

/// Smallest zoom factor; the first zoom-in frame is effectively empty.
pub const MIN_ZOOM_SCALE: f64 = 0.01;

/// `n + 1` steps with opacity `i / n`.
pub fn fade_in_steps(n: u32) -> Vec<FrameStep> {
    let n = n.max(1);
    (0..=n)
        .map(|i| FrameStep::opacity(f64::from(i) / f64::from(n)))
        .collect()
}

/// `n + 1` steps sliding from `x = -width` to `x = 0`.
pub fn slide_in_from_left_steps(width: u32, n: u32) -> Vec<FrameStep> {
    slide_in(width, n)
        .into_iter()
        .map(|x| FrameStep::offset(x, 0))
        .collect()
}

/// `n + 1` steps sliding from `y = -height` to `y = 0`.
pub fn slide_in_from_top_steps(height: u32, n: u32) -> Vec<FrameStep> {
    slide_in(height, n)
        .into_iter()
        .map(|y| FrameStep::offset(0, y))
        .collect()
}

/// `n` steps scaling from [`MIN_ZOOM_SCALE`] to 1.
pub fn zoom_in_steps(n: u32) -> Vec<FrameStep> {
    linspace(MIN_ZOOM_SCALE, 1.0, n as usize)
        .into_iter()
        .map(FrameStep::scale)
        .collect()
}

fn slide_in(extent: u32, n: u32) -> Vec<i64> {
    let n = n.max(1);
    let extent = f64::from(extent);
    (0..=n)
        .map(|i| {
            let progress = f64::from(i) / f64::from(n);
            (-extent * (1.0 - progress)) as i64
        })
        .collect()
}

/// Fade from fully transparent to the source at full opacity.
pub fn fade_in(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &fade_in_steps(n), true)
}

/// Slide in from beyond the left edge until flush at the origin.
pub fn slide_in_from_left(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &slide_in_from_left_steps(image.width(), n), true)
}

/// Slide in from beyond the top edge until flush at the origin.
pub fn slide_in_from_top(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &slide_in_from_top_steps(image.height(), n), true)
}

/// Grow from a centred speck to full size.
pub fn zoom_in(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &zoom_in_steps(n), true)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/appear.rs"]
mod tests;
