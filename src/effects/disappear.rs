//! Disappear family: reversed schedules of the appear family.

use crate::effects::appear::MIN_ZOOM_SCALE;
use crate::effects::schedule::{FrameStep, render_steps};
use crate::foundation::core::{FrameSequence, Image};
use crate::foundation::math::linspace;

/// `n + 1` steps with opacity `(n - i) / n`, the frame-reverse of the fade-in schedule.
pub fn fade_out_steps(n: u32) -> Vec<FrameStep> {
    let n = n.max(1);
    (0..=n)
        .map(|i| FrameStep::opacity(f64::from(n - i) / f64::from(n)))
        .collect()
}

/// `n + 1` steps sliding from `x = 0` to `x = width`.
pub fn slide_out_to_right_steps(width: u32, n: u32) -> Vec<FrameStep> {
    slide_out(width, n)
        .into_iter()
        .map(|x| FrameStep::offset(x, 0))
        .collect()
}

/// `n + 1` steps sliding from `y = 0` to `y = height`.
pub fn slide_out_to_bottom_steps(height: u32, n: u32) -> Vec<FrameStep> {
    slide_out(height, n)
        .into_iter()
        .map(|y| FrameStep::offset(0, y))
        .collect()
}

/// `n` steps scaling from 1 down to [`MIN_ZOOM_SCALE`].
pub fn zoom_out_steps(n: u32) -> Vec<FrameStep> {
    linspace(1.0, MIN_ZOOM_SCALE, n as usize)
        .into_iter()
        .map(FrameStep::scale)
        .collect()
}

fn slide_out(extent: u32, n: u32) -> Vec<i64> {
    let n = n.max(1);
    let extent = f64::from(extent);
    (0..=n)
        .map(|i| (extent * (f64::from(i) / f64::from(n))) as i64)
        .collect()
}

/// Fade from the source at full opacity to fully transparent.
pub fn fade_out(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &fade_out_steps(n), true)
}

/// Slide out past the right edge.
pub fn slide_out_to_right(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &slide_out_to_right_steps(image.width(), n), true)
}

/// Slide out past the bottom edge.
pub fn slide_out_to_bottom(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &slide_out_to_bottom_steps(image.height(), n), true)
}

/// Shrink into the centre until gone.
pub fn zoom_out(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &zoom_out_steps(n), true)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/disappear.rs"]
mod tests;
