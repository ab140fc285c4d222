//! Emphasis family: the image stays in frame and moves in place.

use crate::effects::schedule::{FrameStep, cycle_angle, render_steps};
use crate::foundation::core::{FrameSequence, Image};
use crate::foundation::math::linspace;

/// Default peak scale of [`pulse`].
pub const DEFAULT_PULSE_MAX_SCALE: f64 = 1.2;
/// Largest peak scale [`pulse`] will render; larger values are clamped.
pub const MAX_PULSE_SCALE: f64 = 4.0;
/// Default horizontal amplitude of [`shake`], in pixels.
pub const DEFAULT_SHAKE_AMPLITUDE: u32 = 10;
/// Default vertical amplitude of [`bounce`], in pixels.
pub const DEFAULT_BOUNCE_AMPLITUDE: u32 = 20;
/// Peak angle of [`swing`], in degrees.
pub const SWING_MAX_DEGREES: f64 = 15.0;
/// Shortest visible/invisible run of [`flash`].
pub const FLASH_MIN_CYCLE: u32 = 4;

/// Scale `1 -> max_scale` over `n/2 + 1` steps, then back down over another `n/2 + 1`.
///
/// `max_scale` is clamped to [`MAX_PULSE_SCALE`].
pub fn pulse_steps(max_scale: f64, n: u32) -> Vec<FrameStep> {
    let up = linspace(1.0, max_scale.min(MAX_PULSE_SCALE), (n / 2) as usize + 1);
    up.iter()
        .chain(up.iter().rev())
        .map(|&s| FrameStep::scale(s))
        .collect()
}

/// Per-step sine offsets for [`shake`] and [`bounce`]: `n + 1` values of
/// `trunc(amplitude * sin(2*pi*i/n))`, with `amplitude` clamped to `extent / 4`.
pub fn oscillation_offsets(amplitude: u32, extent: u32, n: u32) -> Vec<i64> {
    let n = n.max(1);
    let amplitude = f64::from(amplitude.min(extent / 4));
    (0..=n)
        .map(|i| (amplitude * cycle_angle(i as usize, n as usize).sin()) as i64)
        .collect()
}

/// Horizontal sine wobble.
pub fn shake_steps(width: u32, amplitude: u32, n: u32) -> Vec<FrameStep> {
    oscillation_offsets(amplitude, width, n)
        .into_iter()
        .map(|dx| FrameStep::offset(dx, 0))
        .collect()
}

/// Vertical sine hop; a positive sine moves the image up.
pub fn bounce_steps(height: u32, amplitude: u32, n: u32) -> Vec<FrameStep> {
    oscillation_offsets(amplitude, height, n)
        .into_iter()
        .map(|dy| FrameStep::offset(0, -dy))
        .collect()
}

/// One full counter-clockwise turn over `n` steps, last step at 360 degrees.
pub fn spin_steps(n: u32) -> Vec<FrameStep> {
    (0..n)
        .map(|i| {
            let degrees = if n > 1 {
                f64::from(i) / f64::from(n - 1) * 360.0
            } else {
                0.0
            };
            FrameStep::Transform {
                scale: 1.0,
                degrees,
                expand: true,
            }
        })
        .collect()
}

/// Lengths of the six tada phases (20%, 20%, 10%, 10%, 10%, 10% of `n`, floored) followed by
/// the no-op remainder that pads the schedule to exactly `n`.
pub fn tada_phase_lengths(n: u32) -> [usize; 7] {
    let n = n as usize;
    let big = n * 2 / 10;
    let small = n / 10;
    let used = 2 * big + 4 * small;
    [big, big, small, small, small, small, n.saturating_sub(used)]
}

/// Grow, shrink, wiggle, settle. Always exactly `n` steps.
pub fn tada_steps(n: u32) -> Vec<FrameStep> {
    let [p1, p2, p3, p4, p5, p6, rest] = tada_phase_lengths(n);

    let mut scales = linspace(1.0, 1.2, p1);
    scales.extend(linspace(1.2, 0.9, p2));
    let mut angles = vec![0.0; p1 + p2];

    angles.extend(linspace(0.0, -15.0, p3));
    angles.extend(linspace(-15.0, 10.0, p4));
    angles.extend(linspace(10.0, -5.0, p5));
    angles.extend(linspace(-5.0, 0.0, p6));
    scales.resize(p1 + p2 + p3 + p4 + p5 + p6 + rest, 1.0);
    angles.resize(angles.len() + rest, 0.0);

    // Phase lengths already sum to n; this only guards the contract.
    let n = n as usize;
    scales.resize(n, 1.0);
    angles.resize(n, 0.0);

    scales
        .into_iter()
        .zip(angles)
        .map(|(scale, degrees)| FrameStep::Transform {
            scale,
            degrees,
            expand: true,
        })
        .collect()
}

/// Length of each visible or blank run in a [`flash`] of `n` frames.
pub fn flash_cycle_len(n: u32) -> u32 {
    FLASH_MIN_CYCLE.max(n / 4)
}

/// Alternate runs of `flash_cycle_len(n)` visible and blank frames, starting visible.
pub fn flash_steps(n: u32) -> Vec<FrameStep> {
    let cycle = flash_cycle_len(n);
    (0..n)
        .map(|i| {
            if (i / cycle) % 2 == 0 {
                FrameStep::offset(0, 0)
            } else {
                FrameStep::Blank
            }
        })
        .collect()
}

/// Pendulum rotation `15 * sin(2*pi*i/n)` degrees over `n` steps, clipped to the frame.
pub fn swing_steps(n: u32) -> Vec<FrameStep> {
    (0..n)
        .map(|i| FrameStep::Transform {
            scale: 1.0,
            degrees: SWING_MAX_DEGREES * cycle_angle(i as usize, n as usize).sin(),
            expand: false,
        })
        .collect()
}

/// Grow to `max_scale` and back.
pub fn pulse(image: &Image, max_scale: f64, n: u32) -> FrameSequence {
    render_steps(image, &pulse_steps(max_scale, n), true)
}

/// Wobble left and right.
pub fn shake(image: &Image, amplitude: u32, n: u32) -> FrameSequence {
    render_steps(image, &shake_steps(image.width(), amplitude, n), true)
}

/// Hop up and down.
pub fn bounce(image: &Image, amplitude: u32, n: u32) -> FrameSequence {
    render_steps(image, &bounce_steps(image.height(), amplitude, n), true)
}

/// Rotate a full turn in place.
pub fn spin(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &spin_steps(n), true)
}

/// Attention-grabbing grow/shrink followed by a wiggle.
pub fn tada(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &tada_steps(n), true)
}

/// Blink on and off.
pub fn flash(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &flash_steps(n), true)
}

/// Rock like a pendulum.
pub fn swing(image: &Image, n: u32) -> FrameSequence {
    render_steps(image, &swing_steps(n), true)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/emphasis.rs"]
mod tests;
