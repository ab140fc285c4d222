use super::*;

fn opaque(w: u32, h: u32) -> Image {
    Image::from_fn(w, h, |x, y| image::Rgba([(x * 3) as u8, (y * 5) as u8, 90, 255]))
}

fn alphas(frame: &crate::foundation::core::Canvas) -> impl Iterator<Item = u8> + '_ {
    frame.pixels().map(|p| p.0[3])
}

#[test]
fn fade_in_64_by_15_ramps_alpha() {
    let img = opaque(64, 64);
    let seq = fade_in(&img, 15);
    assert_eq!(seq.len(), 16);

    assert!(alphas(&seq.frames()[0]).all(|a| a == 0));
    assert!(alphas(&seq.frames()[15]).all(|a| a == 255));
    assert_eq!(seq.frames()[15], img);

    let per_frame: Vec<u8> = seq.frames().iter().map(|f| f.get_pixel(7, 9).0[3]).collect();
    assert!(per_frame.windows(2).all(|w| w[0] <= w[1]), "{per_frame:?}");
}

#[test]
fn fade_in_keeps_colour_of_visible_pixels() {
    let img = opaque(4, 4);
    let seq = fade_in(&img, 4);
    let mid = &seq.frames()[2];
    assert_eq!(mid.get_pixel(1, 2).0[..3], img.get_pixel(1, 2).0[..3]);
    assert_eq!(mid.get_pixel(1, 2).0[3], 127);
}

#[test]
fn slide_in_from_left_100x50_by_10() {
    let img = opaque(100, 50);
    let steps = slide_in_from_left_steps(100, 10);
    assert_eq!(steps.len(), 11);
    assert_eq!(steps[0], FrameStep::offset(-100, 0));
    assert_eq!(steps[5], FrameStep::offset(-50, 0));
    assert_eq!(steps[10], FrameStep::offset(0, 0));

    let seq = slide_in_from_left(&img, 10);
    assert_eq!(seq.len(), 11);
    assert!(seq.frames()[0].as_raw().iter().all(|&v| v == 0));
    assert_eq!(seq.frames()[10], img);
}

#[test]
fn slide_in_from_top_starts_above_the_frame() {
    let steps = slide_in_from_top_steps(50, 10);
    assert_eq!(steps.len(), 11);
    assert_eq!(steps[0], FrameStep::offset(0, -50));
    assert_eq!(steps[10], FrameStep::offset(0, 0));

    let img = opaque(20, 50);
    let seq = slide_in_from_top(&img, 10);
    assert!(seq.frames()[0].as_raw().iter().all(|&v| v == 0));
    assert_eq!(seq.frames()[10], img);
}

#[test]
fn zoom_in_has_n_frames_and_ends_at_full_size() {
    let img = opaque(40, 30);
    let seq = zoom_in(&img, 12);
    assert_eq!(seq.len(), 12);
    assert!(seq.frames().iter().all(|f| f.dimensions() == (40, 30)));
    assert!(seq.frames()[0].as_raw().iter().all(|&v| v == 0));
    assert_eq!(seq.frames()[11], img);
}

#[test]
fn zoom_in_schedule_ramps_up() {
    let steps = zoom_in_steps(5);
    assert_eq!(steps.first(), Some(&FrameStep::scale(MIN_ZOOM_SCALE)));
    assert_eq!(steps.last(), Some(&FrameStep::scale(1.0)));
}
