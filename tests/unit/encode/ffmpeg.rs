use super::*;
use crate::encode::sink::encode_sequence;
use crate::foundation::core::FrameSequence;

#[test]
fn odd_dims_round_up_to_even() {
    assert_eq!(even_dims(4, 6), (4, 6));
    assert_eq!(even_dims(5, 3), (6, 4));
    assert_eq!(even_dims(1, 1), (2, 2));
}

#[test]
fn flatten_transparent_returns_bg() {
    let frame = Canvas::from_pixel(1, 1, image::Rgba([200, 100, 50, 0]));
    let mut dst = vec![0u8; 4];
    flatten_over_bg_into(&mut dst, 1, &frame, [10, 20, 30, 255]);
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_opaque_is_identity() {
    let frame = Canvas::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
    let mut dst = vec![0u8; 4];
    flatten_over_bg_into(&mut dst, 1, &frame, [10, 20, 30, 255]);
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn flatten_half_alpha_blends() {
    let frame = Canvas::from_pixel(1, 1, image::Rgba([255, 0, 0, 128]));
    let mut dst = vec![0u8; 4];
    flatten_over_bg_into(&mut dst, 1, &frame, [0, 0, 255, 255]);
    assert_eq!(dst, vec![128, 0, 127, 255]);
}

#[test]
fn flatten_leaves_padding_untouched() {
    let (pw, ph) = even_dims(3, 1);
    let mut dst = opaque_background(pw, ph, [7, 7, 7, 0]);
    assert_eq!(dst.len(), 4 * 2 * 4);
    assert!(dst.chunks_exact(4).all(|p| p == [7, 7, 7, 255]));

    let frame = Canvas::from_pixel(3, 1, image::Rgba([50, 60, 70, 255]));
    flatten_over_bg_into(&mut dst, pw, &frame, [7, 7, 7, 255]);
    let px: Vec<&[u8]> = dst.chunks_exact(4).collect();
    assert_eq!(px[0], [50, 60, 70, 255]);
    assert_eq!(px[2], [50, 60, 70, 255]);
    assert_eq!(px[3], [7, 7, 7, 255]);
    assert_eq!(px[4], [7, 7, 7, 255]);
}

#[test]
fn missing_binary_is_an_encoding_error() {
    let bin = PathBuf::from("/nonexistent/animlab-ffmpeg");
    assert!(!is_ffmpeg_available(&bin));

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        ffmpeg_bin: bin,
        ..FfmpegSinkOpts::default()
    });
    let err = sink
        .begin(SinkConfig {
            width: 2,
            height: 2,
            fps: 10,
            frame_duration_secs: 0.1,
        })
        .unwrap_err();
    assert!(matches!(err, AnimlabError::Encoding(_)));
}

#[test]
fn end_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::default());
    assert!(matches!(sink.end(), Err(AnimlabError::Encoding(_))));
}

#[test]
fn crf_out_of_range_is_invalid() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        crf: 60,
        ..FfmpegSinkOpts::default()
    });
    let err = sink
        .begin(SinkConfig {
            width: 2,
            height: 2,
            fps: 10,
            frame_duration_secs: 0.1,
        })
        .unwrap_err();
    assert!(matches!(err, AnimlabError::InvalidParameter(_)));
}

#[test]
fn encodes_odd_sized_frames_when_ffmpeg_is_present() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let frames = (0..6u8)
        .map(|i| Canvas::from_pixel(5, 3, image::Rgba([i * 40, 0, 255 - i * 40, 255])))
        .collect();
    let seq = FrameSequence::new(5, 3, frames).retimed(0.5);
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::default());
    let art = encode_sequence(&seq, 12, &mut sink).unwrap();
    assert_eq!(art.media_type, "video/mp4");
    assert_eq!(&art.bytes[4..8], b"ftyp");
}
