use super::*;
use crate::encode::sink::encode_sequence;
use crate::foundation::core::FrameSequence;
use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

fn frame(w: u32, h: u32, rgba: [u8; 4]) -> Canvas {
    Canvas::from_pixel(w, h, image::Rgba(rgba))
}

fn decode(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(std::io::Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn gif_round_trips_frame_count_and_delay() {
    let frames = vec![
        frame(8, 6, [255, 0, 0, 255]),
        frame(8, 6, [0, 255, 0, 255]),
        frame(8, 6, [0, 0, 255, 255]),
        frame(8, 6, [255, 255, 255, 255]),
    ];
    let seq = FrameSequence::new(8, 6, frames).retimed(0.4);
    let mut sink = GifSink::new(GifSinkOpts::default());
    let art = encode_sequence(&seq, 10, &mut sink).unwrap();

    assert_eq!(art.media_type, "image/gif");
    assert_eq!(&art.bytes[..3], b"GIF");

    let decoded = decode(&art.bytes);
    assert_eq!(decoded.len(), 4);
    for f in &decoded {
        assert_eq!(f.buffer().dimensions(), (8, 6));
        let (num, den) = f.delay().numer_denom_ms();
        assert_eq!(num / den, 100);
    }
    assert_eq!(decoded[1].buffer().get_pixel(3, 3).0, [0, 255, 0, 255]);
}

#[test]
fn gif_loops_forever_by_default() {
    let seq = FrameSequence::new(2, 2, vec![frame(2, 2, [9, 9, 9, 255])]).retimed(1.0);
    let mut sink = GifSink::new(GifSinkOpts::default());
    let bytes = encode_sequence(&seq, 1, &mut sink).unwrap().bytes;
    let netscape = b"NETSCAPE2.0";
    assert!(bytes.windows(netscape.len()).any(|w| w == netscape));
}

#[test]
fn transparent_pixels_survive() {
    let seq = FrameSequence::new(
        4,
        4,
        vec![frame(4, 4, [0, 0, 0, 0]), frame(4, 4, [10, 20, 30, 255])],
    )
    .retimed(0.2);
    let mut sink = GifSink::new(GifSinkOpts::default());
    let bytes = encode_sequence(&seq, 10, &mut sink).unwrap().bytes;
    let decoded = decode(&bytes);
    assert_eq!(decoded[0].buffer().get_pixel(0, 0).0[3], 0);
    assert_eq!(decoded[1].buffer().get_pixel(0, 0).0[3], 255);
}

#[test]
fn speed_out_of_range_is_invalid() {
    let mut sink = GifSink::new(GifSinkOpts {
        speed: 0,
        ..GifSinkOpts::default()
    });
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: 10,
        frame_duration_secs: 0.1,
    };
    assert!(matches!(
        sink.begin(cfg),
        Err(AnimlabError::InvalidParameter(_))
    ));
}

#[test]
fn oversized_and_untimed_configs_are_rejected() {
    let mut sink = GifSink::new(GifSinkOpts::default());
    let too_wide = SinkConfig {
        width: 70_000,
        height: 1,
        fps: 10,
        frame_duration_secs: 0.1,
    };
    assert!(matches!(sink.begin(too_wide), Err(AnimlabError::Encoding(_))));

    let bad_timing = SinkConfig {
        width: 2,
        height: 2,
        fps: 10,
        frame_duration_secs: f64::NAN,
    };
    assert!(matches!(sink.begin(bad_timing), Err(AnimlabError::Encoding(_))));
}

#[test]
fn end_without_frames_is_an_error() {
    let mut sink = GifSink::new(GifSinkOpts::default());
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: 10,
        frame_duration_secs: 0.1,
    })
    .unwrap();
    assert!(matches!(sink.end(), Err(AnimlabError::Encoding(_))));
}
