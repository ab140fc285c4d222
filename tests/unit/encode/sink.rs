use super::*;

fn solid(w: u32, h: u32, v: u8) -> Canvas {
    Canvas::from_pixel(w, h, image::Rgba([v, v, v, 255]))
}

fn cfg(w: u32, h: u32) -> SinkConfig {
    SinkConfig {
        width: w,
        height: h,
        fps: 10,
        frame_duration_secs: 0.1,
    }
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let seq = FrameSequence::new(2, 2, vec![solid(2, 2, 1), solid(2, 2, 2), solid(2, 2, 3)])
        .retimed(1.5);
    let mut sink = InMemorySink::new();
    let art = encode_sequence(&seq, 10, &mut sink).unwrap();

    assert_eq!(art.media_type, MEDIA_TYPE_RAW_RGBA);
    assert_eq!(art.bytes.len(), 3 * 2 * 2 * 4);
    assert_eq!(art.bytes[0], 1);
    assert_eq!(art.bytes[16], 2);

    let idx: Vec<usize> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2]);
    let c = sink.config().unwrap();
    assert_eq!((c.width, c.height, c.fps), (2, 2, 10));
    assert!((c.frame_duration_secs - 0.5).abs() < 1e-12);
}

#[test]
fn untimed_sequence_uses_fps_for_frame_duration() {
    let seq = FrameSequence::new(1, 1, vec![solid(1, 1, 0)]);
    let c = SinkConfig::for_sequence(&seq, 20);
    assert!((c.frame_duration_secs - 0.05).abs() < 1e-12);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(0, &solid(2, 2, 0)).unwrap();
    sink.push_frame(2, &solid(2, 2, 0)).unwrap();
    let err = sink.push_frame(2, &solid(2, 2, 0)).unwrap_err();
    assert!(matches!(err, AnimlabError::Encoding(_)));
    let err = sink.push_frame(1, &solid(2, 2, 0)).unwrap_err();
    assert!(matches!(err, AnimlabError::Encoding(_)));
}

#[test]
fn mismatched_frame_size_is_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    let err = sink.push_frame(0, &solid(3, 2, 0)).unwrap_err();
    assert!(err.to_string().contains("3x2"));
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = InMemorySink::new();
    assert!(matches!(
        sink.push_frame(0, &solid(1, 1, 0)),
        Err(AnimlabError::Encoding(_))
    ));
}

#[test]
fn begin_resets_previous_run() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(1, 1)).unwrap();
    sink.push_frame(5, &solid(1, 1, 0)).unwrap();
    sink.begin(cfg(1, 1)).unwrap();
    assert!(sink.frames().is_empty());
    sink.push_frame(0, &solid(1, 1, 0)).unwrap();
}

#[test]
fn empty_sequence_cannot_be_encoded() {
    let seq = FrameSequence::new(4, 4, Vec::new());
    let mut sink = InMemorySink::new();
    assert!(matches!(
        encode_sequence(&seq, 10, &mut sink),
        Err(AnimlabError::Encoding(_))
    ));
    assert!(sink.config().is_none());
}
