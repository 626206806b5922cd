//! Property tests for the frame receiver.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use mixcell::comms::frame::{FrameReceiver, END_MARKER, MAX_BODY_LEN, START_MARKER};
use proptest::prelude::*;

/// Bytes that can appear inside a frame body or as line noise: anything
/// except the two markers.
fn non_marker_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        any::<u8>().prop_filter("no markers", |b| *b != START_MARKER && *b != END_MARKER),
        0..=max_len,
    )
}

fn collect_frames(rx: &mut FrameReceiver, bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    for &b in bytes {
        if rx.push(b) {
            out.push(rx.body().to_vec());
        }
    }
    out
}

proptest! {
    /// A start marker followed by a body and an end marker is always
    /// recognised, whatever noise precedes it, and the parsed body equals
    /// the sent bytes exactly (bodies within the length limit).
    #[test]
    fn frame_recognised_with_exact_body(
        noise in non_marker_bytes(64),
        body in non_marker_bytes(MAX_BODY_LEN),
    ) {
        let mut stream = noise;
        stream.push(START_MARKER);
        stream.extend_from_slice(&body);
        stream.push(END_MARKER);

        let mut rx = FrameReceiver::new();
        let frames = collect_frames(&mut rx, &stream);
        prop_assert_eq!(frames, vec![body]);
    }

    /// Oversized bodies close cleanly with exactly the first
    /// `MAX_BODY_LEN` bytes retained.
    #[test]
    fn oversized_body_truncates_to_prefix(
        body in non_marker_bytes(200).prop_filter("oversized", |b| b.len() > MAX_BODY_LEN),
    ) {
        let mut stream = vec![START_MARKER];
        stream.extend_from_slice(&body);
        stream.push(END_MARKER);

        let mut rx = FrameReceiver::new();
        let frames = collect_frames(&mut rx, &stream);
        prop_assert_eq!(frames.len(), 1);
        prop_assert_eq!(&frames[0][..], &body[..MAX_BODY_LEN]);
    }

    /// Without an end marker no frame ever completes, whatever arrives.
    #[test]
    fn no_end_marker_no_frame(
        mut stream in proptest::collection::vec(any::<u8>(), 0..=128),
    ) {
        stream.retain(|b| *b != END_MARKER);
        let mut rx = FrameReceiver::new();
        prop_assert!(collect_frames(&mut rx, &stream).is_empty());
    }

    /// The receiver never panics and never yields a body longer than the
    /// limit, for fully arbitrary byte streams.
    #[test]
    fn arbitrary_streams_never_overflow(
        stream in proptest::collection::vec(any::<u8>(), 0..=512),
    ) {
        let mut rx = FrameReceiver::new();
        for frame in collect_frames(&mut rx, &stream) {
            prop_assert!(frame.len() <= MAX_BODY_LEN);
        }
    }

    /// A fresh start marker inside an open frame discards what came
    /// before it: the completed body is always the bytes after the LAST
    /// start marker.
    #[test]
    fn restart_keeps_only_latest_body(
        first in non_marker_bytes(MAX_BODY_LEN),
        second in non_marker_bytes(MAX_BODY_LEN),
    ) {
        let mut stream = vec![START_MARKER];
        stream.extend_from_slice(&first);
        stream.push(START_MARKER);
        stream.extend_from_slice(&second);
        stream.push(END_MARKER);

        let mut rx = FrameReceiver::new();
        let frames = collect_frames(&mut rx, &stream);
        prop_assert_eq!(frames, vec![second]);
    }
}
