//! Fuzz target: `FrameReceiver::push`
//!
//! Drives arbitrary byte sequences into the frame receiver and asserts
//! that it never panics and never exposes a body longer than the protocol
//! limit, whatever marker soup arrives.
//!
//! cargo fuzz run fuzz_frame_receiver

#![no_main]

use libfuzzer_sys::fuzz_target;
use mixcell::comms::frame::{FrameReceiver, MAX_BODY_LEN};

fuzz_target!(|data: &[u8]| {
    let mut rx = FrameReceiver::new();

    for &b in data {
        if rx.push(b) {
            assert!(
                rx.body().len() <= MAX_BODY_LEN,
                "body exceeds protocol limit"
            );
        }
    }

    // Mid-frame state must stay within bounds too.
    assert!(rx.body().len() <= MAX_BODY_LEN);
});
