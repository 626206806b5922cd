//! Marker-delimited frame receiver.
//!
//! Wire format:
//! ```text
//! ┌───┬──────────────────────────────┬───┐
//! │ < │ comma-separated ASCII body   │ > │
//! └───┴──────────────────────────────┴───┘
//! ```
//!
//! The receiver accumulates incoming bytes one at a time and yields the
//! body when the end marker arrives.  Partial reads are handled naturally —
//! a frame may arrive spread over any number of `push` calls.
//!
//! The per-byte rules run in a fixed order, and the order carries the
//! protocol's edge-case semantics:
//!
//! 1. End marker closes the frame and makes the body available — even when
//!    no frame is open, in which case whatever the buffer held from the
//!    previous frame is replayed.  The host never sends a bare `>`, so this
//!    is a tolerated degradation, not an error.
//! 2. While a frame is open, the byte is appended.  When the buffer fills,
//!    the write position is pinned to the last cell: excess bytes overwrite
//!    each other and the body keeps its first [`MAX_BODY_LEN`] bytes.  No
//!    error is signalled.
//! 3. Start marker (checked last, so the marker byte itself is never kept)
//!    opens a fresh frame and discards anything accumulated so far.
//!
//! The rules are sequential, not mutually exclusive: rule 2 can run on the
//! same byte as rule 3, which is exactly why `<` resets the length *after*
//! the append.

/// Receive buffer capacity.
pub const BUF_SIZE: usize = 40;

/// Longest body the receiver retains; the final buffer cell is sacrificed
/// as the overwrite slot for oversized frames.
pub const MAX_BODY_LEN: usize = BUF_SIZE - 1;

/// Frame start marker.
pub const START_MARKER: u8 = b'<';
/// Frame end marker.
pub const END_MARKER: u8 = b'>';

/// Byte-at-a-time frame accumulator.
///
/// Owned by exactly one poll loop; never shared.  The dispatcher borrows
/// the completed body via [`body`](Self::body) and must finish with it
/// before the next byte is pushed.
pub struct FrameReceiver {
    buf: [u8; BUF_SIZE],
    len: usize,
    in_progress: bool,
}

impl FrameReceiver {
    pub fn new() -> Self {
        Self {
            buf: [0; BUF_SIZE],
            len: 0,
            in_progress: false,
        }
    }

    /// Feed one byte.  Returns `true` when this byte completed a frame;
    /// the body is then readable through [`body`](Self::body) until the
    /// next `push`.
    pub fn push(&mut self, x: u8) -> bool {
        let mut completed = false;

        if x == END_MARKER {
            self.in_progress = false;
            completed = true;
        }

        if self.in_progress {
            self.buf[self.len] = x;
            self.len += 1;
            if self.len == BUF_SIZE {
                self.len = MAX_BODY_LEN;
            }
        }

        if x == START_MARKER {
            self.len = 0;
            self.in_progress = true;
        }

        completed
    }

    /// Body of the most recently completed frame.
    ///
    /// Also readable mid-frame (the bytes so far); the poll loop only
    /// consults it when [`push`](Self::push) reported completion.
    pub fn body(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Is a frame currently being accumulated?
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a byte string, collecting every completed body.
    fn feed(rx: &mut FrameReceiver, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        for &b in bytes {
            if rx.push(b) {
                out.push(rx.body().to_vec());
            }
        }
        out
    }

    #[test]
    fn simple_frame() {
        let mut rx = FrameReceiver::new();
        let frames = feed(&mut rx, b"<Mix,4,2.5>");
        assert_eq!(frames, vec![b"Mix,4,2.5".to_vec()]);
    }

    #[test]
    fn bytes_before_start_marker_are_ignored() {
        let mut rx = FrameReceiver::new();
        let frames = feed(&mut rx, b"noise\r\n<Meas>");
        assert_eq!(frames, vec![b"Meas".to_vec()]);
    }

    #[test]
    fn split_across_pushes() {
        let mut rx = FrameReceiver::new();
        assert!(feed(&mut rx, b"<Mi").is_empty());
        assert!(rx.in_progress());
        assert!(feed(&mut rx, b"x,2,").is_empty());
        let frames = feed(&mut rx, b"1.0>");
        assert_eq!(frames, vec![b"Mix,2,1.0".to_vec()]);
        assert!(!rx.in_progress());
    }

    #[test]
    fn restart_marker_resets_accumulation() {
        let mut rx = FrameReceiver::new();
        let frames = feed(&mut rx, b"<garbage<Meas>");
        assert_eq!(frames, vec![b"Meas".to_vec()]);
    }

    #[test]
    fn start_marker_is_not_stored() {
        let mut rx = FrameReceiver::new();
        let frames = feed(&mut rx, b"<<Meas>");
        assert_eq!(frames, vec![b"Meas".to_vec()]);
    }

    #[test]
    fn oversized_body_keeps_first_39_bytes() {
        let mut rx = FrameReceiver::new();
        let body: Vec<u8> = (0..60).map(|i| b'a' + (i % 26)).collect();
        let mut stream = vec![START_MARKER];
        stream.extend_from_slice(&body);
        stream.push(END_MARKER);

        let frames = feed(&mut rx, &stream);
        assert_eq!(frames.len(), 1);
        // Overflow bytes churn in the hidden 40th cell; the exposed body is
        // the first 39 bytes, intact.
        assert_eq!(frames[0], &body[..MAX_BODY_LEN]);
    }

    #[test]
    fn exactly_39_byte_body_survives_intact() {
        let mut rx = FrameReceiver::new();
        let body = vec![b'x'; MAX_BODY_LEN];
        let mut stream = vec![START_MARKER];
        stream.extend_from_slice(&body);
        stream.push(END_MARKER);

        let frames = feed(&mut rx, &stream);
        assert_eq!(frames, vec![body]);
    }

    #[test]
    fn bare_end_marker_replays_previous_body() {
        let mut rx = FrameReceiver::new();
        let mut frames = feed(&mut rx, b"<Meas>");
        frames.extend(feed(&mut rx, b">"));
        // Stale replay: the buffer still holds "Meas".
        assert_eq!(frames, vec![b"Meas".to_vec(), b"Meas".to_vec()]);
    }

    #[test]
    fn consecutive_frames_each_complete() {
        let mut rx = FrameReceiver::new();
        let frames = feed(&mut rx, b"<Mix,2,1.0><Meas>");
        assert_eq!(frames, vec![b"Mix,2,1.0".to_vec(), b"Meas".to_vec()]);
    }

    #[test]
    fn empty_body() {
        let mut rx = FrameReceiver::new();
        let frames = feed(&mut rx, b"<>");
        assert_eq!(frames, vec![Vec::<u8>::new()]);
    }
}
