//! Command parsing and dispatch.
//!
//! A completed frame body is split on commas; the first token selects the
//! command and the rest are its arguments.  The grammar is deliberately
//! permissive and the wire carries no error channel: a numeric token that
//! fails to parse becomes zero, an unknown command is acknowledged without
//! action, and the host relies on the echoed message to notice its own
//! mistakes.  Diagnostics for all of these go to the log only.
//!
//! Replies are framed like commands:
//!
//! - acknowledgment: `<Msg {body} Time {half_seconds}>`
//! - measurement result: `<RGB:{r},{g},{b}>`
//!
//! The `Time` field is the boot-relative millisecond counter shifted right
//! by 9 — an approximate half-second counter.  The host-side consumer
//! decodes exactly this scaling, so it must stay a bit shift.

use core::fmt::Write as _;

use heapless::{String, Vec};
use log::{debug, warn};

use crate::app::ports::{ActuatorPort, Rgb};

use super::frame::BUF_SIZE;
use super::transport::Transport;

/// Worst-case reply length: `<Msg ` + 39-byte body + ` Time ` + u64 + `>`.
const REPLY_CAPACITY: usize = 80;

// ── Command grammar ───────────────────────────────────────────

/// A command parsed from a frame body.  Borrows the body; lives for one
/// dispatch only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// `Mix,<pin>,<secs>` — run the pump relay on `pin` for `secs` seconds.
    Mix { pin: i32, duration_secs: f32 },
    /// `Meas` — run the colour measurement sequence.
    Meas,
    /// Anything else — acknowledged, never acted on.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parse a frame body.  Matching on the command name is exact and
    /// case-sensitive; trailing tokens beyond the grammar are ignored.
    pub fn parse(body: &'a str) -> Self {
        let mut tokens = body.split(',');
        match tokens.next().unwrap_or("") {
            "Mix" => Command::Mix {
                pin: parse_int_or_default(tokens.next()),
                duration_secs: parse_f32_or_default(tokens.next()),
            },
            "Meas" => Command::Meas,
            other => Command::Unknown(other),
        }
    }
}

/// Permissive integer parse: a missing or malformed token yields 0.
///
/// The default-on-failure policy is the protocol's, not an accident; it is
/// isolated here so it stays visible and testable.
pub fn parse_int_or_default(token: Option<&str>) -> i32 {
    let parsed = token.and_then(|t| t.trim().parse().ok());
    if parsed.is_none() {
        debug!("numeric token {:?} unparsable, defaulting to 0", token);
    }
    parsed.unwrap_or_default()
}

/// Permissive float parse: a missing or malformed token yields 0.0.
pub fn parse_f32_or_default(token: Option<&str>) -> f32 {
    let parsed = token.and_then(|t| t.trim().parse().ok());
    if parsed.is_none() {
        debug!("numeric token {:?} unparsable, defaulting to 0.0", token);
    }
    parsed.unwrap_or_default()
}

// ── Dispatcher ────────────────────────────────────────────────

/// Executes completed frames and writes the replies.
///
/// Holds the echo slot for the acknowledgment frame.  `new_message` is set
/// when a frame arrives and cleared the moment the acknowledgment is
/// built, so each frame is acknowledged exactly once.  The echo slot keeps
/// the raw body bytes: whatever arrived goes back out verbatim, even bytes
/// that are not valid text.
pub struct Dispatcher {
    last_message: Vec<u8, BUF_SIZE>,
    new_message: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            last_message: Vec::new(),
            new_message: false,
        }
    }

    /// Interpret one frame body: execute the matching hardware action and
    /// write the reply frame(s) to `port`.
    ///
    /// `now_ms` is the uptime at the moment the frame completed; the ack
    /// timestamp uses it even when a pump run delays the ack by seconds.
    ///
    /// Blocks for as long as the hardware action blocks.  Never fails —
    /// transport write errors are logged and swallowed, since the wire has
    /// no way to carry them.
    pub fn dispatch<T, A>(&mut self, raw: &[u8], port: &mut T, actuator: &mut A, now_ms: u64)
    where
        T: Transport,
        A: ActuatorPort,
    {
        self.last_message.clear();
        // Cannot overflow: the receiver caps bodies below BUF_SIZE.
        let _ = self.last_message.extend_from_slice(raw);
        self.new_message = true;

        // Parsing needs text; the echo above does not.  A body with
        // non-ASCII garbage still gets echoed verbatim, it just cannot
        // name a command.
        let body = match core::str::from_utf8(raw) {
            Ok(s) => s,
            Err(_) => {
                debug!("frame body is not ASCII, no command matched");
                ""
            }
        };

        match Command::parse(body) {
            Command::Mix { pin, duration_secs } => {
                actuator.run_pump(pin, duration_secs);
                self.reply(port, now_ms);
            }
            Command::Meas => {
                // Acknowledge first: the host uses the ack to timestamp the
                // measurement request, then waits for the RGB frame.
                self.reply(port, now_ms);
                let rgb = actuator.run_measurement();
                send_rgb_frame(port, rgb);
            }
            Command::Unknown(name) => {
                debug!("unknown command {:?}, acknowledging without action", name);
                self.reply(port, now_ms);
            }
        }
    }

    /// Whether a frame has arrived but not yet been acknowledged.
    pub fn new_message_pending(&self) -> bool {
        self.new_message
    }

    fn reply<T: Transport>(&mut self, port: &mut T, now_ms: u64) {
        if !self.new_message {
            return;
        }
        self.new_message = false;

        let half_secs = now_ms >> 9;
        let mut frame: Vec<u8, REPLY_CAPACITY> = Vec::new();
        let _ = frame.extend_from_slice(b"<Msg ");
        let _ = frame.extend_from_slice(&self.last_message);
        let mut tail: String<32> = String::new();
        let _ = write!(tail, " Time {}>", half_secs);
        let _ = frame.extend_from_slice(tail.as_bytes());
        write_all(port, &frame);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the measurement result frame.
fn send_rgb_frame<T: Transport>(port: &mut T, rgb: Rgb) {
    let mut frame: String<24> = String::new();
    let _ = write!(frame, "<RGB:{},{},{}>", rgb.r, rgb.g, rgb.b);
    write_all(port, frame.as_bytes());
}

/// Best-effort write of a whole reply.  The protocol has no error channel,
/// so failures are logged and the reply is simply lost.
pub(crate) fn write_all<T: Transport>(port: &mut T, mut data: &[u8]) {
    while !data.is_empty() {
        match port.write(data) {
            Ok(0) => {
                warn!("transport accepted 0 bytes, dropping rest of reply");
                return;
            }
            Ok(n) => data = &data[n..],
            Err(e) => {
                warn!("reply write failed: {:?}", e);
                return;
            }
        }
    }
    if let Err(e) = port.flush() {
        warn!("reply flush failed: {:?}", e);
    }
}
