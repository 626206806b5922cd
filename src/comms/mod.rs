//! Host serial link: framing, command dispatch, replies.
//!
//! ```text
//!  UART bytes ──▶ FrameReceiver ──▶ Dispatcher ──▶ ActuatorPort
//!                                       │
//!                                       └────────▶ reply frames
//! ```
//!
//! Everything runs on the single poll-loop thread.  Dispatch happens
//! synchronously inside the byte step that completes a frame, so the
//! receiver state is never touched while a command executes — blocking
//! pump runs simply stall the loop and incoming bytes wait in the UART
//! driver's FIFO.

pub mod dispatch;
pub mod frame;
pub mod transport;

use log::warn;

use crate::app::ports::{ActuatorPort, TimePort};

use dispatch::Dispatcher;
use frame::FrameReceiver;
use transport::Transport;

/// Startup banner.  The host blocks on this exact string before sending
/// its first command; do not reword it without updating the host.
pub const READY_BANNER: &[u8] = b"<Arduino is ready>";

/// Receiver and dispatcher wired together — one per serial link.
pub struct CommandLink {
    rx: FrameReceiver,
    dispatcher: Dispatcher,
}

impl CommandLink {
    pub fn new() -> Self {
        Self {
            rx: FrameReceiver::new(),
            dispatcher: Dispatcher::new(),
        }
    }

    /// Drain all bytes currently available on `port`, dispatching each
    /// frame the moment its end marker arrives.  Returns once the port has
    /// nothing more to read.
    ///
    /// A single call can dispatch several commands (several end markers in
    /// the drained bytes) or none.  Read errors end the call; the bytes
    /// already accumulated stay in the receiver for the next poll.
    pub fn poll<T, A, C>(&mut self, port: &mut T, actuator: &mut A, clock: &C)
    where
        T: Transport,
        A: ActuatorPort,
        C: TimePort,
    {
        let mut buf = [0u8; 32];
        loop {
            let n = match port.read(&mut buf) {
                Ok(0) => return,
                Ok(n) => n,
                Err(e) => {
                    warn!("serial read failed: {:?}", e);
                    return;
                }
            };
            for &x in &buf[..n] {
                if self.rx.push(x) {
                    // Timestamp the frame now; a blocking command must not
                    // shift its own ack's Time field.
                    let now_ms = clock.uptime_ms();
                    self.dispatcher.dispatch(self.rx.body(), port, actuator, now_ms);
                }
            }
        }
    }
}

impl Default for CommandLink {
    fn default() -> Self {
        Self::new()
    }
}

/// Announce readiness to the host.  Sent once, before the poll loop starts.
pub fn send_ready_banner<T: Transport>(port: &mut T) {
    dispatch::write_all(port, READY_BANNER);
}
