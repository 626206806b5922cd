//! Port traits — the boundary between the comms core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ comms (domain)
//! ```
//!
//! Driven adapters (pump relays, illumination/colour hardware, the clock)
//! implement these traits.  The dispatcher consumes them via generics, so
//! the protocol logic never touches hardware directly and the whole comms
//! stack runs under test with mocks.

/// Averaged colour measurement, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Write-side port: the dispatcher calls this to drive the cell hardware.
///
/// Both operations are **blocking** — the poll loop stands still while they
/// run.  That is the protocol's concurrency model, not an implementation
/// shortcut: the host expects the acknowledgment timing to reflect it.
pub trait ActuatorPort {
    /// Energise the pump relay on GPIO `pin` for `duration_secs` seconds,
    /// then release it.  Blocks for the full duration.
    fn run_pump(&mut self, pin: i32, duration_secs: f32);

    /// Run the illumination + colour sampling sequence and return the
    /// per-channel average.  Blocks for the whole sequence (about 1.3 s
    /// with default timing).
    fn run_measurement(&mut self) -> Rgb;
}

/// Monotonic time source for the reply timestamps.
pub trait TimePort {
    /// Milliseconds since boot (monotonic).
    fn uptime_ms(&self) -> u64;
}
