//! Frame scheduling
//!
//! A step reports whether it wants another frame. The loop owner keeps a
//! generation counter so that a frame callback queued by an earlier loop can
//! never step the session after it halted or restarted.

/// Returned by every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    /// Schedule another frame
    Continue,
    /// Stop the loop; no further steps may run
    Halt,
}

/// Source of monotonically increasing timestamps (ms)
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Synthetic display clock advancing a fixed amount per read
#[derive(Debug, Clone)]
pub struct FrameClock {
    time: f64,
    frame_ms: f64,
}

impl FrameClock {
    /// Nominal 60 Hz refresh
    pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn new(start: f64, frame_ms: f64) -> Self {
        Self {
            time: start,
            frame_ms,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.0, Self::DEFAULT_FRAME_MS)
    }
}

impl Clock for FrameClock {
    fn now(&mut self) -> f64 {
        self.time += self.frame_ms;
        self.time
    }
}

/// Identifies one run of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTicket(u64);

/// Owns loop cancellation
#[derive(Debug, Clone, Default)]
pub struct LoopGuard {
    generation: u64,
    running: bool,
}

impl LoopGuard {
    /// Start a new loop, invalidating every ticket handed out before
    pub fn begin(&mut self) -> LoopTicket {
        self.generation += 1;
        self.running = true;
        LoopTicket(self.generation)
    }

    /// Stop the loop. Idempotent.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Whether a frame scheduled under `ticket` may still step
    pub fn is_current(&self, ticket: LoopTicket) -> bool {
        self.running && ticket.0 == self.generation
    }
}

/// Synchronous driver for headless runs and tests: invoke `step` once per
/// frame until it halts or `max_frames` is reached. Returns the number of
/// steps that ran.
pub fn drive<C, F>(clock: &mut C, max_frames: u64, mut step: F) -> u64
where
    C: Clock,
    F: FnMut(f64) -> StepControl,
{
    let mut frames = 0;
    while frames < max_frames {
        let now = clock.now();
        frames += 1;
        if step(now) == StepControl::Halt {
            break;
        }
    }
    frames
}
