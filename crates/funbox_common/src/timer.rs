use std::time::Instant;

/// Frames slower than this many milliseconds get a diagnostic line.
pub const LONG_FRAME_THRESHOLD_MS: u32 = 150;

/// Monotonic millisecond clock.
pub trait Clock {
    fn ticks_ms(&mut self) -> u32;
}

/// Milliseconds since construction, backed by `Instant`.
#[derive(Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn ticks_ms(&mut self) -> u32 {
        // wraps after ~49 days, same as SDL_GetTicks
        self.origin.elapsed().as_millis() as u32
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TimerSnapshot {
    pub frame_delta: u32,
    pub elapsed_ms: u32,
    pub long_frame: bool,
}

/// Wall-clock bookkeeping for the frame loop.
#[derive(Debug, Clone)]
pub struct Timer {
    frame_delta: u32,
    elapsed_ms: u32,
    long_frame_threshold_ms: u32,
}

impl Timer {
    /// Start timing from the clock's current reading.
    pub fn start(clock: &mut impl Clock) -> Self {
        Self {
            frame_delta: 0,
            elapsed_ms: clock.ticks_ms(),
            long_frame_threshold_ms: LONG_FRAME_THRESHOLD_MS,
        }
    }

    pub fn with_long_frame_threshold(mut self, threshold_ms: u32) -> Self {
        self.long_frame_threshold_ms = threshold_ms;
        self
    }

    /// Read the clock once and advance. A clock reading older than the last one
    /// is treated as no time passing.
    pub fn update(&mut self, clock: &mut impl Clock) -> TimerSnapshot {
        let now = clock.ticks_ms().max(self.elapsed_ms);
        self.frame_delta = now - self.elapsed_ms;
        self.elapsed_ms = now;

        let long_frame = self.frame_delta > self.long_frame_threshold_ms;
        if long_frame {
            log::warn!(
                "long frame: {} ms (elapsed {} ms)",
                self.frame_delta,
                self.elapsed_ms
            );
        }

        TimerSnapshot {
            frame_delta: self.frame_delta,
            elapsed_ms: self.elapsed_ms,
            long_frame,
        }
    }

    pub fn frame_delta(&self) -> u32 {
        self.frame_delta
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}
