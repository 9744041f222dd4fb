//! Fall timer - cancellable, reschedulable repeating timer
//!
//! The engine owns exactly one `FallTimer`. It can be driven two ways:
//!
//! - **Fixed step**: the caller feeds elapsed time with [`FallTimer::accumulate`]
//!   and drains due fires with [`FallTimer::take_due`].
//! - **External scheduler**: the caller registers one periodic callback for the
//!   current [`TimerHandle`] and reports each fire back to the engine, which
//!   drops fires whose handle is no longer current.
//!
//! Every `schedule` and every `cancel` of an armed timer bumps the generation,
//! so no handle issued before a speed change, game over or restart can fire.

/// Identifies one registration of the fall timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub generation: u64,
    pub interval_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallTimer {
    interval_ms: u32,
    elapsed_ms: u32,
    armed: bool,
    generation: u64,
}

impl FallTimer {
    /// A disarmed timer
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
            armed: false,
            generation: 0,
        }
    }

    /// Cancel any registration and re-arm at `interval_ms`
    pub fn schedule(&mut self, interval_ms: u32) -> TimerHandle {
        debug_assert!(interval_ms > 0, "fall interval must be positive");
        self.generation = self.generation.wrapping_add(1);
        self.interval_ms = interval_ms;
        self.elapsed_ms = 0;
        self.armed = true;
        TimerHandle {
            generation: self.generation,
            interval_ms,
        }
    }

    /// Stop the timer. Calling it again has no further effect.
    pub fn cancel(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current registration, `None` while cancelled
    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed.then_some(TimerHandle {
            generation: self.generation,
            interval_ms: self.interval_ms,
        })
    }

    /// Whether a fire carrying `handle` should still be honoured
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.armed && handle.generation == self.generation
    }

    /// Add elapsed time; ignored while cancelled
    pub fn accumulate(&mut self, elapsed_ms: u32) {
        if self.armed {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Consume one interval if a fire is due
    pub fn take_due(&mut self) -> bool {
        if !self.armed || self.elapsed_ms < self.interval_ms {
            return false;
        }
        self.elapsed_ms -= self.interval_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_disarmed() {
        let mut timer = FallTimer::new(500);
        assert!(!timer.is_armed());
        assert!(timer.handle().is_none());
        timer.accumulate(10_000);
        assert!(!timer.take_due());
    }

    #[test]
    fn test_accumulate_fires_per_interval() {
        let mut timer = FallTimer::new(500);
        timer.schedule(100);
        timer.accumulate(250);
        assert!(timer.take_due());
        assert!(timer.take_due());
        assert!(!timer.take_due());
        timer.accumulate(50);
        assert!(timer.take_due());
    }

    #[test]
    fn test_cancel_is_idempotent_and_invalidates_handle() {
        let mut timer = FallTimer::new(500);
        let handle = timer.schedule(500);
        assert!(timer.is_current(handle));

        timer.cancel();
        let generation = timer.generation();
        timer.cancel();
        assert_eq!(timer.generation(), generation);
        assert!(!timer.is_current(handle));
    }

    #[test]
    fn test_reschedule_replaces_registration() {
        let mut timer = FallTimer::new(500);
        let old = timer.schedule(500);
        timer.accumulate(400);
        let new = timer.schedule(450);
        assert!(!timer.is_current(old));
        assert!(timer.is_current(new));
        // Elapsed time does not carry over to the new registration.
        timer.accumulate(100);
        assert!(!timer.take_due());
    }
}
