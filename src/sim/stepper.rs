/// Turns variable frame durations into a whole number of fixed ticks.
///
/// Leftover time is carried to the next frame. If a frame takes so long that
/// more than `max_ticks_per_frame` ticks are owed, the excess is dropped
/// instead of being caught up on later.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStepper {
    tick_len_ms: f64,
    max_ticks_per_frame: u32,
    accumulated_ms: f64,
}

impl FixedStepper {
    pub fn new(ticks_per_second: f64, max_ticks_per_frame: u32) -> Self {
        let ticks_per_second = if ticks_per_second > 0.0 && ticks_per_second.is_finite() {
            ticks_per_second
        } else {
            60.0
        };
        Self {
            tick_len_ms: 1000.0 / ticks_per_second,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulated_ms: 0.0,
        }
    }

    /// Feeds one frame's elapsed time and returns how many ticks to run.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulated_ms += elapsed_ms;
        }

        let owed = (self.accumulated_ms / self.tick_len_ms).floor();
        if owed > self.max_ticks_per_frame as f64 {
            self.accumulated_ms = 0.0;
            return self.max_ticks_per_frame;
        }

        self.accumulated_ms -= owed * self.tick_len_ms;
        owed as u32
    }

    #[inline]
    pub fn tick_len_ms(&self) -> f64 {
        self.tick_len_ms
    }
}
