use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// Paces a loop to a target interval using absolute deadlines.
///
/// Each deadline is the previous one plus the interval, so sleep overshoot
/// does not accumulate. A loop that falls more than one tick behind is
/// resynchronized to the current instant instead of bursting to catch up.
pub struct FpsLimiter {
    deadline: Option<Instant>,
    frame_timer: Instant,
    frametime_smoothed: f64,
}

impl Default for FpsLimiter {
    fn default() -> Self {
        Self {
            deadline: None,
            frame_timer: Instant::now(),
            frametime_smoothed: 0.,
        }
    }
}

impl FpsLimiter {
    /// Measured ticks per second, smoothed; `0` before the first tick.
    pub fn fps(&self) -> f64 {
        if self.frametime_smoothed > 0. {
            1. / self.frametime_smoothed
        } else {
            0.
        }
    }

    /// Forgets the last deadline; the next `delay` measures from "now".
    pub fn reset(&mut self) {
        self.deadline = None;
        self.frame_timer = Instant::now();
    }

    pub fn delay(&mut self, interval: Duration) {
        let now = Instant::now();
        let mut target = match self.deadline {
            Some(prev) => prev + interval,
            None => now + interval,
        };
        if now > target + interval {
            target = now;
        }
        if target > now {
            sleep(target - now);
        }
        self.deadline = Some(target);

        let frametime = self.frame_timer.elapsed().as_secs_f64();
        if self.frametime_smoothed == 0. {
            self.frametime_smoothed = frametime;
        } else {
            self.frametime_smoothed += (frametime - self.frametime_smoothed) * 0.1;
        }
        self.frame_timer = Instant::now();
    }
}
