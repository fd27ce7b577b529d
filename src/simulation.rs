use crate::{Config, Control, FpsLimiter, LoopState, SharedGrid};
use std::{
    io,
    thread::{self, sleep, JoinHandle},
    time::Duration,
};

/// Background driver that advances a shared grid at its configured rate.
///
/// The loop reads its [`Control`] at the top of every iteration:
/// - `Running`: one `update_grid` under the grid lock, then a wait until the
///   next tick deadline (the interval is re-read every tick);
/// - `Paused`: sleep for the idle interval and re-check;
/// - `Stopped`: return.
///
/// The smoothed rate it achieves is published through
/// [`Control::measured_rate`].
pub struct SimulationLoop {
    grid: SharedGrid,
    control: Control,
    idle_interval: Duration,
    limiter: FpsLimiter,
}

impl SimulationLoop {
    pub fn new(grid: SharedGrid, control: Control) -> Self {
        Self {
            grid,
            control,
            idle_interval: Config::IDLE_INTERVAL,
            limiter: FpsLimiter::default(),
        }
    }

    pub fn with_idle_interval(mut self, idle_interval: Duration) -> Self {
        self.idle_interval = idle_interval;
        self
    }

    pub fn state(&self) -> LoopState {
        self.control.state()
    }

    /// Runs on the current thread until the control is shut down.
    pub fn run(mut self) {
        let (rows, cols) = self.grid.lock().dimensions();
        tracing::info!(rows, cols, "simulation loop started");

        let mut last_state = None;
        loop {
            let state = self.control.state();
            if last_state != Some(state) {
                tracing::debug!(?state, "simulation state changed");
                last_state = Some(state);
            }

            match state {
                LoopState::Stopped => break,
                LoopState::Paused => {
                    self.limiter.reset();
                    self.control.publish_measured_rate(0.);
                    sleep(self.idle_interval);
                }
                LoopState::Running => {
                    let (stats, interval, generation) = {
                        let mut grid = self.grid.lock();
                        let stats = grid.update_grid();
                        (stats, grid.sleep_interval(), grid.generation())
                    };
                    tracing::trace!(generation, ?stats, "tick");
                    self.limiter.delay(interval);
                    self.control.publish_measured_rate(self.limiter.fps());
                }
            }
        }

        let generation = self.grid.lock().generation();
        tracing::info!(generation, "simulation loop stopped");
    }

    /// Moves the loop onto a dedicated thread named `simulation`.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("simulation".to_string())
            .spawn(move || self.run())
    }
}
