use std::time::Duration;

/// Crate-wide defaults.
pub struct Config;

impl Config {
    /// Target updates per second of a freshly created grid.
    pub const DEFAULT_FPS: f64 = 30.;
    /// How long a paused simulation loop sleeps before re-checking its signals.
    pub const IDLE_INTERVAL: Duration = Duration::from_millis(100);

    pub const DEFAULT_ROWS: usize = 60;
    pub const DEFAULT_COLS: usize = 80;
    pub const FILL_RATE: f64 = 0.3;

    pub const MIN_FPS: f64 = 1.;
    pub const MAX_FPS: f64 = 240.;

    /// Keeps a requested rate inside `MIN_FPS..=MAX_FPS`, so a running loop
    /// never sleeps longer than one second per tick. NaN is passed through
    /// for `Grid::set_target_rate` to reject.
    pub fn clamp_fps(fps: f64) -> f64 {
        fps.clamp(Self::MIN_FPS, Self::MAX_FPS)
    }
}
