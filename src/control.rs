use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

/// State of a [`SimulationLoop`](crate::SimulationLoop) as seen through its
/// control signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Process shutdown requested; terminal.
    Stopped,
    /// Advancing generations.
    Running,
    /// Alive but not advancing.
    Paused,
}

struct Signals {
    active: AtomicBool,
    alive: AtomicBool,
    measured_rate: AtomicU64, // f64 bits
}

/// Two independently settable flags shared between the foreground and the
/// simulation loop: "simulation active" (pause/resume) and "process alive"
/// (run/stop).
///
/// Cloning is cheap and every clone observes the same flags. A new control
/// is alive and paused. The loop also publishes its measured rate here.
#[derive(Clone)]
pub struct Control {
    signals: Arc<Signals>,
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

impl Control {
    pub fn new() -> Self {
        Self {
            signals: Arc::new(Signals {
                active: AtomicBool::new(false),
                alive: AtomicBool::new(true),
                measured_rate: AtomicU64::new(0f64.to_bits()),
            }),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.signals.active.store(active, Ordering::Release);
    }

    pub fn resume(&self) {
        self.set_active(true);
    }

    pub fn pause(&self) {
        self.set_active(false);
    }

    pub fn is_active(&self) -> bool {
        self.signals.active.load(Ordering::Acquire)
    }

    /// Clears the alive flag. Irreversible.
    pub fn shutdown(&self) {
        self.signals.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.signals.alive.load(Ordering::Acquire)
    }

    /// Generations per second actually achieved by the running loop,
    /// smoothed; `0` while paused or before the first tick.
    pub fn measured_rate(&self) -> f64 {
        f64::from_bits(self.signals.measured_rate.load(Ordering::Relaxed))
    }

    pub(crate) fn publish_measured_rate(&self, fps: f64) {
        self.signals
            .measured_rate
            .store(fps.to_bits(), Ordering::Relaxed);
    }

    pub fn state(&self) -> LoopState {
        if !self.is_alive() {
            LoopState::Stopped
        } else if self.is_active() {
            LoopState::Running
        } else {
            LoopState::Paused
        }
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("active", &self.is_active())
            .field("alive", &self.is_alive())
            .finish()
    }
}
