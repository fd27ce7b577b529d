use std::fmt;

/// What observers receive on every cell change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellState {
    /// `1` if alive, `0` if dead.
    pub value: u8,
    /// Consecutive generations survived; always `0` for dead cells.
    pub alive_duration: u64,
}

impl CellState {
    pub fn is_alive(&self) -> bool {
        self.value != 0
    }
}

/// Handle returned by [`Cell::observe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub type Observer = Box<dyn Fn(CellState) + Send + 'static>;

/// A single cell of the grid.
///
/// Dead cells always have zero alive duration. Mutations that change what
/// an observer would draw (`toggle_value`, `increase_duration`) notify every
/// registered observer after the mutation is complete; `set_duration` and
/// `reset_duration` are silent and are expected to be followed by a toggle.
#[derive(Default)]
pub struct Cell {
    alive: bool,
    alive_duration: u64,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// `1` if alive, `0` if dead.
    pub fn value(&self) -> u8 {
        self.alive as u8
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn duration(&self) -> u64 {
        self.alive_duration
    }

    pub fn state(&self) -> CellState {
        CellState {
            value: self.value(),
            alive_duration: self.alive_duration,
        }
    }

    /// Flips the cell; a cell that dies also loses its alive duration.
    pub fn toggle_value(&mut self) {
        self.alive = !self.alive;
        if !self.alive {
            self.reset_duration();
        }
        self.notify();
    }

    /// Counts one more survived generation. Only valid on alive cells.
    pub fn increase_duration(&mut self) {
        debug_assert!(self.alive, "increase_duration on a dead cell");
        self.alive_duration += 1;
        self.notify();
    }

    /// Silent; the restore path calls `toggle_value` right after.
    pub fn set_duration(&mut self, duration: u64) {
        self.alive_duration = duration;
    }

    /// Silent; the value toggle is the visible event.
    pub fn reset_duration(&mut self) {
        self.alive_duration = 0;
    }

    pub fn observe<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn(CellState) + Send + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not registered on this cell.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self) {
        let state = self.state();
        for (_, observer) in &self.observers {
            observer(state);
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("alive", &self.alive)
            .field("alive_duration", &self.alive_duration)
            .field("observers", &self.observers.len())
            .finish()
    }
}
