mod cell;
mod control;
mod error;
mod grid;
mod gui;
mod simulation;
mod snapshot;
mod utils;

pub use cell::{Cell, CellState, Observer, ObserverId};
pub use control::{Control, LoopState};
pub use error::GridError;
pub use grid::{Grid, SharedGrid, StepStats, Transitions};
pub use gui::App;
pub use simulation::SimulationLoop;
pub use snapshot::Snapshot;
pub use utils::{Config, FpsLimiter};
