use crate::{Cell, CellState, Config, GridError, ObserverId, Snapshot};
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};

/// Grid shared between the simulation thread and the foreground.
///
/// `update_grid`, `reset`, `restore` and cell edits all happen under this
/// one lock, so they never interleave at cell granularity.
pub type SharedGrid = Arc<Mutex<Grid>>;

/// Coordinates bucketed by the compute phase of [`Grid::update_grid`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
    /// Dead cells with exactly 3 alive neighbors.
    pub births: Vec<(usize, usize)>,
    /// Alive cells with 2 or 3 alive neighbors.
    pub survivals: Vec<(usize, usize)>,
    /// Alive cells with any other neighbor count.
    pub deaths: Vec<(usize, usize)>,
}

/// Bucket sizes of one generation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub births: usize,
    pub survivals: usize,
    pub deaths: usize,
}

/// Bounded (no wraparound) Game of Life field of observable cells.
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    tick_interval: Duration,
    generation: u64,
}

impl Grid {
    /// Creates an all-dead grid ticking at [`Config::DEFAULT_FPS`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        let size = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: (0..size).map(|_| Cell::new()).collect(),
            tick_interval: Self::interval_for(Config::DEFAULT_FPS),
            generation: 0,
        })
    }

    pub fn into_shared(self) -> SharedGrid {
        Arc::new(Mutex::new(self))
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of completed generations since creation, reset or restore.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, GridError> {
        let i = self.index(row, col)?;
        Ok(&self.cells[i])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, GridError> {
        let i = self.index(row, col)?;
        Ok(&mut self.cells[i])
    }

    /// Flips a single cell, e.g. in response to a click.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.cell_mut(row, col)?.toggle_value();
        Ok(())
    }

    pub fn observe_cell<F>(
        &mut self,
        row: usize,
        col: usize,
        observer: F,
    ) -> Result<ObserverId, GridError>
    where
        F: Fn(CellState) + Send + 'static,
    {
        Ok(self.cell_mut(row, col)?.observe(observer))
    }

    /// Registers `observer` on every cell; it receives the cell coordinates
    /// together with the new state.
    pub fn observe_all<F>(&mut self, observer: F) -> Vec<ObserverId>
    where
        F: Fn(usize, usize, CellState) + Send + Sync + 'static,
    {
        let observer = Arc::new(observer);
        let cols = self.cols;
        self.cells
            .iter_mut()
            .enumerate()
            .map(|(i, cell)| {
                let observer = Arc::clone(&observer);
                let (row, col) = (i / cols, i % cols);
                cell.observe(move |state| (*observer)(row, col, state))
            })
            .collect()
    }

    /// Kills every alive cell. Dead cells are left alone, so an empty grid
    /// emits no notifications.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_alive()) {
            cell.toggle_value();
        }
        self.generation = 0;
        tracing::debug!(rows = self.rows, cols = self.cols, "grid reset");
    }

    /// Number of alive cells in the Moore neighborhood of `(row, col)`.
    ///
    /// Positions outside the grid do not exist; there is no wraparound.
    pub fn alive_neighbors(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.index(row, col)?;
        Ok(self.count_neighbors(row, col))
    }

    /// `alive_neighbors` for coordinates already known to be in bounds.
    fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let r1 = row.saturating_sub(1);
        let r2 = (row + 1).min(self.rows - 1);
        let c1 = col.saturating_sub(1);
        let c2 = (col + 1).min(self.cols - 1);

        let mut count = 0;
        for r in r1..=r2 {
            for c in c1..=c2 {
                if (r, c) != (row, col) {
                    count += self.cells[r * self.cols + c].value();
                }
            }
        }
        count
    }

    /// Compute phase: classifies every cell against the current generation
    /// without mutating anything.
    pub fn transitions(&self) -> Transitions {
        let mut transitions = Transitions::default();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let neibs = self.count_neighbors(row, col);
                let alive = self.cells[row * self.cols + col].is_alive();
                match (alive, neibs) {
                    (true, 2 | 3) => transitions.survivals.push((row, col)),
                    (true, _) => transitions.deaths.push((row, col)),
                    (false, 3) => transitions.births.push((row, col)),
                    (false, _) => {}
                }
            }
        }
        transitions
    }

    /// Advances one generation.
    ///
    /// All cells are classified first; then births are committed, then
    /// survivals, then deaths. No cell read during classification sees a
    /// mutation made by the same step.
    pub fn update_grid(&mut self) -> StepStats {
        let transitions = self.transitions();
        let stats = StepStats {
            births: transitions.births.len(),
            survivals: transitions.survivals.len(),
            deaths: transitions.deaths.len(),
        };
        self.commit(transitions);
        self.generation += 1;
        stats
    }

    fn commit(&mut self, transitions: Transitions) {
        let cols = self.cols;
        for (row, col) in transitions.births {
            self.cells[row * cols + col].toggle_value();
        }
        for (row, col) in transitions.survivals {
            self.cells[row * cols + col].increase_duration();
        }
        for (row, col) in transitions.deaths {
            let cell = &mut self.cells[row * cols + col];
            cell.toggle_value();
            cell.reset_duration();
        }
    }

    /// Delay between two generations of a running simulation.
    pub fn sleep_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Sets the tick interval to `1 / fps` seconds rounded to milliseconds.
    ///
    /// Non-positive and non-finite rates are rejected and leave the interval
    /// unchanged.
    pub fn set_target_rate(&mut self, fps: f64) -> Result<(), GridError> {
        if !(fps.is_finite() && fps > 0.) {
            let err = GridError::InvalidRate(fps);
            tracing::warn!(fps, error = err.as_label(), "rejected target rate");
            return Err(err);
        }
        self.tick_interval = Self::interval_for(fps);
        tracing::debug!(fps, interval = ?self.tick_interval, "target rate changed");
        Ok(())
    }

    fn interval_for(fps: f64) -> Duration {
        Duration::from_millis((1000. / fps).round() as u64)
    }

    pub fn snapshot(&self) -> Snapshot {
        let cells = self
            .cells
            .iter()
            .map(|c| c.is_alive().then_some(c.duration()))
            .collect();
        Snapshot::from_cells(self.rows, self.cols, cells)
    }

    /// Replaces the grid contents with `snapshot`.
    ///
    /// The grid is reset first; each alive cell then gets its duration set
    /// silently and is toggled, so it emits exactly one notification that
    /// already carries the restored duration.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), GridError> {
        if snapshot.dimensions() != self.dimensions() {
            return Err(GridError::DimensionMismatch {
                expected: self.dimensions(),
                found: snapshot.dimensions(),
            });
        }
        self.reset();
        for (row, col, duration) in snapshot.alive_cells() {
            let cell = &mut self.cells[row * self.cols + col];
            cell.set_duration(duration);
            cell.toggle_value();
        }
        tracing::debug!(population = snapshot.alive_count(), "grid restored");
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("population", &self.population())
            .field("generation", &self.generation)
            .field("tick_interval", &self.tick_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, StepStats};
    use crate::{GridError, Snapshot};
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    fn with_alive(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in alive {
            grid.toggle_cell(row, col).unwrap();
        }
        grid
    }

    fn alive_set(grid: &Grid) -> Vec<(usize, usize)> {
        let (rows, cols) = grid.dimensions();
        let mut alive = vec![];
        for row in 0..rows {
            for col in 0..cols {
                if grid.cell(row, col).unwrap().is_alive() {
                    alive.push((row, col));
                }
            }
        }
        alive
    }

    fn assert_duration_invariant(grid: &Grid) {
        let (rows, cols) = grid.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let cell = grid.cell(row, col).unwrap();
                assert!(cell.is_alive() || cell.duration() == 0, "({row}, {col})");
            }
        }
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Grid::new(0, 3),
            Err(GridError::EmptyGrid { rows: 0, cols: 3 })
        ));
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn test_new_rejects_overflow() {
        let rows = usize::MAX / 2 + 1;
        assert_eq!(
            Grid::new(rows, 2).unwrap_err(),
            GridError::TooLarge { rows, cols: 2 }
        );
    }

    #[test]
    fn test_neighbors_out_of_bounds() {
        let grid = with_alive(5, 5, &[(4, 4)]);
        assert_eq!(grid.alive_neighbors(3, 3), Ok(1));
        assert!(matches!(
            grid.alive_neighbors(5, 5),
            Err(GridError::OutOfBounds { row: 5, col: 5, .. })
        ));
        assert!(grid.alive_neighbors(0, 5).is_err());
    }

    #[test]
    fn test_commit_order() {
        // L-tromino plus a lonely cell: one birth, three survivals, one death
        let mut grid = with_alive(6, 6, &[(1, 1), (1, 2), (2, 1), (4, 4)]);
        let seen = Arc::new(parking_lot::Mutex::new(vec![]));
        let sink = Arc::clone(&seen);
        grid.observe_all(move |row, col, state| {
            sink.lock().push((row, col, state.value, state.alive_duration));
        });

        grid.update_grid();
        assert_eq!(
            *seen.lock(),
            vec![
                (2, 2, 1, 0),
                (1, 1, 1, 1),
                (1, 2, 1, 1),
                (2, 1, 1, 1),
                (4, 4, 0, 0),
            ]
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 6).unwrap();
        assert_eq!(grid.dimensions(), (4, 6));
        assert!(grid.cell(3, 5).is_ok());
        assert_eq!(
            grid.cell(4, 0).unwrap_err(),
            GridError::OutOfBounds {
                row: 4,
                col: 0,
                rows: 4,
                cols: 6
            }
        );
        assert!(grid.cell_mut(0, 6).is_err());
        assert!(grid.toggle_cell(9, 9).is_err());
    }

    #[test]
    fn test_single_cell_neighbors() {
        let grid = with_alive(5, 5, &[(2, 2)]);
        for row in 1..=3 {
            for col in 1..=3 {
                if (row, col) != (2, 2) {
                    assert_eq!(grid.alive_neighbors(row, col), Ok(1));
                }
            }
        }
        assert_eq!(grid.alive_neighbors(2, 2), Ok(0));
        assert_eq!(grid.alive_neighbors(0, 0), Ok(0));
    }

    #[test]
    fn test_edges_and_corners() {
        let full = (0..4).flat_map(|r| (0..4).map(move |c| (r, c))).collect::<Vec<_>>();
        let grid = with_alive(4, 4, &full);
        assert_eq!(grid.alive_neighbors(0, 0), Ok(3));
        assert_eq!(grid.alive_neighbors(3, 3), Ok(3));
        assert_eq!(grid.alive_neighbors(0, 3), Ok(3));
        assert_eq!(grid.alive_neighbors(0, 1), Ok(5));
        assert_eq!(grid.alive_neighbors(2, 3), Ok(5));
        assert_eq!(grid.alive_neighbors(1, 1), Ok(8));

        let single = with_alive(1, 1, &[(0, 0)]);
        assert_eq!(single.alive_neighbors(0, 0), Ok(0));
    }

    #[test]
    fn test_transitions_buckets() {
        // L-tromino: all three survive, the missing corner is born
        let grid = with_alive(4, 4, &[(1, 1), (1, 2), (2, 1)]);
        let transitions = grid.transitions();
        assert_eq!(transitions.births, vec![(2, 2)]);
        assert_eq!(transitions.survivals, vec![(1, 1), (1, 2), (2, 1)]);
        assert!(transitions.deaths.is_empty());
    }

    #[test]
    fn test_rules() {
        let mut grid = with_alive(6, 6, &[(1, 1), (1, 2), (2, 1), (4, 4)]);
        let stats = grid.update_grid();
        assert_eq!(
            stats,
            StepStats {
                births: 1,
                survivals: 3,
                deaths: 1
            }
        );

        let born = grid.cell(2, 2).unwrap();
        assert_eq!((born.value(), born.duration()), (1, 0));
        let survivor = grid.cell(1, 1).unwrap();
        assert_eq!((survivor.value(), survivor.duration()), (1, 1));
        let dead = grid.cell(4, 4).unwrap();
        assert_eq!((dead.value(), dead.duration()), (0, 0));
        assert_eq!(grid.generation(), 1);

        // block is still life: durations keep growing
        grid.update_grid();
        assert_eq!(grid.cell(1, 1).unwrap().duration(), 2);
        assert_eq!(grid.cell(2, 2).unwrap().duration(), 1);
        assert_duration_invariant(&grid);
    }

    #[test]
    fn test_blinker() {
        let horizontal = vec![(1, 1), (1, 2), (1, 3)];
        let vertical = vec![(0, 2), (1, 2), (2, 2)];
        let mut grid = with_alive(5, 5, &horizontal);

        grid.update_grid();
        assert_eq!(alive_set(&grid), vertical);
        grid.update_grid();
        assert_eq!(alive_set(&grid), horizontal);
        // only the center survived both steps
        assert_eq!(grid.cell(1, 2).unwrap().duration(), 2);
        assert_eq!(grid.cell(1, 1).unwrap().duration(), 0);
    }

    #[test]
    fn test_reset() {
        let mut grid = Grid::new(5, 5).unwrap();
        let events = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&events);
        grid.observe_all(move |_, _, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        grid.reset();
        assert_eq!(events.load(Ordering::Relaxed), 0);

        for (row, col) in [(0, 0), (1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.toggle_cell(row, col).unwrap();
        }
        grid.update_grid();
        events.store(0, Ordering::Relaxed);

        let population = grid.population();
        grid.reset();
        assert_eq!(events.load(Ordering::Relaxed), population);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
        assert_duration_invariant(&grid);
    }

    #[test]
    fn test_observe_all_reports_coordinates() {
        let mut grid = Grid::new(3, 3).unwrap();
        let seen = Arc::new(parking_lot::Mutex::new(vec![]));
        let sink = Arc::clone(&seen);
        let ids = grid.observe_all(move |row, col, state| {
            sink.lock().push((row, col, state.value));
        });
        assert_eq!(ids.len(), 9);

        grid.toggle_cell(2, 1).unwrap();
        assert_eq!(*seen.lock(), vec![(2, 1, 1)]);

        assert!(grid.cell_mut(2, 1).unwrap().unobserve(ids[7]));
        grid.toggle_cell(2, 1).unwrap();
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_observe_cell() {
        let mut grid = with_alive(3, 3, &[(0, 1), (1, 1), (2, 1)]);
        let durations = Arc::new(parking_lot::Mutex::new(vec![]));
        let sink = Arc::clone(&durations);
        grid.observe_cell(1, 1, move |state| sink.lock().push(state.alive_duration))
            .unwrap();
        assert!(grid.observe_cell(3, 0, |_| {}).is_err());

        // the blinker center survives every step
        grid.update_grid();
        grid.update_grid();
        assert_eq!(*durations.lock(), vec![1, 2]);
    }

    #[test]
    fn test_target_rate() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.sleep_interval(), Duration::from_millis(33));

        grid.set_target_rate(10.).unwrap();
        assert_eq!(grid.sleep_interval(), Duration::from_millis(100));
        grid.set_target_rate(30.).unwrap();
        assert_eq!(grid.sleep_interval(), Duration::from_millis(33));
        assert_eq!(grid.sleep_interval().as_secs_f64(), 0.033);

        for fps in [0., -5., f64::NAN, f64::INFINITY] {
            assert!(matches!(grid.set_target_rate(fps), Err(GridError::InvalidRate(_))));
        }
        assert_eq!(grid.sleep_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut grid = with_alive(4, 4, &[(0, 0)]);
        let mut snapshot = Snapshot::blank(4, 4);
        snapshot.set_alive(1, 1, 5).unwrap();
        snapshot.set_alive(3, 2, 0).unwrap();

        let seen = Arc::new(parking_lot::Mutex::new(vec![]));
        let sink = Arc::clone(&seen);
        grid.observe_all(move |row, col, state| sink.lock().push((row, col, state)));

        grid.restore(&snapshot).unwrap();
        assert_eq!(grid.snapshot(), snapshot);

        let seen = seen.lock();
        assert_eq!(seen.len(), 3);
        assert_eq!((seen[0].0, seen[0].1, seen[0].2.value), (0, 0, 0));
        assert_eq!((seen[1].0, seen[1].1), (1, 1));
        assert_eq!(seen[1].2.alive_duration, 5);
        assert_duration_invariant(&grid);

        assert_eq!(
            grid.restore(&Snapshot::blank(3, 4)),
            Err(GridError::DimensionMismatch {
                expected: (4, 4),
                found: (3, 4)
            })
        );
    }
}
