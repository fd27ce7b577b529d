use crate::GridError;

/// Detached copy of a grid state.
///
/// Each entry is `None` for a dead cell or `Some(alive_duration)` for an
/// alive one, so a dead cell with a non-zero duration cannot be expressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    cells: Vec<Option<u64>>,
}

impl Snapshot {
    /// All-dead snapshot of the given size.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Row-major entries, one per cell.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Option<u64>>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    /// Random soup: each cell is alive with probability `fill_rate`,
    /// with zero alive duration.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random(rows: usize, cols: usize, seed: Option<u64>, fill_rate: f64) -> Self {
        use rand::{Rng, SeedableRng};

        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_entropy()
        };
        let fill_rate = if fill_rate.is_nan() {
            0.
        } else {
            fill_rate.clamp(0., 1.)
        };
        let cells = (0..rows * cols)
            .map(|_| rng.gen_bool(fill_rate).then_some(0))
            .collect();
        Self { rows, cols, cells }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `Some(alive_duration)` if the cell is alive.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<u64>, GridError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i])
    }

    pub fn set_alive(&mut self, row: usize, col: usize, duration: u64) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = Some(duration);
        Ok(())
    }

    pub fn set_dead(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = None;
        Ok(())
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Alive cells in row-major order as `(row, col, alive_duration)`.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|d| (i / cols, i % cols, d)))
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
