//! Conway's Game of Life on a bounded grid.
//!
//! The Moore neighborhood is clipped at the border: there is no wraparound,
//! so edge and corner cells have 5 and 3 neighbors respectively.

use rand::Rng;

use crate::config::Life2dConfig;
use crate::error::{Result, ensure_probability};
use crate::grid::Grid;
use crate::rng::uniform01;
use crate::types::Bit;

#[derive(Debug, Clone)]
pub struct Life2D {
    grid: Grid<Bit>,
    scratch: Grid<Bit>,
    generation: u64,
}

impl Life2D {
    /// Creates an all-dead `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let grid = Grid::new(rows, cols, 0)?;
        Ok(Self {
            scratch: grid.clone(),
            grid,
            generation: 0,
        })
    }

    /// Creates a grid from `cfg` and randomizes it with `cfg.p_alive`.
    pub fn from_config<R: Rng + ?Sized>(cfg: &Life2dConfig, rng: &mut R) -> Result<Self> {
        cfg.validate()?;
        let mut life = Self::new(cfg.rows, cfg.cols)?;
        life.randomize(cfg.p_alive, rng)?;
        Ok(life)
    }

    /// Sets each cell alive independently with probability `p`, one uniform
    /// draw per cell in row-major order.
    pub fn randomize<R: Rng + ?Sized>(&mut self, p: f64, rng: &mut R) -> Result<()> {
        ensure_probability("p", p)?;
        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                self.grid.set(r, c, Bit::from(uniform01(rng) < p));
            }
        }
        self.generation = 0;
        Ok(())
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.grid.fill(0);
        self.generation = 0;
    }

    /// ### Errors
    /// [`crate::error::SimError::InvalidParameter`] if `(row, col)` is
    /// outside the grid.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        self.grid.try_set(row, col, Bit::from(alive))
    }

    /// `None` outside the grid.
    pub fn is_alive(&self, row: usize, col: usize) -> Option<bool> {
        self.grid.try_get(row, col).map(|v| v == 1)
    }

    /// Advances one generation under B3/S23.
    ///
    /// All cells are computed from the pre-step grid into the back buffer,
    /// which then replaces the front one.
    pub fn step(&mut self) {
        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                let live = self.grid.count_neighbors(r, c, |v| v == 1);
                let next = match (self.grid.get(r, c), live) {
                    (1, 2) | (1, 3) => 1,
                    (0, 3) => 1,
                    _ => 0,
                };
                self.scratch.set(r, c, next);
            }
        }
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            population = self.population(),
            "life2d step"
        );
    }

    /// Read-only view of the current grid.
    pub fn grid(&self) -> &Grid<Bit> {
        &self.grid
    }

    pub fn population(&self) -> usize {
        self.grid.cells().iter().filter(|&&v| v == 1).count()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
