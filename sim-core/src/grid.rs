use crate::error::{Result, SimError, ensure_nonzero};
use crate::types::Coord;

/// Fixed-size, row-major 2-D lattice.
///
/// Dimensions are fixed at construction. Neighborhood queries are clipped
/// at the edges (no wraparound), so border cells see fewer neighbors.
///
/// Simulations keep two grids of the same shape: the next state is written
/// into the back buffer from a read-only view of the front one, then the two
/// are swapped with [`std::mem::swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Creates a `rows × cols` grid with every cell set to `fill`.
    ///
    /// ### Errors
    /// [`crate::error::SimError::InvalidParameter`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Self> {
        ensure_nonzero("rows", rows)?;
        ensure_nonzero("cols", cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, `rows * cols`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// ### Panics
    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.cells[self.index(row, col)]
    }

    /// ### Panics
    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let i = self.index(row, col);
        self.cells[i] = value;
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Checked [`Grid::get`]; `None` outside the grid.
    pub fn try_get(&self, row: usize, col: usize) -> Option<T> {
        self.contains(row, col).then(|| self.cells[row * self.cols + col])
    }

    /// Checked [`Grid::set`].
    ///
    /// ### Errors
    /// [`SimError::InvalidParameter`] naming `row` or `col` when it is out
    /// of range.
    pub fn try_set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows {
            return Err(SimError::invalid(
                "row",
                format!("{row} is outside 0..{}", self.rows),
            ));
        }
        if col >= self.cols {
            return Err(SimError::invalid(
                "col",
                format!("{col} is outside 0..{}", self.cols),
            ));
        }
        self.cells[row * self.cols + col] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.cols)
    }

    /// Row-major `(coord, value)` pairs.
    pub fn indexed(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i / cols, i % cols), v))
    }

    /// Values in the 3×3 block centred on `(row, col)`, clipped at the edges.
    ///
    /// The centre cell itself is included.
    pub fn window(&self, row: usize, col: usize) -> impl Iterator<Item = T> + '_ {
        let r0 = row.saturating_sub(1);
        let r1 = (row + 2).min(self.rows);
        let c0 = col.saturating_sub(1);
        let c1 = (col + 2).min(self.cols);
        (r0..r1).flat_map(move |r| (c0..c1).map(move |c| self.get(r, c)))
    }

    /// Number of cells in the clipped 3×3 window around `(row, col)`,
    /// excluding the centre, that satisfy `pred`.
    pub fn count_neighbors(&self, row: usize, col: usize, pred: impl Fn(T) -> bool) -> usize {
        let own = usize::from(pred(self.get(row, col)));
        self.window(row, col).filter(|&v| pred(v)).count() - own
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}
