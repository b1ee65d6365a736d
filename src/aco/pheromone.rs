//! Pheromone matrix.

/// A `rows × cols` matrix of non-negative pheromone weights.
///
/// Row = level index, column = variable. Cell `(r, c)` is the accumulated
/// preference for giving variable `c` level `r`. Storage is row-major.
///
/// All mutating operations keep every cell `>= 0` as long as deposits are
/// non-negative and evaporation factors lie in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates a matrix with every cell set to `value`.
    pub fn new(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, 0.0)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.cols + col] = value;
    }

    /// Pheromone of rows `0..n` in column `col`.
    pub fn column_prefix(&self, col: usize, n: usize) -> impl Iterator<Item = f64> + '_ {
        (0..n.min(self.rows)).map(move |r| self.get(r, col))
    }

    /// Adds `qty` to the cell each column's row selects.
    ///
    /// # Panics
    /// Panics if `path` is longer than the number of columns or names a row
    /// outside the matrix.
    pub fn deposit(&mut self, path: &[usize], qty: f64) {
        assert!(path.len() <= self.cols, "path longer than matrix width");
        for (col, &row) in path.iter().enumerate() {
            self.cells[row * self.cols + col] += qty;
        }
    }

    /// Multiplies every cell by `factor`.
    pub fn evaporate(&mut self, factor: f64) {
        for cell in &mut self.cells {
            *cell *= factor;
        }
    }

    /// Adds `other` cell by cell.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn add(&mut self, other: &PheromoneMatrix) {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "pheromone matrix shape mismatch"
        );
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            *a += b;
        }
    }

    /// Smallest cell value.
    pub fn min(&self) -> f64 {
        self.cells.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Row-major view of the cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }
}
