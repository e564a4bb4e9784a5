//!
//! Dense row-major matrix indexed by `(source, destination)`
//!
//! - Cell
//! - Matrix
//!
use itertools::Itertools; // for join
use std::ops::{Index, IndexMut};

/// Coordinate of a lane between a source (row) and a destination (column)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub source: usize,
    pub destination: usize,
}

impl Cell {
    pub fn new(source: usize, destination: usize) -> Cell {
        Cell {
            source,
            destination,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.source, self.destination)
    }
}

/// Rectangular grid of `rows * cols` values stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Matrix<T> {
    /// `rows * cols` matrix with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Matrix<T> {
        Matrix {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    ///
    /// Build from nested rows.
    ///
    /// Returns `Err((row, expected, found))` for the first row whose length
    /// differs from the first row.
    ///
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Matrix<T>, (usize, usize, usize)> {
        let cols = rows.first().map_or(0, |row| row.len());
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err((i, cols, row.len()));
            }
            data.extend(row);
        }
        Ok(Matrix {
            data,
            rows: n_rows,
            cols,
        })
    }

    /// append a row filled with `value`
    pub fn push_row(&mut self, value: T) {
        self.data.extend(std::iter::repeat(value).take(self.cols));
        self.rows += 1;
    }

    /// append a column filled with `value`
    pub fn push_col(&mut self, value: T) {
        let mut data = Vec::with_capacity(self.rows * (self.cols + 1));
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.push(value.clone());
        }
        self.data = data;
        self.cols += 1;
    }

    /// copy of the upper-left `rows * cols` block
    pub fn submatrix(&self, rows: usize, cols: usize) -> Matrix<T> {
        let rows = rows.min(self.rows);
        let cols = cols.min(self.cols);
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend_from_slice(&self.row(i)[..cols]);
        }
        Matrix { data, rows, cols }
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn get(&self, cell: Cell) -> Option<&T> {
        if cell.source < self.rows && cell.destination < self.cols {
            self.data.get(cell.source * self.cols + cell.destination)
        } else {
            None
        }
    }
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    /// iterate over the values of column `j` from top to bottom
    pub fn col(&self, j: usize) -> impl Iterator<Item = &T> + '_ {
        (0..self.rows).map(move |i| &self.data[i * self.cols + j])
    }
    /// all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |i| (0..cols).map(move |j| Cell::new(i, j)))
    }
    /// `(cell, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.cells().zip(self.data.iter())
    }
}

impl<T> Index<Cell> for Matrix<T> {
    type Output = T;
    fn index(&self, cell: Cell) -> &T {
        &self.data[cell.source * self.cols + cell.destination]
    }
}

impl<T> IndexMut<Cell> for Matrix<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        &mut self.data[cell.source * self.cols + cell.destination]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows {
            writeln!(f, "{}", self.row(i).iter().join("\t"))?;
        }
        Ok(())
    }
}
