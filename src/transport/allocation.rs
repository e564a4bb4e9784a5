//! Allocation definitions
//! - Allocation
//! - feasibility checks
//!
use super::amount::AmountLike;
use super::matrix::{Cell, Matrix};
use std::ops::Index;

/// Allocation definitions
///
/// Allocation is a mapping of shipped quantity to each cell, together with
/// the basis (set of basic cells) the stepping-stone method pivots on.
///
/// A basic cell normally holds a positive quantity. It can hold zero when a
/// pivot drove several donating cells to zero at once (only one of them
/// leaves the basis), or when the basis was completed by zero cells.
#[derive(PartialEq, Debug, Clone)]
pub struct Allocation<T: AmountLike> {
    quantities: Matrix<T>,
    basis: Matrix<bool>,
}

impl<T: AmountLike> Allocation<T> {
    /// empty allocation with no basic cells
    pub fn zero(rows: usize, cols: usize) -> Allocation<T> {
        Allocation {
            quantities: Matrix::filled(rows, cols, T::zero()),
            basis: Matrix::filled(rows, cols, false),
        }
    }
    ///
    /// Allocation from quantities. Cells with positive quantity are basic.
    ///
    pub fn from_quantities(quantities: Matrix<T>) -> Allocation<T> {
        let mut basis = Matrix::filled(quantities.rows(), quantities.cols(), false);
        for (cell, q) in quantities.iter() {
            basis[cell] = q.is_above_zero();
        }
        Allocation { quantities, basis }
    }
    pub fn rows(&self) -> usize {
        self.quantities.rows()
    }
    pub fn cols(&self) -> usize {
        self.quantities.cols()
    }
    pub fn quantities(&self) -> &Matrix<T> {
        &self.quantities
    }
    pub fn get(&self, cell: Cell) -> T {
        self.quantities[cell]
    }
    /// set the quantity of a cell and put it into the basis
    pub fn assign(&mut self, cell: Cell, quantity: T) {
        self.quantities[cell] = quantity;
        self.basis[cell] = true;
    }
    /// add `amount` (possibly negative) to the cell
    pub fn shift(&mut self, cell: Cell, amount: T) {
        self.quantities[cell] += amount;
    }
    pub fn is_basic(&self, cell: Cell) -> bool {
        self.basis[cell]
    }
    pub fn enter_basis(&mut self, cell: Cell) {
        self.basis[cell] = true;
    }
    pub fn leave_basis(&mut self, cell: Cell) {
        self.basis[cell] = false;
    }
    /// basic cells in row-major order
    pub fn basic_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.basis.iter().filter(|(_, b)| **b).map(|(cell, _)| cell)
    }
    pub fn basic_count(&self) -> usize {
        self.basic_cells().count()
    }
    /// `rows + cols - 1`, size of a spanning basis
    pub fn required_basic_count(&self) -> usize {
        self.rows() + self.cols() - 1
    }
    pub fn is_degenerate(&self) -> bool {
        self.basic_count() < self.required_basic_count()
    }
    /// cells carrying a positive quantity, `(cell, quantity)`
    pub fn shipments(&self) -> impl Iterator<Item = (Cell, T)> + '_ {
        self.quantities
            .iter()
            .filter(|(_, q)| q.is_above_zero())
            .map(|(cell, &q)| (cell, q))
    }
    pub fn row_sum(&self, i: usize) -> T {
        self.quantities.row(i).iter().copied().sum()
    }
    pub fn col_sum(&self, j: usize) -> T {
        self.quantities.col(j).copied().sum()
    }
    ///
    /// Total transportation cost `sum of quantity * cost` over all cells
    ///
    pub fn total_cost(&self, cost: &Matrix<T>) -> T {
        self.shipments().map(|(cell, q)| q * cost[cell]).sum()
    }
}

impl<T: AmountLike> Index<Cell> for Allocation<T> {
    type Output = T;
    fn index(&self, cell: Cell) -> &T {
        &self.quantities[cell]
    }
}

impl<T: AmountLike> std::fmt::Display for Allocation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.quantities)
    }
}

///
/// Check if the allocation is feasible, i.e. it satisfies
/// - no negative quantity
/// - supply constraint on every source
/// - demand constraint on every destination
///
pub fn is_feasible_allocation<T: AmountLike>(
    allocation: &Allocation<T>,
    supply: &[T],
    demand: &[T],
) -> bool {
    is_non_negative(allocation)
        && is_satisfying_supply(allocation, supply)
        && is_satisfying_demand(allocation, demand)
}

///
/// Every shipped quantity must be `>= 0`.
///
pub fn is_non_negative<T: AmountLike>(allocation: &Allocation<T>) -> bool {
    allocation.quantities.iter().all(|(_, q)| !q.is_below_zero())
}

///
/// For each source, (the sum of shipped quantities) should be equal to (its supply).
///
pub fn is_satisfying_supply<T: AmountLike>(allocation: &Allocation<T>, supply: &[T]) -> bool {
    allocation.rows() == supply.len()
        && supply
            .iter()
            .enumerate()
            .all(|(i, &s)| allocation.row_sum(i).sim_eq(s))
}

///
/// For each destination, (the sum of received quantities) should be equal to (its demand).
///
pub fn is_satisfying_demand<T: AmountLike>(allocation: &Allocation<T>, demand: &[T]) -> bool {
    allocation.cols() == demand.len()
        && demand
            .iter()
            .enumerate()
            .all(|(j, &d)| allocation.col_sum(j).sim_eq(d))
}
