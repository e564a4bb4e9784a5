//!
//! Dual potentials `(u, v)`, opportunity costs and the entering cell
//!
use super::allocation::Allocation;
use super::amount::AmountLike;
use super::error::TransportError;
use super::matrix::{Cell, Matrix};

/// Potentials of sources `u` and destinations `v`
///
/// They satisfy `cost[i][j] = u[i] + v[j]` on every basic cell, with `u[0] = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Potentials<T: AmountLike> {
    pub u: Vec<T>,
    pub v: Vec<T>,
}

impl<T: AmountLike> Potentials<T> {
    /// `cost[i][j] - (u[i] + v[j])`
    pub fn reduced_cost(&self, cost: &Matrix<T>, cell: Cell) -> T {
        cost[cell] - (self.u[cell.source] + self.v[cell.destination])
    }
}

///
/// Compute potentials from the basic cells of the allocation.
///
/// Fixes `u[0] = 0` and scans the basic cells repeatedly, deriving the unknown
/// side of every cell with exactly one known potential, until a full pass derives
/// nothing. If the basis does not span all sources and destinations some
/// potentials stay unknown and `TransportError::Degeneracy` is returned.
///
pub fn compute_potentials<T: AmountLike>(
    cost: &Matrix<T>,
    allocation: &Allocation<T>,
) -> Result<Potentials<T>, TransportError<T>> {
    let mut u: Vec<Option<T>> = vec![None; allocation.rows()];
    let mut v: Vec<Option<T>> = vec![None; allocation.cols()];
    u[0] = Some(T::zero());

    let basic: Vec<Cell> = allocation.basic_cells().collect();
    loop {
        let mut updated = false;
        for &cell in basic.iter() {
            let (i, j) = (cell.source, cell.destination);
            match (u[i], v[j]) {
                (Some(ui), None) => {
                    v[j] = Some(cost[cell] - ui);
                    updated = true;
                }
                (None, Some(vj)) => {
                    u[i] = Some(cost[cell] - vj);
                    updated = true;
                }
                _ => {}
            }
        }
        if !updated {
            break;
        }
    }

    let sources = unresolved(&u);
    let destinations = unresolved(&v);
    if !sources.is_empty() || !destinations.is_empty() {
        return Err(TransportError::Degeneracy {
            basic: basic.len(),
            required: allocation.required_basic_count(),
            sources,
            destinations,
        });
    }

    Ok(Potentials {
        u: u.into_iter().flatten().collect(),
        v: v.into_iter().flatten().collect(),
    })
}

fn unresolved<T>(potentials: &[Option<T>]) -> Vec<usize> {
    potentials
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_none())
        .map(|(index, _)| index)
        .collect()
}

///
/// Opportunity cost of every cell
///
/// `delta[i][j] = cost[i][j] - (u[i] + v[j])` for non-basic cells, zero for basic cells.
///
pub fn opportunity_costs<T: AmountLike>(
    cost: &Matrix<T>,
    allocation: &Allocation<T>,
    potentials: &Potentials<T>,
) -> Matrix<T> {
    let mut delta = Matrix::filled(cost.rows(), cost.cols(), T::zero());
    for cell in cost.cells() {
        if !allocation.is_basic(cell) {
            delta[cell] = potentials.reduced_cost(cost, cell);
        }
    }
    delta
}

///
/// Most negative opportunity cost, the first one in row-major order on ties.
///
/// `None` means no cell can reduce the cost, i.e. the allocation is optimal.
///
pub fn find_entering_cell<T: AmountLike>(delta: &Matrix<T>) -> Option<Cell> {
    let mut entering = None;
    let mut min_delta = T::zero();
    for (cell, &d) in delta.iter() {
        if d.is_below_zero() && d < min_delta {
            min_delta = d;
            entering = Some(cell);
        }
    }
    entering
}
