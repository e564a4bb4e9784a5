//!
//! Errors reported by a single solve
//!
use super::allocation::Allocation;
use super::amount::AmountLike;
use super::matrix::Cell;
use thiserror::Error;

/// Which part of the problem statement holds a bad entry
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProblemPart {
    Cost(Cell),
    Supply(usize),
    Demand(usize),
}

impl std::fmt::Display for ProblemPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemPart::Cost(cell) => write!(f, "cost{}", cell),
            ProblemPart::Supply(i) => write!(f, "supply[{}]", i),
            ProblemPart::Demand(j) => write!(f, "demand[{}]", j),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError<T: AmountLike> {
    #[error("cost matrix is {rows}x{cols} but there are {supply} supplies and {demand} demands")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        supply: usize,
        demand: usize,
    },
    #[error("cost matrix row {row} has {found} entries, expected {expected}")]
    RaggedCostMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{what} is negative")]
    NegativeAmount { what: ProblemPart },
    /// The basis does not span every source and destination, so some
    /// potentials are undefined.
    #[error(
        "degenerate allocation: {basic} basic cells, {required} required \
         (unresolved sources {sources:?}, destinations {destinations:?})"
    )]
    Degeneracy {
        basic: usize,
        required: usize,
        sources: Vec<usize>,
        destinations: Vec<usize>,
    },
    #[error("no reallocation loop through entering cell {entering}")]
    LoopNotFound { entering: Cell },
    /// Iteration limit was hit. `allocation` is the last (and cheapest) allocation.
    #[error("not optimal after {iterations} iterations")]
    NonConvergence {
        iterations: usize,
        allocation: Box<Allocation<T>>,
    },
}
