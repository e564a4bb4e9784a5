//! # `Problem` and `BalancedProblem`
//!
//! `Problem` is the statement of a transportation problem as given by the user:
//! * `cost` Cost per unit shipped on each (source, destination) lane
//! * `supply` Available quantity at each source
//! * `demand` Required quantity at each destination
//!
//! `BalancedProblem` is the same problem after a zero-cost dummy source or
//! destination has been appended so that total supply equals total demand.
//!
use super::amount::AmountLike;
use super::error::{ProblemPart, TransportError};
use super::matrix::{Cell, Matrix};

/// Transportation problem definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem<T: AmountLike> {
    cost: Matrix<T>,
    supply: Vec<T>,
    demand: Vec<T>,
}

impl<T: AmountLike> Problem<T> {
    ///
    /// Create a validated problem.
    ///
    /// Fails if the matrix is empty, its shape disagrees with the supply and
    /// demand lengths, or any entry is negative.
    ///
    pub fn new(
        cost: Matrix<T>,
        supply: Vec<T>,
        demand: Vec<T>,
    ) -> Result<Problem<T>, TransportError<T>> {
        if cost.rows() == 0
            || cost.cols() == 0
            || cost.rows() != supply.len()
            || cost.cols() != demand.len()
        {
            return Err(TransportError::InvalidDimensions {
                rows: cost.rows(),
                cols: cost.cols(),
                supply: supply.len(),
                demand: demand.len(),
            });
        }

        let negative = cost
            .iter()
            .find(|(_, c)| c.is_below_zero())
            .map(|(cell, _)| ProblemPart::Cost(cell))
            .or_else(|| {
                supply
                    .iter()
                    .position(|s| s.is_below_zero())
                    .map(ProblemPart::Supply)
            })
            .or_else(|| {
                demand
                    .iter()
                    .position(|d| d.is_below_zero())
                    .map(ProblemPart::Demand)
            });
        if let Some(what) = negative {
            return Err(TransportError::NegativeAmount { what });
        }

        Ok(Problem {
            cost,
            supply,
            demand,
        })
    }

    /// Create from nested rows of costs
    pub fn from_rows(
        cost: Vec<Vec<T>>,
        supply: Vec<T>,
        demand: Vec<T>,
    ) -> Result<Problem<T>, TransportError<T>> {
        let cost = Matrix::from_rows(cost).map_err(|(row, expected, found)| {
            TransportError::RaggedCostMatrix {
                row,
                expected,
                found,
            }
        })?;
        Problem::new(cost, supply, demand)
    }

    pub fn cost(&self) -> &Matrix<T> {
        &self.cost
    }
    pub fn supply(&self) -> &[T] {
        &self.supply
    }
    pub fn demand(&self) -> &[T] {
        &self.demand
    }
    pub fn n_sources(&self) -> usize {
        self.supply.len()
    }
    pub fn n_destinations(&self) -> usize {
        self.demand.len()
    }
    pub fn total_supply(&self) -> T {
        self.supply.iter().copied().sum()
    }
    pub fn total_demand(&self) -> T {
        self.demand.iter().copied().sum()
    }
    pub fn is_balanced(&self) -> bool {
        self.total_supply().sim_eq(self.total_demand())
    }
}

/// Dummy line appended by balancing
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Dummy {
    /// Supply and demand were already equal
    #[default]
    None,
    /// A zero-cost source row absorbing excess demand
    Source(usize),
    /// A zero-cost destination column absorbing excess supply
    Destination(usize),
}

impl Dummy {
    /// true if `cell` lies on the dummy row or column
    pub fn contains(&self, cell: Cell) -> bool {
        match *self {
            Dummy::None => false,
            Dummy::Source(i) => cell.source == i,
            Dummy::Destination(j) => cell.destination == j,
        }
    }
}

impl std::fmt::Display for Dummy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dummy::None => write!(f, "none"),
            Dummy::Source(i) => write!(f, "source {}", i),
            Dummy::Destination(j) => write!(f, "destination {}", j),
        }
    }
}

/// Problem whose total supply equals its total demand.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedProblem<T: AmountLike> {
    pub cost: Matrix<T>,
    pub supply: Vec<T>,
    pub demand: Vec<T>,
    pub dummy: Dummy,
    /// size of the problem before balancing, `(sources, destinations)`
    pub original_shape: (usize, usize),
}

impl<T: AmountLike> BalancedProblem<T> {
    pub fn n_sources(&self) -> usize {
        self.supply.len()
    }
    pub fn n_destinations(&self) -> usize {
        self.demand.len()
    }
    pub fn total(&self) -> T {
        self.supply.iter().copied().sum()
    }
}

//
// balancing
//

///
/// Append a dummy line in place so that total supply equals total demand.
///
/// * supply > demand: a destination column of zero cost demanding the surplus
/// * demand > supply: a source row of zero cost supplying the deficit
///
pub fn balance_in_place<T: AmountLike>(
    cost: &mut Matrix<T>,
    supply: &mut Vec<T>,
    demand: &mut Vec<T>,
) -> Dummy {
    let total_supply: T = supply.iter().copied().sum();
    let total_demand: T = demand.iter().copied().sum();

    if total_supply.sim_eq(total_demand) {
        Dummy::None
    } else if total_supply > total_demand {
        cost.push_col(T::zero());
        demand.push(total_supply - total_demand);
        Dummy::Destination(demand.len() - 1)
    } else {
        cost.push_row(T::zero());
        supply.push(total_demand - total_supply);
        Dummy::Source(supply.len() - 1)
    }
}

/// Balance a copy of the problem; the original statement is kept intact.
pub fn balance<T: AmountLike>(problem: &Problem<T>) -> BalancedProblem<T> {
    let mut cost = problem.cost.clone();
    let mut supply = problem.supply.clone();
    let mut demand = problem.demand.clone();
    let dummy = balance_in_place(&mut cost, &mut supply, &mut demand);
    BalancedProblem {
        cost,
        supply,
        demand,
        dummy,
        original_shape: (problem.n_sources(), problem.n_destinations()),
    }
}

//
// tests
//
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_validation() {
        let p = Problem::<i64>::from_rows(vec![vec![1, 2], vec![3, 4]], vec![5, 5], vec![4, 6]);
        assert!(p.is_ok());
        let p = p.unwrap();
        assert_eq!(p.total_supply(), 10);
        assert_eq!(p.total_demand(), 10);
        assert!(p.is_balanced());

        let p = Problem::<i64>::from_rows(vec![vec![1, 2], vec![3, 4]], vec![5, 5, 1], vec![4, 6]);
        assert!(matches!(
            p,
            Err(TransportError::InvalidDimensions {
                rows: 2,
                cols: 2,
                supply: 3,
                demand: 2
            })
        ));

        let p = Problem::<i64>::from_rows(vec![], vec![], vec![]);
        assert!(matches!(p, Err(TransportError::InvalidDimensions { .. })));

        let p = Problem::<i64>::from_rows(vec![vec![1, 2], vec![3]], vec![5, 5], vec![4, 6]);
        assert!(matches!(
            p,
            Err(TransportError::RaggedCostMatrix {
                row: 1,
                expected: 2,
                found: 1
            })
        ));

        let p = Problem::<i64>::from_rows(vec![vec![1, -2], vec![3, 4]], vec![5, 5], vec![4, 6]);
        assert!(matches!(
            p,
            Err(TransportError::NegativeAmount {
                what: ProblemPart::Cost(Cell {
                    source: 0,
                    destination: 1
                })
            })
        ));

        let p = Problem::<i64>::from_rows(vec![vec![1, 2], vec![3, 4]], vec![5, 5], vec![4, -6]);
        assert!(matches!(
            p,
            Err(TransportError::NegativeAmount {
                what: ProblemPart::Demand(1)
            })
        ));
    }

    #[test]
    fn balance_excess_supply() {
        let p = Problem::<i64>::from_rows(vec![vec![4, 6], vec![5, 3]], vec![10, 20], vec![15, 10])
            .unwrap();
        let b = balance(&p);
        assert_eq!(b.dummy, Dummy::Destination(2));
        assert_eq!(b.demand, vec![15, 10, 5]);
        assert_eq!(b.supply, vec![10, 20]);
        assert_eq!(b.cost.row(0), &[4, 6, 0]);
        assert_eq!(b.cost.row(1), &[5, 3, 0]);
        assert_eq!(b.total(), 30);
        assert_eq!(b.original_shape, (2, 2));
        assert!(b.dummy.contains(Cell::new(1, 2)));
        assert!(!b.dummy.contains(Cell::new(1, 1)));
        // the original is untouched
        assert_eq!(p.demand(), &[15, 10]);
    }

    #[test]
    fn balance_excess_demand() {
        let mut cost = Matrix::from_rows(vec![vec![4, 6, 2], vec![5, 3, 1]]).unwrap();
        let mut supply: Vec<i64> = vec![10, 20];
        let mut demand = vec![15, 10, 10];
        let dummy = balance_in_place(&mut cost, &mut supply, &mut demand);
        assert_eq!(dummy, Dummy::Source(2));
        assert_eq!(supply, vec![10, 20, 5]);
        assert_eq!(demand, vec![15, 10, 10]);
        assert_eq!(cost.rows(), 3);
        assert_eq!(cost.row(2), &[0, 0, 0]);
    }

    #[test]
    fn balance_already_balanced() {
        let mut cost = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let mut supply = vec![0.1 + 0.2];
        let mut demand = vec![0.1, 0.2];
        let dummy = balance_in_place(&mut cost, &mut supply, &mut demand);
        assert_eq!(dummy, Dummy::None);
        assert_eq!(cost.cols(), 2);
        assert_eq!(demand.len(), 2);
    }
}
