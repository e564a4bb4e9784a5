pub mod allocation;
pub mod amount;
pub mod config;
pub mod cycle;
pub mod error;
pub mod matrix;
#[cfg(test)]
pub mod mocks;
pub mod north_west;
pub mod potential;
pub mod problem;
pub mod trace;
pub mod utils;

pub use allocation::{is_feasible_allocation, Allocation};
pub use amount::AmountLike;
pub use config::{DegeneracyPolicy, SolverConfig};
pub use cycle::{adjust_along_loop, complete_basis, find_loop, Adjustment, ReallocationLoop};
pub use error::TransportError;
pub use matrix::{Cell, Matrix};
pub use north_west::north_west_corner;
pub use potential::{compute_potentials, find_entering_cell, opportunity_costs, Potentials};
pub use problem::{balance, BalancedProblem, Dummy, Problem};
pub use trace::{Iteration, LogTracer, NoTrace, Tracer};

//
// public functions
//

/// Optimal allocation of a transportation problem
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T: AmountLike> {
    /// the problem actually solved, including the dummy line
    pub problem: BalancedProblem<T>,
    pub allocation: Allocation<T>,
    /// potentials proving optimality of `allocation`
    pub potentials: Potentials<T>,
    /// cost of the North-West Corner allocation
    pub initial_cost: T,
    pub total_cost: T,
    pub iterations: usize,
}

impl<T: AmountLike> Solution<T> {
    pub fn dummy(&self) -> Dummy {
        self.problem.dummy
    }
    /// positive shipments on real lanes, the dummy line excluded
    pub fn shipments(&self) -> impl Iterator<Item = (Cell, T)> + '_ {
        self.allocation
            .shipments()
            .filter(move |(cell, _)| !self.problem.dummy.contains(*cell))
    }
    /// allocation restricted to the sources and destinations of the original problem
    pub fn shipped_allocation(&self) -> Matrix<T> {
        let (rows, cols) = self.problem.original_shape;
        self.allocation.quantities().submatrix(rows, cols)
    }
    /// cost of the real shipments, equal to `total_cost` as dummy lanes cost zero
    pub fn shipped_cost(&self) -> T {
        self.shipments()
            .map(|(cell, q)| q * self.problem.cost[cell])
            .sum()
    }
}

/// Result of the optimizer on a balanced problem
#[derive(Debug, Clone, PartialEq)]
pub struct Optimum<T: AmountLike> {
    pub allocation: Allocation<T>,
    pub potentials: Potentials<T>,
    pub total_cost: T,
    pub iterations: usize,
}

///
/// Find the minimum cost allocation of the problem with the default configuration.
///
pub fn solve<T: AmountLike>(problem: &Problem<T>) -> Result<Solution<T>, TransportError<T>> {
    solve_with(problem, &SolverConfig::default(), &mut NoTrace)
}

///
/// Find the minimum cost allocation of the problem.
///
/// Balancer -> North-West Corner -> MODI optimizer. Each stage is reported to `tracer`.
///
pub fn solve_with<T, R>(
    problem: &Problem<T>,
    config: &SolverConfig,
    tracer: &mut R,
) -> Result<Solution<T>, TransportError<T>>
where
    T: AmountLike,
    R: Tracer<T> + ?Sized,
{
    let balanced = balance(problem);
    tracer.on_balanced(&balanced);

    let allocation = north_west_corner(&balanced.supply, &balanced.demand);
    let initial_cost = allocation.total_cost(&balanced.cost);
    tracer.on_initial_allocation(&allocation, initial_cost);

    let optimum = optimize(&balanced.cost, allocation, config, tracer)?;

    Ok(Solution {
        problem: balanced,
        allocation: optimum.allocation,
        potentials: optimum.potentials,
        initial_cost,
        total_cost: optimum.total_cost,
        iterations: optimum.iterations,
    })
}

///
/// Improve a feasible allocation until no cell has a negative opportunity cost.
///
/// Every iteration computes potentials and opportunity costs, picks the most
/// negative cell, and moves θ along its reallocation loop. Fails with
/// `NonConvergence` when the iteration limit of `config` is reached before
/// optimality.
///
pub fn optimize<T, R>(
    cost: &Matrix<T>,
    init_allocation: Allocation<T>,
    config: &SolverConfig,
    tracer: &mut R,
) -> Result<Optimum<T>, TransportError<T>>
where
    T: AmountLike,
    R: Tracer<T> + ?Sized,
{
    let mut allocation = init_allocation;
    let limit = config.iteration_limit(allocation.rows(), allocation.cols());
    let supply: Vec<T> = (0..allocation.rows()).map(|i| allocation.row_sum(i)).collect();
    let demand: Vec<T> = (0..allocation.cols()).map(|j| allocation.col_sum(j)).collect();
    let mut iterations = 0;

    loop {
        debug_assert!(is_feasible_allocation(&allocation, &supply, &demand));

        if config.degeneracy == DegeneracyPolicy::Complete && allocation.is_degenerate() {
            let added = complete_basis(cost, &mut allocation);
            log::debug!("basis completed with {:?}", added);
            tracer.on_basis_completed(&added, &allocation);
        }

        match evaluate(cost, &allocation)? {
            Step::Optimal(potentials) => {
                let total_cost = allocation.total_cost(cost);
                log::debug!(
                    "optimal after {} iterations, total cost {}",
                    iterations,
                    total_cost
                );
                tracer.on_optimal(&allocation, &potentials, total_cost);
                return Ok(Optimum {
                    allocation,
                    potentials,
                    total_cost,
                    iterations,
                });
            }
            Step::Improving {
                potentials,
                deltas,
                entering,
            } => {
                if iterations >= limit {
                    log::warn!("iteration limit {} reached before optimality", limit);
                    return Err(TransportError::NonConvergence {
                        iterations,
                        allocation: Box::new(allocation),
                    });
                }
                let reallocation = find_loop(&allocation, entering)?;
                let adjustment = adjust_along_loop(&mut allocation, &reallocation)?;
                iterations += 1;

                let iteration = Iteration {
                    index: iterations,
                    potentials,
                    deltas,
                    entering,
                    reallocation,
                    adjustment,
                    total_cost: allocation.total_cost(cost),
                };
                tracer.on_iteration(&iteration, &allocation);
            }
        }
    }
}

//
// internal functions
//

/// State of the optimizer after evaluating the current allocation
enum Step<T: AmountLike> {
    Improving {
        potentials: Potentials<T>,
        deltas: Matrix<T>,
        entering: Cell,
    },
    Optimal(Potentials<T>),
}

fn evaluate<T: AmountLike>(
    cost: &Matrix<T>,
    allocation: &Allocation<T>,
) -> Result<Step<T>, TransportError<T>> {
    let potentials = compute_potentials(cost, allocation)?;
    let deltas = opportunity_costs(cost, allocation, &potentials);
    Ok(match find_entering_cell(&deltas) {
        Some(entering) => Step::Improving {
            potentials,
            deltas,
            entering,
        },
        None => Step::Optimal(potentials),
    })
}
