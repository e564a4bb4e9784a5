//! Tracing interface of the solver
//!
//! Declares the `Tracer` trait for observing a solve without touching the
//! computation. Every callback has an empty default, so a tracer only
//! implements what it needs.
//!
//! Lifecycle
//! - balanced → initial allocation → {basis completed}? → iteration* → optimal
//!
//! `NoTrace` ignores everything. `LogTracer` writes through the `log` facade.

use super::allocation::Allocation;
use super::amount::AmountLike;
use super::cycle::{Adjustment, ReallocationLoop};
use super::matrix::{Cell, Matrix};
use super::potential::Potentials;
use super::problem::BalancedProblem;
use super::utils::{draw_basis, format_matrix, format_vector};

/// State of one improving iteration of the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration<T: AmountLike> {
    /// 1-based iteration number
    pub index: usize,
    pub potentials: Potentials<T>,
    /// opportunity costs before the pivot
    pub deltas: Matrix<T>,
    pub entering: Cell,
    pub reallocation: ReallocationLoop,
    pub adjustment: Adjustment<T>,
    /// total cost after the pivot
    pub total_cost: T,
}

/// Trait for observing the solver.
pub trait Tracer<T: AmountLike> {
    /// Returns the name of the tracer.
    fn name(&self) -> &str;
    /// Called once the dummy line (if any) has been added.
    fn on_balanced(&mut self, _problem: &BalancedProblem<T>) {}
    /// Called with the North-West Corner allocation and its cost.
    fn on_initial_allocation(&mut self, _allocation: &Allocation<T>, _cost: T) {}
    /// Called when zero-quantity cells were added to a degenerate basis.
    fn on_basis_completed(&mut self, _added: &[Cell], _allocation: &Allocation<T>) {}
    /// Called after every pivot with the updated allocation.
    fn on_iteration(&mut self, _iteration: &Iteration<T>, _allocation: &Allocation<T>) {}
    /// Called when no cell can reduce the cost any more.
    fn on_optimal(&mut self, _allocation: &Allocation<T>, _potentials: &Potentials<T>, _cost: T) {}
}

/// Tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl<T: AmountLike> Tracer<T> for NoTrace {
    fn name(&self) -> &str {
        "NoTrace"
    }
}

///
/// Tracer writing every stage to the `log` facade.
///
/// * `info`: initial and optimal allocation with cost
/// * `debug`: potentials, delta matrix, loop and allocation of each iteration
/// * `trace`: basis graph in DOT format
///
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl<T: AmountLike> Tracer<T> for LogTracer {
    fn name(&self) -> &str {
        "LogTracer"
    }

    fn on_balanced(&mut self, problem: &BalancedProblem<T>) {
        log::info!(
            "balanced problem {}x{} (dummy: {}), total {}",
            problem.n_sources(),
            problem.n_destinations(),
            problem.dummy,
            problem.total()
        );
        log::debug!("{}", format_matrix("Cost", &problem.cost));
        log::debug!("{}", format_vector("Supply", &problem.supply));
        log::debug!("{}", format_vector("Demand", &problem.demand));
    }

    fn on_initial_allocation(&mut self, allocation: &Allocation<T>, cost: T) {
        log::info!(
            "{}",
            format_matrix(
                "Initial Allocation (North-West Corner Rule)",
                allocation.quantities()
            )
        );
        log::info!("Initial Cost: {}", cost);
        log::trace!("{}", draw_basis(allocation));
    }

    fn on_basis_completed(&mut self, added: &[Cell], allocation: &Allocation<T>) {
        log::info!(
            "degenerate basis completed with {} zero cells: {:?}",
            added.len(),
            added
        );
        log::trace!("{}", draw_basis(allocation));
    }

    fn on_iteration(&mut self, iteration: &Iteration<T>, allocation: &Allocation<T>) {
        log::debug!("iteration {}", iteration.index);
        log::debug!("{}", format_vector("U potentials", &iteration.potentials.u));
        log::debug!("{}", format_vector("V potentials", &iteration.potentials.v));
        log::debug!("{}", format_matrix("Delta", &iteration.deltas));
        log::debug!(
            "entering {} via {}, theta={}, leaving {}",
            iteration.entering,
            iteration.reallocation,
            iteration.adjustment.theta,
            iteration.adjustment.leaving
        );
        log::debug!("{}", format_matrix("Updated Allocation", allocation.quantities()));
        log::debug!("cost after iteration {}: {}", iteration.index, iteration.total_cost);
        log::trace!("{}", draw_basis(allocation));
    }

    fn on_optimal(&mut self, allocation: &Allocation<T>, potentials: &Potentials<T>, cost: T) {
        log::debug!("{}", format_vector("U potentials", &potentials.u));
        log::debug!("{}", format_vector("V potentials", &potentials.v));
        log::info!("Optimal solution reached!");
        log::info!("{}", format_matrix("Optimal Allocation", allocation.quantities()));
        log::info!("Total Optimal Cost: {}", cost);
    }
}
