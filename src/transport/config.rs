//!
//! Solver configuration
//!

/// Default iteration limit is this factor times the number of cells.
pub const ITERATION_FACTOR: usize = 4;

/// What the optimizer does when the basis does not span all sources and destinations
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DegeneracyPolicy {
    /// Report `TransportError::Degeneracy`
    #[default]
    Fail,
    /// Add zero-quantity basic cells until the basis spans, then continue
    Complete,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SolverConfig {
    /// maximum number of improving iterations, `None` for `ITERATION_FACTOR * rows * cols`
    pub max_iterations: Option<usize>,
    pub degeneracy: DegeneracyPolicy,
}

impl SolverConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> SolverConfig {
        self.max_iterations = Some(max_iterations);
        self
    }
    pub fn with_degeneracy(mut self, degeneracy: DegeneracyPolicy) -> SolverConfig {
        self.degeneracy = degeneracy;
        self
    }
    /// iteration limit for a balanced problem of `rows * cols` cells
    pub fn iteration_limit(&self, rows: usize, cols: usize) -> usize {
        self.max_iterations.unwrap_or(ITERATION_FACTOR * rows * cols)
    }
}
