//!
//! utils
//!
use super::allocation::Allocation;
use super::amount::AmountLike;
use super::cycle::basis_graph;
use super::matrix::Matrix;
use itertools::Itertools; // for join
use petgraph::dot::{Config, Dot};
use petgraph::visit::NodeRef;

///
/// Render a named matrix, one row per line, tab separated
///
pub fn format_matrix<T: std::fmt::Display>(name: &str, matrix: &Matrix<T>) -> String {
    format!("{} matrix:\n{}", name, matrix)
}

///
/// Render a named vector on a single line
///
pub fn format_vector<T: std::fmt::Display>(name: &str, vector: &[T]) -> String {
    format!("{} vector: {}", name, vector.iter().join(" "))
}

///
/// Render the basis of the allocation as a DOT graph
///
pub fn draw_basis<T: AmountLike>(allocation: &Allocation<T>) -> String {
    let graph = basis_graph(allocation);
    format!(
        "{}",
        Dot::with_attr_getters(
            &graph,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_, e| {
                let cell = *e.weight();
                format!("label = \"{}: {}\"", cell, allocation[cell])
            },
            &|_, n| format!("label = \"{}\"", n.weight()),
        )
    )
}
