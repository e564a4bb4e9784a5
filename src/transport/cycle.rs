//! Reallocation loop related definitions
//! - LoopDirection
//! - ReallocationLoop
//! - BasisGraph
//!
use super::allocation::Allocation;
use super::amount::AmountLike;
use super::error::TransportError;
use super::matrix::{Cell, Matrix};
use itertools::Itertools; // for tuple_windows
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use std::cmp::Ordering;
use std::collections::HashSet;

// basic definitions

/// Loop direction enum
/// a cell on a reallocation loop has two types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopDirection {
    /// Receive cell: its allocation increases (+θ)
    Receive,
    /// Donate cell: its allocation decreases (-θ)
    Donate,
}

impl LoopDirection {
    /// Direction of the `k`-th cell of a loop, the entering cell being `k = 0`
    pub fn at(k: usize) -> LoopDirection {
        if k % 2 == 0 {
            LoopDirection::Receive
        } else {
            LoopDirection::Donate
        }
    }
}

impl std::fmt::Display for LoopDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoopDirection::Receive => write!(f, "+"),
            LoopDirection::Donate => write!(f, "-"),
        }
    }
}

///
/// Closed path of cells starting at the entering cell.
///
/// Even positions receive, odd positions donate. Consecutive cells share a
/// source or a destination alternately, and the last cell shares a line with
/// the first.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReallocationLoop {
    cells: Vec<Cell>,
}

impl ReallocationLoop {
    /// Wrap a cell sequence without checking it. See `is_valid_loop`.
    pub fn from_cells(cells: Vec<Cell>) -> ReallocationLoop {
        ReallocationLoop { cells }
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn entering(&self) -> Option<Cell> {
        self.cells.first().copied()
    }
    /// `(cell, direction)` along the loop
    pub fn iter(&self) -> impl Iterator<Item = (Cell, LoopDirection)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(k, &cell)| (cell, LoopDirection::at(k)))
    }
    pub fn donating(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter()
            .filter(|(_, dir)| *dir == LoopDirection::Donate)
            .map(|(cell, _)| cell)
    }
    pub fn receiving(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter()
            .filter(|(_, dir)| *dir == LoopDirection::Receive)
            .map(|(cell, _)| cell)
    }
    ///
    /// Change of total cost per unit moved along the loop.
    /// For a loop built from potentials this equals the entering cell's opportunity cost.
    ///
    pub fn unit_cost_change<T: AmountLike>(&self, cost: &Matrix<T>) -> T {
        self.iter()
            .map(|(cell, dir)| match dir {
                LoopDirection::Receive => cost[cell],
                LoopDirection::Donate => -cost[cell],
            })
            .sum()
    }
}

impl std::fmt::Display for ReallocationLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .map(|(cell, dir)| format!("{}{}", dir, cell))
                .join(" -> ")
        )
    }
}

/// Which line two consecutive loop cells share
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Move {
    AlongSource,
    AlongDestination,
}

fn move_between(a: Cell, b: Cell) -> Option<Move> {
    if a.source == b.source && a.destination != b.destination {
        Some(Move::AlongSource)
    } else if a.destination == b.destination && a.source != b.source {
        Some(Move::AlongDestination)
    } else {
        None
    }
}

///
/// Check if the loop is a valid reallocation loop on the allocation, i.e.
/// - it has an even number (>= 4) of distinct cells
/// - it starts at a non-basic cell and every other cell is basic
/// - consecutive cells (including last -> first) alternate between moving
///   along a source and moving along a destination
///
pub fn is_valid_loop<T: AmountLike>(allocation: &Allocation<T>, lp: &ReallocationLoop) -> bool {
    let cells = lp.cells();
    let n = cells.len();
    if n < 4 || n % 2 != 0 {
        return false;
    }
    let in_bounds = cells
        .iter()
        .all(|c| c.source < allocation.rows() && c.destination < allocation.cols());
    if !in_bounds {
        return false;
    }
    let distinct: HashSet<Cell> = cells.iter().copied().collect();
    if distinct.len() != n {
        return false;
    }
    if allocation.is_basic(cells[0]) || !cells[1..].iter().all(|&c| allocation.is_basic(c)) {
        return false;
    }
    let moves: Option<Vec<Move>> = cells
        .iter()
        .circular_tuple_windows()
        .map(|(&a, &b)| move_between(a, b))
        .collect();
    match moves {
        Some(moves) => moves.iter().circular_tuple_windows().all(|(a, b)| a != b),
        None => false,
    }
}

//
// basis graph
//

/// Node of the basis graph: a source row or a destination column
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Line {
    Source(usize),
    Destination(usize),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Source(i) => write!(f, "S{}", i),
            Line::Destination(j) => write!(f, "D{}", j),
        }
    }
}

///
/// BasisGraph definition
///
/// Bipartite graph whose nodes are sources (`0..rows`) and destinations
/// (`rows..rows+cols`), with one edge per basic cell.
/// A non-degenerate basis is a spanning tree of this graph.
///
pub type BasisGraph = UnGraph<Line, Cell>;

fn source_node(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

fn destination_node(rows: usize, j: usize) -> NodeIndex {
    NodeIndex::new(rows + j)
}

/// Convert the basis of the allocation into a BasisGraph.
pub fn basis_graph<T: AmountLike>(allocation: &Allocation<T>) -> BasisGraph {
    let rows = allocation.rows();
    let mut graph = BasisGraph::with_capacity(
        rows + allocation.cols(),
        allocation.required_basic_count(),
    );
    for i in 0..rows {
        graph.add_node(Line::Source(i));
    }
    for j in 0..allocation.cols() {
        graph.add_node(Line::Destination(j));
    }
    for cell in allocation.basic_cells() {
        graph.add_edge(
            source_node(cell.source),
            destination_node(rows, cell.destination),
            cell,
        );
    }
    graph
}

///
/// Find the reallocation loop through the (non-basic) entering cell.
///
/// The loop is the entering cell followed by the path through basic cells
/// from the entering destination back to the entering source. The path is
/// searched on the BasisGraph with A* (unit weight, zero heuristic), so each
/// step alternates between a destination and a source.
///
pub fn find_loop<T: AmountLike>(
    allocation: &Allocation<T>,
    entering: Cell,
) -> Result<ReallocationLoop, TransportError<T>> {
    let not_found = || TransportError::LoopNotFound { entering };
    if entering.source >= allocation.rows() || entering.destination >= allocation.cols() {
        return Err(not_found());
    }

    let graph = basis_graph(allocation);
    let start = destination_node(allocation.rows(), entering.destination);
    let goal = source_node(entering.source);

    let (_, nodes) = astar(&graph, start, |finish| finish == goal, |_| 1usize, |_| 0usize)
        .ok_or_else(not_found)?;

    // convert (nodes[k], nodes[k+1]) into the basic cell connecting them
    let path: Option<Vec<Cell>> = nodes
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| graph.find_edge(a, b).map(|e| graph[e]))
        .collect();

    let mut cells = vec![entering];
    cells.extend(path.ok_or_else(not_found)?);
    let lp = ReallocationLoop::from_cells(cells);

    if is_valid_loop(allocation, &lp) {
        Ok(lp)
    } else {
        Err(not_found())
    }
}

//
// adjustment
//

/// Result of moving θ units along a loop
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Adjustment<T: AmountLike> {
    /// amount moved, the minimum over donating cells
    pub theta: T,
    /// cell entering the basis
    pub entering: Cell,
    /// cell leaving the basis, the first donating cell attaining θ
    pub leaving: Cell,
}

///
/// Update the allocation along a reallocation loop.
///
/// θ is the minimum quantity on donating cells. Receiving cells gain θ and
/// donating cells lose θ, so row and column sums are unchanged. The entering
/// cell joins the basis and exactly one cell (the first donor holding θ)
/// leaves it; other donors that reach zero stay basic.
///
pub fn adjust_along_loop<T: AmountLike>(
    allocation: &mut Allocation<T>,
    lp: &ReallocationLoop,
) -> Result<Adjustment<T>, TransportError<T>> {
    let entering = match lp.entering() {
        Some(cell) => cell,
        None => {
            return Err(TransportError::LoopNotFound {
                entering: Cell::new(0, 0),
            })
        }
    };
    if !is_valid_loop(allocation, lp) {
        return Err(TransportError::LoopNotFound { entering });
    }

    // (1) determine θ and the leaving cell
    let mut leaving = None;
    for cell in lp.donating() {
        let q = allocation[cell];
        match leaving {
            Some((_, theta)) if q >= theta => {}
            _ => leaving = Some((cell, q)),
        }
    }
    let (leaving, theta) = leaving.ok_or(TransportError::LoopNotFound { entering })?;

    // (2) apply these changes along the loop
    for (cell, dir) in lp.iter() {
        match dir {
            LoopDirection::Receive => allocation.shift(cell, theta),
            LoopDirection::Donate => allocation.shift(cell, -theta),
        }
    }
    allocation.enter_basis(entering);
    allocation.leave_basis(leaving);

    Ok(Adjustment {
        theta,
        entering,
        leaving,
    })
}

//
// degeneracy repair
//

///
/// Complete a degenerate basis with zero-quantity cells.
///
/// Non-basic cells are tried from the cheapest (row-major among equal costs)
/// and added to the basis when they connect two separate components of the
/// BasisGraph, until the basis spans every source and destination.
/// Returns the added cells.
///
pub fn complete_basis<T: AmountLike>(
    cost: &Matrix<T>,
    allocation: &mut Allocation<T>,
) -> Vec<Cell> {
    let rows = allocation.rows();
    let mut components = UnionFind::<usize>::new(rows + allocation.cols());
    let mut count = 0;
    for cell in allocation.basic_cells() {
        components.union(cell.source, rows + cell.destination);
        count += 1;
    }

    let mut candidates: Vec<Cell> = cost
        .cells()
        .filter(|&cell| !allocation.is_basic(cell))
        .collect();
    candidates.sort_by(|&a, &b| cost[a].partial_cmp(&cost[b]).unwrap_or(Ordering::Equal));

    let mut added = Vec::new();
    for cell in candidates {
        if count >= allocation.required_basic_count() {
            break;
        }
        if components.union(cell.source, rows + cell.destination) {
            allocation.enter_basis(cell);
            added.push(cell);
            count += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::super::allocation::is_feasible_allocation;
    use super::super::mocks::{c, mock_textbook};
    use super::super::north_west::north_west_corner;
    use super::super::potential::{compute_potentials, opportunity_costs};
    use super::*;

    #[test]
    fn loop_direction_basic() {
        let receive = LoopDirection::Receive;
        assert_eq!(receive.to_string(), "+");

        let donate = LoopDirection::Donate;
        assert_eq!(donate.to_string(), "-");

        assert_eq!(LoopDirection::at(0), receive);
        assert_eq!(LoopDirection::at(3), donate);
    }

    #[test]
    fn basis_graph_is_spanning_tree() {
        let p = mock_textbook();
        let a = north_west_corner(p.supply(), p.demand());
        let g = basis_graph(&a);
        assert_eq!(g.node_count(), 7);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(petgraph::algo::connected_components(&g), 1);
        assert_eq!(g[source_node(2)], Line::Source(2));
        assert_eq!(g[destination_node(3, 1)], Line::Destination(1));
    }

    #[test]
    fn find_loop_textbook() {
        let p = mock_textbook();
        let a = north_west_corner(p.supply(), p.demand());

        let lp = find_loop(&a, c(2, 1)).unwrap();
        assert_eq!(lp.cells(), &[c(2, 1), c(1, 1), c(1, 2), c(2, 2)]);
        assert_eq!(lp.to_string(), "+(2,1) -> -(1,1) -> +(1,2) -> -(2,2)");
        assert_eq!(lp.unit_cost_change(p.cost()), -6);

        // a longer loop crossing the whole staircase
        let lp = find_loop(&a, c(2, 0)).unwrap();
        assert_eq!(
            lp.cells(),
            &[c(2, 0), c(0, 0), c(0, 1), c(1, 1), c(1, 2), c(2, 2)]
        );
        assert_eq!(lp.donating().collect::<Vec<_>>(), vec![c(0, 0), c(1, 1), c(2, 2)]);
        assert_eq!(lp.receiving().collect::<Vec<_>>(), vec![c(2, 0), c(0, 1), c(1, 2)]);

        // loop cost change equals the opportunity cost of the entering cell
        let pot = compute_potentials(p.cost(), &a).unwrap();
        let delta = opportunity_costs(p.cost(), &a, &pot);
        for cell in p.cost().cells().filter(|&cell| !a.is_basic(cell)) {
            let lp = find_loop(&a, cell).unwrap();
            assert_eq!(lp.unit_cost_change(p.cost()), delta[cell]);
        }
    }

    #[test]
    fn find_loop_fails_on_disconnected_basis() {
        let a = north_west_corner::<i64>(&[10, 10], &[10, 10]);
        let r = find_loop(&a, c(0, 1));
        assert!(matches!(r, Err(TransportError::LoopNotFound { entering }) if entering == c(0, 1)));
        // basic cell cannot enter
        let r = find_loop(&a, c(0, 0));
        assert!(matches!(r, Err(TransportError::LoopNotFound { .. })));
    }

    #[test]
    fn invalid_loops_are_rejected() {
        let p = mock_textbook();
        let mut a = north_west_corner(p.supply(), p.demand());
        let before = a.clone();

        // a single-cell loop never moves anything
        let single = ReallocationLoop::from_cells(vec![c(2, 1)]);
        assert!(!is_valid_loop(&a, &single));
        let r = adjust_along_loop(&mut a, &single);
        assert!(matches!(r, Err(TransportError::LoopNotFound { .. })));

        // diagonal step
        let diagonal = ReallocationLoop::from_cells(vec![c(2, 1), c(1, 2), c(1, 1), c(2, 2)]);
        assert!(!is_valid_loop(&a, &diagonal));

        // (0,3) is off the basis
        let off_basis = ReallocationLoop::from_cells(vec![c(2, 1), c(0, 1), c(0, 3), c(2, 3)]);
        assert!(!is_valid_loop(&a, &off_basis));

        let empty = ReallocationLoop::from_cells(vec![]);
        assert!(adjust_along_loop(&mut a, &empty).is_err());

        assert_eq!(a, before);
    }

    #[test]
    fn adjust_textbook_first_iteration() {
        let p = mock_textbook();
        let mut a = north_west_corner(p.supply(), p.demand());
        let lp = find_loop(&a, c(2, 1)).unwrap();
        let adj = adjust_along_loop(&mut a, &lp).unwrap();
        assert_eq!(adj.theta, 40);
        assert_eq!(adj.entering, c(2, 1));
        assert_eq!(adj.leaving, c(2, 2));
        assert_eq!(a[c(2, 1)], 40);
        assert_eq!(a[c(1, 1)], 30);
        assert_eq!(a[c(1, 2)], 90);
        assert_eq!(a[c(2, 2)], 0);
        assert!(a.is_basic(c(2, 1)));
        assert!(!a.is_basic(c(2, 2)));
        assert_eq!(a.basic_count(), 6);
        assert!(is_feasible_allocation(&a, p.supply(), p.demand()));
        assert_eq!(a.total_cost(p.cost()), 3080);
    }

    #[test]
    fn adjust_tie_keeps_one_donor_basic() {
        // donors (0,0) and (1,1) both hold 5
        let quantities = Matrix::from_rows(vec![vec![5i64, 5], vec![0, 5]]).unwrap();
        let mut a = Allocation::from_quantities(quantities);
        let lp = find_loop(&a, c(1, 0)).unwrap();
        assert_eq!(lp.cells(), &[c(1, 0), c(0, 0), c(0, 1), c(1, 1)]);
        let adj = adjust_along_loop(&mut a, &lp).unwrap();
        assert_eq!(adj.theta, 5);
        assert_eq!(adj.leaving, c(0, 0));
        assert_eq!(a[c(1, 1)], 0);
        assert!(a.is_basic(c(1, 1)));
        assert!(!a.is_basic(c(0, 0)));
        assert_eq!(a.basic_count(), a.required_basic_count());
    }

    #[test]
    fn complete_basis_connects_components() {
        let cost = Matrix::from_rows(vec![vec![2i64, 3], vec![4, 1]]).unwrap();
        let mut a = north_west_corner(&[10, 10], &[10, 10]);
        assert!(a.is_degenerate());
        let added = complete_basis(&cost, &mut a);
        assert_eq!(added, vec![c(0, 1)]);
        assert!(!a.is_degenerate());
        assert_eq!(a[c(0, 1)], 0);
        assert!(compute_potentials(&cost, &a).is_ok());

        // already spanning: nothing to add
        assert!(complete_basis(&cost, &mut a).is_empty());
    }
}
