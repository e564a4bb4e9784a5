use super::matrix::Cell;
use super::problem::Problem;

/// short-hand constructor of `Cell` used in tests
pub fn c(source: usize, destination: usize) -> Cell {
    Cell::new(source, destination)
}

fn problem(cost: Vec<Vec<i64>>, supply: Vec<i64>, demand: Vec<i64>) -> Problem<i64> {
    match Problem::from_rows(cost, supply, demand) {
        Ok(p) => p,
        Err(e) => panic!("invalid mock problem: {}", e),
    }
}

/// mock problem generation functions

/// balanced 3x4 problem, North-West Corner cost 3320, optimal cost 2850
pub fn mock_textbook() -> Problem<i64> {
    problem(
        vec![vec![8, 6, 10, 9], vec![9, 12, 13, 7], vec![14, 9, 16, 5]],
        vec![100, 120, 130],
        vec![70, 100, 90, 90],
    )
}

/// same as `mock_textbook` with float amounts
pub fn mock_textbook_float() -> Problem<f64> {
    match Problem::from_rows(
        vec![
            vec![8.0, 6.0, 10.0, 9.0],
            vec![9.0, 12.0, 13.0, 7.0],
            vec![14.0, 9.0, 16.0, 5.0],
        ],
        vec![100.0, 120.0, 130.0],
        vec![70.0, 100.0, 90.0, 90.0],
    ) {
        Ok(p) => p,
        Err(e) => panic!("invalid mock problem: {}", e),
    }
}

/// mock problem cited from the classic textbook example, initial 1015, optimal 743
pub fn mock_classic() -> Problem<i64> {
    problem(
        vec![
            vec![19, 30, 50, 10],
            vec![70, 30, 40, 60],
            vec![40, 8, 70, 20],
        ],
        vec![7, 9, 18],
        vec![5, 8, 7, 14],
    )
}

/// supply exceeds demand by 5, optimal cost 95
pub fn mock_excess_supply() -> Problem<i64> {
    problem(vec![vec![4, 6], vec![5, 3]], vec![10, 20], vec![15, 10])
}

/// demand exceeds supply by 5, second pivot is degenerate (θ = 0), optimal cost 80
pub fn mock_excess_demand() -> Problem<i64> {
    problem(vec![vec![4, 6, 2], vec![5, 3, 1]], vec![10, 20], vec![15, 10, 10])
}

/// North-West Corner exhausts source 0 and destination 0 at once, optimal cost 30
pub fn mock_degenerate() -> Problem<i64> {
    problem(vec![vec![2, 3], vec![4, 1]], vec![10, 10], vec![10, 10])
}

#[cfg(test)]
mod tests {
    use super::super::{solve, solve_with, DegeneracyPolicy, NoTrace, SolverConfig};
    use super::*;

    #[test]
    fn test_mock_textbook() {
        let s = solve(&mock_textbook()).unwrap();
        assert_eq!(s.initial_cost, 3320);
        assert_eq!(s.total_cost, 2850);
        assert_eq!(s.iterations, 3);
    }

    #[test]
    fn test_mock_textbook_float() {
        let s = solve(&mock_textbook_float()).unwrap();
        assert!((s.initial_cost - 3320.0).abs() < 1e-6);
        assert!((s.total_cost - 2850.0).abs() < 1e-6);
    }

    #[test]
    fn test_mock_classic() {
        let s = solve(&mock_classic()).unwrap();
        assert_eq!(s.initial_cost, 1015);
        assert_eq!(s.total_cost, 743);
    }

    #[test]
    fn test_mock_excess_supply() {
        let s = solve(&mock_excess_supply()).unwrap();
        assert_eq!(s.total_cost, 95);
    }

    #[test]
    fn test_mock_excess_demand() {
        let s = solve(&mock_excess_demand()).unwrap();
        assert_eq!(s.initial_cost, 100);
        assert_eq!(s.total_cost, 80);
        assert_eq!(s.iterations, 2);
    }

    #[test]
    fn test_mock_degenerate() {
        assert!(solve(&mock_degenerate()).is_err());
        let config = SolverConfig::default().with_degeneracy(DegeneracyPolicy::Complete);
        let s = solve_with(&mock_degenerate(), &config, &mut NoTrace).unwrap();
        assert_eq!(s.total_cost, 30);
    }
}
