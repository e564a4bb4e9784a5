use rustmodi::transport::utils::{format_matrix, format_vector};
use rustmodi::transport::{
    solve_with, Allocation, BalancedProblem, Cell, DegeneracyPolicy, Iteration, LogTracer,
    Potentials, Problem, SolverConfig, Tracer,
};
use std::io::Read;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
enum InputError {
    #[error("failed to read stdin")]
    Io(#[from] std::io::Error),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("`{token}` is not an integer")]
    NotInteger {
        token: String,
        #[source]
        cause: ParseIntError,
    },
    #[error("count `{0}` is negative")]
    NegativeCount(i64),
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn integer(&mut self, what: &'static str) -> Result<i64, InputError> {
        let token = self.inner.next().ok_or(InputError::Missing(what))?;
        token.parse::<i64>().map_err(|cause| InputError::NotInteger {
            token: token.to_string(),
            cause,
        })
    }
    fn count(&mut self, what: &'static str) -> Result<usize, InputError> {
        let n = self.integer(what)?;
        usize::try_from(n).map_err(|_| InputError::NegativeCount(n))
    }
    fn integers(&mut self, n: usize, what: &'static str) -> Result<Vec<i64>, InputError> {
        (0..n).map(|_| self.integer(what)).collect()
    }
}

///
/// Whitespace separated input:
/// number of sources, number of destinations, cost matrix (row by row),
/// supply array, demand array.
///
fn parse_problem(input: &str) -> Result<Problem<i64>, Box<dyn std::error::Error>> {
    let mut tokens = Tokens {
        inner: input.split_whitespace(),
    };
    let n_sources = tokens.count("number of sources")?;
    let n_destinations = tokens.count("number of destinations")?;
    let cost = (0..n_sources)
        .map(|_| tokens.integers(n_destinations, "cost"))
        .collect::<Result<Vec<Vec<i64>>, _>>()?;
    let supply = tokens.integers(n_sources, "supply")?;
    let demand = tokens.integers(n_destinations, "demand")?;

    Ok(Problem::from_rows(cost, supply, demand)?)
}

/// Prints the initial and optimal allocations, forwards everything to the log.
struct ConsoleTracer {
    log: LogTracer,
}

impl Tracer<i64> for ConsoleTracer {
    fn name(&self) -> &str {
        "ConsoleTracer"
    }
    fn on_balanced(&mut self, problem: &BalancedProblem<i64>) {
        self.log.on_balanced(problem);
    }
    fn on_basis_completed(&mut self, added: &[Cell], allocation: &Allocation<i64>) {
        self.log.on_basis_completed(added, allocation);
    }
    fn on_initial_allocation(&mut self, allocation: &Allocation<i64>, cost: i64) {
        println!(
            "{}",
            format_matrix(
                "Initial Allocation (North-West Corner Rule)",
                allocation.quantities()
            )
        );
        println!("Initial Cost: {}", cost);
        self.log.on_initial_allocation(allocation, cost);
    }
    fn on_iteration(&mut self, iteration: &Iteration<i64>, allocation: &Allocation<i64>) {
        self.log.on_iteration(iteration, allocation);
    }
    fn on_optimal(
        &mut self,
        allocation: &Allocation<i64>,
        potentials: &Potentials<i64>,
        cost: i64,
    ) {
        println!("Optimal solution reached!");
        println!("{}", format_matrix("Optimal Allocation", allocation.quantities()));
        println!("Total Optimal Cost: {}", cost);
        self.log.on_optimal(allocation, potentials, cost);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(InputError::from)?;
    let problem = parse_problem(&input)?;
    println!("{}", format_matrix("Cost", problem.cost()));
    println!("{}", format_vector("Supply", problem.supply()));
    println!("{}", format_vector("Demand", problem.demand()));

    let config = SolverConfig::default().with_degeneracy(DegeneracyPolicy::Complete);
    let mut tracer = ConsoleTracer { log: LogTracer };
    let solution = solve_with(&problem, &config, &mut tracer)?;
    log::info!(
        "solved in {} iterations (dummy: {})",
        solution.iterations,
        solution.dummy()
    );
    Ok(())
}
