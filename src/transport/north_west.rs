//!
//! Initial feasible allocation by the North-West Corner rule
//!
use super::allocation::Allocation;
use super::amount::AmountLike;
use super::matrix::Cell;

///
/// Find an initial feasible allocation of a balanced problem.
///
/// Starting at the upper-left cell, ship `min(remaining supply, remaining demand)`,
/// then move down when the source is exhausted and right when the destination
/// is exhausted (both at once if both are exhausted).
///
/// `supply` and `demand` are the canonical vectors; the rule consumes private copies.
///
pub fn north_west_corner<T: AmountLike>(supply: &[T], demand: &[T]) -> Allocation<T> {
    let mut remaining_supply = supply.to_vec();
    let mut remaining_demand = demand.to_vec();
    north_west_corner_consuming(&mut remaining_supply, &mut remaining_demand)
}

///
/// North-West Corner rule decrementing `supply` and `demand` as quantities are assigned.
///
pub fn north_west_corner_consuming<T: AmountLike>(
    supply: &mut [T],
    demand: &mut [T],
) -> Allocation<T> {
    let mut allocation = Allocation::zero(supply.len(), demand.len());
    let (mut i, mut j) = (0, 0);

    while i < supply.len() && j < demand.len() {
        let quantity = supply[i].min_of(demand[j]);
        allocation.assign(Cell::new(i, j), quantity);
        supply[i] -= quantity;
        demand[j] -= quantity;

        let source_done = !supply[i].is_above_zero();
        let destination_done = !demand[j].is_above_zero();
        if source_done {
            i += 1;
        }
        if destination_done {
            j += 1;
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::super::allocation::is_feasible_allocation;
    use super::super::matrix::Matrix;
    use super::*;

    #[test]
    fn north_west_corner_textbook() {
        let supply: [i64; 3] = [100, 120, 130];
        let demand: [i64; 4] = [70, 100, 90, 90];
        let a = north_west_corner(&supply, &demand);
        let expected =
            Matrix::from_rows(vec![vec![70, 30, 0, 0], vec![0, 70, 50, 0], vec![0, 0, 40, 90]])
                .unwrap();
        assert_eq!(a.quantities(), &expected);
        assert_eq!(a.basic_count(), 6);
        assert!(!a.is_degenerate());
        assert!(is_feasible_allocation(&a, &supply, &demand));

        let cost =
            Matrix::from_rows(vec![vec![8, 6, 10, 9], vec![9, 12, 13, 7], vec![14, 9, 16, 5]])
                .unwrap();
        assert_eq!(a.total_cost(&cost), 3320);
    }

    #[test]
    fn north_west_corner_consumes_remainders() {
        let mut supply: [i64; 3] = [7, 9, 18];
        let mut demand = [5, 8, 7, 14];
        let a = north_west_corner_consuming(&mut supply, &mut demand);
        assert_eq!(supply, [0, 0, 0]);
        assert_eq!(demand, [0, 0, 0, 0]);
        assert!(is_feasible_allocation(&a, &[7, 9, 18], &[5, 8, 7, 14]));
    }

    #[test]
    fn north_west_corner_simultaneous_exhaustion_is_degenerate() {
        let a = north_west_corner::<i64>(&[10, 10], &[10, 10]);
        assert_eq!(
            a.basic_cells().collect::<Vec<_>>(),
            vec![Cell::new(0, 0), Cell::new(1, 1)]
        );
        assert!(a.is_degenerate());
    }

    #[test]
    fn north_west_corner_float() {
        let a = north_west_corner(&[1.5, 2.5], &[2.0, 2.0]);
        assert!(is_feasible_allocation(&a, &[1.5, 2.5], &[2.0, 2.0]));
        assert_eq!(a.basic_count(), 3);
    }
}
