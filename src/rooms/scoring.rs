//! Feasibility, scoring and energy.

use crate::graph::RoomGraph;
use crate::partition::Partition;

/// Summed happiness over all rooms.
pub fn total_happiness(graph: &RoomGraph, partition: &Partition) -> f64 {
    partition
        .rooms()
        .iter()
        .map(|room| graph.room_happiness(room))
        .sum()
}

/// Summed stress over all rooms.
pub fn total_stress(graph: &RoomGraph, partition: &Partition) -> f64 {
    partition
        .rooms()
        .iter()
        .map(|room| graph.room_stress(room))
        .sum()
}

/// Stress allowance of each room when the budget is split across
/// `room_count` rooms.
#[inline]
pub fn per_room_budget(total_budget: f64, room_count: usize) -> f64 {
    total_budget / room_count as f64
}

/// Whether every room's stress is within `total_budget / k`, where `k` is
/// the partition's current room count. A room exactly at the limit is
/// feasible.
///
/// A partition with no rooms is feasible (there is nothing to violate).
pub fn is_feasible(graph: &RoomGraph, partition: &Partition, total_budget: f64) -> bool {
    if partition.room_count() == 0 {
        return true;
    }
    let limit = per_room_budget(total_budget, partition.room_count());
    partition
        .rooms()
        .iter()
        .all(|room| graph.room_stress(room) <= limit)
}

/// Energy minimized by the search: total stress over total happiness.
///
/// Infinite when total happiness is exactly zero, which covers the
/// identity partition and every degenerate input.
pub fn energy(graph: &RoomGraph, partition: &Partition) -> f64 {
    let mut stress = 0.0;
    let mut happiness = 0.0;
    for room in partition.rooms() {
        stress += graph.room_stress(room);
        happiness += graph.room_happiness(room);
    }
    if happiness == 0.0 {
        f64::INFINITY
    } else {
        stress / happiness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair_heavy() -> RoomGraph {
        RoomGraph::from_fn(4, |i, j| {
            if (i, j) == (0, 1) {
                (40.0, 5.0)
            } else {
                (1.0, 9.0)
            }
        })
    }

    #[test]
    fn test_identity_has_zero_happiness() {
        let g = pair_heavy();
        let p = Partition::identity(4);
        assert_eq!(total_happiness(&g, &p), 0.0);
        assert_eq!(total_stress(&g, &p), 0.0);
        assert_eq!(energy(&g, &p), f64::INFINITY);
    }

    #[test]
    fn test_totals() {
        let g = pair_heavy();
        let p = Partition::from_assignment(&[0, 0, 1, 1]).unwrap();
        assert!((total_happiness(&g, &p) - 82.0).abs() < 1e-12);
        assert!((total_stress(&g, &p) - 28.0).abs() < 1e-12);
        assert!((energy(&g, &p) - 14.0 / 41.0).abs() < 1e-12);
    }

    #[test]
    fn test_feasibility_uses_current_room_count() {
        let g = pair_heavy();
        // {0,1} {2} {3}: limit 40/3 ~ 13.3, room stress 10
        let three = Partition::from_assignment(&[0, 0, 1, 2]).unwrap();
        assert!(is_feasible(&g, &three, 40.0));
        // {0,1,2} {3}: limit 20, room stress 46
        let two = Partition::from_assignment(&[0, 0, 0, 1]).unwrap();
        assert!(!is_feasible(&g, &two, 40.0));
        // {0,1} {2} {3} with budget 20: limit 6.67
        assert!(!is_feasible(&g, &three, 20.0));
    }

    #[test]
    fn test_boundary_is_feasible() {
        let g = pair_heavy();
        // {0,1} {2,3}: stresses 10 and 18, limit 36 / 2 = 18
        let p = Partition::from_assignment(&[0, 0, 1, 1]).unwrap();
        assert!(is_feasible(&g, &p, 36.0));
        assert!(!is_feasible(&g, &p, 35.999));
    }

    #[test]
    fn test_pair_stress_counts_both_directions() {
        // one room of two: stress 5 each way, 10 against a limit of 6
        let g = RoomGraph::from_fn(2, |_, _| (1.0, 5.0));
        let p = Partition::from_assignment(&[0, 0]).unwrap();
        assert_eq!(total_stress(&g, &p), 10.0);
        assert!(!is_feasible(&g, &p, 6.0));
        assert!(is_feasible(&g, &p, 10.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = RoomGraph::from_fn(0, |_, _| (0.0, 0.0));
        let p = Partition::identity(0);
        assert!(is_feasible(&empty, &p, 1.0));
        assert_eq!(energy(&empty, &p), f64::INFINITY);

        let single = RoomGraph::from_fn(1, |_, _| (0.0, 0.0));
        let p = Partition::identity(1);
        assert!(is_feasible(&single, &p, 0.0));
        assert_eq!(energy(&single, &p), f64::INFINITY);
    }

    #[test]
    fn test_zero_stress_positive_happiness_is_zero_energy() {
        let g = RoomGraph::from_fn(2, |_, _| (3.0, 0.0));
        let p = Partition::from_assignment(&[0, 0]).unwrap();
        assert_eq!(energy(&g, &p), 0.0);
    }

    fn weights(n: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.1f64..50.0, 0.0f64..10.0), n * (n - 1) / 2)
    }

    fn graph_from(n: usize, w: &[(f64, f64)]) -> RoomGraph {
        let mut it = w.iter().copied();
        RoomGraph::from_fn(n, |_, _| it.next().unwrap_or((0.0, 0.0)))
    }

    proptest! {
        #[test]
        fn prop_feasibility_monotonic_in_budget(
            w in weights(6),
            rooms in prop::collection::vec(0usize..3, 6),
            budget in 0.0f64..100.0,
            extra in 0.0f64..100.0,
        ) {
            let g = graph_from(6, &w);
            let mut used = rooms.clone();
            used.sort_unstable();
            used.dedup();
            let compact: Vec<usize> =
                rooms.iter().map(|r| used.binary_search(r).unwrap()).collect();
            let p = Partition::from_assignment(&compact).unwrap();
            if is_feasible(&g, &p, budget) {
                prop_assert!(is_feasible(&g, &p, budget + extra));
            }
        }

        #[test]
        fn prop_energy_scale_invariant(
            w in weights(5),
            factor in 0.5f64..20.0,
        ) {
            let g = graph_from(5, &w);
            let scaled = g.scaled(factor);
            let p = Partition::from_assignment(&[0, 0, 1, 1, 1]).unwrap();
            let a = energy(&g, &p);
            let b = energy(&scaled, &p);
            prop_assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0));
        }
    }
}
