//! Brute-force enumeration of k-way partitions.

use crate::graph::RoomGraph;
use crate::partition::Partition;
use crate::rooms::per_room_budget;
use tracing::debug;

/// Best feasible partition found by [`brute_force`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustiveSolution {
    pub partition: Partition,
    /// Number of rooms.
    pub k: usize,
    pub total_happiness: f64,
}

impl ExhaustiveSolution {
    /// Room index per student.
    pub fn assignment(&self) -> &[usize] {
        self.partition.assignment()
    }
}

/// Searches every assignment of students to exactly `k` rooms for each
/// `k` in `k_values`.
///
/// Assignments are enumerated as base-`k` numerals over `n` digits (digit
/// `i` is the room of student `i`); those leaving a room empty are
/// skipped. A candidate is rejected if any room's stress exceeds
/// `total_budget / k`. Among the rest the highest total happiness wins;
/// ties keep the earliest candidate, with `k` visited in ascending order.
///
/// Returns `None` when no feasible partition exists for any requested `k`.
/// Cost is `k^n` per `k`, so this is only meant for tiny instances.
pub fn brute_force(
    graph: &RoomGraph,
    total_budget: f64,
    k_values: &[usize],
) -> Option<ExhaustiveSolution> {
    let n = graph.len();
    let mut ks: Vec<usize> = k_values.iter().copied().filter(|&k| k >= 1 && k <= n).collect();
    ks.sort_unstable();
    ks.dedup();

    let mut best: Option<ExhaustiveSolution> = None;

    for k in ks {
        let limit = per_room_budget(total_budget, k);
        let mut digits = vec![0usize; n];
        let mut rooms: Vec<Vec<usize>> = vec![Vec::with_capacity(n); k];
        let mut visited = 0u64;

        loop {
            for room in rooms.iter_mut() {
                room.clear();
            }
            for (student, &room) in digits.iter().enumerate() {
                rooms[room].push(student);
            }
            visited += 1;

            if rooms.iter().all(|r| !r.is_empty()) {
                if let Some(happiness) = score(graph, &rooms, limit) {
                    let better = best.as_ref().is_none_or(|b| happiness > b.total_happiness);
                    if better {
                        // digits use every room, so this cannot fail
                        if let Ok(partition) = Partition::from_assignment(&digits) {
                            best = Some(ExhaustiveSolution {
                                partition,
                                k,
                                total_happiness: happiness,
                            });
                        }
                    }
                }
            }

            if !increment(&mut digits, k) {
                break;
            }
        }

        debug!(k, visited, "exhaustive search pass finished");
    }

    best
}

/// Total happiness of `rooms`, or `None` if a room's stress exceeds `limit`.
fn score(graph: &RoomGraph, rooms: &[Vec<usize>], limit: f64) -> Option<f64> {
    let mut happiness = 0.0;
    for room in rooms {
        if graph.room_stress(room) > limit {
            return None;
        }
        happiness += graph.room_happiness(room);
    }
    Some(happiness)
}

/// Advances `digits` as a little-endian base-`k` counter. Returns `false`
/// on wrap-around.
fn increment(digits: &mut [usize], k: usize) -> bool {
    for d in digits.iter_mut() {
        *d += 1;
        if *d < k {
            return true;
        }
        *d = 0;
    }
    false
}
