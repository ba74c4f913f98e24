//! Partition state.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised when building a partition from an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// Room indices must cover `0..k` without gaps.
    #[error("room {missing} is empty (assignment uses {room_count} rooms)")]
    EmptyRoom { missing: usize, room_count: usize },

    /// `n` students fill at most `n` rooms.
    #[error("room {room} out of range for {students} students")]
    RoomOutOfRange { room: usize, students: usize },
}

/// Students grouped into non-empty rooms.
///
/// Invariants: every student `0..n` appears in exactly one room, no room
/// is empty, and `assignment[s]` is the index of the room holding `s`.
///
/// With the `serde` feature a partition is stored as its assignment and
/// rebuilt through [`Partition::from_assignment`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Partition {
    rooms: Vec<Vec<usize>>,
    assignment: Vec<usize>,
}

impl Partition {
    /// Every student alone in its own room; student `s` is in room `s`.
    pub fn identity(n: usize) -> Self {
        Self {
            rooms: (0..n).map(|s| vec![s]).collect(),
            assignment: (0..n).collect(),
        }
    }

    /// Builds a partition from a student → room map.
    ///
    /// Room indices must be contiguous from zero; members of each room are
    /// listed in ascending student order.
    pub fn from_assignment(assignment: &[usize]) -> Result<Self, PartitionError> {
        let students = assignment.len();
        if let Some(&room) = assignment.iter().find(|&&r| r >= students) {
            return Err(PartitionError::RoomOutOfRange { room, students });
        }
        let room_count = assignment.iter().max().map_or(0, |&r| r + 1);
        let mut rooms = vec![Vec::new(); room_count];
        for (student, &room) in assignment.iter().enumerate() {
            rooms[room].push(student);
        }
        if let Some(missing) = rooms.iter().position(Vec::is_empty) {
            return Err(PartitionError::EmptyRoom {
                missing,
                room_count,
            });
        }
        Ok(Self {
            rooms,
            assignment: assignment.to_vec(),
        })
    }

    /// Rooms in index order.
    pub fn rooms(&self) -> &[Vec<usize>] {
        &self.rooms
    }

    /// Room index per student.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Room holding `student`.
    ///
    /// # Panics
    /// Panics if `student` is out of range.
    pub fn room_of(&self, student: usize) -> usize {
        self.assignment[student]
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn item_count(&self) -> usize {
        self.assignment.len()
    }

    /// Student → room map in ascending student order.
    pub fn to_map(&self) -> BTreeMap<usize, usize> {
        self.assignment.iter().copied().enumerate().collect()
    }

    /// Checks every structural invariant.
    pub fn is_consistent(&self) -> bool {
        let n = self.assignment.len();
        let mut seen = vec![false; n];
        for (index, room) in self.rooms.iter().enumerate() {
            if room.is_empty() {
                return false;
            }
            for &student in room {
                if student >= n || seen[student] || self.assignment[student] != index {
                    return false;
                }
                seen[student] = true;
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Moves `student` into room `dest`, returning the new partition.
    ///
    /// Returns `None` when `dest` is already the student's room. When the
    /// source room becomes empty it is deleted and every higher room index
    /// shifts down by one, including `dest`. The student is appended to
    /// the destination room.
    ///
    /// # Panics
    /// Panics if `student` or `dest` is out of range.
    pub fn relocate(&self, student: usize, dest: usize) -> Option<Partition> {
        assert!(
            dest < self.rooms.len(),
            "destination room {dest} out of range for {} rooms",
            self.rooms.len()
        );
        let from = self.assignment[student];
        if from == dest {
            return None;
        }

        let mut rooms = self.rooms.clone();
        let mut assignment = self.assignment.clone();
        let mut dest = dest;

        rooms[from].retain(|&s| s != student);
        if rooms[from].is_empty() {
            rooms.remove(from);
            for room in assignment.iter_mut() {
                if *room > from {
                    *room -= 1;
                }
            }
            if dest > from {
                dest -= 1;
            }
        }
        rooms[dest].push(student);
        assignment[student] = dest;

        Some(Partition { rooms, assignment })
    }
}

impl TryFrom<Vec<usize>> for Partition {
    type Error = PartitionError;

    fn try_from(assignment: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_assignment(&assignment)
    }
}

impl From<Partition> for Vec<usize> {
    fn from(partition: Partition) -> Self {
        partition.assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let p = Partition::identity(4);
        assert_eq!(p.room_count(), 4);
        assert_eq!(p.assignment(), &[0, 1, 2, 3]);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_identity_empty() {
        let p = Partition::identity(0);
        assert_eq!(p.room_count(), 0);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_from_assignment() {
        let p = Partition::from_assignment(&[1, 0, 1, 2]).unwrap();
        assert_eq!(p.rooms(), &[vec![1], vec![0, 2], vec![3]]);
        assert!(p.is_consistent());
        assert_eq!(p.room_of(2), 1);
    }

    #[test]
    fn test_from_assignment_rejects_out_of_range_room() {
        let err = Partition::from_assignment(&[usize::MAX]).unwrap_err();
        assert_eq!(
            err,
            PartitionError::RoomOutOfRange {
                room: usize::MAX,
                students: 1
            }
        );
        let err = Partition::from_assignment(&[0, 2]).unwrap_err();
        assert_eq!(err, PartitionError::RoomOutOfRange { room: 2, students: 2 });
    }

    #[test]
    fn test_assignment_conversions() {
        let p = Partition::try_from(vec![1, 0, 1]).unwrap();
        assert_eq!(p.rooms(), &[vec![1], vec![0, 2]]);
        assert_eq!(Vec::from(p), vec![1, 0, 1]);
        assert!(Partition::try_from(vec![0, 0, 2]).is_err());
    }

    #[test]
    fn test_from_assignment_with_gap() {
        let err = Partition::from_assignment(&[0, 2, 2]).unwrap_err();
        assert_eq!(
            err,
            PartitionError::EmptyRoom {
                missing: 1,
                room_count: 3
            }
        );
    }

    #[test]
    fn test_relocate_same_room_is_noop() {
        let p = Partition::from_assignment(&[0, 0, 1]).unwrap();
        assert!(p.relocate(1, 0).is_none());
    }

    #[test]
    fn test_relocate_without_compaction() {
        let p = Partition::from_assignment(&[0, 0, 1]).unwrap();
        let q = p.relocate(0, 1).unwrap();
        assert_eq!(q.rooms(), &[vec![1], vec![2, 0]]);
        assert_eq!(q.assignment(), &[1, 0, 1]);
        assert!(q.is_consistent());
        // input untouched
        assert_eq!(p.assignment(), &[0, 0, 1]);
    }

    #[test]
    fn test_relocate_compacts_higher_rooms() {
        // rooms: [0] [1] [2] [3]; move 1 into room 3
        let p = Partition::identity(4);
        let q = p.relocate(1, 3).unwrap();
        assert_eq!(q.room_count(), 3);
        assert_eq!(q.rooms(), &[vec![0], vec![2], vec![3, 1]]);
        assert_eq!(q.assignment(), &[0, 2, 1, 2]);
        assert!(q.is_consistent());
    }

    #[test]
    fn test_relocate_compacts_with_lower_destination() {
        let p = Partition::identity(4);
        let q = p.relocate(2, 0).unwrap();
        assert_eq!(q.rooms(), &[vec![0, 2], vec![1], vec![3]]);
        assert_eq!(q.assignment(), &[0, 1, 0, 2]);
        assert!(q.is_consistent());
    }

    #[test]
    fn test_to_map() {
        let p = Partition::from_assignment(&[0, 1, 0]).unwrap();
        let map = p.to_map();
        assert_eq!(map.get(&2), Some(&0));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_is_consistent_detects_mismatch() {
        let p = Partition {
            rooms: vec![vec![0], vec![1]],
            assignment: vec![0, 0],
        };
        assert!(!p.is_consistent());
    }
}
