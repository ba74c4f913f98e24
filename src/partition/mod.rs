//! Set partitions of students into rooms.
//!
//! A [`Partition`] holds an ordered list of non-empty rooms and the
//! student → room map, always in sync. Room indices are contiguous from
//! zero. The only mutation is [`Partition::relocate`], which returns a
//! fresh partition and compacts room indices when a room empties.

mod moves;
mod types;

pub use moves::propose;
pub use types::{Partition, PartitionError};
