//! Random single-student relocation.

use super::types::Partition;
use rand::Rng;

/// Proposes a neighbor of `partition` by relocating one random student.
///
/// 1. Pick a source room uniformly among the current rooms.
/// 2. Pick a student uniformly from that room.
/// 3. Pick a destination uniformly among `0..k`, the source included.
///
/// Returns `None` when the destination is the student's own room; the
/// caller resamples. With fewer than two rooms no relocation exists and
/// `None` is returned without drawing.
pub fn propose<R: Rng>(partition: &Partition, rng: &mut R) -> Option<Partition> {
    let k = partition.room_count();
    if k < 2 {
        return None;
    }
    let source = &partition.rooms()[rng.random_range(0..k)];
    let student = source[rng.random_range(0..source.len())];
    let dest = rng.random_range(0..k);
    partition.relocate(student, dest)
}
