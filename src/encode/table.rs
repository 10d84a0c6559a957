//! Deduplication of bone index tuples. Vertices whose indices agree on all
//! slots with a surviving weight share one row of the tuple table.

use rayon::prelude::*;

use crate::core::shared::{compare_index_tuples, IRRELEVANT_INDEX, SUPPORTED_BONE_COUNT};

/// Bone index tuple of a vertex in the ascending order of its weights.
/// Slots whose weight vanishes hold `IRRELEVANT_INDEX`.
pub type IndexTuple = [u16; SUPPORTED_BONE_COUNT];

#[derive(Clone, Debug, PartialEq)]
pub struct TupleTable {
    /// Stored rows of `bone_count` indices, at most `capacity` of them.
    pub rows: Vec<u16>,
    pub bone_count: usize,
    /// Number of rows that were needed. Exceeds `capacity` on overflow.
    pub size: usize,
    pub capacity: usize,
    /// Tuple index field of every vertex: a row index, or the bone index
    /// itself for vertices with a single influence.
    pub assignments: Vec<u32>,
    /// Number of single influence vertices whose bone index does not fit
    /// into the tuple index field.
    pub singleton_overflow: usize,
}

impl TupleTable {
    pub fn is_overflow(&self) -> bool {
        self.size > self.capacity
    }

    pub fn stored_row_count(&self) -> usize {
        self.rows.len() / self.bone_count
    }

    pub fn row(&self, i: usize) -> &[u16] {
        &self.rows[i * self.bone_count..(i + 1) * self.bone_count]
    }
}

/// Builds the tuple table of a mesh.
///
/// # Arguments
/// * `tuples` - the index tuple of every vertex, of which the first `bone_count` slots are used.
/// * `bone_count` - the number of influences per vertex.
/// * `capacity` - the largest number of rows, which also bounds the bone index of single influence vertices.
pub fn build(tuples: &[IndexTuple], bone_count: usize, capacity: usize) -> TupleTable {
    debug_assert!(capacity > 0);
    let mut records: Vec<(u32, IndexTuple)> = tuples.iter()
        .enumerate()
        .map(|(vertex, &tuple)| (vertex as u32, tuple))
        .collect();
    // stable, so equal tuples stay in vertex order
    records.par_sort_by(|a, b| compare_index_tuples(&a.1[..bone_count], &b.1[..bone_count]));

    let last_slot = capacity - 1;
    let mut rows = Vec::with_capacity(capacity.min(tuples.len()) * bone_count);
    let mut assignments = vec![0u32; tuples.len()];
    let mut representative = [IRRELEVANT_INDEX; SUPPORTED_BONE_COUNT];
    let mut size = 0usize;
    let mut singleton_count = 0usize;
    let mut singleton_overflow = 0usize;

    for (vertex, tuple) in &records {
        let tuple = &tuple[..bone_count];
        let (rest, largest) = tuple.split_at(bone_count - 1);
        if rest.iter().all(|&i| i == IRRELEVANT_INDEX) {
            let index = largest[0] as usize;
            singleton_count += 1;
            if index > last_slot {
                singleton_overflow += 1;
            }
            assignments[*vertex as usize] = index.min(last_slot) as u32;
            continue;
        }

        let matches = representative[..bone_count].iter()
            .zip(tuple)
            .all(|(&r, &t)| r == t || t == IRRELEVANT_INDEX);
        if !matches {
            representative[..bone_count].copy_from_slice(tuple);
            if size < capacity {
                rows.extend_from_slice(tuple);
            }
            size += 1;
        }
        assignments[*vertex as usize] = (size - 1).min(last_slot) as u32;
    }

    if size > capacity {
        tracing::warn!(size, capacity, "Tuple table overflow, vertices past the capacity use the last row");
    }
    if singleton_overflow > 0 {
        tracing::warn!(singleton_overflow, capacity, "Bone indices of single influence vertices exceed the tuple index field");
    }
    tracing::debug!(size, capacity, singleton_count, vertex_count = tuples.len(), "Built tuple table");

    TupleTable { rows, bone_count, size, capacity, assignments, singleton_overflow }
}


#[cfg(test)]
mod tests {
    use super::*;

    const W: u16 = IRRELEVANT_INDEX;

    fn tuple(indices: &[u16]) -> IndexTuple {
        let mut out = [W; SUPPORTED_BONE_COUNT];
        out[..indices.len()].copy_from_slice(indices);
        out
    }

    #[test]
    fn shared_tuple_makes_one_row() {
        let tuples = vec![tuple(&[3, 5, 9, 12]); 1000];
        let table = build(&tuples, 4, 128);
        assert_eq!(table.size, 1);
        assert_eq!(table.rows, vec![3, 5, 9, 12]);
        assert!(table.assignments.iter().all(|&a| a == 0));
        assert!(!table.is_overflow());
    }

    #[test]
    fn wildcards_merge_into_specific_rows() {
        let tuples = [
            tuple(&[W, 2, 3]),
            tuple(&[4, 5, 6]),
            tuple(&[1, 2, 3]),
            tuple(&[W, 5, 6]),
        ];
        let table = build(&tuples, 3, 16);
        assert_eq!(table.size, 2);
        assert_eq!(table.row(0), &[1, 2, 3]);
        assert_eq!(table.row(1), &[4, 5, 6]);
        assert_eq!(table.assignments, vec![0, 1, 0, 1]);
    }

    #[test]
    fn wildcard_in_row_does_not_match_index() {
        let tuples = [tuple(&[W, 2, 3]), tuple(&[7, W, 3])];
        let table = build(&tuples, 3, 16);
        assert_eq!(table.size, 2);
        for (vertex, t) in tuples.iter().enumerate() {
            let row = table.row(table.assignments[vertex] as usize);
            assert!(row.iter().zip(&t[..3]).all(|(&r, &i)| r == i || i == W));
        }
    }

    #[test]
    fn singletons_store_bone_index() {
        let tuples = [tuple(&[W, W, 7]), tuple(&[W, W, 40]), tuple(&[1, 2, 3])];
        let table = build(&tuples, 3, 16);
        assert_eq!(table.size, 1);
        assert_eq!(table.assignments, vec![7, 15, 0]);
        assert_eq!(table.singleton_overflow, 1);
    }

    #[test]
    fn overflow_uses_last_row() {
        let tuples = [tuple(&[1, 2]), tuple(&[3, 4]), tuple(&[5, 6]), tuple(&[1, 2])];
        let table = build(&tuples, 2, 2);
        assert!(table.is_overflow());
        assert_eq!(table.size, 3);
        assert_eq!(table.stored_row_count(), 2);
        assert_eq!(table.rows, vec![1, 2, 3, 4]);
        assert_eq!(table.assignments, vec![0, 1, 1, 0]);
    }
}
