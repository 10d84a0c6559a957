//! Parameter sets of the permutation coding codec. Each cell of the table
//! describes the best known codec for a supported tuple count, a bone count
//! and a vertex size in bytes. Cells without a row are not supported.

use std::collections::HashMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::shared::{MIN_BONE_COUNT, SUPPORTED_BONE_COUNT};

/// Tuple counts for which permutation codecs exist, in ascending order.
pub const SUPPORTED_TUPLE_COUNTS: [u32; 5] = [128, 512, 2048, 4096, 7000];

/// The largest vertex size in bytes of a permutation coded vertex.
pub const MAX_PERMUTATION_VERTEX_SIZE: usize = 8;

/// Describes one permutation codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecDescriptor {
    /// Number of explicit weights, which is the bone count minus one.
    pub entry_count: u32,
    /// Number of distinct coarse values that each explicit weight may take.
    pub weight_value_count: u32,
    /// Number of refinement values per explicit weight, smallest weight first.
    /// Only the first `entry_count` entries are meaningful.
    pub extra_value_counts: [u32; SUPPORTED_BONE_COUNT - 1],
    /// Number of payload values divided by `entry_count!`.
    pub payload_value_count_over_factorial: u32,
}

impl CodecDescriptor {
    fn from_row(weight_value_count: u32, extra_value_counts: &[u32], payload_value_count_over_factorial: u32) -> Self {
        let mut extras = [0; SUPPORTED_BONE_COUNT - 1];
        extras[..extra_value_counts.len()].copy_from_slice(extra_value_counts);
        Self {
            entry_count: extra_value_counts.len() as u32,
            weight_value_count,
            extra_value_counts: extras,
            payload_value_count_over_factorial,
        }
    }

    /// The meaningful part of `extra_value_counts`.
    pub fn extra_value_counts(&self) -> &[u32] {
        &self.extra_value_counts[..self.entry_count as usize]
    }
}

/// Key of a table cell: (index into `SUPPORTED_TUPLE_COUNTS`, bone count - 2, vertex size - 1).
pub type CodecKey = (u8, u8, u8);

lazy_static! {
    static ref PERMUTATION_CODECS: HashMap<CodecKey, CodecDescriptor> = ROWS.iter()
        .map(|&(tuple_count, bone_count, vertex_size, weight_value_count, extras, payload)| {
            let class = SUPPORTED_TUPLE_COUNTS.iter()
                .position(|&c| c == tuple_count)
                .unwrap_or(usize::MAX);
            let key = (class as u8, (bone_count - MIN_BONE_COUNT) as u8, (vertex_size - 1) as u8);
            (key, CodecDescriptor::from_row(weight_value_count, extras, payload))
        })
        .collect();
}

/// Returns the index of the smallest supported tuple count that is at least
/// `max_tuple_count`, or `None` if the request exceeds all of them.
pub fn tuple_count_class(max_tuple_count: u32) -> Option<usize> {
    SUPPORTED_TUPLE_COUNTS.iter().position(|&c| c >= max_tuple_count)
}

/// Looks up the codec of a single cell.
pub fn lookup(class: usize, bone_count: usize, vertex_size: usize) -> Option<&'static CodecDescriptor> {
    if class >= SUPPORTED_TUPLE_COUNTS.len()
        || !(MIN_BONE_COUNT..=SUPPORTED_BONE_COUNT).contains(&bone_count)
        || !(1..=MAX_PERMUTATION_VERTEX_SIZE).contains(&vertex_size)
    {
        return None;
    }
    PERMUTATION_CODECS.get(&(class as u8, (bone_count - MIN_BONE_COUNT) as u8, (vertex_size - 1) as u8))
}

/// Looks up the codec of a cell by its tuple count, which must be one of
/// `SUPPORTED_TUPLE_COUNTS`.
pub fn find(tuple_count: u32, bone_count: usize, vertex_size: usize) -> Option<&'static CodecDescriptor> {
    let class = SUPPORTED_TUPLE_COUNTS.iter().position(|&c| c == tuple_count)?;
    lookup(class, bone_count, vertex_size)
}

/// Looks up the codec closest to the requested vertex size. Larger vertex
/// sizes are tried first, then smaller ones. Returns the codec and the
/// vertex size it was found at.
pub fn lookup_with_fallback(class: usize, bone_count: usize, vertex_size: usize) -> Option<(usize, &'static CodecDescriptor)> {
    let vertex_size = vertex_size.clamp(1, MAX_PERMUTATION_VERTEX_SIZE);
    (vertex_size..=MAX_PERMUTATION_VERTEX_SIZE)
        .chain((1..vertex_size).rev())
        .find_map(|size| lookup(class, bone_count, size).map(|codec| (size, codec)))
}

/// Number of cells in the table.
pub fn len() -> usize {
    PERMUTATION_CODECS.len()
}

/// Iterates over all cells as (tuple count, bone count, vertex size, codec).
pub fn iter() -> impl Iterator<Item = (u32, usize, usize, &'static CodecDescriptor)> {
    PERMUTATION_CODECS.iter().map(|(&(class, bones, size), codec)| {
        (SUPPORTED_TUPLE_COUNTS[class as usize], bones as usize + MIN_BONE_COUNT, size as usize + 1, codec)
    })
}

/// (tuple count, bone count, vertex size in bytes, weight value count,
/// extra value counts, payload value count over factorial)
#[rustfmt::skip]
const ROWS: &[(u32, usize, usize, u32, &[u32], u32)] = &[
    (128, 2, 1, 2, &[1], 128),
    (128, 2, 2, 512, &[1], 128),
    (128, 3, 2, 32, &[1, 1], 64),
    (128, 3, 3, 362, &[1, 2], 128),
    (128, 3, 4, 5792, &[1, 2], 128),
    (128, 4, 2, 11, &[1, 1, 2], 43),
    (128, 4, 3, 73, &[1, 1, 2], 43),
    (128, 4, 4, 463, &[1, 1, 2], 43),
    (128, 4, 5, 812, &[3, 4, 8], 2048),
    (128, 4, 6, 5160, &[3, 4, 8], 2048),
    (128, 4, 7, 32767, &[3, 4, 8], 2048),
    (128, 5, 2, 8, &[1, 1, 1, 3], 16),
    (128, 5, 3, 32, &[1, 1, 1, 3], 16),
    (128, 5, 4, 107, &[1, 1, 2, 3], 32),
    (128, 5, 5, 256, &[2, 2, 3, 4], 256),
    (128, 5, 6, 1024, &[2, 2, 3, 4], 256),
    (128, 5, 7, 2048, &[4, 4, 6, 8], 4096),
    (128, 5, 8, 16384, &[2, 2, 3, 4], 256),
    (128, 6, 2, 8, &[1, 1, 1, 1, 1], 2),
    (128, 6, 3, 20, &[1, 1, 1, 2, 2], 5),
    (128, 6, 4, 57, &[1, 1, 1, 2, 3], 7),
    (128, 6, 5, 128, &[1, 1, 2, 3, 5], 32),
    (128, 6, 6, 128, &[4, 4, 5, 8, 12], 8192),
    (128, 6, 7, 1024, &[1, 2, 2, 3, 5], 64),
    (128, 6, 8, 1024, &[4, 5, 6, 8, 16], 16384),
    (128, 7, 3, 14, &[1, 1, 1, 1, 2, 5], 2),
    (128, 7, 4, 33, &[1, 1, 1, 2, 2, 4], 3),
    (128, 7, 5, 64, &[1, 1, 2, 2, 3, 7], 15),
    (128, 7, 6, 128, &[1, 2, 2, 2, 4, 11], 63),
    (128, 7, 7, 128, &[4, 4, 5, 7, 10, 16], 15929),
    (128, 7, 8, 256, &[4, 8, 8, 8, 11, 16], 64080),
    (128, 8, 3, 10, &[1, 1, 1, 2, 2, 2, 4], 1),
    (128, 8, 4, 23, &[1, 1, 1, 2, 2, 2, 4], 1),
    (128, 8, 5, 52, &[1, 1, 1, 2, 2, 2, 4], 1),
    (128, 8, 6, 64, &[2, 2, 2, 3, 3, 4, 8], 59),
    (128, 8, 7, 128, &[2, 2, 2, 3, 4, 5, 10], 122),
    (128, 8, 8, 256, &[2, 2, 2, 4, 4, 7, 11], 251),
    (128, 9, 4, 16, &[1, 1, 1, 2, 2, 3, 4, 6], 1),
    (128, 9, 5, 32, &[1, 1, 1, 2, 2, 3, 4, 6], 1),
    (128, 9, 6, 64, &[1, 1, 1, 2, 2, 3, 4, 6], 1),
    (128, 9, 7, 128, &[1, 1, 1, 2, 2, 3, 4, 6], 1),
    (128, 9, 8, 256, &[1, 1, 1, 2, 2, 3, 4, 6], 1),
    (128, 10, 4, 11, &[1, 1, 2, 2, 2, 2, 4, 5, 8], 1),
    (128, 10, 5, 21, &[1, 1, 2, 2, 2, 2, 4, 5, 8], 1),
    (128, 10, 6, 32, &[2, 2, 2, 2, 2, 3, 4, 5, 10], 7),
    (128, 10, 7, 74, &[1, 1, 2, 2, 2, 2, 4, 5, 8], 1),
    (128, 10, 8, 64, &[2, 3, 4, 4, 4, 5, 8, 11, 16], 954),
    (128, 11, 5, 16, &[1, 2, 2, 2, 2, 2, 4, 4, 5, 11], 1),
    (128, 11, 6, 27, &[1, 2, 2, 2, 2, 2, 4, 4, 5, 11], 1),
    (128, 11, 7, 32, &[2, 2, 3, 3, 4, 4, 4, 6, 8, 16], 63),
    (128, 11, 8, 64, &[2, 2, 2, 2, 3, 4, 4, 6, 8, 12], 16),
    (128, 12, 5, 12, &[2, 2, 2, 2, 2, 2, 3, 4, 4, 8, 12], 1),
    (128, 12, 6, 20, &[2, 2, 2, 2, 2, 2, 3, 4, 4, 8, 12], 1),
    (128, 12, 7, 32, &[2, 2, 2, 2, 2, 3, 4, 4, 4, 8, 12], 2),
    (128, 12, 8, 56, &[2, 2, 2, 2, 2, 2, 3, 4, 4, 8, 12], 1),
    (128, 13, 6, 15, &[2, 2, 2, 2, 2, 4, 4, 4, 4, 7, 8, 16], 2),
    (128, 13, 7, 25, &[2, 2, 2, 2, 2, 2, 4, 4, 4, 7, 8, 16], 1),
    (128, 13, 8, 40, &[2, 2, 2, 2, 2, 2, 4, 4, 4, 7, 8, 16], 1),
    (512, 2, 2, 128, &[1], 512),
    (512, 2, 3, 32768, &[1], 512),
    (512, 3, 2, 16, &[1, 1], 256),
    (512, 3, 3, 181, &[1, 2], 512),
    (512, 3, 4, 2896, &[1, 2], 512),
    (512, 3, 5, 46340, &[1, 2], 512),
    (512, 4, 2, 9, &[1, 1, 1], 86),
    (512, 4, 3, 46, &[1, 1, 2], 171),
    (512, 4, 4, 292, &[1, 1, 2], 171),
    (512, 4, 5, 511, &[3, 4, 8], 8192),
    (512, 4, 6, 3250, &[3, 4, 8], 8192),
    (512, 4, 7, 20642, &[3, 4, 8], 8192),
    (512, 5, 2, 7, &[1, 1, 1, 1], 22),
    (512, 5, 3, 21, &[1, 1, 2, 2], 86),
    (512, 5, 4, 64, &[1, 2, 2, 3], 256),
    (512, 5, 5, 128, &[2, 3, 4, 8], 4096),
    (512, 5, 6, 512, &[2, 3, 4, 8], 4096),
    (512, 5, 7, 2048, &[2, 3, 4, 8], 4096),
    (512, 5, 8, 8192, &[2, 3, 4, 8], 4096),
    (512, 6, 2, 6, &[1, 1, 1, 1, 1], 5),
    (512, 6, 3, 16, &[1, 1, 1, 1, 3], 13),
    (512, 6, 4, 44, &[1, 1, 1, 2, 3], 26),
    (512, 6, 5, 64, &[2, 2, 3, 4, 5], 1024),
    (512, 6, 6, 256, &[1, 2, 2, 3, 5], 256),
    (512, 6, 7, 512, &[2, 2, 3, 5, 8], 2048),
    (512, 6, 8, 1024, &[3, 4, 4, 8, 10], 16384),
    (512, 7, 3, 13, &[1, 1, 1, 1, 2, 2], 3),
    (512, 7, 4, 33, &[1, 1, 1, 1, 2, 2], 3),
    (512, 7, 5, 64, &[1, 1, 1, 2, 2, 5], 15),
    (512, 7, 6, 64, &[2, 3, 3, 4, 7, 11], 3943),
    (512, 7, 7, 128, &[3, 3, 4, 6, 8, 13], 15975),
    (512, 7, 8, 256, &[4, 4, 4, 8, 11, 16], 64080),
    (512, 8, 3, 10, &[1, 1, 1, 1, 1, 2, 4], 1),
    (512, 8, 4, 23, &[1, 1, 1, 1, 1, 2, 4], 1),
    (512, 8, 5, 32, &[1, 1, 2, 2, 3, 4, 6], 30),
    (512, 8, 6, 64, &[1, 2, 2, 2, 3, 4, 6], 59),
    (512, 8, 7, 128, &[1, 2, 2, 2, 3, 5, 10], 122),
    (512, 8, 8, 128, &[3, 4, 4, 5, 8, 10, 16], 31208),
    (512, 9, 4, 16, &[1, 1, 1, 1, 2, 2, 3, 6], 1),
    (512, 9, 5, 32, &[1, 1, 1, 1, 2, 2, 3, 6], 1),
    (512, 9, 6, 64, &[1, 1, 1, 1, 2, 2, 3, 6], 1),
    (512, 9, 7, 128, &[1, 1, 1, 1, 2, 2, 3, 6], 1),
    (512, 9, 8, 256, &[1, 1, 1, 1, 2, 2, 3, 6], 1),
    (512, 10, 4, 11, &[1, 1, 1, 2, 2, 2, 3, 4, 7], 1),
    (512, 10, 5, 21, &[1, 1, 1, 2, 2, 2, 3, 4, 7], 1),
    (512, 10, 6, 32, &[1, 2, 2, 2, 2, 3, 3, 4, 8], 7),
    (512, 10, 7, 74, &[1, 1, 1, 2, 2, 2, 3, 4, 7], 1),
    (512, 10, 8, 64, &[2, 2, 3, 4, 4, 4, 7, 8, 16], 971),
    (512, 11, 5, 16, &[1, 1, 2, 2, 2, 2, 3, 4, 4, 9], 1),
    (512, 11, 6, 27, &[1, 1, 2, 2, 2, 2, 3, 4, 4, 9], 1),
    (512, 11, 7, 32, &[2, 2, 2, 2, 3, 4, 4, 6, 8, 12], 63),
    (512, 11, 8, 64, &[2, 2, 2, 2, 2, 3, 4, 4, 6, 12], 16),
    (512, 12, 5, 12, &[1, 2, 2, 2, 2, 2, 3, 4, 4, 5, 10], 1),
    (512, 12, 6, 20, &[1, 2, 2, 2, 2, 2, 3, 4, 4, 5, 10], 1),
    (512, 12, 7, 32, &[1, 2, 2, 2, 2, 2, 3, 4, 4, 8, 12], 2),
    (512, 12, 8, 56, &[1, 2, 2, 2, 2, 2, 3, 4, 4, 5, 10], 1),
    (512, 13, 6, 15, &[2, 2, 2, 2, 2, 2, 3, 4, 4, 5, 8, 15], 2),
    (512, 13, 7, 25, &[2, 2, 2, 2, 2, 2, 2, 4, 4, 4, 8, 14], 1),
    (512, 13, 8, 40, &[2, 2, 2, 2, 2, 2, 2, 4, 4, 4, 8, 14], 1),
    (2048, 2, 2, 32, &[1], 2048),
    (2048, 2, 3, 8192, &[1], 2048),
    (2048, 3, 2, 8, &[1, 1], 1024),
    (2048, 3, 3, 90, &[1, 2], 2048),
    (2048, 3, 4, 1448, &[1, 2], 2048),
    (2048, 3, 5, 23170, &[1, 2], 2048),
    (2048, 4, 2, 5, &[1, 1, 1], 342),
    (2048, 4, 3, 29, &[1, 1, 2], 683),
    (2048, 4, 4, 184, &[1, 1, 2], 683),
    (2048, 4, 5, 322, &[3, 4, 8], 32768),
    (2048, 4, 6, 2047, &[3, 4, 8], 32768),
    (2048, 4, 7, 13003, &[3, 4, 8], 32768),
    (2048, 5, 2, 5, &[1, 1, 1, 1], 86),
    (2048, 5, 3, 16, &[1, 1, 1, 3], 256),
    (2048, 5, 4, 64, &[1, 1, 1, 3], 256),
    (2048, 5, 5, 128, &[2, 2, 3, 4], 4096),
    (2048, 5, 6, 512, &[2, 2, 3, 4], 4096),
    (2048, 5, 7, 2048, &[2, 2, 3, 4], 4096),
    (2048, 5, 8, 8192, &[2, 2, 3, 4], 4096),
    (2048, 6, 3, 13, &[1, 1, 1, 1, 2], 35),
    (2048, 6, 4, 33, &[1, 1, 1, 2, 3], 103),
    (2048, 6, 5, 64, &[1, 2, 2, 3, 5], 1024),
    (2048, 6, 6, 128, &[2, 2, 3, 5, 8], 8192),
    (2048, 6, 7, 256, &[3, 4, 4, 8, 10], 65536),
    (2048, 6, 8, 1024, &[2, 3, 4, 5, 8], 16384),
    (2048, 7, 3, 11, &[1, 1, 1, 1, 1, 3], 9),
    (2048, 7, 4, 23, &[1, 1, 1, 1, 2, 5], 29),
    (2048, 7, 5, 60, &[1, 1, 1, 1, 2, 4], 23),
    (2048, 7, 6, 64, &[2, 2, 3, 4, 4, 7], 3823),
    (2048, 7, 7, 128, &[2, 3, 3, 4, 7, 11], 15770),
    (2048, 7, 8, 256, &[3, 3, 4, 6, 7, 15], 64512),
    (2048, 8, 3, 10, &[1, 1, 1, 1, 1, 1, 2], 1),
    (2048, 8, 4, 18, &[1, 1, 1, 1, 2, 2, 4], 7),
    (2048, 8, 5, 32, &[1, 1, 1, 2, 2, 3, 6], 30),
    (2048, 8, 6, 64, &[1, 1, 2, 2, 2, 3, 6], 59),
    (2048, 8, 7, 128, &[1, 1, 2, 2, 3, 5, 5], 122),
    (2048, 8, 8, 128, &[2, 4, 4, 4, 6, 8, 13], 32456),
    (2048, 9, 4, 16, &[1, 1, 1, 1, 1, 2, 2, 4], 1),
    (2048, 9, 5, 32, &[1, 1, 1, 1, 1, 2, 2, 4], 1),
    (2048, 9, 6, 64, &[1, 1, 1, 1, 1, 2, 2, 4], 1),
    (2048, 9, 7, 128, &[1, 1, 1, 1, 1, 2, 2, 4], 1),
    (2048, 9, 8, 256, &[1, 1, 1, 1, 1, 2, 2, 4], 1),
    (2048, 10, 4, 11, &[1, 1, 1, 1, 2, 2, 2, 4, 5], 1),
    (2048, 10, 5, 21, &[1, 1, 1, 1, 2, 2, 2, 4, 5], 1),
    (2048, 10, 6, 32, &[1, 1, 2, 2, 2, 2, 3, 4, 6], 7),
    (2048, 10, 7, 74, &[1, 1, 1, 1, 2, 2, 2, 4, 5], 1),
    (2048, 10, 8, 64, &[2, 2, 2, 3, 3, 4, 6, 8, 13], 1015),
    (2048, 11, 5, 16, &[1, 1, 1, 2, 2, 2, 2, 3, 4, 9], 1),
    (2048, 11, 6, 27, &[1, 1, 1, 2, 2, 2, 2, 3, 4, 9], 1),
    (2048, 11, 7, 32, &[2, 2, 2, 2, 2, 3, 4, 4, 6, 12], 63),
    (2048, 11, 8, 64, &[1, 2, 2, 2, 2, 2, 4, 4, 5, 11], 16),
    (2048, 12, 5, 12, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 6, 8], 1),
    (2048, 12, 6, 20, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 6, 8], 1),
    (2048, 12, 7, 32, &[1, 1, 2, 2, 2, 2, 3, 4, 4, 6, 8], 2),
    (2048, 12, 8, 56, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 6, 8], 1),
    (2048, 13, 6, 15, &[1, 2, 2, 2, 2, 2, 2, 4, 4, 4, 8, 14], 2),
    (2048, 13, 7, 25, &[1, 1, 2, 2, 2, 2, 2, 4, 4, 4, 8, 14], 1),
    (2048, 13, 8, 40, &[1, 1, 2, 2, 2, 2, 2, 4, 4, 4, 8, 14], 1),
    (4096, 2, 2, 16, &[1], 4096),
    (4096, 2, 3, 4096, &[1], 4096),
    (4096, 3, 2, 4, &[1, 2], 4096),
    (4096, 3, 3, 64, &[1, 2], 4096),
    (4096, 3, 4, 1024, &[1, 2], 4096),
    (4096, 3, 5, 16384, &[1, 2], 4096),
    (4096, 3, 6, 32768, &[8, 16], 262144),
    (4096, 4, 2, 4, &[1, 1, 1], 683),
    (4096, 4, 3, 23, &[1, 1, 2], 1366),
    (4096, 4, 4, 146, &[1, 1, 2], 1366),
    (4096, 4, 5, 128, &[6, 9, 14], 516096),
    (4096, 4, 6, 1625, &[3, 4, 8], 65536),
    (4096, 4, 7, 10321, &[3, 4, 8], 65536),
    (4096, 4, 8, 65535, &[3, 4, 8], 65536),
    (4096, 5, 3, 14, &[1, 1, 1, 2], 342),
    (4096, 5, 4, 45, &[1, 1, 2, 3], 1024),
    (4096, 5, 5, 128, &[1, 2, 3, 4], 4096),
    (4096, 5, 6, 256, &[3, 4, 4, 8], 65536),
    (4096, 5, 7, 1024, &[3, 4, 4, 8], 65536),
    (4096, 5, 8, 4096, &[3, 4, 4, 8], 65536),
    (4096, 6, 3, 11, &[1, 1, 1, 1, 3], 103),
    (4096, 6, 4, 29, &[1, 1, 1, 2, 3], 205),
    (4096, 6, 5, 64, &[1, 1, 2, 3, 5], 1024),
    (4096, 6, 6, 128, &[2, 2, 3, 4, 5], 8192),
    (4096, 6, 7, 512, &[1, 2, 2, 3, 5], 2048),
    (4096, 6, 8, 512, &[4, 5, 6, 8, 16], 524288),
    (4096, 7, 3, 10, &[1, 1, 1, 1, 1, 2], 12),
    (4096, 7, 4, 22, &[1, 1, 1, 1, 2, 3], 35),
    (4096, 7, 5, 56, &[1, 1, 1, 1, 2, 3], 35),
    (4096, 7, 6, 64, &[2, 2, 2, 3, 4, 7], 3823),
    (4096, 7, 7, 128, &[2, 2, 4, 4, 4, 11], 16020),
    (4096, 7, 8, 256, &[2, 4, 4, 4, 8, 11], 64080),
    (4096, 8, 3, 10, &[1, 1, 1, 1, 1, 1, 1], 1),
    (4096, 8, 4, 18, &[1, 1, 1, 1, 1, 2, 4], 7),
    (4096, 8, 5, 32, &[1, 1, 1, 2, 2, 2, 4], 27),
    (4096, 8, 6, 64, &[1, 1, 1, 2, 2, 3, 6], 59),
    (4096, 8, 7, 128, &[1, 1, 1, 2, 3, 5, 5], 122),
    (4096, 8, 8, 128, &[2, 3, 4, 4, 4, 8, 13], 32456),
    (4096, 9, 4, 16, &[1, 1, 1, 1, 1, 1, 2, 4], 1),
    (4096, 9, 5, 32, &[1, 1, 1, 1, 1, 1, 2, 4], 1),
    (4096, 9, 6, 64, &[1, 1, 1, 1, 1, 1, 2, 4], 1),
    (4096, 9, 7, 128, &[1, 1, 1, 1, 1, 1, 2, 4], 1),
    (4096, 9, 8, 128, &[1, 2, 2, 2, 3, 3, 5, 7], 256),
    (4096, 10, 4, 11, &[1, 1, 1, 1, 1, 2, 2, 4, 5], 1),
    (4096, 10, 5, 21, &[1, 1, 1, 1, 1, 2, 2, 4, 5], 1),
    (4096, 10, 6, 32, &[1, 1, 1, 2, 2, 2, 3, 4, 6], 7),
    (4096, 10, 7, 66, &[1, 1, 1, 1, 2, 2, 2, 4, 8], 3),
    (4096, 10, 8, 64, &[2, 2, 2, 2, 4, 4, 4, 8, 11], 1018),
    (4096, 11, 5, 16, &[1, 1, 1, 1, 2, 2, 2, 3, 4, 9], 1),
    (4096, 11, 6, 27, &[1, 1, 1, 1, 2, 2, 2, 3, 4, 9], 1),
    (4096, 11, 7, 48, &[1, 1, 1, 1, 2, 2, 2, 3, 4, 9], 1),
    (4096, 11, 8, 64, &[1, 2, 2, 2, 2, 2, 3, 4, 4, 9], 16),
    (4096, 12, 5, 12, &[1, 1, 1, 2, 2, 2, 2, 3, 4, 6, 8], 1),
    (4096, 12, 6, 20, &[1, 1, 1, 2, 2, 2, 2, 3, 4, 6, 8], 1),
    (4096, 12, 7, 32, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 6, 8], 2),
    (4096, 12, 8, 56, &[1, 1, 1, 2, 2, 2, 2, 3, 4, 6, 8], 1),
    (4096, 13, 6, 15, &[1, 1, 2, 2, 2, 2, 2, 4, 4, 4, 8, 14], 2),
    (4096, 13, 7, 25, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 4, 8, 9], 1),
    (4096, 13, 8, 40, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 4, 8, 9], 1),
    (7000, 2, 2, 9, &[1], 7000),
    (7000, 2, 3, 2396, &[1], 7000),
    (7000, 3, 2, 4, &[1, 1], 3500),
    (7000, 3, 3, 48, &[1, 2], 7000),
    (7000, 3, 4, 783, &[1, 2], 7000),
    (7000, 3, 5, 12532, &[1, 2], 7000),
    (7000, 4, 3, 19, &[1, 1, 2], 2334),
    (7000, 4, 4, 122, &[1, 1, 2], 2334),
    (7000, 4, 5, 128, &[5, 8, 11], 513334),
    (7000, 4, 6, 512, &[8, 14, 16], 2090667),
    (7000, 4, 7, 8632, &[3, 4, 8], 112000),
    (7000, 4, 8, 54815, &[3, 4, 8], 112000),
    (7000, 5, 3, 13, &[1, 1, 1, 2], 584),
    (7000, 5, 4, 52, &[1, 1, 1, 2], 584),
    (7000, 5, 5, 64, &[2, 4, 4, 7], 65334),
    (7000, 5, 6, 128, &[4, 7, 8, 16], 1045334),
    (7000, 5, 7, 512, &[4, 7, 8, 16], 1045334),
    (7000, 5, 8, 4260, &[2, 3, 4, 8], 56000),
    (7000, 6, 3, 12, &[1, 1, 1, 1, 1], 59),
    (7000, 6, 4, 32, &[1, 1, 1, 1, 2], 117),
    (7000, 6, 5, 79, &[1, 1, 1, 2, 3], 350),
    (7000, 6, 6, 64, &[3, 4, 4, 7, 13], 254800),
    (7000, 6, 7, 128, &[4, 7, 8, 10, 16], 2090667),
    (7000, 6, 8, 512, &[4, 4, 5, 8, 14], 522667),
    (7000, 7, 3, 9, &[1, 1, 1, 1, 1, 3], 30),
    (7000, 7, 4, 24, &[1, 1, 1, 1, 1, 2], 20),
    (7000, 7, 5, 49, &[1, 1, 1, 1, 2, 4], 78),
    (7000, 7, 6, 64, &[2, 2, 2, 2, 4, 6], 3734),
    (7000, 7, 7, 128, &[2, 2, 3, 4, 5, 7], 16334),
    (7000, 7, 8, 256, &[2, 3, 4, 4, 7, 10], 65334),
    (7000, 8, 3, 9, &[1, 1, 1, 1, 1, 1, 2], 3),
    (7000, 8, 4, 20, &[1, 1, 1, 1, 1, 1, 2], 3),
    (7000, 8, 5, 32, &[1, 1, 1, 1, 2, 2, 5], 28),
    (7000, 8, 6, 64, &[1, 1, 1, 1, 2, 3, 7], 59),
    (7000, 8, 7, 128, &[1, 1, 1, 2, 3, 3, 5], 125),
    (7000, 8, 8, 128, &[2, 2, 3, 4, 5, 8, 12], 32000),
    (7000, 9, 4, 16, &[1, 1, 1, 1, 1, 1, 2, 2], 1),
    (7000, 9, 5, 32, &[1, 1, 1, 1, 1, 1, 2, 2], 1),
    (7000, 9, 6, 64, &[1, 1, 1, 1, 1, 1, 2, 2], 1),
    (7000, 9, 7, 64, &[1, 2, 2, 2, 2, 3, 4, 7], 234),
    (7000, 9, 8, 128, &[1, 2, 2, 2, 2, 3, 5, 6], 250),
    (7000, 10, 4, 11, &[1, 1, 1, 1, 1, 2, 2, 3, 4], 1),
    (7000, 10, 5, 21, &[1, 1, 1, 1, 1, 2, 2, 3, 4], 1),
    (7000, 10, 6, 32, &[1, 1, 1, 1, 2, 2, 3, 4, 7], 7),
    (7000, 10, 7, 74, &[1, 1, 1, 1, 1, 2, 2, 3, 4], 1),
    (7000, 10, 8, 64, &[2, 2, 2, 2, 3, 4, 4, 6, 11], 978),
    (7000, 11, 5, 16, &[1, 1, 1, 1, 2, 2, 2, 2, 4, 8], 1),
    (7000, 11, 6, 27, &[1, 1, 1, 1, 2, 2, 2, 2, 4, 8], 1),
    (7000, 11, 7, 48, &[1, 1, 1, 1, 2, 2, 2, 2, 4, 8], 1),
    (7000, 11, 8, 64, &[1, 1, 2, 2, 2, 2, 4, 4, 4, 8], 16),
    (7000, 12, 5, 12, &[1, 1, 1, 2, 2, 2, 2, 2, 4, 5, 8], 1),
    (7000, 12, 6, 20, &[1, 1, 1, 2, 2, 2, 2, 2, 4, 5, 8], 1),
    (7000, 12, 7, 32, &[1, 1, 1, 2, 2, 2, 2, 4, 4, 5, 8], 2),
    (7000, 12, 8, 56, &[1, 1, 1, 2, 2, 2, 2, 2, 4, 5, 8], 1),
    (7000, 13, 6, 15, &[1, 1, 2, 2, 2, 2, 2, 3, 4, 4, 8, 11], 2),
    (7000, 13, 7, 25, &[1, 1, 2, 2, 2, 2, 2, 2, 4, 4, 6, 11], 1),
    (7000, 13, 8, 40, &[1, 1, 2, 2, 2, 2, 2, 2, 4, 4, 6, 11], 1),
];
