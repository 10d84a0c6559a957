//! Layout of uncompressed vertices: `bone_count` little-endian `u16` indices
//! followed by `bone_count` little-endian `f32` weights, in the ascending
//! order of the weights. The largest weight is stored explicitly as well.

use crate::core::shared::{IndexWeightPair, Influences, SUPPORTED_BONE_COUNT, UNCOMPRESSED_BYTES_PER_BONE};

/// Size in bytes of an uncompressed vertex.
pub fn vertex_size(bone_count: usize) -> usize {
    bone_count * UNCOMPRESSED_BYTES_PER_BONE
}

pub fn encode_vertex(influences: &Influences, out: &mut [u8]) {
    let bone_count = influences.len();
    let (indices, weights) = out[..vertex_size(bone_count)].split_at_mut(2 * bone_count);
    for (pair, (i, w)) in influences.as_slice().iter().zip(indices.chunks_exact_mut(2).zip(weights.chunks_exact_mut(4))) {
        i.copy_from_slice(&pair.index.to_le_bytes());
        w.copy_from_slice(&pair.weight.to_le_bytes());
    }
}

/// `data` must hold at least `vertex_size(bone_count)` bytes.
pub fn decode_vertex(data: &[u8], bone_count: usize) -> Influences {
    let (indices, weights) = data[..vertex_size(bone_count)].split_at(2 * bone_count);
    let mut pairs = [IndexWeightPair::default(); SUPPORTED_BONE_COUNT];
    for (pair, (i, w)) in pairs.iter_mut().zip(indices.chunks_exact(2).zip(weights.chunks_exact(4))) {
        pair.index = u16::from_le_bytes([i[0], i[1]]);
        pair.weight = f32::from_le_bytes([w[0], w[1], w[2], w[3]]);
    }
    Influences::from_slice(&pairs[..bone_count])
}
