//! Per-vertex preparation of blend attributes shared by the encoder and the
//! bone count reduction.

use crate::core::attribute::BlendAttributes;
use crate::core::shared::{IndexWeightPair, Influences, SUPPORTED_BONE_COUNT};
use crate::encode::codec::{self, Codec, CodecImpl};

/// Reads the influences of a vertex, completes the implicit last weight so
/// that the weights sum to one and sorts them by ascending weight. Equal
/// weights keep their input order.
pub fn sort_and_complete(attributes: &BlendAttributes, vertex: usize) -> Influences {
    let bone_count = attributes.bone_count();
    let indices = attributes.vertex_indices(vertex);
    let weights = attributes.vertex_weights(vertex);

    let mut pairs = [IndexWeightPair::default(); SUPPORTED_BONE_COUNT];
    let mut last_weight = 1.0f32;
    for (pair, (&index, &weight)) in pairs.iter_mut().zip(indices.iter().zip(weights)) {
        *pair = IndexWeightPair::new(index, weight);
        last_weight -= weight;
    }
    pairs[bone_count - 1] = IndexWeightPair::new(indices[bone_count - 1], last_weight);

    let mut influences = Influences::from_slice(&pairs[..bone_count]);
    influences.as_mut_slice().sort_by(|a, b| a.weight.total_cmp(&b.weight));
    influences
}

/// Returns a mask whose bit `i` is set iff the `i`-th sorted weight is zero
/// or negative once it went through the codec.
pub fn zero_mask(influences: &Influences, codec: &Codec) -> Result<u32, codec::Err> {
    let mut weights = [0.0f32; SUPPORTED_BONE_COUNT];
    let mut requantized = [0.0f32; SUPPORTED_BONE_COUNT];
    let len = influences.len();
    influences.weights_into(&mut weights[..len]);
    codec.requantize(&weights[..len], &mut requantized[..len])?;
    let mask = requantized[..len].iter()
        .enumerate()
        .filter(|(_, &w)| w <= 0.0)
        .fold(0u32, |mask, (i, _)| mask | (1 << i));
    Ok(mask)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{CompressionMethod, CompressionParameters};

    #[test]
    fn sorts_and_completes() {
        let indices = [7, 2, 11, 0];
        let weights = [0.30, 0.10, 0.05];
        let attributes = BlendAttributes::packed(&indices, &weights, 4).unwrap();
        let influences = sort_and_complete(&attributes, 0);
        let sorted = influences.as_slice();
        assert_eq!(sorted.iter().map(|p| p.index).collect::<Vec<_>>(), vec![11, 2, 7, 0]);
        assert_eq!(sorted[0].weight, 0.05);
        assert!((sorted[3].weight - 0.55).abs() < 1e-6);
    }

    #[test]
    fn ties_keep_input_order() {
        let indices = [4, 9, 1];
        let weights = [0.25, 0.25];
        let attributes = BlendAttributes::packed(&indices, &weights, 3).unwrap();
        let influences = sort_and_complete(&attributes, 0);
        assert_eq!(influences.as_slice().iter().map(|p| p.index).collect::<Vec<_>>(), vec![4, 9, 1]);
    }

    #[test]
    fn zero_mask_after_quantization() {
        let params = CompressionParameters {
            method: CompressionMethod::UnitCubeSampling { weight_base_bit_count: 4 },
            vertex_size: 2,
            max_bone_count: 4,
            tuple_index_bit_count: 4,
            max_tuple_count: 16,
        };
        let codec = Codec::new(&params).unwrap();
        // 0.01 * 15 rounds to zero, 0.04 * 15 rounds to one
        let pairs = [
            IndexWeightPair::new(1, 0.0),
            IndexWeightPair::new(2, 0.01),
            IndexWeightPair::new(3, 0.04),
            IndexWeightPair::new(4, 0.95),
        ];
        let mask = zero_mask(&Influences::from_slice(&pairs), &codec).unwrap();
        assert_eq!(mask, 0b0011);
    }
}
