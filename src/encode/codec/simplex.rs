use super::{CodecImpl, Err};
use crate::core::params::CompressionParameters;
use crate::shared::bit_field::{extract_bits, insert_bits};
use crate::shared::simplex_sampling::{self, Info};

/// Stores the rank of the four sorted weights on the optimal simplex
/// sampling lattice in the low bits of a little-endian integer, and the
/// tuple index above it.
#[derive(Clone, Debug)]
pub struct OptimalSimplexSampling {
    info: Info,
    weight_bit_count: u32,
    tuple_index_bit_count: u32,
    vertex_size: usize,
}

impl OptimalSimplexSampling {
    pub fn new(weight_bit_count: u32, params: &CompressionParameters) -> Result<Self, Err> {
        Ok(Self {
            info: Info::new(weight_bit_count)?,
            weight_bit_count,
            tuple_index_bit_count: params.tuple_index_bit_count,
            vertex_size: params.vertex_size,
        })
    }
}

impl CodecImpl for OptimalSimplexSampling {
    fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    fn encode(&self, weights: &[f32], tuple_index: u32, out: &mut [u8]) {
        let descending = [weights[3], weights[2], weights[1], weights[0]];
        let rank = simplex_sampling::compress_tuple(&descending, &self.info);
        let code = rank | (tuple_index as u64) << self.weight_bit_count;
        insert_bits(out, 0, (self.vertex_size * 8, code));
    }

    fn decode(&self, data: &[u8], weights: &mut [f32]) -> Result<u32, Err> {
        let code = extract_bits(data, 0, self.vertex_size * 8);
        let rank = extract_bits(data, 0, self.weight_bit_count as usize);
        let tuple_index = code >> self.weight_bit_count & ((1u64 << self.tuple_index_bit_count) - 1);
        let descending = simplex_sampling::decompress_tuple(rank, &self.info)?;
        for (w, d) in weights[..4].iter_mut().zip(descending.iter().rev()) {
            *w = *d;
        }
        Ok(tuple_index as u32)
    }
}
