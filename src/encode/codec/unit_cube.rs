use super::{complete_last_weight, CodecImpl, Err};
use crate::core::params::CompressionParameters;
use crate::shared::bit_field::{FieldReader, FieldWriter};

/// Quantizes each explicit weight uniformly on `[0, 1]`. The explicit weights
/// are stored smallest first, followed by the tuple index.
#[derive(Clone, Debug)]
pub struct UnitCubeSampling {
    weight_bit_count: u32,
    tuple_index_bit_count: u32,
    bone_count: usize,
    vertex_size: usize,
}

impl UnitCubeSampling {
    pub fn new(weight_base_bit_count: u32, params: &CompressionParameters) -> Self {
        Self {
            weight_bit_count: weight_base_bit_count,
            tuple_index_bit_count: params.tuple_index_bit_count,
            bone_count: params.max_bone_count,
            vertex_size: params.vertex_size,
        }
    }

    fn max_value(&self) -> u32 {
        (1 << self.weight_bit_count) - 1
    }
}

/// Rounds `weight * max_value` to the nearest integer in `[0, max_value]`.
#[inline]
pub(crate) fn quantize(weight: f32, max_value: u32) -> u32 {
    ((weight * max_value as f32 + 0.5) as u32).min(max_value)
}

impl CodecImpl for UnitCubeSampling {
    fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    fn encode(&self, weights: &[f32], tuple_index: u32, out: &mut [u8]) {
        let out = &mut out[..self.vertex_size];
        out.fill(0);
        let max_value = self.max_value();
        let mut writer = FieldWriter::new(out);
        for &w in &weights[..self.bone_count - 1] {
            writer.write_bits((self.weight_bit_count as usize, quantize(w, max_value) as u64));
        }
        writer.write_bits((self.tuple_index_bit_count as usize, tuple_index as u64));
    }

    fn decode(&self, data: &[u8], weights: &mut [f32]) -> Result<u32, Err> {
        let max_value = self.max_value() as f32;
        let mut reader = FieldReader::new(data);
        for w in &mut weights[..self.bone_count - 1] {
            *w = reader.read_bits(self.weight_bit_count as usize) as f32 / max_value;
        }
        complete_last_weight(&mut weights[..self.bone_count]);
        Ok(reader.read_bits(self.tuple_index_bit_count as usize) as u32)
    }
}
