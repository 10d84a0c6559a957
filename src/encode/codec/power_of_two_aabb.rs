use super::{complete_last_weight, CodecImpl, Err};
use super::unit_cube::quantize;
use crate::core::params::{CompressionParameters, POWER_OF_TWO_WEIGHT_SAVINGS};
use crate::shared::bit_field::{FieldReader, FieldWriter};

/// Quantizes the explicit weights on `[0, 1/2]`. The `k`-th largest weight is
/// at most `1/k`, so the smaller weights are stored on fewer bits. Fields are
/// stored largest explicit weight first, followed by the tuple index.
#[derive(Clone, Debug)]
pub struct PowerOfTwoAabb {
    weight_base_bit_count: u32,
    tuple_index_bit_count: u32,
    bone_count: usize,
    vertex_size: usize,
}

impl PowerOfTwoAabb {
    pub fn new(weight_base_bit_count: u32, params: &CompressionParameters) -> Self {
        Self {
            weight_base_bit_count,
            tuple_index_bit_count: params.tuple_index_bit_count,
            bone_count: params.max_bone_count,
            vertex_size: params.vertex_size,
        }
    }

    /// Quantized value of one half.
    fn half_max_value(&self) -> u32 {
        2 * ((1 << self.weight_base_bit_count) - 1)
    }

    /// Width of the `i`-th stored field.
    fn field_width(&self, i: usize) -> u32 {
        self.weight_base_bit_count.saturating_sub(POWER_OF_TWO_WEIGHT_SAVINGS[i])
    }
}

impl CodecImpl for PowerOfTwoAabb {
    fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    fn encode(&self, weights: &[f32], tuple_index: u32, out: &mut [u8]) {
        let out = &mut out[..self.vertex_size];
        out.fill(0);
        let half_max_value = self.half_max_value();
        let mut writer = FieldWriter::new(out);
        for (i, &w) in weights[..self.bone_count - 1].iter().rev().enumerate() {
            let width = self.field_width(i);
            let field_max = (1u32 << width) - 1;
            // a weight on its power-of-two bound rounds up to one past the field
            let quantized = quantize(w, half_max_value).min(field_max);
            writer.write_bits((width as usize, quantized as u64));
        }
        writer.write_bits((self.tuple_index_bit_count as usize, tuple_index as u64));
    }

    fn decode(&self, data: &[u8], weights: &mut [f32]) -> Result<u32, Err> {
        let half_max_value = self.half_max_value() as f32;
        let mut reader = FieldReader::new(data);
        for (i, w) in weights[..self.bone_count - 1].iter_mut().rev().enumerate() {
            *w = reader.read_bits(self.field_width(i) as usize) as f32 / half_max_value;
        }
        complete_last_weight(&mut weights[..self.bone_count]);
        Ok(reader.read_bits(self.tuple_index_bit_count as usize) as u32)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{CompressionMethod, CompressionMethodType};
    use crate::shared::bit_field::extract_bits;

    #[test]
    fn field_layout() {
        let params = CompressionParameters::derive(CompressionMethodType::PowerOfTwoAabb, 4, 4, 256);
        assert_eq!(params.method, CompressionMethod::PowerOfTwoAabb { weight_base_bit_count: 8 });
        let codec = PowerOfTwoAabb::new(8, &params);
        let mut data = [0u8; 4];
        codec.encode(&[0.05, 0.10, 0.30, 0.55], 200, &mut data);
        // 0.30 * 510, 0.10 * 510 and 0.05 * 510 on 8, 8 and 7 bits
        assert_eq!(extract_bits(&data, 0, 8), 153);
        assert_eq!(extract_bits(&data, 8, 8), 51);
        assert_eq!(extract_bits(&data, 16, 7), 26);
        assert_eq!(extract_bits(&data, 23, 8), 200);

        let mut weights = [0.0; 4];
        assert_eq!(codec.decode(&data, &mut weights).unwrap(), 200);
        assert!((weights[0] - 26.0 / 510.0).abs() < 1e-6);
        assert!((weights[2] - 153.0 / 510.0).abs() < 1e-6);
    }

    #[test]
    fn bound_is_clamped_to_field() {
        let params = CompressionParameters::derive(CompressionMethodType::PowerOfTwoAabb, 4, 4, 256);
        let codec = PowerOfTwoAabb::new(8, &params);
        let mut data = [0u8; 4];
        // the smallest of four weights is at most 1/4, which needs 8 bits after rounding
        codec.encode(&[0.25, 0.25, 0.25, 0.25], 0, &mut data);
        assert_eq!(extract_bits(&data, 16, 7), 127);
        assert_eq!(extract_bits(&data, 23, 8), 0);
    }

    #[test]
    fn zero_width_fields() {
        let params = CompressionParameters::derive(CompressionMethodType::PowerOfTwoAabb, 1, 13, 2);
        let codec = PowerOfTwoAabb::new(2, &params);
        let mut weights = [0.01f32; 13];
        weights[12] = 1.0 - 0.12;
        let mut data = [0u8; 2];
        codec.encode(&weights, 1, &mut data);
        let mut decoded = [0.0; 13];
        assert_eq!(codec.decode(&data, &mut decoded).unwrap(), 1);
        assert!(decoded[..6].iter().all(|&w| w == 0.0));
    }
}
