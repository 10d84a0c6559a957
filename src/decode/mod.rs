use rayon::prelude::*;
use thiserror::Error;

use crate::core::params::{self, CompressionMethod, CompressionParameters};
use crate::core::shared::{IndexWeightPair, Influences, IRRELEVANT_INDEX, SUPPORTED_BONE_COUNT};
use crate::encode::codec::{self, uncompressed, Codec, CodecImpl};

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Codec error: {0}")]
    CodecError(#[from] codec::Err),
    #[error("The compressed data holds {len} bytes, but {required} are required.")]
    InputTooSmall { len: usize, required: usize },
    #[error("Invalid parameters: {0}")]
    ParameterError(#[from] params::Err),
    #[error("Row {row} is referenced, but the table has {row_count} rows.")]
    RowOutOfRange { row: usize, row_count: usize },
    #[error("The input stride of {stride} bytes is smaller than the vertex size of {vertex_size} bytes.")]
    StrideTooSmall { stride: usize, vertex_size: usize },
    #[error("The table holds {len} indices, which is not a multiple of {bone_count}.")]
    TableLayout { len: usize, bone_count: usize },
}

/// Decodes single vertices given the parameters and the tuple table that
/// they were compressed with.
pub struct Decoder<'a> {
    params: CompressionParameters,
    codec: Option<Codec>,
    table: &'a [u16],
}

impl<'a> Decoder<'a> {
    pub fn new(params: &CompressionParameters, table: &'a [u16]) -> Result<Self, Err> {
        params.validate()?;
        let codec = match params.method {
            CompressionMethod::None => None,
            _ => Some(Codec::new(params)?),
        };
        if table.len() % params.max_bone_count != 0 {
            return Err(Err::TableLayout { len: table.len(), bone_count: params.max_bone_count });
        }
        Ok(Self { params: *params, codec, table })
    }

    fn row_count(&self) -> usize {
        self.table.len() / self.params.max_bone_count
    }

    /// Decodes the first `vertex_size` bytes of `data` into `max_bone_count`
    /// influences sorted by ascending weight. A vertex whose explicit weights
    /// all vanish has a single influence, and its tuple index field holds the
    /// bone index. Its other slots use `IRRELEVANT_INDEX`.
    pub fn decode_vertex(&self, data: &[u8]) -> Result<Influences, Err> {
        let bone_count = self.params.max_bone_count;
        if data.len() < self.params.vertex_size {
            return Err(Err::InputTooSmall { len: data.len(), required: self.params.vertex_size });
        }
        let codec = match &self.codec {
            Some(codec) => codec,
            None => return Ok(uncompressed::decode_vertex(data, bone_count)),
        };

        let mut weights = [0.0f32; SUPPORTED_BONE_COUNT];
        let tuple_index = codec.decode(&data[..self.params.vertex_size], &mut weights[..bone_count])? as usize;
        let mut pairs = [IndexWeightPair::default(); SUPPORTED_BONE_COUNT];
        if weights[..bone_count - 1].iter().all(|&w| w <= 0.0) {
            for (pair, &w) in pairs.iter_mut().zip(&weights[..bone_count - 1]) {
                *pair = IndexWeightPair::new(IRRELEVANT_INDEX, w);
            }
            pairs[bone_count - 1] = IndexWeightPair::new(tuple_index as u16, weights[bone_count - 1]);
        } else {
            if tuple_index >= self.row_count() {
                return Err(Err::RowOutOfRange { row: tuple_index, row_count: self.row_count() });
            }
            let row = &self.table[tuple_index * bone_count..(tuple_index + 1) * bone_count];
            for (pair, (&index, &w)) in pairs.iter_mut().zip(row.iter().zip(&weights[..bone_count])) {
                *pair = IndexWeightPair::new(index, w);
            }
        }
        Ok(Influences::from_slice(&pairs[..bone_count]))
    }
}

/// Decodes `vertex_count` vertices that are `stride` bytes apart.
pub fn decompress(
    data: &[u8],
    stride: usize,
    vertex_count: usize,
    params: &CompressionParameters,
    table: &[u16],
) -> Result<Vec<Influences>, Err> {
    let vertex_size = params.vertex_size;
    if stride < vertex_size {
        return Err(Err::StrideTooSmall { stride, vertex_size });
    }
    let required = if vertex_count == 0 { 0 } else { (vertex_count - 1) * stride + vertex_size };
    if data.len() < required {
        return Err(Err::InputTooSmall { len: data.len(), required });
    }
    let decoder = Decoder::new(params, table)?;
    data[..required].par_chunks(stride)
        .map(|vertex| decoder.decode_vertex(vertex))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::BlendAttributes;
    use crate::core::params::CompressionMethodType;
    use crate::encode::compress_to_vec;

    #[test]
    fn decodes_table_rows() {
        let indices = [7, 2, 11, 0, 7, 2, 11, 0];
        let weights = [0.30, 0.10, 0.05, 0.25, 0.25, 0.25];
        let attributes = BlendAttributes::packed(&indices, &weights, 4).unwrap();
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 4, 4, 16);
        let compressed = compress_to_vec(&attributes, &params).unwrap();
        let decoded = decompress(&compressed.data, params.vertex_size, 2, &params, &compressed.table).unwrap();
        assert_eq!(decoded.len(), 2);
        for (v, influences) in decoded.iter().enumerate() {
            for (&index, &weight) in attributes.vertex_indices(v).iter().zip(attributes.vertex_weights(v)) {
                assert!((influences.weight_of(index) - weight).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn decodes_singletons() {
        let indices = [3, 42];
        let weights = [0.0];
        let attributes = BlendAttributes::packed(&indices, &weights, 2).unwrap();
        let params = CompressionParameters::derive(CompressionMethodType::PowerOfTwoAabb, 2, 2, 64);
        let compressed = compress_to_vec(&attributes, &params).unwrap();
        assert_eq!(compressed.outcome.table_size, 0);
        let decoded = decompress(&compressed.data, params.vertex_size, 1, &params, &compressed.table).unwrap();
        assert_eq!(decoded[0].as_slice(), &[IndexWeightPair::new(IRRELEVANT_INDEX, 0.0), IndexWeightPair::new(42, 1.0)]);
    }

    #[test]
    fn rejects_missing_rows() {
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 4, 4, 16);
        let decoder = Decoder::new(&params, &[]).unwrap();
        let mut data = [0u8; 4];
        data[0] = 100;
        assert_eq!(decoder.decode_vertex(&data), Err(Err::RowOutOfRange { row: 0, row_count: 0 }));
    }

    #[test]
    fn rejects_short_vertices() {
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 4, 4, 16);
        let decoder = Decoder::new(&params, &[]).unwrap();
        assert_eq!(decoder.decode_vertex(&[0u8; 3]), Err(Err::InputTooSmall { len: 3, required: 4 }));

        let params = CompressionParameters::derive(CompressionMethodType::None, 0, 3, 0);
        let decoder = Decoder::new(&params, &[]).unwrap();
        assert_eq!(decoder.decode_vertex(&[0u8; 10]), Err(Err::InputTooSmall { len: 10, required: 18 }));
    }

    #[test]
    fn decodes_uncompressed() {
        let indices = [4, 9, 1];
        let weights = [0.5, 0.3];
        let attributes = BlendAttributes::packed(&indices, &weights, 3).unwrap();
        let params = CompressionParameters::derive(CompressionMethodType::None, 0, 3, 0);
        let compressed = compress_to_vec(&attributes, &params).unwrap();
        let decoded = decompress(&compressed.data, params.vertex_size, 1, &params, &[]).unwrap();
        assert_eq!(decoded[0].weight_of(4), 0.5);
        assert_eq!(decoded[0].weight_of(9), 0.3);
        assert!((decoded[0].weight_of(1) - 0.2).abs() < 1e-6);
    }
}
