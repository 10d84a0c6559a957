pub mod codec;
pub mod table;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::attribute::{self, BlendAttributes};
use crate::core::params::{self, CompressionMethod, CompressionMethodType, CompressionParameters};
use crate::core::shared::{ConfigType, Influences, IRRELEVANT_INDEX, SUPPORTED_BONE_COUNT};
use crate::shared::preprocess::{sort_and_complete, zero_mask};
use codec::{uncompressed, Codec, CodecImpl};
use table::IndexTuple;

/// A compression request. Requests are advisory: `resolve` turns them into
/// the binding parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub method: CompressionMethodType,
    pub vertex_size: usize,
    pub max_bone_count: usize,
    pub max_tuple_count: u32,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            method: CompressionMethodType::PermutationCoding,
            vertex_size: 8,
            max_bone_count: 8,
            max_tuple_count: 4096,
        }
    }
}

impl Config {
    pub fn resolve(&self) -> CompressionParameters {
        CompressionParameters::derive(self.method, self.vertex_size, self.max_bone_count, self.max_tuple_count)
    }
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Attribute error: {0}")]
    AttributeError(#[from] attribute::Err),
    #[error("The attributes have {attributes} bones per vertex, but the parameters expect {params}.")]
    BoneCountMismatch { attributes: usize, params: usize },
    #[error("Codec error: {0}")]
    CodecError(#[from] codec::Err),
    #[error("Vertex {vertex} uses the reserved bone index 0xFFFF.")]
    IrrelevantIndex { vertex: usize },
    #[error("The {buffer} output holds {len} elements, but {required} are required.")]
    OutputTooSmall { buffer: &'static str, len: usize, required: usize },
    #[error("Invalid parameters: {0}")]
    ParameterError(#[from] params::Err),
    #[error("The output stride of {stride} bytes is smaller than the vertex size of {vertex_size} bytes.")]
    StrideTooSmall { stride: usize, vertex_size: usize },
}

/// Result of a successful compression.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressionOutcome {
    /// Number of rows that the tuple table needs. Exceeds `capacity` on overflow,
    /// in which case only `capacity` rows were written.
    pub table_size: usize,
    pub capacity: usize,
    /// Number of single influence vertices whose bone index does not fit the
    /// tuple index field. They were stored with the bone `capacity - 1` and
    /// decode with the wrong bone. A `max_tuple_count` above the largest bone
    /// index avoids this.
    pub singleton_overflow: usize,
}

impl CompressionOutcome {
    pub fn is_overflow(&self) -> bool {
        self.table_size > self.capacity
    }

    /// Number of rows written to the table output.
    pub fn stored_row_count(&self) -> usize {
        self.table_size.min(self.capacity)
    }
}

/// Compressed blend attributes in owned, tightly packed buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedAttributes {
    pub params: CompressionParameters,
    /// `vertex_size` bytes per vertex.
    pub data: Vec<u8>,
    /// `max_bone_count` indices per row.
    pub table: Vec<u16>,
    pub outcome: CompressionOutcome,
}

/// Compresses the blend attributes with the given parameters.
///
/// # Arguments
/// * `attributes` - the source attributes, whose bone count must match the parameters.
/// * `params` - parameters resolved by `CompressionParameters::derive`.
/// * `out_compressed` - receives `vertex_size` bytes per vertex.
/// * `compressed_stride` - bytes between two consecutive vertices in `out_compressed`.
/// * `out_table` - receives the tuple table, `max_bone_count` indices per row.
pub fn compress(
    attributes: &BlendAttributes,
    params: &CompressionParameters,
    out_compressed: &mut [u8],
    compressed_stride: usize,
    out_table: &mut [u16],
) -> Result<CompressionOutcome, Err> {
    params.validate()?;
    let bone_count = attributes.bone_count();
    if bone_count != params.max_bone_count {
        return Err(Err::BoneCountMismatch { attributes: bone_count, params: params.max_bone_count });
    }
    let vertex_size = params.vertex_size;
    if compressed_stride < vertex_size {
        return Err(Err::StrideTooSmall { stride: compressed_stride, vertex_size });
    }
    let vertex_count = attributes.vertex_count();
    let required = if vertex_count == 0 { 0 } else { (vertex_count - 1) * compressed_stride + vertex_size };
    if out_compressed.len() < required {
        return Err(Err::OutputTooSmall { buffer: "compressed", len: out_compressed.len(), required });
    }
    if let Some(vertex) = (0..vertex_count).into_par_iter()
        .find_first(|&v| attributes.vertex_indices(v).contains(&IRRELEVANT_INDEX))
    {
        return Err(Err::IrrelevantIndex { vertex });
    }
    let vertices = out_compressed[..required].par_chunks_mut(compressed_stride);

    if let CompressionMethod::None = params.method {
        vertices.enumerate().for_each(|(v, out)| {
            uncompressed::encode_vertex(&sort_and_complete(attributes, v), out);
        });
        tracing::debug!(vertex_count, vertex_size, "Stored blend attributes uncompressed");
        return Ok(CompressionOutcome { table_size: 0, capacity: 0, singleton_overflow: 0 });
    }

    let codec = Codec::new(params)?;
    let prepared = (0..vertex_count).into_par_iter()
        .map(|v| -> Result<(Influences, IndexTuple), codec::Err> {
            let influences = sort_and_complete(attributes, v);
            let mask = zero_mask(&influences, &codec)?;
            let mut tuple = [IRRELEVANT_INDEX; SUPPORTED_BONE_COUNT];
            for (i, (t, pair)) in tuple.iter_mut().zip(influences.as_slice()).enumerate() {
                if mask & (1 << i) == 0 {
                    *t = pair.index;
                }
            }
            Ok((influences, tuple))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let (influences, tuples): (Vec<Influences>, Vec<IndexTuple>) = prepared.into_iter().unzip();

    let table = table::build(&tuples, bone_count, params.max_tuple_count as usize);
    if out_table.len() < table.rows.len() {
        return Err(Err::OutputTooSmall { buffer: "table", len: out_table.len(), required: table.rows.len() });
    }
    out_table[..table.rows.len()].copy_from_slice(&table.rows);

    vertices.zip(influences.par_iter().zip(table.assignments.par_iter()))
        .for_each(|(out, (influences, &tuple_index))| {
            let mut weights = [0.0f32; SUPPORTED_BONE_COUNT];
            influences.weights_into(&mut weights[..bone_count]);
            codec.encode(&weights[..bone_count], tuple_index, &mut out[..vertex_size]);
        });

    Ok(CompressionOutcome {
        table_size: table.size,
        capacity: table.capacity,
        singleton_overflow: table.singleton_overflow,
    })
}

/// Compresses the blend attributes into freshly allocated buffers.
pub fn compress_to_vec(attributes: &BlendAttributes, params: &CompressionParameters) -> Result<CompressedAttributes, Err> {
    let mut data = vec![0u8; attributes.vertex_count() * params.vertex_size];
    // a table never has more rows than vertices
    let row_count = (params.max_tuple_count as usize).min(attributes.vertex_count());
    let mut table = vec![0u16; row_count * params.max_bone_count];
    let outcome = compress(attributes, params, &mut data, params.vertex_size, &mut table)?;
    table.truncate(outcome.stored_row_count() * params.max_bone_count);
    Ok(CompressedAttributes { params: *params, data, table, outcome })
}
