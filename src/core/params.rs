use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::codec_table::{self, CodecDescriptor, MAX_PERMUTATION_VERTEX_SIZE, SUPPORTED_TUPLE_COUNTS};
use super::shared::{
    MAX_TUPLE_COUNT,
    MAX_VERTEX_SIZE,
    MIN_BONE_COUNT,
    SUPPORTED_BONE_COUNT,
    UNCOMPRESSED_BYTES_PER_BONE,
};
use crate::shared::simplex_sampling;
use crate::utils::ceil_log2;

/// Number of bits that the power-of-two AABB method saves on each explicit
/// weight, starting with the largest explicit weight. Smaller weights are
/// bounded by smaller powers of two and need fewer bits.
pub const POWER_OF_TWO_WEIGHT_SAVINGS: [u32; SUPPORTED_BONE_COUNT - 1] = [0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2];

/// Range of the base bit count of unit cube sampling.
pub const UNIT_CUBE_WEIGHT_BITS: (u32, u32) = (2, 23);

/// Range of the base bit count of power-of-two AABB.
pub const POWER_OF_TWO_WEIGHT_BITS: (u32, u32) = (2, 22);

/// Bone count used by optimal simplex sampling.
pub const SIMPLEX_BONE_COUNT: usize = 4;

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("The bone count {0} is not supported by this method.")]
    BoneCountOutOfRange(usize),
    #[error("The codec has {entry_count} entries, but {bone_count} bones need {} entries.", bone_count - 1)]
    CodecMismatch { entry_count: u32, bone_count: usize },
    #[error("The {field} field cannot be {width} bits wide.")]
    FieldWidthOutOfRange { field: &'static str, width: u32 },
    #[error("A tuple table of {tuple_count} rows does not fit a limit of {limit} rows.")]
    TupleCountOutOfRange { tuple_count: u32, limit: u32 },
    #[error("No permutation codec exists for {tuple_count} tuples, {bone_count} bones and {vertex_size} bytes.")]
    UnknownCodec { tuple_count: u32, bone_count: usize, vertex_size: usize },
    #[error("The vertex size of {vertex_size} bytes does not fit a layout of {required} bytes.")]
    VertexSizeMismatch { vertex_size: usize, required: usize },
}

/// The compression method requested by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMethodType {
    /// Indices and weights are stored without compression.
    None,
    /// Each explicit weight is quantized uniformly on the same number of bits.
    UnitCubeSampling,
    /// Smaller weights use fewer bits since they are bounded by smaller powers of two.
    PowerOfTwoAabb,
    /// Four sorted weights are ranked on a lattice with a 19-bit code.
    #[serde(rename = "optimal_simplex_sampling_19")]
    OptimalSimplexSampling19,
    /// Like `OptimalSimplexSampling19` with a 22-bit code.
    #[serde(rename = "optimal_simplex_sampling_22")]
    OptimalSimplexSampling22,
    /// Like `OptimalSimplexSampling19` with a 35-bit code.
    #[serde(rename = "optimal_simplex_sampling_35")]
    OptimalSimplexSampling35,
    /// Weights, their permutation and the tuple index are coded jointly.
    PermutationCoding,
}

impl CompressionMethodType {
    #[inline]
    pub fn get_id(&self) -> u8 {
        match self {
            CompressionMethodType::None => 0,
            CompressionMethodType::UnitCubeSampling => 1,
            CompressionMethodType::PowerOfTwoAabb => 2,
            CompressionMethodType::OptimalSimplexSampling19 => 3,
            CompressionMethodType::OptimalSimplexSampling22 => 4,
            CompressionMethodType::OptimalSimplexSampling35 => 5,
            CompressionMethodType::PermutationCoding => 6,
        }
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<Self> {
        let out = match id {
            0 => CompressionMethodType::None,
            1 => CompressionMethodType::UnitCubeSampling,
            2 => CompressionMethodType::PowerOfTwoAabb,
            3 => CompressionMethodType::OptimalSimplexSampling19,
            4 => CompressionMethodType::OptimalSimplexSampling22,
            5 => CompressionMethodType::OptimalSimplexSampling35,
            6 => CompressionMethodType::PermutationCoding,
            _ => return None,
        };
        Some(out)
    }

    /// Number of bits of the simplex rank, for the simplex sampling methods.
    pub fn simplex_bit_count(&self) -> Option<u32> {
        match self {
            CompressionMethodType::OptimalSimplexSampling19 => Some(19),
            CompressionMethodType::OptimalSimplexSampling22 => Some(22),
            CompressionMethodType::OptimalSimplexSampling35 => Some(35),
            _ => None,
        }
    }
}

/// A resolved compression method with the fields that it needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompressionMethod {
    None,
    UnitCubeSampling { weight_base_bit_count: u32 },
    PowerOfTwoAabb { weight_base_bit_count: u32 },
    OptimalSimplexSampling { weight_bit_count: u32 },
    PermutationCoding { codec: CodecDescriptor },
}

impl CompressionMethod {
    pub fn get_type(&self) -> CompressionMethodType {
        match self {
            CompressionMethod::None => CompressionMethodType::None,
            CompressionMethod::UnitCubeSampling { .. } => CompressionMethodType::UnitCubeSampling,
            CompressionMethod::PowerOfTwoAabb { .. } => CompressionMethodType::PowerOfTwoAabb,
            CompressionMethod::OptimalSimplexSampling { weight_bit_count: 19 } => CompressionMethodType::OptimalSimplexSampling19,
            CompressionMethod::OptimalSimplexSampling { weight_bit_count: 22 } => CompressionMethodType::OptimalSimplexSampling22,
            CompressionMethod::OptimalSimplexSampling { .. } => CompressionMethodType::OptimalSimplexSampling35,
            CompressionMethod::PermutationCoding { .. } => CompressionMethodType::PermutationCoding,
        }
    }
}

/// Parameters of the compression of one mesh. They are derived once from a
/// request with `CompressionParameters::derive` and are binding for the
/// encoder and the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressionParameters {
    pub method: CompressionMethod,
    /// Number of bytes per compressed vertex.
    pub vertex_size: usize,
    /// Number of bone influences per vertex, including the implicit one.
    pub max_bone_count: usize,
    /// Number of bits of the tuple index field. Zero for uncompressed data.
    pub tuple_index_bit_count: u32,
    /// Capacity of the tuple table. Zero for uncompressed data.
    pub max_tuple_count: u32,
}

impl CompressionParameters {
    /// Resolves a request into concrete parameters. Infeasible requests are
    /// clamped or fall back to uncompressed storage, so callers must read the
    /// vertex size, bone count and tuple count back from the result.
    ///
    /// # Arguments
    /// * `method` - the requested method.
    /// * `vertex_size` - the requested number of bytes per vertex.
    /// * `max_bone_count` - the number of influences per vertex, clamped to [2, 13].
    /// * `max_tuple_count` - the number of distinct bone index tuples to support.
    pub fn derive(method: CompressionMethodType, vertex_size: usize, max_bone_count: usize, max_tuple_count: u32) -> Self {
        let max_bone_count = max_bone_count.clamp(MIN_BONE_COUNT, SUPPORTED_BONE_COUNT);
        let max_tuple_count = max_tuple_count.clamp(1, MAX_TUPLE_COUNT);
        let vertex_size = vertex_size.min(MAX_VERTEX_SIZE);
        let tuple_index_bit_count = ceil_log2(max_tuple_count as u64);
        let explicit_count = (max_bone_count - 1) as u32;

        let params = match method {
            CompressionMethodType::None => Self::uncompressed(max_bone_count),
            CompressionMethodType::UnitCubeSampling => {
                let vertex_size = reserve_weight_byte(vertex_size, tuple_index_bit_count);
                let weight_bit_count = vertex_size as u32 * 8 - tuple_index_bit_count;
                let (min, max) = UNIT_CUBE_WEIGHT_BITS;
                let weight_base_bit_count = (weight_bit_count / explicit_count).clamp(min, max);
                let total_bit_count = weight_base_bit_count * explicit_count + tuple_index_bit_count;
                Self {
                    method: CompressionMethod::UnitCubeSampling { weight_base_bit_count },
                    vertex_size: byte_count(total_bit_count),
                    max_bone_count,
                    tuple_index_bit_count,
                    max_tuple_count: 1 << tuple_index_bit_count,
                }
            },
            CompressionMethodType::PowerOfTwoAabb => {
                let vertex_size = reserve_weight_byte(vertex_size, tuple_index_bit_count);
                let weight_bit_count = vertex_size as u32 * 8 - tuple_index_bit_count;
                let saved_bit_count: u32 = POWER_OF_TWO_WEIGHT_SAVINGS[..explicit_count as usize].iter().sum();
                let (min, max) = POWER_OF_TWO_WEIGHT_BITS;
                let weight_base_bit_count = ((weight_bit_count + saved_bit_count) / explicit_count).clamp(min, max);
                let total_bit_count = weight_base_bit_count * explicit_count - saved_bit_count + tuple_index_bit_count;
                Self {
                    method: CompressionMethod::PowerOfTwoAabb { weight_base_bit_count },
                    vertex_size: byte_count(total_bit_count),
                    max_bone_count,
                    tuple_index_bit_count,
                    max_tuple_count: 1 << tuple_index_bit_count,
                }
            },
            CompressionMethodType::OptimalSimplexSampling19
            | CompressionMethodType::OptimalSimplexSampling22
            | CompressionMethodType::OptimalSimplexSampling35 => {
                let weight_bit_count = method.simplex_bit_count().unwrap_or(simplex_sampling::MAX_BITS);
                if weight_bit_count + tuple_index_bit_count > u64::BITS {
                    tracing::warn!(
                        weight_bit_count,
                        tuple_index_bit_count,
                        "Simplex code and tuple index exceed 64 bits, falling back to uncompressed storage"
                    );
                    Self::uncompressed(max_bone_count)
                } else {
                    Self {
                        method: CompressionMethod::OptimalSimplexSampling { weight_bit_count },
                        vertex_size: byte_count(weight_bit_count + tuple_index_bit_count),
                        max_bone_count: SIMPLEX_BONE_COUNT,
                        tuple_index_bit_count,
                        max_tuple_count: 1 << tuple_index_bit_count,
                    }
                }
            },
            CompressionMethodType::PermutationCoding => {
                let lookup = codec_table::tuple_count_class(max_tuple_count)
                    .and_then(|class| {
                        codec_table::lookup_with_fallback(class, max_bone_count, vertex_size)
                            .map(|(vertex_size, codec)| (class, vertex_size, codec))
                    });
                match lookup {
                    Some((class, vertex_size, codec)) => {
                        let max_tuple_count = SUPPORTED_TUPLE_COUNTS[class];
                        Self {
                            method: CompressionMethod::PermutationCoding { codec: *codec },
                            vertex_size,
                            max_bone_count,
                            tuple_index_bit_count: ceil_log2(max_tuple_count as u64),
                            max_tuple_count,
                        }
                    },
                    None => {
                        tracing::warn!(
                            max_tuple_count,
                            max_bone_count,
                            "No permutation codec supports the requested tuple count, falling back to uncompressed storage"
                        );
                        Self::uncompressed(max_bone_count)
                    },
                }
            },
        };

        if params.method.get_type() != method {
            tracing::warn!(requested = ?method, resolved = ?params.method.get_type(), "Compression method was changed");
        }
        tracing::debug!(?params, "Resolved blend attribute compression parameters");
        params
    }

    /// Parameters of the uncompressed layout.
    pub fn uncompressed(max_bone_count: usize) -> Self {
        let max_bone_count = max_bone_count.clamp(MIN_BONE_COUNT, SUPPORTED_BONE_COUNT);
        Self {
            method: CompressionMethod::None,
            vertex_size: max_bone_count * UNCOMPRESSED_BYTES_PER_BONE,
            max_bone_count,
            tuple_index_bit_count: 0,
            max_tuple_count: 0,
        }
    }

    /// Whether the bone indices are stored in a tuple table.
    pub fn uses_tuple_table(&self) -> bool {
        !matches!(self.method, CompressionMethod::None)
    }

    /// Widths of the explicit weight fields in the order they are stored.
    /// Only meaningful for the methods with one bit field per weight.
    pub fn weight_field_widths(&self) -> Vec<u32> {
        let explicit_count = self.max_bone_count - 1;
        match self.method {
            CompressionMethod::UnitCubeSampling { weight_base_bit_count } => vec![weight_base_bit_count; explicit_count],
            CompressionMethod::PowerOfTwoAabb { weight_base_bit_count } => POWER_OF_TWO_WEIGHT_SAVINGS[..explicit_count]
                .iter()
                .map(|&s| weight_base_bit_count.saturating_sub(s))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of meaningful bits per compressed vertex.
    pub fn total_bit_count(&self) -> u32 {
        match self.method {
            CompressionMethod::UnitCubeSampling { .. } | CompressionMethod::PowerOfTwoAabb { .. } => {
                self.weight_field_widths().iter().sum::<u32>() + self.tuple_index_bit_count
            },
            CompressionMethod::OptimalSimplexSampling { weight_bit_count } => weight_bit_count + self.tuple_index_bit_count,
            CompressionMethod::PermutationCoding { .. } | CompressionMethod::None => self.vertex_size as u32 * 8,
        }
    }

    /// Checks that hand-made parameters describe a consistent layout.
    pub fn validate(&self) -> Result<(), Err> {
        if !(MIN_BONE_COUNT..=SUPPORTED_BONE_COUNT).contains(&self.max_bone_count) {
            return Err(Err::BoneCountOutOfRange(self.max_bone_count));
        }
        if self.uses_tuple_table() && self.tuple_index_bit_count > ceil_log2(MAX_TUPLE_COUNT as u64) {
            return Err(Err::FieldWidthOutOfRange { field: "tuple index", width: self.tuple_index_bit_count });
        }
        if self.uses_tuple_table() && self.max_tuple_count == 0 {
            return Err(Err::TupleCountOutOfRange { tuple_count: 0, limit: 0 });
        }
        let max_vertex_size = match self.method {
            CompressionMethod::None => {
                let required = self.max_bone_count * UNCOMPRESSED_BYTES_PER_BONE;
                if self.vertex_size != required {
                    return Err(Err::VertexSizeMismatch { vertex_size: self.vertex_size, required });
                }
                return Ok(());
            },
            CompressionMethod::UnitCubeSampling { weight_base_bit_count } => {
                let (min, max) = UNIT_CUBE_WEIGHT_BITS;
                if !(min..=max).contains(&weight_base_bit_count) {
                    return Err(Err::FieldWidthOutOfRange { field: "weight", width: weight_base_bit_count });
                }
                self.check_tuple_index_field()?;
                MAX_VERTEX_SIZE
            },
            CompressionMethod::PowerOfTwoAabb { weight_base_bit_count } => {
                let (min, max) = POWER_OF_TWO_WEIGHT_BITS;
                if !(min..=max).contains(&weight_base_bit_count) {
                    return Err(Err::FieldWidthOutOfRange { field: "weight", width: weight_base_bit_count });
                }
                self.check_tuple_index_field()?;
                MAX_VERTEX_SIZE
            },
            CompressionMethod::OptimalSimplexSampling { weight_bit_count } => {
                if self.max_bone_count != SIMPLEX_BONE_COUNT {
                    return Err(Err::BoneCountOutOfRange(self.max_bone_count));
                }
                if !(simplex_sampling::MIN_BITS..=simplex_sampling::MAX_BITS).contains(&weight_bit_count)
                    || weight_bit_count + self.tuple_index_bit_count > u64::BITS
                {
                    return Err(Err::FieldWidthOutOfRange { field: "simplex rank", width: weight_bit_count });
                }
                self.check_tuple_index_field()?;
                MAX_PERMUTATION_VERTEX_SIZE
            },
            CompressionMethod::PermutationCoding { codec } => {
                if codec.entry_count as usize + 1 != self.max_bone_count {
                    return Err(Err::CodecMismatch { entry_count: codec.entry_count, bone_count: self.max_bone_count });
                }
                // the codec must be the one of its own cell
                let cell = codec_table::find(self.max_tuple_count, self.max_bone_count, self.vertex_size);
                if cell != Some(&codec) {
                    return Err(Err::UnknownCodec {
                        tuple_count: self.max_tuple_count,
                        bone_count: self.max_bone_count,
                        vertex_size: self.vertex_size,
                    });
                }
                MAX_PERMUTATION_VERTEX_SIZE
            },
        };
        let required = byte_count(self.total_bit_count());
        if self.vertex_size < required || self.vertex_size > max_vertex_size {
            return Err(Err::VertexSizeMismatch { vertex_size: self.vertex_size, required });
        }
        Ok(())
    }

    /// The tuple index field must address every row of the table.
    fn check_tuple_index_field(&self) -> Result<(), Err> {
        let limit = 1u64 << self.tuple_index_bit_count;
        if self.max_tuple_count as u64 > limit {
            return Err(Err::TupleCountOutOfRange { tuple_count: self.max_tuple_count, limit: limit as u32 });
        }
        Ok(())
    }
}

/// Makes sure that at least one byte remains for the weights once the tuple
/// index is stored.
fn reserve_weight_byte(vertex_size: usize, tuple_index_bit_count: u32) -> usize {
    if vertex_size * 8 <= tuple_index_bit_count as usize {
        (tuple_index_bit_count as usize + 15) / 8
    } else {
        vertex_size
    }
}

fn byte_count(bit_count: u32) -> usize {
    (bit_count as usize + 7) / 8
}


#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_slack(params: &CompressionParameters) {
        let bits = params.total_bit_count() as usize;
        assert!(params.vertex_size * 8 >= bits);
        assert!(params.vertex_size * 8 - bits < 8, "{:?}", params);
    }

    #[test]
    fn unit_cube_sampling() {
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 8, 4, 4096);
        assert_eq!(params.tuple_index_bit_count, 12);
        assert_eq!(params.method, CompressionMethod::UnitCubeSampling { weight_base_bit_count: 17 });
        assert_eq!(params.vertex_size, 8);
        assert_eq!(params.max_tuple_count, 4096);
        assert_no_slack(&params);
        params.validate().unwrap();
    }

    #[test]
    fn unit_cube_sampling_reserves_weight_bits() {
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 1, 4, 4096);
        // (12 + 15) / 8 = 3 bytes leave 12 bits for 3 weights
        assert_eq!(params.method, CompressionMethod::UnitCubeSampling { weight_base_bit_count: 4 });
        assert_eq!(params.vertex_size, 3);
    }

    #[test]
    fn unit_cube_sampling_clamps_weight_bits() {
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 2, 13, 16);
        assert_eq!(params.method, CompressionMethod::UnitCubeSampling { weight_base_bit_count: 2 });
        assert_eq!(params.vertex_size, 4);
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 64, 2, 2);
        assert_eq!(params.method, CompressionMethod::UnitCubeSampling { weight_base_bit_count: 23 });
        assert_eq!(params.vertex_size, 3);
        assert_no_slack(&params);
    }

    #[test]
    fn power_of_two_aabb() {
        let params = CompressionParameters::derive(CompressionMethodType::PowerOfTwoAabb, 4, 4, 256);
        // 24 weight bits plus one saved bit over three weights
        assert_eq!(params.method, CompressionMethod::PowerOfTwoAabb { weight_base_bit_count: 8 });
        assert_eq!(params.weight_field_widths(), vec![8, 8, 7]);
        assert_eq!(params.total_bit_count(), 31);
        assert_eq!(params.vertex_size, 4);
        assert_no_slack(&params);
        params.validate().unwrap();
    }

    #[test]
    fn power_of_two_aabb_zero_width_fields() {
        let params = CompressionParameters::derive(CompressionMethodType::PowerOfTwoAabb, 1, 13, 2);
        assert_eq!(params.method, CompressionMethod::PowerOfTwoAabb { weight_base_bit_count: 2 });
        assert_eq!(params.weight_field_widths(), vec![2, 2, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(params.vertex_size, 2);
        assert_no_slack(&params);
    }

    #[test]
    fn simplex_sampling() {
        let params = CompressionParameters::derive(CompressionMethodType::OptimalSimplexSampling22, 1, 8, 1000);
        assert_eq!(params.max_bone_count, 4);
        assert_eq!(params.tuple_index_bit_count, 10);
        assert_eq!(params.max_tuple_count, 1024);
        assert_eq!(params.vertex_size, 4);
        assert_no_slack(&params);

        let params = CompressionParameters::derive(CompressionMethodType::OptimalSimplexSampling35, 1, 4, 1 << 20);
        assert_eq!(params.vertex_size, 7);
        params.validate().unwrap();
    }

    #[test]
    fn simplex_sampling_with_wide_tuple_index() {
        let params = CompressionParameters::derive(CompressionMethodType::OptimalSimplexSampling35, 8, 4, MAX_TUPLE_COUNT);
        assert_eq!(params.method, CompressionMethod::OptimalSimplexSampling { weight_bit_count: 35 });
        assert_eq!(params.vertex_size, 8);
        params.validate().unwrap();
    }

    #[test]
    fn permutation_coding() {
        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 4, 4, 100);
        assert_eq!(params.max_tuple_count, 128);
        assert_eq!(params.vertex_size, 4);
        let codec = codec_table::lookup(0, 4, 4).unwrap();
        assert_eq!(params.method, CompressionMethod::PermutationCoding { codec: *codec });
        params.validate().unwrap();

        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 20, 13, 5000);
        assert_eq!(params.max_tuple_count, 7000);
        assert_eq!(params.vertex_size, 8);
    }

    #[test]
    fn permutation_coding_searches_sizes() {
        // no codec for 13 bones below 6 bytes
        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 2, 13, 128);
        assert_eq!(params.vertex_size, 6);
        // no codec for 2 bones above 2 bytes
        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 6, 2, 128);
        assert_eq!(params.vertex_size, 2);
        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 0, 4, 128);
        assert_eq!(params.vertex_size, 2);
    }

    #[test]
    fn permutation_coding_falls_back() {
        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 8, 5, 7001);
        assert_eq!(params.method, CompressionMethod::None);
        assert_eq!(params.vertex_size, 30);
        assert!(!params.uses_tuple_table());
    }

    #[test]
    fn bone_count_is_clamped() {
        let params = CompressionParameters::derive(CompressionMethodType::None, 0, 1, 0);
        assert_eq!(params.max_bone_count, 2);
        assert_eq!(params.vertex_size, 12);
        let params = CompressionParameters::derive(CompressionMethodType::None, 0, 20, 0);
        assert_eq!(params.max_bone_count, 13);
        assert_eq!(params.vertex_size, 78);
    }

    #[test]
    fn validation() {
        let mut params = CompressionParameters {
            method: CompressionMethod::UnitCubeSampling { weight_base_bit_count: 8 },
            vertex_size: 4,
            max_bone_count: 4,
            tuple_index_bit_count: 4,
            max_tuple_count: 16,
        };
        params.validate().unwrap();
        params.vertex_size = 3;
        assert_eq!(params.validate(), Err(Err::VertexSizeMismatch { vertex_size: 3, required: 4 }));
        params.vertex_size = 4;
        params.method = CompressionMethod::UnitCubeSampling { weight_base_bit_count: 1 };
        assert!(matches!(params.validate(), Err(Err::FieldWidthOutOfRange { .. })));

        let codec = *codec_table::lookup(0, 4, 4).unwrap();
        let params = CompressionParameters {
            method: CompressionMethod::PermutationCoding { codec },
            vertex_size: 4,
            max_bone_count: 5,
            tuple_index_bit_count: 7,
            max_tuple_count: 128,
        };
        assert_eq!(params.validate(), Err(Err::CodecMismatch { entry_count: 3, bone_count: 5 }));
    }

    #[test]
    fn validation_rejects_empty_table() {
        let params = CompressionParameters {
            max_tuple_count: 0,
            ..CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 4, 4, 16)
        };
        assert_eq!(params.validate(), Err(Err::TupleCountOutOfRange { tuple_count: 0, limit: 0 }));
        let params = CompressionParameters {
            max_tuple_count: 0,
            ..CompressionParameters::derive(CompressionMethodType::PermutationCoding, 4, 4, 128)
        };
        assert!(matches!(params.validate(), Err(Err::TupleCountOutOfRange { .. })));
    }

    #[test]
    fn validation_rejects_narrow_tuple_index() {
        let params = CompressionParameters {
            method: CompressionMethod::UnitCubeSampling { weight_base_bit_count: 8 },
            vertex_size: 4,
            max_bone_count: 4,
            tuple_index_bit_count: 4,
            max_tuple_count: 64,
        };
        assert_eq!(params.validate(), Err(Err::TupleCountOutOfRange { tuple_count: 64, limit: 16 }));
        let params = CompressionParameters { max_tuple_count: 10, ..params };
        params.validate().unwrap();

        let params = CompressionParameters {
            max_tuple_count: 2048,
            ..CompressionParameters::derive(CompressionMethodType::OptimalSimplexSampling22, 4, 4, 1024)
        };
        assert_eq!(params.validate(), Err(Err::TupleCountOutOfRange { tuple_count: 2048, limit: 1024 }));
    }

    #[test]
    fn validation_rejects_codec_of_other_cell() {
        let codec = *codec_table::lookup(0, 4, 7).unwrap();
        let params = CompressionParameters {
            method: CompressionMethod::PermutationCoding { codec },
            vertex_size: 2,
            max_bone_count: 4,
            tuple_index_bit_count: 7,
            max_tuple_count: 128,
        };
        assert_eq!(params.validate(), Err(Err::UnknownCodec { tuple_count: 128, bone_count: 4, vertex_size: 2 }));
        let params = CompressionParameters { vertex_size: 7, ..params };
        params.validate().unwrap();
        // 100 is not a tuple count class
        let params = CompressionParameters { max_tuple_count: 100, ..params };
        assert!(matches!(params.validate(), Err(Err::UnknownCodec { .. })));
    }

    #[test]
    fn method_ids() {
        for id in 0..7 {
            let ty = CompressionMethodType::from_id(id).unwrap();
            assert_eq!(ty.get_id(), id);
        }
        assert!(CompressionMethodType::from_id(7).is_none());
    }

    #[test]
    fn serde_names() {
        let ty: CompressionMethodType = serde_json::from_str("\"optimal_simplex_sampling_22\"").unwrap();
        assert_eq!(ty, CompressionMethodType::OptimalSimplexSampling22);
        let ty: CompressionMethodType = serde_json::from_str("\"power_of_two_aabb\"").unwrap();
        assert_eq!(ty, CompressionMethodType::PowerOfTwoAabb);
        let params = CompressionParameters::derive(CompressionMethodType::PermutationCoding, 8, 4, 4096);
        let json = serde_json::to_string(&params).unwrap();
        let back: CompressionParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
