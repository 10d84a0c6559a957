pub mod unit_cube;
pub mod power_of_two_aabb;
pub mod simplex;
pub mod permutation;
pub mod uncompressed;

use thiserror::Error;

use crate::core::params::{self, CompressionMethod, CompressionParameters};
use crate::core::shared::MAX_VERTEX_SIZE;
use crate::shared::simplex_sampling;

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Invalid compression parameters: {0}")]
    InvalidParameters(#[from] params::Err),
    #[error("The code {0:#x} is not a valid permutation code.")]
    InvalidPermutationCode(u64),
    #[error("Simplex sampling error: {0}")]
    SimplexSamplingError(#[from] simplex_sampling::Err),
    #[error("Uncompressed data has no weight codec.")]
    Uncompressed,
}

/// A weight codec. All variants store the sorted weights of a vertex and a
/// tuple index in exactly `vertex_size` bytes.
#[enum_dispatch::enum_dispatch(CodecImpl)]
#[derive(Clone, Debug)]
pub enum Codec {
    UnitCubeSampling(unit_cube::UnitCubeSampling),
    PowerOfTwoAabb(power_of_two_aabb::PowerOfTwoAabb),
    OptimalSimplexSampling(simplex::OptimalSimplexSampling),
    PermutationCoding(permutation::PermutationCoding),
}

impl Codec {
    /// Creates the codec of the given parameters. Fails for uncompressed
    /// parameters and for parameters that do not describe a valid layout.
    pub fn new(params: &CompressionParameters) -> Result<Self, Err> {
        params.validate()?;
        let out = match params.method {
            CompressionMethod::None => return Err(Err::Uncompressed),
            CompressionMethod::UnitCubeSampling { weight_base_bit_count } => {
                Codec::UnitCubeSampling(unit_cube::UnitCubeSampling::new(weight_base_bit_count, params))
            },
            CompressionMethod::PowerOfTwoAabb { weight_base_bit_count } => {
                Codec::PowerOfTwoAabb(power_of_two_aabb::PowerOfTwoAabb::new(weight_base_bit_count, params))
            },
            CompressionMethod::OptimalSimplexSampling { weight_bit_count } => {
                Codec::OptimalSimplexSampling(simplex::OptimalSimplexSampling::new(weight_bit_count, params)?)
            },
            CompressionMethod::PermutationCoding { codec } => {
                Codec::PermutationCoding(permutation::PermutationCoding::new(codec, params))
            },
        };
        Ok(out)
    }
}

#[enum_dispatch::enum_dispatch]
pub trait CodecImpl {
    /// Number of bytes per compressed vertex.
    fn vertex_size(&self) -> usize;

    /// Encodes the weights of a vertex and its tuple index into the first
    /// `vertex_size` bytes of `out`. `weights` holds all `bone_count` weights
    /// sorted in ascending order, the largest weight being implicit.
    fn encode(&self, weights: &[f32], tuple_index: u32, out: &mut [u8]);

    /// Decodes a vertex. Writes all `bone_count` weights in ascending order to
    /// `weights` and returns the tuple index.
    fn decode(&self, data: &[u8], weights: &mut [f32]) -> Result<u32, Err>;

    /// Sends the weights through the codec and back, which tells which
    /// weights survive quantization.
    fn requantize(&self, weights: &[f32], out: &mut [f32]) -> Result<(), Err> {
        let mut buffer = [0u8; MAX_VERTEX_SIZE];
        let size = self.vertex_size();
        self.encode(weights, 0, &mut buffer[..size]);
        self.decode(&buffer[..size], out)?;
        Ok(())
    }
}

/// Completes the implicit largest weight once the explicit ones are decoded.
pub(crate) fn complete_last_weight(weights: &mut [f32]) {
    if let Some((last, explicit)) = weights.split_last_mut() {
        *last = explicit.iter().fold(1.0, |rest, w| rest - w);
    }
}
