// lib.rs

/// Contains the interface between skinning data and JSON documents.
pub mod io;

/// Contains the building blocks shared by the encoder and the decoder:
/// bit fields, weight preprocessing, optimal simplex sampling and bone count
/// reduction.
pub mod shared;

/// Defines the blend attribute encoder.
pub mod encode;

/// Defines the blend attribute decoder.
pub mod decode;

/// Contains the shared definitions, compression parameters and the
/// permutation codec table.
pub mod core;

/// Contains small numeric helpers.
pub(crate) mod utils;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::attribute::BlendAttributes;
    pub use crate::core::params::{CompressionMethod, CompressionMethodType, CompressionParameters};
    pub use crate::core::shared::{ConfigType, IndexWeightPair, IRRELEVANT_INDEX, SUPPORTED_BONE_COUNT};
    pub use crate::encode::{self, compress, CompressionOutcome};
    pub use crate::decode::{self, decompress};
    pub use crate::shared::reduce::reduce_bone_count;
}


/// Evaluation module measures how far the decoded blend attributes are from
/// the source data. It is enabled in tests and with the `evaluation` feature,
/// which the command line tool turns on.
#[cfg(any(test, feature = "evaluation"))]
pub mod eval;
