use serde::Serialize;

use crate::core::attribute::BlendAttributes;
use crate::core::shared::Influences;
use crate::encode::CompressionOutcome;
use crate::shared::preprocess::sort_and_complete;

/// Error of one weight rank, the smallest weight of each vertex being rank 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RankError {
    pub max_abs_error: f32,
    pub mean_abs_error: f32,
}

/// Distance between source blend attributes and their decoded counterpart.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ErrorStats {
    pub vertex_count: usize,
    pub max_abs_error: f32,
    pub mean_abs_error: f32,
    pub per_rank: Vec<RankError>,
    /// Largest distance of the sum of the decoded weights of a vertex to one.
    pub worst_sum_deviation: f32,
    pub table_size: usize,
    pub overflow: bool,
}

/// Compares every source influence with the weight that the decoded vertex
/// assigns to the same bone.
pub fn error_stats(source: &BlendAttributes, decoded: &[Influences], outcome: &CompressionOutcome) -> ErrorStats {
    let bone_count = source.bone_count();
    let mut per_rank = vec![RankError::default(); bone_count];
    let mut sums = vec![0f64; bone_count];
    let mut worst_sum_deviation = 0f32;

    for (v, influences) in decoded.iter().enumerate().take(source.vertex_count()) {
        let expected = sort_and_complete(source, v);
        for (rank, pair) in expected.as_slice().iter().enumerate() {
            let error = (influences.weight_of(pair.index) - pair.weight).abs();
            per_rank[rank].max_abs_error = per_rank[rank].max_abs_error.max(error);
            sums[rank] += error as f64;
        }
        let sum: f32 = influences.as_slice().iter().map(|p| p.weight).sum();
        worst_sum_deviation = worst_sum_deviation.max((sum - 1.0).abs());
    }

    let vertex_count = decoded.len().min(source.vertex_count());
    if vertex_count > 0 {
        for (rank, sum) in per_rank.iter_mut().zip(&sums) {
            rank.mean_abs_error = (sum / vertex_count as f64) as f32;
        }
    }
    let max_abs_error = per_rank.iter().map(|r| r.max_abs_error).fold(0.0, f32::max);
    let mean_abs_error = if vertex_count > 0 {
        (sums.iter().sum::<f64>() / (vertex_count * bone_count) as f64) as f32
    } else {
        0.0
    };

    ErrorStats {
        vertex_count,
        max_abs_error,
        mean_abs_error,
        per_rank,
        worst_sum_deviation,
        table_size: outcome.table_size,
        overflow: outcome.is_overflow(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{CompressionMethodType, CompressionParameters};
    use crate::decode::decompress;
    use crate::encode::compress_to_vec;

    #[test]
    fn lossless_storage_has_no_error() {
        let indices = [0, 1, 2, 3, 4, 5];
        let weights = [0.2, 0.3, 0.1, 0.1];
        let attributes = BlendAttributes::packed(&indices, &weights, 3).unwrap();
        let params = CompressionParameters::derive(CompressionMethodType::None, 0, 3, 0);
        let compressed = compress_to_vec(&attributes, &params).unwrap();
        let decoded = decompress(&compressed.data, params.vertex_size, 2, &params, &compressed.table).unwrap();
        let stats = error_stats(&attributes, &decoded, &compressed.outcome);
        assert_eq!(stats.vertex_count, 2);
        assert_eq!(stats.max_abs_error, 0.0);
        assert_eq!(stats.per_rank.len(), 3);
        assert!(!stats.overflow);
    }

    #[test]
    fn quantization_error_is_reported() {
        let indices = [0, 1];
        let weights = [0.3];
        let attributes = BlendAttributes::packed(&indices, &weights, 2).unwrap();
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 1, 2, 2);
        let compressed = compress_to_vec(&attributes, &params).unwrap();
        let decoded = decompress(&compressed.data, params.vertex_size, 1, &params, &compressed.table).unwrap();
        let stats = error_stats(&attributes, &decoded, &compressed.outcome);
        // 0.3 on 7 bits decodes to 38 / 127
        assert!((stats.per_rank[0].max_abs_error - (0.3 - 38.0 / 127.0)).abs() < 1e-6);
        assert_eq!(stats.table_size, 1);
    }
}
