use thiserror::Error;

use crate::core::attribute::{self, BlendAttributes};
use crate::core::shared::MIN_BONE_COUNT;
use crate::shared::preprocess::sort_and_complete;

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Cannot reduce {available} bone influences to {requested}.")]
    InvalidBoneCount { requested: usize, available: usize },
    #[error("The reduced attributes are inconsistent: {0}")]
    InvalidLayout(#[from] attribute::Err),
}

/// Blend attributes with fewer influences per vertex. Indices and weights
/// are tightly packed and sorted by ascending weight.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedAttributes {
    pub indices: Vec<u16>,
    pub weights: Vec<f32>,
    pub bone_count: usize,
    /// Number of weights stored per vertex. Equals `bone_count` if the
    /// largest weight is written, and `bone_count - 1` otherwise.
    pub weights_per_vertex: usize,
}

impl ReducedAttributes {
    pub fn vertex_count(&self) -> usize {
        self.indices.len() / self.bone_count
    }

    /// Views the result as compressor input. A written largest weight is
    /// skipped by the stride.
    pub fn as_attributes(&self) -> Result<BlendAttributes<'_>, Err> {
        let attributes = BlendAttributes::new(
            &self.indices,
            self.bone_count * std::mem::size_of::<u16>(),
            &self.weights,
            self.weights_per_vertex * std::mem::size_of::<f32>(),
            self.vertex_count(),
            self.bone_count,
        )?;
        Ok(attributes)
    }
}

/// Keeps the `out_bone_count` largest influences of every vertex and scales
/// their weights so that they sum to one again.
///
/// # Arguments
/// * `attributes` - the source blend attributes.
/// * `out_bone_count` - the number of influences to keep, at least 2 and at most the source bone count.
/// * `write_last_weight` - whether the largest weight is written as well.
pub fn reduce_bone_count(
    attributes: &BlendAttributes,
    out_bone_count: usize,
    write_last_weight: bool,
) -> Result<ReducedAttributes, Err> {
    let available = attributes.bone_count();
    if out_bone_count < MIN_BONE_COUNT || out_bone_count > available {
        return Err(Err::InvalidBoneCount { requested: out_bone_count, available });
    }
    let weights_per_vertex = if write_last_weight { out_bone_count } else { out_bone_count - 1 };
    let vertex_count = attributes.vertex_count();
    let mut indices = Vec::with_capacity(vertex_count * out_bone_count);
    let mut weights = Vec::with_capacity(vertex_count * weights_per_vertex);

    for vertex in 0..vertex_count {
        let influences = sort_and_complete(attributes, vertex);
        let kept = &influences.as_slice()[available - out_bone_count..];
        let sum: f32 = kept.iter().map(|p| p.weight).sum();
        let factor = if sum > 0.0 { 1.0 / sum } else { 1.0 };
        indices.extend(kept.iter().map(|p| p.index));
        weights.extend(kept[..weights_per_vertex].iter().map(|p| p.weight * factor));
    }

    Ok(ReducedAttributes { indices, weights, bone_count: out_bone_count, weights_per_vertex })
}
