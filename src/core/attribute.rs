use std::mem;
use thiserror::Error;

use super::shared::{MIN_BONE_COUNT, SUPPORTED_BONE_COUNT};

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("The bone count {0} is outside of the supported range [2, 13].")]
    BoneCountOutOfRange(usize),
    #[error("The {buffer} buffer holds {len} elements, but {required} are required.")]
    BufferTooSmall { buffer: &'static str, len: usize, required: usize },
    #[error("The {buffer} stride of {stride} bytes is not a multiple of {element_size} or is too small for {count} elements.")]
    InvalidStride { buffer: &'static str, stride: usize, element_size: usize, count: usize },
}

/// A read-only view of per-vertex blend attributes: `bone_count` bone indices
/// and `bone_count - 1` weights per vertex. The weight of the last bone is
/// implied by the fact that weights sum to one. Strides are given in bytes,
/// as they would be for interleaved vertex buffers.
#[derive(Clone, Copy, Debug)]
pub struct BlendAttributes<'a> {
    indices: &'a [u16],
    index_stride: usize,
    weights: &'a [f32],
    weight_stride: usize,
    vertex_count: usize,
    bone_count: usize,
}

impl<'a> BlendAttributes<'a> {
    /// Creates a view over strided index and weight buffers.
    ///
    /// # Arguments
    /// * `indices` - the bone indices, starting with vertex 0.
    /// * `index_stride` - bytes between the indices of two consecutive vertices.
    /// * `weights` - the explicit weights, starting with vertex 0.
    /// * `weight_stride` - bytes between the weights of two consecutive vertices.
    /// * `vertex_count` - number of vertices in the view.
    /// * `bone_count` - number of influences per vertex.
    pub fn new(
        indices: &'a [u16],
        index_stride: usize,
        weights: &'a [f32],
        weight_stride: usize,
        vertex_count: usize,
        bone_count: usize,
    ) -> Result<Self, Err> {
        if !(MIN_BONE_COUNT..=SUPPORTED_BONE_COUNT).contains(&bone_count) {
            return Err(Err::BoneCountOutOfRange(bone_count));
        }
        let index_stride = element_stride::<u16>("index", index_stride, bone_count)?;
        let weight_stride = element_stride::<f32>("weight", weight_stride, bone_count - 1)?;
        check_len("index", indices.len(), index_stride, bone_count, vertex_count)?;
        check_len("weight", weights.len(), weight_stride, bone_count - 1, vertex_count)?;
        Ok(Self {
            indices,
            index_stride,
            weights,
            weight_stride,
            vertex_count,
            bone_count,
        })
    }

    /// Creates a view over tightly packed buffers. The vertex count is taken
    /// from the index buffer.
    pub fn packed(indices: &'a [u16], weights: &'a [f32], bone_count: usize) -> Result<Self, Err> {
        if !(MIN_BONE_COUNT..=SUPPORTED_BONE_COUNT).contains(&bone_count) {
            return Err(Err::BoneCountOutOfRange(bone_count));
        }
        let vertex_count = indices.len() / bone_count;
        Self::new(
            indices,
            bone_count * mem::size_of::<u16>(),
            weights,
            (bone_count - 1) * mem::size_of::<f32>(),
            vertex_count,
            bone_count,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn bone_count(&self) -> usize {
        self.bone_count
    }

    /// Returns the `bone_count` bone indices of the given vertex.
    pub fn vertex_indices(&self, vertex: usize) -> &'a [u16] {
        let begin = vertex * self.index_stride;
        &self.indices[begin..begin + self.bone_count]
    }

    /// Returns the `bone_count - 1` explicit weights of the given vertex.
    pub fn vertex_weights(&self, vertex: usize) -> &'a [f32] {
        let begin = vertex * self.weight_stride;
        &self.weights[begin..begin + self.bone_count - 1]
    }
}

/// Converts a byte stride into an element stride.
fn element_stride<T>(buffer: &'static str, stride: usize, count: usize) -> Result<usize, Err> {
    let element_size = mem::size_of::<T>();
    if stride % element_size != 0 || stride / element_size < count {
        return Err(Err::InvalidStride { buffer, stride, element_size, count });
    }
    Ok(stride / element_size)
}

fn check_len(buffer: &'static str, len: usize, stride: usize, count: usize, vertex_count: usize) -> Result<(), Err> {
    if vertex_count == 0 {
        return Ok(());
    }
    let required = (vertex_count - 1) * stride + count;
    if len < required {
        return Err(Err::BufferTooSmall { buffer, len, required });
    }
    Ok(())
}
