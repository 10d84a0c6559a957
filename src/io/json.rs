use std::fmt::Debug;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::attribute::{self, BlendAttributes};
use crate::core::params::CompressionParameters;
use crate::encode::CompressedAttributes;

#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Attribute error: {0}")]
    AttributeError(#[from] attribute::Err),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Skinning data of a mesh: `bone_count` indices and `bone_count - 1`
/// explicit weights per vertex, tightly packed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinningData {
    pub bone_count: usize,
    pub indices: Vec<u16>,
    pub weights: Vec<f32>,
}

impl SkinningData {
    pub fn as_attributes(&self) -> Result<BlendAttributes<'_>, Err> {
        Ok(BlendAttributes::packed(&self.indices, &self.weights, self.bone_count)?)
    }
}

/// The tuple table of a compressed mesh together with the parameters that
/// are needed to decode it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub params: CompressionParameters,
    pub table_size: usize,
    pub rows: Vec<Vec<u16>>,
}

impl TableDocument {
    pub fn new(compressed: &CompressedAttributes) -> Self {
        let rows = compressed.table
            .chunks(compressed.params.max_bone_count)
            .map(|row| row.to_vec())
            .collect();
        Self { params: compressed.params, table_size: compressed.outcome.table_size, rows }
    }

    /// Flattens the rows into the layout that the decoder reads.
    pub fn flat_table(&self) -> Vec<u16> {
        self.rows.concat()
    }
}

pub fn load_skinning_data<P: AsRef<Path> + Debug>(path: P) -> Result<SkinningData, Err> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn save_json<T: Serialize, P: AsRef<Path> + Debug>(value: &T, path: P) -> Result<(), Err> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::CompressionMethodType;
    use crate::encode::compress_to_vec;

    #[test]
    fn skinning_data_document() {
        let json = r#"{"bone_count":2,"indices":[1,2,3,4],"weights":[0.25,0.5]}"#;
        let data: SkinningData = serde_json::from_str(json).unwrap();
        let attributes = data.as_attributes().unwrap();
        assert_eq!(attributes.vertex_count(), 2);
        assert_eq!(attributes.vertex_weights(1), &[0.5]);
    }

    #[test]
    fn table_document() {
        let data = SkinningData { bone_count: 2, indices: vec![1, 2, 3, 4], weights: vec![0.25, 0.5] };
        let attributes = data.as_attributes().unwrap();
        let params = CompressionParameters::derive(CompressionMethodType::UnitCubeSampling, 2, 2, 4);
        let compressed = compress_to_vec(&attributes, &params).unwrap();
        let document = TableDocument::new(&compressed);
        assert_eq!(document.rows, vec![vec![1, 2], vec![3, 4]]);
        let json = serde_json::to_string(&document).unwrap();
        let back: TableDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.flat_table(), compressed.table);
    }
}
