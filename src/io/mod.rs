/// JSON documents for skinning data and tuple tables.
pub mod json;
