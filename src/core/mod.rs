pub mod attribute;
pub mod codec_table;
pub mod params;
pub mod shared;
