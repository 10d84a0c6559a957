pub mod bit_field;
pub mod preprocess;
pub mod reduce;
pub mod simplex_sampling;
