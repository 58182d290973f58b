pub mod normalize;
pub mod source;
