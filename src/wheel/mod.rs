pub mod assign;
pub mod path;
pub mod synth;
pub mod trigger;
