//! Inference engine abstraction.

pub mod generator;

pub use generator::TextGenerator;
