//! Inference engine clients.

pub mod http;

pub use http::HttpTextGenerator;
