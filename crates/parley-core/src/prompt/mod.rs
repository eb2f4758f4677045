//! Chat-markup prompt rendering and reply extraction.

pub mod extract;
pub mod template;

pub use extract::ResponseExtractor;
pub use template::ChatTemplate;
