//! Chat orchestration: the `chatter` pipeline and turn recording.

pub mod recorder;
pub mod service;

pub use recorder::TurnRecorder;
pub use service::ChatService;
