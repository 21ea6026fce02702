//! Request handling on top of the generation pipeline.

/// Cached request handling.
pub mod wallset_session;

pub use wallset_session::{GenerationInputs, OutputTarget, WallsetSession};
