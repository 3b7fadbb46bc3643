//! densiscii application layer: CLI definitions and batch pipelines.

pub mod cli;
pub mod pipeline;
