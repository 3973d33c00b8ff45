pub mod envelope;
pub mod metadata;
pub mod pipeline;
