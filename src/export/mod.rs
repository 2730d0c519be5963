//! Export helpers: attachment extraction and model summaries.

pub mod attachment;
pub mod summary;
