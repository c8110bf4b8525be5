//! Helpers shared by the packaging pipeline.

pub mod fs;
