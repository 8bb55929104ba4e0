//! Command implementations.
//!
//! - **generate**: document Python modules as Markdown

pub mod generate;

pub use generate::{generate, generate_to, ordered_members, GenerateConfig, GenerateSummary};
