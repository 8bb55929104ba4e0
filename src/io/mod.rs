pub mod output;

pub use output::{create_output, MarkdownWriter, OutputWriter};
