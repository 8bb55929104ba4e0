//! Markdown block formatting shared by function and class sections.

use std::fmt;
use std::num::NonZeroUsize;

use crate::core::errors::{Error, Result};

const FENCE: &str = "```";

/// Markdown heading level, always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingDepth(NonZeroUsize);

impl HeadingDepth {
    pub const TOP: HeadingDepth = HeadingDepth(NonZeroUsize::MIN);

    pub fn new(level: usize) -> Result<Self> {
        NonZeroUsize::new(level).map(Self).ok_or_else(|| {
            Error::Configuration("section level must be at least 1".to_string())
        })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// One level further down, used for the members of a class.
    pub fn deeper(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for HeadingDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn heading(depth: HeadingDepth, title: &str) -> String {
    format!("{} {}", "#".repeat(depth.get()), title)
}

/// Heading, fenced declaration line, then the documentation text, each
/// followed by a blank line.
pub fn section(depth: HeadingDepth, title: &str, declaration: &str, doc: &str) -> String {
    format!(
        "{heading}\n\n{FENCE}\n{declaration}\n{FENCE}\n\n{doc}\n\n",
        heading = heading(depth, title),
    )
}
