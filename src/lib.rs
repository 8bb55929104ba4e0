//! Generate Markdown API documentation from Python modules.
//!
//! Modules are located on a list of search roots, their declarations are
//! read statically with tree-sitter, and every documented function and
//! class is rendered as a Markdown section holding its reconstructed call
//! signature and its docstring.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod python;
pub mod render;
pub mod signature;

pub use crate::core::errors::{Error, Result};
pub use crate::core::{
    ArgSpec, BaseRef, Callable, Class, ClassMember, DefaultValue, Documentable, EntityKind, Member,
    Module, ModuleMember,
};
pub use crate::io::output::{create_output, MarkdownWriter, OutputWriter};
pub use crate::render::{
    DiagnosticLevel, HeadingDepth, RenderOptions, RenderOutcome, Rendered, Renderer, SkipReason,
};
pub use crate::signature::{reconstruct, ParameterSet};
