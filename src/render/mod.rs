//! Entity rendering.
//!
//! A [`Renderer`] turns one named [`Documentable`] into a Markdown section:
//! heading, fenced declaration line and documentation text. Classes list
//! their direct bases and are followed by one section per plain method,
//! one heading level deeper.
//!
//! Undocumented entities produce no text at all, and a callable whose
//! parameter metadata cannot be read is skipped without affecting its
//! siblings.

pub mod markdown;

use tracing::debug;

use crate::core::{Callable, Class, Documentable};
use crate::signature::reconstruct;

pub use markdown::HeadingDepth;

/// How much the renderer reports about the entities it inspects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    #[default]
    Quiet,
    Debug,
}

impl DiagnosticLevel {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            Self::Debug
        } else {
            Self::Quiet
        }
    }

    pub fn is_debug(self) -> bool {
        self >= Self::Debug
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub diagnostics: DiagnosticLevel,
}

/// Why an entity produced no output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoDocumentation,
    MetadataUnavailable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { methods: usize, skipped_methods: usize },
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Markdown for a single top-level entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub markdown: String,
    pub outcome: RenderOutcome,
}

impl Rendered {
    fn skipped(reason: SkipReason) -> Self {
        Self {
            markdown: String::new(),
            outcome: RenderOutcome::Skipped(reason),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `entity` under the display `name` at heading `depth`.
    pub fn render(&self, name: &str, entity: &Documentable, depth: HeadingDepth) -> Rendered {
        if self.options.diagnostics.is_debug() {
            debug!(
                "checking {} {} (defined as {})",
                entity.kind(),
                name,
                entity.recorded_name()
            );
        }

        match entity {
            Documentable::Function(callable) => match self.render_function(name, callable, depth) {
                Ok(markdown) => Rendered {
                    markdown,
                    outcome: RenderOutcome::Rendered {
                        methods: 0,
                        skipped_methods: 0,
                    },
                },
                Err(reason) => Rendered::skipped(reason),
            },
            Documentable::Class(class) => self.render_class(name, class, depth),
        }
    }

    fn render_function(
        &self,
        name: &str,
        callable: &Callable,
        depth: HeadingDepth,
    ) -> Result<String, SkipReason> {
        let doc = callable.doc().ok_or_else(|| self.skip(name, SkipReason::NoDocumentation))?;

        let params = reconstruct(callable)
            .map_err(|err| self.skip(name, SkipReason::MetadataUnavailable(err.to_string())))?;

        Ok(markdown::section(depth, name, &params.call_line(name), doc))
    }

    fn render_class(&self, name: &str, class: &Class, depth: HeadingDepth) -> Rendered {
        let Some(doc) = class.doc() else {
            return Rendered::skipped(self.skip(name, SkipReason::NoDocumentation));
        };

        let summary = class.summary();
        let declaration = format!("{}({})", name, summary.base_names.join(", "));
        let mut markdown = markdown::section(depth, name, &declaration, doc);

        let method_depth = depth.deeper();
        let mut methods = 0;
        let mut skipped_methods = 0;
        for (method_name, method) in summary.methods {
            match self.render_function(method_name, method, method_depth) {
                Ok(section) => {
                    markdown.push_str(&section);
                    methods += 1;
                }
                Err(_) => skipped_methods += 1,
            }
        }
        markdown.push('\n');

        Rendered {
            markdown,
            outcome: RenderOutcome::Rendered {
                methods,
                skipped_methods,
            },
        }
    }

    fn skip(&self, name: &str, reason: SkipReason) -> SkipReason {
        if self.options.diagnostics.is_debug() {
            match &reason {
                SkipReason::NoDocumentation => debug!("skipping {}: no documentation", name),
                SkipReason::MetadataUnavailable(detail) => debug!("skipping {}: {}", name, detail),
            }
        }
        reason
    }
}
