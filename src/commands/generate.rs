use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::config::{MemberOrder, PymdgenConfig, DEFAULT_SECTION_LEVEL};
use crate::core::{Module, ModuleMember};
use crate::io::{create_output, MarkdownWriter, OutputWriter};
use crate::python::{normalize_module_name, ExtractOptions, ModuleLoader, ModuleResolver};
use crate::render::{DiagnosticLevel, HeadingDepth, RenderOptions, RenderOutcome, Renderer};

/// Fully merged settings for one generate run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateConfig {
    pub modules: Vec<String>,
    pub search_paths: Vec<PathBuf>,
    pub section_level: HeadingDepth,
    pub order: MemberOrder,
    pub inherit_docs: bool,
    pub diagnostics: DiagnosticLevel,
    pub output: Option<PathBuf>,
}

impl GenerateConfig {
    /// Merge command-line flags over file settings over defaults.
    pub fn from_sources(cli: Cli, file: PymdgenConfig) -> Result<Self> {
        let level = cli
            .section_level
            .or(file.section_level)
            .unwrap_or(DEFAULT_SECTION_LEVEL);
        let section_level = HeadingDepth::new(level).context("Invalid --section-level")?;

        let search_paths = [cli.search_paths, file.search_paths]
            .into_iter()
            .find(|paths| !paths.is_empty())
            .unwrap_or_else(|| vec![PathBuf::from(".")]);

        Ok(Self {
            modules: cli.modules,
            search_paths,
            section_level,
            order: cli.order.or(file.order).unwrap_or_default(),
            inherit_docs: !cli.no_inherit_docs && file.inherit_docs.unwrap_or(true),
            diagnostics: DiagnosticLevel::from_debug_flag(cli.debug),
            output: cli.output,
        })
    }
}

/// Counts of what a run produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub modules: usize,
    pub rendered: usize,
    pub skipped: usize,
    pub methods: usize,
    pub skipped_methods: usize,
}

impl GenerateSummary {
    fn record(&mut self, outcome: &RenderOutcome) {
        match outcome {
            RenderOutcome::Rendered {
                methods,
                skipped_methods,
            } => {
                self.rendered += 1;
                self.methods += methods;
                self.skipped_methods += skipped_methods;
            }
            RenderOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Document every requested module to stdout or the configured file.
pub fn generate(config: &GenerateConfig) -> Result<GenerateSummary> {
    let sink = create_output(config.output.as_deref())?;
    generate_to(config, sink)
}

/// Document every requested module into `sink`.
///
/// Modules are processed in the order given. A module that cannot be found
/// or parsed aborts the run; sections already written stay in the sink.
pub fn generate_to<W: Write>(config: &GenerateConfig, sink: W) -> Result<GenerateSummary> {
    let mut loader = ModuleLoader::new(
        ModuleResolver::new(config.search_paths.clone()),
        ExtractOptions {
            inherit_docs: config.inherit_docs,
        },
    );
    let renderer = Renderer::new(RenderOptions {
        diagnostics: config.diagnostics,
    });
    let mut writer = MarkdownWriter::new(sink, renderer, config.section_level);

    let mut summary = GenerateSummary::default();
    for arg in &config.modules {
        let name = python_notation(arg);
        let module = loader
            .load(&name)
            .with_context(|| format!("Failed to import module {}", name))?;
        info!("documenting {} from {}", name, module.path.display());

        for member in ordered_members(&module, config.order) {
            let outcome = writer.write_entity(&member.name, &member.entity)?;
            summary.record(&outcome);
        }
        summary.modules += 1;
    }

    debug!(
        "rendered {} entities and {} methods, skipped {} entities and {} methods",
        summary.rendered, summary.skipped, summary.methods, summary.skipped_methods
    );
    Ok(summary)
}

/// A module's top-level members in the requested enumeration order.
pub fn ordered_members(module: &Module, order: MemberOrder) -> Vec<&ModuleMember> {
    let mut members: Vec<&ModuleMember> = module.members.iter().collect();
    if order == MemberOrder::Alphabetical {
        members.sort_by(|a, b| a.name.cmp(&b.name));
    }
    members
}

fn python_notation(arg: &str) -> String {
    match normalize_module_name(arg) {
        Some(name) => {
            warn!("modules should be in python notation, trying with {}", name);
            name
        }
        None => arg.to_string(),
    }
}
