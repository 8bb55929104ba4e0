use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::core::Documentable;
use crate::render::{HeadingDepth, RenderOutcome, Renderer};

pub trait OutputWriter {
    /// Render one top-level entity and hand it to the sink.
    fn write_entity(&mut self, name: &str, entity: &Documentable) -> anyhow::Result<RenderOutcome>;
}

/// Writes rendered Markdown sections to any `io::Write` sink, one complete
/// entity block at a time.
pub struct MarkdownWriter<W: Write> {
    writer: W,
    renderer: Renderer,
    depth: HeadingDepth,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, renderer: Renderer, depth: HeadingDepth) -> Self {
        Self {
            writer,
            renderer,
            depth,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_entity(&mut self, name: &str, entity: &Documentable) -> anyhow::Result<RenderOutcome> {
        let rendered = self.renderer.render(name, entity, self.depth);
        if !rendered.markdown.is_empty() {
            self.writer
                .write_all(rendered.markdown.as_bytes())
                .with_context(|| format!("Failed to write section for {}", name))?;
            self.writer.flush().context("Failed to flush output")?;
        }
        Ok(rendered.outcome)
    }
}

/// Open the Markdown sink: the named file, or stdout.
pub fn create_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArgSpec, Callable};
    use crate::render::SkipReason;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Counts flushes so tests can see one flush per written entity.
    #[derive(Default)]
    struct CountingSink {
        bytes: Vec<u8>,
        flushes: usize,
    }

    impl Write for CountingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn documented(name: &str) -> Documentable {
        Callable::new(name, ArgSpec::new(["x"]))
            .with_doc("Doc.")
            .into()
    }

    #[test]
    fn test_writes_and_flushes_each_entity() {
        let mut writer =
            MarkdownWriter::new(CountingSink::default(), Renderer::default(), HeadingDepth::TOP);
        writer.write_entity("a", &documented("a")).unwrap();
        writer.write_entity("b", &documented("b")).unwrap();

        let sink = writer.into_inner();
        assert_eq!(sink.flushes, 2);
        assert_eq!(
            String::from_utf8(sink.bytes).unwrap(),
            "# a\n\n```\na(x)\n```\n\nDoc.\n\n# b\n\n```\nb(x)\n```\n\nDoc.\n\n"
        );
    }

    #[test]
    fn test_skipped_entity_writes_nothing() {
        let mut writer =
            MarkdownWriter::new(CountingSink::default(), Renderer::default(), HeadingDepth::TOP);
        let quiet: Documentable = Callable::new("quiet", ArgSpec::new(["x"])).into();
        let outcome = writer.write_entity("quiet", &quiet).unwrap();

        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::NoDocumentation));
        let sink = writer.into_inner();
        assert!(sink.bytes.is_empty());
        assert_eq!(sink.flushes, 0);
    }

    #[test]
    fn test_sink_errors_propagate() {
        let mut writer = MarkdownWriter::new(FailingSink, Renderer::default(), HeadingDepth::TOP);
        assert!(writer.write_entity("a", &documented("a")).is_err());
    }
}
