//! Builder-pattern printer for rendering parsing errors.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;

use super::ErrorAggregation;

/// Renders an [`ErrorAggregation`] against its source text.
pub struct ErrorsPrinter<'e, 's> {
    errors: &'e ErrorAggregation,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> ErrorsPrinter<'e, 's> {
    pub fn new(errors: &'e ErrorAggregation, source: &'s str) -> Self {
        Self {
            errors,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, (error, position)) in self.errors.iter().enumerate() {
            let range = adjust_range(position.span, self.source.len());

            let mut snippet = Snippet::source(self.source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(&error.message));

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let report = vec![Level::ERROR.primary_title(&error.message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl ErrorAggregation {
    pub fn printer<'s>(&self, source: &'s str) -> ErrorsPrinter<'_, 's> {
        ErrorsPrinter::new(self, source)
    }
}
