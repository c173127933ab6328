//! Recovery events reported by the renderer.
//!
//! Rendering never fails. When markup cannot be honored it is emitted as
//! text, and [`BBRenderer::render_with_report`](crate::BBRenderer::render_with_report)
//! records what happened so editors and moderators can be told.

use std::fmt;

const SNIPPET_CHARS: usize = 40;

/// Kind of recovery event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An opening tag without a matching closer.
    UnmatchedOpen,
    /// A closing tag with no open tag to close.
    UnexpectedClose,
    /// A quote nested deeper than the configured limit.
    DepthLimit,
    /// The step cap was reached; the rest of the input is text.
    StepLimit,
}

impl DiagnosticKind {
    /// Short description of the event.
    pub fn describe(self) -> &'static str {
        match self {
            DiagnosticKind::UnmatchedOpen => "unmatched opening tag",
            DiagnosticKind::UnexpectedClose => "closing tag without opening tag",
            DiagnosticKind::DepthLimit => "quote nested too deeply",
            DiagnosticKind::StepLimit => "markup limit reached, rendering rest as text",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single recovery event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What happened.
    pub kind: DiagnosticKind,
    /// 1-based line of the offending source text.
    pub line: usize,
    /// The offending source text, shortened to a few dozen characters.
    pub source: String,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, line: usize, source: &str) -> Self {
        let source = match source.char_indices().nth(SNIPPET_CHARS) {
            Some((cut, _)) => format!("{}…", &source[..cut]),
            None => source.to_string(),
        };
        Self { kind, line, source }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} `{}`",
            self.line, self.kind, self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let diagnostic = Diagnostic::new(DiagnosticKind::UnmatchedOpen, 3, "[b]");
        assert_eq!(diagnostic.to_string(), "line 3: unmatched opening tag `[b]`");
    }

    #[test]
    fn long_source_is_shortened() {
        let source = "ä".repeat(100);
        let diagnostic = Diagnostic::new(DiagnosticKind::StepLimit, 1, &source);
        assert_eq!(diagnostic.source.chars().count(), SNIPPET_CHARS + 1);
        assert!(diagnostic.source.ends_with('…'));
    }
}
