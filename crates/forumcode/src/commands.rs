//! The work behind each subcommand.
//!
//! Commands take already-read input and return their output as strings, so
//! the binary only deals with arguments, files and exit codes.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use console::Style;
use forumcode_bbparser::{quote_reply, smileys, BBRenderer, Diagnostic};
use serde::Serialize;

/// Name used for standard input in reports.
pub const STDIN_NAME: &str = "<stdin>";

/// A piece of input text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads a file, or standard input for `-`.
    pub fn read(path: &Path) -> io::Result<Self> {
        if path == Path::new("-") {
            return Self::stdin();
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), text))
    }

    /// Reads all of standard input.
    pub fn stdin() -> io::Result<Self> {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(Self::new(STDIN_NAME, text))
    }
}

/// Reads every file in `paths`, or standard input when there are none.
pub fn read_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<Source>> {
    if paths.is_empty() {
        let source = Source::stdin().context("failed to read standard input")?;
        return Ok(vec![source]);
    }
    paths
        .iter()
        .map(|path| {
            Source::read(path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

/// Renders each source, one fragment per line.
pub fn render_sources(renderer: &BBRenderer, sources: &[Source]) -> String {
    let mut out = String::new();
    for source in sources {
        out.push_str(&renderer.render(&source.text));
        out.push('\n');
    }
    out
}

/// Result of checking sources for markup problems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// One line per diagnostic, `name:line: message`.
    pub output: String,
    /// Number of diagnostics found.
    pub problems: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems == 0
    }
}

/// Renders each source and lists the places where markup was not honored.
pub fn check_sources(renderer: &BBRenderer, sources: &[Source], color: bool) -> CheckReport {
    let location = Style::new().bold().force_styling(color);
    let kind = Style::new().yellow().force_styling(color);
    let snippet = Style::new().dim().force_styling(color);

    let mut report = CheckReport::default();
    for source in sources {
        let rendered = renderer.render_with_report(&source.text);
        for diagnostic in &rendered.diagnostics {
            report.output.push_str(&format_diagnostic(
                &source.name,
                diagnostic,
                &location,
                &kind,
                &snippet,
            ));
            report.output.push('\n');
        }
        report.problems += rendered.diagnostics.len();
    }
    report
}

fn format_diagnostic(
    name: &str,
    diagnostic: &Diagnostic,
    location: &Style,
    kind: &Style,
    snippet: &Style,
) -> String {
    format!(
        "{} {} {}",
        location.apply_to(format!("{}:{}:", name, diagnostic.line)),
        kind.apply_to(diagnostic.kind),
        snippet.apply_to(format!("`{}`", diagnostic.source)),
    )
}

/// One smiley in `smileys --json` output.
#[derive(Debug, Serialize)]
struct SmileyEntry {
    name: &'static str,
    shortcut: &'static str,
    spellings: &'static [&'static str],
    ignore_case: bool,
    src: String,
}

/// Lists the smiley vocabulary as aligned text.
pub fn smiley_table() -> String {
    let width = smileys()
        .iter()
        .map(|smiley| smiley.shortcut().chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for smiley in smileys() {
        let pad = width - smiley.shortcut().chars().count();
        out.push_str(smiley.shortcut());
        out.push_str(&" ".repeat(pad + 2));
        out.push_str(smiley.name());
        out.push_str("  ");
        out.push_str(&smiley.src());
        out.push('\n');
    }
    out
}

/// Lists the smiley vocabulary as a JSON array.
pub fn smiley_json() -> serde_json::Result<String> {
    let entries: Vec<_> = smileys()
        .iter()
        .map(|smiley| SmileyEntry {
            name: smiley.name(),
            shortcut: smiley.shortcut(),
            spellings: smiley.spellings(),
            ignore_case: smiley.ignores_case(),
            src: smiley.src(),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Builds the reply text quoting `source`.
pub fn quote_source(author: Option<&str>, source: &Source) -> String {
    quote_reply(author, source.text.trim_end_matches(['\r', '\n']))
}
