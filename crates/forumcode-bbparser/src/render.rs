//! The renderer: pairs tokens and turns them into HTML.
//!
//! Rendering happens in three linear steps:
//!
//! 1. the [`Tokenizer`] splits the input into tokens,
//! 2. [`pair_tokens`] finds the partner of every opener,
//! 3. [`Pass::render_range`] walks the tokens, recursing into quote bodies
//!    and inline tag bodies.
//!
//! Quote openers pair with closers by balanced matching: the partner of an
//! opener is the first `[/quote]` after it once every `[quote` in between
//! has been paired. Inline openers pair with the first following closer of
//! the same tag. A pair is only honored when it lies completely inside the
//! construct its opener appears in, so emitted markup is always properly
//! nested. Everything that cannot be honored is emitted as escaped text.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::escape::escape_into;
use crate::inline::{InlineTag, IMAGE_CLASS, LINK_CLASS};
use crate::links::{ForumRoutes, LinkResolver};
use crate::options::RenderOptions;
use crate::quote;
use crate::scanner::{Token, TokenKind, Tokenizer};

/// Output of [`BBRenderer::render_with_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered HTML fragment.
    pub html: String,
    /// Recovery events, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// True when all markup in the input was honored.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Renders forum markup to HTML.
///
/// The renderer holds only configuration, so one instance can be shared
/// between threads and reused for any number of inputs.
///
/// ```rust
/// use forumcode_bbparser::{BBRenderer, ForumRoutes, RenderOptions};
///
/// let renderer = BBRenderer::new()
///     .with_options(RenderOptions::default().paragraphs(false))
///     .link_resolver(ForumRoutes::new("/forum"));
///
/// assert_eq!(
///     renderer.render("[post=42]hier[/post]"),
///     "<a href=\"/forum/beitrag/42\" class=\"link-underline\" title=\"Zum Beitrag\">hier</a>"
/// );
/// ```
#[derive(Clone)]
pub struct BBRenderer {
    options: RenderOptions,
    links: Arc<dyn LinkResolver>,
}

impl BBRenderer {
    /// Creates a renderer with default options and [`ForumRoutes`].
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            links: Arc::new(ForumRoutes::default()),
        }
    }

    /// Replaces the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the resolver used for `[post]` and `[thread]` links.
    pub fn link_resolver(mut self, links: impl LinkResolver + 'static) -> Self {
        self.links = Arc::new(links);
        self
    }

    /// The render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `text` to an HTML fragment.
    pub fn render(&self, text: &str) -> String {
        self.run(text, false).html
    }

    /// Renders `text` and reports every place where markup was rendered as
    /// text instead.
    pub fn render_with_report(&self, text: &str) -> Rendered {
        self.run(text, true)
    }

    fn run(&self, text: &str, collect: bool) -> Rendered {
        if text.trim().is_empty() {
            return Rendered::default();
        }

        let normalized = normalize_newlines(text);
        let leading = normalized.len() - normalized.trim_start_matches('\n').len();
        let body = normalized.trim_matches('\n');

        let mut pass = Pass::new(body, &self.options, self.links.as_ref());
        if collect {
            pass.collect_diagnostics(leading + 1);
        }

        let paragraphs = self.options.paragraphs_enabled();
        let mut html = String::with_capacity(body.len() + body.len() / 2);
        pass.render_range(&mut html, 0..pass.tokens.len(), 0, paragraphs);
        if paragraphs {
            pass.end_paragraph(&mut html);
        }

        Rendered {
            html,
            diagnostics: pass.diagnostics,
        }
    }
}

impl Default for BBRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BBRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBRenderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Finds the partner of every opener token.
///
/// `partners[i]` is the index of the closer for the opener at `i`, or `None`
/// when the token is not an opener or has no closer.
fn pair_tokens(tokens: &[Token<'_>]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];

    let mut open_quotes = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::QuoteOpen { .. } => open_quotes.push(i),
            TokenKind::QuoteClose => {
                if let Some(open) = open_quotes.pop() {
                    partners[open] = Some(i);
                }
            }
            _ => {}
        }
    }

    let mut next_close = [None; InlineTag::COUNT];
    for (i, token) in tokens.iter().enumerate().rev() {
        match token.kind {
            TokenKind::Close(tag) => next_close[tag.index()] = Some(i),
            TokenKind::Open { tag, .. } => partners[i] = next_close[tag.index()],
            _ => {}
        }
    }

    partners
}

/// Paragraph state of the top level of the document.
///
/// Paragraphs open lazily before the first content and close at blank lines
/// and quote blocks, so block markup never ends up inside a `<p>`.
#[derive(Debug, Default)]
struct Paragraphs {
    open: bool,
    started: bool,
    // Single line breaks seen since the last content of the open paragraph.
    pending_breaks: usize,
}

/// State of a single render call.
struct Pass<'a, 'r> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    partners: Vec<Option<usize>>,
    options: &'r RenderOptions,
    links: &'r dyn LinkResolver,
    steps_left: usize,
    diagnostics: Vec<Diagnostic>,
    // Offsets of every newline, present only while collecting diagnostics.
    newlines: Option<Vec<usize>>,
    first_line: usize,
    paragraph: Paragraphs,
}

impl<'a, 'r> Pass<'a, 'r> {
    fn new(input: &'a str, options: &'r RenderOptions, links: &'r dyn LinkResolver) -> Self {
        let tokens: Vec<_> = Tokenizer::new(input).collect();
        let partners = pair_tokens(&tokens);
        Self {
            input,
            tokens,
            partners,
            options,
            links,
            steps_left: options.step_limit().unwrap_or(usize::MAX),
            diagnostics: Vec::new(),
            newlines: None,
            first_line: 1,
            paragraph: Paragraphs::default(),
        }
    }

    fn collect_diagnostics(&mut self, first_line: usize) {
        self.first_line = first_line;
        self.newlines = Some(
            self.input
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i)
                .collect(),
        );
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize, source: &str) {
        if let Some(newlines) = &self.newlines {
            let line = self.first_line + newlines.partition_point(|&at| at < offset);
            self.diagnostics.push(Diagnostic::new(kind, line, source));
        }
    }

    /// Renders the tokens in `range`.
    ///
    /// `depth` is the number of quote blocks enclosing the range.
    /// `paragraphs` is set only for the top level of the document.
    fn render_range(
        &mut self,
        out: &mut String,
        range: Range<usize>,
        depth: usize,
        paragraphs: bool,
    ) {
        let input = self.input;
        let mut i = range.start;
        while i < range.end {
            let token = self.tokens[i];

            if self.steps_left == 0 {
                let rest = &input[token.start..self.tokens[range.end - 1].end];
                self.report(DiagnosticKind::StepLimit, token.start, rest);
                self.push_text(out, rest, paragraphs);
                return;
            }
            self.steps_left -= 1;

            let partner = self.partners[i].filter(|&close| close < range.end);
            match token.kind {
                TokenKind::Text => self.push_text(out, token.text(input), paragraphs),
                TokenKind::Smiley(smiley) if self.options.smileys_enabled() => {
                    if paragraphs {
                        self.begin_content(out);
                    }
                    smiley.write_html(out)
                }
                TokenKind::Smiley(_) => self.push_text(out, token.text(input), paragraphs),
                TokenKind::QuoteOpen { author } => match partner {
                    Some(close) if depth < self.options.quote_depth_limit() => {
                        if paragraphs {
                            self.begin_block(out);
                        }
                        quote::open_block(out, author);
                        self.render_range(out, i + 1..close, depth + 1, false);
                        quote::close_block(out);
                        i = close + 1;
                        continue;
                    }
                    Some(_) => self.literal(out, token, DiagnosticKind::DepthLimit, paragraphs),
                    None => self.literal(out, token, DiagnosticKind::UnmatchedOpen, paragraphs),
                },
                TokenKind::Open { tag, argument } => match partner {
                    Some(close) => {
                        if paragraphs {
                            self.begin_content(out);
                        }
                        self.render_inline(out, tag, argument, i, close, depth);
                        i = close + 1;
                        continue;
                    }
                    None => self.literal(out, token, DiagnosticKind::UnmatchedOpen, paragraphs),
                },
                TokenKind::QuoteClose | TokenKind::Close(_) => {
                    self.literal(out, token, DiagnosticKind::UnexpectedClose, paragraphs)
                }
            }
            i += 1;
        }
    }

    /// Renders the inline pair `open`..=`close`.
    fn render_inline(
        &mut self,
        out: &mut String,
        tag: InlineTag,
        argument: Option<&'a str>,
        open: usize,
        close: usize,
        depth: usize,
    ) {
        let body = open + 1..close;
        let raw = &self.input[self.tokens[open].end..self.tokens[close].start];

        match tag {
            InlineTag::Bold => self.wrap(out, "<strong>", body, "</strong>", depth),
            InlineTag::Italic => self.wrap(out, "<i>", body, "</i>", depth),
            InlineTag::Underline => self.wrap(out, "<u>", body, "</u>", depth),
            InlineTag::Color => {
                out.push_str("<span style=\"color: ");
                escape_into(out, argument.unwrap_or_default());
                out.push_str(";\">");
                self.render_range(out, body, depth, false);
                out.push_str("</span>");
            }
            InlineTag::Url => {
                let href = argument.unwrap_or(raw);
                out.push_str("<a href=\"");
                escape_into(out, href);
                out.push_str("\" class=\"");
                out.push_str(LINK_CLASS);
                out.push_str("\" target=\"_blank\" rel=\"nofollow\">");
                if argument.is_some() {
                    self.render_range(out, body, depth, false);
                } else {
                    escape_into(out, raw);
                }
                out.push_str("</a>");
            }
            InlineTag::Image => {
                out.push_str("<img src=\"");
                escape_into(out, raw);
                out.push_str("\" class=\"");
                out.push_str(IMAGE_CLASS);
                out.push_str("\" />");
            }
            InlineTag::Post => {
                let argument = argument.unwrap_or_default();
                let id = argument.strip_prefix('#').unwrap_or(argument);
                self.open_forum_link(out, &self.links.post_path(id));
                out.push_str("Zum Beitrag\">");
                if raw.trim().is_empty() {
                    out.push_str("Beitrag #");
                    escape_into(out, id);
                } else {
                    self.render_range(out, body, depth, false);
                }
                out.push_str("</a>");
            }
            InlineTag::Thread => {
                let slug = argument.unwrap_or_default();
                self.open_forum_link(out, &self.links.thread_path(slug));
                out.push_str("Zum Thema: ");
                escape_into(out, slug);
                out.push_str("\">");
                if raw.trim().is_empty() {
                    let title = self.links.thread_title(slug);
                    escape_into(out, title.as_deref().unwrap_or(slug));
                } else {
                    self.render_range(out, body, depth, false);
                }
                out.push_str("</a>");
            }
        }
    }

    fn wrap(
        &mut self,
        out: &mut String,
        open: &str,
        body: Range<usize>,
        close: &str,
        depth: usize,
    ) {
        out.push_str(open);
        self.render_range(out, body, depth, false);
        out.push_str(close);
    }

    /// Appends an internal link up to the opening quote of its title.
    fn open_forum_link(&self, out: &mut String, href: &str) {
        out.push_str("<a href=\"");
        escape_into(out, href);
        out.push_str("\" class=\"");
        out.push_str(LINK_CLASS);
        out.push_str("\" title=\"");
    }

    fn literal(
        &mut self,
        out: &mut String,
        token: Token<'a>,
        kind: DiagnosticKind,
        paragraphs: bool,
    ) {
        let text = token.text(self.input);
        self.report(kind, token.start, text);
        self.push_text(out, text, paragraphs);
    }

    /// Appends escaped text, converting line breaks.
    ///
    /// With `paragraphs`, runs of two or more newlines start a new paragraph;
    /// every other newline becomes `<br />`.
    fn push_text(&mut self, out: &mut String, text: &str, paragraphs: bool) {
        let mut rest = text;
        loop {
            let at = rest.find('\n').unwrap_or(rest.len());
            let segment = &rest[..at];
            if !paragraphs {
                escape_into(out, segment);
            } else if !segment.is_empty() && (self.paragraph.open || !segment.trim().is_empty()) {
                self.begin_content(out);
                escape_into(out, segment);
            }

            let run = rest[at..].bytes().take_while(|&b| b == b'\n').count();
            if run == 0 {
                return;
            }
            if !paragraphs {
                for _ in 0..run {
                    out.push_str("<br />\n");
                }
            } else if run > 1 {
                self.end_paragraph(out);
            } else if self.paragraph.open {
                self.paragraph.pending_breaks += 1;
            }
            rest = &rest[at + run..];
        }
    }

    /// Prepares the top level for inline content: opens a paragraph, or
    /// flushes the line breaks seen since the last content.
    fn begin_content(&mut self, out: &mut String) {
        let paragraph = &mut self.paragraph;
        if paragraph.open {
            for _ in 0..paragraph.pending_breaks {
                out.push_str("<br />\n");
            }
        } else {
            if paragraph.started {
                out.push_str("\n\n");
            }
            out.push_str("<p>");
            paragraph.open = true;
            paragraph.started = true;
        }
        paragraph.pending_breaks = 0;
    }

    /// Prepares the top level for a quote block.
    fn begin_block(&mut self, out: &mut String) {
        self.end_paragraph(out);
        if self.paragraph.started {
            out.push_str("\n\n");
        }
        self.paragraph.started = true;
    }

    /// Closes the open paragraph, dropping line breaks at its end.
    fn end_paragraph(&mut self, out: &mut String) {
        if self.paragraph.open {
            out.push_str("</p>");
            self.paragraph.open = false;
        }
        self.paragraph.pending_breaks = 0;
    }
}
