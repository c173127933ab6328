//! Quote blocks: opener syntax, wrapper markup and reply pre-filling.
//!
//! Three opener forms are accepted:
//!
//! | Source | Attribution |
//! |---|---|
//! | `[quote]` | none |
//! | `[quote Name]` | `Name` |
//! | `[quote=Name]` | `Name` |
//!
//! Pairing openers with closers happens in the renderer, which sees the whole
//! token stream.

use crate::escape::escape_into;

const QUOTE: &str = "quote";

/// Author used by [`quote_reply`] when the quoted post has none.
pub const GUEST_AUTHOR: &str = "Gast";

/// Parses the inside of a `[...]` bracket as a quote opener.
///
/// Returns `None` when `inner` is not a quote opener at all, and
/// `Some(attribution)` otherwise. Blank attributions count as none.
pub(crate) fn parse_opener(inner: &str) -> Option<Option<&str>> {
    let head = inner.get(..QUOTE.len())?;
    if !head.eq_ignore_ascii_case(QUOTE) {
        return None;
    }

    let params = &inner[QUOTE.len()..];
    let author = if params.is_empty() {
        ""
    } else if let Some(name) = params.strip_prefix('=') {
        name
    } else if params.starts_with(char::is_whitespace) {
        params
    } else {
        return None;
    };

    let author = author.trim();
    Some((!author.is_empty()).then_some(author))
}

/// Whether the inside of a `[...]` bracket is a quote closer.
pub(crate) fn is_closer(inner: &str) -> bool {
    inner
        .strip_prefix('/')
        .is_some_and(|name| name.eq_ignore_ascii_case(QUOTE))
}

/// Appends the opening wrapper markup, including the author line.
pub(crate) fn open_block(out: &mut String, author: Option<&str>) {
    out.push_str("<div class=\"quote\">");
    if let Some(author) = author {
        out.push_str("<div class=\"quote-author\">");
        escape_into(out, author);
        out.push_str(" schrieb:</div>");
    }
    out.push_str("<div class=\"quote-content\">");
}

/// Appends the closing wrapper markup.
pub(crate) fn close_block(out: &mut String) {
    out.push_str("</div></div>");
}

/// Builds the text a reply is pre-filled with when quoting a post.
///
/// ```rust
/// use forumcode_bbparser::quote_reply;
///
/// assert_eq!(quote_reply(Some("Ben"), "Prost!"), "[quote=Ben]Prost![/quote]\n");
/// assert_eq!(quote_reply(None, "Prost!"), "[quote=Gast]Prost![/quote]\n");
/// ```
pub fn quote_reply(author: Option<&str>, body: &str) -> String {
    let author = author
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(GUEST_AUTHOR);
    format!("[quote={}]{}[/quote]\n", author, body)
}
