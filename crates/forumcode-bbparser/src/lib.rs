//! BBCode rendering for forum posts and comments.
//!
//! This crate turns user-submitted text written in a small BBCode dialect
//! into an HTML fragment that is safe to embed directly in a page. All text
//! that is not consumed as markup is HTML-escaped, so no markup from the
//! input ever reaches the output.
//!
//! # Example
//!
//! ```rust
//! use forumcode_bbparser::render;
//!
//! let html = render("[b]Prost[/b] :)");
//! assert!(html.contains("<strong>Prost</strong>"));
//! assert!(html.contains("alt=\"fröhlich\""));
//!
//! let html = render("[quote=Anna]Mehr Minze![/quote]");
//! assert!(html.contains("<div class=\"quote-author\">Anna schrieb:</div>"));
//!
//! let html = render("<script>alert('xss')</script>");
//! assert!(html.contains("&lt;script&gt;"));
//! ```
//!
//! # Supported Markup
//!
//! | Source | Output |
//! |---|---|
//! | `[b]…[/b]` | `<strong>…</strong>` |
//! | `[i]…[/i]` | `<i>…</i>` |
//! | `[u]…[/u]` | `<u>…</u>` |
//! | `[color=C]…[/color]` | `<span style="color: C;">…</span>` |
//! | `[url]U[/url]`, `[url=U]…[/url]` | `<a href="U" …>` |
//! | `[img]U[/img]` | `<img src="U" …/>` |
//! | `[post=ID]…[/post]` | link to a forum post |
//! | `[thread=SLUG]…[/thread]` | link to a forum thread |
//! | `[quote]`, `[quote Name]`, `[quote=Name]` … `[/quote]` | quote block, nestable |
//!
//! Tag names ignore ASCII case. Smileys such as `:)` become images, and line
//! breaks become `<br />`.
//!
//! # Recovery
//!
//! Rendering never fails. Tags without a partner, unknown tags, and quotes
//! nested beyond [`RenderOptions::max_quote_depth`] are emitted as escaped
//! text. [`BBRenderer::render_with_report`] lists those places as
//! [`Diagnostic`]s.

mod diagnostic;
mod escape;
mod inline;
mod links;
mod options;
mod quote;
mod render;
mod scanner;
mod smiley;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use escape::{escape, escape_into};
pub use inline::{is_post_id, is_thread_slug, InlineTag};
pub use links::{ForumRoutes, LinkResolver};
pub use options::RenderOptions;
pub use quote::{quote_reply, GUEST_AUTHOR};
pub use render::{BBRenderer, Rendered};
pub use smiley::{smileys, Smiley, SMILEY_PATH};

/// Renders `text` with the default options and forum routes.
pub fn render(text: &str) -> String {
    BBRenderer::new().render(text)
}
