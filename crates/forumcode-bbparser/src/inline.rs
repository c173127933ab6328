//! The non-nesting tag vocabulary.
//!
//! Inline tags pair an opener with the first following closer of the same
//! name. Which openers take an `=value` argument, and which values are
//! acceptable, is decided here; the renderer only sees openers that passed
//! these checks.

/// Class attached to every rendered link.
pub(crate) const LINK_CLASS: &str = "link-underline";

/// Class attached to every rendered `[img]`.
pub(crate) const IMAGE_CLASS: &str = "max-w-full h-auto rounded my-2";

/// A recognized inline tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineTag {
    /// `[b]…[/b]`
    Bold,
    /// `[i]…[/i]`
    Italic,
    /// `[u]…[/u]`
    Underline,
    /// `[color=value]…[/color]`
    Color,
    /// `[url]href[/url]` or `[url=href]text[/url]`
    Url,
    /// `[img]src[/img]`
    Image,
    /// `[post=id]text[/post]`, a link to a single forum post.
    Post,
    /// `[thread=slug]text[/thread]`, a link to a forum thread.
    Thread,
}

impl InlineTag {
    /// Number of inline tags.
    pub const COUNT: usize = 8;

    /// Length of the longest tag name.
    pub(crate) const MAX_NAME_LEN: usize = 6;

    /// All inline tags.
    pub const ALL: [InlineTag; Self::COUNT] = [
        InlineTag::Bold,
        InlineTag::Italic,
        InlineTag::Underline,
        InlineTag::Color,
        InlineTag::Url,
        InlineTag::Image,
        InlineTag::Post,
        InlineTag::Thread,
    ];

    /// The tag name as written between the brackets.
    pub fn name(self) -> &'static str {
        match self {
            InlineTag::Bold => "b",
            InlineTag::Italic => "i",
            InlineTag::Underline => "u",
            InlineTag::Color => "color",
            InlineTag::Url => "url",
            InlineTag::Image => "img",
            InlineTag::Post => "post",
            InlineTag::Thread => "thread",
        }
    }

    /// Looks up a tag by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether an opener of this tag may carry `argument`.
    pub(crate) fn accepts(self, argument: Option<&str>) -> bool {
        match self {
            InlineTag::Bold | InlineTag::Italic | InlineTag::Underline | InlineTag::Image => {
                argument.is_none()
            }
            InlineTag::Color => argument.is_some(),
            InlineTag::Url => true,
            InlineTag::Post => argument.is_some_and(is_post_id),
            InlineTag::Thread => argument.is_some_and(is_thread_slug),
        }
    }
}

/// A public post id: an optional leading `#` and ASCII alphanumerics.
pub fn is_post_id(value: &str) -> bool {
    let id = value.strip_prefix('#').unwrap_or(value);
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A thread slug: ASCII alphanumerics and hyphens.
pub fn is_thread_slug(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
