//! Link targets for `[post]` and `[thread]` tags.
//!
//! The renderer never performs lookups itself. Paths and thread titles come
//! from a [`LinkResolver`], so the host application decides how its routes
//! look and where titles come from.

use std::collections::HashMap;

/// Resolves forum link targets.
pub trait LinkResolver: Send + Sync {
    /// Path of the post with the given public id.
    fn post_path(&self, public_id: &str) -> String;

    /// Path of the thread with the given slug.
    fn thread_path(&self, slug: &str) -> String;

    /// Title of the thread with the given slug, if known.
    ///
    /// Used as link text for `[thread=slug][/thread]`.
    fn thread_title(&self, _slug: &str) -> Option<String> {
        None
    }
}

/// Default forum routes below a fixed path prefix.
///
/// ```rust
/// use forumcode_bbparser::{ForumRoutes, LinkResolver};
///
/// let routes = ForumRoutes::default();
/// assert_eq!(routes.post_path("123"), "/cocktailforum/beitrag/123");
/// assert_eq!(routes.thread_path("mojito"), "/cocktailforum/thema/mojito");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumRoutes {
    prefix: String,
    titles: HashMap<String, String>,
}

impl ForumRoutes {
    /// Default path prefix of the forum.
    pub const DEFAULT_PREFIX: &'static str = "/cocktailforum";

    /// Creates routes below `prefix` (without trailing slash).
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self {
            prefix,
            titles: HashMap::new(),
        }
    }

    /// Registers a known thread title.
    pub fn thread(mut self, slug: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(slug.into(), title.into());
        self
    }

    /// Registers several known thread titles.
    pub fn threads<I, K, V>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.titles
            .extend(titles.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for ForumRoutes {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl LinkResolver for ForumRoutes {
    fn post_path(&self, public_id: &str) -> String {
        format!("{}/beitrag/{}", self.prefix, public_id)
    }

    fn thread_path(&self, slug: &str) -> String {
        format!("{}/thema/{}", self.prefix, slug)
    }

    fn thread_title(&self, slug: &str) -> Option<String> {
        self.titles.get(slug).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_prefix() {
        let routes = ForumRoutes::new("/forum/");
        assert_eq!(routes.prefix(), "/forum");
        assert_eq!(routes.post_path("7"), "/forum/beitrag/7");
        assert_eq!(routes.thread_path("a-b"), "/forum/thema/a-b");
    }

    #[test]
    fn empty_prefix() {
        let routes = ForumRoutes::new("");
        assert_eq!(routes.post_path("7"), "/beitrag/7");
    }

    #[test]
    fn titles() {
        let routes = ForumRoutes::default()
            .thread("test-thread", "Test Thread Title")
            .threads([("other", "Other")]);
        assert_eq!(
            routes.thread_title("test-thread").as_deref(),
            Some("Test Thread Title")
        );
        assert_eq!(routes.thread_title("other").as_deref(), Some("Other"));
        assert_eq!(routes.thread_title("missing"), None);
    }
}
