//! Renderer configuration.

/// Options controlling how markup is rendered.
///
/// ```rust
/// use forumcode_bbparser::RenderOptions;
///
/// let options = RenderOptions::default()
///     .max_quote_depth(4)
///     .smileys(false);
/// assert_eq!(options.quote_depth_limit(), 4);
/// assert!(!options.smileys_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    max_quote_depth: usize,
    smileys: bool,
    paragraphs: bool,
    max_steps: Option<usize>,
}

impl RenderOptions {
    /// Default nesting limit for quote blocks.
    pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 16;

    /// Highest nesting limit for quote blocks. Larger values are clamped,
    /// which keeps the renderer's recursion within a small stack.
    pub const MAX_QUOTE_DEPTH: usize = 256;

    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how deeply quote blocks may nest. Deeper quotes render as text.
    ///
    /// Values above [`MAX_QUOTE_DEPTH`](Self::MAX_QUOTE_DEPTH) are clamped.
    pub fn max_quote_depth(mut self, depth: usize) -> Self {
        self.max_quote_depth = depth.min(Self::MAX_QUOTE_DEPTH);
        self
    }

    /// Enables or disables smiley substitution.
    pub fn smileys(mut self, enabled: bool) -> Self {
        self.smileys = enabled;
        self
    }

    /// Enables or disables wrapping the document in paragraphs.
    pub fn paragraphs(mut self, enabled: bool) -> Self {
        self.paragraphs = enabled;
        self
    }

    /// Caps the number of tokens rendered as markup. The rest of the input
    /// is rendered as escaped text.
    ///
    /// Without a cap the work is still linear in the input length.
    pub fn max_steps(mut self, steps: Option<usize>) -> Self {
        self.max_steps = steps;
        self
    }

    /// The quote nesting limit.
    pub fn quote_depth_limit(&self) -> usize {
        self.max_quote_depth
    }

    /// Whether smileys are substituted.
    pub fn smileys_enabled(&self) -> bool {
        self.smileys
    }

    /// Whether the document is wrapped in paragraphs.
    pub fn paragraphs_enabled(&self) -> bool {
        self.paragraphs
    }

    /// The token cap, if any.
    pub fn step_limit(&self) -> Option<usize> {
        self.max_steps
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_quote_depth: Self::DEFAULT_MAX_QUOTE_DEPTH,
            smileys: true,
            paragraphs: true,
            max_steps: None,
        }
    }
}
