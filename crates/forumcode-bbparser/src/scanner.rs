//! Tokenizer for forum markup.
//!
//! The tokenizer walks the input once, left to right. At every trigger byte
//! (`[` or the first byte of a smiley) it tries, in order:
//!
//! 1. a quote opener or closer,
//! 2. an inline tag opener or closer,
//! 3. a smiley.
//!
//! Anything else extends the current text run. Every input byte ends up in
//! exactly one token, so concatenating the token spans reproduces the input.

use crate::inline::InlineTag;
use crate::quote;
use crate::smiley::{self, Smiley};

/// What a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// Literal text.
    Text,
    /// `[quote]`, `[quote Name]` or `[quote=Name]`.
    QuoteOpen { author: Option<&'a str> },
    /// `[/quote]`
    QuoteClose,
    /// An inline opener, with its `=value` argument if any.
    Open {
        tag: InlineTag,
        argument: Option<&'a str>,
    },
    /// An inline closer.
    Close(InlineTag),
    /// A smiley spelling.
    Smiley(&'static Smiley),
}

/// A token and the byte span it covers in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind<'a>, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// The source text of this token.
    pub fn text(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

/// Splits input into tokens.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    pending: Option<Token<'a>>,
    // Position of the next `]` at or after the last lookup. Positions only
    // move forward, so the input is searched for brackets at most once.
    close_bracket: Option<usize>,
    brackets_exhausted: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
            close_bracket: None,
            brackets_exhausted: false,
        }
    }

    fn close_bracket_from(&mut self, from: usize) -> Option<usize> {
        if let Some(at) = self.close_bracket {
            if at >= from {
                return Some(at);
            }
        }
        if self.brackets_exhausted {
            return None;
        }
        match self.input[from..].find(']') {
            Some(offset) => {
                self.close_bracket = Some(from + offset);
                self.close_bracket
            }
            None => {
                self.brackets_exhausted = true;
                None
            }
        }
    }

    /// Tries to read a tag starting with the `[` at `at`.
    fn scan_tag(&mut self, at: usize) -> Option<Token<'a>> {
        let close = self.close_bracket_from(at + 1)?;
        let inner = &self.input[at + 1..close];
        let end = close + 1;

        if quote::is_closer(inner) {
            return Some(Token::new(TokenKind::QuoteClose, at, end));
        }
        if let Some(author) = quote::parse_opener(inner) {
            return Some(Token::new(TokenKind::QuoteOpen { author }, at, end));
        }

        if let Some(name) = inner.strip_prefix('/') {
            let tag = InlineTag::from_name(name)?;
            return Some(Token::new(TokenKind::Close(tag), at, end));
        }

        // Only the head can hold a tag name, so a failed match never reads
        // past it. The remainder may run up to a far away `]`.
        let head = &inner.as_bytes()[..inner.len().min(InlineTag::MAX_NAME_LEN + 1)];
        let (name, argument) = match head.iter().position(|&b| b == b'=') {
            Some(eq) => (&inner[..eq], Some(&inner[eq + 1..])),
            None if inner.len() <= InlineTag::MAX_NAME_LEN => (inner, None),
            None => return None,
        };
        let tag = InlineTag::from_name(name)?;
        if !tag.accepts(argument) {
            return None;
        }
        Some(Token::new(TokenKind::Open { tag, argument }, at, end))
    }

    /// Tries to read any construct starting at `at`.
    fn scan_construct(&mut self, at: usize) -> Option<Token<'a>> {
        let byte = self.input.as_bytes()[at];
        if byte == b'[' {
            return self.scan_tag(at);
        }
        let (smiley, len) = smiley::match_smiley(&self.input[at..])?;
        Some(Token::new(TokenKind::Smiley(smiley), at, at + len))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            self.pos = token.end;
            return Some(token);
        }

        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut at = start;
        while at < bytes.len() {
            let byte = bytes[at];
            if byte == b'[' || smiley::is_trigger(byte) {
                if let Some(token) = self.scan_construct(at) {
                    if at == start {
                        self.pos = token.end;
                        return Some(token);
                    }
                    self.pending = Some(token);
                    self.pos = at;
                    return Some(Token::new(TokenKind::Text, start, at));
                }
            }
            // Triggers are ASCII, so stepping bytewise never stops inside a
            // multi-byte character.
            at += 1;
        }

        self.pos = bytes.len();
        (at > start).then(|| Token::new(TokenKind::Text, start, at))
    }
}
