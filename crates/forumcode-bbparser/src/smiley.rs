//! The fixed smiley vocabulary.
//!
//! Smileys are recognized only inside literal text. Each entry has a
//! canonical shortcut (rendered as the image title) and one or more accepted
//! spellings. Where several spellings match at the same position the longest
//! one wins, so `:-)` is never read as `:-` followed by text.

use crate::escape::escape_into;

/// Directory the smiley images are served from.
pub const SMILEY_PATH: &str = "/images/smileys/";

const SMILEY_CLASS: &str = "inline-block align-middle";

/// One entry of the smiley table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smiley {
    name: &'static str,
    filename: &'static str,
    shortcut: &'static str,
    spellings: &'static [&'static str],
    ignore_case: bool,
}

impl Smiley {
    const fn new(
        name: &'static str,
        filename: &'static str,
        shortcut: &'static str,
        spellings: &'static [&'static str],
        ignore_case: bool,
    ) -> Self {
        Self {
            name,
            filename,
            shortcut,
            spellings,
            ignore_case,
        }
    }

    /// Human readable name, used as the `alt` text.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Image file name below [`SMILEY_PATH`].
    pub fn filename(&self) -> &'static str {
        self.filename
    }

    /// Canonical spelling, used as the `title` attribute.
    pub fn shortcut(&self) -> &'static str {
        self.shortcut
    }

    /// Every spelling that renders as this smiley.
    pub fn spellings(&self) -> &'static [&'static str] {
        self.spellings
    }

    /// Whether spellings match regardless of ASCII case (`:-P` for `:-p`).
    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    /// Image URL of this smiley.
    pub fn src(&self) -> String {
        format!("{}{}", SMILEY_PATH, self.filename)
    }

    /// Appends the `<img>` element for this smiley.
    pub fn write_html(&self, out: &mut String) {
        out.push_str("<img alt=\"");
        escape_into(out, self.name);
        out.push_str("\" title=\"");
        escape_into(out, self.shortcut);
        out.push_str("\" class=\"");
        out.push_str(SMILEY_CLASS);
        out.push_str("\" src=\"");
        out.push_str(SMILEY_PATH);
        escape_into(out, self.filename);
        out.push_str("\" />");
    }

    /// Length of the longest spelling `rest` starts with.
    fn match_len(&self, rest: &str) -> Option<usize> {
        let bytes = rest.as_bytes();
        self.spellings
            .iter()
            .filter(|spelling| {
                let spelling = spelling.as_bytes();
                match bytes.get(..spelling.len()) {
                    Some(head) if self.ignore_case => head.eq_ignore_ascii_case(spelling),
                    Some(head) => head == spelling,
                    None => false,
                }
            })
            .map(|spelling| spelling.len())
            .max()
    }
}

static SMILEYS: &[Smiley] = &[
    Smiley::new("fröhlich", "laechel.gif", ":)", &[":)", ":-)"], false),
    Smiley::new("traurig", "traurig.gif", ":(", &[":(", ":-("], false),
    Smiley::new("zwinker", "zwinker.gif", ";)", &[";)", ";-)"], false),
    Smiley::new("cool", "cool.gif", "8-)", &["8-)"], false),
    Smiley::new("ätsch", "aetsch.gif", ":-p", &[":-p"], true),
    Smiley::new("weinend", "heul.gif", ":cry:", &[":cry:"], false),
    Smiley::new("grins", "grins.gif", ":D", &[":D", ":-D"], true),
    Smiley::new("verwirrt", "verwirrt.gif", ":-s", &[":-s"], true),
    Smiley::new("überrascht", "ueberrascht.gif", ":-O", &[":-o"], true),
    Smiley::new("wütend", "wuetend.gif", ":boese:", &[":boese:"], false),
    Smiley::new("unschuldig", "unschuldig.gif", ":unschuldig:", &[":unschuldig:"], false),
    Smiley::new("hmm", "hmm.gif", ":-/", &[":-/"], false),
    Smiley::new("schäm", "schaem.gif", ":schaem:", &[":schaem:"], false),
    Smiley::new("ausschenken", "ausschenken.gif", ":ausschenken:", &[":ausschenken:"], false),
    Smiley::new("hurra", "hurra.gif", ":hurra:", &[":hurra:"], false),
    Smiley::new("lala", "lala.gif", ":lala:", &[":lala:"], false),
    Smiley::new("lol", "lol.gif", ":lol:", &[":lol:"], false),
    Smiley::new("party", "party.gif", ":party:", &[":party:"], false),
    Smiley::new("stösschen", "stoesschen.gif", ":stoesschen:", &[":stoesschen:"], false),
    Smiley::new("super", "super.gif", ":super:", &[":super:"], false),
    Smiley::new("tröst", "troest.gif", ":troest:", &[":troest:"], false),
    Smiley::new("vogel", "vogel.gif", ":vogel:", &[":vogel:"], false),
    Smiley::new("wink", "wink.gif", ":wink:", &[":wink:"], false),
    Smiley::new("gelage", "gelage.gif", ":gelage:", &[":gelage:"], false),
    Smiley::new("kater", "kater.gif", ":kater:", &[":kater:"], false),
];

/// The complete smiley table, in display order.
pub fn smileys() -> &'static [Smiley] {
    SMILEYS
}

/// Bytes a smiley spelling can start with.
pub(crate) fn is_trigger(byte: u8) -> bool {
    matches!(byte, b':' | b';' | b'8')
}

/// Finds the smiley `rest` starts with, returning it with the matched length.
pub(crate) fn match_smiley(rest: &str) -> Option<(&'static Smiley, usize)> {
    let first = *rest.as_bytes().first()?;
    if !is_trigger(first) {
        return None;
    }

    let mut best: Option<(&'static Smiley, usize)> = None;
    for smiley in SMILEYS {
        if let Some(len) = smiley.match_len(rest) {
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((smiley, len));
            }
        }
    }
    best
}
