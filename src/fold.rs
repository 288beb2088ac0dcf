//! Unicode to ASCII folding.
//!
//! Text is canonically decomposed (NFD) first, so accented letters arrive as
//! a base letter followed by combining marks. Marks are stripped, ASCII passes
//! through, a handful of letters with no decomposition get conventional
//! digraphs, and everything else is dropped.

use lazy_static::lazy_static;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Highest code point kept as-is.
pub const MAX_ASCII: char = '\u{7F}';

lazy_static! {
    static ref FOLD_TABLE: HashMap<char, &'static str> = {
        let mut m = HashMap::new();
        m.insert('ß', "ss");
        m.insert('Æ', "AE");
        m.insert('æ', "ae");
        m.insert('Œ', "OE");
        m.insert('œ', "oe");
        m.insert('Ø', "O");
        m.insert('ø', "o");
        m.insert('Þ', "TH");
        m.insert('þ', "th");
        m.insert('Ð', "D");
        m.insert('ð', "d");
        m
    };
}

/// Result of folding a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folded {
    /// No ASCII equivalent, or a combining mark.
    Dropped,
    /// Already ASCII.
    Kept(char),
    /// Replaced by an ASCII digraph or letter from the folding table.
    Replaced(&'static str),
}

impl Folded {
    pub fn push_to(self, out: &mut String) {
        match self {
            Folded::Dropped => {}
            Folded::Kept(c) => out.push(c),
            Folded::Replaced(s) => out.push_str(s),
        }
    }
}

/// Fold one code point of already decomposed text.
pub fn fold_char(c: char) -> Folded {
    if is_combining_mark(c) {
        return Folded::Dropped;
    }

    if c <= MAX_ASCII {
        return Folded::Kept(c);
    }

    match FOLD_TABLE.get(&c).copied() {
        Some(replacement) => Folded::Replaced(replacement),
        None => Folded::Dropped,
    }
}

/// Decompose `text` and fold every code point into the ASCII range.
pub fn fold_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.nfd() {
        fold_char(c).push_to(&mut out);
    }

    out
}
