//! Text segmentation into typed, lossless spans.
//!
//! A single left-to-right scan; at each position the longest run of the
//! current character class is consumed, with word > whitespace > punctuation
//! > other priority. Concatenating the token texts always reproduces the
//! input byte-for-byte.
//!
//! Digits are deliberately outside the punctuation class: a catch-all
//! "non-word" symbol class that swallows digits silently drops page numbers
//! and verse references.

use crate::models::{Token, TokenKind};

/// Extended IAST letters accepted inside word tokens, both cases
const IAST_LETTERS: &str = "āīūṛṝḷḹṅñṭḍṇśṣṁṃḥåĀĪŪṚṜḶḸṄÑṬḌṆŚṢṀṂḤÅ";

/// Whether a character belongs to the word-candidate alphabet
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || IAST_LETTERS.contains(c)
}

fn is_punctuation_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_alphanumeric() && c != '_' && !is_word_char(c)
}

/// Split `text` into an ordered sequence of typed spans.
///
/// Guarantee: no character is dropped, duplicated, or reordered. Characters
/// claimed by no class (digits, underscores, letters outside the word
/// alphabet) become `Other` tokens; ASCII digit runs are kept together,
/// everything else one character at a time.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let c = match text[pos..].chars().next() {
            Some(c) => c,
            None => break,
        };

        let (kind, end) = if is_word_char(c) {
            (TokenKind::Word, scan_run(text, pos, is_word_char))
        } else if c.is_whitespace() {
            (TokenKind::Whitespace, scan_run(text, pos, char::is_whitespace))
        } else if is_punctuation_char(c) {
            (TokenKind::Punctuation, scan_run(text, pos, is_punctuation_char))
        } else if c.is_ascii_digit() {
            (TokenKind::Other, scan_run(text, pos, |c| c.is_ascii_digit()))
        } else {
            (TokenKind::Other, pos + c.len_utf8())
        };

        tokens.push(Token {
            kind,
            text: text[pos..end].to_string(),
            start: pos,
            end,
        });
        pos = end;
    }

    tokens
}

/// Byte offset of the end of the run starting at `start` whose characters
/// all satisfy `pred`
fn scan_run(text: &str, start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    for c in text[start..].chars() {
        if !pred(c) {
            break;
        }
        end += c.len_utf8();
    }
    end
}
