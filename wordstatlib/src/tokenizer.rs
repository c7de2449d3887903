//! Script-aware word and character counting.
//!
//! The tokenizer makes a single left-to-right pass over the text:
//!
//! - A maximal run of [`CharClass::Word`] characters is one word. Apostrophes
//!   and hyphens stay inside the run when a word character follows them, and
//!   `,`/`.` stay inside when they sit between two digits, so `don't`,
//!   `well-known` and `12,345.67` are each one word.
//! - A `-` directly before a digit opens a number (`-42`).
//! - Every [`CharClass::Ideograph`] is a word on its own, so `东京` is two
//!   words and `东京tower` is three.
//! - Everything else separates words and is never counted.

use std::iter::Peekable;
use std::str::Chars;

use crate::script::{classify, CharClass};

/// Count Unicode scalar values in `text`.
pub fn count_characters(text: &str) -> u64 {
    text.chars().count() as u64
}

/// Count words in `text`.
pub fn count_words(text: &str) -> u64 {
    Tokenizer::new(text).count()
}

/// Single-pass word scanner with one character of lookahead.
struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    in_word: bool,
    prev: Option<char>,
    words: u64,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            in_word: false,
            prev: None,
            words: 0,
        }
    }

    fn count(mut self) -> u64 {
        while let Some(c) = self.chars.next() {
            self.visit(c);
            self.prev = Some(c);
        }
        self.words
    }

    fn visit(&mut self, c: char) {
        match classify(c) {
            CharClass::Word => self.start_word(),
            CharClass::Ideograph => {
                self.in_word = false;
                self.words += 1;
            }
            CharClass::Separator => {
                let next = self.chars.peek().copied();
                if self.in_word && self.is_internal(c, next) {
                    return;
                }
                if !self.in_word && is_minus(c) && next.is_some_and(is_word_digit) {
                    self.start_word();
                    return;
                }
                self.in_word = false;
            }
        }
    }

    fn start_word(&mut self) {
        if !self.in_word {
            self.in_word = true;
            self.words += 1;
        }
    }

    /// Whether a separator-class character is allowed inside the current word.
    fn is_internal(&self, c: char, next: Option<char>) -> bool {
        let Some(next) = next else {
            return false;
        };
        if is_apostrophe(c) || is_hyphen(c) {
            return classify(next) == CharClass::Word;
        }
        if c == ',' || c == '.' {
            return self.prev.is_some_and(is_word_digit) && is_word_digit(next);
        }
        false
    }
}

/// Numeric characters of space-delimited scripts. Numeric ideographs such
/// as `〇` are counted as ideographs instead.
fn is_word_digit(c: char) -> bool {
    c.is_numeric() && classify(c) == CharClass::Word
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{02BC}')
}

fn is_hyphen(c: char) -> bool {
    matches!(c, '-' | '\u{2010}' | '\u{2011}')
}

fn is_minus(c: char) -> bool {
    matches!(c, '-' | '\u{2212}')
}
