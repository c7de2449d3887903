//! Script classification tables.
//!
//! Characters are classified by looking them up in a sorted table of
//! inclusive code point ranges. Keeping the ranges as data lets the tokenizer
//! stay a short state machine and lets the tables be audited on their own.

/// How a character participates in word counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letter, digit, or mark of a script that separates words with spaces.
    /// A maximal run of these is one word.
    Word,
    /// Character of a script written without inter-word spaces (CJK
    /// ideographs, Hiragana, Katakana). Each one is a word on its own.
    Ideograph,
    /// Whitespace, punctuation, symbols. Ends the current word.
    Separator,
}

/// Inclusive code point range with its class.
#[derive(Debug, Clone, Copy)]
struct ScriptRange {
    start: u32,
    end: u32,
    class: CharClass,
}

const fn word(start: u32, end: u32) -> ScriptRange {
    ScriptRange {
        start,
        end,
        class: CharClass::Word,
    }
}

const fn ideo(start: u32, end: u32) -> ScriptRange {
    ScriptRange {
        start,
        end,
        class: CharClass::Ideograph,
    }
}

/// Sorted, non-overlapping ranges. Anything not listed here falls back to
/// `char::is_alphanumeric` (Word) or Separator.
static SCRIPT_RANGES: &[ScriptRange] = &[
    // Basic Latin digits and letters
    word(0x0030, 0x0039),
    word(0x0041, 0x005A),
    word(0x0061, 0x007A),
    // Latin-1 letters
    word(0x00AA, 0x00AA),
    word(0x00B5, 0x00B5),
    word(0x00BA, 0x00BA),
    word(0x00C0, 0x00D6),
    word(0x00D8, 0x00F6),
    word(0x00F8, 0x024F),
    // IPA, spacing modifiers, combining diacritics
    word(0x0250, 0x036F),
    // Greek and Coptic
    word(0x0370, 0x037D),
    word(0x037F, 0x0386),
    word(0x0388, 0x03FF),
    // Cyrillic and Cyrillic Supplement
    word(0x0400, 0x052F),
    // Armenian
    word(0x0531, 0x0556),
    word(0x0559, 0x0559),
    word(0x0560, 0x0588),
    // Hebrew
    word(0x0591, 0x05BD),
    word(0x05BF, 0x05BF),
    word(0x05C1, 0x05C2),
    word(0x05C4, 0x05C5),
    word(0x05C7, 0x05C7),
    word(0x05D0, 0x05F2),
    // Arabic
    word(0x0610, 0x061A),
    word(0x0620, 0x0669),
    word(0x066E, 0x06D3),
    word(0x06D5, 0x06FF),
    // Syriac, Arabic Supplement, Thaana
    word(0x0710, 0x07BF),
    // Indic scripts (Devanagari through Malayalam), minus the dandas
    word(0x0900, 0x0963),
    word(0x0966, 0x0D7F),
    // Sinhala, Thai, Lao, Tibetan, Myanmar
    word(0x0D80, 0x109F),
    // Georgian
    word(0x10A0, 0x10FF),
    // Hangul Jamo
    word(0x1100, 0x11FF),
    // Ethiopic
    word(0x1200, 0x137F),
    // Cherokee
    word(0x13A0, 0x13FF),
    // Latin Extended Additional, Greek Extended
    word(0x1E00, 0x1FFF),
    // Latin Extended-C
    word(0x2C60, 0x2C7F),
    // Cyrillic Extended-A
    word(0x2DE0, 0x2DFF),
    // CJK Radicals Supplement, Kangxi Radicals
    ideo(0x2E80, 0x2FDF),
    // Ideographic iteration mark, closing mark, number zero
    ideo(0x3005, 0x3007),
    // Hiragana
    ideo(0x3041, 0x309F),
    // Katakana, minus the middle dot
    ideo(0x30A1, 0x30FA),
    ideo(0x30FC, 0x30FF),
    // Hangul Compatibility Jamo
    word(0x3130, 0x318F),
    // Katakana Phonetic Extensions
    ideo(0x31F0, 0x31FF),
    // CJK Unified Ideographs Extension A
    ideo(0x3400, 0x4DBF),
    // CJK Unified Ideographs
    ideo(0x4E00, 0x9FFF),
    // Cyrillic Extended-B
    word(0xA640, 0xA69F),
    // Latin Extended-D
    word(0xA720, 0xA7FF),
    // Hangul Syllables
    word(0xAC00, 0xD7AF),
    // CJK Compatibility Ideographs
    ideo(0xF900, 0xFAFF),
    // Alphabetic and Arabic Presentation Forms-A
    word(0xFB00, 0xFDFF),
    // Arabic Presentation Forms-B
    word(0xFE70, 0xFEFF),
    // Fullwidth digits and Latin letters
    word(0xFF10, 0xFF19),
    word(0xFF21, 0xFF3A),
    word(0xFF41, 0xFF5A),
    // Halfwidth Katakana
    ideo(0xFF66, 0xFF9F),
    // CJK Extensions B-F and Compatibility Supplement
    ideo(0x20000, 0x2FA1F),
    // CJK Extensions G-H
    ideo(0x30000, 0x323AF),
];

/// Classify a single character.
pub fn classify(c: char) -> CharClass {
    let cp = c as u32;
    let found = SCRIPT_RANGES.binary_search_by(|range| {
        if range.end < cp {
            std::cmp::Ordering::Less
        } else if range.start > cp {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });

    match found {
        Ok(idx) => SCRIPT_RANGES[idx].class,
        Err(_) if c.is_alphanumeric() => CharClass::Word,
        Err(_) => CharClass::Separator,
    }
}
