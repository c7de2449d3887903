//! Content filter pipeline.
//!
//! Produces the slice of a document that is actually measured. The passes
//! run in a fixed order, each one on the output of the previous one:
//!
//! 1. contraction normalization (`it's` → `it`)
//! 2. frontmatter removal (leading `---` block)
//! 3. comment removal (`%%…%%` regions)
//!
//! Passes that are disabled in the [`StatsConfig`] are skipped, and when
//! nothing is enabled the input is returned borrowed and unchanged.

use std::borrow::Cow;

use crate::options::StatsConfig;
use crate::script::{classify, CharClass};

/// Text left after filtering; handed straight to the tokenizer.
pub type FilteredText<'a> = Cow<'a, str>;

/// Delimiter line that opens and closes a frontmatter block
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Marker that opens and closes an inline comment block
pub const COMMENT_MARKER: &str = "%%";

/// Word endings dropped by contraction normalization, longest first.
const CONTRACTION_SUFFIXES: &[&str] = &["ll", "ve", "re", "s", "d", "m"];

/// Run every enabled pass over `text`.
pub fn filter<'a>(text: &'a str, config: &StatsConfig) -> FilteredText<'a> {
    let mut out = Cow::Borrowed(text);

    if config.ignore_contractions {
        out = chain(out, strip_contractions);
    }
    if config.ignore_frontmatter {
        out = chain(out, strip_frontmatter);
    }
    if config.ignore_comments {
        out = chain(out, strip_comments);
    }

    out
}

/// Apply one pass, staying borrowed as long as no earlier pass allocated.
fn chain<'a>(input: Cow<'a, str>, pass: for<'b> fn(&'b str) -> Cow<'b, str>) -> Cow<'a, str> {
    match input {
        Cow::Borrowed(s) => pass(s),
        Cow::Owned(s) => Cow::Owned(pass(&s).into_owned()),
    }
}

/// Remove `'s`, `'d`, `'ll`, `'ve`, `'re` and `'m` where they end a word.
///
/// Matching is case-insensitive and accepts both the ASCII apostrophe and
/// the typographic one (`’`). The ending must follow a word character and be
/// followed by the end of the text or a non-word character.
pub fn strip_contractions(text: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut copied_to = 0;
    let mut prev: Option<char> = None;

    for (idx, c) in text.char_indices() {
        let is_candidate = matches!(c, '\'' | '\u{2019}')
            && prev.is_some_and(|p| classify(p) == CharClass::Word)
            && idx >= copied_to;
        prev = Some(c);
        if !is_candidate {
            continue;
        }

        let rest = &text[idx + c.len_utf8()..];
        if let Some(len) = contraction_suffix_len(rest) {
            out.push_str(&text[copied_to..idx]);
            copied_to = idx + c.len_utf8() + len;
        }
    }

    if copied_to == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied_to..]);
    Cow::Owned(out)
}

/// Byte length of a contraction ending at the start of `rest`, if one is there.
fn contraction_suffix_len(rest: &str) -> Option<usize> {
    CONTRACTION_SUFFIXES.iter().find_map(|suffix| {
        let head = rest.get(..suffix.len())?;
        if !head.eq_ignore_ascii_case(suffix) {
            return None;
        }
        let ends_word = rest[suffix.len()..]
            .chars()
            .next()
            .is_none_or(|next| classify(next) != CharClass::Word);
        ends_word.then_some(suffix.len())
    })
}

/// Remove a frontmatter block at the very start of the text.
///
/// The first line must be exactly `---` (trailing whitespace allowed). The
/// block runs through the end of the line holding the next `---`. Without a
/// closing delimiter the whole text is dropped.
pub fn strip_frontmatter(text: &str) -> Cow<'_, str> {
    let (first_line, body_start) = match text.find('\n') {
        Some(nl) => (&text[..nl], nl + 1),
        None => (text, text.len()),
    };
    if first_line.trim_end() != FRONTMATTER_DELIMITER {
        return Cow::Borrowed(text);
    }

    let Some(close) = text[body_start..].find(FRONTMATTER_DELIMITER) else {
        log::debug!("unterminated frontmatter, dropping the whole document");
        return Cow::Borrowed("");
    };

    let close = body_start + close;
    let end = match text[close..].find('\n') {
        Some(nl) => close + nl + 1,
        None => text.len(),
    };
    Cow::Borrowed(&text[end..])
}

/// Remove every `%%…%%` region, including ones that span lines.
///
/// Regions are matched left to right without overlap. A marker with no
/// partner is left in place.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find(COMMENT_MARKER) {
        let open = cursor + open;
        let after_open = open + COMMENT_MARKER.len();
        let Some(close) = text[after_open..].find(COMMENT_MARKER) else {
            break;
        };
        out.push_str(&text[cursor..open]);
        cursor = after_open + close + COMMENT_MARKER.len();
    }

    if cursor == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[cursor..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn all_passes() -> StatsConfig {
        StatsConfig::unfiltered()
            .with_ignore_contractions(true)
            .with_ignore_frontmatter(true)
            .with_ignore_comments(true)
    }

    #[test]
    fn test_contractions_are_removed() {
        assert_eq!(strip_contractions("it's"), "it");
        assert_eq!(strip_contractions("We'll see, they've gone"), "We see, they gone");
        assert_eq!(strip_contractions("I'M HERE"), "I HERE");
        assert_eq!(strip_contractions("you’re"), "you");
        assert_eq!(strip_contractions("she'd've"), "she");
    }

    #[test]
    fn test_contractions_only_at_word_end() {
        assert_eq!(strip_contractions("'simple' quotes"), "'simple' quotes");
        assert_eq!(strip_contractions("the 'm' key"), "the 'm' key");
        assert_eq!(strip_contractions("o'sullivan"), "o'sullivan");
        assert_eq!(strip_contractions("rock 'n' roll"), "rock 'n' roll");
    }

    #[test]
    fn test_contractions_untouched_text_is_borrowed() {
        assert!(matches!(strip_contractions("plain words"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_frontmatter_is_removed() {
        assert_eq!(strip_frontmatter("---\na: 1\n---\nBody text"), "Body text");
        assert_eq!(strip_frontmatter("---\r\na: 1\r\n---\r\nBody"), "Body");
        assert_eq!(strip_frontmatter("---\na: 1\n---"), "");
    }

    #[test]
    fn test_frontmatter_must_open_the_document() {
        let text = "Intro\n---\na: 1\n---\nBody";
        assert_eq!(strip_frontmatter(text), text);
        let text = "----\nnot frontmatter\n---\n";
        assert_eq!(strip_frontmatter(text), text);
    }

    #[test]
    fn test_unterminated_frontmatter_drops_everything() {
        assert_eq!(strip_frontmatter("---\nno closing"), "");
        assert_eq!(strip_frontmatter("---"), "");
    }

    #[test]
    fn test_comments_are_removed() {
        assert_eq!(strip_comments("before %%hidden%% after"), "before  after");
        assert_eq!(strip_comments("a %%multi\nline\n%% b"), "a  b");
        assert_eq!(strip_comments("%%one%% x %%two%%"), " x ");
        assert_eq!(strip_comments("%%%%"), "");
    }

    #[test]
    fn test_unmatched_comment_marker_is_kept() {
        assert_eq!(strip_comments("50%% off"), "50%% off");
        assert_eq!(strip_comments("%%a%% and %%b"), " and %%b");
    }

    #[test]
    fn test_pipeline_order_contractions_before_frontmatter() {
        let text = "---\ntitle: it's\n---\nit's %%note%%here";
        let filtered = filter(text, &all_passes());
        assert_eq!(filtered, "it here");
    }

    #[test]
    fn test_pipeline_respects_disabled_passes() {
        let text = "---\na: 1\n---\nit's %%x%%";
        let config = StatsConfig::unfiltered().with_ignore_comments(true);
        assert_eq!(filter(text, &config), "---\na: 1\n---\nit's ");
    }

    #[test]
    fn test_pipeline_is_identity_when_disabled() {
        let text = "---\nit's %%x%%\n---";
        let filtered = filter(text, &StatsConfig::unfiltered());
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered, text);
    }

    proptest! {
        #[test]
        fn test_disabled_pipeline_is_identity(text in "\\PC*") {
            let config = StatsConfig::unfiltered();
            let once = filter(&text, &config).into_owned();
            prop_assert_eq!(&once, &text);
            prop_assert_eq!(filter(&once, &config).into_owned(), once);
        }

        #[test]
        fn test_comment_pass_is_idempotent(text in "[a-z %\\n]*") {
            let once = strip_comments(&text).into_owned();
            let twice = strip_comments(&once).into_owned();
            if !once.contains(COMMENT_MARKER) {
                prop_assert_eq!(twice, once);
            }
        }
    }
}
