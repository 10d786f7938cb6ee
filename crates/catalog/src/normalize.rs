use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Literal rewrites applied after lowercasing.
///
/// Every pattern contains a character outside `[a-z0-9 ]`, so none of them can
/// fire on already-normalized text.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    // apostrophe forms collapse into one word
    ("farfetch'd", "farfetchd"),
    ("farfetch\u{2019}d", "farfetchd"),
    ("sirfetch'd", "sirfetchd"),
    ("sirfetch\u{2019}d", "sirfetchd"),
    // honorifics
    ("mr.", "mr "),
    ("jr.", "jr "),
    ("type: null", "type null"),
    // gendered suffixes
    ("\u{2640}", " f "),
    ("\u{2642}", " m "),
    ("(female)", " f "),
    ("(male)", " m "),
];

fn non_alnum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("non-alphanumeric regex must compile"))
}

/// Canonicalize free text into ASCII-lowercase words separated by single spaces.
///
/// The same function keys the catalog and builds project haystacks; matching
/// relies on both sides going through it.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let mut lowered = folded.to_lowercase();

    for (pattern, replacement) in SUBSTITUTIONS {
        if lowered.contains(pattern) {
            lowered = lowered.replace(pattern, replacement);
        }
    }

    non_alnum_re()
        .replace_all(&lowered, " ")
        .trim()
        .to_string()
}
