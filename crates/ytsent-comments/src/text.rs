use std::sync::LazyLock;

use regex::Regex;

/// Emoji, pictograph, dingbat, and enclosed-character ranges.
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}", // emoticons
        r"\x{1F300}-\x{1F5FF}", // symbols & pictographs
        r"\x{1F680}-\x{1F6FF}", // transport & map
        r"\x{1F700}-\x{1F77F}", // alchemical
        r"\x{1F780}-\x{1F7FF}", // geometric shapes extended
        r"\x{1F800}-\x{1F8FF}", // supplemental arrows
        r"\x{1F900}-\x{1F9FF}", // supplemental symbols & pictographs
        r"\x{1FA00}-\x{1FA6F}", // chess
        r"\x{1FA70}-\x{1FAFF}", // symbols & pictographs extended-A
        r"\x{2702}-\x{27B0}",   // dingbats
        r"\x{24C2}",            // circled M
        r"\x{1F100}-\x{1F251}", // enclosed alphanumerics & ideographs
        "]+",
    ))
    .expect("valid emoji regex")
});

/// Remove emojis and pictographic symbols from `text`.
///
/// Letters of every script are kept, including CJK.
#[must_use]
pub fn strip_emojis(text: &str) -> String {
    EMOJI_RE.replace_all(text, "").into_owned()
}
