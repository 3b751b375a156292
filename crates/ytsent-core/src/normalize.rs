//! Text preprocessing applied to every comment before classification.
//!
//! The rules reproduce the preprocessing the sentiment models were trained
//! with. A mismatch does not raise an error; it silently lowers accuracy.

const USER_PLACEHOLDER: &str = "@user";
const LINK_PLACEHOLDER: &str = "http";

/// Replace user mentions and links with the model's placeholders.
///
/// Tokens are split on the single space character and rejoined with single
/// spaces, so runs of spaces and other whitespace survive unchanged.
///
/// - `@name` (any token starting with `@` and longer than one character)
///   becomes `@user`.
/// - Any token starting with `http` becomes `http`.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split(' ')
        .map(normalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_token(token: &str) -> &str {
    if token.starts_with('@') && token.len() > 1 {
        USER_PLACEHOLDER
    } else if token.starts_with(LINK_PLACEHOLDER) {
        LINK_PLACEHOLDER
    } else {
        token
    }
}
