//! Shorthand code parsing.
//!
//! Players name cards with short codes: a color letter followed by a
//! suffix (`r5`, `gs`, `br`, `y+2`), or `j` / `j+4` for wild cards.
//! Codes are case-insensitive; `w`, `w+4` and a bare `+4` are accepted as
//! aliases for the wild codes.

use super::card::WILD_PREFIX;
use super::color::Color;

/// Most codes accepted in one command (a double play).
pub const MAX_TOKENS: usize = 2;

/// Normalize a code to its canonical form, or `None` if it is not
/// well-formed.
///
/// A well-formed code may still name a card that does not exist (`r+4`);
/// the deck lookup decides that.
///
/// ```
/// use rust_uno::cards::canonical_code;
///
/// assert_eq!(canonical_code("R5").as_deref(), Some("r5"));
/// assert_eq!(canonical_code("w+4").as_deref(), Some("j+4"));
/// assert_eq!(canonical_code("x5"), None);
/// ```
#[must_use]
pub fn canonical_code(token: &str) -> Option<String> {
    let code = token.trim().to_ascii_lowercase();
    let code = match code.as_str() {
        "w" => WILD_PREFIX.to_string(),
        "+4" | "w+4" => format!("{WILD_PREFIX}+4"),
        _ => code,
    };

    let mut chars = code.chars();
    let prefix = chars.next()?;
    let suffix = chars.as_str();

    if prefix == WILD_PREFIX {
        return (suffix.is_empty() || is_draw_suffix(suffix)).then_some(code);
    }

    Color::from_letter(prefix)?;
    let valid = match suffix {
        "s" | "r" => true,
        s if s.len() == 1 => s.chars().all(|c| c.is_ascii_digit()),
        s => is_draw_suffix(s),
    };
    valid.then_some(code)
}

fn is_draw_suffix(suffix: &str) -> bool {
    suffix
        .strip_prefix('+')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Split a command argument into at most two card codes.
///
/// Codes may be separated by whitespace or written back to back:
/// `"r5 r5"` and `"r5r5"` both give `["r5", "r5"]`. Each code is one or
/// two letters followed by an optional `+` and digits. Anything after the
/// second code is ignored.
///
/// ```
/// use rust_uno::cards::split_tokens;
///
/// assert_eq!(split_tokens("r5r5"), vec!["r5", "r5"]);
/// assert_eq!(split_tokens("j+4"), vec!["j+4"]);
/// assert_eq!(split_tokens("   "), Vec::<String>::new());
/// ```
#[must_use]
pub fn split_tokens(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::with_capacity(MAX_TOKENS);
    let mut i = 0;

    while i < chars.len() && tokens.len() < MAX_TOKENS {
        if chars[i].is_whitespace() || chars[i] == ',' {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && i - start < 2 && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        let letters = i - start;

        let mut j = i;
        if j < chars.len() && chars[j] == '+' {
            j += 1;
        }
        let digits_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            i = j;
        }

        if i == start || (letters == 0 && chars[start] != '+') {
            // Not a code; stop at the first garbage character.
            break;
        }
        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}
