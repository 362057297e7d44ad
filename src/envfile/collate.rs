//! Locale-aware ordering for secret names.
//!
//! Follows the root collation order most desktop locales use for ASCII
//! names: whitespace and punctuation sort before digits, digits before
//! letters, letters compare case-insensitively, and only then does case
//! matter (lowercase first). ASCII punctuation uses the collation table
//! order (`_` before `-` before `.`); other symbols fall back to code
//! point. Plain code-point order breaks any remaining tie.
//!
//! With code-point order `API_KEY` sorts after `APIKEY` because `_` is
//! 0x5F; here it sorts first.

use std::cmp::Ordering;

/// Character class, in collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Punctuation,
    Digit,
    Letter,
}

fn class(c: char) -> Class {
    if c.is_whitespace() {
        Class::Space
    } else if c.is_numeric() {
        Class::Digit
    } else if c.is_alphabetic() {
        Class::Letter
    } else {
        Class::Punctuation
    }
}

/// ASCII punctuation and symbols in root collation order.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary weight of `c` within its class.
fn weight(c: char) -> u32 {
    if let Some(rank) = PUNCTUATION_ORDER.find(c) {
        return rank as u32;
    }
    let folded = c.to_lowercase().next().unwrap_or(c);
    match class(c) {
        // Unranked symbols go after the ranked ones.
        Class::Punctuation => PUNCTUATION_ORDER.len() as u32 + folded as u32,
        _ => folded as u32,
    }
}

/// Compare two secret names the way a locale-aware sort would.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| s.chars().map(|c| (class(c), weight(c))).collect::<Vec<_>>();

    primary(a)
        .cmp(&primary(b))
        .then_with(|| {
            let case = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();
            case(a).cmp(&case(b))
        })
        .then_with(|| a.cmp(b))
}
