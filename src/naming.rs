//! Identifier derivation from free-text application names.

/// Lowercase ASCII slug of `text`, words joined by `-`.
///
/// Returns `fallback` when `text` has no ASCII alphanumerics, which is the
/// case for names written entirely in CJK script.
#[must_use]
pub fn slugify(text: &str, fallback: &str) -> String {
    let words = ascii_words(text);
    if words.is_empty() {
        return fallback.to_owned();
    }
    words
        .iter()
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `PascalCase` identifier built from the ASCII words of `text`.
///
/// Returns `fallback` when no word is available and prefixes `fallback`
/// when the result would start with a digit.
#[must_use]
pub fn pascal_case(text: &str, fallback: &str) -> String {
    let joined: String = ascii_words(text)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();
    match joined.chars().next() {
        None => fallback.to_owned(),
        Some(first) if first.is_ascii_digit() => format!("{fallback}{joined}"),
        Some(_) => joined,
    }
}

/// Human label for a field key such as `daily_amount`.
#[must_use]
pub fn humanize(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

fn ascii_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}
