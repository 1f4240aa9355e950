use regex::Regex;
use std::sync::LazyLock;

// CSS identifier: `--` or an optional `-` before a letter, `_` or non-ASCII
// character, then any of those plus digits and `-`.
static HASH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#((?:--|-?[A-Za-z_[^\x00-\x7F]])[A-Za-z0-9_\-[^\x00-\x7F]]*)$")
        .expect("hash pattern compiles")
});

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("integer pattern compiles"));

/// Element id named by a location hash, or `None` when the hash is empty or
/// would not be a valid `#id` selector.
pub fn parse_hash(hash: &str) -> Option<&str> {
    HASH_PATTERN
        .captures(hash)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Leading integer of a slide attribute (`"2"`, `" 3rd"`), falling back to 0.
pub fn parse_slide_index(text: &str) -> i64 {
    LEADING_INT
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(0)
}
