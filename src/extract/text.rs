//! Title and snippet sanitization

/// Strips non-semantic characters from extracted titles and snippets
///
/// Keeps CJK ideographs (U+4E00..U+9FA5), ASCII letters and digits,
/// whitespace, full- and half-width colons, and both parenthesis styles.
/// Whitespace runs collapse to a single space.
pub fn sanitize_text(text: &str) -> String {
    let kept: String = text.chars().filter(|&c| is_kept(c)).collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kept(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fa5}')
        || c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '：' | ':' | '(' | ')' | '（' | '）')
}
