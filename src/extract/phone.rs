//! Chinese mobile number extraction
//!
//! Candidate numbers are matched against an ordered pattern list, then
//! filtered through two false-positive heuristics: a digit-boundary rule
//! (a match may not be a sub-span of a longer digit run) and a filename
//! rule (numbers embedded in asset filenames are noise).

use regex::Regex;
use std::collections::HashSet;

/// File extensions that mark a surrounding digit run as a filename
const FILE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
];

/// Extracts 11-digit Chinese mobile numbers from page text
pub struct PhoneExtractor {
    patterns: Vec<Regex>,
}

impl PhoneExtractor {
    pub fn new() -> Self {
        // Ordered: the bare form first, then decorated variants
        let patterns = [
            r"1[3-9]\d{9}",
            r"\+86\s*1[3-9]\d{9}",
            r"86\s*1[3-9]\d{9}",
            r"1[3-9]\d\s*\d{4}\s*\d{4}",
            r"1[3-9]\d-\d{4}-\d{4}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("phone pattern must compile"))
        .collect();

        Self { patterns }
    }

    /// Returns normalized 11-digit numbers found in `text`
    ///
    /// The result is deduplicated within the call and ordered
    /// deterministically: pattern-list order, then match position.
    /// Pure function: the same text always yields the same list.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut phones = Vec::new();

        for pattern in &self.patterns {
            let mut at = 0;
            while let Some(m) = pattern.find_at(text, at) {
                if digit_adjacent(text, m.start(), m.end()) {
                    // A digit run continues past the match. Resume one byte
                    // in, so an inner candidate starting later can still be
                    // considered (match starts are always ASCII).
                    at = m.start() + 1;
                    continue;
                }
                at = m.end();

                let normalized = normalize(m.as_str());
                if normalized.len() != 11 || !normalized.starts_with('1') {
                    continue;
                }
                if is_filename_part(&normalized, text) {
                    continue;
                }
                if seen.insert(normalized.clone()) {
                    phones.push(normalized);
                }
            }
        }

        phones
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips spaces, hyphens, and the +86/86 decoration leader
fn normalize(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+' && *c != '-')
        .collect();

    match digits.strip_prefix("86") {
        Some(rest) if rest.len() == 11 => rest.to_string(),
        _ => digits,
    }
}

/// True if the character immediately before or after the span is a digit
fn digit_adjacent(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit());
    let after = text[end..].chars().next().is_some_and(|c| c.is_ascii_digit());
    before || after
}

/// True if the number looks like part of a filename or longer digit run
///
/// Checks a window of 10 chars before and 21 chars from the number's
/// first occurrence for known file extensions, then re-checks for digits
/// on both sides of the span (normalization can hide a longer run from
/// the boundary rule when separators were stripped).
fn is_filename_part(phone: &str, text: &str) -> bool {
    let Some(pos) = text.find(phone) else {
        return false;
    };

    let window = char_window(text, pos, 10, 21).to_lowercase();
    if FILE_EXTENSIONS.iter().any(|ext| window.contains(ext)) {
        return true;
    }

    let before = text[..pos].chars().next_back();
    let after = text[pos + phone.len()..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}

/// Char-counted slice around byte position `pos` (which must lie on a
/// char boundary); clamps at both ends of the text
fn char_window(text: &str, pos: usize, before: usize, after: usize) -> &str {
    let mut start = pos;
    for _ in 0..before {
        match text[..start].chars().next_back() {
            Some(c) => start -= c.len_utf8(),
            None => break,
        }
    }

    let mut end = pos;
    let mut forward = text[pos..].chars();
    for _ in 0..after {
        match forward.next() {
            Some(c) => end += c.len_utf8(),
            None => break,
        }
    }

    &text[start..end]
}
