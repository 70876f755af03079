//! Named contact extraction
//!
//! Contacts are captured via keyword-anchored patterns (联系人, 负责人,
//! job titles, 姓名/名字) and filtered through validity rules that reject
//! captures shaped like numbers, emails, or phone digits.

use regex::Regex;
use std::collections::HashSet;

/// Extracts contact names from page text
pub struct ContactExtractor {
    patterns: Vec<Regex>,
    rejects: Vec<Regex>,
    letter: Regex,
}

impl ContactExtractor {
    pub fn new() -> Self {
        let patterns = [
            // Keyword with colon: 联系人：张三
            r"(?:联系人|负责人|经理|主管|主任|总监|姓名|名字)[：:]\s*([^\n\r]{1,15})",
            // Longer capture for titled names: 联系人：张三 经理
            r"(?:联系人|负责人|经理|主管|主任|总监)[：:]\s*([^\n\r]{1,20})",
            // Table layout, keyword and name separated by whitespace
            r"(?:联系人|负责人|经理|主管|主任|总监)\s+([^\n\r]{1,15})",
            r"姓名[：:]\s*([^\n\r]{1,15})",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("contact pattern must compile"))
        .collect();

        let rejects = [
            // Pure digits
            r"^\d+$",
            // Email-shaped
            r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
            // Mobile-shaped
            r"^1[3-9]\d{9}$",
            // Landline-shaped
            r"^\d{3,4}-\d{7,8}$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("reject pattern must compile"))
        .collect();

        let letter =
            Regex::new(r"[一-龥a-zA-Z]").expect("letter pattern must compile");

        Self {
            patterns,
            rejects,
            letter,
        }
    }

    /// Returns valid contact strings found in `text`
    ///
    /// Deduplicated within the call, ordered deterministically by
    /// pattern-list order then match position. Pure function.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut contacts = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.captures_iter(text) {
                let Some(capture) = caps.get(1) else {
                    continue;
                };
                let contact = capture.as_str().trim();
                if self.is_valid(contact) && seen.insert(contact.to_string()) {
                    contacts.push(contact.to_string());
                }
            }
        }

        contacts
    }

    /// Validity rules applied to each trimmed capture
    fn is_valid(&self, contact: &str) -> bool {
        if contact.is_empty() {
            return false;
        }

        let char_count = contact.chars().count();
        if !(2..=20).contains(&char_count) {
            return false;
        }

        if self.rejects.iter().any(|p| p.is_match(contact)) {
            return false;
        }

        // Must contain at least one CJK or Latin letter
        self.letter.is_match(contact)
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}
