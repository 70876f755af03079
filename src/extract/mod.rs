//! Fact extraction from rendered page text
//!
//! Extractors are pure: the same input text always yields the same
//! candidate list. Cross-page deduplication happens in the session
//! ledger, not here.

mod contact;
mod phone;
mod text;

pub use contact::ContactExtractor;
pub use phone::PhoneExtractor;
pub use text::sanitize_text;
