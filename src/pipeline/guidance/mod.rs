//! Guidance extraction: free text from the generative service into four
//! display-ready sections (Symptoms, Causes, Diagnosis, Treatment).
//!
//! Three tiers, from most to least structured:
//! 1. numbered blocks (`1. What are the common symptoms ...`)
//! 2. bare headings, or an even split of heading-less prose
//! 3. generic placeholder guidance when no text is available
//!
//! Extraction is total: every input yields exactly four sections.

pub mod buckets;
pub mod extractor;
pub mod fallback;
pub mod headings;
pub mod keywords;
pub mod numbered;
pub mod sanitize;

pub use extractor::*;
pub use sanitize::{clean_line, normalize_text};

/// Maximum points kept per section when parsing text.
pub const MAX_PARSED_POINTS: usize = 12;

/// Points per section in generic guidance.
pub const MAX_GENERIC_POINTS: usize = 4;
