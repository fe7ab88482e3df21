//! Keyword tables that map heading text to a canonical section.
//!
//! Two matching modes are used:
//! - numbered-block titles: case-insensitive substring containment
//! - bare heading lines: anchored prefix match on the cleaned line
//!
//! Both check sections in canonical order and the first hit wins, so a
//! title such as "Diagnosis of symptoms" lands in Symptoms. That is a known
//! limitation of substring matching and is kept as-is.

use crate::models::SectionKind;

/// Substrings that classify a numbered block title.
const TITLE_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (SectionKind::Symptoms, &["symptom", "signs"]),
    (
        SectionKind::Causes,
        &["cause", "risk factor", "etiolog", "aetiolog"],
    ),
    (SectionKind::Diagnosis, &["diagnos"]),
    (SectionKind::Treatment, &["treat", "therap", "management"]),
];

/// Prefixes that make a short line a heading.
const HEADING_PREFIXES: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Symptoms,
        &[
            "symptom",
            "signs",
            "common symptoms",
            "common signs",
            "key symptoms",
            "main symptoms",
        ],
    ),
    (
        SectionKind::Causes,
        &[
            "cause",
            "primary causes",
            "common causes",
            "main causes",
            "possible causes",
            "risk factors",
            "etiology",
            "aetiology",
        ],
    ),
    (SectionKind::Diagnosis, &["diagnos", "how it is diagnosed"]),
    (
        SectionKind::Treatment,
        &[
            "treat",
            "treatment options",
            "management",
            "therapy",
            "therapies",
        ],
    ),
];

/// Question forms, matching the prompt we send. These are headings at any length.
const HEADING_QUESTIONS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Symptoms,
        &[
            "what are the common symptoms",
            "what are the symptoms",
            "what are the signs",
        ],
    ),
    (
        SectionKind::Causes,
        &[
            "what are the primary causes",
            "what are the causes",
            "what causes",
        ],
    ),
    (
        SectionKind::Diagnosis,
        &[
            "how is this disease typically diagnosed",
            "how is this disease diagnosed",
            "how is it diagnosed",
            "how is this diagnosed",
        ],
    ),
    (
        SectionKind::Treatment,
        &[
            "what treatment options are available",
            "what are the treatment options",
            "how is this disease treated",
            "how is it treated",
        ],
    ),
];

/// Classify a numbered block title by substring containment.
pub fn classify_title(title: &str) -> Option<SectionKind> {
    let lower = title.to_lowercase();
    TITLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(kind, _)| *kind)
}

/// Classify a cleaned line as a section heading.
///
/// The line is trimmed, stripped of trailing colons and dashes, lowercased
/// and matched against the heading prefixes. Matching is anchored at the
/// start of the line: a keyword appearing mid-sentence never makes a heading.
pub fn classify_heading(cleaned: &str) -> Option<SectionKind> {
    let stripped = strip_heading_suffix(cleaned);
    if stripped.is_empty() {
        return None;
    }
    let lower = stripped.to_lowercase();
    match_prefix(HEADING_QUESTIONS, &lower).or_else(|| match_prefix(HEADING_PREFIXES, &lower))
}

fn match_prefix(table: &[(SectionKind, &[&str])], lower: &str) -> Option<SectionKind> {
    table
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| lower.starts_with(p)))
        .map(|(kind, _)| *kind)
}

/// Drop trailing colons, dashes and stray emphasis from a heading.
fn strip_heading_suffix(text: &str) -> &str {
    text.trim().trim_end_matches(|c: char| {
        matches!(c, ':' | '-' | '–' | '—' | '*') || c.is_whitespace()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_from_prompt_questions_classify() {
        assert_eq!(
            classify_title("What are the common symptoms of this disease?"),
            Some(SectionKind::Symptoms)
        );
        assert_eq!(
            classify_title("What are the primary causes of this disease?"),
            Some(SectionKind::Causes)
        );
        assert_eq!(
            classify_title("How is this disease typically diagnosed?"),
            Some(SectionKind::Diagnosis)
        );
        assert_eq!(
            classify_title("What treatment options are available for this disease?"),
            Some(SectionKind::Treatment)
        );
    }

    #[test]
    fn unrelated_title_is_unclassified() {
        assert_eq!(classify_title("Safety note"), None);
        assert_eq!(classify_title("Outlook"), None);
    }

    #[test]
    fn substring_match_prefers_earlier_section() {
        // Known limitation: first section in canonical order wins.
        assert_eq!(
            classify_title("Diagnosis of symptoms"),
            Some(SectionKind::Symptoms)
        );
        assert_eq!(
            classify_title("Causes and diagnosis"),
            Some(SectionKind::Causes)
        );
    }

    #[test]
    fn bare_headings_classify() {
        assert_eq!(classify_heading("Symptoms:"), Some(SectionKind::Symptoms));
        assert_eq!(classify_heading("Common Symptoms"), Some(SectionKind::Symptoms));
        assert_eq!(classify_heading("Treatment Options -"), Some(SectionKind::Treatment));
        assert_eq!(
            classify_heading("How is this disease typically diagnosed?"),
            Some(SectionKind::Diagnosis)
        );
    }

    #[test]
    fn heading_ignores_text_after_colon() {
        assert_eq!(
            classify_heading("Treatment: Rest and monitoring."),
            Some(SectionKind::Treatment)
        );
    }

    #[test]
    fn keyword_mid_sentence_is_not_heading() {
        assert_eq!(classify_heading("Common early symptoms include fever"), None);
        assert_eq!(classify_heading("Fever is one of the symptoms"), None);
        assert_eq!(classify_heading("Rest helps treatment succeed"), None);
    }

    #[test]
    fn any_line_starting_with_keyword_is_heading() {
        assert_eq!(
            classify_heading("Treatment usually involves rest."),
            Some(SectionKind::Treatment)
        );
        assert_eq!(
            classify_heading("Common symptoms of glioma in adults and children"),
            Some(SectionKind::Symptoms)
        );
        assert_eq!(classify_heading("  Causes --"), Some(SectionKind::Causes));
    }

    #[test]
    fn plain_content_is_not_heading() {
        assert_eq!(classify_heading("Cough"), None);
        assert_eq!(classify_heading("Viral infection"), None);
        assert_eq!(classify_heading("Note: consult a doctor"), None);
        assert_eq!(classify_heading(":-"), None);
    }
}
