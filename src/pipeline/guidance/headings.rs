use super::buckets::Buckets;
use super::keywords::classify_heading;
use super::sanitize::{clean_line, is_banner_line};
use super::MAX_PARSED_POINTS;
use crate::models::SectionKind;

/// Parse text that uses bare headings (`Symptoms:`, `Common causes`) instead
/// of numbered blocks.
///
/// Content lines go to the most recent heading. Heading lines themselves
/// contribute no point, and lines before any heading are held back. If no
/// heading is found at all, every content line is split into four contiguous
/// quarters in canonical order, so this tier never returns empty-handed when
/// the text has content.
pub fn parse_heading_sections(text: &str) -> Buckets {
    let mut buckets = Buckets::new();
    let mut current: Option<SectionKind> = None;
    let mut content_lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let cleaned = clean_line(line);
        if cleaned.is_empty() || is_banner_line(&cleaned) {
            continue;
        }

        match classify_heading(&cleaned) {
            Some(kind) => current = Some(kind),
            None => {
                if let Some(kind) = current {
                    buckets.push(kind, cleaned.clone(), MAX_PARSED_POINTS);
                }
                content_lines.push(cleaned);
            }
        }
    }

    if buckets.all_empty() && !content_lines.is_empty() {
        tracing::debug!(
            lines = content_lines.len(),
            "No guidance headings found, splitting content evenly"
        );
        return split_evenly(content_lines);
    }

    buckets
}

/// Assign lines to the four sections in contiguous quarters of
/// `ceil(n / 4)` lines each.
fn split_evenly(lines: Vec<String>) -> Buckets {
    let mut buckets = Buckets::new();
    let quarter = lines.len().div_ceil(SectionKind::ALL.len()).max(1);

    for (i, line) in lines.into_iter().enumerate() {
        let kind = SectionKind::ALL[(i / quarter).min(SectionKind::ALL.len() - 1)];
        buckets.push(kind, line, MAX_PARSED_POINTS);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_colon_headings() {
        let buckets = parse_heading_sections("Symptoms:\nCough\nCauses:\nViral infection\n");
        assert_eq!(buckets.get(SectionKind::Symptoms), ["Cough"]);
        assert_eq!(buckets.get(SectionKind::Causes), ["Viral infection"]);
        assert!(buckets.is_empty(SectionKind::Diagnosis));
        assert!(buckets.is_empty(SectionKind::Treatment));
    }

    #[test]
    fn recovers_question_headings_with_numbering() {
        let text = "**1. What are the common symptoms of this disease?**
1. Fever
2. Headache
How is this disease typically diagnosed?
* MRI scan";
        let buckets = parse_heading_sections(text);
        assert_eq!(buckets.get(SectionKind::Symptoms), ["Fever", "Headache"]);
        assert_eq!(buckets.get(SectionKind::Diagnosis), ["MRI scan"]);
    }

    #[test]
    fn lines_before_first_heading_are_not_assigned() {
        let buckets = parse_heading_sections("Overview of the condition\nTreatment\nRest");
        assert_eq!(buckets.get(SectionKind::Treatment), ["Rest"]);
        assert!(buckets.is_empty(SectionKind::Symptoms));
    }

    #[test]
    fn heading_line_contributes_no_point() {
        let buckets = parse_heading_sections("Symptoms: Cough\nCauses:\nViral infection");
        assert!(buckets.is_empty(SectionKind::Symptoms));
        assert_eq!(buckets.get(SectionKind::Causes), ["Viral infection"]);
    }

    #[test]
    fn long_heading_switches_section() {
        let text = "Common symptoms of glioma in adults and children
Headache
Nausea
Causes
Genetics";
        let buckets = parse_heading_sections(text);
        assert_eq!(buckets.get(SectionKind::Symptoms), ["Headache", "Nausea"]);
        assert_eq!(buckets.get(SectionKind::Causes), ["Genetics"]);
    }

    #[test]
    fn line_starting_with_keyword_switches_section() {
        let text = "Symptoms\nCough\nTreatment usually involves rest.\nFluids";
        let buckets = parse_heading_sections(text);
        assert_eq!(buckets.get(SectionKind::Symptoms), ["Cough"]);
        assert_eq!(buckets.get(SectionKind::Treatment), ["Fluids"]);
    }

    #[test]
    fn mid_sentence_keyword_does_not_switch_section() {
        let text = "Symptoms\nHeadache\nThis may also affect treatment choices later on\nNausea";
        let buckets = parse_heading_sections(text);
        assert_eq!(buckets.get(SectionKind::Symptoms).len(), 3);
        assert!(buckets.is_empty(SectionKind::Treatment));
    }

    #[test]
    fn prose_without_headings_is_quartered() {
        let text = "Line one\nLine two\nLine three\nLine four\n\
                    Line five\nLine six\nLine seven\nLine eight";
        let buckets = parse_heading_sections(text);
        assert_eq!(buckets.get(SectionKind::Symptoms), ["Line one", "Line two"]);
        assert_eq!(buckets.get(SectionKind::Causes), ["Line three", "Line four"]);
        assert_eq!(buckets.get(SectionKind::Diagnosis), ["Line five", "Line six"]);
        assert_eq!(buckets.get(SectionKind::Treatment), ["Line seven", "Line eight"]);
    }

    #[test]
    fn quarter_size_uses_ceiling_division() {
        let text = "a\nb\nc\nd\ne\nf\ng";
        let buckets = parse_heading_sections(text);
        assert_eq!(buckets.get(SectionKind::Symptoms), ["a", "b"]);
        assert_eq!(buckets.get(SectionKind::Causes), ["c", "d"]);
        assert_eq!(buckets.get(SectionKind::Diagnosis), ["e", "f"]);
        assert_eq!(buckets.get(SectionKind::Treatment), ["g"]);
    }

    #[test]
    fn single_line_goes_to_first_section() {
        let buckets = parse_heading_sections("Only one statement here.");
        assert_eq!(buckets.get(SectionKind::Symptoms), ["Only one statement here."]);
        assert!(buckets.is_empty(SectionKind::Causes));
    }

    #[test]
    fn headings_without_content_stay_empty() {
        assert!(parse_heading_sections("Symptoms:\nCauses:\n").all_empty());
    }

    #[test]
    fn quarters_are_capped() {
        let text: String = (0..60).map(|i| format!("line {i}\n")).collect();
        let buckets = parse_heading_sections(&text);
        assert_eq!(buckets.get(SectionKind::Symptoms).len(), MAX_PARSED_POINTS);
        assert_eq!(buckets.get(SectionKind::Symptoms)[0], "line 0");
        assert_eq!(buckets.get(SectionKind::Causes)[0], "line 15");
    }
}
