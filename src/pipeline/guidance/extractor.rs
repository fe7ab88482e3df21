use super::fallback::generic_guidance;
use super::headings::parse_heading_sections;
use super::numbered::parse_numbered_sections;
use super::sanitize::normalize_text;
use crate::models::{DiagnosisContext, Guidance, GuidanceSource};

/// Turn generative-service text into four guidance sections.
///
/// Numbered blocks are parsed first; any section they leave empty is
/// patched from the heading parse. Sections still empty after that carry
/// the `"No data"` sentinel. Absent or blank text, or text from which no
/// section could be filled, yields generic guidance naming the diagnosis.
///
/// Never fails and is deterministic for a given input.
pub fn extract_guidance(raw_text: Option<&str>, context: &DiagnosisContext<'_>) -> Guidance {
    let text = raw_text.map(normalize_text).unwrap_or_default();
    if text.is_empty() {
        tracing::debug!("No guidance text available, using generic guidance");
        return generic(context);
    }

    let mut buckets = parse_numbered_sections(&text);
    if buckets.any_empty() {
        buckets.patch_empty_from(parse_heading_sections(&text));
    }

    if buckets.all_empty() {
        tracing::debug!("Guidance text had no usable content, using generic guidance");
        return generic(context);
    }

    Guidance {
        source: GuidanceSource::Parsed,
        sections: buckets.into_sections(),
    }
}

fn generic(context: &DiagnosisContext<'_>) -> Guidance {
    Guidance {
        source: GuidanceSource::Generic,
        sections: generic_guidance(context.diagnosis).into_sections(),
    }
}
