use super::buckets::Buckets;
use super::MAX_GENERIC_POINTS;
use crate::models::SectionKind;

/// Appended to every generic section.
pub const DISCLAIMER: &str = "This is general information, not medical advice.";

/// Name used when the diagnosis label is blank.
const UNNAMED_CONDITION: &str = "this condition";

/// Generic, diagnosis-aware guidance used when no text is available.
///
/// Carries no specific claims about the condition and never states an
/// outcome or life expectancy.
pub fn generic_guidance(diagnosis: &str) -> Buckets {
    let label = display_label(diagnosis);
    let mut buckets = Buckets::new();

    let sections: [(SectionKind, [String; 4]); 4] = [
        (
            SectionKind::Symptoms,
            [
                format!("Symptoms associated with {label} vary from person to person."),
                "Some people notice few or no symptoms in early stages.".to_string(),
                "Keep a record of any changes and share them with a clinician.".to_string(),
                DISCLAIMER.to_string(),
            ],
        ),
        (
            SectionKind::Causes,
            [
                format!("Multiple factors may contribute to {label}."),
                "Genetic, environmental and lifestyle factors can each play a role.".to_string(),
                "Only a qualified professional can assess the cause in an individual case."
                    .to_string(),
                DISCLAIMER.to_string(),
            ],
        ),
        (
            SectionKind::Diagnosis,
            [
                format!(
                    "The automated screening suggested {label}; this is not a confirmed diagnosis."
                ),
                "Confirmation usually involves a clinical examination and further tests."
                    .to_string(),
                "Professional consultation advised.".to_string(),
                DISCLAIMER.to_string(),
            ],
        ),
        (
            SectionKind::Treatment,
            [
                format!("Options for {label} depend on individual circumstances."),
                "Outcomes are influenced by many individual factors.".to_string(),
                "Professional consultation advised before starting or changing any treatment."
                    .to_string(),
                DISCLAIMER.to_string(),
            ],
        ),
    ];

    for (kind, points) in sections {
        for point in points {
            buckets.push(kind, point, MAX_GENERIC_POINTS);
        }
    }
    buckets
}

/// Prediction labels often use underscores (`Mild_Inflammation`).
fn display_label(diagnosis: &str) -> String {
    let label = diagnosis.trim().replace('_', " ");
    if label.is_empty() {
        UNNAMED_CONDITION.to_string()
    } else {
        label
    }
}
