use crate::models::DiagnosisResult;

/// Questions asked about every detected condition, in section order.
/// The guidance extractor recognises these phrasings as headings.
pub const GUIDANCE_QUESTIONS: [&str; 4] = [
    "What are the common symptoms of this disease?",
    "What are the primary causes of this disease?",
    "How is this disease typically diagnosed?",
    "What treatment options are available for this disease?",
];

/// Build the guidance prompt sent to the generative service.
pub fn build_guidance_prompt(result: &DiagnosisResult) -> String {
    let questions = GUIDANCE_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Patient Report:
Result: {result}
Disease: {disease}
Description: {description}

Provide concise, structured answers with headings to:
{questions}

Constraints:
- 4 Bullet points, short sentences, no fluff.
- Add a brief safety note: this is general information and not medical advice.
- Do NOT provide specific life expectancy; prefer factors influencing outcomes.
"#,
        result = result.diagnosis,
        disease = result.diagnosis.replace('_', " "),
        description = result.summary,
    )
}
