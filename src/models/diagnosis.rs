use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when the prediction service omits one.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Labels such as `No_Disease` or `no tumor` mean the scan is clear.
static NO_DISEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^no[\s_]").expect("valid regex"));

/// Whether a prediction label indicates that no disease was found.
pub fn is_no_disease(label: &str) -> bool {
    NO_DISEASE_RE.is_match(label.trim())
}

// ═══════════════════════════════════════════════════════════
// PredictionResponse
// ═══════════════════════════════════════════════════════════

/// Body returned by the prediction service: `{label, confidence, filename}`.
///
/// The service is not under our control, so every field is optional and
/// read leniently (a confidence sent as `"87.5"` is accepted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub label: Option<String>,
    pub confidence: Option<f64>,
    pub filename: Option<String>,
}

impl PredictionResponse {
    /// Read a prediction from an arbitrary JSON value, skipping fields
    /// that are missing or of an unexpected type.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let label = value
            .get("label")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let confidence = value.get("confidence").and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
            _ => None,
        });

        let filename = value
            .get("filename")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self {
            label,
            confidence,
            filename,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// DiagnosisResult
// ═══════════════════════════════════════════════════════════

/// Outcome of one upload: the prediction plus optional guidance text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub run_id: Uuid,
    pub diagnosis: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    pub filename: Option<String>,
    pub summary: String,
    pub no_disease: bool,
    /// Raw text from the generative service. Always `None` when `no_disease`.
    pub guidance_text: Option<String>,
    /// Set when the generative call failed and guidance fell back to generic content.
    pub generative_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DiagnosisResult {
    /// Build a result from a prediction response, applying the label and
    /// confidence defaults.
    pub fn from_prediction(prediction: &PredictionResponse) -> Self {
        let diagnosis = prediction
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();

        let confidence = normalize_confidence(prediction.confidence);
        let no_disease = is_no_disease(&diagnosis);
        let summary = format!(
            "AI detected: {} (confidence: {}%)",
            diagnosis,
            format_confidence(confidence)
        );

        Self {
            run_id: Uuid::new_v4(),
            diagnosis,
            confidence,
            filename: prediction.filename.clone(),
            summary,
            no_disease,
            guidance_text: None,
            generative_error: None,
            created_at: Utc::now(),
        }
    }

    /// Context handed to the guidance extractor.
    pub fn context(&self) -> DiagnosisContext<'_> {
        DiagnosisContext {
            diagnosis: &self.diagnosis,
        }
    }
}

/// The part of a diagnosis the guidance extractor needs for its generic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisContext<'a> {
    pub diagnosis: &'a str,
}

impl<'a> DiagnosisContext<'a> {
    pub fn new(diagnosis: &'a str) -> Self {
        Self { diagnosis }
    }
}

fn normalize_confidence(raw: Option<f64>) -> f64 {
    match raw {
        Some(c) if c.is_finite() => c.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Render a confidence without a trailing `.0` for whole numbers.
pub fn format_confidence(confidence: f64) -> String {
    if confidence.fract() == 0.0 {
        format!("{confidence:.0}")
    } else {
        format!("{confidence:.1}")
    }
}
