//! Plain-text rendering of scan reports for terminal output.

use std::fmt::Write;

use crate::models::{format_confidence, Guidance, GuidanceSource};
use crate::pipeline::orchestrator::ScanReport;

/// Footer shown under every report.
pub const REPORT_NOTICE: &str =
    "Results are for demonstration. For real medical advice, consult a professional.";

const NO_DISEASE_MESSAGE: &str = "No disease detected. No guidance is needed for this scan.";

/// Render a full report: diagnosis header, guidance cards and notice.
pub fn render_report(report: &ScanReport) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(out, "Diagnosis:  {}", result.diagnosis);
    let _ = writeln!(out, "Confidence: {}%", format_confidence(result.confidence));
    if let Some(filename) = &result.filename {
        let _ = writeln!(out, "Scan:       {filename}");
    }
    out.push('\n');

    match &report.guidance {
        None => {
            let _ = writeln!(out, "{NO_DISEASE_MESSAGE}");
        }
        Some(guidance) => {
            if let Some(error) = &result.generative_error {
                let _ = writeln!(out, "(AI guidance unavailable: {error})\n");
            }
            out.push_str(&render_guidance(guidance));
        }
    }

    let _ = write!(out, "\n{REPORT_NOTICE}\n");
    out
}

/// Render the four guidance cards in canonical order.
pub fn render_guidance(guidance: &Guidance) -> String {
    let mut out = String::new();
    if guidance.source == GuidanceSource::Generic {
        let _ = writeln!(out, "General guidance\n");
    }

    for (i, section) in guidance.sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", section.title());
        for point in &section.points {
            let _ = writeln!(out, "  • {point}");
        }
    }
    out
}
