use serde::{Deserialize, Serialize};

/// Placeholder point for a section with no mapped content.
pub const NO_DATA: &str = "No data";

/// The four canonical guidance sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Symptoms,
    Causes,
    Diagnosis,
    Treatment,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Symptoms,
        SectionKind::Causes,
        SectionKind::Diagnosis,
        SectionKind::Treatment,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Symptoms => "Symptoms",
            Self::Causes => "Causes",
            Self::Diagnosis => "Diagnosis",
            Self::Treatment => "Treatment",
        }
    }

    /// Position in the canonical order.
    pub fn index(&self) -> usize {
        match self {
            Self::Symptoms => 0,
            Self::Causes => 1,
            Self::Diagnosis => 2,
            Self::Treatment => 3,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One display-ready guidance card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceSection {
    #[serde(rename = "title")]
    pub kind: SectionKind,
    pub points: Vec<String>,
}

impl GuidanceSection {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// True when the section only carries the `"No data"` sentinel.
    pub fn is_placeholder(&self) -> bool {
        self.points.len() == 1 && self.points[0] == NO_DATA
    }
}

/// Which strategy produced a guidance set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceSource {
    /// Parsed from generative-service text.
    Parsed,
    /// Generic placeholder content, no usable text.
    Generic,
}

/// Exactly four sections in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub source: GuidanceSource,
    pub sections: [GuidanceSection; 4],
}

impl Guidance {
    pub fn section(&self, kind: SectionKind) -> &GuidanceSection {
        &self.sections[kind.index()]
    }

    pub fn points(&self, kind: SectionKind) -> &[String] {
        &self.section(kind).points
    }
}
