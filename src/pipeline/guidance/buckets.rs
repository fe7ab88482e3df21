use crate::models::{GuidanceSection, SectionKind, NO_DATA};

/// Per-section point lists collected by one parsing tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    points: [Vec<String>; 4],
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point unless the section is already at `cap`.
    /// Earlier content wins.
    pub fn push(&mut self, kind: SectionKind, point: String, cap: usize) {
        let bucket = &mut self.points[kind.index()];
        if bucket.len() < cap {
            bucket.push(point);
        }
    }

    pub fn get(&self, kind: SectionKind) -> &[String] {
        &self.points[kind.index()]
    }

    pub fn is_empty(&self, kind: SectionKind) -> bool {
        self.points[kind.index()].is_empty()
    }

    pub fn all_empty(&self) -> bool {
        self.points.iter().all(Vec::is_empty)
    }

    pub fn any_empty(&self) -> bool {
        self.points.iter().any(Vec::is_empty)
    }

    /// Fill each empty section from `other`, leaving populated ones untouched.
    pub fn patch_empty_from(&mut self, other: Buckets) {
        for (mine, theirs) in self.points.iter_mut().zip(other.points) {
            if mine.is_empty() {
                *mine = theirs;
            }
        }
    }

    /// Finish into four sections, substituting the sentinel for empty ones.
    pub fn into_sections(self) -> [GuidanceSection; 4] {
        let [symptoms, causes, diagnosis, treatment] = self.points;
        [
            section(SectionKind::Symptoms, symptoms),
            section(SectionKind::Causes, causes),
            section(SectionKind::Diagnosis, diagnosis),
            section(SectionKind::Treatment, treatment),
        ]
    }
}

fn section(kind: SectionKind, points: Vec<String>) -> GuidanceSection {
    let points = if points.is_empty() {
        vec![NO_DATA.to_string()]
    } else {
        points
    };
    GuidanceSection { kind, points }
}
