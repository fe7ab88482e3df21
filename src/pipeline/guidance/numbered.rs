use std::sync::LazyLock;

use regex::Regex;

use super::buckets::Buckets;
use super::keywords::classify_title;
use super::sanitize::{clean_line, is_banner_line};
use super::MAX_PARSED_POINTS;
use crate::models::SectionKind;

/// `<number>. <title>` at the start of a line. The title must not start
/// with a digit, so `1.5 mg` is not a block boundary.
static NUMBERED_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*\.\s*([^\d\s].*)$").expect("valid regex"));

/// Parse text organised as numbered blocks (`1. Symptoms ...`, `2. Causes ...`).
///
/// Each block title is classified by keyword; body lines until the next
/// numbered line are cleaned into the matched section. Blocks with an
/// unrecognised title are discarded, as is any text before the first block.
pub fn parse_numbered_sections(text: &str) -> Buckets {
    let mut buckets = Buckets::new();
    // None before the first block; Some(None) inside a discarded block.
    let mut current: Option<Option<SectionKind>> = None;

    for line in text.lines() {
        if let Some(caps) = NUMBERED_HEADING_RE.captures(line) {
            let title = caps.get(1).map_or("", |m| m.as_str());
            let (head, inline) = match title.split_once(':') {
                Some((head, rest)) => (head, Some(rest)),
                None => (title, None),
            };
            let kind = classify_title(head);
            current = Some(kind);

            if let (Some(kind), Some(rest)) = (kind, inline) {
                push_cleaned(&mut buckets, kind, rest);
            }
            continue;
        }

        if let Some(Some(kind)) = current {
            push_cleaned(&mut buckets, kind, line);
        }
    }

    buckets
}

fn push_cleaned(buckets: &mut Buckets, kind: SectionKind, line: &str) {
    let cleaned = clean_line(line);
    if !cleaned.is_empty() && !is_banner_line(&cleaned) {
        buckets.push(kind, cleaned, MAX_PARSED_POINTS);
    }
}
