use std::sync::LazyLock;

use regex::Regex;

/// Leading run of whitespace, bullet glyphs or `N.` enumerations.
/// A number only counts as an enumeration when followed by whitespace or
/// end of line, so `1.5 mg` keeps its value.
static LEADING_MARKERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s|[*\-•–—]|\d+\.(?:\s|$))+").expect("valid regex")
});

/// `N.` glued to the following word (`3.Persistent`). A digit after the dot
/// is a decimal and is left alone.
static GLUED_ENUMERATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.([^\d\s])").expect("valid regex"));

static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

static MARKDOWN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").expect("valid regex"));

static MARKDOWN_EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*|__").expect("valid regex"));

static BANNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ai health guidance").expect("valid regex"));

/// Normalize raw generative-service output before parsing.
///
/// Drops carriage returns, markdown heading markers and bold markers,
/// then trims the whole text. Line structure is preserved.
pub fn normalize_text(raw: &str) -> String {
    let text = raw.replace('\r', "");
    let text = MARKDOWN_HEADING_RE.replace_all(&text, "");
    let text = MARKDOWN_EMPHASIS_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// Clean one candidate point line.
///
/// Returns an empty string when nothing printable is left; callers drop those.
pub fn clean_line(line: &str) -> String {
    let stripped = LEADING_MARKERS_RE.replace(line, "");
    let stripped = GLUED_ENUMERATION_RE.replace(&stripped, "$1");
    let collapsed = MULTI_SPACE_RE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Header lines the service sometimes prepends ("AI Health Guidance for ...").
pub fn is_banner_line(cleaned: &str) -> bool {
    BANNER_RE.is_match(cleaned)
}
