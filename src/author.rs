use serde::{Deserialize, Serialize};

const TRANSLATOR_MARKERS: [&str; 3] = ["(옮긴이)", "옮긴이", "옮김"];
const AUTHOR_MARKERS: [&str; 3] = ["(지은이)", "지은이", "지음"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTranslator {
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
}

/// Splits a bibliographic credit line such as `"김영하(지은이), 박상미(옮긴이)"`
/// into author and translator names.
///
/// Each comma-separated segment is checked for a translator marker and then
/// for an author marker; a match stores the segment, marker removed, into the
/// matching slot, so later segments overwrite earlier ones. A lone segment
/// without any marker is taken as the author. When nothing yields an author,
/// the whole trimmed input is used, so `author` is empty only for blank input.
#[must_use]
pub fn parse_author_translator(raw: Option<&str>) -> AuthorTranslator {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return AuthorTranslator::default();
    }

    let segments = trimmed
        .split([',', '，'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();

    let mut author: Option<String> = None;
    let mut translator: Option<String> = None;

    for segment in &segments {
        if has_marker(segment, &TRANSLATOR_MARKERS) {
            translator = Some(strip_markers(segment, &TRANSLATOR_MARKERS));
        }
        if has_marker(segment, &AUTHOR_MARKERS) {
            author = Some(strip_markers(segment, &AUTHOR_MARKERS));
        }
    }

    if let [only] = segments.as_slice()
        && author.is_none()
        && translator.is_none()
    {
        author = Some(strip_markers(only, &AUTHOR_MARKERS));
    }

    let author = author
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| trimmed.to_owned());
    let translator = translator.filter(|name| !name.is_empty());

    AuthorTranslator { author, translator }
}

fn has_marker(segment: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| segment.contains(marker))
}

// Markers are ordered parenthesized-first so "(옮긴이)" never leaves "()" behind.
fn strip_markers(segment: &str, markers: &[&str]) -> String {
    let mut name = segment.to_owned();
    for marker in markers {
        name = name.replace(marker, " ");
    }
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AuthorTranslator {
        parse_author_translator(Some(raw))
    }

    #[test]
    fn blank_input_yields_empty_author() {
        assert_eq!(parse_author_translator(None), AuthorTranslator::default());
        assert_eq!(parse("   "), AuthorTranslator::default());
    }

    #[test]
    fn splits_parenthesized_roles() {
        let out = parse("김영하(지은이), 박상미(옮긴이)");
        assert_eq!(out.author, "김영하");
        assert_eq!(out.translator.as_deref(), Some("박상미"));
    }

    #[test]
    fn trailing_verb_marker_is_stripped() {
        let out = parse("무라카미 하루키 지음");
        assert_eq!(out.author, "무라카미 하루키");
        assert_eq!(out.translator, None);
    }

    #[test]
    fn fullwidth_comma_separates_segments() {
        let out = parse("무라카미 하루키 지음，양윤옥 옮김");
        assert_eq!(out.author, "무라카미 하루키");
        assert_eq!(out.translator.as_deref(), Some("양윤옥"));
    }

    #[test]
    fn single_segment_without_marker_is_author() {
        let out = parse("  한강  ");
        assert_eq!(out.author, "한강");
        assert_eq!(out.translator, None);
    }

    #[test]
    fn translator_only_falls_back_to_raw_author() {
        let out = parse("홍길동 (옮긴이)");
        assert_eq!(out.translator.as_deref(), Some("홍길동"));
        assert_eq!(out.author, "홍길동 (옮긴이)");
    }

    #[test]
    fn unmarked_segments_fall_back_to_raw_author() {
        let out = parse("김영하, 박상미");
        assert_eq!(out.author, "김영하, 박상미");
        assert_eq!(out.translator, None);
    }

    #[test]
    fn later_author_segment_wins() {
        let out = parse("가(지은이), 나(지은이)");
        assert_eq!(out.author, "나");
    }

    #[test]
    fn segment_with_both_markers_fills_both_slots() {
        let out = parse("갑 지음 옮김");
        assert_eq!(out.author, "갑 옮김");
        assert_eq!(out.translator.as_deref(), Some("갑 지음"));
    }

    #[test]
    fn marker_alone_never_produces_empty_author() {
        for raw in ["지음", "(옮긴이)", ",", "옮김, 지음"] {
            assert!(!parse(raw).author.is_empty(), "empty author for {raw:?}");
        }
    }
}
