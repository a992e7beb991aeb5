use std::fmt;

use serde::{Deserialize, Serialize};

/// Imprint and series names that mark a title as a poetry collection.
pub const POETRY_KEYWORDS: &[&str] = &[
    "창비시선",
    "문학과지성 시인선",
    "문학과지성시인선",
    "문지시인선",
    "민음의 시",
    "민음의시",
    "문학동네시인선",
    "문학동네 시인선",
    "실천문학 시집",
    "걷는사람 시인선",
    "아침달 시집",
    "시인선",
    "시집",
];

/// Local shelf categories: KDC top-level classes plus 시집, 소설, 에세이 and a
/// 기타 fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FullCategory {
    #[serde(rename = "시집")]
    Poetry,
    #[serde(rename = "소설")]
    Novel,
    #[serde(rename = "에세이")]
    Essay,
    #[serde(rename = "총류")]
    General,
    #[serde(rename = "철학")]
    Philosophy,
    #[serde(rename = "인문")]
    Humanities,
    #[serde(rename = "종교")]
    Religion,
    #[serde(rename = "사회과학")]
    SocialScience,
    #[serde(rename = "자연과학")]
    NaturalScience,
    #[serde(rename = "기술과학")]
    Technology,
    #[serde(rename = "예술")]
    Arts,
    #[serde(rename = "언어")]
    Language,
    #[serde(rename = "문학")]
    Literature,
    #[serde(rename = "역사")]
    History,
    #[serde(rename = "기타")]
    Other,
}

impl FullCategory {
    pub const ALL: [FullCategory; 15] = [
        FullCategory::Poetry,
        FullCategory::Novel,
        FullCategory::Essay,
        FullCategory::General,
        FullCategory::Philosophy,
        FullCategory::Humanities,
        FullCategory::Religion,
        FullCategory::SocialScience,
        FullCategory::NaturalScience,
        FullCategory::Technology,
        FullCategory::Arts,
        FullCategory::Language,
        FullCategory::Literature,
        FullCategory::History,
        FullCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FullCategory::Poetry => "시집",
            FullCategory::Novel => "소설",
            FullCategory::Essay => "에세이",
            FullCategory::General => "총류",
            FullCategory::Philosophy => "철학",
            FullCategory::Humanities => "인문",
            FullCategory::Religion => "종교",
            FullCategory::SocialScience => "사회과학",
            FullCategory::NaturalScience => "자연과학",
            FullCategory::Technology => "기술과학",
            FullCategory::Arts => "예술",
            FullCategory::Language => "언어",
            FullCategory::Literature => "문학",
            FullCategory::History => "역사",
            FullCategory::Other => "기타",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    /// 시집 and 소설 are never overwritten by automatic re-classification.
    pub fn is_preserved(self) -> bool {
        matches!(self, FullCategory::Poetry | FullCategory::Novel)
    }
}

impl fmt::Display for FullCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify_poetry(text: Option<&str>) -> bool {
    let text = text.unwrap_or_default().trim();
    !text.is_empty() && POETRY_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

type Rule = (fn(&str) -> bool, FullCategory);

// Evaluated top to bottom; the first matching predicate decides.
const RULES: &[Rule] = &[
    (|path| classify_poetry(Some(path)), FullCategory::Poetry),
    (|path| path.contains("소설"), FullCategory::Novel),
    (is_poetry_path, FullCategory::Poetry),
    (|path| path.contains("에세이"), FullCategory::Essay),
    (
        |path| path.contains("만화") || path.contains("소설/시/희곡"),
        FullCategory::Literature,
    ),
    (
        |path| path.contains("경제") || path.contains("경영"),
        FullCategory::SocialScience,
    ),
    (|path| path.contains("총류"), FullCategory::General),
    (|path| path.contains("철학"), FullCategory::Philosophy),
    (|path| path.contains("인문"), FullCategory::Humanities),
    (|path| path.contains("종교"), FullCategory::Religion),
    (|path| path.contains("사회"), FullCategory::SocialScience),
    (
        |path| {
            path.contains("자연과학") || (path.contains("과학") && !path.contains("기술과학"))
        },
        FullCategory::NaturalScience,
    ),
    (
        |path| path.contains("기술") || path.contains("공학") || path.contains("의학"),
        FullCategory::Technology,
    ),
    (|path| path.contains("예술"), FullCategory::Arts),
    (|path| path.contains("언어"), FullCategory::Language),
    (|path| path.contains("문학"), FullCategory::Literature),
    (|path| path.contains("역사"), FullCategory::History),
];

fn is_poetry_path(path: &str) -> bool {
    let compact = path.split_whitespace().collect::<String>();
    path.contains("시집") || compact.contains("시/시") || path.starts_with('시')
}

/// Maps a provider category path such as `"국내도서>소설/시/희곡>일본소설"` onto
/// a local category. Blank input maps to `None`; anything else maps to some
/// category, 기타 when no rule matches.
pub fn map_external_category(category_path: Option<&str>) -> Option<FullCategory> {
    let path = category_path.unwrap_or_default().trim();
    if path.is_empty() {
        return None;
    }

    let category = RULES
        .iter()
        .find(|(matches, _)| matches(path))
        .map(|(_, category)| *category)
        .unwrap_or(FullCategory::Other);
    Some(category)
}

/// Normalizes free text that may already be a local label.
pub fn normalize_free_text(raw: Option<&str>) -> FullCategory {
    let text = raw.unwrap_or_default().trim();
    FullCategory::from_label(text)
        .or_else(|| map_external_category(Some(text)))
        .unwrap_or(FullCategory::Other)
}

/// Re-runs the mapper over a book that may already carry a category. Preserved
/// categories stay as they are; a blank path keeps whatever was there.
pub fn reclassify(
    current: Option<FullCategory>,
    category_path: Option<&str>,
) -> Option<FullCategory> {
    match current {
        Some(category) if category.is_preserved() => Some(category),
        _ => map_external_category(category_path).or(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(path: &str) -> Option<FullCategory> {
        map_external_category(Some(path))
    }

    #[test]
    fn poetry_keywords_match_imprints() {
        assert!(classify_poetry(Some("창비시선 123")));
        assert!(classify_poetry(Some("민음의시 241")));
        assert!(classify_poetry(Some("  첫 시집 ")));
        assert!(!classify_poetry(Some("그냥 소설")));
        assert!(!classify_poetry(Some("   ")));
        assert!(!classify_poetry(None));
    }

    #[test]
    fn blank_path_maps_to_none() {
        assert_eq!(map(""), None);
        assert_eq!(map("  "), None);
        assert_eq!(map_external_category(None), None);
    }

    #[test]
    fn unknown_path_maps_to_other() {
        assert_eq!(map("전혀모르는분류"), Some(FullCategory::Other));
    }

    #[test]
    fn novel_wins_over_slash_poetry_pattern() {
        assert_eq!(map("국내도서>소설/시/희곡>일본소설"), Some(FullCategory::Novel));
    }

    #[test]
    fn poetry_paths() {
        assert_eq!(map("시 / 시"), Some(FullCategory::Poetry));
        assert_eq!(map("시>한국시"), Some(FullCategory::Poetry));
        assert_eq!(map("국내도서>창비시선"), Some(FullCategory::Poetry));
    }

    #[test]
    fn ordered_rules() {
        assert_eq!(map("국내도서>에세이>여행에세이"), Some(FullCategory::Essay));
        assert_eq!(map("국내도서>만화>웹툰"), Some(FullCategory::Literature));
        assert_eq!(map("국내도서>경제경영>재테크"), Some(FullCategory::SocialScience));
        assert_eq!(map("국내도서>인문학>철학 일반"), Some(FullCategory::Philosophy));
        assert_eq!(map("국내도서>인문학>심리학"), Some(FullCategory::Humanities));
        assert_eq!(map("국내도서>종교/역학"), Some(FullCategory::Religion));
        assert_eq!(map("국내도서>사회과학>정치학"), Some(FullCategory::SocialScience));
        assert_eq!(map("국내도서>과학>물리학"), Some(FullCategory::NaturalScience));
        assert_eq!(map("기술과학>전자공학"), Some(FullCategory::Technology));
        assert_eq!(map("국내도서>건강/취미>의학"), Some(FullCategory::Technology));
        assert_eq!(map("국내도서>예술/대중문화"), Some(FullCategory::Arts));
        assert_eq!(map("국내도서>외국어>언어학"), Some(FullCategory::Language));
        assert_eq!(map("국내도서>어린이>문학"), Some(FullCategory::Literature));
        assert_eq!(map("국내도서>역사>한국사"), Some(FullCategory::History));
        assert_eq!(map("국내도서>총류"), Some(FullCategory::General));
    }

    #[test]
    fn free_text_keeps_existing_labels() {
        for category in FullCategory::ALL {
            assert_eq!(normalize_free_text(Some(category.label())), category);
        }
        assert_eq!(normalize_free_text(Some("국내도서>역사")), FullCategory::History);
        assert_eq!(normalize_free_text(Some("")), FullCategory::Other);
        assert_eq!(normalize_free_text(None), FullCategory::Other);
    }

    #[test]
    fn reclassify_respects_preserved_categories() {
        let path = Some("국내도서>역사>한국사");
        assert_eq!(
            reclassify(Some(FullCategory::Poetry), path),
            Some(FullCategory::Poetry)
        );
        assert_eq!(
            reclassify(Some(FullCategory::Novel), path),
            Some(FullCategory::Novel)
        );
        assert_eq!(
            reclassify(Some(FullCategory::Arts), path),
            Some(FullCategory::History)
        );
        assert_eq!(
            reclassify(Some(FullCategory::Arts), None),
            Some(FullCategory::Arts)
        );
        assert_eq!(reclassify(None, path), Some(FullCategory::History));
    }

    #[test]
    fn labels_serialize_in_korean() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&FullCategory::Poetry)?, "\"시집\"");
        let parsed: FullCategory = serde_json::from_str("\"기술과학\"")?;
        assert_eq!(parsed, FullCategory::Technology);
        Ok(())
    }
}
