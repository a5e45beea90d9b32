use super::config::KeywordRule;
use super::KeywordHit;

/// One hit per configured keyword found in `text`, in config order. Repeated occurrences of
/// the same keyword still count once; an empty keyword never matches.
pub(crate) fn match_keywords(text: &str, rules: &[KeywordRule]) -> Vec<KeywordHit> {
    rules
        .iter()
        .filter(|rule| {
            let needle = rule.keyword.to_lowercase();
            !needle.is_empty() && text.contains(needle.as_str())
        })
        .map(|rule| KeywordHit {
            keyword: rule.keyword.clone(),
            points: rule.points,
        })
        .collect()
}
