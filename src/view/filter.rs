//! Filter predicate: keyword AND category

use super::criteria::{CategoryFilter, Criteria};
use super::record::Record;

/// Whether `record` passes every filter in `criteria`
pub fn matches<R: Record>(record: &R, criteria: &Criteria) -> bool {
    KeywordMatcher::new(&criteria.keyword).matches(record)
        && matches_category(record, &criteria.category)
}

/// Case-insensitive substring match on title or author
pub fn matches_keyword<R: Record>(record: &R, keyword: &str) -> bool {
    KeywordMatcher::new(keyword).matches(record)
}

/// Exact, case-sensitive category match; `All` always matches
pub fn matches_category<R: Record>(record: &R, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Exact(wanted) => record.category() == Some(wanted.as_str()),
    }
}

/// Every record of `source` that passes the filters, in source order
pub fn select_all<'a, R: Record>(source: &'a [R], criteria: &Criteria) -> Vec<&'a R> {
    let keyword = KeywordMatcher::new(&criteria.keyword);
    source
        .iter()
        .filter(|record| keyword.matches(*record) && matches_category(*record, &criteria.category))
        .collect()
}

/// Keyword folded once, reused across a whole selection pass
struct KeywordMatcher {
    folded: Option<String>,
}

impl KeywordMatcher {
    fn new(keyword: &str) -> Self {
        let folded = (!keyword.is_empty()).then(|| fold(keyword));
        Self { folded }
    }

    fn matches<R: Record>(&self, record: &R) -> bool {
        match &self.folded {
            None => true,
            Some(needle) => {
                fold(record.title()).contains(needle.as_str())
                    || fold(record.author()).contains(needle.as_str())
            }
        }
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}
