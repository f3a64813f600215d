//! Multi-field fuzzy index over a record set
//!
//! Every record is broken into lowercase tokens drawn from its title,
//! description, app names, categories and use cases; each token remembers
//! the most important field it appeared in. A query is tokenized the same
//! way and every query token must match some record token. A token match
//! lands in one of these bands, best first:
//!
//! | band        | example            | score            |
//! |-------------|--------------------|------------------|
//! | exact       | `crm` / `crm`      | 1.0              |
//! | prefix      | `hub` / `hubspot`  | 0.9              |
//! | substring   | `mail` / `gmail`   | 0.75             |
//! | subsequence | `slck` / `slack`   | 0.5 ..= 0.7      |
//! | typo        | `emial` / `email`  | at most 0.55     |
//!
//! Subsequence hits come from nucleo and must start on the token's first
//! letter; typo hits come from rapidfuzz's optimal string alignment
//! distance. The band score is multiplied by the field weight and the
//! record's score is the mean over query tokens.

use crate::model::{RecordSet, TemplateRecord, TemplateRef};
use nucleo::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher, Utf32Str};
use rapidfuzz::distance::osa;
use std::collections::HashMap;
use std::sync::Arc;

const EXACT_SCORE: f64 = 1.0;
const PREFIX_SCORE: f64 = 0.9;
const SUBSTRING_SCORE: f64 = 0.75;

/// Subsequence scores span `SUBSEQUENCE_FLOOR..=SUBSEQUENCE_FLOOR + SUBSEQUENCE_SPAN`
const SUBSEQUENCE_FLOOR: f64 = 0.5;
const SUBSEQUENCE_SPAN: f64 = 0.2;

/// Subsequence hits scoring below this fraction of a perfect match are dropped
const MIN_SUBSEQUENCE_RATIO: f64 = 0.25;

/// Minimum normalized similarity for a query token to count as a typo match
const TYPO_THRESHOLD: f64 = 0.7;

/// Typo matches rank below every other band
const TYPO_WEIGHT: f64 = 0.55;

/// Query tokens shorter than this only match exactly or as a prefix
const MIN_FUZZY_TOKEN_LEN: usize = 3;

/// Which part of a record an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    AppName,
    Category,
    UseCase,
}

impl Field {
    /// Relative importance of a match in this field
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Title => 1.0,
            Self::AppName => 0.9,
            Self::Category | Self::UseCase => 0.8,
            Self::Description => 0.6,
        }
    }
}

/// A ranked search result
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub record: TemplateRef,
    /// Match confidence in `(0, 1]`
    pub score: f64,
    /// Field of the strongest token match
    pub field: Field,
}

#[derive(Debug)]
struct IndexedToken {
    text: String,
    field: Field,
}

#[derive(Debug)]
struct IndexedRecord {
    tokens: Vec<IndexedToken>,
}

impl IndexedRecord {
    fn from_record(record: &TemplateRecord) -> Self {
        let values = [
            (Field::Title, record.title.as_str()),
            (Field::Description, record.description.as_str()),
        ]
        .into_iter()
        .chain(record.apps.iter().map(|app| (Field::AppName, app.name.as_str())))
        .chain(record.categories.iter().map(|c| (Field::Category, c.as_str())))
        .chain(record.use_cases.iter().map(|uc| (Field::UseCase, uc.as_str())));

        let mut best: HashMap<String, Field> = HashMap::new();
        for (field, text) in values {
            for token in tokenize(text) {
                best.entry(token)
                    .and_modify(|f| {
                        if field.weight() > f.weight() {
                            *f = field;
                        }
                    })
                    .or_insert(field);
            }
        }

        let mut tokens: Vec<IndexedToken> = best
            .into_iter()
            .map(|(text, field)| IndexedToken { text, field })
            .collect();
        tokens.sort_by(|a, b| a.text.cmp(&b.text));
        Self { tokens }
    }
}

/// Lowercased alphanumeric runs
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Searchable index built from one record set
///
/// The index keeps a handle to the record set it was built from so callers
/// can tell, by identity, whether it is still current.
#[derive(Debug)]
pub struct SearchIndex {
    records: RecordSet,
    indexed: Vec<IndexedRecord>,
}

impl SearchIndex {
    /// Build an index over `records`
    #[must_use]
    pub fn build(records: &RecordSet) -> Self {
        let indexed = records
            .iter()
            .map(|r| IndexedRecord::from_record(r))
            .collect();
        Self {
            records: Arc::clone(records),
            indexed,
        }
    }

    /// The record set this index was built from
    #[must_use]
    pub const fn records(&self) -> &RecordSet {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `query`, best match first
    ///
    /// An empty (or whitespace-only) query returns every record in its
    /// original order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<TemplateRef> {
        if query.trim().is_empty() {
            return self.records.to_vec();
        }
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.record)
            .collect()
    }

    /// Scored matches for `query`, best first, ties in original order
    ///
    /// An empty query returns every record with a score of `1.0`. A query
    /// with no alphanumeric characters matches nothing.
    #[must_use]
    pub fn search_scored(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return self
                .records
                .iter()
                .map(|record| SearchHit {
                    record: Arc::clone(record),
                    score: 1.0,
                    field: Field::Title,
                })
                .collect();
        }

        let mut scorer = Scorer::new(query);
        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .zip(&self.indexed)
            .filter_map(|(record, indexed)| {
                scorer.score(indexed).map(|(score, field)| SearchHit {
                    record: Arc::clone(record),
                    score,
                    field,
                })
            })
            .collect();

        // sort_by is stable, so equal scores keep input order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }
}

struct QueryToken {
    text: String,
    first: char,
    len: usize,
    pattern: Pattern,
    /// Score of the token matched against itself
    perfect: f64,
}

/// Per-query scoring state
struct Scorer {
    tokens: Vec<QueryToken>,
    matcher: Matcher,
    buf: Vec<char>,
}

impl Scorer {
    fn new(query: &str) -> Self {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();

        let tokens = tokenize(query)
            .filter_map(|text| {
                let first = text.chars().next()?;
                let pattern = Pattern::new(
                    &text,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                );
                let perfect = pattern
                    .score(Utf32Str::new(&text, &mut buf), &mut matcher)
                    .map_or(1.0, |s| f64::from(s.max(1)));
                Some(QueryToken {
                    len: text.chars().count(),
                    text,
                    first,
                    pattern,
                    perfect,
                })
            })
            .collect();

        Self {
            tokens,
            matcher,
            buf,
        }
    }

    /// Mean weighted score over query tokens, if every one of them matches
    fn score(&mut self, indexed: &IndexedRecord) -> Option<(f64, Field)> {
        if self.tokens.is_empty() {
            return None;
        }

        let mut total = 0.0;
        let mut strongest: Option<(f64, Field)> = None;
        for query in &self.tokens {
            let (score, field) = indexed
                .tokens
                .iter()
                .filter_map(|token| {
                    match_token(query, &token.text, &mut self.matcher, &mut self.buf)
                        .map(|band| (band * token.field.weight(), token.field))
                })
                .max_by(|a, b| a.0.total_cmp(&b.0))?;
            total += score;
            if strongest.is_none_or(|(s, _)| score > s) {
                strongest = Some((score, field));
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = total / self.tokens.len() as f64;
        strongest.map(|(_, field)| (mean, field))
    }
}

/// Band score of one query token against one record token
fn match_token(
    query: &QueryToken,
    token: &str,
    matcher: &mut Matcher,
    buf: &mut Vec<char>,
) -> Option<f64> {
    if token == query.text {
        return Some(EXACT_SCORE);
    }
    if token.starts_with(&query.text) {
        return Some(PREFIX_SCORE);
    }
    if query.len < MIN_FUZZY_TOKEN_LEN {
        return None;
    }
    if token.contains(&query.text) {
        return Some(SUBSTRING_SCORE);
    }

    if token.starts_with(query.first)
        && let Some(raw) = query.pattern.score(Utf32Str::new(token, buf), matcher)
    {
        let ratio = (f64::from(raw) / query.perfect).min(1.0);
        if ratio >= MIN_SUBSEQUENCE_RATIO {
            return Some(SUBSEQUENCE_FLOOR + SUBSEQUENCE_SPAN * ratio);
        }
    }

    let similarity = token_similarity(&query.text, token);
    (similarity >= TYPO_THRESHOLD).then_some(similarity * TYPO_WEIGHT)
}

/// Typo similarity of a query token to a record token
///
/// Compares against the whole token and against its prefix of the query's
/// length, so partially typed words still match. Tokens shorter than
/// three characters only match as an exact prefix.
fn token_similarity(query: &str, token: &str) -> f64 {
    let query_len = query.chars().count();
    if query_len < MIN_FUZZY_TOKEN_LEN {
        return if token.starts_with(query) { 1.0 } else { 0.0 };
    }

    let whole = osa::normalized_similarity(query.chars(), token.chars());
    let prefix: String = token.chars().take(query_len).collect();
    let partial = osa::normalized_similarity(query.chars(), prefix.chars());
    whole.max(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataSource, EmbeddedSource};
    use crate::model::{AppRef, into_record_set};

    fn record(id: &str, title: &str) -> TemplateRecord {
        TemplateRecord::new(id, title)
    }

    fn catalog() -> RecordSet {
        let mut slack = record("1", "Slack notification");
        slack.apps = vec![AppRef::new("Slack", "slack")];
        let mut gmail = record("2", "Save Gmail attachments");
        gmail.description = "Log every email in a spreadsheet".to_string();
        let mut trello = record("3", "Create Trello cards");
        trello.categories = vec!["project-management".to_string()];
        let mut sheets = record("4", "Spreadsheet backup");
        sheets.use_cases = vec!["operations".to_string()];
        into_record_set(vec![slack, gmail, trello, sheets])
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        let ids: Vec<_> = index.search("   ").iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_misspelled_query_matches() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        let hits = index.search_scored("slck");
        assert_eq!(hits.first().map(|h| h.record.id.as_str()), Some("1"));
        assert!(hits[0].score > 0.0);
    }

    #[test]
    fn test_substituted_letter_uses_typo_fallback() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        let hits = index.search_scored("trallo");
        assert!(hits.iter().any(|h| h.record.id == "3"));
    }

    #[test]
    fn test_title_outranks_description() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        let ids: Vec<_> = index
            .search("spreadsheet")
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids.first().map(String::as_str), Some("4"));
        assert!(ids.contains(&"2".to_string()));
    }

    #[test]
    fn test_searches_categories_and_use_cases() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        assert!(index.search("project").iter().any(|r| r.id == "3"));
        assert!(index.search("operations").iter().any(|r| r.id == "4"));
    }

    #[test]
    fn test_unrelated_query_matches_nothing() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        assert!(index.search("zzzzqqq").is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = into_record_set(vec![
            record("a", "Invoice sync"),
            record("b", "Invoice sync"),
            record("c", "Invoice sync"),
        ]);
        let index = SearchIndex::build(&records);

        let ids: Vec<_> = index.search("invoice").iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_token_similarity_prefix() {
        assert!(token_similarity("notifcat", "notification") >= TYPO_THRESHOLD);
        assert!((token_similarity("em", "email") - 1.0).abs() < f64::EPSILON);
        assert!(token_similarity("em", "gmail") < f64::EPSILON);
    }

    #[test]
    fn test_typo_threshold_boundary() {
        // one substitution in five letters clears the bar, two do not
        assert!(token_similarity("slxck", "slack") >= TYPO_THRESHOLD);
        assert!(token_similarity("zlxck", "slack") < TYPO_THRESHOLD);
        // a transposition counts as one edit
        assert!(token_similarity("emial", "email") >= TYPO_THRESHOLD);

        let records = catalog();
        let index = SearchIndex::build(&records);
        assert!(index.search("slxck").iter().any(|r| r.id == "1"));
        assert!(!index.search("zlxck").iter().any(|r| r.id == "1"));
    }

    #[test]
    fn test_exact_category_outranks_scattered_title() {
        let cream = record("cream", "Cream scheduler");
        let mut tagged = record("tagged", "Contact sync");
        tagged.categories = vec!["crm".to_string()];
        let records = into_record_set(vec![cream, tagged]);
        let index = SearchIndex::build(&records);

        let hits = index.search_scored("crm");
        let ids: Vec<_> = hits.iter().map(|h| h.record.id.as_str()).collect();
        assert_eq!(ids, vec!["tagged", "cream"]);
        assert_eq!(hits[0].field, Field::Category);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_prefix_outranks_substring() {
        let records = into_record_set(vec![
            record("gmail", "Save Gmail attachments"),
            record("mailchimp", "Mailchimp welcome"),
        ]);
        let index = SearchIndex::build(&records);

        let ids: Vec<_> = index.search("mail").iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["mailchimp", "gmail"]);
    }

    #[test]
    fn test_short_token_only_matches_tokens_that_carry_it() {
        let records = into_record_set(EmbeddedSource.fetch().unwrap());
        let index = SearchIndex::build(&records);

        let carries_crm = |r: &TemplateRecord| {
            IndexedRecord::from_record(r)
                .tokens
                .iter()
                .any(|t| t.text == "crm")
        };
        let expected = records.iter().filter(|r| carries_crm(r.as_ref())).count();
        let hits = index.search_scored("crm");

        assert!(expected > 0);
        assert_eq!(hits.len(), expected);
        assert!(hits.iter().all(|h| carries_crm(h.record.as_ref())));
    }

    #[test]
    fn test_multi_word_query_spans_fields() {
        let mut both = record("both", "Alert on new deals");
        both.apps = vec![AppRef::new("HubSpot", "hubspot"), AppRef::new("Slack", "slack")];
        let mut slack_only = record("slack-only", "Slack standup");
        slack_only.apps = vec![AppRef::new("Slack", "slack")];
        let mut hubspot_only = record("hubspot-only", "Contact sync");
        hubspot_only.apps = vec![AppRef::new("HubSpot", "hubspot")];
        let records = into_record_set(vec![slack_only, hubspot_only, both]);
        let index = SearchIndex::build(&records);

        let ids: Vec<_> = index
            .search("hubspt slack")
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids, vec!["both"]);
    }

    #[test]
    fn test_transposed_letters_find_description_match() {
        let records = catalog();
        let index = SearchIndex::build(&records);

        let hits = index.search_scored("emial");
        assert_eq!(hits.first().map(|h| h.record.id.as_str()), Some("2"));
        assert_eq!(hits[0].field, Field::Description);
    }

    #[test]
    fn test_punctuation_only_query_matches_nothing() {
        let records = catalog();
        let index = SearchIndex::build(&records);
        assert!(index.search_scored("&& --").is_empty());
    }
}
