//! Elasticsearch Query DSL builder.
//!
//! Translates a search term and a [`Predicate`] into the two request bodies
//! a book search needs: a distinct count and a ranked window of ids.

use serde_json::{Value, json};

use crate::types::{Condition, PageWindow, Predicate};

/// Fields searched by `multi_match`, with boosts.
pub const SEARCH_FIELDS: &[&str] = &[
    "title^3",
    "authors",
    "subjects",
    "bookshelves",
    "languages",
    "formats",
];

/// Edit distance allowed between query and indexed terms.
pub const FUZZINESS: &str = "1";

/// Name of the cardinality aggregation carrying the distinct total.
pub const DISTINCT_AGG: &str = "distinct_books";

/// Builds Elasticsearch request bodies for a single search.
#[derive(Debug, Clone, Copy)]
pub struct EsQueryBuilder<'a> {
    term: &'a str,
    predicate: &'a Predicate,
}

impl<'a> EsQueryBuilder<'a> {
    /// Creates a new query builder.
    pub fn new(term: &'a str, predicate: &'a Predicate) -> Self {
        Self { term, predicate }
    }

    /// Builds the `query` clause shared by count and window requests.
    pub fn build_query(&self) -> Value {
        let multi_match = json!({
            "multi_match": {
                "query": self.term,
                "fields": SEARCH_FIELDS,
                "fuzziness": FUZZINESS
            }
        });

        if self.predicate.is_trivial() {
            return multi_match;
        }

        json!({
            "bool": {
                "must": [multi_match],
                "filter": [predicate_clause(self.predicate)]
            }
        })
    }

    /// Builds the body counting distinct matching books.
    pub fn build_count(&self) -> Value {
        json!({
            "query": self.build_query(),
            "size": 0,
            "track_total_hits": true,
            "aggs": {
                DISTINCT_AGG: {
                    "cardinality": { "field": "id" }
                }
            }
        })
    }

    /// Builds the body returning one window of ranked hits.
    pub fn build_window(&self, window: PageWindow) -> Value {
        json!({
            "query": self.build_query(),
            "from": window.offset,
            "size": window.limit,
            "collapse": { "field": "id" },
            "_source": ["id"]
        })
    }
}

/// Renders a predicate as a filter clause.
pub fn predicate_clause(predicate: &Predicate) -> Value {
    match predicate {
        Predicate::True => json!({ "match_all": {} }),
        Predicate::Match(condition) => condition_clause(condition),
        Predicate::And(children) => {
            let clauses: Vec<Value> = children.iter().map(predicate_clause).collect();
            json!({ "bool": { "filter": clauses } })
        }
        Predicate::Or(children) if children.is_empty() => json!({ "match_none": {} }),
        Predicate::Or(children) => {
            let clauses: Vec<Value> = children.iter().map(predicate_clause).collect();
            json!({
                "bool": {
                    "should": clauses,
                    "minimum_should_match": 1
                }
            })
        }
    }
}

fn condition_clause(condition: &Condition) -> Value {
    match condition {
        Condition::TitleContains(text) => contains_clause("title", text),
        Condition::AuthorNameContains(text) => contains_clause("authors", text),
        Condition::SubjectNameContains(text) => contains_clause("subjects", text),
        Condition::BookshelfNameContains(text) => contains_clause("bookshelves", text),
        Condition::LanguageIn(codes) => json!({ "terms": { "languages.keyword": codes } }),
        Condition::MimeTypeIn(types) => json!({ "terms": { "formats.keyword": types } }),
        Condition::GutenbergIdEquals(id) => json!({ "term": { "gutenberg_id": id } }),
    }
}

fn contains_clause(field: &str, text: &str) -> Value {
    json!({
        "wildcard": {
            format!("{}.lowercase", field): {
                "value": format!("*{}*", escape_wildcard(&text.to_lowercase()))
            }
        }
    })
}

/// Escapes wildcard metacharacters so they match literally.
fn escape_wildcard(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
