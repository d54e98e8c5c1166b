//! SQL query builder for catalog listings.
//!
//! Translates a [`Predicate`] into a WHERE clause over `books_book b`.
//! Relation conditions become correlated `EXISTS` subqueries, so a book
//! matching through several related rows is still returned once.

use crate::types::{Condition, PageWindow, Predicate, SortDirection, SortDirective};

use super::backend::LOWER_FN;

/// Columns selected for a book row, in the order `map_book_row` reads them.
pub const BOOK_COLUMNS: &str = "b.id, b.title, b.gutenberg_id, b.media_type, b.download_count";

/// A fragment of SQL with bound parameters.
///
/// Placeholders are anonymous (`?`) and bound in order, so fragments can be
/// combined freely.
#[derive(Debug, Clone, Default)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) AND ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Combines with another fragment using OR.
    pub fn or(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) OR ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Returns the parameters in a form rusqlite can bind.
    pub fn bind_params(&self) -> Vec<Box<dyn rusqlite::ToSql>> {
        self.params
            .iter()
            .map(|param| -> Box<dyn rusqlite::ToSql> {
                match param {
                    SqlParam::String(s) => Box::new(s.clone()),
                    SqlParam::Integer(i) => Box::new(*i),
                }
            })
            .collect()
    }
}

/// Builds SQL queries over the catalog tables.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Builds the WHERE condition for a predicate. Never empty.
    pub fn build_where(predicate: &Predicate) -> SqlFragment {
        match predicate {
            Predicate::True => SqlFragment::new("1"),
            Predicate::Match(condition) => Self::build_condition(condition),
            Predicate::And(children) => {
                let fragment = children
                    .iter()
                    .map(Self::build_where)
                    .fold(SqlFragment::default(), SqlFragment::and);
                if fragment.is_empty() {
                    SqlFragment::new("1")
                } else {
                    fragment
                }
            }
            Predicate::Or(children) => {
                let fragment = children
                    .iter()
                    .map(Self::build_where)
                    .fold(SqlFragment::default(), SqlFragment::or);
                if fragment.is_empty() {
                    SqlFragment::new("0")
                } else {
                    fragment
                }
            }
        }
    }

    fn build_condition(condition: &Condition) -> SqlFragment {
        match condition {
            Condition::TitleContains(text) => SqlFragment::with_params(
                format!("{}(b.title) LIKE ? ESCAPE '\\'", LOWER_FN),
                vec![SqlParam::string(like_pattern(text))],
            ),
            Condition::AuthorNameContains(text) => SqlFragment::with_params(
                format!(
                    "EXISTS (SELECT 1 FROM books_book_authors ba \
                     JOIN books_author a ON a.id = ba.author_id \
                     WHERE ba.book_id = b.id AND {}(a.name) LIKE ? ESCAPE '\\')",
                    LOWER_FN
                ),
                vec![SqlParam::string(like_pattern(text))],
            ),
            Condition::SubjectNameContains(text) => SqlFragment::with_params(
                format!(
                    "EXISTS (SELECT 1 FROM books_book_subjects bs \
                     JOIN books_subject s ON s.id = bs.subject_id \
                     WHERE bs.book_id = b.id AND {}(s.name) LIKE ? ESCAPE '\\')",
                    LOWER_FN
                ),
                vec![SqlParam::string(like_pattern(text))],
            ),
            Condition::BookshelfNameContains(text) => SqlFragment::with_params(
                format!(
                    "EXISTS (SELECT 1 FROM books_book_bookshelves bb \
                     JOIN books_bookshelf sh ON sh.id = bb.bookshelf_id \
                     WHERE bb.book_id = b.id AND {}(sh.name) LIKE ? ESCAPE '\\')",
                    LOWER_FN
                ),
                vec![SqlParam::string(like_pattern(text))],
            ),
            Condition::LanguageIn(codes) => {
                if codes.is_empty() {
                    return SqlFragment::new("0");
                }
                SqlFragment::with_params(
                    format!(
                        "EXISTS (SELECT 1 FROM books_book_languages bl \
                         JOIN books_language l ON l.id = bl.language_id \
                         WHERE bl.book_id = b.id AND l.code IN ({}))",
                        placeholders(codes.len())
                    ),
                    codes.iter().map(SqlParam::string).collect(),
                )
            }
            Condition::MimeTypeIn(types) => {
                if types.is_empty() {
                    return SqlFragment::new("0");
                }
                SqlFragment::with_params(
                    format!(
                        "EXISTS (SELECT 1 FROM books_format f \
                         WHERE f.book_id = b.id AND f.mime_type IN ({}))",
                        placeholders(types.len())
                    ),
                    types.iter().map(SqlParam::string).collect(),
                )
            }
            Condition::GutenbergIdEquals(id) => {
                SqlFragment::with_params("b.gutenberg_id = ?", vec![SqlParam::integer(*id)])
            }
        }
    }

    /// Builds the ORDER BY clause. `id ASC` is always the final tie-breaker.
    pub fn build_order_by(sort: &[SortDirective]) -> String {
        let mut clauses: Vec<String> = sort
            .iter()
            .map(|s| {
                let dir = match s.direction {
                    SortDirection::Ascending => "ASC",
                    SortDirection::Descending => "DESC",
                };
                format!("b.{} {}", s.field.as_str(), dir)
            })
            .collect();
        clauses.push("b.id ASC".to_string());

        format!("ORDER BY {}", clauses.join(", "))
    }

    /// Builds the count of distinct matching books.
    pub fn build_count(predicate: &Predicate) -> SqlFragment {
        let filter = Self::build_where(predicate);
        SqlFragment::with_params(
            format!("SELECT COUNT(*) FROM books_book b WHERE {}", filter.sql),
            filter.params,
        )
    }

    /// Builds one ordered window of matching book rows.
    pub fn build_page(
        predicate: &Predicate,
        sort: &[SortDirective],
        window: PageWindow,
    ) -> SqlFragment {
        let filter = Self::build_where(predicate);
        let mut params = filter.params;
        params.push(SqlParam::integer(i64::from(window.limit)));
        params.push(SqlParam::integer(
            i64::try_from(window.offset).unwrap_or(i64::MAX),
        ));

        SqlFragment::with_params(
            format!(
                "SELECT {} FROM books_book b WHERE {} {} LIMIT ? OFFSET ?",
                BOOK_COLUMNS,
                filter.sql,
                Self::build_order_by(sort)
            ),
            params,
        )
    }

    /// Builds a lookup of the given books, restricted to those matching the
    /// predicate.
    pub fn build_fetch(ids: &[i64], predicate: &Predicate) -> SqlFragment {
        let by_id = SqlFragment::with_params(
            format!("b.id IN ({})", placeholders(ids.len())),
            ids.iter().copied().map(SqlParam::integer).collect(),
        );
        let filter = if predicate.is_trivial() {
            by_id
        } else {
            by_id.and(Self::build_where(predicate))
        };

        SqlFragment::with_params(
            format!("SELECT {} FROM books_book b WHERE {}", BOOK_COLUMNS, filter.sql),
            filter.params,
        )
    }
}

/// Returns `n` comma separated anonymous placeholders.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Wraps lowercased text in `%` wildcards, escaping LIKE metacharacters.
///
/// The column side is lowercased by [`LOWER_FN`].
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
