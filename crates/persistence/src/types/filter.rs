//! Catalog filters and the predicate tree they compile to.
//!
//! A [`BookFilter`] holds the raw filter values of a request. Values within
//! one dimension are OR'ed; dimensions present together are AND'ed. The
//! result is a backend independent [`Predicate`] that the SQLite and
//! Elasticsearch query builders render into their own query languages.

use serde::{Deserialize, Serialize};

use super::book::BookRecord;
use super::ordering::SortDirective;
use super::pagination::PageRequest;

/// A single leaf test against a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// The title contains the text, ignoring case.
    TitleContains(String),

    /// Some author name contains the text, ignoring case.
    AuthorNameContains(String),

    /// Some subject name contains the text, ignoring case.
    SubjectNameContains(String),

    /// Some bookshelf name contains the text, ignoring case.
    BookshelfNameContains(String),

    /// Some language code equals one of the values.
    LanguageIn(Vec<String>),

    /// Some format MIME type equals one of the values.
    MimeTypeIn(Vec<String>),

    /// The external catalog number equals the value.
    GutenbergIdEquals(i64),
}

impl Condition {
    /// Evaluates the condition against a loaded book.
    pub fn matches(&self, book: &BookRecord) -> bool {
        match self {
            Condition::TitleContains(text) => contains_ignore_case(&book.title, text),
            Condition::AuthorNameContains(text) => book
                .authors
                .iter()
                .any(|a| contains_ignore_case(&a.name, text)),
            Condition::SubjectNameContains(text) => book
                .subjects
                .iter()
                .any(|s| contains_ignore_case(&s.name, text)),
            Condition::BookshelfNameContains(text) => book
                .bookshelves
                .iter()
                .any(|b| contains_ignore_case(&b.name, text)),
            Condition::LanguageIn(codes) => book
                .languages
                .iter()
                .any(|l| codes.iter().any(|c| c == &l.code)),
            Condition::MimeTypeIn(types) => book
                .formats
                .iter()
                .any(|f| types.iter().any(|t| t == &f.mime_type)),
            Condition::GutenbergIdEquals(id) => book.gutenberg_id == *id,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A composable boolean expression over books.
///
/// An empty `And` is true and an empty `Or` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// Matches every book.
    True,

    /// Matches books satisfying a single condition.
    Match(Condition),

    /// Matches books satisfying every child.
    And(Vec<Predicate>),

    /// Matches books satisfying at least one child.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Combines predicates with AND, dropping `True` children.
    pub fn all_of(children: impl IntoIterator<Item = Predicate>) -> Predicate {
        let children: Vec<Predicate> = children
            .into_iter()
            .filter(|p| !p.is_trivial())
            .collect();
        match children.len() {
            0 => Predicate::True,
            1 => children.into_iter().next().unwrap_or(Predicate::True),
            _ => Predicate::And(children),
        }
    }

    /// Combines predicates with OR.
    pub fn any_of(children: impl IntoIterator<Item = Predicate>) -> Predicate {
        let mut children: Vec<Predicate> = children.into_iter().collect();
        if children.len() == 1 {
            return children.remove(0);
        }
        Predicate::Or(children)
    }

    /// Returns true if the predicate matches every book.
    pub fn is_trivial(&self) -> bool {
        match self {
            Predicate::True => true,
            Predicate::And(children) => children.iter().all(Predicate::is_trivial),
            _ => false,
        }
    }

    /// Evaluates the predicate against a loaded book.
    pub fn matches(&self, book: &BookRecord) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Match(condition) => condition.matches(book),
            Predicate::And(children) => children.iter().all(|p| p.matches(book)),
            Predicate::Or(children) => children.iter().any(|p| p.matches(book)),
        }
    }
}

impl From<Condition> for Predicate {
    fn from(condition: Condition) -> Self {
        Predicate::Match(condition)
    }
}

/// Raw filter values of a catalog request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    /// Words matched against subject and bookshelf names.
    pub topic: Vec<String>,

    /// Fragments matched against author names.
    pub author: Vec<String>,

    /// Fragments matched against the title.
    pub title: Vec<String>,

    /// Language codes.
    pub language: Vec<String>,

    /// Format MIME types.
    pub mime_type: Vec<String>,

    /// External catalog number.
    pub gutenberg_id: Option<i64>,
}

impl BookFilter {
    /// Returns true if no dimension is set.
    pub fn is_empty(&self) -> bool {
        self.topic.is_empty()
            && self.author.is_empty()
            && self.title.is_empty()
            && self.language.is_empty()
            && self.mime_type.is_empty()
            && self.gutenberg_id.is_none()
    }

    /// Builds the predicate for this filter.
    pub fn to_predicate(&self) -> Predicate {
        let mut dimensions = Vec::new();

        // Whitespace-only topic words are dropped like empty tokens
        let topic_words: Vec<&str> = self
            .topic
            .iter()
            .map(|word| word.trim())
            .filter(|word| !word.is_empty())
            .collect();
        if !topic_words.is_empty() {
            dimensions.push(Predicate::any_of(topic_words.into_iter().flat_map(|word| {
                [
                    Condition::SubjectNameContains(word.to_string()).into(),
                    Condition::BookshelfNameContains(word.to_string()).into(),
                ]
            })));
        }

        if !self.author.is_empty() {
            dimensions.push(Predicate::any_of(
                self.author
                    .iter()
                    .map(|name| Condition::AuthorNameContains(name.clone()).into()),
            ));
        }

        if !self.title.is_empty() {
            dimensions.push(Predicate::any_of(
                self.title
                    .iter()
                    .map(|text| Condition::TitleContains(text.clone()).into()),
            ));
        }

        if !self.language.is_empty() {
            dimensions.push(Condition::LanguageIn(self.language.clone()).into());
        }

        if !self.mime_type.is_empty() {
            dimensions.push(Condition::MimeTypeIn(self.mime_type.clone()).into());
        }

        if let Some(id) = self.gutenberg_id {
            dimensions.push(Condition::GutenbergIdEquals(id).into());
        }

        Predicate::all_of(dimensions)
    }
}

/// A complete catalog listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    /// Filter values.
    pub filter: BookFilter,

    /// Free text search, if any.
    pub search: Option<String>,

    /// Requested order. Ignored when searching; relevance wins.
    pub sort: Vec<SortDirective>,

    /// The page to return.
    pub page: PageRequest,
}

impl BookQuery {
    /// Creates a query with default ordering and the first page.
    pub fn new(filter: BookFilter) -> Self {
        Self {
            filter,
            search: None,
            sort: SortDirective::default_ordering(),
            page: PageRequest::default(),
        }
    }

    /// Sets the free text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the ordering.
    pub fn with_sort(mut self, sort: Vec<SortDirective>) -> Self {
        self.sort = if sort.is_empty() {
            SortDirective::default_ordering()
        } else {
            sort
        };
        self
    }

    /// Sets the page.
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Returns the trimmed search term, or `None` when it is absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Builds the filter predicate.
    pub fn predicate(&self) -> Predicate {
        self.filter.to_predicate()
    }
}
