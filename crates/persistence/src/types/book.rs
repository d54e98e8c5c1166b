//! Book records and their related entities.
//!
//! A [`BookRecord`] is a book together with its eagerly loaded authors,
//! subjects, bookshelves, languages and download formats. It is the shape
//! served to clients. [`SearchDocument`] is the flattened projection kept in
//! the full-text index.

use serde::{Deserialize, Serialize};

/// A person credited on a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Row id.
    pub id: i64,

    /// Display name, usually "Last, First".
    pub name: String,

    /// Year of birth, if known.
    pub birth_year: Option<i16>,

    /// Year of death, if known.
    pub death_year: Option<i16>,
}

impl Author {
    /// Creates an author with unknown life years.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            birth_year: None,
            death_year: None,
        }
    }

    /// Sets the life years.
    pub fn with_years(mut self, birth_year: Option<i16>, death_year: Option<i16>) -> Self {
        self.birth_year = birth_year;
        self.death_year = death_year;
        self
    }
}

/// A subject heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Row id.
    pub id: i64,

    /// Subject heading text.
    pub name: String,
}

/// A curated collection a book is shelved in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookshelf {
    /// Row id.
    pub id: i64,

    /// Bookshelf name.
    pub name: String,
}

/// A language a book is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Row id.
    pub id: i64,

    /// Language code, e.g. `en`.
    pub code: String,
}

/// A downloadable rendition of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// MIME type of the file.
    pub mime_type: String,

    /// Download location.
    pub url: String,
}

/// A book with all related collections loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Row id.
    pub id: i64,

    /// Book title.
    pub title: String,

    /// External catalog number.
    pub gutenberg_id: i64,

    /// Media type, e.g. `Text` or `Sound`.
    pub media_type: String,

    /// Number of downloads, the default sort key.
    pub download_count: i64,

    /// Credited authors.
    pub authors: Vec<Author>,

    /// Subject headings.
    pub subjects: Vec<Subject>,

    /// Bookshelves.
    pub bookshelves: Vec<Bookshelf>,

    /// Languages.
    pub languages: Vec<Language>,

    /// Download formats.
    pub formats: Vec<Format>,
}

impl BookRecord {
    /// Creates a text book with no related entities and no downloads.
    pub fn new(id: i64, gutenberg_id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            gutenberg_id,
            media_type: "Text".to_string(),
            download_count: 0,
            authors: Vec::new(),
            subjects: Vec::new(),
            bookshelves: Vec::new(),
            languages: Vec::new(),
            formats: Vec::new(),
        }
    }

    /// Sets the media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// Sets the download count.
    pub fn with_download_count(mut self, download_count: i64) -> Self {
        self.download_count = download_count;
        self
    }

    /// Adds an author.
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, id: i64, name: impl Into<String>) -> Self {
        self.subjects.push(Subject {
            id,
            name: name.into(),
        });
        self
    }

    /// Adds a bookshelf.
    pub fn with_bookshelf(mut self, id: i64, name: impl Into<String>) -> Self {
        self.bookshelves.push(Bookshelf {
            id,
            name: name.into(),
        });
        self
    }

    /// Adds a language.
    pub fn with_language(mut self, id: i64, code: impl Into<String>) -> Self {
        self.languages.push(Language {
            id,
            code: code.into(),
        });
        self
    }

    /// Adds a download format.
    pub fn with_format(mut self, mime_type: impl Into<String>, url: impl Into<String>) -> Self {
        self.formats.push(Format {
            mime_type: mime_type.into(),
            url: url.into(),
        });
        self
    }
}

/// The flattened form of a book stored in the full-text index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Book id, also used as the index document id.
    pub id: i64,

    /// Book title.
    pub title: String,

    /// External catalog number.
    pub gutenberg_id: i64,

    /// Author names.
    pub authors: Vec<String>,

    /// Subject names.
    pub subjects: Vec<String>,

    /// Bookshelf names.
    pub bookshelves: Vec<String>,

    /// Language codes.
    pub languages: Vec<String>,

    /// Format MIME types.
    pub formats: Vec<String>,

    /// Media type.
    pub media_type: String,

    /// Number of downloads.
    pub download_count: i64,
}

impl From<&BookRecord> for SearchDocument {
    fn from(book: &BookRecord) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            gutenberg_id: book.gutenberg_id,
            authors: book.authors.iter().map(|a| a.name.clone()).collect(),
            subjects: book.subjects.iter().map(|s| s.name.clone()).collect(),
            bookshelves: book.bookshelves.iter().map(|b| b.name.clone()).collect(),
            languages: book.languages.iter().map(|l| l.code.clone()).collect(),
            formats: book.formats.iter().map(|f| f.mime_type.clone()).collect(),
            media_type: book.media_type.clone(),
            download_count: book.download_count,
        }
    }
}
