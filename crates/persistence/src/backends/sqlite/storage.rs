//! BookStorage implementation for SQLite.

use std::collections::HashMap;

use async_trait::async_trait;
use rusqlite::{Connection, Row, params};
use tracing::debug;

use crate::core::{Backend, BookStorage};
use crate::error::{BackendError, StorageError, StorageResult, ValidationError};
use crate::types::{
    Author, BookRecord, Bookshelf, Format, Language, PageWindow, Predicate, SortDirective,
    Subject,
};

use super::SqliteBackend;
use super::backend::internal_error;
use super::query_builder::{BOOK_COLUMNS, QueryBuilder, SqlFragment, SqlParam, placeholders};

fn query_error(e: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::QueryError {
        backend_name: "sqlite".to_string(),
        message: e.to_string(),
    })
}

/// Reads a book row selected with [`BOOK_COLUMNS`], leaving relations empty.
fn map_book_row(row: &Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        gutenberg_id: row.get(2)?,
        media_type: row.get(3)?,
        download_count: row.get(4)?,
        authors: Vec::new(),
        subjects: Vec::new(),
        bookshelves: Vec::new(),
        languages: Vec::new(),
        formats: Vec::new(),
    })
}

fn query_books(conn: &Connection, fragment: &SqlFragment) -> StorageResult<Vec<BookRecord>> {
    let mut stmt = conn.prepare(&fragment.sql).map_err(query_error)?;
    let params = fragment.bind_params();
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let rows = stmt
        .query_map(param_refs.as_slice(), map_book_row)
        .map_err(query_error)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
}

/// Runs a relation query returning `(book_id, T)` rows for the given books.
fn query_related<T>(
    conn: &Connection,
    sql: &str,
    book_ids: &[i64],
    map: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
) -> StorageResult<Vec<(i64, T)>> {
    let mut stmt = conn.prepare(sql).map_err(query_error)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(book_ids.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, map(row)?))
        })
        .map_err(query_error)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
}

/// Eager-loads all related collections, one batched query per relation.
fn load_relations(conn: &Connection, books: &mut [BookRecord]) -> StorageResult<()> {
    if books.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    let position: HashMap<i64, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let marks = placeholders(ids.len());

    let authors = query_related(
        conn,
        &format!(
            "SELECT ba.book_id, a.id, a.name, a.birth_year, a.death_year \
             FROM books_book_authors ba JOIN books_author a ON a.id = ba.author_id \
             WHERE ba.book_id IN ({}) ORDER BY ba.id",
            marks
        ),
        &ids,
        |row| {
            Ok(Author {
                id: row.get(1)?,
                name: row.get(2)?,
                birth_year: row.get(3)?,
                death_year: row.get(4)?,
            })
        },
    )?;
    for (book_id, author) in authors {
        if let Some(&i) = position.get(&book_id) {
            books[i].authors.push(author);
        }
    }

    let subjects = query_related(
        conn,
        &format!(
            "SELECT bs.book_id, s.id, s.name \
             FROM books_book_subjects bs JOIN books_subject s ON s.id = bs.subject_id \
             WHERE bs.book_id IN ({}) ORDER BY bs.id",
            marks
        ),
        &ids,
        |row| {
            Ok(Subject {
                id: row.get(1)?,
                name: row.get(2)?,
            })
        },
    )?;
    for (book_id, subject) in subjects {
        if let Some(&i) = position.get(&book_id) {
            books[i].subjects.push(subject);
        }
    }

    let bookshelves = query_related(
        conn,
        &format!(
            "SELECT bb.book_id, sh.id, sh.name \
             FROM books_book_bookshelves bb JOIN books_bookshelf sh ON sh.id = bb.bookshelf_id \
             WHERE bb.book_id IN ({}) ORDER BY bb.id",
            marks
        ),
        &ids,
        |row| {
            Ok(Bookshelf {
                id: row.get(1)?,
                name: row.get(2)?,
            })
        },
    )?;
    for (book_id, bookshelf) in bookshelves {
        if let Some(&i) = position.get(&book_id) {
            books[i].bookshelves.push(bookshelf);
        }
    }

    let languages = query_related(
        conn,
        &format!(
            "SELECT bl.book_id, l.id, l.code \
             FROM books_book_languages bl JOIN books_language l ON l.id = bl.language_id \
             WHERE bl.book_id IN ({}) ORDER BY bl.id",
            marks
        ),
        &ids,
        |row| {
            Ok(Language {
                id: row.get(1)?,
                code: row.get(2)?,
            })
        },
    )?;
    for (book_id, language) in languages {
        if let Some(&i) = position.get(&book_id) {
            books[i].languages.push(language);
        }
    }

    let formats = query_related(
        conn,
        &format!(
            "SELECT f.book_id, f.mime_type, f.url FROM books_format f \
             WHERE f.book_id IN ({}) ORDER BY f.id",
            marks
        ),
        &ids,
        |row| {
            Ok(Format {
                mime_type: row.get(1)?,
                url: row.get(2)?,
            })
        },
    )?;
    for (book_id, format) in formats {
        if let Some(&i) = position.get(&book_id) {
            books[i].formats.push(format);
        }
    }

    Ok(())
}

impl SqliteBackend {
    /// Inserts or updates a book together with its related rows.
    ///
    /// Related entities are keyed by their ids. Re-inserting the same record
    /// leaves the database unchanged.
    pub fn insert_book(&self, book: &BookRecord) -> StorageResult<()> {
        if book.title.trim().is_empty() {
            return Err(ValidationError::InvalidRecord {
                message: format!("book {} has an empty title", book.id),
            }
            .into());
        }

        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        tx.execute(
            "INSERT INTO books_book (id, title, gutenberg_id, media_type, download_count)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                gutenberg_id = excluded.gutenberg_id,
                media_type = excluded.media_type,
                download_count = excluded.download_count",
            params![
                book.id,
                book.title,
                book.gutenberg_id,
                book.media_type,
                book.download_count
            ],
        )
        .map_err(query_error)?;

        for author in &book.authors {
            tx.execute(
                "INSERT INTO books_author (id, name, birth_year, death_year) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    birth_year = excluded.birth_year,
                    death_year = excluded.death_year",
                params![author.id, author.name, author.birth_year, author.death_year],
            )
            .map_err(query_error)?;
            tx.execute(
                "INSERT OR IGNORE INTO books_book_authors (book_id, author_id) VALUES (?1, ?2)",
                params![book.id, author.id],
            )
            .map_err(query_error)?;
        }

        for subject in &book.subjects {
            tx.execute(
                "INSERT INTO books_subject (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![subject.id, subject.name],
            )
            .map_err(query_error)?;
            tx.execute(
                "INSERT OR IGNORE INTO books_book_subjects (book_id, subject_id) VALUES (?1, ?2)",
                params![book.id, subject.id],
            )
            .map_err(query_error)?;
        }

        for bookshelf in &book.bookshelves {
            tx.execute(
                "INSERT INTO books_bookshelf (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![bookshelf.id, bookshelf.name],
            )
            .map_err(query_error)?;
            tx.execute(
                "INSERT OR IGNORE INTO books_book_bookshelves (book_id, bookshelf_id) VALUES (?1, ?2)",
                params![book.id, bookshelf.id],
            )
            .map_err(query_error)?;
        }

        for language in &book.languages {
            tx.execute(
                "INSERT INTO books_language (id, code) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET code = excluded.code",
                params![language.id, language.code],
            )
            .map_err(query_error)?;
            tx.execute(
                "INSERT OR IGNORE INTO books_book_languages (book_id, language_id) VALUES (?1, ?2)",
                params![book.id, language.id],
            )
            .map_err(query_error)?;
        }

        tx.execute("DELETE FROM books_format WHERE book_id = ?1", [book.id])
            .map_err(query_error)?;
        for format in &book.formats {
            tx.execute(
                "INSERT INTO books_format (book_id, mime_type, url) VALUES (?1, ?2, ?3)",
                params![book.id, format.mime_type, format.url],
            )
            .map_err(query_error)?;
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

        debug!(id = book.id, gutenberg_id = book.gutenberg_id, "Stored book");
        Ok(())
    }
}

#[async_trait]
impl BookStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn count_books(&self, predicate: &Predicate) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let fragment = QueryBuilder::build_count(predicate);
        let params = fragment.bind_params();
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = conn
            .query_row(&fragment.sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(query_error)?;

        Ok(count.max(0) as u64)
    }

    async fn find_books(
        &self,
        predicate: &Predicate,
        sort: &[SortDirective],
        window: PageWindow,
    ) -> StorageResult<Vec<BookRecord>> {
        let conn = self.get_connection()?;
        let fragment = QueryBuilder::build_page(predicate, sort, window);

        let mut books = query_books(&conn, &fragment)?;
        load_relations(&conn, &mut books)?;
        Ok(books)
    }

    async fn fetch_books(
        &self,
        ids: &[i64],
        predicate: &Predicate,
    ) -> StorageResult<Vec<BookRecord>> {
        let mut unique: Vec<i64> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_connection()?;
        let fragment = QueryBuilder::build_fetch(&unique, predicate);

        let mut books = query_books(&conn, &fragment)?;
        load_relations(&conn, &mut books)?;
        Ok(books)
    }

    async fn get_book(&self, id: i64) -> StorageResult<Option<BookRecord>> {
        let conn = self.get_connection()?;
        let fragment = SqlFragment::with_params(
            format!("SELECT {} FROM books_book b WHERE b.id = ?", BOOK_COLUMNS),
            vec![SqlParam::integer(id)],
        );

        let mut books = query_books(&conn, &fragment)?;
        load_relations(&conn, &mut books)?;
        Ok(books.pop())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Backend::health_check(self).await
    }
}
