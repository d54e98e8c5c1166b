//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, 1)?;
        migrate_schema(conn, 1)?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(conn, current_version)?;
    }

    Ok(())
}

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| internal_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| internal_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| internal_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1): entity and join tables.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS books_author (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(128) NOT NULL,
            birth_year SMALLINT,
            death_year SMALLINT
        );

        CREATE TABLE IF NOT EXISTS books_subject (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(256) NOT NULL
        );

        CREATE TABLE IF NOT EXISTS books_bookshelf (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(64) NOT NULL
        );

        CREATE TABLE IF NOT EXISTS books_language (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code VARCHAR(4) NOT NULL
        );

        CREATE TABLE IF NOT EXISTS books_book (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR(1024) NOT NULL,
            gutenberg_id INTEGER NOT NULL UNIQUE,
            media_type VARCHAR(16) NOT NULL,
            download_count INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS books_format (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books_book (id) ON DELETE CASCADE,
            mime_type VARCHAR(32) NOT NULL,
            url VARCHAR(256) NOT NULL
        );

        CREATE TABLE IF NOT EXISTS books_book_authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books_book (id) ON DELETE CASCADE,
            author_id INTEGER NOT NULL REFERENCES books_author (id) ON DELETE CASCADE,
            UNIQUE (book_id, author_id)
        );

        CREATE TABLE IF NOT EXISTS books_book_subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books_book (id) ON DELETE CASCADE,
            subject_id INTEGER NOT NULL REFERENCES books_subject (id) ON DELETE CASCADE,
            UNIQUE (book_id, subject_id)
        );

        CREATE TABLE IF NOT EXISTS books_book_bookshelves (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books_book (id) ON DELETE CASCADE,
            bookshelf_id INTEGER NOT NULL REFERENCES books_bookshelf (id) ON DELETE CASCADE,
            UNIQUE (book_id, bookshelf_id)
        );

        CREATE TABLE IF NOT EXISTS books_book_languages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books_book (id) ON DELETE CASCADE,
            language_id INTEGER NOT NULL REFERENCES books_language (id) ON DELETE CASCADE,
            UNIQUE (book_id, language_id)
        );",
    )
    .map_err(|e| internal_error(format!("Failed to create catalog tables: {}", e)))
}

/// Run schema migrations from current version to latest.
fn migrate_schema(conn: &Connection, from_version: i32) -> StorageResult<()> {
    let mut version = from_version;

    while version < SCHEMA_VERSION {
        match version {
            1 => migrate_v1_to_v2(conn)?,
            _ => {
                return Err(internal_error(format!(
                    "Unknown schema version: {}",
                    version
                )));
            }
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

/// Migrate from schema version 1 to version 2.
///
/// Adds the indexes used by listing order and by the relation lookups in
/// predicate subqueries and eager loading.
fn migrate_v1_to_v2(conn: &Connection) -> StorageResult<()> {
    let migrations = [
        "CREATE INDEX IF NOT EXISTS idx_book_download_count ON books_book (download_count DESC, id)",
        "CREATE INDEX IF NOT EXISTS idx_book_title ON books_book (title, id)",
        "CREATE INDEX IF NOT EXISTS idx_book_media_type ON books_book (media_type)",
        "CREATE INDEX IF NOT EXISTS idx_author_name ON books_author (name)",
        "CREATE INDEX IF NOT EXISTS idx_subject_name ON books_subject (name)",
        "CREATE INDEX IF NOT EXISTS idx_bookshelf_name ON books_bookshelf (name)",
        "CREATE INDEX IF NOT EXISTS idx_language_code ON books_language (code)",
        "CREATE INDEX IF NOT EXISTS idx_format_book ON books_format (book_id)",
        "CREATE INDEX IF NOT EXISTS idx_format_mime_type ON books_format (mime_type)",
        "CREATE INDEX IF NOT EXISTS idx_book_authors_author ON books_book_authors (author_id)",
        "CREATE INDEX IF NOT EXISTS idx_book_subjects_subject ON books_book_subjects (subject_id)",
        "CREATE INDEX IF NOT EXISTS idx_book_bookshelves_bookshelf ON books_book_bookshelves (bookshelf_id)",
        "CREATE INDEX IF NOT EXISTS idx_book_languages_language ON books_book_languages (language_id)",
    ];

    for sql in &migrations {
        conn.execute(sql, [])
            .map_err(|e| internal_error(format!("Migration v1 to v2 failed: {}", e)))?;
    }

    Ok(())
}
