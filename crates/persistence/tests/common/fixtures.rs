//! Seed data shared by the integration tests.

use folio_persistence::backends::sqlite::SqliteBackend;
use folio_persistence::types::{Author, BookRecord};

/// Creates an in-memory backend with the schema applied.
pub fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// A small catalog covering every filter dimension.
///
/// | id | title | downloads | languages | subject / shelf |
/// |----|-------|-----------|-----------|-----------------|
/// | 1 | Treasure Island | 900 | en | Pirates / Adventure |
/// | 2 | Moby Dick | 700 | en | Whaling / Sea Stories |
/// | 3 | Vingt mille lieues sous les mers | 500 | fr | Sea voyages / - |
/// | 4 | Alice's Adventures in Wonderland | 1500 | en | Fantasy / Children's |
/// | 5 | Through the Looking-Glass | 300 | en, de | Fantasy / Children's |
/// | 6 | Faust | 100 | de | Drama / - |
pub fn catalog() -> Vec<BookRecord> {
    let stevenson = Author::new(1, "Stevenson, Robert Louis").with_years(Some(1850), Some(1894));
    let melville = Author::new(2, "Melville, Herman").with_years(Some(1819), Some(1891));
    let verne = Author::new(3, "Verne, Jules").with_years(Some(1828), Some(1905));
    let carroll = Author::new(4, "Carroll, Lewis").with_years(Some(1832), Some(1898));
    let goethe = Author::new(5, "Goethe, Johann Wolfgang von");

    vec![
        BookRecord::new(1, 120, "Treasure Island")
            .with_download_count(900)
            .with_author(stevenson)
            .with_subject(1, "Pirates -- Juvenile fiction")
            .with_bookshelf(1, "Adventure")
            .with_language(1, "en")
            .with_format("text/plain", "https://www.gutenberg.org/ebooks/120.txt.utf-8")
            .with_format("text/html", "https://www.gutenberg.org/ebooks/120.html.images"),
        BookRecord::new(2, 2701, "Moby Dick; Or, The Whale")
            .with_download_count(700)
            .with_author(melville)
            .with_subject(2, "Whaling -- Fiction")
            .with_bookshelf(2, "Best Books Ever Listings")
            .with_bookshelf(3, "Sea Stories")
            .with_language(1, "en")
            .with_format("text/plain", "https://www.gutenberg.org/ebooks/2701.txt.utf-8"),
        BookRecord::new(3, 5097, "Vingt mille lieues sous les mers")
            .with_download_count(500)
            .with_author(verne)
            .with_subject(3, "Sea voyages -- Fiction")
            .with_language(2, "fr")
            .with_format("application/epub+zip", "https://www.gutenberg.org/ebooks/5097.epub"),
        BookRecord::new(4, 11, "Alice's Adventures in Wonderland")
            .with_download_count(1500)
            .with_author(carroll.clone())
            .with_subject(4, "Fantasy fiction")
            .with_bookshelf(4, "Children's Literature")
            .with_language(1, "en")
            .with_format("text/plain", "https://www.gutenberg.org/ebooks/11.txt.utf-8")
            .with_format("text/plain; charset=us-ascii", "https://www.gutenberg.org/files/11/11-0.txt")
            .with_format("application/epub+zip", "https://www.gutenberg.org/ebooks/11.epub"),
        BookRecord::new(5, 12, "Through the Looking-Glass")
            .with_download_count(300)
            .with_author(carroll)
            .with_subject(4, "Fantasy fiction")
            .with_bookshelf(4, "Children's Literature")
            .with_language(1, "en")
            .with_language(3, "de")
            .with_format("text/plain", "https://www.gutenberg.org/ebooks/12.txt.utf-8"),
        BookRecord::new(6, 2229, "Faust")
            .with_download_count(100)
            .with_author(goethe)
            .with_subject(5, "Drama")
            .with_language(3, "de")
            .with_format("text/html", "https://www.gutenberg.org/ebooks/2229.html.images"),
    ]
}

/// Creates a backend seeded with [`catalog`].
pub fn seeded_backend() -> SqliteBackend {
    let backend = create_backend();
    for book in catalog() {
        backend.insert_book(&book).expect("Failed to insert book");
    }
    backend
}

/// Collects the ids of a page of books.
pub fn ids(books: &[BookRecord]) -> Vec<i64> {
    books.iter().map(|b| b.id).collect()
}
