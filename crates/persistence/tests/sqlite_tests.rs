//! SQLite backend integration tests.
//!
//! These tests run catalog listings against an in-memory database seeded
//! with a small fixture catalog.

mod common;

use std::sync::Arc;

use common::*;
use folio_persistence::composite::CompositeCatalog;
use folio_persistence::core::{BookCatalog, BookStorage};
use folio_persistence::error::{ResourceError, SearchError, StorageError};
use folio_persistence::types::{
    Author, BookFilter, BookQuery, BookRecord, CountAuthority, PageRequest, Predicate,
    SortDirective,
};

fn catalog_over_seed() -> CompositeCatalog {
    CompositeCatalog::new(Arc::new(seeded_backend()))
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================================================
// Filter Tests
// ============================================================================

#[tokio::test]
async fn test_topic_matches_subject_or_bookshelf() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        topic: list(&["pirates", "sea"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();

    // Treasure Island by subject, Moby Dick by bookshelf, Verne by subject
    assert_eq!(ids(&page.items), vec![1, 2, 3]);
    assert_eq!(page.count, CountAuthority::Relational(3));
}

#[tokio::test]
async fn test_topic_is_case_insensitive() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        topic: list(&["PIRATES"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();
    assert_eq!(ids(&page.items), vec![1]);
}

#[tokio::test]
async fn test_languages_are_alternatives() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        language: list(&["en", "fr"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();

    assert_eq!(ids(&page.items), vec![4, 1, 2, 3, 5]);
    assert_eq!(page.total(), 5);
}

#[tokio::test]
async fn test_dimensions_are_conjunctive() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        topic: list(&["fantasy"]),
        language: list(&["de"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();
    assert_eq!(ids(&page.items), vec![5]);
}

#[tokio::test]
async fn test_author_alternatives() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        author: list(&["carroll", "verne"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();
    assert_eq!(ids(&page.items), vec![4, 3, 5]);
}

#[tokio::test]
async fn test_title_and_gutenberg_id() {
    let catalog = catalog_over_seed();

    let by_title = BookFilter {
        title: list(&["island"]),
        ..Default::default()
    };
    let page = catalog.list_books(&BookQuery::new(by_title)).await.unwrap();
    assert_eq!(ids(&page.items), vec![1]);

    let by_number = BookFilter {
        gutenberg_id: Some(2229),
        ..Default::default()
    };
    let page = catalog.list_books(&BookQuery::new(by_number)).await.unwrap();
    assert_eq!(ids(&page.items), vec![6]);
}

#[tokio::test]
async fn test_many_matching_formats_listed_once() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        mime_type: list(&[
            "text/plain",
            "application/epub+zip",
            "text/plain; charset=us-ascii",
        ]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();

    let alice = page.items.iter().filter(|b| b.id == 4).count();
    assert_eq!(alice, 1);
    assert_eq!(ids(&page.items), vec![4, 1, 2, 3, 5]);
    assert_eq!(page.total(), 5);
}

#[tokio::test]
async fn test_count_is_distinct_across_joins() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        topic: list(&["a", "e"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();

    assert_eq!(page.total(), 6);
    let mut seen = ids(&page.items);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

fn germinal() -> BookRecord {
    BookRecord::new(7, 56_632, "Germinal")
        .with_download_count(50)
        .with_author(Author::new(7, "Zola, Émile"))
        .with_subject(7, "МИНЁРЫ -- Fiction")
        .with_language(2, "fr")
}

#[tokio::test]
async fn test_non_ascii_matching_is_case_insensitive() {
    let backend = seeded_backend();
    backend.insert_book(&germinal()).unwrap();
    let catalog = CompositeCatalog::new(Arc::new(backend));

    let filter = BookFilter {
        author: list(&["ÉMILE"]),
        ..Default::default()
    };
    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();
    assert_eq!(ids(&page.items), vec![7]);
    assert_eq!(page.total(), 1);

    let filter = BookFilter {
        topic: list(&["минёры"]),
        ..Default::default()
    };
    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();
    assert_eq!(ids(&page.items), vec![7]);
}

#[tokio::test]
async fn test_fetch_agrees_with_in_memory_predicate() {
    let backend = seeded_backend();
    backend.insert_book(&germinal()).unwrap();

    let filter = BookFilter {
        author: list(&["émile"]),
        ..Default::default()
    };
    let predicate = filter.to_predicate();
    assert!(predicate.matches(&germinal()));

    let books = backend.fetch_books(&[7, 1], &predicate).await.unwrap();
    assert_eq!(ids(&books), vec![7]);
}

#[tokio::test]
async fn test_unknown_language_is_empty_not_error() {
    let catalog = catalog_over_seed();
    let filter = BookFilter {
        language: list(&["xx"]),
        ..Default::default()
    };

    let page = catalog.list_books(&BookQuery::new(filter)).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total(), 0);
    assert!(!page.has_next());
    assert!(!page.has_previous());
}

// ============================================================================
// Ordering Tests
// ============================================================================

#[tokio::test]
async fn test_default_ordering_is_most_downloaded_first() {
    let catalog = catalog_over_seed();
    let page = catalog
        .list_books(&BookQuery::new(BookFilter::default()))
        .await
        .unwrap();
    assert_eq!(ids(&page.items), vec![4, 1, 2, 3, 5, 6]);
}

#[tokio::test]
async fn test_ordering_by_title() {
    let catalog = catalog_over_seed();

    let query =
        BookQuery::new(BookFilter::default()).with_sort(SortDirective::parse("title"));
    let page = catalog.list_books(&query).await.unwrap();
    assert_eq!(ids(&page.items), vec![4, 6, 2, 5, 1, 3]);

    let query =
        BookQuery::new(BookFilter::default()).with_sort(SortDirective::parse("-title"));
    let page = catalog.list_books(&query).await.unwrap();
    assert_eq!(ids(&page.items), vec![3, 1, 5, 2, 6, 4]);
}

#[tokio::test]
async fn test_ordering_ascending_downloads() {
    let catalog = catalog_over_seed();
    let query = BookQuery::new(BookFilter::default())
        .with_sort(SortDirective::parse("download_count"));
    let page = catalog.list_books(&query).await.unwrap();
    assert_eq!(ids(&page.items), vec![6, 5, 3, 2, 1, 4]);
}

#[tokio::test]
async fn test_unknown_ordering_falls_back_to_default() {
    let catalog = catalog_over_seed();
    let query =
        BookQuery::new(BookFilter::default()).with_sort(SortDirective::parse("popularity"));
    let page = catalog.list_books(&query).await.unwrap();
    assert_eq!(ids(&page.items), vec![4, 1, 2, 3, 5, 6]);
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_second_page() {
    let catalog = catalog_over_seed();
    let query = BookQuery::new(BookFilter::default()).with_page(PageRequest::new(2, 2));

    let page = catalog.list_books(&query).await.unwrap();

    assert_eq!(ids(&page.items), vec![2, 3]);
    assert_eq!(page.total(), 6);
    assert!(page.has_next());
    assert!(page.has_previous());
}

#[tokio::test]
async fn test_last_page_has_no_next() {
    let catalog = catalog_over_seed();
    let query = BookQuery::new(BookFilter::default()).with_page(PageRequest::new(3, 2));

    let page = catalog.list_books(&query).await.unwrap();
    assert_eq!(ids(&page.items), vec![5, 6]);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_page_past_end_is_rejected() {
    let catalog = catalog_over_seed();
    let query = BookQuery::new(BookFilter::default()).with_page(PageRequest::new(4, 2));

    let err = catalog.list_books(&query).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Search(SearchError::PageOutOfRange { page: 4, total: 6 })
    ));
}

// ============================================================================
// Storage Tests
// ============================================================================

#[tokio::test]
async fn test_reseeding_is_idempotent() {
    let backend = seeded_backend();
    for book in catalog() {
        backend.insert_book(&book).unwrap();
    }

    assert_eq!(backend.count_books(&Predicate::True).await.unwrap(), 6);
    let alice = backend.get_book(4).await.unwrap().unwrap();
    assert_eq!(alice.formats.len(), 3);
    assert_eq!(alice.authors.len(), 1);
    assert_eq!(alice.subjects.len(), 1);
}

#[tokio::test]
async fn test_fetch_by_ids_loads_relations() {
    let backend = seeded_backend();
    let books = backend.fetch_books(&[2, 5], &Predicate::True).await.unwrap();

    let moby = books.iter().find(|b| b.id == 2).unwrap();
    assert_eq!(moby.bookshelves.len(), 2);
    assert_eq!(moby.authors[0].birth_year, Some(1819));

    let glass = books.iter().find(|b| b.id == 5).unwrap();
    let codes: Vec<&str> = glass.languages.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["en", "de"]);
}

#[tokio::test]
async fn test_get_book_detail() {
    let catalog = catalog_over_seed();

    let book = catalog.get_book(120).await;
    assert!(matches!(
        book,
        Err(StorageError::Resource(ResourceError::NotFound { id: 120 }))
    ));

    let book = catalog.get_book(1).await.unwrap();
    assert_eq!(book.gutenberg_id, 120);
    assert_eq!(book.title, "Treasure Island");
}

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.db");

    {
        let backend = folio_persistence::backends::sqlite::SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        backend.insert_book(&catalog()[0]).unwrap();
    }

    let backend = folio_persistence::backends::sqlite::SqliteBackend::open(&path).unwrap();
    backend.init_schema().unwrap();
    let book = backend.get_book(1).await.unwrap().unwrap();
    assert_eq!(book.formats.len(), 2);
}
