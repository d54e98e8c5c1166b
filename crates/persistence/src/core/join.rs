//! Reordering relationally loaded books into search rank order.

use std::collections::HashMap;

use tracing::debug;

use crate::types::BookRecord;

/// Sorts `books` by the position of their id in `ranked_ids`.
///
/// Duplicate ids keep their first rank. Books whose id is not ranked are
/// dropped, and ranked ids with no loaded book are skipped silently.
pub fn preserve_rank_order(ranked_ids: &[i64], books: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut rank: HashMap<i64, usize> = HashMap::with_capacity(ranked_ids.len());
    for (position, id) in ranked_ids.iter().enumerate() {
        rank.entry(*id).or_insert(position);
    }

    let mut ranked: Vec<(usize, BookRecord)> = books
        .into_iter()
        .filter_map(|book| rank.get(&book.id).map(|position| (*position, book)))
        .collect();
    ranked.sort_by_key(|(position, _)| *position);
    ranked.dedup_by_key(|(position, _)| *position);

    if ranked.len() < rank.len() {
        debug!(
            ranked = rank.len(),
            loaded = ranked.len(),
            "Dropped search hits with no matching book"
        );
    }

    ranked.into_iter().map(|(_, book)| book).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64) -> BookRecord {
        BookRecord::new(id, id * 100, format!("Book {}", id))
    }

    fn ids(books: &[BookRecord]) -> Vec<i64> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_restores_rank_order() {
        let loaded = vec![book(1), book(2), book(3)];
        let ordered = preserve_rank_order(&[3, 1, 2], loaded);
        assert_eq!(ids(&ordered), vec![3, 1, 2]);
    }

    #[test]
    fn test_stale_ids_omitted() {
        let loaded = vec![book(7), book(5)];
        let ordered = preserve_rank_order(&[5, 999, 7], loaded);
        assert_eq!(ids(&ordered), vec![5, 7]);
    }

    #[test]
    fn test_duplicate_ids_keep_first_rank() {
        let loaded = vec![book(2), book(1)];
        let ordered = preserve_rank_order(&[1, 2, 1], loaded);
        assert_eq!(ids(&ordered), vec![1, 2]);
    }

    #[test]
    fn test_unranked_books_dropped() {
        let loaded = vec![book(1), book(4)];
        let ordered = preserve_rank_order(&[1], loaded);
        assert_eq!(ids(&ordered), vec![1]);
    }

    #[test]
    fn test_empty() {
        assert!(preserve_rank_order(&[], Vec::new()).is_empty());
        assert!(preserve_rank_order(&[1, 2], Vec::new()).is_empty());
    }
}
