//! Listing order.
//!
//! Clients choose the order with the `ordering` parameter: a comma separated
//! list of sortable fields, each optionally prefixed with `-` for descending.
//! Unknown fields are ignored; an empty result falls back to
//! `-download_count`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A field books can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Number of downloads.
    DownloadCount,
    /// Book title.
    Title,
}

impl SortField {
    /// Parses a client facing field name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "download_count" => Some(SortField::DownloadCount),
            "title" => Some(SortField::Title),
            _ => None,
        }
    }

    /// Returns the client facing field name, which is also the column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::DownloadCount => "download_count",
            SortField::Title => "title",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order (default).
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

/// A single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    /// The field to sort by.
    pub field: SortField,

    /// The sort direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Creates an ascending sort key.
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending sort key.
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Parses an `ordering` value such as `-download_count,title`.
    ///
    /// Unknown fields are skipped. Returns the default ordering when nothing
    /// usable remains.
    pub fn parse(s: &str) -> Vec<Self> {
        let directives: Vec<Self> = s
            .split(',')
            .map(str::trim)
            .filter_map(|token| {
                let (name, direction) = match token.strip_prefix('-') {
                    Some(rest) => (rest, SortDirection::Descending),
                    None => (token, SortDirection::Ascending),
                };
                SortField::parse(name).map(|field| Self { field, direction })
            })
            .collect();

        if directives.is_empty() {
            Self::default_ordering()
        } else {
            directives
        }
    }

    /// The ordering used when the client asks for none: most downloaded first.
    pub fn default_ordering() -> Vec<Self> {
        vec![Self::desc(SortField::DownloadCount)]
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == SortDirection::Descending {
            write!(f, "-")?;
        }
        write!(f, "{}", self.field.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        assert_eq!(
            SortDirective::parse("title"),
            vec![SortDirective::asc(SortField::Title)]
        );
        assert_eq!(
            SortDirective::parse("-title"),
            vec![SortDirective::desc(SortField::Title)]
        );
        assert_eq!(
            SortDirective::parse("download_count"),
            vec![SortDirective::asc(SortField::DownloadCount)]
        );
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            SortDirective::parse("-download_count,title"),
            vec![
                SortDirective::desc(SortField::DownloadCount),
                SortDirective::asc(SortField::Title),
            ]
        );
    }

    #[test]
    fn test_unknown_fields_fall_back_to_default() {
        assert_eq!(SortDirective::parse("gutenberg_id"), SortDirective::default_ordering());
        assert_eq!(SortDirective::parse(""), SortDirective::default_ordering());
        assert_eq!(
            SortDirective::parse("bogus,-title"),
            vec![SortDirective::desc(SortField::Title)]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SortDirective::desc(SortField::DownloadCount).to_string(), "-download_count");
        assert_eq!(SortDirective::asc(SortField::Title).to_string(), "title");
    }
}
