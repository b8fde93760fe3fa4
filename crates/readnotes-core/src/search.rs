//! Note search parameter normalization.
//!
//! Query strings arrive as loose text. `NoteQuery::normalize` turns them
//! into a typed query:
//!
//! - `page`, `limit`, `page_from`, `page_to` must be ASCII digits when
//!   present; blank values count as absent
//! - `page` falls back to 1, `limit` to `DEFAULT_LIMIT`, and `limit` is
//!   capped at `MAX_LIMIT`
//! - `q` is split on whitespace into tokens that must all match (AND),
//!   each one against the quote or the memo

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BookId, Note};

/// Page size used when `limit` is absent or zero.
pub const DEFAULT_LIMIT: u32 = 50;

/// Largest page size a client can ask for.
pub const MAX_LIMIT: u32 = 200;

/// Raw search parameters as they appear in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page_from: Option<String>,
    #[serde(default)]
    pub page_to: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Malformed search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchParamError {
    #[error("{name} must be a non-negative integer (got {value:?})")]
    NotAnInteger { name: &'static str, value: String },

    #[error("page_from must be <= page_to")]
    InvertedRange { page_from: i32, page_to: i32 },
}

/// A normalized note search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub book_id: BookId,
    /// Lower-cased keyword tokens. Empty means no keyword filter.
    pub tokens: Vec<String>,
    pub page_from: Option<i32>,
    pub page_to: Option<i32>,
    /// One-based result page.
    pub page: u32,
    /// Page size, always within `1..=MAX_LIMIT`.
    pub limit: u32,
}

impl NoteQuery {
    /// Normalize raw parameters for a search within `book_id`.
    pub fn normalize(book_id: BookId, params: &SearchParams) -> Result<Self, SearchParamError> {
        let page = parse_non_negative("page", params.page.as_deref())?;
        let limit = parse_non_negative("limit", params.limit.as_deref())?;
        let page_from = parse_non_negative("page_from", params.page_from.as_deref())?;
        let page_to = parse_non_negative("page_to", params.page_to.as_deref())?;

        let page_from = page_from.map(clamp_page_number);
        let page_to = page_to.map(clamp_page_number);

        if let (Some(page_from), Some(page_to)) = (page_from, page_to)
            && page_from > page_to
        {
            return Err(SearchParamError::InvertedRange { page_from, page_to });
        }

        let page = match page {
            None | Some(0) => 1,
            Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
        };

        let limit = match limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(n) if n > u64::from(MAX_LIMIT) => MAX_LIMIT,
            Some(n) => n as u32,
        };

        let tokens = params
            .q
            .as_deref()
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();

        Ok(Self {
            book_id,
            tokens,
            page_from,
            page_to,
            page,
            limit,
        })
    }

    /// Number of rows to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// Whether `note` satisfies the filter, ignoring pagination.
    ///
    /// Mirrors the SQL filter used by the store.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        if note.book_id != self.book_id {
            return false;
        }
        if self.page_from.is_some_and(|from| note.page < from) {
            return false;
        }
        if self.page_to.is_some_and(|to| note.page > to) {
            return false;
        }

        let quote = note.quote.to_lowercase();
        let memo = note.memo.as_deref().map(str::to_lowercase);

        self.tokens.iter().all(|token| {
            quote.contains(token.as_str())
                || memo.as_deref().is_some_and(|memo| memo.contains(token.as_str()))
        })
    }

    /// Pagination metadata for `total_count` matches.
    #[must_use]
    pub fn meta(&self, total_count: i64) -> PageMeta {
        let limit = i64::from(self.limit);
        PageMeta {
            total_count,
            page: self.page,
            limit: self.limit,
            total_pages: (total_count + limit - 1) / limit,
        }
    }
}

/// Pagination metadata returned alongside a page of notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Matches before pagination.
    pub total_count: i64,
    pub page: u32,
    pub limit: u32,
    /// `ceil(total_count / limit)`.
    pub total_pages: i64,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub meta: PageMeta,
}

fn parse_non_negative(
    name: &'static str,
    raw: Option<&str>,
) -> Result<Option<u64>, SearchParamError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SearchParamError::NotAnInteger {
            name,
            value: raw.to_string(),
        });
    }

    // Digits-only input can only fail to parse by overflowing.
    Ok(Some(raw.parse().unwrap_or(u64::MAX)))
}

fn clamp_page_number(n: u64) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::types::NoteId;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "q" => params.q = value,
                "page_from" => params.page_from = value,
                "page_to" => params.page_to = value,
                "page" => params.page = value,
                "limit" => params.limit = value,
                other => panic!("unknown key {other}"),
            }
        }
        params
    }

    fn query(pairs: &[(&str, &str)]) -> NoteQuery {
        NoteQuery::normalize(BookId(1), &params(pairs)).unwrap()
    }

    fn note(page: i32, quote: &str, memo: Option<&str>) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId(1),
            book_id: BookId(1),
            page,
            quote: quote.to_string(),
            memo: memo.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_defaults() {
        let q = query(&[]);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, DEFAULT_LIMIT);
        assert!(q.tokens.is_empty());
        assert_eq!(q.page_from, None);
        assert_eq!(q.page_to, None);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_and_limit_normalization() {
        assert_eq!(query(&[("page", "0")]).page, 1);
        assert_eq!(query(&[("page", "  ")]).page, 1);
        assert_eq!(query(&[("limit", "0")]).limit, DEFAULT_LIMIT);
        assert_eq!(query(&[("limit", "9999")]).limit, MAX_LIMIT);
        assert_eq!(query(&[("limit", "200")]).limit, 200);

        let q = query(&[("page", "3"), ("limit", "5")]);
        assert_eq!((q.page, q.limit, q.offset()), (3, 5, 10));
    }

    #[test]
    fn test_limit_always_in_range() {
        for raw in ["", "0", "1", "50", "199", "200", "201", "4294967296", "99999999999999999999999"] {
            let limit = query(&[("limit", raw)]).limit;
            assert!((1..=MAX_LIMIT).contains(&limit), "{raw} -> {limit}");
        }
    }

    #[test]
    fn test_non_integer_parameters_are_rejected() {
        for key in ["page", "limit", "page_from", "page_to"] {
            for raw in ["abc", "-1", "1.5", "+2", "1e3"] {
                let err = NoteQuery::normalize(BookId(1), &params(&[(key, raw)])).unwrap_err();
                assert!(
                    matches!(err, SearchParamError::NotAnInteger { name, .. } if name == key),
                    "{key}={raw}: {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_inverted_range() {
        let err = NoteQuery::normalize(BookId(1), &params(&[("page_from", "20"), ("page_to", "10")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "page_from must be <= page_to");

        let q = query(&[("page_from", "10"), ("page_to", "10")]);
        assert_eq!((q.page_from, q.page_to), (Some(10), Some(10)));
    }

    #[test]
    fn test_whitespace_query_is_no_filter() {
        let q = query(&[("q", "  \t ")]);
        assert!(q.tokens.is_empty());
        assert!(q.matches(&note(1, "anything", None)));
    }

    #[test]
    fn test_tokens_use_and_semantics_across_fields() {
        let q = query(&[("q", "ラーメン　おすすめ")]);
        assert_eq!(q.tokens, vec!["ラーメン", "おすすめ"]);

        assert!(q.matches(&note(1, "駅前のラーメン屋", Some("おすすめ度高め"))));
        assert!(q.matches(&note(1, "ラーメンがおすすめ", None)));
        assert!(!q.matches(&note(1, "ラーメン", Some("普通"))));
        assert!(!q.matches(&note(1, "おすすめ", None)));
    }

    #[test]
    fn test_tokens_are_case_insensitive() {
        let q = query(&[("q", "Rust BOOK")]);
        assert!(q.matches(&note(1, "the rust book", None)));
        assert!(q.matches(&note(1, "RUST", Some("a Book"))));
        assert!(!q.matches(&note(1, "rust", None)));
    }

    #[test]
    fn test_range_is_inclusive() {
        let q = query(&[("page_from", "10"), ("page_to", "20")]);
        let pages: Vec<i32> = [5, 10, 15, 20, 25]
            .into_iter()
            .filter(|page| q.matches(&note(*page, "q", None)))
            .collect();
        assert_eq!(pages, vec![10, 15, 20]);
    }

    #[test]
    fn test_meta_total_pages() {
        let q = query(&[("page", "2"), ("limit", "5")]);
        assert_eq!(
            q.meta(10),
            PageMeta {
                total_count: 10,
                page: 2,
                limit: 5,
                total_pages: 2,
            }
        );
        assert_eq!(q.meta(0).total_pages, 0);
        assert_eq!(q.meta(11).total_pages, 3);

        for limit in 1..=12u32 {
            let raw = limit.to_string();
            let q = query(&[("limit", raw.as_str())]);
            for total in 0..40i64 {
                let expected = (total as f64 / limit as f64).ceil() as i64;
                assert_eq!(q.meta(total).total_pages, expected);
            }
        }
    }
}
