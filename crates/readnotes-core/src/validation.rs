//! Entity validators for books and notes.
//!
//! Every validator trims text fields first, then collects all violations
//! for the record instead of stopping at the first one. Messages are full
//! sentences that start with the field name, e.g. `Quote can't be blank`.

use thiserror::Error;

use crate::types::{BookId, BookInput, NewBook, NewNote, NoteInput, PageValue};

/// Maximum quote length in characters.
pub const QUOTE_MAX_CHARS: usize = 1000;

/// Maximum memo length in characters.
pub const MEMO_MAX_CHARS: usize = 2000;

/// Largest page number the `notes.page` column can hold.
pub const PAGE_MAX: i64 = i32::MAX as i64;

/// Field violations collected for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", .messages.join(", "))]
pub struct ValidationErrors {
    pub messages: Vec<String>,
}

impl ValidationErrors {
    fn check(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self { messages })
        }
    }
}

/// Validate and normalize a book.
pub fn validate_book(input: &BookInput) -> Result<NewBook, ValidationErrors> {
    let mut messages = Vec::new();

    let title = trimmed(input.title.as_deref());
    if title.is_empty() {
        messages.push(blank("Title"));
    }

    ValidationErrors::check(messages)?;

    Ok(NewBook {
        title: title.to_string(),
        author: non_blank(input.author.as_deref()),
    })
}

/// Validate and normalize a note that will belong to `book_id`.
pub fn validate_note(book_id: BookId, input: &NoteInput) -> Result<NewNote, ValidationErrors> {
    let mut messages = Vec::new();

    let page = validate_page(input.page.as_ref(), &mut messages);

    let quote = trimmed(input.quote.as_deref());
    if quote.is_empty() {
        messages.push(blank("Quote"));
    } else if quote.chars().count() > QUOTE_MAX_CHARS {
        messages.push(too_long("Quote", QUOTE_MAX_CHARS));
    }

    let memo = non_blank(input.memo.as_deref());
    if let Some(memo) = &memo
        && memo.chars().count() > MEMO_MAX_CHARS
    {
        messages.push(too_long("Memo", MEMO_MAX_CHARS));
    }

    match page {
        Some(page) if messages.is_empty() => Ok(NewNote {
            book_id,
            page,
            quote: quote.to_string(),
            memo,
        }),
        _ => Err(ValidationErrors { messages }),
    }
}

fn validate_page(raw: Option<&PageValue>, messages: &mut Vec<String>) -> Option<i32> {
    let outcome = match raw {
        None => Err(blank("Page")),
        Some(PageValue::Integer(n)) => page_in_range(*n),
        Some(PageValue::Decimal(f)) => page_from_decimal(*f),
        Some(PageValue::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Err(blank("Page"))
            } else if let Ok(n) = s.parse::<i64>() {
                page_in_range(n)
            } else if s.parse::<f64>().is_ok() {
                Err("Page must be an integer".to_string())
            } else {
                Err("Page is not a number".to_string())
            }
        }
    };

    match outcome {
        Ok(page) => Some(page),
        Err(message) => {
            messages.push(message);
            None
        }
    }
}

fn page_from_decimal(f: f64) -> Result<i32, String> {
    if !f.is_finite() {
        return Err("Page is not a number".to_string());
    }
    if f.fract() != 0.0 {
        return Err("Page must be an integer".to_string());
    }
    if f <= 0.0 {
        return Err("Page must be greater than 0".to_string());
    }
    if f > PAGE_MAX as f64 {
        return Err(format!("Page must be less than or equal to {PAGE_MAX}"));
    }
    Ok(f as i32)
}

fn page_in_range(n: i64) -> Result<i32, String> {
    if n <= 0 {
        return Err("Page must be greater than 0".to_string());
    }
    i32::try_from(n).map_err(|_| format!("Page must be less than or equal to {PAGE_MAX}"))
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let value = trimmed(value);
    (!value.is_empty()).then(|| value.to_string())
}

fn blank(field: &str) -> String {
    format!("{field} can't be blank")
}

fn too_long(field: &str, max: usize) -> String {
    format!("{field} is too long (maximum is {max} characters)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(page: Option<PageValue>, quote: &str, memo: Option<&str>) -> NoteInput {
        NoteInput {
            page,
            quote: Some(quote.to_string()),
            memo: memo.map(str::to_string),
        }
    }

    fn messages(input: &NoteInput) -> Vec<String> {
        validate_note(BookId(1), input).unwrap_err().messages
    }

    #[test]
    fn test_valid_note_is_trimmed() {
        let new = validate_note(
            BookId(9),
            &note(Some(PageValue::Integer(10)), "  hello ", Some("  memo\n")),
        )
        .unwrap();
        assert_eq!(new.book_id, BookId(9));
        assert_eq!(new.page, 10);
        assert_eq!(new.quote, "hello");
        assert_eq!(new.memo.as_deref(), Some("memo"));
    }

    #[test]
    fn test_blank_memo_becomes_none() {
        let new = validate_note(BookId(1), &note(Some(PageValue::Integer(1)), "q", Some("   "))).unwrap();
        assert_eq!(new.memo, None);
    }

    #[test]
    fn test_quote_blank_after_trim() {
        assert_eq!(
            messages(&note(Some(PageValue::Integer(1)), "   ", None)),
            vec!["Quote can't be blank"]
        );
        let missing = NoteInput {
            page: Some(PageValue::Integer(1)),
            ..NoteInput::default()
        };
        assert_eq!(messages(&missing), vec!["Quote can't be blank"]);
    }

    #[test]
    fn test_length_limits_count_characters() {
        // 1000 multi-byte characters are still within the limit.
        let quote = "あ".repeat(QUOTE_MAX_CHARS);
        assert!(validate_note(BookId(1), &note(Some(PageValue::Integer(1)), &quote, None)).is_ok());

        let quote = "a".repeat(QUOTE_MAX_CHARS + 1);
        assert_eq!(
            messages(&note(Some(PageValue::Integer(1)), &quote, None)),
            vec!["Quote is too long (maximum is 1000 characters)"]
        );

        let memo = "b".repeat(MEMO_MAX_CHARS + 1);
        assert_eq!(
            messages(&note(Some(PageValue::Integer(1)), "ok", Some(&memo))),
            vec!["Memo is too long (maximum is 2000 characters)"]
        );
    }

    #[test]
    fn test_page_rules() {
        let cases = [
            (None, "Page can't be blank"),
            (Some(PageValue::Text("  ".into())), "Page can't be blank"),
            (Some(PageValue::Text("abc".into())), "Page is not a number"),
            (Some(PageValue::Decimal(1.5)), "Page must be an integer"),
            (Some(PageValue::Text("2.5".into())), "Page must be an integer"),
            (Some(PageValue::Text("5.0".into())), "Page must be an integer"),
            (Some(PageValue::Text("1e3".into())), "Page must be an integer"),
            (Some(PageValue::Integer(0)), "Page must be greater than 0"),
            (Some(PageValue::Integer(-3)), "Page must be greater than 0"),
            (
                Some(PageValue::Integer(PAGE_MAX + 1)),
                "Page must be less than or equal to 2147483647",
            ),
        ];

        for (page, expected) in cases {
            assert_eq!(messages(&note(page.clone(), "q", None)), vec![expected], "{page:?}");
        }
    }

    #[test]
    fn test_page_accepts_integer_strings_and_integral_floats() {
        let new = validate_note(BookId(1), &note(Some(PageValue::Text(" 12 ".into())), "q", None))
            .unwrap();
        assert_eq!(new.page, 12);

        let new = validate_note(BookId(1), &note(Some(PageValue::Decimal(3.0)), "q", None)).unwrap();
        assert_eq!(new.page, 3);
    }

    #[test]
    fn test_all_violations_are_collected() {
        let memo = "m".repeat(MEMO_MAX_CHARS + 1);
        let errors = messages(&note(Some(PageValue::Integer(0)), "", Some(&memo)));
        assert_eq!(
            errors,
            vec![
                "Page must be greater than 0",
                "Quote can't be blank",
                "Memo is too long (maximum is 2000 characters)",
            ]
        );
    }

    #[test]
    fn test_book_validation() {
        let book = validate_book(&BookInput {
            title: Some(" Dune ".into()),
            author: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, None);

        let err = validate_book(&BookInput::default()).unwrap_err();
        assert_eq!(err.messages, vec!["Title can't be blank"]);
    }
}
