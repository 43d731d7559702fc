// src/integrations/google_books/normalize.rs
//
// Google Books volume JSON -> ExternalBookRecord.
// Total over any input: missing or mistyped fields fall back to defaults.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::book::entity::{DEFAULT_DESCRIPTION, DEFAULT_GENRE, DEFAULT_ISBN, DEFAULT_LANGUAGE};
use crate::domain::book::external::{UNKNOWN_AUTHOR, UNKNOWN_PUBLISHER, UNKNOWN_TITLE};
use crate::domain::ExternalBookRecord;

/// Normalize one volume resource (`{ "id": ..., "volumeInfo": {...} }`)
pub fn normalize(volume: &Value) -> ExternalBookRecord {
    let info = &volume["volumeInfo"];

    let authors: Vec<&str> = info["authors"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let genre = info["categories"]
        .as_array()
        .and_then(|list| list.iter().filter_map(Value::as_str).find(|c| !c.trim().is_empty()))
        .unwrap_or(DEFAULT_GENRE);

    ExternalBookRecord {
        external_id: text(&volume["id"]).unwrap_or_default().to_string(),
        title: text(&info["title"]).unwrap_or(UNKNOWN_TITLE).to_string(),
        author: if authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            authors.join(", ")
        },
        description: text(&info["description"])
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        genre: genre.trim().to_string(),
        isbn: pick_isbn(&info["industryIdentifiers"]).unwrap_or_else(|| DEFAULT_ISBN.to_string()),
        publisher: text(&info["publisher"]).unwrap_or(UNKNOWN_PUBLISHER).to_string(),
        language: text(&info["language"]).unwrap_or(DEFAULT_LANGUAGE).to_string(),
        published_date: text(&info["publishedDate"]).and_then(parse_published_date),
        cover_image: text(&info["imageLinks"]["thumbnail"])
            .or_else(|| text(&info["imageLinks"]["smallThumbnail"]))
            .map(str::to_string),
        page_count: info["pageCount"]
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
    }
}

/// Non-blank trimmed string value
fn text(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// ISBN_13, then ISBN_10, then whatever identifier comes first
fn pick_isbn(identifiers: &Value) -> Option<String> {
    let list = identifiers.as_array()?;
    let by_type = |kind: &str| {
        list.iter()
            .find(|entry| entry["type"].as_str() == Some(kind))
            .and_then(|entry| text(&entry["identifier"]))
    };

    by_type("ISBN_13")
        .or_else(|| by_type("ISBN_10"))
        .or_else(|| list.iter().find_map(|entry| text(&entry["identifier"])))
        .map(str::to_string)
}

/// Google reports "YYYY", "YYYY-MM" or "YYYY-MM-DD"; partial dates pin to the first day
fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 1,
    };
    let day: u32 = match parts.next() {
        // tolerate trailing time components
        Some(d) => d.trim().get(..2).unwrap_or(d.trim()).parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_volume() {
        let volume = json!({
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "The Google Story",
                "authors": ["David A. Vise", "Mark Malseed"],
                "publisher": "Random House",
                "publishedDate": "2005-11-15",
                "description": "The story of Google.",
                "industryIdentifiers": [
                    { "type": "ISBN_10", "identifier": "055380457X" },
                    { "type": "ISBN_13", "identifier": "9780553804577" }
                ],
                "pageCount": 207,
                "categories": ["Browsers (Computer programs)", "Business"],
                "imageLinks": {
                    "smallThumbnail": "http://books.google.com/small",
                    "thumbnail": "http://books.google.com/thumb"
                },
                "language": "en"
            }
        });

        let record = normalize(&volume);
        assert_eq!(record.external_id, "zyTCAlFPjgYC");
        assert_eq!(record.title, "The Google Story");
        assert_eq!(record.author, "David A. Vise, Mark Malseed");
        assert_eq!(record.publisher, "Random House");
        assert_eq!(record.published_date, NaiveDate::from_ymd_opt(2005, 11, 15));
        assert_eq!(record.isbn, "9780553804577");
        assert_eq!(record.page_count, 207);
        assert_eq!(record.genre, "Browsers (Computer programs)");
        assert_eq!(record.cover_image.as_deref(), Some("http://books.google.com/thumb"));
        assert_eq!(record.language, "en");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let record = normalize(&json!({ "id": "abc", "volumeInfo": {} }));

        assert_eq!(record.external_id, "abc");
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.author, UNKNOWN_AUTHOR);
        assert_eq!(record.publisher, UNKNOWN_PUBLISHER);
        assert_eq!(record.description, DEFAULT_DESCRIPTION);
        assert_eq!(record.genre, DEFAULT_GENRE);
        assert_eq!(record.isbn, DEFAULT_ISBN);
        assert_eq!(record.language, DEFAULT_LANGUAGE);
        assert_eq!(record.published_date, None);
        assert_eq!(record.cover_image, None);
        assert_eq!(record.page_count, 0);
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let record = normalize(&json!(["not", "an", "object"]));
        assert_eq!(record.external_id, "");
        assert_eq!(record.title, UNKNOWN_TITLE);

        let record = normalize(&json!({
            "id": 17,
            "volumeInfo": { "authors": "solo", "pageCount": -3, "categories": [1, 2] }
        }));
        assert_eq!(record.external_id, "");
        assert_eq!(record.author, UNKNOWN_AUTHOR);
        assert_eq!(record.page_count, 0);
        assert_eq!(record.genre, DEFAULT_GENRE);
    }

    #[test]
    fn test_isbn_preference_falls_through() {
        let ten = json!([
            { "type": "OTHER", "identifier": "UCAL:B123" },
            { "type": "ISBN_10", "identifier": "055380457X" }
        ]);
        assert_eq!(pick_isbn(&ten).as_deref(), Some("055380457X"));

        let other = json!([{ "type": "OTHER", "identifier": "UCAL:B123" }]);
        assert_eq!(pick_isbn(&other).as_deref(), Some("UCAL:B123"));

        assert_eq!(pick_isbn(&json!([])), None);
    }

    #[test]
    fn test_partial_published_dates() {
        assert_eq!(parse_published_date("1998"), NaiveDate::from_ymd_opt(1998, 1, 1));
        assert_eq!(parse_published_date("1998-07"), NaiveDate::from_ymd_opt(1998, 7, 1));
        assert_eq!(parse_published_date("1998-07-21"), NaiveDate::from_ymd_opt(1998, 7, 21));
        assert_eq!(parse_published_date("1998-13"), None);
        assert_eq!(parse_published_date("circa 1900"), None);
    }

    #[test]
    fn test_small_thumbnail_is_used_when_thumbnail_missing() {
        let record = normalize(&json!({
            "id": "x",
            "volumeInfo": { "imageLinks": { "smallThumbnail": "http://small" } }
        }));
        assert_eq!(record.cover_image.as_deref(), Some("http://small"));
    }
}
