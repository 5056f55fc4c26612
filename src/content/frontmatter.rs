//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::IngestError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter block of a post source.
///
/// Unknown keys are rejected so a typo like `publised: true` fails the build
/// instead of silently producing a draft.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub published: Option<bool>,
}

impl FrontMatter {
    /// Parse front-matter from the contents of `path`.
    /// Returns (front_matter, body)
    pub fn parse<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str), IngestError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(path, content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(path, content);
        }

        Err(IngestError::MissingFrontMatter(path.to_path_buf()))
    }

    fn parse_yaml<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str), IngestError> {
        let rest = &content[3..];

        let Some((yaml_end, body_start)) = closing_fence(rest) else {
            return Err(IngestError::Unterminated(path.to_path_buf()));
        };
        let yaml_content = &rest[..yaml_end];
        let body = rest[body_start..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| IngestError::Yaml(path.to_path_buf(), e))?;
        Ok((fm, body))
    }

    fn parse_json<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str), IngestError> {
        // JSON front-matter fenced by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let Some(end_pos) = rest.find(";;;") else {
                return Err(IngestError::Unterminated(path.to_path_buf()));
            };
            let fm = serde_json::from_str(&rest[..end_pos])
                .map_err(|e| IngestError::Json(path.to_path_buf(), e))?;
            let body = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
            return Ok((fm, body));
        }

        // Bare JSON object at the start; the body begins where the object ends
        let mut stream = serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
        match stream.next() {
            Some(Ok(fm)) => {
                let body = content[stream.byte_offset()..].trim_start_matches(['\n', '\r']);
                Ok((fm, body))
            }
            Some(Err(e)) => Err(IngestError::Json(path.to_path_buf(), e)),
            None => Err(IngestError::MissingFrontMatter(path.to_path_buf())),
        }
    }

    /// Parse the date string into a UTC instant
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Locate the line that is exactly `---` after the opening fence.
/// Returns where the YAML block ends and where the body starts.
fn closing_fence(rest: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        // The first piece is the remainder of the opening line
        if start > 0 && line.trim_end() == "---" {
            return Some((start, offset));
        }
    }
    None
}

/// Parse a date string in the formats authors actually write.
/// Values without an offset are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 7] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn path() -> &'static Path {
        Path::new("posts/test.mdx")
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: First post
date: 2024-01-15 10:30:00
tags:
  - rust
  - nextjs
published: true
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(path(), content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.description.as_deref(), Some("First post"));
        assert_eq!(fm.tags, vec!["rust", "nextjs"]);
        assert_eq!(fm.published, Some(true));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "date": "2024-06-01", "tags": ["a", "b"]}

This is content.
"#;

        let (fm, body) = FrontMatter::parse(path(), content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(fm.published, None);
        assert!(body.starts_with("This is content."));
    }

    #[test]
    fn test_parse_fenced_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\", \"date\": \"2024-06-01\"}\n;;;\nBody\n";
        let (fm, body) = FrontMatter::parse(path(), content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Fenced"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single Tag Post\ndate: 2024-01-15\ntags: Notes\n---\n";
        let (fm, _) = FrontMatter::parse(path(), content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let content = "---\ntitle: Typo\ndate: 2024-01-15\npublised: true\n---\nBody\n";
        let err = FrontMatter::parse(path(), content).unwrap_err();
        assert!(matches!(err, IngestError::Yaml(..)));
    }

    #[test]
    fn test_missing_frontmatter_rejected() {
        let err = FrontMatter::parse(path(), "# Just markdown\n").unwrap_err();
        assert!(matches!(err, IngestError::MissingFrontMatter(p) if p == path()));
    }

    #[test]
    fn test_unterminated_frontmatter_rejected() {
        let err = FrontMatter::parse(path(), "---\ntitle: Open\n").unwrap_err();
        assert!(matches!(err, IngestError::Unterminated(_)));
    }

    #[test]
    fn test_closing_fence_must_be_whole_line() {
        let content = "---\ntitle: Fence\n---extra: x\ndate: 2024-01-01\npublished: true\n--- \r\nBody\n";
        let err = FrontMatter::parse(path(), content).unwrap_err();
        assert!(matches!(err, IngestError::Yaml(..)));

        let content = "---\ntitle: Fence\ndescription: a---b\npublished: true\n---\r\nBody\n";
        let (fm, body) = FrontMatter::parse(path(), content).unwrap();
        assert_eq!(fm.description.as_deref(), Some("a---b"));
        assert_eq!(fm.published, Some(true));
        assert_eq!(body, "Body\n");

        let err = FrontMatter::parse(path(), "---\ntitle: Open\n---more\n").unwrap_err();
        assert!(matches!(err, IngestError::Unterminated(_)));
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, body) = FrontMatter::parse(path(), "---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_date_formats() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!(dt.hour(), 0);

        let dt = parse_date_string("2024/01/15 10:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));

        let dt = parse_date_string("2024-01-15T10:30:00+09:00").unwrap();
        assert_eq!(dt.hour(), 1);

        assert!(parse_date_string("2024-13-45").is_none());
        assert!(parse_date_string("yesterday").is_none());
    }
}
