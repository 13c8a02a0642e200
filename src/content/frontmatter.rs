//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde_yaml::Value;
use std::path::Path;

use crate::error::{ContentError, Result};

/// Header block of a post document, with key order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    data: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Split a document into its header and body.
    ///
    /// A document opens a header only when its first line is `---`; the
    /// header then runs to the next `---` (or `...`) line and must be a YAML
    /// mapping. Documents without an opening delimiter have an empty header.
    /// `path` is only used for error reporting.
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = strip_opening_delimiter(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            let marker = line.trim_end();
            if marker == "---" || marker == "..." {
                let header = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(header, path)?, body));
            }
            offset += line.len();
        }

        Err(ContentError::parse(
            path,
            "header block is not closed with `---`",
        ))
    }

    fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| ContentError::parse(path, e.to_string()))?;

        let mapping = match value {
            // a header holding only comments
            Value::Null => return Ok(FrontMatter::default()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(ContentError::parse(
                    path,
                    format!("expected key-value pairs, found {}", yaml_kind(&other)),
                ))
            }
        };

        let mut data = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = match key {
                Value::String(key) => key,
                other => {
                    return Err(ContentError::parse(
                        path,
                        format!("header keys must be strings, found {}", yaml_kind(&other)),
                    ))
                }
            };
            data.insert(key, value);
        }

        Ok(Self { data })
    }

    /// Raw header value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Header keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    pub fn image(&self) -> Option<&str> {
        self.get_str("image")
    }

    /// Whether the `active` flag is set to a truthy value
    pub fn is_active(&self) -> bool {
        self.get("active").map(is_truthy).unwrap_or(false)
    }

    /// Parse the `date` value into a timestamp
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.get_str("date").and_then(parse_date_string)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let first_line = content.split_inclusive('\n').next()?;
    if first_line.trim_end() == "---" {
        Some(&content[first_line.len()..])
    } else {
        None
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Truthiness of a header value, as used by the `active` flag
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && !s.eq_ignore_ascii_case("false")
        }
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}
