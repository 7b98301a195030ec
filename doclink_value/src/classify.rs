// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic classification of scalar values.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

/// What a value looks like, for display and linking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// JSON `null`.
    Null,
    /// The field is absent.
    Undefined,
    /// `true` or `false`.
    Boolean,
    /// Any number.
    Number,
    /// A 24 hex digit string, heuristically a 12-byte database identifier.
    IdentifierString,
    /// An ISO-8601 date-time string naming a real calendar instant.
    TimestampString,
    /// Any other string.
    PlainString,
    /// Arrays and objects.
    Other,
}

impl Kind {
    /// Returns `true` for kinds that take part in reference linking.
    #[must_use]
    pub fn is_linkable(self) -> bool {
        self == Self::IdentifierString
    }
}

// `YYYY-MM-DDThh:mm:ss[.fraction][Z|±hh:mm]`
static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$")
        .expect("timestamp pattern is valid")
});

/// Returns `true` if `s` is exactly 24 hex digits (either case).
///
/// This is a heuristic for a 12-byte identifier written as hex: any 24 digit
/// hex string qualifies, including ones that were never identifiers.
#[must_use]
pub fn is_identifier_like(s: &str) -> bool {
    s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Returns `true` if `s` has the ISO-8601 date-time shape *and* names a real instant.
///
/// `2024-13-45T10:30:00Z` has the shape but no such date exists, so it is not
/// a timestamp.
#[must_use]
pub fn is_timestamp_like(s: &str) -> bool {
    if !TIMESTAMP_SHAPE.is_match(s) {
        return false;
    }
    let has_offset = s.ends_with('Z') || s[19..].contains(['+', '-']);
    if has_offset {
        DateTime::parse_from_rfc3339(s).is_ok()
    } else {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
    }
}

/// Classifies a present value.
///
/// Identifiers are tested before timestamps, and both before plain strings.
#[must_use]
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Boolean,
        Value::Number(_) => Kind::Number,
        Value::String(s) if is_identifier_like(s) => Kind::IdentifierString,
        Value::String(s) if is_timestamp_like(s) => Kind::TimestampString,
        Value::String(_) => Kind::PlainString,
        Value::Array(_) | Value::Object(_) => Kind::Other,
    }
}

/// Classifies a possibly absent value; absence is [`Kind::Undefined`].
#[must_use]
pub fn classify_slot(value: Option<&Value>) -> Kind {
    value.map_or(Kind::Undefined, classify)
}

/// Text shown for a leaf of the given kind.
///
/// Never fails: anything unexpected is shown as compact JSON.
#[must_use]
pub fn display_text(value: &Value, kind: Kind) -> String {
    match (kind, value) {
        (Kind::Undefined, _) => "undefined".to_owned(),
        (Kind::IdentifierString, Value::String(s)) => format!("ObjectId(\"{s}\")"),
        (Kind::TimestampString, Value::String(s)) => s.clone(),
        (Kind::PlainString, Value::String(s)) => format!("\"{s}\""),
        _ => value.to_string(),
    }
}
