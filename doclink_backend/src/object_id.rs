// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use serde_json::{Map, Value};

use crate::request::ID_FIELD;

/// Extended JSON key for a native identifier.
pub const OID_KEY: &str = "$oid";

/// A 12-byte native document identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Extended JSON form: `{"$oid": "<hex>"}`.
    #[must_use]
    pub fn to_extended_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(OID_KEY.to_owned(), Value::String(self.to_hex()));
        Value::Object(map)
    }

    /// Reads either a 24 hex digit string or an extended JSON identifier.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Object(map) if map.len() == 1 => match map.get(OID_KEY) {
                Some(Value::String(s)) => s.parse().ok(),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromStr for ObjectId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0_u8; 12];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Rewrites a find filter so identifier lookups typed as text hit native ids.
///
/// Only a top-level `_id` holding a 24 hex digit string is converted. Anything
/// that fails to decode is passed through unchanged.
#[must_use]
pub fn translate_query(query: &Value) -> Value {
    let Value::Object(fields) = query else {
        return query.clone();
    };
    let Some(Value::String(raw)) = fields.get(ID_FIELD) else {
        return query.clone();
    };
    if raw.len() != 24 {
        return query.clone();
    }
    match raw.parse::<ObjectId>() {
        Ok(oid) => {
            let mut translated = fields.clone();
            translated.insert(ID_FIELD.to_owned(), oid.to_extended_json());
            Value::Object(translated)
        }
        Err(err) => {
            tracing::debug!(%raw, %err, "keeping raw _id filter");
            query.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn hex_round_trip_is_lowercase() {
        let oid: ObjectId = "507F1F77BCF86CD799439011".parse().unwrap();
        assert_eq!(oid.to_string(), "507f1f77bcf86cd799439011");
        assert_eq!(oid.bytes()[0], 0x50);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!("507f1f77bcf86cd79943901".parse::<ObjectId>().is_err());
        assert!("507f1f77bcf86cd79943901z".parse::<ObjectId>().is_err());
    }

    #[test]
    fn from_value_accepts_both_spellings() {
        let plain = json!("507f1f77bcf86cd799439011");
        let ext = json!({"$oid": "507f1f77bcf86cd799439011"});
        assert_eq!(ObjectId::from_value(&plain), ObjectId::from_value(&ext));
        assert!(ObjectId::from_value(&plain).is_some());
        assert!(ObjectId::from_value(&json!({"$oid": "x", "extra": 1})).is_none());
    }

    #[test]
    fn translates_top_level_id_only() {
        let query = json!({"_id": "507f1f77bcf86cd799439011", "name": "x"});
        assert_eq!(
            translate_query(&query),
            json!({"_id": {"$oid": "507f1f77bcf86cd799439011"}, "name": "x"})
        );

        let nested = json!({"owner": {"_id": "507f1f77bcf86cd799439011"}});
        assert_eq!(translate_query(&nested), nested);
    }

    #[test]
    fn falls_back_on_decode_failure() {
        let query = json!({"_id": "507f1f77bcf86cd79943901z"});
        assert_eq!(translate_query(&query), query);
        let short = json!({"_id": "abc"});
        assert_eq!(translate_query(&short), short);
        let number = json!({"_id": 7});
        assert_eq!(translate_query(&number), number);
    }
}
