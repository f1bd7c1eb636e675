// cli/src/docs/canonical.rs — Canonical Document Encoding (the exact signing payload)
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies
//
// Payload = compact JSON, fields in declaration order, `null` for absent parent,
// RFC 3339 UTC timestamps with exactly nine fractional digits.

use crate::docs::model::Document;
use crate::error::{Result, SigDocError};

/// Serializes `document` into its canonical payload.
pub fn encode(document: &Document) -> Result<String> {
    serde_json::to_string(document).map_err(|e| SigDocError::format("document", e))
}

/// Parses a canonical payload back into a document.
///
/// Input that parses but would not re-encode byte-for-byte (whitespace, other
/// timestamp offsets, reordered fields) is rejected.
pub fn decode(payload: &str) -> Result<Document> {
    let document: Document =
        serde_json::from_str(payload).map_err(|e| SigDocError::format("canonical payload", e))?;
    if encode(&document)? != payload {
        return Err(SigDocError::format("canonical payload", "input is not in canonical form"));
    }
    Ok(document)
}

/// Fixed-width RFC 3339 timestamps shared by documents and artifacts.
pub mod timestamp {
    use chrono::{DateTime, Datelike, SecondsFormat, Utc};
    use serde::{de, ser};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    /// Years outside 0000..=9999 have no RFC 3339 form and are refused.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        if !(0..=9999).contains(&ts.year()) {
            return Err(ser::Error::custom(format_args!("year {} is outside 0000..=9999", ts.year())));
        }
        s.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
