// cli/src/docs/model.rs — Document + Signature Artifact Records
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::docs::canonical::timestamp;

/// Opaque numeric identity of a signer, author or addressee.
pub type SignerId = i64;

/// One templated line of a document. Order inside [`Document::content`] is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paragraph {
    pub fixed_text: String,
    pub placeholder: String,
    pub text: String,
}

impl Paragraph {
    pub fn new(fixed_text: impl Into<String>, placeholder: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            fixed_text: fixed_text.into(),
            placeholder: placeholder.into(),
            text: text.into(),
        }
    }
}

/// A structured document. Field declaration order is the canonical field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub id: Uuid,
    pub parent_document_id: Option<Uuid>,
    pub author_id: i64,
    pub addressee_id: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub content: Vec<Paragraph>,
}

impl Document {
    /// Fresh document with a random id, stamped now.
    pub fn new(author_id: i64, addressee_id: i64, content: Vec<Paragraph>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_document_id: None,
            author_id,
            addressee_id,
            created_at: Utc::now(),
            content,
        }
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent_document_id = Some(parent);
        self
    }
}

/// Signature over a document's canonical payload plus everything needed to check it.
///
/// `json_version` is the exact payload that was signed. It is stored rather than
/// recomputed so a verifier can tell a re-serialized document apart from a bad
/// signature. `signed_at` is informational and is NOT covered by `signature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureArtifact {
    pub document_id: Uuid,
    pub json_version: String,
    pub signator_id: SignerId,
    /// SPKI PEM of the key that produced `signature`.
    pub public_key: String,
    /// Lowercase hex of the raw RSA-PSS signature bytes.
    pub signature: String,
    #[serde(with = "timestamp")]
    pub signed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_documents_get_distinct_ids() {
        let a = Document::new(1, 2, vec![]);
        let b = Document::new(1, 2, vec![]);
        assert_ne!(a.id, b.id);
        assert!(a.parent_document_id.is_none());
    }

    #[test]
    fn parent_link_is_kept() {
        let parent = Document::new(1, 2, vec![]);
        let child = Document::new(2, 1, vec![Paragraph::new("Re", "subject", "offer")]).with_parent(parent.id);
        assert_eq!(child.parent_document_id, Some(parent.id));
    }

    #[test]
    fn unknown_document_fields_are_rejected() {
        let raw = r#"{"id":"7f1c2a52-5b8e-4c55-9a53-2f8f0d3c9e11","parent_document_id":null,
            "author_id":1,"addressee_id":2,"created_at":"2025-03-01T10:00:00.000000000Z",
            "content":[],"extra":true}"#;
        assert!(serde_json::from_str::<Document>(raw).is_err());
    }
}
