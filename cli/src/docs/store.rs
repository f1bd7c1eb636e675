// cli/src/docs/store.rs — Artifact Store: (document, signature) pair files
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::docs::files::{read_text, write_text};
use crate::docs::model::{Document, SignatureArtifact};
use crate::error::{Result, SigDocError};

#[derive(Serialize)]
struct PairRef<'a> {
    document: &'a Document,
    signature: &'a SignatureArtifact,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Pair {
    document: Document,
    signature: SignatureArtifact,
}

/// Writes `{ "document": …, "signature": … }` to `destination`, replacing it.
pub fn save(document: &Document, artifact: &SignatureArtifact, destination: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&PairRef { document, signature: artifact })
        .map_err(|e| SigDocError::format("artifact", e))?;
    write_text(destination, &json)?;
    info!(path = %destination.display(), document = %document.id, "saved signed document");
    Ok(())
}

/// Reads a pair back. The signature is NOT checked here.
pub fn load(source: &Path) -> Result<(Document, SignatureArtifact)> {
    let json = read_text(source)?;
    let pair: Pair = serde_json::from_str(&json).map_err(|e| SigDocError::format("artifact", e))?;
    Ok((pair.document, pair.signature))
}

/// Unsigned document file, as produced by `doc new`.
pub fn save_document(document: &Document, destination: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document).map_err(|e| SigDocError::format("document", e))?;
    write_text(destination, &json)
}

pub fn load_document(source: &Path) -> Result<Document> {
    let json = read_text(source)?;
    serde_json::from_str(&json).map_err(|e| SigDocError::format("document", e))
}
