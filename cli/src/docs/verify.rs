// cli/src/docs/verify.rs — Signed Document Verification (fail-closed)
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies
// Checks: (1) document binding, (2) embedded key, (3) canonical payload, (4) RSA-PSS signature,
// and for the trusted path (5) signer registered, (6) embedded key == registered key

use std::fmt;

use tracing::debug;

use crate::docs::model::{Document, SignatureArtifact};
use crate::docs::trust::TrustRegistry;
use crate::docs::{canonical, keys, pss};

/// Why an artifact was refused. Diagnostic only: every variant means "invalid".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    DocumentMismatch,
    MalformedPublicKey,
    Unencodable,
    PayloadMismatch,
    MalformedSignature,
    BadSignature,
    UnknownSigner,
    UntrustedKey,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::DocumentMismatch => "artifact was issued for another document",
            Rejection::MalformedPublicKey => "embedded public key does not parse",
            Rejection::Unencodable => "document cannot be canonicalized",
            Rejection::PayloadMismatch => "document no longer matches the signed payload",
            Rejection::MalformedSignature => "signature is empty or not hex",
            Rejection::BadSignature => "signature does not verify",
            Rejection::UnknownSigner => "signer is not in the trust registry",
            Rejection::UntrustedKey => "embedded key differs from the registered key",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn rejection(self) -> Option<Rejection> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(r) => Some(r),
        }
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(outcome: Result<(), Rejection>) -> Self {
        match outcome {
            Ok(()) => Verdict::Valid,
            Err(r) => Verdict::Invalid(r),
        }
    }
}

/// Checks `artifact` against `document` using the key embedded in the artifact.
pub fn check(document: &Document, artifact: &SignatureArtifact) -> Verdict {
    let verdict = Verdict::from(check_artifact(document, artifact));
    trace_verdict("bare", artifact, verdict);
    verdict
}

/// Like [`check`], but the signer must also be registered with exactly the embedded key.
/// Registry lookups run before any cryptography.
pub fn check_trusted(document: &Document, artifact: &SignatureArtifact, registry: &TrustRegistry) -> Verdict {
    let verdict = Verdict::from(check_registration(artifact, registry).and_then(|()| check_artifact(document, artifact)));
    trace_verdict("trusted", artifact, verdict);
    verdict
}

pub fn verify(document: &Document, artifact: &SignatureArtifact) -> bool {
    check(document, artifact).is_valid()
}

pub fn verify_trusted(document: &Document, artifact: &SignatureArtifact, registry: &TrustRegistry) -> bool {
    check_trusted(document, artifact, registry).is_valid()
}

fn check_artifact(document: &Document, artifact: &SignatureArtifact) -> Result<(), Rejection> {
    if document.id != artifact.document_id {
        return Err(Rejection::DocumentMismatch);
    }

    let public_key = keys::parse_public_key(&artifact.public_key).map_err(|_| Rejection::MalformedPublicKey)?;

    let current = canonical::encode(document).map_err(|_| Rejection::Unencodable)?;
    if current != artifact.json_version {
        return Err(Rejection::PayloadMismatch);
    }

    let signature = hex::decode(&artifact.signature).map_err(|_| Rejection::MalformedSignature)?;
    if signature.is_empty() {
        return Err(Rejection::MalformedSignature);
    }

    if !pss::verify_payload(&public_key, artifact.json_version.as_bytes(), &signature) {
        return Err(Rejection::BadSignature);
    }
    Ok(())
}

fn check_registration(artifact: &SignatureArtifact, registry: &TrustRegistry) -> Result<(), Rejection> {
    let registered = registry.get(artifact.signator_id).ok_or(Rejection::UnknownSigner)?;
    if registered.as_bytes() != artifact.public_key.as_bytes() {
        return Err(Rejection::UntrustedKey);
    }
    Ok(())
}

fn trace_verdict(mode: &'static str, artifact: &SignatureArtifact, verdict: Verdict) {
    match verdict {
        Verdict::Valid => debug!(mode, document = %artifact.document_id, signator = artifact.signator_id, "signature valid"),
        Verdict::Invalid(reason) => debug!(
            mode,
            document = %artifact.document_id,
            signator = artifact.signator_id,
            %reason,
            "signature rejected"
        ),
    }
}
