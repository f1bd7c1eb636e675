// cli/src/docs/signer.rs — Document Signer
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies
// canonical payload -> RSA-PSS signature -> self-describing artifact

use std::fmt;
use std::path::Path;

use chrono::Utc;
use rsa::RsaPrivateKey;
use tracing::info;

use crate::docs::model::{Document, SignatureArtifact, SignerId};
use crate::docs::{canonical, keys, pss};
use crate::docs::keys::KeyProtection;
use crate::error::{Result, SigDocError};

/// Signs `document` on behalf of `signator_id`.
///
/// The artifact embeds the payload, the signer's public key and the hex signature.
/// `signed_at` is taken from the clock and is not part of what gets signed.
pub fn sign(document: &Document, signator_id: SignerId, private_key: &RsaPrivateKey) -> Result<SignatureArtifact> {
    let json_version = canonical::encode(document)?;
    let signature = pss::sign_payload(private_key, json_version.as_bytes())?;

    let artifact = SignatureArtifact {
        document_id: document.id,
        json_version,
        signator_id,
        public_key: keys::public_key_of(private_key)?,
        signature: hex::encode(signature),
        signed_at: Utc::now(),
    };
    info!(document = %document.id, signator = signator_id, "document signed");
    Ok(artifact)
}

/// Holds the (optional) private key a process signs with.
#[derive(Default)]
pub struct DocumentSigner {
    key: Option<RsaPrivateKey>,
}

impl fmt::Debug for DocumentSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSigner").field("has_key", &self.has_key()).finish()
    }
}

impl DocumentSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: RsaPrivateKey) -> Self {
        Self { key: Some(key) }
    }

    /// Opens the key at `path`.
    pub fn from_file(path: &Path, protection: &KeyProtection) -> Result<Self> {
        keys::load_private(path, protection).map(Self::with_key)
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn key(&self) -> Result<&RsaPrivateKey> {
        self.key.as_ref().ok_or(SigDocError::NoKey)
    }

    /// Replaces the current key with a fresh one of `bits` bits.
    pub fn generate_key(&mut self, bits: usize) -> Result<&RsaPrivateKey> {
        let key = keys::generate_with_bits(bits)?;
        Ok(&*self.key.insert(key))
    }

    pub fn load_key(&mut self, path: &Path, protection: &KeyProtection) -> Result<&RsaPrivateKey> {
        let key = keys::load_private(path, protection)?;
        Ok(&*self.key.insert(key))
    }

    pub fn save_key(&self, path: &Path, protection: &KeyProtection) -> Result<()> {
        keys::save_private(self.key()?, path, protection)
    }

    pub fn public_key_pem(&self) -> Result<String> {
        keys::public_key_of(self.key()?)
    }

    pub fn sign(&self, document: &Document, signator_id: SignerId) -> Result<SignatureArtifact> {
        sign(document, signator_id, self.key()?)
    }
}
