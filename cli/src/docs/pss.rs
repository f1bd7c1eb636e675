// cli/src/docs/pss.rs — RSA-PSS primitives (MGF1-SHA256, SHA-256, random salt)
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

use rand::rngs::OsRng;
use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{Result, SigDocError};

const DIGEST_LEN: usize = 32;

/// Largest salt the modulus allows: emLen - hLen - 2.
fn max_salt_len(key: &impl PublicKeyParts) -> usize {
    let em_len = (key.n().bits() + 6) / 8;
    em_len.saturating_sub(DIGEST_LEN + 2)
}

/// Signs `payload` with a maximum-length salt. The salt is fresh per call, so
/// repeated signatures differ.
pub fn sign_payload(key: &RsaPrivateKey, payload: &[u8]) -> Result<Vec<u8>> {
    let signing_key = BlindedSigningKey::<Sha256>::new_with_salt_len(key.clone(), max_salt_len(key));
    let signature = signing_key
        .try_sign_with_rng(&mut OsRng, payload)
        .map_err(|e| SigDocError::key(format!("signing failed: {e}")))?;
    Ok(signature.to_vec())
}

/// `true` only when `signature` is a valid PSS signature over `payload` under `key`.
/// Both maximum-length and digest-length salts are accepted.
pub fn verify_payload(key: &RsaPublicKey, payload: &[u8], signature: &[u8]) -> bool {
    if signature.is_empty() {
        return false;
    }
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    [max_salt_len(key), DIGEST_LEN].into_iter().any(|salt_len| {
        VerifyingKey::<Sha256>::new_with_salt_len(key.clone(), salt_len)
            .verify(payload, &signature)
            .is_ok()
    })
}
