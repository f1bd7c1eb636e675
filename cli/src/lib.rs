// cli/src/lib.rs — sigdoc: signed documents with a signer trust registry
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies

//! Canonically encodes documents, signs them with RSA-PSS, and verifies the
//! resulting artifacts either against their embedded key or against a
//! [`TrustRegistry`] of authorized signers.
//!
//! ```no_run
//! use sigdoc::{keys, sign, verify_trusted, Document, Paragraph, TrustRegistry};
//!
//! # fn main() -> sigdoc::Result<()> {
//! let key = keys::generate()?;
//! let doc = Document::new(1, 2, vec![Paragraph::new("Dear", "name", "John Doe")]);
//! let artifact = sign(&doc, 42, &key)?;
//!
//! let registry = TrustRegistry::new();
//! registry.add(42, keys::public_key_of(&key)?)?;
//! assert!(verify_trusted(&doc, &artifact, &registry));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod docs;
pub mod error;
pub mod logging;

pub use docs::keys::{self, KeyProtection};
pub use docs::model::{Document, Paragraph, SignatureArtifact, SignerId};
pub use docs::signer::{sign, DocumentSigner};
pub use docs::store;
pub use docs::trust::TrustRegistry;
pub use docs::verify::{check, check_trusted, verify, verify_trusted, Rejection, Verdict};
pub use error::{Result, SigDocError};
