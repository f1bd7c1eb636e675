//! Signed-document core: canonical encoding, RSA-PSS signing, fail-closed
//! verification, the signer trust registry and pair-file persistence.

pub mod canonical;
pub mod keys;
pub mod model;
pub mod pss;
pub mod signer;
pub mod store;
pub mod trust;
pub mod verify;

mod files;
