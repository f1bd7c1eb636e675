// cli/src/docs/trust.rs — Signer Trust Registry
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies
//
// One authorized public key per signer id. Owned by the caller and handed to
// registry-backed verification by reference; nothing here is process-global.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::docs::keys;
use crate::docs::model::SignerId;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct TrustRegistry {
    entries: RwLock<BTreeMap<SignerId, String>>,
}

impl TrustRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorizes `public_key_pem` for `signer_id`, replacing any previous key.
    ///
    /// The PEM must parse as an RSA public key; otherwise the error is returned
    /// and the registry is left untouched. Returns the replaced key, if any.
    pub fn add(&self, signer_id: SignerId, public_key_pem: impl Into<String>) -> Result<Option<String>> {
        let pem = public_key_pem.into();
        let mut entries = self.write();
        keys::parse_public_key(&pem)?;
        let previous = entries.insert(signer_id, pem);
        info!(signer = signer_id, replaced = previous.is_some(), "trusted key added");
        Ok(previous)
    }

    /// Revokes trust in `signer_id`. `false` if it was not registered.
    pub fn remove(&self, signer_id: SignerId) -> bool {
        match self.write().remove(&signer_id) {
            Some(_) => {
                warn!(signer = signer_id, "trusted key removed");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, signer_id: SignerId) -> Option<String> {
        self.read().get(&signer_id).cloned()
    }

    pub fn contains(&self, signer_id: SignerId) -> bool {
        self.read().contains_key(&signer_id)
    }

    pub fn list_ids(&self) -> BTreeSet<SignerId> {
        self.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every mutation is a single insert/remove: a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<SignerId, String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<SignerId, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::testkit;
    use crate::error::SigDocError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn add_get_remove() {
        let registry = TrustRegistry::new();
        let pem = testkit::signer_pem();

        assert!(registry.is_empty());
        assert_eq!(registry.add(42, pem.clone()).unwrap(), None);
        assert_eq!(registry.get(42), Some(pem));
        assert!(registry.contains(42));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(42));
        assert!(!registry.remove(42));
        assert_eq!(registry.get(42), None);
    }

    #[test]
    fn adding_again_overwrites() {
        let registry = TrustRegistry::new();
        registry.add(7, testkit::signer_pem()).unwrap();
        let replaced = registry.add(7, testkit::other_pem()).unwrap();
        assert_eq!(replaced, Some(testkit::signer_pem()));
        assert_eq!(registry.get(7), Some(testkit::other_pem()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_pem_is_rejected_and_not_stored() {
        let registry = TrustRegistry::new();
        registry.add(1, testkit::signer_pem()).unwrap();

        let err = registry.add(1, "-----BEGIN PUBLIC KEY-----\ngarbage\n-----END PUBLIC KEY-----\n").unwrap_err();
        assert!(matches!(err, SigDocError::Format { .. }));
        assert!(registry.add(2, testkit::ED25519_PUBLIC_PEM).is_err());

        assert_eq!(registry.get(1), Some(testkit::signer_pem()));
        assert!(!registry.contains(2));
    }

    #[test]
    fn list_ids_is_sorted_and_complete() {
        let registry = TrustRegistry::new();
        for id in [9, -3, 42] {
            registry.add(id, testkit::signer_pem()).unwrap();
        }
        assert_eq!(registry.list_ids().into_iter().collect::<Vec<_>>(), vec![-3, 9, 42]);
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let registry = Arc::new(TrustRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for round in 0..20 {
                        registry.add(i, testkit::signer_pem()).unwrap();
                        assert!(registry.get(i).is_some());
                        if round % 2 == 0 {
                            assert!(registry.remove(i));
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(registry.len(), 8);
    }
}
