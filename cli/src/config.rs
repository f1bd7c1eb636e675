// cli/src/config.rs — sigdocctl configuration (TOML)
// Maintained by ek@nonos-tech.xyz | © 2025 NØN Technologies
//
//   [keys]
//   private_key = "keys/signer.pem"
//   bits = 2048
//
//   [log]
//   level = "info"
//
//   [[trusted]]
//   signer_id = 42
//   public_key = "keys/42.pub.pem"

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::docs::keys::{self, DEFAULT_KEY_BITS, MIN_KEY_BITS};
use crate::docs::model::SignerId;
use crate::docs::trust::TrustRegistry;
use crate::error::{Result, SigDocError};

pub const DEFAULT_CONFIG_PATH: &str = "sigdoc.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub keys: KeysConfig,
    pub log: LogConfig,
    pub trusted: Vec<TrustedSigner>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    /// Private key used by `sign` when `--key` is not given.
    pub private_key: Option<PathBuf>,
    pub bits: usize,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self { private_key: None, bits: DEFAULT_KEY_BITS }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustedSigner {
    pub signer_id: SignerId,
    /// PEM file with the signer's public key. Relative paths resolve against the config file.
    pub public_key: PathBuf,
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw).map_err(|e| SigDocError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`. With no explicit path, `sigdoc.toml` is used if present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        if !required && !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Config::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| SigDocError::from_io(&path, e))?;
        let mut config = Self::from_toml(&raw)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        debug!(path = %path.display(), trusted = config.trusted.len(), "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.keys.bits < MIN_KEY_BITS {
            return Err(SigDocError::Config(format!(
                "keys.bits = {} is below the {MIN_KEY_BITS}-bit minimum",
                self.keys.bits
            )));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(p) = self.keys.private_key.as_mut() {
            resolve(p);
        }
        for signer in &mut self.trusted {
            resolve(&mut signer.public_key);
        }
    }

    /// Builds a registry from the `[[trusted]]` entries. Any unreadable or invalid key is an error.
    pub fn trust_registry(&self) -> Result<TrustRegistry> {
        let registry = TrustRegistry::new();
        for signer in &self.trusted {
            registry.add(signer.signer_id, keys::load_public(&signer.public_key)?)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::testkit;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.keys.bits, 2048);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn full_file_parses() {
        let config = Config::from_toml(
            r#"
            [keys]
            private_key = "/etc/sigdoc/signer.pem"
            bits = 3072

            [log]
            level = "debug"

            [[trusted]]
            signer_id = 42
            public_key = "/etc/sigdoc/42.pub.pem"
            "#,
        )
        .unwrap();
        assert_eq!(config.keys.private_key, Some(PathBuf::from("/etc/sigdoc/signer.pem")));
        assert_eq!(config.keys.bits, 3072);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.trusted, vec![TrustedSigner {
            signer_id: 42,
            public_key: PathBuf::from("/etc/sigdoc/42.pub.pem"),
        }]);
    }

    #[test]
    fn weak_key_size_and_typos_are_rejected() {
        assert!(matches!(Config::from_toml("[keys]\nbits = 1024\n"), Err(SigDocError::Config(_))));
        assert!(matches!(Config::from_toml("[keyz]\nbits = 4096\n"), Err(SigDocError::Config(_))));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, SigDocError::NotFound(_)));
    }

    #[test]
    fn trusted_entries_seed_a_registry() {
        let dir = tempfile::tempdir().unwrap();
        keys::save_public(testkit::signer_key(), &dir.path().join("42.pub.pem")).unwrap();
        let cfg_path = dir.path().join("sigdoc.toml");
        std::fs::write(&cfg_path, "[[trusted]]\nsigner_id = 42\npublic_key = \"42.pub.pem\"\n").unwrap();

        let config = Config::load(Some(&cfg_path)).unwrap();
        let registry = config.trust_registry().unwrap();
        assert_eq!(registry.get(42), Some(testkit::signer_pem()));
    }

    #[test]
    fn broken_trusted_key_fails_registry_build() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.pem");
        std::fs::write(&bad, "not a key").unwrap();
        let config = Config {
            trusted: vec![TrustedSigner { signer_id: 1, public_key: bad }],
            ..Config::default()
        };
        assert!(matches!(config.trust_registry(), Err(SigDocError::Format { .. })));
    }
}
