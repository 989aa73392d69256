//! Signing identity resolution.
//!
//! Mirrors the deploy tooling conventions: an explicit account index wins,
//! then the local-network default account, then a named identity from the
//! identities directory, and finally the secret seed from the environment.

use std::path::PathBuf;

use ed25519_dalek::SigningKey;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Networks on which deterministic dev accounts are used by default.
pub const LOCAL_NETWORK_PASSPHRASES: &[&str] = &[
    "Standalone Network ; February 2017",
    "Local Sandbox Stellar Network ; September 2022",
];

/// Environment variable holding a hex-encoded 32-byte ed25519 seed.
pub const SECRET_SEED_ENV: &str = "CRC_SECRET_SEED";

/// Number of deterministic dev accounts available on local networks.
pub const DEV_ACCOUNT_COUNT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("dev account index {0} is out of range (0..10)")]
    IndexOutOfRange(usize),
    #[error("identity `{0}` not found under {1}")]
    UnknownIdentity(String, PathBuf),
    #[error("failed to read identity file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse identity file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("secret seed is not 32 hex-encoded bytes: {0}")]
    BadSeed(String),
    #[error("no account available: no index, not on a local network, no identity given and the secret seed env var is unset")]
    NoAccount,
}

/// A resolved signing identity.
pub struct Account {
    key: SigningKey,
}

impl Account {
    pub fn from_seed_hex(seed: &str) -> Result<Self, AccountError> {
        let bytes = hex::decode(seed).map_err(|e| AccountError::BadSeed(e.to_string()))?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AccountError::BadSeed(format!("expected 32 bytes, got {}", bytes.len())))?;

        Ok(Self {
            key: SigningKey::from_bytes(&seed),
        })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key())
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    pub fn into_signing_key(self) -> SigningKey {
        self.key
    }
}

/// Deterministic dev account for a local network. Seeds are derived from the
/// network passphrase so a fresh local network always yields the same
/// addresses.
pub fn dev_account(network_passphrase: &str, index: usize) -> Result<Account, AccountError> {
    if index >= DEV_ACCOUNT_COUNT {
        return Err(AccountError::IndexOutOfRange(index));
    }

    let mut hasher = Sha256::new();
    hasher.update(network_passphrase.as_bytes());
    hasher.update(b"/dev-account/");
    hasher.update((index as u32).to_be_bytes());
    let seed: [u8; 32] = hasher.finalize().into();

    Ok(Account {
        key: SigningKey::from_bytes(&seed),
    })
}

#[derive(Deserialize)]
struct IdentityFile {
    seed: String,
}

pub struct Resolver {
    pub identity_dir: PathBuf,
    pub network_passphrase: String,
    pub secret_seed: Option<String>,
}

impl Resolver {
    /// Build a resolver with the default identities directory, picking the
    /// fallback secret seed up from the environment.
    pub fn from_env(network_passphrase: String) -> Self {
        let identity_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crc")
            .join("identities");

        Self {
            identity_dir,
            network_passphrase,
            secret_seed: std::env::var(SECRET_SEED_ENV).ok(),
        }
    }

    pub fn is_local_network(&self) -> bool {
        LOCAL_NETWORK_PASSPHRASES.contains(&self.network_passphrase.as_str())
    }

    /// Resolve a signing identity.
    ///
    /// Precedence: explicit `index`, then the local-network default account,
    /// then the named identity `id`, then the configured secret seed.
    pub fn resolve(&self, index: Option<usize>, id: Option<&str>) -> Result<Account, AccountError> {
        if let Some(index) = index {
            return dev_account(&self.network_passphrase, index);
        }

        if self.is_local_network() {
            return dev_account(&self.network_passphrase, 0);
        }

        if let Some(id) = id {
            return self.load_identity(id);
        }

        match &self.secret_seed {
            Some(seed) => Account::from_seed_hex(seed.trim()),
            None => Err(AccountError::NoAccount),
        }
    }

    fn load_identity(&self, name: &str) -> Result<Account, AccountError> {
        let path = self.identity_dir.join(format!("{name}.toml"));
        if !path.exists() {
            return Err(AccountError::UnknownIdentity(
                name.to_string(),
                self.identity_dir.clone(),
            ));
        }

        let raw = std::fs::read_to_string(&path)?;
        let identity: IdentityFile = toml::from_str(&raw)?;

        Account::from_seed_hex(identity.seed.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDALONE: &str = "Standalone Network ; February 2017";
    const TESTNET: &str = "Test SDF Network ; September 2015";

    fn resolver(passphrase: &str, secret_seed: Option<&str>) -> Resolver {
        Resolver {
            identity_dir: PathBuf::from("/nonexistent"),
            network_passphrase: passphrase.to_string(),
            secret_seed: secret_seed.map(str::to_string),
        }
    }

    #[test]
    fn explicit_index_wins() {
        let resolver = resolver(STANDALONE, None);

        let by_index = resolver.resolve(Some(3), None).unwrap();
        let default = resolver.resolve(None, None).unwrap();

        assert_ne!(by_index.public_key(), default.public_key());
        assert_eq!(
            by_index.public_key(),
            dev_account(STANDALONE, 3).unwrap().public_key()
        );
    }

    #[test]
    fn local_network_defaults_to_dev_account_zero() {
        let resolver = resolver(STANDALONE, None);

        let account = resolver.resolve(None, None).unwrap();

        assert_eq!(
            account.public_key(),
            dev_account(STANDALONE, 0).unwrap().public_key()
        );
    }

    #[test]
    fn dev_accounts_are_deterministic_per_network() {
        let a = dev_account(STANDALONE, 0).unwrap();
        let b = dev_account(STANDALONE, 0).unwrap();
        let other_network = dev_account(TESTNET, 0).unwrap();

        assert_eq!(a.public_key(), b.public_key());
        assert_ne!(a.public_key(), other_network.public_key());
    }

    #[test]
    fn dev_account_index_out_of_range() {
        assert!(matches!(
            dev_account(STANDALONE, DEV_ACCOUNT_COUNT),
            Err(AccountError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn named_identity_is_loaded_from_the_identity_dir() {
        let dir = tempfile::tempdir().unwrap();
        let seed = [7u8; 32];
        std::fs::write(
            dir.path().join("deployer.toml"),
            format!("seed = \"{}\"\n", hex::encode(seed)),
        )
        .unwrap();

        let resolver = Resolver {
            identity_dir: dir.path().to_path_buf(),
            network_passphrase: TESTNET.to_string(),
            secret_seed: None,
        };

        let account = resolver.resolve(None, Some("deployer")).unwrap();
        assert_eq!(
            account.public_key(),
            SigningKey::from_bytes(&seed).verifying_key().to_bytes()
        );
    }

    #[test]
    fn unknown_identity_is_reported() {
        let resolver = resolver(TESTNET, None);

        assert!(matches!(
            resolver.resolve(None, Some("missing")),
            Err(AccountError::UnknownIdentity(..))
        ));
    }

    #[test]
    fn remote_network_falls_back_to_the_secret_seed() {
        let seed = [9u8; 32];
        let resolver = resolver(TESTNET, Some(&hex::encode(seed)));

        let account = resolver.resolve(None, None).unwrap();
        assert_eq!(
            account.public_key(),
            SigningKey::from_bytes(&seed).verifying_key().to_bytes()
        );
    }

    #[test]
    fn no_account_when_nothing_is_configured() {
        let resolver = resolver(TESTNET, None);

        assert!(matches!(
            resolver.resolve(None, None),
            Err(AccountError::NoAccount)
        ));
    }

    #[test]
    fn malformed_seed_is_rejected() {
        assert!(matches!(
            Account::from_seed_hex("zz"),
            Err(AccountError::BadSeed(_))
        ));
        assert!(matches!(
            Account::from_seed_hex("0badc0de"),
            Err(AccountError::BadSeed(_))
        ));
    }
}
