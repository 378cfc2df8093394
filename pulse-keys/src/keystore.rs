//! On-disk keypair storage, one RSA-2048 keypair per account.
//!
//! Layout inside the store directory:
//! - `{username}_public.pem` — public half, plain SPKI PEM.
//! - `{username}.pem` — private half, never in the clear: the PKCS#8 DER is
//!   encrypted with AES-256-GCM under an Argon2id key derived from the
//!   account password. PEM body = salt(16) || nonce(12) || ciphertext.
//!
//! Keypairs are created lazily at registration and live as long as the
//! account does. There is no rotation or backup path.

use crate::error::{KeyError, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::path::{Path, PathBuf};
use zeroize::Zeroize;

const RSA_BITS: usize = 2048;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const ENCRYPTED_KEY_TAG: &str = "PULSE ENCRYPTED PRIVATE KEY";

/// Handle to the directory holding all account keypairs.
#[derive(Clone)]
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    /// Open (and create if missing) the store directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn private_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}.pem"))
    }

    fn public_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}_public.pem"))
    }

    pub fn has_keypair(&self, username: &str) -> bool {
        self.private_path(username).exists() && self.public_path(username).exists()
    }

    /// Generate a fresh keypair for `username`, encrypting the private half
    /// under `password`. No-op when the keypair already exists (first
    /// registration wins).
    pub fn generate(&self, username: &str, password: &str) -> Result<()> {
        if self.has_keypair(username) {
            tracing::debug!(username, "keypair already exists, keeping it");
            return Ok(());
        }

        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, RSA_BITS)
            .map_err(|e| KeyError::InvalidKey(format!("RSA generation failed: {e}")))?;
        let public = RsaPublicKey::from(&private);

        let public_pem = public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| KeyError::InvalidKey(format!("public key encoding failed: {e}")))?;
        std::fs::write(self.public_path(username), public_pem)?;

        let der = private
            .to_pkcs8_der()
            .map_err(|e| KeyError::InvalidKey(format!("PKCS#8 encoding failed: {e}")))?;

        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut nonce);

        let mut kek = derive_key(password, &salt)?;
        let cipher = Aes256Gcm::new_from_slice(&kek)
            .map_err(|_| KeyError::EncryptionFailed("invalid derived key length".into()))?;
        kek.zeroize();

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), der.as_bytes())
            .map_err(|_| KeyError::EncryptionFailed("private key encryption failed".into()))?;

        let mut contents = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
        contents.extend_from_slice(&salt);
        contents.extend_from_slice(&nonce);
        contents.extend_from_slice(&ciphertext);

        std::fs::write(
            self.private_path(username),
            pem::encode(&pem::Pem::new(ENCRYPTED_KEY_TAG, contents)),
        )?;

        tracing::info!(username, "generated keypair");
        Ok(())
    }

    /// Public key for `username`; `Ok(None)` when no keypair exists (the
    /// caller decides whether that means "skip this recipient").
    pub fn public_key(&self, username: &str) -> Result<Option<RsaPublicKey>> {
        let path = self.public_path(username);
        let pem_str = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let key = RsaPublicKey::from_public_key_pem(&pem_str)
            .map_err(|e| KeyError::InvalidKey(format!("bad public key for '{username}': {e}")))?;
        Ok(Some(key))
    }

    /// Decrypt and load the private key for `username`.
    pub fn private_key(&self, username: &str, password: &str) -> Result<RsaPrivateKey> {
        let path = self.private_path(username);
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KeyError::NotFound(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let block = pem::parse(&raw)?;
        if block.tag() != ENCRYPTED_KEY_TAG {
            return Err(KeyError::InvalidKey(format!(
                "unexpected PEM tag '{}'",
                block.tag()
            )));
        }
        let contents = block.contents();
        if contents.len() < SALT_LEN + NONCE_LEN {
            return Err(KeyError::InvalidKey("truncated key file".into()));
        }
        let (salt, rest) = contents.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let mut kek = derive_key(password, salt)?;
        let cipher = Aes256Gcm::new_from_slice(&kek)
            .map_err(|_| KeyError::EncryptionFailed("invalid derived key length".into()))?;
        kek.zeroize();

        let mut der = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| KeyError::WrongPassword)?;

        let key = RsaPrivateKey::from_pkcs8_der(&der)
            .map_err(|e| KeyError::InvalidKey(format!("bad private key for '{username}': {e}")));
        der.zeroize();
        key
    }
}

/// Argon2id over (password, salt) → 32-byte key-encryption key.
fn derive_key(password: &str, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut out = [0u8; KEY_LEN];
    argon2::Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| KeyError::Kdf(e.to_string()))?;
    Ok(out)
}
