//! Hybrid envelope seal/open.
//!
//! One 256-bit AES key per submission; a fresh 96-bit GCM nonce per
//! recipient; the key wrapped for each recipient with RSA-2048 PKCS#1 v1.5.
//!
//! Blob layout: nonce(12) || wrapped-key(256) || ciphertext+tag. Only the
//! recipient's private key recovers the AES key, so recipients cannot read
//! each other's copies even though the key is shared across the fan-out.

use crate::error::{KeyError, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroize;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const GCM_TAG_LEN: usize = 16;
/// RSA-2048 ciphertext size; the keystore only mints 2048-bit keys.
const WRAPPED_KEY_LEN: usize = 256;

/// Symmetric key generated once per submission, zeroized on drop.
pub struct SubmissionKey {
    key: [u8; KEY_LEN],
}

impl SubmissionKey {
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }
}

impl Drop for SubmissionKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Encrypt `payload` for one recipient: fresh nonce, shared submission key,
/// key wrapped under the recipient's public key.
pub fn seal(key: &SubmissionKey, recipient: &RsaPublicKey, payload: &[u8]) -> Result<Vec<u8>> {
    if rsa::traits::PublicKeyParts::size(recipient) != WRAPPED_KEY_LEN {
        return Err(KeyError::InvalidKey(format!(
            "recipient key is not RSA-{}",
            WRAPPED_KEY_LEN * 8
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(&key.key)
        .map_err(|_| KeyError::EncryptionFailed("invalid submission key length".into()))?;

    let mut nonce = [0u8; NONCE_LEN];
    let mut rng = rand::thread_rng();
    rng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), payload)
        .map_err(|_| KeyError::EncryptionFailed("payload encryption failed".into()))?;

    let wrapped = recipient
        .encrypt(&mut rng, Pkcs1v15Encrypt, &key.key)
        .map_err(|e| KeyError::EncryptionFailed(format!("key wrap failed: {e}")))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + WRAPPED_KEY_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&wrapped);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Recover the plaintext payload from a blob addressed to `private`'s owner.
/// Fails with `DecryptionFailed` for a foreign, truncated, or tampered blob.
pub fn open(private: &RsaPrivateKey, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_LEN + WRAPPED_KEY_LEN + GCM_TAG_LEN {
        return Err(KeyError::DecryptionFailed);
    }

    let (nonce, rest) = blob.split_at(NONCE_LEN);
    let (wrapped, ciphertext) = rest.split_at(WRAPPED_KEY_LEN);

    let mut key = private
        .decrypt(Pkcs1v15Encrypt, wrapped)
        .map_err(|_| KeyError::DecryptionFailed)?;
    if key.len() != KEY_LEN {
        key.zeroize();
        return Err(KeyError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| KeyError::DecryptionFailed);
    key.zeroize();

    cipher?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| KeyError::DecryptionFailed)
}
