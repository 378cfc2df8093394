use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PEM error: {0}")]
    Pem(#[from] pem::PemError),
    #[error("no keypair on disk for '{0}'")]
    NotFound(String),
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    #[error("wrong password or corrupted key file")]
    WrongPassword,
    #[error("key derivation failed: {0}")]
    Kdf(String),
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("decryption failed (wrong key or corrupted envelope)")]
    DecryptionFailed,
}

pub type Result<T> = std::result::Result<T, KeyError>;
