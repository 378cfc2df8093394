mod envelope;
mod error;
mod keystore;

pub use envelope::{SubmissionKey, open, seal};
pub use error::{KeyError, Result};
pub use keystore::KeyStore;

// Re-export the key types callers handle.
pub use rsa::{RsaPrivateKey, RsaPublicKey};
