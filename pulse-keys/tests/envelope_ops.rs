use pulse_keys::{KeyError, KeyStore, SubmissionKey, open, seal};

fn store() -> (tempfile::TempDir, KeyStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = KeyStore::open(dir.path()).expect("open keystore");
    (dir, store)
}

#[test]
fn test_seal_open_round_trip() {
    let (_dir, store) = store();
    store.generate("bob", "bobs-password").expect("generate");

    let public = store
        .public_key("bob")
        .expect("read public key")
        .expect("public key exists");
    let private = store.private_key("bob", "bobs-password").expect("unlock");

    let payload = b"{\"distance\":\"direct\",\"responses\":{\"q1\":3}}";
    let key = SubmissionKey::generate();
    let blob = seal(&key, &public, payload).expect("seal");

    let recovered = open(&private, &blob).expect("open");
    assert_eq!(payload.as_slice(), recovered.as_slice());
}

#[test]
fn test_foreign_key_cannot_open() {
    let (_dir, store) = store();
    store.generate("bob", "bobs-password").expect("generate bob");
    store.generate("carol", "carols-password").expect("generate carol");

    let bob_public = store.public_key("bob").unwrap().unwrap();
    let carol_private = store.private_key("carol", "carols-password").unwrap();

    let key = SubmissionKey::generate();
    let blob = seal(&key, &bob_public, b"for bob only").expect("seal");

    let result = open(&carol_private, &blob);
    assert!(matches!(result, Err(KeyError::DecryptionFailed)));
}

#[test]
fn test_fresh_nonce_per_seal() {
    let (_dir, store) = store();
    store.generate("bob", "pw-123456").expect("generate");
    let public = store.public_key("bob").unwrap().unwrap();

    let key = SubmissionKey::generate();
    let a = seal(&key, &public, b"same payload").expect("seal a");
    let b = seal(&key, &public, b"same payload").expect("seal b");

    // Same key, same payload: the nonce prefix must still differ.
    assert_ne!(a[..12], b[..12]);
    assert_ne!(a, b);
}

#[test]
fn test_truncated_blob_is_rejected() {
    let (_dir, store) = store();
    store.generate("bob", "pw-123456").expect("generate");
    let public = store.public_key("bob").unwrap().unwrap();
    let private = store.private_key("bob", "pw-123456").unwrap();

    let key = SubmissionKey::generate();
    let blob = seal(&key, &public, b"payload").expect("seal");

    assert!(matches!(
        open(&private, &blob[..40]),
        Err(KeyError::DecryptionFailed)
    ));

    // Tampering with the ciphertext must fail the GCM tag check.
    let mut tampered = blob.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;
    assert!(matches!(
        open(&private, &tampered),
        Err(KeyError::DecryptionFailed)
    ));
}

#[test]
fn test_wrong_password_rejected() {
    let (_dir, store) = store();
    store.generate("bob", "correct-password").expect("generate");

    let result = store.private_key("bob", "wrong-password");
    assert!(matches!(result, Err(KeyError::WrongPassword)));
}

#[test]
fn test_missing_keypair() {
    let (_dir, store) = store();

    assert!(store.public_key("nobody").expect("lookup").is_none());
    assert!(matches!(
        store.private_key("nobody", "pw"),
        Err(KeyError::NotFound(_))
    ));
}

#[test]
fn test_generate_is_idempotent() {
    let (_dir, store) = store();
    store.generate("bob", "first-password").expect("generate");
    let before = store.public_key("bob").unwrap().unwrap();

    // Second registration attempt must not replace the existing keypair.
    store.generate("bob", "second-password").expect("regenerate");
    let after = store.public_key("bob").unwrap().unwrap();
    assert_eq!(before, after);
    assert!(store.private_key("bob", "first-password").is_ok());
}
