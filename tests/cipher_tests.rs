//! Symmetric cipher and key derivation tests.

use secure_bytes::{ByteBuffer, CryptoOperations, SecureBytesError, SymmetricCipher};

const PLAINTEXT: &str = "Attack at dawn, bring snacks.";

#[test]
fn every_supported_cipher_round_trips() {
    let ops = CryptoOperations::new();
    let data = ByteBuffer::from(PLAINTEXT);

    for name in ops.supported_ciphers() {
        let material = ops.cipher_keygen(name).unwrap();
        let encrypted = ops
            .cipher_encrypt(&data, name, &material.key, &material.iv)
            .unwrap();
        assert_ne!(encrypted, data, "{name} left the plaintext unchanged");

        let decrypted = ops
            .cipher_decrypt(&encrypted, name, &material.key, &material.iv)
            .unwrap();
        assert_eq!(decrypted, data, "{name} round trip failed");
    }
}

#[test]
fn same_key_material_gives_same_ciphertext() {
    let ops = CryptoOperations::new();
    let data = ByteBuffer::from(PLAINTEXT);
    let material = ops.aes_keygen(256).unwrap();

    let first = ops.aes_encrypt(&data, &material.key, &material.iv).unwrap();
    let second = ops.aes_encrypt(&data, &material.key, &material.iv).unwrap();
    assert_eq!(first, second);

    let other = ops.aes_keygen(256).unwrap();
    let third = ops.aes_encrypt(&data, &other.key, &other.iv).unwrap();
    assert_ne!(first, third);
}

#[test]
fn aes_key_size_selects_variant() {
    let ops = CryptoOperations::new();
    let data = ByteBuffer::from(PLAINTEXT);

    for bits in [128usize, 192, 256] {
        let material = ops.aes_keygen(bits).unwrap();
        assert_eq!(material.key.len(), bits / 8);
        assert_eq!(material.iv.len(), 16);

        let named = ops
            .cipher_encrypt(&data, &format!("aes-{bits}-cbc"), &material.key, &material.iv)
            .unwrap();
        let by_size = ops.aes_encrypt(&data, &material.key, &material.iv).unwrap();
        assert_eq!(named, by_size);
    }

    assert!(matches!(
        ops.aes_keygen(64),
        Err(SecureBytesError::InvalidArgument(_))
    ));
}

#[test]
fn passphrase_keys_are_deterministic() {
    let ops = CryptoOperations::new();
    let passphrase = ByteBuffer::from("correct horse battery staple");
    let salt = ByteBuffer::from("pepper!!");

    let first = ops
        .aes_passphrase_keygen(256, &passphrase, &salt, 4096)
        .unwrap();
    let second = ops
        .cipher_passphrase_keygen("AES-256-CBC", &passphrase, &salt, 4096)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.key.len(), 32);
    assert_eq!(first.iv.len(), 16);

    let other_salt = ops
        .aes_passphrase_keygen(256, &passphrase, &ByteBuffer::from("salt"), 4096)
        .unwrap();
    assert_ne!(first, other_salt);
}

#[test]
fn passphrase_key_matches_pbkdf2_output() {
    let ops = CryptoOperations::new();
    let passphrase = ByteBuffer::from("password");
    let salt = ByteBuffer::from("salt");

    let material = ops
        .aes_passphrase_keygen(128, &passphrase, &salt, 2)
        .unwrap();

    let mut expected = [0u8; 32];
    openssl::pkcs5::pbkdf2_hmac(
        b"password",
        b"salt",
        2,
        openssl::hash::MessageDigest::sha1(),
        &mut expected,
    )
    .unwrap();

    assert_eq!(material.key.as_slice(), &expected[..16]);
    assert_eq!(material.iv.as_slice(), &expected[16..]);
}

#[test]
fn default_iterations_come_from_defaults() {
    let ops = CryptoOperations::new();
    let passphrase = ByteBuffer::from("pass");
    let salt = ByteBuffer::from("salt");

    let explicit = ops
        .cipher_passphrase_keygen("aes-128-cbc", &passphrase, &salt, 2048)
        .unwrap();
    let default = ops
        .cipher_passphrase_keygen_default("aes-128-cbc", &passphrase, &salt)
        .unwrap();
    assert_eq!(explicit, default);

    assert!(matches!(
        ops.cipher_passphrase_keygen("aes-128-cbc", &passphrase, &salt, 0),
        Err(SecureBytesError::InvalidArgument(_))
    ));
}

#[test]
fn wrong_inputs_are_reported() {
    let ops = CryptoOperations::new();
    let data = ByteBuffer::from(PLAINTEXT);
    let material = ops.aes_keygen(128).unwrap();

    assert!(matches!(
        ops.cipher_encrypt(&data, "rot13", &material.key, &material.iv),
        Err(SecureBytesError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        ops.cipher_encrypt(&data, "aes-256-cbc", &material.key, &material.iv),
        Err(SecureBytesError::InvalidArgument(_))
    ));
    assert!(matches!(
        ops.aes_encrypt(&data, &material.key, &ByteBuffer::from("short")),
        Err(SecureBytesError::InvalidArgument(_))
    ));
}

#[test]
fn cipher_names_normalize() {
    assert_eq!(
        "AES-128-CFB128".parse::<SymmetricCipher>().unwrap(),
        "aes-128-cfb".parse::<SymmetricCipher>().unwrap()
    );
}
