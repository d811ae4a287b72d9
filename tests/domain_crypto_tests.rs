use secure_bytes::domain::crypto::DigestBytesError;
use secure_bytes::{
    ByteBuffer, CipherKey, DigestAlgorithm, DigestBytes, KeyFormat, RsaKeyPair, SecureBytesError,
};

#[test]
fn digest_bytes_happy_path() {
    let bytes = vec![0xAA; DigestAlgorithm::Sha256.digest_size()];
    let d = DigestBytes::new(DigestAlgorithm::Sha256, bytes.clone()).expect("valid size");
    assert_eq!(d.as_slice(), &bytes[..]);
    assert_eq!(d.algorithm(), DigestAlgorithm::Sha256);
    assert_eq!(d.into_buffer(), ByteBuffer::from(bytes));
}

#[test]
fn digest_bytes_length_mismatch() {
    let bytes = vec![0xAA; 10];
    let err = DigestBytes::new(DigestAlgorithm::Sha256, bytes).unwrap_err();
    assert_eq!(
        err,
        DigestBytesError::LengthMismatch {
            algorithm: DigestAlgorithm::Sha256,
            expected: 32,
            actual: 10,
        }
    );
    assert!(matches!(
        SecureBytesError::from(err),
        SecureBytesError::CryptographicError(_)
    ));
}

#[test]
fn key_pair_debug_shows_only_lengths() {
    let pair = RsaKeyPair::new(
        ByteBuffer::from("secret private blob"),
        ByteBuffer::from("public blob"),
        KeyFormat::Pem,
    );
    let debug = format!("{pair:?}");
    assert!(debug.contains("private_len=19"));
    assert!(!debug.contains("secret"));
}

#[test]
fn cipher_key_debug_hides_key() {
    let material = CipherKey::new(ByteBuffer::from(vec![0x42; 16]), ByteBuffer::from(vec![0; 16]));
    assert!(!format!("{material:?}").contains(&"42".repeat(16)));
}
