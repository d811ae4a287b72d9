//! Cryptographic primitive backend trait.
//!
//! This module defines the capabilities the service layer consumes without
//! re-implementing them: digests, symmetric transforms, random key material,
//! password-based key derivation and RSA operations. The crate ships one
//! implementation backed by OpenSSL (`OpenSslBackend`).

use crate::domain::crypto::{CipherDirection, DigestAlgorithm, KeyRole, SymmetricCipher};
use crate::domain::format::KeyFormat;
use crate::infra::error::SecureBytesResult;

/// Primitive operations supplied by a cryptographic library.
///
/// Implementations are stateless: every call is a pure function of its
/// arguments (plus the library's random source for generators).
pub trait CryptoBackend: Send + Sync {
    /// Parsed RSA key as the backend represents it.
    type RsaKey;

    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;

    /// Compute the digest of `data`.
    ///
    /// # Errors
    ///
    /// Returns error if the library does not provide `algorithm`.
    fn digest_compute(&self, algorithm: DigestAlgorithm, data: &[u8]) -> SecureBytesResult<Vec<u8>>;

    /// Run `data` through `cipher` in the given direction.
    ///
    /// The direction is part of the call so that it is fixed before the key
    /// and IV are installed.
    ///
    /// # Errors
    ///
    /// Returns error if the transform fails (bad padding on decrypt, etc.).
    fn cipher_transform(
        &self,
        cipher: SymmetricCipher,
        direction: CipherDirection,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
    ) -> SecureBytesResult<Vec<u8>>;

    /// Required key length of `cipher` in bytes.
    fn cipher_key_length(&self, cipher: SymmetricCipher) -> usize;

    /// Required IV length of `cipher` in bytes (zero when it takes none).
    fn cipher_iv_length(&self, cipher: SymmetricCipher) -> usize;

    /// Fresh random key for `cipher`.
    ///
    /// # Errors
    ///
    /// Returns error if the random source fails.
    fn cipher_random_key(&self, cipher: SymmetricCipher) -> SecureBytesResult<Vec<u8>>;

    /// Fresh random IV for `cipher`.
    ///
    /// # Errors
    ///
    /// Returns error if the random source fails.
    fn cipher_random_iv(&self, cipher: SymmetricCipher) -> SecureBytesResult<Vec<u8>>;

    /// PBKDF2 with the backend's fixed pseudorandom function.
    ///
    /// # Errors
    ///
    /// Returns error if derivation fails.
    fn pbkdf(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        iterations: u32,
        output_length: usize,
    ) -> SecureBytesResult<Vec<u8>>;

    /// Generate a new RSA private key.
    ///
    /// # Errors
    ///
    /// Returns error if generation fails.
    fn rsa_generate(&self, bits: u32) -> SecureBytesResult<Self::RsaKey>;

    /// Parse a PEM or DER key blob, private or public.
    ///
    /// # Errors
    ///
    /// Returns `KeyParseFailure` if the blob is not an RSA key.
    fn rsa_parse(&self, blob: &[u8]) -> SecureBytesResult<Self::RsaKey>;

    /// Serialize the `role` component of `key`.
    ///
    /// # Errors
    ///
    /// Returns error if `role` is private and `key` holds only a public key.
    fn rsa_serialize(
        &self,
        key: &Self::RsaKey,
        role: KeyRole,
        format: KeyFormat,
    ) -> SecureBytesResult<Vec<u8>>;

    /// Whether `key` holds private components.
    fn rsa_is_private(&self, key: &Self::RsaKey) -> bool;

    /// Modulus size in bytes.
    fn rsa_size(&self, key: &Self::RsaKey) -> usize;

    /// PKCS#1 v1.5 encrypt with the private or public primitive.
    ///
    /// # Errors
    ///
    /// Returns error if the primitive fails.
    fn rsa_encrypt(
        &self,
        key: &Self::RsaKey,
        data: &[u8],
        use_private: bool,
    ) -> SecureBytesResult<Vec<u8>>;

    /// PKCS#1 v1.5 decrypt with the private or public primitive.
    ///
    /// # Errors
    ///
    /// Returns error if the primitive fails or the padding does not check out.
    fn rsa_decrypt(
        &self,
        key: &Self::RsaKey,
        data: &[u8],
        use_private: bool,
    ) -> SecureBytesResult<Vec<u8>>;

    /// Sign `data` hashed with `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns error if `key` is not private or signing fails.
    fn rsa_sign(
        &self,
        key: &Self::RsaKey,
        algorithm: DigestAlgorithm,
        data: &[u8],
    ) -> SecureBytesResult<Vec<u8>>;

    /// Verify `signature` over `data` hashed with `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns error only if verification could not be attempted.
    fn rsa_verify(
        &self,
        key: &Self::RsaKey,
        algorithm: DigestAlgorithm,
        data: &[u8],
        signature: &[u8],
    ) -> SecureBytesResult<bool>;
}
