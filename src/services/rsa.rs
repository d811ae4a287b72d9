//! RSA key generation, encryption, signing and key introspection.
//!
//! Key blobs are plain `ByteBuffer` values in PEM or DER; every call parses
//! the blob it is given and keeps nothing between calls. Encryption uses
//! PKCS#1 v1.5 padding, so plaintext is limited to the modulus size minus 11
//! bytes.

use crate::adapters::backend::CryptoBackend;
use crate::domain::bytes::ByteBuffer;
use crate::domain::crypto::{
    resolve, DigestIdentifier, KeyRole, RsaKeyPair, MIN_RSA_BITS, PKCS1_PADDING_OVERHEAD,
};
use crate::domain::format::KeyFormat;
use crate::infra::error::{SecureBytesError, SecureBytesResult};
use crate::services::operations::CryptoOperations;

impl<B: CryptoBackend> CryptoOperations<B> {
    /// Generate a new key pair of `bits` modulus size.
    ///
    /// Returns the private key (PKCS#1) and public key (SubjectPublicKeyInfo)
    /// serialized in `format`. Large sizes take noticeably long.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `bits` is below 512.
    pub fn rsa_keygen(&self, bits: u32, format: KeyFormat) -> SecureBytesResult<RsaKeyPair> {
        if bits < MIN_RSA_BITS {
            return Err(SecureBytesError::InvalidArgument(format!(
                "RSA key length {bits} is below the minimum of {MIN_RSA_BITS} bits"
            )));
        }
        if bits < 1024 {
            log::warn!("Generating a {bits}-bit RSA key; such keys are not secure");
        }

        log::info!(
            "Generating {bits}-bit RSA key pair ({format}) with {} backend",
            self.backend.name()
        );
        let key = self.backend.rsa_generate(bits)?;
        self.key_pair(&key, format)
    }

    /// `rsa_keygen` with the configured size and format.
    ///
    /// # Errors
    ///
    /// See `rsa_keygen`.
    pub fn rsa_keygen_default(&self) -> SecureBytesResult<RsaKeyPair> {
        self.rsa_keygen(self.defaults.rsa_bits, self.defaults.key_format)
    }

    /// Re-serialize a private key and extract its public component.
    ///
    /// # Errors
    ///
    /// Returns `KeyParseFailure` if the blob does not parse and
    /// `InvalidArgument` if it holds only a public key.
    pub fn separate_keys(
        &self,
        private_key: &ByteBuffer,
        format: KeyFormat,
    ) -> SecureBytesResult<RsaKeyPair> {
        let key = self.backend.rsa_parse(private_key.as_slice())?;
        if !self.backend.rsa_is_private(&key) {
            return Err(SecureBytesError::InvalidArgument(
                "expected a private key, got a public key".to_string(),
            ));
        }
        self.key_pair(&key, format)
    }

    /// Public component of a private key blob.
    ///
    /// # Errors
    ///
    /// See `separate_keys`.
    pub fn extract_public_key(
        &self,
        private_key: &ByteBuffer,
        format: KeyFormat,
    ) -> SecureBytesResult<ByteBuffer> {
        let (_, public_key) = self.separate_keys(private_key, format)?.into_parts();
        Ok(public_key)
    }

    /// Encrypt `data` with `key`.
    ///
    /// A public key encrypts for its owner. A private key uses the private
    /// primitive, producing ciphertext anyone with the public key can open
    /// (proof of possession).
    ///
    /// # Errors
    ///
    /// Returns `MessageTooLong` if `data` exceeds the key size minus 11 bytes
    /// and `KeyParseFailure` if the key does not parse.
    pub fn rsa_encrypt(&self, data: &ByteBuffer, key: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        let key = self.backend.rsa_parse(key.as_slice())?;
        let max = self
            .backend
            .rsa_size(&key)
            .saturating_sub(PKCS1_PADDING_OVERHEAD);
        if data.len() > max {
            return Err(SecureBytesError::MessageTooLong {
                length: data.len(),
                max,
            });
        }

        let use_private = self.backend.rsa_is_private(&key);
        log::debug!(
            "RSA encrypting {} bytes with the {} primitive",
            data.len(),
            if use_private { "private" } else { "public" }
        );
        Ok(self
            .backend
            .rsa_encrypt(&key, data.as_slice(), use_private)?
            .into())
    }

    /// Decrypt `data` with `key`, using the primitive matching the key role.
    ///
    /// # Errors
    ///
    /// Returns `KeyParseFailure` if the key does not parse, or a cryptographic
    /// error if the ciphertext was not made for this key.
    pub fn rsa_decrypt(&self, data: &ByteBuffer, key: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        let key = self.backend.rsa_parse(key.as_slice())?;
        let use_private = self.backend.rsa_is_private(&key);
        Ok(self
            .backend
            .rsa_decrypt(&key, data.as_slice(), use_private)?
            .into())
    }

    /// Sign `data` with the configured default digest (SHA-256 unless changed).
    ///
    /// # Errors
    ///
    /// See `sign_with`.
    pub fn sign(&self, data: &ByteBuffer, private_key: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        self.sign_with(data, private_key, self.defaults.digest)
    }

    /// Sign `data` with `private_key` using the digest `identifier` resolves to.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` for an unknown digest, `KeyParseFailure`
    /// for an unparsable key and `InvalidArgument` for a public key.
    pub fn sign_with(
        &self,
        data: &ByteBuffer,
        private_key: &ByteBuffer,
        identifier: impl Into<DigestIdentifier>,
    ) -> SecureBytesResult<ByteBuffer> {
        let algorithm = resolve(identifier)?;
        let key = self.backend.rsa_parse(private_key.as_slice())?;
        if !self.backend.rsa_is_private(&key) {
            return Err(SecureBytesError::InvalidArgument(
                "signing requires a private key".to_string(),
            ));
        }
        Ok(self
            .backend
            .rsa_sign(&key, algorithm, data.as_slice())?
            .into())
    }

    /// Verify `signature` over `data` with the configured default digest.
    ///
    /// # Errors
    ///
    /// See `verify_with`.
    pub fn verify(
        &self,
        data: &ByteBuffer,
        public_key: &ByteBuffer,
        signature: &ByteBuffer,
    ) -> SecureBytesResult<bool> {
        self.verify_with(data, public_key, signature, self.defaults.digest)
    }

    /// Verify `signature` over `data` using the digest `identifier` resolves to.
    ///
    /// A signature from a different key, or over different data, gives
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` for an unknown digest and
    /// `KeyParseFailure` for an unparsable key.
    pub fn verify_with(
        &self,
        data: &ByteBuffer,
        public_key: &ByteBuffer,
        signature: &ByteBuffer,
        identifier: impl Into<DigestIdentifier>,
    ) -> SecureBytesResult<bool> {
        let algorithm = resolve(identifier)?;
        let key = self.backend.rsa_parse(public_key.as_slice())?;
        self.backend
            .rsa_verify(&key, algorithm, data.as_slice(), signature.as_slice())
    }

    /// Whether the blob is a private key.
    ///
    /// # Errors
    ///
    /// Returns `KeyParseFailure` if the blob is not an RSA key.
    pub fn is_private_key(&self, blob: &ByteBuffer) -> SecureBytesResult<bool> {
        Ok(self.key_role(blob)? == KeyRole::Private)
    }

    /// Whether the blob is a public key.
    ///
    /// A private key blob answers `false` even though it contains everything
    /// needed for public operations.
    ///
    /// # Errors
    ///
    /// Returns `KeyParseFailure` if the blob is not an RSA key.
    pub fn is_public_key(&self, blob: &ByteBuffer) -> SecureBytesResult<bool> {
        // Derived from the private check; asking the library "can this key do
        // public operations" is true for private keys too.
        Ok(!self.is_private_key(blob)?)
    }

    /// Role the blob fills.
    ///
    /// # Errors
    ///
    /// Returns `KeyParseFailure` if the blob is not an RSA key.
    pub fn key_role(&self, blob: &ByteBuffer) -> SecureBytesResult<KeyRole> {
        let key = self.backend.rsa_parse(blob.as_slice())?;
        if self.backend.rsa_is_private(&key) {
            Ok(KeyRole::Private)
        } else {
            Ok(KeyRole::Public)
        }
    }

    fn key_pair(&self, key: &B::RsaKey, format: KeyFormat) -> SecureBytesResult<RsaKeyPair> {
        let private_key = self
            .backend
            .rsa_serialize(key, KeyRole::Private, format)?;
        let public_key = self.backend.rsa_serialize(key, KeyRole::Public, format)?;
        Ok(RsaKeyPair::new(
            private_key.into(),
            public_key.into(),
            format,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::crypto::KeyRole;
    use crate::infra::error::SecureBytesError;
    use crate::{ByteBuffer, CryptoOperations, KeyFormat};

    #[test]
    fn test_keygen_rejects_tiny_keys() {
        let ops = CryptoOperations::new();
        let err = ops.rsa_keygen(256, KeyFormat::Pem).unwrap_err();
        assert!(matches!(err, SecureBytesError::InvalidArgument(_)));
    }

    #[test]
    fn test_key_roles() {
        let ops = CryptoOperations::new();
        let pair = ops.rsa_keygen(1024, KeyFormat::Pem).unwrap();

        assert!(ops.is_private_key(pair.private_key()).unwrap());
        assert!(!ops.is_public_key(pair.private_key()).unwrap());
        assert!(ops.is_public_key(pair.public_key()).unwrap());
        assert!(!ops.is_private_key(pair.public_key()).unwrap());
        assert_eq!(ops.key_role(pair.public_key()).unwrap(), KeyRole::Public);
    }

    #[test]
    fn test_message_too_long() {
        let ops = CryptoOperations::new();
        let pair = ops.rsa_keygen(1024, KeyFormat::Der).unwrap();

        let max = ByteBuffer::from(vec![0x41; 128 - 11]);
        assert!(ops.rsa_encrypt(&max, pair.public_key()).is_ok());

        let too_long = ByteBuffer::from(vec![0x41; 128 - 10]);
        let err = ops.rsa_encrypt(&too_long, pair.public_key()).unwrap_err();
        assert!(matches!(
            err,
            SecureBytesError::MessageTooLong {
                length: 118,
                max: 117
            }
        ));
    }

    #[test]
    fn test_garbage_key_fails_to_parse() {
        let ops = CryptoOperations::new();
        let err = ops
            .rsa_encrypt(&ByteBuffer::from("Hello"), &ByteBuffer::from("not a key"))
            .unwrap_err();
        assert!(matches!(err, SecureBytesError::KeyParseFailure(_)));
        assert!(ops.is_private_key(&ByteBuffer::empty()).is_err());
    }
}
