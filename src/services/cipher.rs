//! Symmetric cipher operations and key generation.

use crate::adapters::backend::CryptoBackend;
use crate::domain::bytes::ByteBuffer;
use crate::domain::crypto::{CipherDirection, CipherKey, SymmetricCipher};
use crate::infra::error::{SecureBytesError, SecureBytesResult};
use crate::services::operations::CryptoOperations;

/// Iteration counts below this are accepted but logged as weak.
const WEAK_ITERATION_COUNT: u32 = 1000;

impl<B: CryptoBackend> CryptoOperations<B> {
    /// Names accepted by the cipher operations.
    #[must_use]
    pub fn supported_ciphers(&self) -> Vec<&'static str> {
        SymmetricCipher::ALL.iter().map(SymmetricCipher::name).collect()
    }

    /// Encrypt `data` with the named cipher.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` for an unknown cipher name and
    /// `InvalidArgument` if the key or IV length does not fit the cipher.
    pub fn cipher_encrypt(
        &self,
        data: &ByteBuffer,
        cipher_name: &str,
        key: &ByteBuffer,
        iv: &ByteBuffer,
    ) -> SecureBytesResult<ByteBuffer> {
        let cipher = cipher_name.parse()?;
        self.transform(cipher, CipherDirection::Encrypt, data, key, iv)
    }

    /// Decrypt `data` with the named cipher.
    ///
    /// # Errors
    ///
    /// As `cipher_encrypt`, plus a cryptographic error when padding fails to
    /// verify (wrong key or corrupted input).
    pub fn cipher_decrypt(
        &self,
        data: &ByteBuffer,
        cipher_name: &str,
        key: &ByteBuffer,
        iv: &ByteBuffer,
    ) -> SecureBytesResult<ByteBuffer> {
        let cipher = cipher_name.parse()?;
        self.transform(cipher, CipherDirection::Decrypt, data, key, iv)
    }

    /// AES-CBC encrypt; the key size picks AES-128, AES-192 or AES-256.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the key is 16, 24 or 32 bytes.
    pub fn aes_encrypt(
        &self,
        data: &ByteBuffer,
        key: &ByteBuffer,
        iv: &ByteBuffer,
    ) -> SecureBytesResult<ByteBuffer> {
        let cipher = SymmetricCipher::aes_cbc(key.len() * 8)?;
        self.transform(cipher, CipherDirection::Encrypt, data, key, iv)
    }

    /// AES-CBC decrypt; the key size picks AES-128, AES-192 or AES-256.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the key is 16, 24 or 32 bytes.
    pub fn aes_decrypt(
        &self,
        data: &ByteBuffer,
        key: &ByteBuffer,
        iv: &ByteBuffer,
    ) -> SecureBytesResult<ByteBuffer> {
        let cipher = SymmetricCipher::aes_cbc(key.len() * 8)?;
        self.transform(cipher, CipherDirection::Decrypt, data, key, iv)
    }

    /// Random key and IV for the named cipher.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` for an unknown cipher name.
    pub fn cipher_keygen(&self, cipher_name: &str) -> SecureBytesResult<CipherKey> {
        let cipher: SymmetricCipher = cipher_name.parse()?;
        let key = self.backend.cipher_random_key(cipher)?;
        let iv = self.backend.cipher_random_iv(cipher)?;
        log::debug!("Generated random key material for {cipher}");
        Ok(CipherKey::new(key.into(), iv.into()))
    }

    /// Key and IV derived from a passphrase with PBKDF2 (HMAC-SHA1).
    ///
    /// One derivation of `key_len + iv_len` bytes is split into the key and the
    /// IV, so identical inputs always give identical output.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` for an unknown cipher name and
    /// `InvalidArgument` for a zero iteration count.
    pub fn cipher_passphrase_keygen(
        &self,
        cipher_name: &str,
        passphrase: &ByteBuffer,
        salt: &ByteBuffer,
        iterations: u32,
    ) -> SecureBytesResult<CipherKey> {
        let cipher: SymmetricCipher = cipher_name.parse()?;

        if iterations == 0 {
            return Err(SecureBytesError::InvalidArgument(
                "PBKDF2 iteration count must be greater than 0".to_string(),
            ));
        }
        if iterations < WEAK_ITERATION_COUNT {
            log::warn!("PBKDF2 with only {iterations} iterations gives weak keys");
        }

        let key_len = self.backend.cipher_key_length(cipher);
        let iv_len = self.backend.cipher_iv_length(cipher);
        let mut derived = self.backend.pbkdf(
            passphrase.as_slice(),
            salt.as_slice(),
            iterations,
            key_len + iv_len,
        )?;
        let iv = derived.split_off(key_len);

        Ok(CipherKey::new(derived.into(), iv.into()))
    }

    /// `cipher_passphrase_keygen` with the configured iteration count.
    ///
    /// # Errors
    ///
    /// See `cipher_passphrase_keygen`.
    pub fn cipher_passphrase_keygen_default(
        &self,
        cipher_name: &str,
        passphrase: &ByteBuffer,
        salt: &ByteBuffer,
    ) -> SecureBytesResult<CipherKey> {
        self.cipher_passphrase_keygen(
            cipher_name,
            passphrase,
            salt,
            self.defaults.pbkdf2_iterations,
        )
    }

    /// Random AES-CBC key and IV of `bits` key size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `bits` is 128, 192 or 256.
    pub fn aes_keygen(&self, bits: usize) -> SecureBytesResult<CipherKey> {
        let cipher = SymmetricCipher::aes_cbc(bits)?;
        self.cipher_keygen(cipher.name())
    }

    /// AES-CBC key and IV derived from a passphrase.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `bits` is 128, 192 or 256, or for a
    /// zero iteration count.
    pub fn aes_passphrase_keygen(
        &self,
        bits: usize,
        passphrase: &ByteBuffer,
        salt: &ByteBuffer,
        iterations: u32,
    ) -> SecureBytesResult<CipherKey> {
        let cipher = SymmetricCipher::aes_cbc(bits)?;
        self.cipher_passphrase_keygen(cipher.name(), passphrase, salt, iterations)
    }

    fn transform(
        &self,
        cipher: SymmetricCipher,
        direction: CipherDirection,
        data: &ByteBuffer,
        key: &ByteBuffer,
        iv: &ByteBuffer,
    ) -> SecureBytesResult<ByteBuffer> {
        let key_len = self.backend.cipher_key_length(cipher);
        if key.len() != key_len {
            return Err(SecureBytesError::InvalidArgument(format!(
                "{cipher} needs a {key_len} byte key, got {} bytes",
                key.len()
            )));
        }

        let iv_len = self.backend.cipher_iv_length(cipher);
        if iv.len() != iv_len {
            return Err(SecureBytesError::InvalidArgument(format!(
                "{cipher} needs a {iv_len} byte IV, got {} bytes",
                iv.len()
            )));
        }

        let output = self.backend.cipher_transform(
            cipher,
            direction,
            key.as_slice(),
            iv.as_slice(),
            data.as_slice(),
        )?;
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::infra::error::SecureBytesError;
    use crate::{ByteBuffer, CryptoOperations};

    fn aes_fixture() -> (ByteBuffer, ByteBuffer) {
        let key = ByteBuffer::from_hex(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        )
        .unwrap();
        let iv = ByteBuffer::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
        (key, iv)
    }

    #[test]
    fn test_cipher_round_trip() {
        let ops = CryptoOperations::new();
        let (key, iv) = aes_fixture();
        let message = ByteBuffer::from("This is a test of the emergency broadcast system.");

        let encrypted = ops.cipher_encrypt(&message, "aes-256-cbc", &key, &iv).unwrap();
        assert_ne!(encrypted, message);
        assert_eq!(encrypted.len() % 16, 0);

        let decrypted = ops.cipher_decrypt(&encrypted, "AES-256-CBC", &key, &iv).unwrap();
        assert_eq!(decrypted, message);
    }

    #[test]
    fn test_aes_matches_named_cipher() {
        let ops = CryptoOperations::new();
        let (key, iv) = aes_fixture();
        let message = ByteBuffer::from("Hello");
        assert_eq!(
            ops.aes_encrypt(&message, &key, &iv).unwrap(),
            ops.cipher_encrypt(&message, "aes-256-cbc", &key, &iv).unwrap()
        );
    }

    #[test]
    fn test_key_length_mismatch() {
        let ops = CryptoOperations::new();
        let (_, iv) = aes_fixture();
        let short_key = ByteBuffer::from([0u8; 20]);
        let err = ops
            .cipher_encrypt(&ByteBuffer::from("Hello"), "aes-256-cbc", &short_key, &iv)
            .unwrap_err();
        assert!(matches!(err, SecureBytesError::InvalidArgument(_)));

        let err = ops
            .aes_encrypt(&ByteBuffer::from("Hello"), &short_key, &iv)
            .unwrap_err();
        assert!(matches!(err, SecureBytesError::InvalidArgument(_)));
    }

    #[test]
    fn test_passphrase_keygen_is_deterministic() {
        let ops = CryptoOperations::new();
        let passphrase = ByteBuffer::from("correct horse battery staple");
        let salt = ByteBuffer::from("NaCl");

        let first = ops
            .cipher_passphrase_keygen("aes-256-cbc", &passphrase, &salt, 2048)
            .unwrap();
        let second = ops
            .aes_passphrase_keygen(256, &passphrase, &salt, 2048)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.key.len(), 32);
        assert_eq!(first.iv.len(), 16);

        let other_salt = ops
            .cipher_passphrase_keygen("aes-256-cbc", &passphrase, &ByteBuffer::from("KCl"), 2048)
            .unwrap();
        assert_ne!(first, other_salt);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let ops = CryptoOperations::new();
        let err = ops
            .cipher_passphrase_keygen(
                "aes-128-cbc",
                &ByteBuffer::from("pw"),
                &ByteBuffer::from("salt"),
                0,
            )
            .unwrap_err();
        assert!(matches!(err, SecureBytesError::InvalidArgument(_)));
    }

    #[test]
    fn test_supported_ciphers_parse() {
        let ops = CryptoOperations::new();
        let ciphers = ops.supported_ciphers();
        assert!(ciphers.contains(&"aes-256-cbc"));
        for name in ciphers {
            assert!(ops.cipher_keygen(name).is_ok(), "{name}");
        }
    }
}
