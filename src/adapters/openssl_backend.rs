//! OpenSSL implementation of `CryptoBackend`.

use openssl::hash::hash;
use openssl::pkcs5::pbkdf2_hmac;
use openssl::pkey::{PKey, Private, Public};
use openssl::rand::rand_bytes;
use openssl::rsa::{Padding, Rsa};
use openssl::sign::{Signer, Verifier};
use openssl::symm::{Crypter, Mode};

use crate::adapters::backend::CryptoBackend;
use crate::domain::crypto::{CipherDirection, DigestAlgorithm, KeyRole, SymmetricCipher};
use crate::domain::format::KeyFormat;
use crate::infra::error::{SecureBytesError, SecureBytesResult};

/// RSA key parsed by OpenSSL, keeping track of which half it holds.
pub enum OpenSslRsaKey {
    Private(Rsa<Private>),
    Public(Rsa<Public>),
}

impl std::fmt::Debug for OpenSslRsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenSslRsaKey::Private(rsa) => write!(f, "OpenSslRsaKey::Private(bits={})", rsa.size() * 8),
            OpenSslRsaKey::Public(rsa) => write!(f, "OpenSslRsaKey::Public(bits={})", rsa.size() * 8),
        }
    }
}

/// Backend using the system OpenSSL library.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSslBackend;

impl OpenSslBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn random(length: usize) -> SecureBytesResult<Vec<u8>> {
        let mut bytes = vec![0u8; length];
        rand_bytes(&mut bytes)?;
        Ok(bytes)
    }

    fn parse_private(blob: &[u8]) -> Option<Rsa<Private>> {
        Rsa::private_key_from_pem(blob)
            .or_else(|_| Rsa::private_key_from_der(blob))
            .or_else(|_| PKey::private_key_from_pem(blob).and_then(|pkey| pkey.rsa()))
            .or_else(|_| PKey::private_key_from_der(blob).and_then(|pkey| pkey.rsa()))
            .ok()
    }

    fn parse_public(blob: &[u8]) -> Option<Rsa<Public>> {
        Rsa::public_key_from_pem(blob)
            .or_else(|_| Rsa::public_key_from_pem_pkcs1(blob))
            .or_else(|_| Rsa::public_key_from_der(blob))
            .or_else(|_| Rsa::public_key_from_der_pkcs1(blob))
            .ok()
    }

    /// Public half of any key as its own `Rsa<Public>`.
    fn public_half(key: &OpenSslRsaKey) -> SecureBytesResult<Rsa<Public>> {
        match key {
            OpenSslRsaKey::Private(rsa) => {
                let n = rsa.n().to_owned()?;
                let e = rsa.e().to_owned()?;
                Ok(Rsa::from_public_components(n, e)?)
            }
            OpenSslRsaKey::Public(rsa) => {
                let n = rsa.n().to_owned()?;
                let e = rsa.e().to_owned()?;
                Ok(Rsa::from_public_components(n, e)?)
            }
        }
    }
}

impl CryptoBackend for OpenSslBackend {
    type RsaKey = OpenSslRsaKey;

    fn name(&self) -> &'static str {
        "openssl"
    }

    fn digest_compute(&self, algorithm: DigestAlgorithm, data: &[u8]) -> SecureBytesResult<Vec<u8>> {
        log::debug!("Computing {algorithm} digest over {} bytes", data.len());
        let digest = hash(algorithm.message_digest(), data).map_err(|e| {
            SecureBytesError::CryptographicError(format!("{algorithm} digest failed: {e}"))
        })?;
        Ok(digest.to_vec())
    }

    fn cipher_transform(
        &self,
        cipher: SymmetricCipher,
        direction: CipherDirection,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
    ) -> SecureBytesResult<Vec<u8>> {
        let openssl_cipher = cipher.openssl_cipher();
        let mode = match direction {
            CipherDirection::Encrypt => Mode::Encrypt,
            CipherDirection::Decrypt => Mode::Decrypt,
        };
        let iv = if iv.is_empty() { None } else { Some(iv) };

        log::debug!(
            "Running {cipher} {direction:?} over {} bytes",
            data.len()
        );

        // Crypter takes the mode at construction, ahead of key and IV.
        let mut crypter = Crypter::new(openssl_cipher, mode, key, iv)?;
        let mut output = vec![0u8; data.len() + openssl_cipher.block_size()];
        let mut count = crypter.update(data, &mut output)?;
        count += crypter.finalize(&mut output[count..]).map_err(|e| {
            SecureBytesError::CryptographicError(format!("{cipher} finalize failed: {e}"))
        })?;
        output.truncate(count);
        Ok(output)
    }

    fn cipher_key_length(&self, cipher: SymmetricCipher) -> usize {
        cipher.openssl_cipher().key_len()
    }

    fn cipher_iv_length(&self, cipher: SymmetricCipher) -> usize {
        cipher.openssl_cipher().iv_len().unwrap_or(0)
    }

    fn cipher_random_key(&self, cipher: SymmetricCipher) -> SecureBytesResult<Vec<u8>> {
        Self::random(self.cipher_key_length(cipher))
    }

    fn cipher_random_iv(&self, cipher: SymmetricCipher) -> SecureBytesResult<Vec<u8>> {
        Self::random(self.cipher_iv_length(cipher))
    }

    fn pbkdf(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        iterations: u32,
        output_length: usize,
    ) -> SecureBytesResult<Vec<u8>> {
        let mut output = vec![0u8; output_length];
        let iterations = usize::try_from(iterations).map_err(|_| {
            SecureBytesError::InvalidArgument(format!("iteration count too large: {iterations}"))
        })?;
        pbkdf2_hmac(
            passphrase,
            salt,
            iterations,
            openssl::hash::MessageDigest::sha1(),
            &mut output,
        )?;
        Ok(output)
    }

    fn rsa_generate(&self, bits: u32) -> SecureBytesResult<Self::RsaKey> {
        log::debug!("Generating {bits}-bit RSA key");
        Ok(OpenSslRsaKey::Private(Rsa::generate(bits)?))
    }

    fn rsa_parse(&self, blob: &[u8]) -> SecureBytesResult<Self::RsaKey> {
        if let Some(rsa) = Self::parse_private(blob) {
            return Ok(OpenSslRsaKey::Private(rsa));
        }
        if let Some(rsa) = Self::parse_public(blob) {
            return Ok(OpenSslRsaKey::Public(rsa));
        }
        Err(SecureBytesError::KeyParseFailure(format!(
            "{} byte blob is not a PEM or DER encoded RSA key",
            blob.len()
        )))
    }

    fn rsa_serialize(
        &self,
        key: &Self::RsaKey,
        role: KeyRole,
        format: KeyFormat,
    ) -> SecureBytesResult<Vec<u8>> {
        let bytes = match role {
            KeyRole::Private => {
                let OpenSslRsaKey::Private(rsa) = key else {
                    return Err(SecureBytesError::InvalidArgument(
                        "cannot serialize a private key from a public key".to_string(),
                    ));
                };
                match format {
                    KeyFormat::Pem => rsa.private_key_to_pem()?,
                    KeyFormat::Der => rsa.private_key_to_der()?,
                }
            }
            KeyRole::Public => {
                let public = Self::public_half(key)?;
                match format {
                    KeyFormat::Pem => public.public_key_to_pem()?,
                    KeyFormat::Der => public.public_key_to_der()?,
                }
            }
        };
        Ok(bytes)
    }

    fn rsa_is_private(&self, key: &Self::RsaKey) -> bool {
        matches!(key, OpenSslRsaKey::Private(_))
    }

    fn rsa_size(&self, key: &Self::RsaKey) -> usize {
        match key {
            OpenSslRsaKey::Private(rsa) => rsa.size() as usize,
            OpenSslRsaKey::Public(rsa) => rsa.size() as usize,
        }
    }

    fn rsa_encrypt(
        &self,
        key: &Self::RsaKey,
        data: &[u8],
        use_private: bool,
    ) -> SecureBytesResult<Vec<u8>> {
        let mut output = vec![0u8; self.rsa_size(key)];
        let written = match (key, use_private) {
            (OpenSslRsaKey::Private(rsa), true) => {
                rsa.private_encrypt(data, &mut output, Padding::PKCS1)?
            }
            (OpenSslRsaKey::Private(rsa), false) => {
                rsa.public_encrypt(data, &mut output, Padding::PKCS1)?
            }
            (OpenSslRsaKey::Public(rsa), false) => {
                rsa.public_encrypt(data, &mut output, Padding::PKCS1)?
            }
            (OpenSslRsaKey::Public(_), true) => {
                return Err(SecureBytesError::InvalidArgument(
                    "private-key encryption requires a private key".to_string(),
                ))
            }
        };
        output.truncate(written);
        Ok(output)
    }

    fn rsa_decrypt(
        &self,
        key: &Self::RsaKey,
        data: &[u8],
        use_private: bool,
    ) -> SecureBytesResult<Vec<u8>> {
        let mut output = vec![0u8; self.rsa_size(key)];
        let written = match (key, use_private) {
            (OpenSslRsaKey::Private(rsa), true) => {
                rsa.private_decrypt(data, &mut output, Padding::PKCS1)?
            }
            (OpenSslRsaKey::Private(rsa), false) => {
                rsa.public_decrypt(data, &mut output, Padding::PKCS1)?
            }
            (OpenSslRsaKey::Public(rsa), false) => {
                rsa.public_decrypt(data, &mut output, Padding::PKCS1)?
            }
            (OpenSslRsaKey::Public(_), true) => {
                return Err(SecureBytesError::InvalidArgument(
                    "private-key decryption requires a private key".to_string(),
                ))
            }
        };
        output.truncate(written);
        Ok(output)
    }

    fn rsa_sign(
        &self,
        key: &Self::RsaKey,
        algorithm: DigestAlgorithm,
        data: &[u8],
    ) -> SecureBytesResult<Vec<u8>> {
        let OpenSslRsaKey::Private(rsa) = key else {
            return Err(SecureBytesError::InvalidArgument(
                "signing requires a private key".to_string(),
            ));
        };
        let pkey = PKey::from_rsa(rsa.clone())?;
        let mut signer = Signer::new(algorithm.message_digest(), &pkey)?;
        signer.update(data)?;
        Ok(signer.sign_to_vec()?)
    }

    fn rsa_verify(
        &self,
        key: &Self::RsaKey,
        algorithm: DigestAlgorithm,
        data: &[u8],
        signature: &[u8],
    ) -> SecureBytesResult<bool> {
        let pkey = PKey::from_rsa(Self::public_half(key)?)?;
        let mut verifier = Verifier::new(algorithm.message_digest(), &pkey)?;
        verifier.update(data)?;

        // A signature made by another key usually surfaces as a padding error
        // rather than `Ok(false)`; both mean "not verified".
        match verifier.verify(signature) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                log::debug!("Signature verification rejected: {e}");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_come_from_openssl() {
        let backend = OpenSslBackend::new();
        assert_eq!(backend.cipher_key_length(SymmetricCipher::Aes256Cbc), 32);
        assert_eq!(backend.cipher_iv_length(SymmetricCipher::Aes256Cbc), 16);
        assert_eq!(backend.cipher_key_length(SymmetricCipher::DesEde3Cbc), 24);
        assert_eq!(backend.cipher_iv_length(SymmetricCipher::Aes128Ecb), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let backend = OpenSslBackend::new();
        let err = backend.rsa_parse(b"not a key").unwrap_err();
        assert!(matches!(err, SecureBytesError::KeyParseFailure(_)));
    }

    #[test]
    fn test_generated_key_is_private() {
        let backend = OpenSslBackend::new();
        let key = backend.rsa_generate(1024).unwrap();
        assert!(backend.rsa_is_private(&key));
        assert_eq!(backend.rsa_size(&key), 128);

        let public_pem = backend
            .rsa_serialize(&key, KeyRole::Public, KeyFormat::Pem)
            .unwrap();
        let public = backend.rsa_parse(&public_pem).unwrap();
        assert!(!backend.rsa_is_private(&public));
        assert!(backend
            .rsa_serialize(&public, KeyRole::Private, KeyFormat::Der)
            .is_err());
    }
}
