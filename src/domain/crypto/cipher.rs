//! Symmetric cipher domain types.

use std::fmt;
use std::str::FromStr;

use openssl::symm::Cipher;

use crate::domain::bytes::ByteBuffer;
use crate::infra::error::{SecureBytesError, SecureBytesResult};

/// Supported symmetric ciphers, named the way OpenSSL names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetricCipher {
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
    Aes128Ecb,
    Aes192Ecb,
    Aes256Ecb,
    Aes128Ctr,
    Aes192Ctr,
    Aes256Ctr,
    Aes128Cfb128,
    Aes192Cfb128,
    Aes256Cfb128,
    Aes128Ofb,
    Aes192Ofb,
    Aes256Ofb,
    DesEde3Cbc,
}

impl SymmetricCipher {
    pub const ALL: [SymmetricCipher; 16] = [
        SymmetricCipher::Aes128Cbc,
        SymmetricCipher::Aes192Cbc,
        SymmetricCipher::Aes256Cbc,
        SymmetricCipher::Aes128Ecb,
        SymmetricCipher::Aes192Ecb,
        SymmetricCipher::Aes256Ecb,
        SymmetricCipher::Aes128Ctr,
        SymmetricCipher::Aes192Ctr,
        SymmetricCipher::Aes256Ctr,
        SymmetricCipher::Aes128Cfb128,
        SymmetricCipher::Aes192Cfb128,
        SymmetricCipher::Aes256Cfb128,
        SymmetricCipher::Aes128Ofb,
        SymmetricCipher::Aes192Ofb,
        SymmetricCipher::Aes256Ofb,
        SymmetricCipher::DesEde3Cbc,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SymmetricCipher::Aes128Cbc => "aes-128-cbc",
            SymmetricCipher::Aes192Cbc => "aes-192-cbc",
            SymmetricCipher::Aes256Cbc => "aes-256-cbc",
            SymmetricCipher::Aes128Ecb => "aes-128-ecb",
            SymmetricCipher::Aes192Ecb => "aes-192-ecb",
            SymmetricCipher::Aes256Ecb => "aes-256-ecb",
            SymmetricCipher::Aes128Ctr => "aes-128-ctr",
            SymmetricCipher::Aes192Ctr => "aes-192-ctr",
            SymmetricCipher::Aes256Ctr => "aes-256-ctr",
            SymmetricCipher::Aes128Cfb128 => "aes-128-cfb",
            SymmetricCipher::Aes192Cfb128 => "aes-192-cfb",
            SymmetricCipher::Aes256Cfb128 => "aes-256-cfb",
            SymmetricCipher::Aes128Ofb => "aes-128-ofb",
            SymmetricCipher::Aes192Ofb => "aes-192-ofb",
            SymmetricCipher::Aes256Ofb => "aes-256-ofb",
            SymmetricCipher::DesEde3Cbc => "des-ede3-cbc",
        }
    }

    /// AES in CBC mode for a key size in bits.
    pub fn aes_cbc(bits: usize) -> SecureBytesResult<Self> {
        match bits {
            128 => Ok(SymmetricCipher::Aes128Cbc),
            192 => Ok(SymmetricCipher::Aes192Cbc),
            256 => Ok(SymmetricCipher::Aes256Cbc),
            _ => Err(SecureBytesError::InvalidArgument(format!(
                "invalid AES key length: {bits} bits (expected 128, 192 or 256)"
            ))),
        }
    }

    /// OpenSSL cipher object for this cipher.
    #[must_use]
    pub fn openssl_cipher(&self) -> Cipher {
        match self {
            SymmetricCipher::Aes128Cbc => Cipher::aes_128_cbc(),
            SymmetricCipher::Aes192Cbc => Cipher::aes_192_cbc(),
            SymmetricCipher::Aes256Cbc => Cipher::aes_256_cbc(),
            SymmetricCipher::Aes128Ecb => Cipher::aes_128_ecb(),
            SymmetricCipher::Aes192Ecb => Cipher::aes_192_ecb(),
            SymmetricCipher::Aes256Ecb => Cipher::aes_256_ecb(),
            SymmetricCipher::Aes128Ctr => Cipher::aes_128_ctr(),
            SymmetricCipher::Aes192Ctr => Cipher::aes_192_ctr(),
            SymmetricCipher::Aes256Ctr => Cipher::aes_256_ctr(),
            SymmetricCipher::Aes128Cfb128 => Cipher::aes_128_cfb128(),
            SymmetricCipher::Aes192Cfb128 => Cipher::aes_192_cfb128(),
            SymmetricCipher::Aes256Cfb128 => Cipher::aes_256_cfb128(),
            SymmetricCipher::Aes128Ofb => Cipher::aes_128_ofb(),
            SymmetricCipher::Aes192Ofb => Cipher::aes_192_ofb(),
            SymmetricCipher::Aes256Ofb => Cipher::aes_256_ofb(),
            SymmetricCipher::DesEde3Cbc => Cipher::des_ede3_cbc(),
        }
    }
}

impl fmt::Display for SymmetricCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetricCipher {
    type Err = SecureBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        // OpenSSL spells full-block CFB both ways
        let normalized = normalized.replace("-cfb128", "-cfb");

        SymmetricCipher::ALL
            .into_iter()
            .find(|cipher| cipher.name() == normalized)
            .ok_or_else(|| SecureBytesError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Which way a cipher transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherDirection {
    Encrypt,
    Decrypt,
}

/// Key and initialization vector for one cipher.
///
/// `Debug` hides the key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey {
    pub key: ByteBuffer,
    pub iv: ByteBuffer,
}

impl CipherKey {
    #[must_use]
    pub fn new(key: ByteBuffer, iv: ByteBuffer) -> Self {
        Self { key, iv }
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CipherKey(key_len={}, iv_len={})",
            self.key.len(),
            self.iv.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cipher_names_round_trip() {
        for cipher in SymmetricCipher::ALL {
            assert_eq!(cipher.name().parse::<SymmetricCipher>().unwrap(), cipher);
            assert_eq!(
                cipher
                    .name()
                    .to_ascii_uppercase()
                    .parse::<SymmetricCipher>()
                    .unwrap(),
                cipher
            );
        }
        assert_eq!(
            "AES-256-CFB128".parse::<SymmetricCipher>().unwrap(),
            SymmetricCipher::Aes256Cfb128
        );
    }

    #[test]
    fn test_unknown_cipher_is_unsupported() {
        let err = "rot13".parse::<SymmetricCipher>().unwrap_err();
        assert!(matches!(err, SecureBytesError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn test_aes_cbc_from_bits() {
        assert_eq!(
            SymmetricCipher::aes_cbc(256).unwrap(),
            SymmetricCipher::Aes256Cbc
        );
        assert!(matches!(
            SymmetricCipher::aes_cbc(64),
            Err(SecureBytesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_cipher_key_debug_hides_key() {
        let key = CipherKey::new(ByteBuffer::from([0xAB; 16]), ByteBuffer::from([0xCD; 16]));
        let debug = format!("{key:?}");
        assert_eq!(debug, "CipherKey(key_len=16, iv_len=16)");
        assert!(!debug.contains("abab"));
    }
}
