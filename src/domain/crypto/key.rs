//! RSA key material wrappers.

use std::fmt;

use crate::domain::bytes::ByteBuffer;
use crate::domain::format::KeyFormat;

/// Smallest RSA modulus accepted for key generation, in bits.
pub const MIN_RSA_BITS: u32 = 512;

/// Default RSA modulus size for key generation, in bits.
pub const DEFAULT_RSA_BITS: u32 = 2048;

/// PKCS#1 v1.5 encryption padding overhead in bytes.
pub const PKCS1_PADDING_OVERHEAD: usize = 11;

/// Role a parsed RSA key blob fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Private,
    Public,
}

/// Serialized private/public RSA key pair.
///
/// Both blobs use the same `format`. `Debug` never prints the private key.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    private_key: ByteBuffer,
    public_key: ByteBuffer,
    format: KeyFormat,
}

impl RsaKeyPair {
    #[must_use]
    pub fn new(private_key: ByteBuffer, public_key: ByteBuffer, format: KeyFormat) -> Self {
        Self {
            private_key,
            public_key,
            format,
        }
    }

    #[must_use]
    pub fn private_key(&self) -> &ByteBuffer {
        &self.private_key
    }

    #[must_use]
    pub fn public_key(&self) -> &ByteBuffer {
        &self.public_key
    }

    #[must_use]
    pub fn format(&self) -> KeyFormat {
        self.format
    }

    /// Split into `(private_key, public_key)`.
    #[must_use]
    pub fn into_parts(self) -> (ByteBuffer, ByteBuffer) {
        (self.private_key, self.public_key)
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RsaKeyPair(format={}, private_len={}, public_len={})",
            self.format,
            self.private_key.len(),
            self.public_key.len()
        )
    }
}
