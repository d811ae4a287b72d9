use std::fmt;

use super::DigestAlgorithm;
use crate::domain::bytes::ByteBuffer;

/// Digest output paired with the algorithm that produced it.
///
/// Invariant: `bytes.len() == algo.digest_size()`.
#[derive(Clone, Eq, PartialEq)]
pub struct DigestBytes {
    algo: DigestAlgorithm,
    bytes: ByteBuffer,
}

impl DigestBytes {
    pub fn new(algo: DigestAlgorithm, bytes: Vec<u8>) -> Result<Self, DigestBytesError> {
        if bytes.len() != algo.digest_size() {
            return Err(DigestBytesError::LengthMismatch {
                algorithm: algo,
                expected: algo.digest_size(),
                actual: bytes.len(),
            });
        }
        Ok(Self {
            algo,
            bytes: ByteBuffer::from(bytes),
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algo
    }
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }
    #[must_use]
    pub fn into_buffer(self) -> ByteBuffer {
        self.bytes
    }
}

impl fmt::Debug for DigestBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigestBytes(algo={}, {:?})", self.algo, self.bytes)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DigestBytesError {
    #[error("{algorithm} digest length mismatch (expected {expected}, actual {actual})")]
    LengthMismatch {
        algorithm: DigestAlgorithm,
        expected: usize,
        actual: usize,
    },
}

impl From<DigestBytesError> for crate::infra::error::SecureBytesError {
    fn from(error: DigestBytesError) -> Self {
        crate::infra::error::SecureBytesError::CryptographicError(error.to_string())
    }
}
