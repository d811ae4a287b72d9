//! Digest operations.

use crate::adapters::backend::CryptoBackend;
use crate::domain::bytes::ByteBuffer;
use crate::domain::crypto::{resolve, DigestAlgorithm, DigestBytes, DigestIdentifier};
use crate::infra::error::SecureBytesResult;
use crate::services::operations::CryptoOperations;

impl<B: CryptoBackend> CryptoOperations<B> {
    /// Digest of `data` under the algorithm `identifier` resolves to.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAlgorithm` if the identifier does not resolve, or a
    /// cryptographic error if the backend fails.
    pub fn digest(
        &self,
        data: &ByteBuffer,
        identifier: impl Into<DigestIdentifier>,
    ) -> SecureBytesResult<ByteBuffer> {
        Ok(self.digest_bytes(data, identifier)?.into_buffer())
    }

    /// Like `digest`, keeping the algorithm alongside the output.
    ///
    /// # Errors
    ///
    /// See `digest`.
    pub fn digest_bytes(
        &self,
        data: &ByteBuffer,
        identifier: impl Into<DigestIdentifier>,
    ) -> SecureBytesResult<DigestBytes> {
        let algorithm = resolve(identifier)?;
        let output = self.backend.digest_compute(algorithm, data.as_slice())?;
        Ok(DigestBytes::new(algorithm, output)?)
    }

    /// MD5 digest.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails.
    pub fn md5(&self, data: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        self.digest(data, DigestAlgorithm::Md5)
    }

    /// SHA-1 digest.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails.
    pub fn sha1(&self, data: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        self.digest(data, DigestAlgorithm::Sha1)
    }

    /// SHA-2 digest of the given output size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `bits` is 224, 256, 384 or 512.
    pub fn sha2(&self, data: &ByteBuffer, bits: u32) -> SecureBytesResult<ByteBuffer> {
        self.digest(data, DigestAlgorithm::sha2(bits)?)
    }

    /// SHA-256 digest.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails.
    pub fn sha256(&self, data: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        self.sha2(data, 256)
    }

    /// SHA-512 digest.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails.
    pub fn sha512(&self, data: &ByteBuffer) -> SecureBytesResult<ByteBuffer> {
        self.sha2(data, 512)
    }
}
