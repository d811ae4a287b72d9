//! Byte buffer domain type.
//!
//! `ByteBuffer` is the unit of currency for the whole crate: every codec
//! decodes into one and every cryptographic operation returns one. It carries
//! no character encoding, so length and equality are always byte-exact.

use std::fmt;

/// Immutable, owned sequence of bytes.
///
/// Formatting never emits the raw bytes: both `Debug` and `Display` render
/// lowercase hexadecimal so binary content cannot corrupt a terminal or log.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteBuffer {
    bytes: Box<[u8]>,
}

impl ByteBuffer {
    /// Create a buffer holding no bytes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a buffer from bytes used verbatim.
    #[must_use]
    pub fn from_raw(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().into(),
        }
    }

    /// Number of bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_raw(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for ByteBuffer {
    fn from(bytes: [u8; N]) -> Self {
        Self::from_raw(bytes)
    }
}

impl From<&str> for ByteBuffer {
    fn from(text: &str) -> Self {
        Self::from_raw(text.as_bytes())
    }
}

impl From<String> for ByteBuffer {
    fn from(text: String) -> Self {
        Self::from(text.into_bytes())
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.into_vec()
    }
}

impl fmt::LowerHex for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{self:x}>")
    }
}
