//! Digest algorithm domain type and name resolution.
//!
//! Provides the closed `DigestAlgorithm` enumeration and the resolver that maps
//! loosely-typed identifiers (names in any case, handles, OpenSSL digest
//! objects or NIDs) to exactly one algorithm. Unknown identifiers fail with
//! `UnsupportedAlgorithm`; nothing falls back to a default.

use std::fmt;
use std::str::FromStr;

use openssl::hash::MessageDigest;
use openssl::nid::Nid;

use crate::infra::error::{SecureBytesError, SecureBytesResult};

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Ripemd160,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

/// Every recognised alias, upper-cased, with the algorithm it names.
///
/// Lookups normalise the input to upper case first, so each entry covers all
/// case variants.
static ALIASES: &[(&str, DigestAlgorithm)] = &[
    ("MD5", DigestAlgorithm::Md5),
    ("SHA1", DigestAlgorithm::Sha1),
    ("SHA-1", DigestAlgorithm::Sha1),
    ("SHA224", DigestAlgorithm::Sha224),
    ("SHA-224", DigestAlgorithm::Sha224),
    ("SHA2-224", DigestAlgorithm::Sha224),
    ("SHA256", DigestAlgorithm::Sha256),
    ("SHA-256", DigestAlgorithm::Sha256),
    ("SHA2-256", DigestAlgorithm::Sha256),
    ("SHA384", DigestAlgorithm::Sha384),
    ("SHA-384", DigestAlgorithm::Sha384),
    ("SHA2-384", DigestAlgorithm::Sha384),
    ("SHA512", DigestAlgorithm::Sha512),
    ("SHA-512", DigestAlgorithm::Sha512),
    ("SHA2-512", DigestAlgorithm::Sha512),
    ("RIPEMD160", DigestAlgorithm::Ripemd160),
    ("RIPEMD-160", DigestAlgorithm::Ripemd160),
    ("RMD160", DigestAlgorithm::Ripemd160),
    ("SHA3-224", DigestAlgorithm::Sha3_224),
    ("SHA3_224", DigestAlgorithm::Sha3_224),
    ("SHA3-256", DigestAlgorithm::Sha3_256),
    ("SHA3_256", DigestAlgorithm::Sha3_256),
    ("SHA3-384", DigestAlgorithm::Sha3_384),
    ("SHA3_384", DigestAlgorithm::Sha3_384),
    ("SHA3-512", DigestAlgorithm::Sha3_512),
    ("SHA3_512", DigestAlgorithm::Sha3_512),
];

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 11] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Ripemd160,
        DigestAlgorithm::Sha3_224,
        DigestAlgorithm::Sha3_256,
        DigestAlgorithm::Sha3_384,
        DigestAlgorithm::Sha3_512,
    ];

    /// Canonical display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
            DigestAlgorithm::Ripemd160 => "RIPEMD-160",
            DigestAlgorithm::Sha3_224 => "SHA3-224",
            DigestAlgorithm::Sha3_256 => "SHA3-256",
            DigestAlgorithm::Sha3_384 => "SHA3-384",
            DigestAlgorithm::Sha3_512 => "SHA3-512",
        }
    }

    #[must_use]
    pub fn digest_size(&self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 | DigestAlgorithm::Ripemd160 => 20,
            DigestAlgorithm::Sha224 | DigestAlgorithm::Sha3_224 => 28,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Sha3_256 => 32,
            DigestAlgorithm::Sha384 | DigestAlgorithm::Sha3_384 => 48,
            DigestAlgorithm::Sha512 | DigestAlgorithm::Sha3_512 => 64,
        }
    }

    #[must_use]
    pub fn nid(&self) -> Nid {
        match self {
            DigestAlgorithm::Md5 => Nid::MD5,
            DigestAlgorithm::Sha1 => Nid::SHA1,
            DigestAlgorithm::Sha224 => Nid::SHA224,
            DigestAlgorithm::Sha256 => Nid::SHA256,
            DigestAlgorithm::Sha384 => Nid::SHA384,
            DigestAlgorithm::Sha512 => Nid::SHA512,
            DigestAlgorithm::Ripemd160 => Nid::RIPEMD160,
            DigestAlgorithm::Sha3_224 => Nid::SHA3_224,
            DigestAlgorithm::Sha3_256 => Nid::SHA3_256,
            DigestAlgorithm::Sha3_384 => Nid::SHA3_384,
            DigestAlgorithm::Sha3_512 => Nid::SHA3_512,
        }
    }

    /// OpenSSL digest object for this algorithm.
    #[must_use]
    pub fn message_digest(&self) -> MessageDigest {
        match self {
            DigestAlgorithm::Md5 => MessageDigest::md5(),
            DigestAlgorithm::Sha1 => MessageDigest::sha1(),
            DigestAlgorithm::Sha224 => MessageDigest::sha224(),
            DigestAlgorithm::Sha256 => MessageDigest::sha256(),
            DigestAlgorithm::Sha384 => MessageDigest::sha384(),
            DigestAlgorithm::Sha512 => MessageDigest::sha512(),
            DigestAlgorithm::Ripemd160 => MessageDigest::ripemd160(),
            DigestAlgorithm::Sha3_224 => MessageDigest::sha3_224(),
            DigestAlgorithm::Sha3_256 => MessageDigest::sha3_256(),
            DigestAlgorithm::Sha3_384 => MessageDigest::sha3_384(),
            DigestAlgorithm::Sha3_512 => MessageDigest::sha3_512(),
        }
    }

    #[must_use]
    pub fn from_nid(nid: Nid) -> Option<Self> {
        Self::ALL.into_iter().find(|algorithm| algorithm.nid() == nid)
    }

    /// SHA-2 family member by output size in bits.
    pub fn sha2(bits: u32) -> SecureBytesResult<Self> {
        match bits {
            224 => Ok(DigestAlgorithm::Sha224),
            256 => Ok(DigestAlgorithm::Sha256),
            384 => Ok(DigestAlgorithm::Sha384),
            512 => Ok(DigestAlgorithm::Sha512),
            _ => Err(SecureBytesError::InvalidArgument(format!(
                "invalid SHA-2 length: {bits} (expected 224, 256, 384 or 512)"
            ))),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SecureBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_name(s)
    }
}

/// Any value that can identify a digest algorithm.
#[derive(Clone)]
pub enum DigestIdentifier {
    /// Canonical name or alias, in any case, optionally namespace-qualified
    /// (`"OpenSSL::Digest::SHA256"`).
    Name(String),
    /// An already resolved handle.
    Algorithm(DigestAlgorithm),
    /// An OpenSSL digest object.
    MessageDigest(MessageDigest),
    /// An OpenSSL object identifier.
    Nid(Nid),
}

impl fmt::Debug for DigestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestIdentifier::Name(name) => f.debug_tuple("Name").field(name).finish(),
            DigestIdentifier::Algorithm(algorithm) => {
                f.debug_tuple("Algorithm").field(algorithm).finish()
            }
            DigestIdentifier::MessageDigest(md) => f
                .debug_tuple("MessageDigest")
                .field(&md.type_().as_raw())
                .finish(),
            DigestIdentifier::Nid(nid) => f.debug_tuple("Nid").field(&nid.as_raw()).finish(),
        }
    }
}

impl From<&str> for DigestIdentifier {
    fn from(name: &str) -> Self {
        DigestIdentifier::Name(name.to_string())
    }
}

impl From<String> for DigestIdentifier {
    fn from(name: String) -> Self {
        DigestIdentifier::Name(name)
    }
}

impl From<&String> for DigestIdentifier {
    fn from(name: &String) -> Self {
        DigestIdentifier::Name(name.clone())
    }
}

impl From<DigestAlgorithm> for DigestIdentifier {
    fn from(algorithm: DigestAlgorithm) -> Self {
        DigestIdentifier::Algorithm(algorithm)
    }
}

impl From<MessageDigest> for DigestIdentifier {
    fn from(md: MessageDigest) -> Self {
        DigestIdentifier::MessageDigest(md)
    }
}

impl From<Nid> for DigestIdentifier {
    fn from(nid: Nid) -> Self {
        DigestIdentifier::Nid(nid)
    }
}

/// Resolve any digest identifier to exactly one algorithm.
///
/// Handles and OpenSSL objects are mapped through their own identity, never by
/// re-deriving a name from them.
pub fn resolve(identifier: impl Into<DigestIdentifier>) -> SecureBytesResult<DigestAlgorithm> {
    match identifier.into() {
        DigestIdentifier::Name(name) => resolve_name(&name),
        DigestIdentifier::Algorithm(algorithm) => Ok(algorithm),
        DigestIdentifier::MessageDigest(md) => resolve_nid(md.type_()),
        DigestIdentifier::Nid(nid) => resolve_nid(nid),
    }
}

fn resolve_nid(nid: Nid) -> SecureBytesResult<DigestAlgorithm> {
    DigestAlgorithm::from_nid(nid).ok_or_else(|| {
        let name = nid.short_name().unwrap_or("unknown");
        SecureBytesError::UnsupportedAlgorithm(name.to_string())
    })
}

fn resolve_name(name: &str) -> SecureBytesResult<DigestAlgorithm> {
    let unqualified = name.rsplit("::").next().unwrap_or(name).trim();
    let normalized = unqualified.to_ascii_uppercase();

    let found = ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|&(_, algorithm)| algorithm);

    match found {
        Some(algorithm) => {
            log::trace!("resolved digest identifier {name:?} to {algorithm}");
            Ok(algorithm)
        }
        None => Err(SecureBytesError::UnsupportedAlgorithm(name.to_string())),
    }
}

/// Every canonical algorithm name in upper and lower case, sorted.
///
/// Always holds exactly twice as many entries as there are algorithms.
#[must_use]
pub fn supported_identifiers() -> Vec<String> {
    let mut identifiers: Vec<String> = DigestAlgorithm::ALL
        .iter()
        .flat_map(|algorithm| {
            let name = algorithm.name();
            [name.to_ascii_uppercase(), name.to_ascii_lowercase()]
        })
        .collect();
    identifiers.sort();
    identifiers
}
