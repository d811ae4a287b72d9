//! External representation tags.
//!
//! `DataFormat` names the forms a `ByteBuffer` can be decoded from or encoded
//! to, `Base64Options` selects the base64 alphabet and line handling, and
//! `KeyFormat` selects the serialization of RSA key blobs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::infra::error::{SecureBytesError, SecureBytesResult};

/// External representation of byte data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// Bytes used verbatim.
    Raw,
    /// Hexadecimal text, two characters per byte.
    Hex,
    /// Non-negative base-256 big-endian integer, written in decimal.
    Integer,
    /// RFC 2045 base64 (`+/` alphabet).
    Base64,
    /// RFC 4648 url-safe base64 (`-_` alphabet).
    Base64UrlSafe,
}

impl DataFormat {
    pub const ALL: [DataFormat; 5] = [
        DataFormat::Raw,
        DataFormat::Hex,
        DataFormat::Integer,
        DataFormat::Base64,
        DataFormat::Base64UrlSafe,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Raw => "raw",
            DataFormat::Hex => "hex",
            DataFormat::Integer => "int",
            DataFormat::Base64 => "base64",
            DataFormat::Base64UrlSafe => "base64url",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = SecureBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "data" => Ok(DataFormat::Raw),
            "hex" => Ok(DataFormat::Hex),
            "int" | "integer" => Ok(DataFormat::Integer),
            "base64" => Ok(DataFormat::Base64),
            "base64url" | "base64-url" | "urlsafe_base64" => Ok(DataFormat::Base64UrlSafe),
            _ => Err(SecureBytesError::InvalidArgument(format!(
                "unrecognized data format: {s:?}"
            ))),
        }
    }
}

/// Options for base64 encoding and decoding.
///
/// Decoding only looks at `url_safe`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Base64Options {
    /// Use the url-safe alphabet (`-_`) instead of the standard one (`+/`).
    #[serde(default)]
    pub url_safe: bool,
    /// Remove every `\n` and `\r` from encoded output.
    #[serde(default)]
    pub strip_line_breaks: bool,
}

impl Base64Options {
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url_safe() -> Self {
        Self {
            url_safe: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn no_break(mut self) -> Self {
        self.strip_line_breaks = true;
        self
    }
}

impl FromStr for Base64Options {
    type Err = SecureBytesError;

    /// Parse a comma separated option list such as `"url_safe,strip_line_breaks"`
    /// or `"url_safe=false"`. Unknown keys and non-boolean values are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Base64Options::default();

        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (item, "true"),
            };

            let flag = value.parse::<bool>().map_err(|_| {
                SecureBytesError::InvalidArgument(format!(
                    "base64 option {key} expects true or false, got {value:?}"
                ))
            })?;

            match key {
                "url_safe" => options.url_safe = flag,
                "strip_line_breaks" | "no_break" => options.strip_line_breaks = flag,
                _ => {
                    return Err(SecureBytesError::InvalidArgument(format!(
                        "unrecognized base64 option: {key:?}"
                    )))
                }
            }
        }

        Ok(options)
    }
}

/// Serialization used for RSA key blobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    #[default]
    Pem,
    Der,
}

impl KeyFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormat::Pem => "pem",
            KeyFormat::Der => "der",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = SecureBytesError;

    fn from_str(s: &str) -> SecureBytesResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pem" => Ok(KeyFormat::Pem),
            "der" => Ok(KeyFormat::Der),
            _ => Err(SecureBytesError::InvalidArgument(format!(
                "unrecognized key format: {s:?} (expected pem or der)"
            ))),
        }
    }
}
