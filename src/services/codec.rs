//! Format codec service.
//!
//! Converts between `ByteBuffer` and its external representations: raw bytes,
//! hexadecimal text, non-negative big integers and base64 in the standard and
//! url-safe alphabets. Every decoder is also reachable through `decode`, which
//! dispatches on a `DataFormat` tag.
//!
//! Contracts worth knowing:
//! - Hex decoding is permissive: every non-hex character is dropped before
//!   nibbles are paired. An odd nibble count is an `InvalidEncoding` error.
//! - The integer zero decodes to the single byte `0x00`. The empty buffer has
//!   no integer form and encodes to `EMPTY_INTEGER_SENTINEL` (`-1`).
//! - Standard base64 output is wrapped at 76 columns with a trailing newline;
//!   url-safe output is unpadded and unwrapped.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use openssl::bn::{BigNum, BigNumRef};
use std::fmt::Write;

use crate::domain::bytes::ByteBuffer;
use crate::domain::format::{Base64Options, DataFormat};
use crate::infra::error::{SecureBytesError, SecureBytesResult};

/// Integer returned by `ByteBuffer::to_integer` for an empty buffer.
///
/// Zero cannot be used: it is the encoding of the one-byte buffer `[0x00]`.
pub const EMPTY_INTEGER_SENTINEL: i32 = -1;

/// Column at which standard base64 output is wrapped.
pub const BASE64_LINE_WIDTH: usize = 76;

const STANDARD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const URL_SAFE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode `input` according to `format`.
///
/// For `DataFormat::Integer` the input is the decimal text of a non-negative
/// integer.
///
/// # Errors
///
/// Returns `InvalidEncoding` for malformed hex, base64 or integer text and
/// `InvalidArgument` for a negative integer.
pub fn decode(format: DataFormat, input: impl AsRef<[u8]>) -> SecureBytesResult<ByteBuffer> {
    decode_with(format, input, &Base64Options::default())
}

/// Decode `input` according to `format`, with base64 options.
///
/// Under `DataFormat::Base64` the alphabet follows `options.url_safe`;
/// `DataFormat::Base64UrlSafe` always uses the url-safe alphabet.
///
/// # Errors
///
/// See `decode`.
pub fn decode_with(
    format: DataFormat,
    input: impl AsRef<[u8]>,
    options: &Base64Options,
) -> SecureBytesResult<ByteBuffer> {
    let input = input.as_ref();
    log::trace!("Decoding {} input bytes as {format}", input.len());

    match format {
        DataFormat::Raw => Ok(ByteBuffer::from_raw(input)),
        DataFormat::Hex => ByteBuffer::from_hex(input),
        DataFormat::Integer => ByteBuffer::from_decimal(text(input, format)?),
        DataFormat::Base64 => ByteBuffer::from_base64(input, options),
        DataFormat::Base64UrlSafe => ByteBuffer::from_base64(
            input,
            &Base64Options {
                url_safe: true,
                ..*options
            },
        ),
    }
}

/// Encode `buffer` into the text form of `format`.
///
/// `options` only applies to the base64 formats. Under `DataFormat::Base64`
/// the alphabet follows `options.url_safe`; `DataFormat::Base64UrlSafe`
/// always selects the url-safe alphabet. Raw encoding fails unless the bytes
/// are valid UTF-8.
///
/// # Errors
///
/// Returns `InvalidEncoding` if raw bytes are not UTF-8 text.
pub fn encode(
    format: DataFormat,
    buffer: &ByteBuffer,
    options: &Base64Options,
) -> SecureBytesResult<String> {
    match format {
        DataFormat::Raw => String::from_utf8(buffer.as_slice().to_vec()).map_err(|_| {
            SecureBytesError::InvalidEncoding("raw bytes are not valid UTF-8 text".to_string())
        }),
        DataFormat::Hex => Ok(buffer.to_hex()),
        DataFormat::Integer => buffer.to_decimal(),
        DataFormat::Base64 => Ok(buffer.to_base64(options)),
        DataFormat::Base64UrlSafe => Ok(buffer.to_base64(&Base64Options {
            url_safe: true,
            ..*options
        })),
    }
}

fn text(input: &[u8], format: DataFormat) -> SecureBytesResult<&str> {
    std::str::from_utf8(input)
        .map_err(|_| SecureBytesError::InvalidEncoding(format!("{format} input is not text")))
}

impl ByteBuffer {
    /// Decode hexadecimal text, ignoring every non-hex character.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEncoding` if an odd number of hex digits remains.
    pub fn from_hex(input: impl AsRef<[u8]>) -> SecureBytesResult<Self> {
        let digits: Vec<u8> = input
            .as_ref()
            .iter()
            .copied()
            .filter(u8::is_ascii_hexdigit)
            .collect();

        if digits.len() % 2 != 0 {
            return Err(SecureBytesError::InvalidEncoding(format!(
                "hex input has an odd number of digits ({})",
                digits.len()
            )));
        }

        Ok(Self::from(hex::decode(digits)?))
    }

    /// Decode a non-negative integer into its minimal big-endian bytes.
    ///
    /// Zero yields `[0x00]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is negative.
    pub fn from_integer(value: &BigNumRef) -> SecureBytesResult<Self> {
        if value.is_negative() {
            return Err(SecureBytesError::InvalidArgument(
                "integer input must not be negative".to_string(),
            ));
        }

        let bytes = value.to_vec();
        if bytes.is_empty() {
            return Ok(Self::from(vec![0u8]));
        }
        Ok(Self::from(bytes))
    }

    /// Decode the decimal text of a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEncoding` if `digits` is not a decimal integer and
    /// `InvalidArgument` if it is negative.
    pub fn from_decimal(digits: &str) -> SecureBytesResult<Self> {
        let digits = digits.trim();
        let valid = !digits.is_empty()
            && digits
                .strip_prefix('-')
                .unwrap_or(digits)
                .bytes()
                .all(|b| b.is_ascii_digit());
        if !valid {
            return Err(SecureBytesError::InvalidEncoding(
                "integer input is not a decimal number".to_string(),
            ));
        }

        let value = BigNum::from_dec_str(digits)
            .map_err(|e| SecureBytesError::InvalidEncoding(format!("integer input: {e}")))?;
        Self::from_integer(&value)
    }

    /// Decode base64 text in the alphabet selected by `options.url_safe`.
    ///
    /// Whitespace and line breaks are ignored; trailing `=` padding is optional.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEncoding` on any character outside the alphabet.
    pub fn from_base64(input: impl AsRef<[u8]>, options: &Base64Options) -> SecureBytesResult<Self> {
        let compact: Vec<u8> = input
            .as_ref()
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        let engine = if options.url_safe {
            &URL_SAFE_ENGINE
        } else {
            &STANDARD_ENGINE
        };
        Ok(Self::from(engine.decode(compact)?))
    }

    /// Lowercase hexadecimal, two characters per byte. Empty for an empty buffer.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_slice())
    }

    /// Every byte as a `\xNN` escape, for embedding in source or logs.
    #[must_use]
    pub fn to_escaped_hex(&self) -> String {
        let mut escaped = String::with_capacity(self.len() * 4);
        for byte in self.as_slice() {
            // writing into a String cannot fail
            let _ = write!(escaped, "\\x{byte:02x}");
        }
        escaped
    }

    /// The bytes read as a big-endian unsigned integer.
    ///
    /// An empty buffer returns `EMPTY_INTEGER_SENTINEL`.
    ///
    /// # Errors
    ///
    /// Returns error if OpenSSL cannot allocate the big number.
    pub fn to_integer(&self) -> SecureBytesResult<BigNum> {
        if self.is_empty() {
            return Ok(BigNum::from_dec_str(&EMPTY_INTEGER_SENTINEL.to_string())?);
        }
        Ok(BigNum::from_slice(self.as_slice())?)
    }

    /// Decimal text of `to_integer`.
    ///
    /// # Errors
    ///
    /// Returns error if OpenSSL cannot format the number.
    pub fn to_decimal(&self) -> SecureBytesResult<String> {
        Ok(self.to_integer()?.to_dec_str()?.to_string())
    }

    /// Base64 text in the alphabet and layout selected by `options`.
    #[must_use]
    pub fn to_base64(&self, options: &Base64Options) -> String {
        if options.url_safe {
            return URL_SAFE_ENGINE.encode(self.as_slice());
        }

        let encoded = STANDARD_ENGINE.encode(self.as_slice());
        if options.strip_line_breaks {
            return encoded;
        }

        let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_WIDTH + 1);
        let mut rest = encoded.as_str();
        while !rest.is_empty() {
            let (line, tail) = rest.split_at(rest.len().min(BASE64_LINE_WIDTH));
            wrapped.push_str(line);
            wrapped.push('\n');
            rest = tail;
        }
        wrapped
    }
}
