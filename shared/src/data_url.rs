//! `data:<mime>;base64,<payload>` encoding of uploaded images.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use derive_more::Display;
use std::str::FromStr;
use thiserror::Error;

const FALLBACK_MIME: &str = "application/octet-stream";

// Browsers emit padded base64, but hand-written or truncated payloads show up
// without it, so decoding accepts both.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("selected file is empty")]
    Empty,
    #[error("failed to read file: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("missing `data:` scheme")]
    MissingScheme,
    #[error("missing `,` separator")]
    MissingSeparator,
    #[error("payload is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// An image encoded as an inline data URL, ready to be put in a JSON body or
/// an `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Result<Self, ReadError> {
        if bytes.is_empty() {
            return Err(ReadError::Empty);
        }
        let mime_type = match mime_type.trim() {
            "" => FALLBACK_MIME,
            mime => mime,
        };
        Ok(Self(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type declared in the header, `application/octet-stream` if none.
    pub fn mime_type(&self) -> &str {
        let header = self.header();
        match header.split(';').next() {
            Some(mime) if !mime.is_empty() => mime,
            _ => FALLBACK_MIME,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        if !self.header().split(';').any(|param| param == "base64") {
            return Err(DataUrlError::NotBase64);
        }
        LENIENT
            .decode(self.payload())
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))
    }

    fn header(&self) -> &str {
        let rest = &self.0["data:".len()..];
        rest.split_once(',').map(|(header, _)| header).unwrap_or(rest)
    }

    fn payload(&self) -> &str {
        self.0.split_once(',').map(|(_, payload)| payload).unwrap_or_default()
    }
}

impl FromStr for EncodedImage {
    type Err = DataUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with("data:") {
            return Err(DataUrlError::MissingScheme);
        }
        if !s.contains(',') {
            return Err(DataUrlError::MissingSeparator);
        }
        Ok(Self(s.to_string()))
    }
}
