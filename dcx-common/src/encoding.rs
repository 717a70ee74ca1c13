use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CommonError;
use crate::{FromHex, Result};

/// How a signing payload crossing the connector boundary is encoded.
///
/// `Hex` and `Base64` carry binary data; `Text` is signed as the UTF-8 byte
/// sequence of the string itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    Hex,
    Base64,
    Text,
}

impl FromStr for PayloadEncoding {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> std::result::Result<PayloadEncoding, Self::Err> {
        match input {
            "hex" => Ok(PayloadEncoding::Hex),
            "base64" => Ok(PayloadEncoding::Base64),
            "text" => Ok(PayloadEncoding::Text),
            _ => Err(CommonError::UnknownPayloadEncoding.into()),
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoding_str = match self {
            PayloadEncoding::Hex => "hex",
            PayloadEncoding::Base64 => "base64",
            PayloadEncoding::Text => "text",
        };
        write!(f, "{}", encoding_str)
    }
}

/// Decode a payload string into the byte sequence to be signed.
///
/// `Text` payloads are already UTF-8 in Rust strings, so normalization is a
/// plain byte copy here; hosts with UTF-16 strings must convert first.
pub fn decode_payload(data: &str, encoding: PayloadEncoding) -> Result<Vec<u8>> {
    match encoding {
        PayloadEncoding::Hex => Vec::from_hex(data),
        PayloadEncoding::Base64 => {
            base64::decode(data).map_err(|_| CommonError::InvalidBase64.into())
        }
        PayloadEncoding::Text => Ok(data.as_bytes().to_vec()),
    }
}
