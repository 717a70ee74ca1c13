use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CommonError {
    #[error("invalid_hex")]
    InvalidHex,
    #[error("invalid_base64")]
    InvalidBase64,
    #[error("unknown_payload_encoding")]
    UnknownPayloadEncoding,
}
