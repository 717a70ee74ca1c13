//! Shared helpers for the DApp connector crates.
//! Payload codecs and conversion traits used on both sides of the boundary.

pub mod encoding;
mod errors;
mod hex;

pub use encoding::{decode_payload, PayloadEncoding};
pub use errors::CommonError;
pub use crate::hex::{FromHex, ToHex};

use core::result;

pub type Result<T> = result::Result<T, anyhow::Error>;
