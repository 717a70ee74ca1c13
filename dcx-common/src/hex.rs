use super::Result;
use crate::errors::CommonError;

pub trait ToHex {
    fn to_hex(&self) -> String;
}

pub trait FromHex
where
    Self: Sized,
{
    fn from_hex<T: AsRef<[u8]>>(value: T) -> Result<Self>;
}

impl<T: AsRef<[u8]>> ToHex for T {
    fn to_hex(&self) -> String {
        hex::encode(self)
    }
}

impl ToHex for [u8] {
    fn to_hex(&self) -> String {
        hex::encode(self)
    }
}

impl FromHex for Vec<u8> {
    fn from_hex<T: AsRef<[u8]>>(value: T) -> Result<Self> {
        hex::decode(value).map_err(|_| CommonError::InvalidHex.into())
    }
}
