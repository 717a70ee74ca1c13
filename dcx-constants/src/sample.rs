//! Fixed fixtures shared by unit and conformance tests.

/// 32-byte wallet seed, hex encoded.
pub const TEST_SEED: &'static str =
    "4d7a3b2f91c84e6a5d0f8b7c6e5d4c3b2a190807f6e5d4c3b2a1908076e5d4c3";

/// Raw token type of the native unshielded token, hex encoded.
pub const NIGHT_TOKEN_TYPE: &'static str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// An arbitrary shielded token type used by fixtures.
pub const SAMPLE_SHIELDED_TOKEN_TYPE: &'static str =
    "8a2f71bc04d9e3650c1188f2a7b64d03e59c2bb1740a886e9f35dd10c4a7e602";

/// A second token type, for multi-token scenarios.
pub const SAMPLE_UNSHIELDED_TOKEN_TYPE: &'static str =
    "17c05fae92b8d4163a7d00e6b95c2d81f44a3c9270e16b5d88f0a2c3d1e4b590";

pub const TEST_RDNS: &'static str = "com.example.wallet";
pub const TEST_WALLET_NAME: &'static str = "Example Wallet";
pub const TEST_WALLET_ICON: &'static str =
    "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciLz4=";
