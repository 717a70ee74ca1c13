//! Bech32m encoding of the wallet's identity material.
//!
//! Addresses are 32-byte role-tagged key digests; public keys are carried
//! verbatim. The human-readable part comes from the per-network table, so
//! an address never validates against the wrong network or token kind.

use bech32::{self, FromBase32, ToBase32, Variant};
use secp256k1::PublicKey;

use dcx_api::{
    ConnectorError, ConnectorResult, DustAddress, ShieldedAddresses, TokenKind, UnshieldedAddress,
};
use dcx_constants::NetworkInfo;

use crate::keys::{sha256_tagged, WalletKeys};

const ADDRESS_PAYLOAD_LEN: usize = 32;

pub fn encode_address(hrp: &str, payload: &[u8]) -> ConnectorResult<String> {
    bech32::encode(hrp, payload.to_base32(), Variant::Bech32m)
        .map_err(|_| ConnectorError::WalletFault)
}

fn encode_public_key(hrp: &str, public_key: &PublicKey) -> ConnectorResult<String> {
    encode_address(hrp, &public_key.serialize())
}

pub fn shielded_addresses(
    keys: &WalletKeys,
    network: &NetworkInfo,
) -> ConnectorResult<ShieldedAddresses> {
    let coin_public_key = keys.shielded_coin_public_key();
    let enc_public_key = keys.shielded_enc_public_key();

    let mut key_material = Vec::with_capacity(66);
    key_material.extend_from_slice(&coin_public_key.serialize());
    key_material.extend_from_slice(&enc_public_key.serialize());
    let payload = sha256_tagged("address/shielded", &key_material);

    Ok(ShieldedAddresses {
        shielded_address: encode_address(&network.shielded_address_hrp, &payload)?,
        shielded_coin_public_key: encode_public_key(
            &network.shielded_coin_key_hrp,
            &coin_public_key,
        )?,
        shielded_encryption_public_key: encode_public_key(
            &network.shielded_enc_key_hrp,
            &enc_public_key,
        )?,
    })
}

pub fn unshielded_address(
    keys: &WalletKeys,
    network: &NetworkInfo,
) -> ConnectorResult<UnshieldedAddress> {
    let payload = sha256_tagged(
        "address/unshielded",
        &keys.unshielded_public_key().serialize(),
    );
    Ok(UnshieldedAddress {
        unshielded_address: encode_address(&network.unshielded_address_hrp, &payload)?,
    })
}

pub fn dust_address(keys: &WalletKeys, network: &NetworkInfo) -> ConnectorResult<DustAddress> {
    let payload = sha256_tagged("address/dust", &keys.dust_public_key().serialize());
    Ok(DustAddress {
        dust_address: encode_address(&network.dust_address_hrp, &payload)?,
    })
}

/// Check that a recipient is a well-formed Bech32m address whose prefix
/// matches the token kind and the session's network.
pub fn validate_recipient(
    recipient: &str,
    kind: TokenKind,
    network: &NetworkInfo,
) -> ConnectorResult<()> {
    let (hrp, data, variant) = match bech32::decode(recipient) {
        Ok(decoded) => decoded,
        Err(_) => return Err(ConnectorError::InvalidAddress),
    };
    if variant != Variant::Bech32m {
        return Err(ConnectorError::InvalidAddress);
    }
    let expected_hrp = match kind {
        TokenKind::Shielded => &network.shielded_address_hrp,
        TokenKind::Unshielded => &network.unshielded_address_hrp,
    };
    if hrp != *expected_hrp {
        return Err(ConnectorError::InvalidAddress);
    }
    let payload = Vec::<u8>::from_base32(&data).map_err(|_| ConnectorError::InvalidAddress)?;
    if payload.len() != ADDRESS_PAYLOAD_LEN {
        return Err(ConnectorError::InvalidAddress);
    }
    Ok(())
}
