use anyhow::format_err;
use secp256k1::ecdsa;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::Result;

pub const SEED_LEN: usize = 32;

pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash with a role tag so digests from different contexts can never
/// collide.
pub(crate) fn sha256_tagged(tag: &str, data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tag.as_bytes());
    hasher.update(data);
    hasher.finalize().into()
}

/// The wallet's key material, derived from one 32-byte seed.
///
/// Four independent secp256k1 keys, one per role: unshielded signing,
/// shielded coin, shielded encryption and Dust. Roles are separated by
/// tagging the derivation hash, so no two roles ever share a key.
pub struct WalletKeys {
    secp: Secp256k1<All>,
    unshielded: SecretKey,
    shielded_coin: SecretKey,
    shielded_enc: SecretKey,
    dust: SecretKey,
}

fn derive_key(seed: &[u8], role: &str) -> Result<SecretKey> {
    let digest = sha256_tagged(role, seed);
    SecretKey::from_slice(&digest).map_err(|_| format_err!("seed_unusable_for_role"))
}

impl WalletKeys {
    pub fn from_seed(seed: &[u8]) -> Result<WalletKeys> {
        if seed.len() != SEED_LEN {
            return Err(format_err!("invalid_seed_length"));
        }
        Ok(WalletKeys {
            secp: Secp256k1::new(),
            unshielded: derive_key(seed, "wallet-key/unshielded")?,
            shielded_coin: derive_key(seed, "wallet-key/shielded-coin")?,
            shielded_enc: derive_key(seed, "wallet-key/shielded-enc")?,
            dust: derive_key(seed, "wallet-key/dust")?,
        })
    }

    pub fn unshielded_public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.unshielded)
    }

    pub fn shielded_coin_public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.shielded_coin)
    }

    pub fn shielded_enc_public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.shielded_enc)
    }

    pub fn dust_public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.dust)
    }

    /// Sign a 32-byte digest with the unshielded key. RFC6979 nonces, so
    /// identical digest and key always produce the identical signature.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> [u8; 64] {
        let message = Message::from_slice(digest).expect("digest is 32 bytes");
        self.secp
            .sign_ecdsa(&message, &self.unshielded)
            .serialize_compact()
    }

    pub fn verify_digest(&self, digest: &[u8; 32], signature: &[u8; 64], key: &PublicKey) -> bool {
        let message = Message::from_slice(digest).expect("digest is 32 bytes");
        let signature = match ecdsa::Signature::from_compact(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        self.secp.verify_ecdsa(&message, &signature, key).is_ok()
    }
}
