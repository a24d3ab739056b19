//! Keyed digests and constant-time comparison shared by the token and
//! password modules.

use hmac::digest::Key;
use hmac::Hmac;
use hmac::Mac;
use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compare two byte slices without short-circuiting on the first difference.
///
/// Slices of different length compare unequal immediately; length is not
/// treated as secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = <HmacSha256 as Mac>::new(&key_block(key));
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Key padded to the SHA-256 block size. Keys longer than a block are
/// replaced by their digest first, as RFC 2104 requires.
fn key_block(key: &[u8]) -> Key<HmacSha256> {
    let mut block = Key::<HmacSha256>::default();
    if key.len() > block.len() {
        let digest = Sha256::digest(key);
        block[..digest.len()].copy_from_slice(&digest);
    } else {
        block[..key.len()].copy_from_slice(key);
    }
    block
}

/// Plain SHA-256 digest, hex encoded in lowercase.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
