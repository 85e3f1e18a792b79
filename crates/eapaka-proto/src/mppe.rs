//! MPPE key encryption for RADIUS MS-MPPE-Send-Key / MS-MPPE-Recv-Key
//! (RFC 2548 Sections 2.4.2 and 2.4.3)
//!
//! After a successful EAP-AKA/AKA' exchange the server exports the MSK
//! halves to the NAS inside vendor attributes; this module produces the
//! salted, chained-MD5-encrypted String field of those attributes.

use rand::TryRngCore;
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MppeError {
    #[error("invalid key length {0} for MPPE encryption (must be 1-255 bytes)")]
    InvalidKeyLength(usize),

    #[error("request authenticator must be 16 bytes, got {0}")]
    InvalidAuthenticatorLength(usize),

    #[error("failed to gather salt entropy: {0}")]
    Entropy(#[from] rand::rand_core::OsError),
}

/// Encrypt a session key (e.g. an MSK half) for an MS-MPPE key attribute.
///
/// `secret` is the RADIUS shared secret and `request_authenticator` the
/// 16-byte Request Authenticator of the Access-Request being answered.
/// Output is `Salt(2) | encrypted(KeyLength(1) | Key | zero padding)`,
/// sized to a multiple of 16; the salt comes from the OS entropy source
/// with its most significant bit forced on, and an entropy failure is
/// returned as [`MppeError::Entropy`] rather than degraded.
pub fn encrypt_mppe_key(
    key: &[u8],
    secret: &[u8],
    request_authenticator: &[u8],
) -> Result<Vec<u8>, MppeError> {
    if key.is_empty() || key.len() > 255 {
        return Err(MppeError::InvalidKeyLength(key.len()));
    }
    if request_authenticator.len() != 16 {
        return Err(MppeError::InvalidAuthenticatorLength(
            request_authenticator.len(),
        ));
    }

    let mut salt = [0u8; 2];
    OsRng.try_fill_bytes(&mut salt)?;
    // RFC 2548: the most significant bit of the salt MUST be set
    salt[0] |= 0x80;

    Ok(encrypt_with_salt(key, secret, request_authenticator, salt))
}

fn encrypt_with_salt(
    key: &[u8],
    secret: &[u8],
    request_authenticator: &[u8],
    salt: [u8; 2],
) -> Vec<u8> {
    // Plaintext is KeyLength | Key, zero-padded until the String field
    // (salt included) lands on a 16-byte boundary
    let plain_len = 1 + key.len();
    let padded_len = plain_len + (16 - (2 + plain_len) % 16) % 16;
    let mut plaintext = Vec::with_capacity(padded_len);
    plaintext.push(key.len() as u8);
    plaintext.extend_from_slice(key);
    plaintext.resize(padded_len, 0);

    let mut result = Vec::with_capacity(2 + plaintext.len());
    result.extend_from_slice(&salt);

    // b(1) = MD5(secret | request authenticator | salt)
    let mut hash_input = Vec::with_capacity(secret.len() + 16 + 2);
    hash_input.extend_from_slice(secret);
    hash_input.extend_from_slice(request_authenticator);
    hash_input.extend_from_slice(&salt);
    let mut b = md5::compute(&hash_input).0;

    // c(i) = p(i) XOR b(i); b(i+1) = MD5(secret | c(i)).
    // The final block may be shorter than 16 bytes and is XORed only over
    // the bytes present.
    for block in plaintext.chunks(16) {
        let start = result.len();
        for (i, byte) in block.iter().enumerate() {
            result.push(*byte ^ b[i]);
        }

        let mut next = Vec::with_capacity(secret.len() + block.len());
        next.extend_from_slice(secret);
        next.extend_from_slice(&result[start..]);
        b = md5::compute(&next).0;
    }

    result
}
