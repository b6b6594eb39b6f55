//! Key decoding helpers.
//!
//! Thin wrappers over nostr-sdk's key types that never panic and report
//! failures as [`CoreError::InvalidKey`].

use nostr_sdk::prelude::*;

use crate::error::{CoreError, CoreResult};

const NSEC_PREFIX: &str = "nsec";
const HEX_KEY_LEN: usize = 64;

/// Decode a secret key given as 64-char hex or NIP-19 `nsec`.
pub fn decode_secret_key(raw: &str) -> CoreResult<Keys> {
    let raw = raw.trim();
    if raw.len() == HEX_KEY_LEN && !raw.starts_with(NSEC_PREFIX) {
        let secret = SecretKey::from_hex(raw)
            .map_err(|e| CoreError::InvalidKey(format!("decoding key from hex: {}", e)))?;
        return Ok(Keys::new(secret));
    }

    if !raw.starts_with(NSEC_PREFIX) {
        return Err(CoreError::InvalidKey(
            "expected 64-char hex or an nsec key".to_string(),
        ));
    }

    let secret = SecretKey::from_bech32(raw)
        .map_err(|e| CoreError::InvalidKey(format!("decoding key from bech32: {}", e)))?;
    Ok(Keys::new(secret))
}

/// Hex encoding of the secret key, as persisted in the config file.
pub fn secret_key_hex(keys: &Keys) -> String {
    keys.secret_key().to_secret_hex()
}

/// Parse a public key given as hex or `npub`. Returns `None` for anything else.
pub fn parse_public_key(raw: &str) -> Option<PublicKey> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    PublicKey::parse(raw).ok()
}

/// NIP-19 `npub` for a public key.
pub fn npub(pubkey: &PublicKey) -> CoreResult<String> {
    pubkey
        .to_bech32()
        .map_err(|e| CoreError::InvalidKey(e.to_string()))
}

/// Abbreviate a hex key or id for display: `abcdef12…9a8b`.
pub fn shorten(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 16 {
        return value.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_and_nsec_agree() {
        let keys = Keys::generate();
        let hex = secret_key_hex(&keys);
        let nsec = keys.secret_key().to_bech32().unwrap();

        let from_hex = decode_secret_key(&hex).unwrap();
        let from_nsec = decode_secret_key(&nsec).unwrap();

        assert_eq!(from_hex.public_key(), keys.public_key());
        assert_eq!(from_nsec.public_key(), keys.public_key());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_secret_key("not-a-key"),
            Err(CoreError::InvalidKey(_))
        ));
        assert!(matches!(
            decode_secret_key(&"zz".repeat(32)),
            Err(CoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_decode_rejects_npub() {
        let keys = Keys::generate();
        let npub = keys.public_key().to_bech32().unwrap();
        assert!(decode_secret_key(&npub).is_err());
    }

    #[test]
    fn test_parse_public_key_accepts_hex_and_npub() {
        let pk = Keys::generate().public_key();
        assert_eq!(parse_public_key(&pk.to_hex()), Some(pk));
        assert_eq!(parse_public_key(&npub(&pk).unwrap()), Some(pk));
        assert_eq!(parse_public_key(""), None);
        assert_eq!(parse_public_key("npub1nope"), None);
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("abc"), "abc");
        let hex = "0123456789abcdef0123456789abcdef";
        assert_eq!(shorten(hex), "01234567…cdef");
    }
}
