// Copyright 2025 Infinity Stones
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Address encodings: io (bech32) addresses and the canonical delegate key.

use alloy_primitives::Address;
use bech32::{FromBase32, ToBase32, Variant};

use crate::PayoutError;

/// Human-readable prefix of IoTeX addresses.
pub const IO_ADDRESS_HRP: &str = "io";

/// Encodes 20 address bytes as an `io1...` bech32 string.
pub fn io_address(addr: &Address) -> Result<String, PayoutError> {
    bech32::encode(IO_ADDRESS_HRP, addr.as_slice().to_base32(), Variant::Bech32)
        .map_err(|e| PayoutError::BadAddress(addr.to_string(), e.to_string()))
}

/// Decodes an `io1...` bech32 string back into its 20 address bytes.
pub fn parse_io_address(s: &str) -> Result<Address, PayoutError> {
    let (hrp, data, variant) =
        bech32::decode(s).map_err(|e| PayoutError::BadAddress(s.into(), e.to_string()))?;
    if hrp != IO_ADDRESS_HRP {
        return Err(PayoutError::BadAddress(s.into(), format!("unexpected prefix {hrp:?}")));
    }
    if variant != Variant::Bech32 {
        return Err(PayoutError::BadAddress(s.into(), "unexpected checksum variant".into()));
    }
    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| PayoutError::BadAddress(s.into(), e.to_string()))?;
    if bytes.len() != Address::len_bytes() {
        return Err(PayoutError::BadAddress(
            s.into(),
            format!("payload is {} bytes, expected {}", bytes.len(), Address::len_bytes()),
        ));
    }
    Ok(Address::from_slice(&bytes))
}

/// Canonical 12-byte on-chain delegate key.
///
/// A name longer than 12 bytes keeps its last 12 bytes; a shorter name is
/// left-padded with zero bytes. This is a fixed-width encoding rule, not a
/// hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelegateKey([u8; 12]);

impl DelegateKey {
    /// Width of the canonical key in bytes.
    pub const LEN: usize = 12;

    /// Derives the canonical key from a human-readable delegate name.
    pub fn from_name(name: &str) -> Self {
        Self::from_bytes(name.as_bytes())
    }

    /// Canonicalizes raw key bytes of any length.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut key = [0u8; Self::LEN];
        if bytes.len() >= Self::LEN {
            key.copy_from_slice(&bytes[bytes.len() - Self::LEN..]);
        } else {
            key[Self::LEN - bytes.len()..].copy_from_slice(bytes);
        }
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_keep_last_twelve_bytes() {
        let key = DelegateKey::from_name("metanyxmetanyx");
        assert_eq!(key.as_bytes(), b"tanyxmetanyx");
    }

    #[test]
    fn short_names_are_left_padded() {
        let key = DelegateKey::from_name("iosg");
        let mut expected = [0u8; 12];
        expected[8..].copy_from_slice(b"iosg");
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn exact_length_names_pass_through() {
        let key = DelegateKey::from_name("pubxpayments");
        assert_eq!(key.as_bytes(), b"pubxpayments");
    }

    #[test]
    fn io_address_round_trip() {
        let addr = Address::repeat_byte(0x2a);
        let encoded = io_address(&addr).unwrap();
        assert!(encoded.starts_with("io1"));
        assert_eq!(parse_io_address(&encoded).unwrap(), addr);
    }

    #[test]
    fn rejects_foreign_prefix() {
        // Valid bech32, but not an io address.
        let err = parse_io_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq").unwrap_err();
        assert!(err.to_string().contains("unexpected prefix"));
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let addr = Address::repeat_byte(0x2a);
        let mut encoded = io_address(&addr).unwrap();
        let last = encoded.pop().unwrap();
        encoded.push(if last == 'q' { 'p' } else { 'q' });
        assert!(parse_io_address(&encoded).is_err());
    }
}
