//! AT_MAC calculation and verification (RFC 4187 Section 10.15,
//! RFC 5448 Section 3)
//!
//! The MAC covers the entire serialized EAP packet with the AT_MAC value
//! field zeroed: EAP-AKA uses HMAC-SHA-1, EAP-AKA' uses HMAC-SHA-256, and
//! both truncate the digest to its first 16 bytes. Rather than zeroing and
//! restoring the live attribute, both operations here serialize an internal
//! clone, so a failed call never leaves the caller's packet half-mutated
//! and [`verify_mac`] never mutates it at all.

use crate::attributes::Attribute;
use crate::packet::{EapType, Packet, PacketError};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Length of the truncated MAC carried in AT_MAC
pub const MAC_LEN: usize = Attribute::MAC_LEN;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MacError {
    #[error("AT_MAC attribute not found")]
    MacAttributeMissing,

    #[error("MAC calculation unsupported for EAP method type {0}")]
    UnsupportedMethod(u8),

    #[error(transparent)]
    Packet(#[from] PacketError),
}

/// Compute the MAC for the packet with `k_aut` and write it into the
/// packet's AT_MAC attribute.
///
/// The packet must already carry an AT_MAC attribute (typically the zero
/// placeholder from [`Attribute::mac_placeholder`]); its value is the only
/// field this function touches.
pub fn calculate_and_set_mac(packet: &mut Packet, k_aut: &[u8]) -> Result<(), MacError> {
    let mac = compute_mac(packet, k_aut)?;

    for attribute in packet.attributes.iter_mut() {
        if let Attribute::Mac(value) = attribute {
            *value = mac.to_vec();
            return Ok(());
        }
    }
    // compute_mac already proved AT_MAC is present
    Err(MacError::MacAttributeMissing)
}

/// Verify the packet's AT_MAC against `k_aut`.
///
/// Returns whether the received MAC matches the expected one, compared in
/// constant time. The packet is left untouched regardless of the outcome;
/// a missing AT_MAC or an unsupported method type is an error, never a
/// `false` verdict.
pub fn verify_mac(packet: &Packet, k_aut: &[u8]) -> Result<bool, MacError> {
    let received = find_mac(packet)
        .ok_or(MacError::MacAttributeMissing)?
        .to_vec();
    let expected = compute_mac(packet, k_aut)?;

    let matched = bool::from(received.as_slice().ct_eq(expected.as_slice()));
    if !matched {
        debug!("AT_MAC verification mismatch");
    }
    Ok(matched)
}

fn find_mac(packet: &Packet) -> Option<&[u8]> {
    packet.attributes.iter().find_map(|attribute| match attribute {
        Attribute::Mac(value) => Some(value.as_slice()),
        _ => None,
    })
}

/// Serialize a clone of the packet with a zeroed AT_MAC and HMAC it.
fn compute_mac(packet: &Packet, k_aut: &[u8]) -> Result<[u8; MAC_LEN], MacError> {
    let mut cloned = packet.clone();

    let mut found = false;
    for attribute in cloned.attributes.iter_mut() {
        if let Attribute::Mac(value) = attribute {
            *value = vec![0u8; MAC_LEN];
            found = true;
            break;
        }
    }
    if !found {
        return Err(MacError::MacAttributeMissing);
    }

    let data = cloned.encode()?;

    let digest = match cloned.eap_type {
        Some(EapType::Aka) => {
            let mut mac = HmacSha1::new_from_slice(k_aut).expect("HMAC can take key of any size");
            mac.update(&data);
            mac.finalize().into_bytes().to_vec()
        }
        Some(EapType::AkaPrime) => {
            let mut mac =
                HmacSha256::new_from_slice(k_aut).expect("HMAC can take key of any size");
            mac.update(&data);
            mac.finalize().into_bytes().to_vec()
        }
        other => {
            return Err(MacError::UnsupportedMethod(
                other.map_or(0, EapType::as_u8),
            ));
        }
    };

    // Both methods use the first 16 bytes of the HMAC output
    let mut out = [0u8; MAC_LEN];
    out.copy_from_slice(&digest[..MAC_LEN]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{Code, Subtype};
    use hex_literal::hex;

    fn challenge_packet(eap_type: EapType) -> Packet {
        let mut packet = Packet::request(7, eap_type, Subtype::Challenge);
        packet.add_attribute(Attribute::Rand((0u8..16).collect()));
        packet.add_attribute(Attribute::Autn((16u8..32).collect()));
        packet.add_attribute(Attribute::mac_placeholder());
        packet
    }

    #[test]
    fn test_calculate_mac_aka_vector() {
        let mut packet = challenge_packet(EapType::Aka);
        let k_aut = hex!("000102030405060708090a0b0c0d0e0f");

        calculate_and_set_mac(&mut packet, &k_aut).unwrap();

        assert_eq!(
            packet.find_attribute(crate::AttributeType::Mac),
            Some(&Attribute::Mac(
                hex!("8d4d67c093eef13a38d2caf546f71ae6").to_vec()
            ))
        );
    }

    #[test]
    fn test_calculate_mac_aka_prime_vector() {
        let mut packet = challenge_packet(EapType::AkaPrime);
        let k_aut: Vec<u8> = (0u8..32).collect();

        calculate_and_set_mac(&mut packet, &k_aut).unwrap();

        assert_eq!(
            packet.find_attribute(crate::AttributeType::Mac),
            Some(&Attribute::Mac(
                hex!("5d48c42a26e70d0c390c7fb898415d8c").to_vec()
            ))
        );
    }

    #[test]
    fn test_calculate_then_verify() {
        for eap_type in [EapType::Aka, EapType::AkaPrime] {
            let mut packet = challenge_packet(eap_type);
            let k_aut = [0x42u8; 32];

            calculate_and_set_mac(&mut packet, &k_aut).unwrap();
            assert!(verify_mac(&packet, &k_aut).unwrap());
        }
    }

    #[test]
    fn test_verify_survives_round_trip() {
        let mut packet = challenge_packet(EapType::Aka);
        let k_aut = [0x42u8; 16];
        calculate_and_set_mac(&mut packet, &k_aut).unwrap();

        let reparsed = Packet::decode(&packet.encode().unwrap()).unwrap();
        assert!(verify_mac(&reparsed, &k_aut).unwrap());
    }

    #[test]
    fn test_verify_does_not_mutate_packet() {
        let mut packet = challenge_packet(EapType::Aka);
        packet.attributes.pop();
        packet.add_attribute(Attribute::Mac(vec![0xFFu8; 16]));

        let before = packet.clone();
        assert!(!verify_mac(&packet, &[0x42u8; 16]).unwrap());
        assert_eq!(packet, before);
    }

    #[test]
    fn test_verify_rejects_tampered_packet() {
        let mut packet = challenge_packet(EapType::Aka);
        let k_aut = [0x42u8; 16];
        calculate_and_set_mac(&mut packet, &k_aut).unwrap();

        if let Some(Attribute::Rand(rand)) = packet.attributes.first_mut() {
            rand[0] ^= 0x01;
        }
        assert!(!verify_mac(&packet, &k_aut).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let mut packet = challenge_packet(EapType::Aka);
        calculate_and_set_mac(&mut packet, &[0x42u8; 16]).unwrap();
        assert!(!verify_mac(&packet, &[0x43u8; 16]).unwrap());
    }

    #[test]
    fn test_missing_mac_attribute() {
        let mut packet = Packet::request(1, EapType::Aka, Subtype::Challenge);
        packet.add_attribute(Attribute::Rand(vec![0u8; 16]));

        assert_eq!(
            calculate_and_set_mac(&mut packet, &[0u8; 16]),
            Err(MacError::MacAttributeMissing)
        );
        assert_eq!(
            verify_mac(&packet, &[0u8; 16]),
            Err(MacError::MacAttributeMissing)
        );
    }

    #[test]
    fn test_unsupported_method() {
        let mut packet = Packet::new(Code::Request, 1);
        packet.add_attribute(Attribute::mac_placeholder());

        assert_eq!(
            verify_mac(&packet, &[0u8; 16]),
            Err(MacError::UnsupportedMethod(0))
        );

        packet.eap_type = Some(EapType::Unknown(13));
        assert_eq!(
            verify_mac(&packet, &[0u8; 16]),
            Err(MacError::UnsupportedMethod(13))
        );
    }
}
