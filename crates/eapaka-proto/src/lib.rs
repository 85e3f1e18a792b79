//! EAP-AKA / EAP-AKA' Protocol Implementation
//!
//! This crate implements the EAP-AKA (RFC 4187) and EAP-AKA' (RFC 5448)
//! authentication payloads used between an EAP peer and server, typically
//! carried inside RADIUS EAP-Message attributes.
//!
//! # Features
//!
//! - Packet encoding and decoding with strict TLV framing rules
//! - All EAP-AKA/AKA' attributes, with unknown types passed through
//! - AT_MAC calculation and constant-time verification
//! - RFC 4187 / RFC 5448 key derivation (K_encr, K_aut, K_re, MSK, EMSK)
//! - MPPE key encryption for RADIUS MS-MPPE-Send/Recv-Key attributes
//!
//! Transport, USIM interaction, and the surrounding EAP state machine are
//! out of scope: this crate handles a single packet's encode, decode, and
//! authentication, plus the pure key derivation feeding it.
//!
//! # Example
//!
//! ```rust
//! use eapaka_proto::{Attribute, EapType, Packet, Subtype};
//! use eapaka_proto::kdf::derive_keys_aka;
//! use eapaka_proto::mac::{calculate_and_set_mac, verify_mac};
//!
//! // Session keys from the identity and the USIM-provided CK/IK
//! let keys = derive_keys_aka("0123456789012345@example.org", &[0u8; 16], &[0u8; 16]);
//!
//! // Build an EAP-Request/AKA-Challenge
//! let mut packet = Packet::request(1, EapType::Aka, Subtype::Challenge);
//! packet.add_attribute(Attribute::Rand(vec![0u8; 16]));
//! packet.add_attribute(Attribute::Autn(vec![0u8; 16]));
//! packet.add_attribute(Attribute::mac_placeholder());
//!
//! // Protect it and put it on the wire
//! calculate_and_set_mac(&mut packet, &keys.k_aut).unwrap();
//! let bytes = packet.encode().unwrap();
//!
//! // The receiving side
//! let parsed = Packet::decode(&bytes).unwrap();
//! assert!(verify_mac(&parsed, &keys.k_aut).unwrap());
//! ```

pub mod attributes;
pub mod kdf;
pub mod mac;
pub mod mppe;
pub mod packet;

pub use attributes::{Attribute, AttributeError, AttributeType};
pub use kdf::{
    AkaKeys, AkaPrimeKeys, derive_ck_prime_ik_prime, derive_keys_aka, derive_keys_aka_prime,
};
pub use mac::{MacError, calculate_and_set_mac, verify_mac};
pub use mppe::{MppeError, encrypt_mppe_key};
pub use packet::{Code, EapType, Packet, PacketError, Subtype};
