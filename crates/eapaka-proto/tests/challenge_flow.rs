//! End-to-end EAP-AKA' challenge round: key derivation, packet
//! construction, MAC protection, wire round-trip, and MSK export.

use eapaka_proto::kdf::{derive_ck_prime_ik_prime, derive_keys_aka, derive_keys_aka_prime};
use eapaka_proto::mac::{calculate_and_set_mac, verify_mac};
use eapaka_proto::mppe::encrypt_mppe_key;
use eapaka_proto::{Attribute, AttributeType, Code, EapType, Packet, Subtype};
use hex_literal::hex;

const IDENTITY: &str = "0555444333222111";
const NETWORK_NAME: &str = "WLAN";

#[test]
fn aka_prime_challenge_round() {
    // USIM-provided CK/IK for this authentication vector
    let ik = hex!("9744871ad32bf9bbd1dd5ce54e3e2e5a");
    let ck = hex!("5349fbe098649f948f5d2e973a81c00f");

    let (ck_prime, ik_prime) = derive_ck_prime_ik_prime(&ck, &ik, NETWORK_NAME);
    let keys = derive_keys_aka_prime(IDENTITY, &ck_prime, &ik_prime);

    // Server builds the EAP-Request/AKA'-Challenge
    let mut request = Packet::request(1, EapType::AkaPrime, Subtype::Challenge);
    request.add_attribute(Attribute::Rand(vec![0x11u8; 16]));
    request.add_attribute(Attribute::Autn(vec![0x22u8; 16]));
    request.add_attribute(Attribute::Kdf(1));
    request.add_attribute(Attribute::KdfInput(NETWORK_NAME.to_string()));
    request.add_attribute(Attribute::mac_placeholder());
    calculate_and_set_mac(&mut request, &keys.k_aut).unwrap();

    // Over the wire and back
    let parsed = Packet::decode(&request.encode().unwrap()).unwrap();
    assert_eq!(parsed, request);
    assert_eq!(parsed.subtype, Some(Subtype::Challenge));
    assert_eq!(
        parsed.find_attribute(AttributeType::KdfInput),
        Some(&Attribute::KdfInput(NETWORK_NAME.to_string()))
    );
    assert!(verify_mac(&parsed, &keys.k_aut).unwrap());

    // Peer answers with RES under the same key
    let mut response = Packet::response(1, EapType::AkaPrime, Subtype::Challenge);
    response.add_attribute(Attribute::Res(vec![0x33u8; 8]));
    response.add_attribute(Attribute::mac_placeholder());
    calculate_and_set_mac(&mut response, &keys.k_aut).unwrap();

    let parsed_response = Packet::decode(&response.encode().unwrap()).unwrap();
    assert!(verify_mac(&parsed_response, &keys.k_aut).unwrap());

    // A different key must not verify
    assert!(!verify_mac(&parsed_response, &keys.k_re).unwrap());

    // Server closes the conversation
    let success = Packet::success(2);
    let parsed_success = Packet::decode(&success.encode().unwrap()).unwrap();
    assert_eq!(parsed_success.code, Code::Success);
    assert!(parsed_success.attributes.is_empty());

    // MSK halves exported to the NAS as MS-MPPE keys
    let request_authenticator = [0x5Au8; 16];
    let send_key =
        encrypt_mppe_key(&keys.msk[..32], b"radius-secret", &request_authenticator).unwrap();
    let recv_key =
        encrypt_mppe_key(&keys.msk[32..], b"radius-secret", &request_authenticator).unwrap();
    assert_eq!(send_key.len(), 48);
    assert_eq!(recv_key.len(), 48);
    assert_ne!(send_key[0] & 0x80, 0);
    assert_ne!(recv_key[0] & 0x80, 0);
}

#[test]
fn aka_identity_round() {
    // Server asks for the permanent identity
    let mut request = Packet::request(1, EapType::Aka, Subtype::Identity);
    request.add_attribute(Attribute::PermanentIdReq);

    let parsed = Packet::decode(&request.encode().unwrap()).unwrap();
    assert_eq!(
        parsed.find_attribute(AttributeType::PermanentIdReq),
        Some(&Attribute::PermanentIdReq)
    );

    // Peer responds with its NAI, which then seeds the EAP-AKA keys
    let identity = "0123456789012345@wlan.mnc001.mcc001.3gppnetwork.org";
    let mut response = Packet::response(1, EapType::Aka, Subtype::Identity);
    response.add_attribute(Attribute::Identity(identity.to_string()));

    let parsed = Packet::decode(&response.encode().unwrap()).unwrap();
    let Some(Attribute::Identity(parsed_identity)) = parsed.find_attribute(AttributeType::Identity)
    else {
        panic!("AT_IDENTITY missing from response");
    };

    let keys = derive_keys_aka(parsed_identity, &[0u8; 16], &[0u8; 16]);
    assert_eq!(keys.k_aut, hex!("69f0f0eec2a058e74dcd4a690475ee60"));
}

#[test]
fn synchronization_failure_round() {
    // Peer reports AUTS after an out-of-range sequence number
    let mut response = Packet::response(3, EapType::Aka, Subtype::SynchronizationFailure);
    response.add_attribute(Attribute::Auts(vec![0x44u8; 14]));

    let parsed = Packet::decode(&response.encode().unwrap()).unwrap();
    assert_eq!(parsed.subtype, Some(Subtype::SynchronizationFailure));
    assert_eq!(
        parsed.find_attribute(AttributeType::Auts),
        Some(&Attribute::Auts(vec![0x44u8; 14]))
    );
}
