/// EAP-AKA/AKA' attribute types as defined in RFC 4187 Section 10 and RFC 5448 Section 6.2
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AttributeType {
    /// AT_RAND (1) - RFC 4187 Section 10.6
    Rand = 1,
    /// AT_AUTN (2) - RFC 4187 Section 10.7
    Autn = 2,
    /// AT_RES (3) - RFC 4187 Section 10.8
    Res = 3,
    /// AT_AUTS (4) - RFC 4187 Section 10.9
    Auts = 4,
    /// AT_PADDING (6) - RFC 4187 Section 10.12
    Padding = 6,
    /// AT_NONCE_MT (7) - RFC 4186 Section 10.1
    NonceMt = 7,
    /// AT_PERMANENT_ID_REQ (10) - RFC 4187 Section 10.2
    PermanentIdReq = 10,
    /// AT_MAC (11) - RFC 4187 Section 10.15
    Mac = 11,
    /// AT_NOTIFICATION (12) - RFC 4187 Section 10.19
    Notification = 12,
    /// AT_ANY_ID_REQ (13) - RFC 4187 Section 10.3
    AnyIdReq = 13,
    /// AT_IDENTITY (14) - RFC 4187 Section 10.5
    Identity = 14,
    /// AT_VERSION_LIST (15) - RFC 4186 Section 10.4
    VersionList = 15,
    /// AT_SELECTED_VERSION (16) - RFC 4186 Section 10.5
    SelectedVersion = 16,
    /// AT_FULLAUTH_ID_REQ (17) - RFC 4187 Section 10.4
    FullauthIdReq = 17,
    /// AT_COUNTER (19) - RFC 4187 Section 10.16
    Counter = 19,
    /// AT_COUNTER_TOO_SMALL (20) - RFC 4187 Section 10.17
    CounterTooSmall = 20,
    /// AT_NONCE_S (21) - RFC 4187 Section 10.18
    NonceS = 21,
    /// AT_CLIENT_ERROR_CODE (22) - RFC 4187 Section 10.20
    ClientErrorCode = 22,
    /// AT_KDF_INPUT (23) - RFC 5448 Section 3.1
    KdfInput = 23,
    /// AT_KDF (24) - RFC 5448 Section 3.2
    Kdf = 24,
    /// AT_IV (129) - RFC 4187 Section 10.12
    Iv = 129,
    /// AT_ENCR_DATA (130) - RFC 4187 Section 10.12
    EncrData = 130,
    /// AT_NEXT_PSEUDONYM (132) - RFC 4187 Section 10.10
    NextPseudonym = 132,
    /// AT_NEXT_REAUTH_ID (133) - RFC 4187 Section 10.11
    NextReauthId = 133,
    /// AT_CHECKCODE (134) - RFC 4187 Section 10.13
    Checkcode = 134,
    /// AT_RESULT_IND (135) - RFC 4187 Section 10.14
    ResultInd = 135,
    /// AT_BIDDING (136) - RFC 5448 Section 4
    Bidding = 136,
}

impl AttributeType {
    /// Convert from u8 to AttributeType
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(AttributeType::Rand),
            2 => Some(AttributeType::Autn),
            3 => Some(AttributeType::Res),
            4 => Some(AttributeType::Auts),
            6 => Some(AttributeType::Padding),
            7 => Some(AttributeType::NonceMt),
            10 => Some(AttributeType::PermanentIdReq),
            11 => Some(AttributeType::Mac),
            12 => Some(AttributeType::Notification),
            13 => Some(AttributeType::AnyIdReq),
            14 => Some(AttributeType::Identity),
            15 => Some(AttributeType::VersionList),
            16 => Some(AttributeType::SelectedVersion),
            17 => Some(AttributeType::FullauthIdReq),
            19 => Some(AttributeType::Counter),
            20 => Some(AttributeType::CounterTooSmall),
            21 => Some(AttributeType::NonceS),
            22 => Some(AttributeType::ClientErrorCode),
            23 => Some(AttributeType::KdfInput),
            24 => Some(AttributeType::Kdf),
            129 => Some(AttributeType::Iv),
            130 => Some(AttributeType::EncrData),
            132 => Some(AttributeType::NextPseudonym),
            133 => Some(AttributeType::NextReauthId),
            134 => Some(AttributeType::Checkcode),
            135 => Some(AttributeType::ResultInd),
            136 => Some(AttributeType::Bidding),
            _ => None,
        }
    }

    /// Convert to u8
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_round_trip() {
        let known = [
            1u8, 2, 3, 4, 6, 7, 10, 11, 12, 13, 14, 15, 16, 17, 19, 20, 21, 22, 23, 24, 129, 130,
            132, 133, 134, 135, 136,
        ];
        for value in known {
            let attr_type = AttributeType::from_u8(value).expect("known type");
            assert_eq!(attr_type.as_u8(), value);
        }
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(AttributeType::from_u8(5), None);
        assert_eq!(AttributeType::from_u8(200), None);
    }
}
