/// EAP packet codes as defined in RFC 3748 Section 4
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Code {
    /// Request packet (Code 1)
    Request = 1,
    /// Response packet (Code 2)
    Response = 2,
    /// Success packet (Code 3)
    Success = 3,
    /// Failure packet (Code 4)
    Failure = 4,
}

impl Code {
    /// Convert from u8 to Code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Code::Request),
            2 => Some(Code::Response),
            3 => Some(Code::Success),
            4 => Some(Code::Failure),
            _ => None,
        }
    }

    /// Convert to u8
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// EAP method types carried in the first payload byte of a Request/Response.
///
/// Only the two AKA methods have structure this crate understands; every
/// other value is preserved verbatim so a decode/encode cycle does not lose
/// the byte.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EapType {
    /// EAP-AKA (Type 23) - RFC 4187
    Aka,
    /// EAP-AKA' (Type 50) - RFC 5448
    AkaPrime,
    /// Any other method type, kept as the raw wire byte
    Unknown(u8),
}

impl EapType {
    /// Convert from u8 to EapType
    pub fn from_u8(value: u8) -> Self {
        match value {
            23 => EapType::Aka,
            50 => EapType::AkaPrime,
            other => EapType::Unknown(other),
        }
    }

    /// Convert to u8
    pub fn as_u8(self) -> u8 {
        match self {
            EapType::Aka => 23,
            EapType::AkaPrime => 50,
            EapType::Unknown(value) => value,
        }
    }

    /// True for the two methods whose payload this crate can parse
    pub fn is_aka_method(self) -> bool {
        matches!(self, EapType::Aka | EapType::AkaPrime)
    }
}

/// EAP-AKA subtypes as defined in RFC 4187 Section 11
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtype {
    /// AKA-Challenge (1)
    Challenge,
    /// AKA-Authentication-Reject (2)
    AuthenticationReject,
    /// AKA-Synchronization-Failure (4)
    SynchronizationFailure,
    /// AKA-Identity (5)
    Identity,
    /// Notification (12)
    Notification,
    /// Re-authentication (13)
    Reauthentication,
    /// Client-Error (14)
    ClientError,
    /// Any other subtype, kept as the raw wire byte
    Unknown(u8),
}

impl Subtype {
    /// Convert from u8 to Subtype
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Subtype::Challenge,
            2 => Subtype::AuthenticationReject,
            4 => Subtype::SynchronizationFailure,
            5 => Subtype::Identity,
            12 => Subtype::Notification,
            13 => Subtype::Reauthentication,
            14 => Subtype::ClientError,
            other => Subtype::Unknown(other),
        }
    }

    /// Convert to u8
    pub fn as_u8(self) -> u8 {
        match self {
            Subtype::Challenge => 1,
            Subtype::AuthenticationReject => 2,
            Subtype::SynchronizationFailure => 4,
            Subtype::Identity => 5,
            Subtype::Notification => 12,
            Subtype::Reauthentication => 13,
            Subtype::ClientError => 14,
            Subtype::Unknown(value) => value,
        }
    }
}
