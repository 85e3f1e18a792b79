use super::types::AttributeType;
use thiserror::Error;

/// Errors raised by per-attribute encoding and decoding.
///
/// Framing problems (truncated headers, zero lengths) are reported by the
/// packet parser; this type covers the value layer only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("attribute {attr_type} encoded length {len} exceeds 1020 bytes")]
    TooLong { attr_type: u8, len: usize },

    #[error("{attr} value must be {expected} bytes, got {actual}")]
    InvalidValueLength {
        attr: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{attr} truncated: need at least {expected} bytes, got {actual}")]
    Truncated {
        attr: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{attr} value is not valid UTF-8")]
    InvalidUtf8 { attr: &'static str },
}

/// EAP-AKA/AKA' attribute as defined in RFC 4187 Section 10 and RFC 5448
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      | Length (x4)   |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The Length byte counts 4-byte words over the whole entry, so every
/// encoded attribute is zero-padded to a 4-byte boundary. One variant per
/// known attribute; everything else is preserved through [`Attribute::Unknown`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// AT_RAND: 16-byte network challenge (RFC 4187 Section 10.6)
    Rand(Vec<u8>),
    /// AT_AUTN: 16-byte authentication token (RFC 4187 Section 10.7)
    Autn(Vec<u8>),
    /// AT_RES: authentication result, length carried in bits on the wire
    /// (RFC 4187 Section 10.8)
    Res(Vec<u8>),
    /// AT_AUTS: 14-byte synchronization failure token (RFC 4187 Section 10.9)
    Auts(Vec<u8>),
    /// AT_PADDING: the count of zero value bytes (RFC 4187 Section 10.12)
    Padding(usize),
    /// AT_NONCE_MT: 16-byte client nonce (RFC 4186 Section 10.1)
    NonceMt(Vec<u8>),
    /// AT_PERMANENT_ID_REQ (RFC 4187 Section 10.2)
    PermanentIdReq,
    /// AT_MAC: 16-byte message authentication code (RFC 4187 Section 10.15).
    /// An empty value encodes as the all-zero placeholder.
    Mac(Vec<u8>),
    /// AT_NOTIFICATION: S/P flag bits plus a 14-bit code (RFC 4187 Section 10.19)
    Notification { s: bool, p: bool, code: u16 },
    /// AT_ANY_ID_REQ (RFC 4187 Section 10.3)
    AnyIdReq,
    /// AT_IDENTITY: NAI string (RFC 4187 Section 10.5)
    Identity(String),
    /// AT_VERSION_LIST: supported versions (RFC 4186 Section 10.4)
    VersionList(Vec<u16>),
    /// AT_SELECTED_VERSION (RFC 4186 Section 10.5)
    SelectedVersion(u16),
    /// AT_FULLAUTH_ID_REQ (RFC 4187 Section 10.4)
    FullauthIdReq,
    /// AT_COUNTER: re-authentication counter (RFC 4187 Section 10.16)
    Counter(u16),
    /// AT_COUNTER_TOO_SMALL (RFC 4187 Section 10.17)
    CounterTooSmall,
    /// AT_NONCE_S: 16-byte server nonce for re-authentication
    /// (RFC 4187 Section 10.18)
    NonceS(Vec<u8>),
    /// AT_CLIENT_ERROR_CODE (RFC 4187 Section 10.20)
    ClientErrorCode(u16),
    /// AT_KDF_INPUT: access network name (RFC 5448 Section 3.1)
    KdfInput(String),
    /// AT_KDF: key derivation function selector (RFC 5448 Section 3.2)
    Kdf(u16),
    /// AT_IV: 16-byte initialization vector (RFC 4187 Section 10.12)
    Iv(Vec<u8>),
    /// AT_ENCR_DATA: encrypted attribute payload, carried opaquely
    /// (RFC 4187 Section 10.12)
    EncrData(Vec<u8>),
    /// AT_NEXT_PSEUDONYM (RFC 4187 Section 10.10)
    NextPseudonym(String),
    /// AT_NEXT_REAUTH_ID (RFC 4187 Section 10.11)
    NextReauthId(String),
    /// AT_CHECKCODE: hash over the identity round, carried opaquely
    /// (RFC 4187 Section 10.13)
    Checkcode(Vec<u8>),
    /// AT_RESULT_IND (RFC 4187 Section 10.14)
    ResultInd,
    /// AT_BIDDING (RFC 5448 Section 4)
    Bidding,
    /// Catch-all for unrecognized attribute types; the raw value bytes are
    /// re-encoded unchanged
    Unknown { attr_type: u8, value: Vec<u8> },
}

impl Attribute {
    /// Length of the MAC value carried by AT_MAC
    pub const MAC_LEN: usize = 16;

    /// An AT_MAC attribute holding the all-zero placeholder, to be filled
    /// in by [`calculate_and_set_mac`](crate::mac::calculate_and_set_mac).
    pub fn mac_placeholder() -> Self {
        Attribute::Mac(vec![0u8; Self::MAC_LEN])
    }

    /// The wire type code of this attribute
    pub fn attribute_type(&self) -> u8 {
        match self {
            Attribute::Rand(_) => AttributeType::Rand.as_u8(),
            Attribute::Autn(_) => AttributeType::Autn.as_u8(),
            Attribute::Res(_) => AttributeType::Res.as_u8(),
            Attribute::Auts(_) => AttributeType::Auts.as_u8(),
            Attribute::Padding(_) => AttributeType::Padding.as_u8(),
            Attribute::NonceMt(_) => AttributeType::NonceMt.as_u8(),
            Attribute::PermanentIdReq => AttributeType::PermanentIdReq.as_u8(),
            Attribute::Mac(_) => AttributeType::Mac.as_u8(),
            Attribute::Notification { .. } => AttributeType::Notification.as_u8(),
            Attribute::AnyIdReq => AttributeType::AnyIdReq.as_u8(),
            Attribute::Identity(_) => AttributeType::Identity.as_u8(),
            Attribute::VersionList(_) => AttributeType::VersionList.as_u8(),
            Attribute::SelectedVersion(_) => AttributeType::SelectedVersion.as_u8(),
            Attribute::FullauthIdReq => AttributeType::FullauthIdReq.as_u8(),
            Attribute::Counter(_) => AttributeType::Counter.as_u8(),
            Attribute::CounterTooSmall => AttributeType::CounterTooSmall.as_u8(),
            Attribute::NonceS(_) => AttributeType::NonceS.as_u8(),
            Attribute::ClientErrorCode(_) => AttributeType::ClientErrorCode.as_u8(),
            Attribute::KdfInput(_) => AttributeType::KdfInput.as_u8(),
            Attribute::Kdf(_) => AttributeType::Kdf.as_u8(),
            Attribute::Iv(_) => AttributeType::Iv.as_u8(),
            Attribute::EncrData(_) => AttributeType::EncrData.as_u8(),
            Attribute::NextPseudonym(_) => AttributeType::NextPseudonym.as_u8(),
            Attribute::NextReauthId(_) => AttributeType::NextReauthId.as_u8(),
            Attribute::Checkcode(_) => AttributeType::Checkcode.as_u8(),
            Attribute::ResultInd => AttributeType::ResultInd.as_u8(),
            Attribute::Bidding => AttributeType::Bidding.as_u8(),
            Attribute::Unknown { attr_type, .. } => *attr_type,
        }
    }

    /// Encode the attribute into its padded TLV wire form
    pub fn encode(&self) -> Result<Vec<u8>, AttributeError> {
        let value = match self {
            Attribute::Rand(rand) => {
                expect_len("AT_RAND", 16, rand)?;
                rand.clone()
            }
            Attribute::Autn(autn) => {
                expect_len("AT_AUTN", 16, autn)?;
                autn.clone()
            }
            Attribute::Res(res) => {
                // Length prefix is in bits (RFC 4187 Section 10.8)
                let bits = (res.len() * 8) as u16;
                let mut buf = Vec::with_capacity(2 + res.len());
                buf.extend_from_slice(&bits.to_be_bytes());
                buf.extend_from_slice(res);
                buf
            }
            Attribute::Auts(auts) => {
                expect_len("AT_AUTS", 14, auts)?;
                auts.clone()
            }
            Attribute::Padding(len) => vec![0u8; *len],
            Attribute::NonceMt(nonce) => {
                expect_len("AT_NONCE_MT", 16, nonce)?;
                reserved_prefixed(nonce)
            }
            Attribute::PermanentIdReq
            | Attribute::AnyIdReq
            | Attribute::FullauthIdReq
            | Attribute::CounterTooSmall
            | Attribute::ResultInd
            | Attribute::Bidding => vec![0u8; 2],
            Attribute::Mac(mac) => {
                let mut buf = vec![0u8; 2 + Self::MAC_LEN];
                if !mac.is_empty() {
                    expect_len("AT_MAC", Self::MAC_LEN, mac)?;
                    buf[2..].copy_from_slice(mac);
                }
                buf
            }
            Attribute::Notification { s, p, code } => {
                let mut word = code & 0x3fff;
                if *s {
                    word |= 0x8000;
                }
                if *p {
                    word |= 0x4000;
                }
                word.to_be_bytes().to_vec()
            }
            Attribute::Identity(identity) => length_prefixed(identity.as_bytes()),
            Attribute::VersionList(versions) => {
                let actual = (versions.len() * 2) as u16;
                let mut buf = Vec::with_capacity(2 + versions.len() * 2);
                buf.extend_from_slice(&actual.to_be_bytes());
                for version in versions {
                    buf.extend_from_slice(&version.to_be_bytes());
                }
                buf
            }
            Attribute::SelectedVersion(version) => version.to_be_bytes().to_vec(),
            Attribute::Counter(counter) => counter.to_be_bytes().to_vec(),
            Attribute::NonceS(nonce) => {
                expect_len("AT_NONCE_S", 16, nonce)?;
                reserved_prefixed(nonce)
            }
            Attribute::ClientErrorCode(code) => code.to_be_bytes().to_vec(),
            Attribute::KdfInput(name) => length_prefixed(name.as_bytes()),
            Attribute::Kdf(kdf) => kdf.to_be_bytes().to_vec(),
            Attribute::Iv(iv) => {
                expect_len("AT_IV", 16, iv)?;
                reserved_prefixed(iv)
            }
            Attribute::EncrData(data) => reserved_prefixed(data),
            Attribute::NextPseudonym(pseudonym) => length_prefixed(pseudonym.as_bytes()),
            Attribute::NextReauthId(identity) => length_prefixed(identity.as_bytes()),
            Attribute::Checkcode(checkcode) => reserved_prefixed(checkcode),
            Attribute::Unknown { value, .. } => value.clone(),
        };

        encode_tlv(self.attribute_type(), &value)
    }

    /// Decode an attribute value (the bytes after the 2-byte TLV header).
    ///
    /// Unrecognized type codes produce [`Attribute::Unknown`] rather than an
    /// error, preserving forward compatibility.
    pub fn decode(attr_type: u8, value: &[u8]) -> Result<Self, AttributeError> {
        let Some(known) = AttributeType::from_u8(attr_type) else {
            return Ok(Attribute::Unknown {
                attr_type,
                value: value.to_vec(),
            });
        };

        let attribute = match known {
            AttributeType::Rand => Attribute::Rand(take("AT_RAND", value, 0, 16)?),
            AttributeType::Autn => Attribute::Autn(take("AT_AUTN", value, 0, 16)?),
            AttributeType::Res => {
                let bits = read_u16("AT_RES", value)?;
                let len = (bits as usize).div_ceil(8);
                Attribute::Res(take("AT_RES", value, 2, len)?)
            }
            AttributeType::Auts => Attribute::Auts(take("AT_AUTS", value, 0, 14)?),
            AttributeType::Padding => Attribute::Padding(value.len()),
            AttributeType::NonceMt => Attribute::NonceMt(take("AT_NONCE_MT", value, 2, 16)?),
            AttributeType::PermanentIdReq => {
                require_reserved("AT_PERMANENT_ID_REQ", value)?;
                Attribute::PermanentIdReq
            }
            AttributeType::Mac => Attribute::Mac(take("AT_MAC", value, 2, Self::MAC_LEN)?),
            AttributeType::Notification => {
                let word = read_u16("AT_NOTIFICATION", value)?;
                Attribute::Notification {
                    s: word & 0x8000 != 0,
                    p: word & 0x4000 != 0,
                    code: word & 0x3fff,
                }
            }
            AttributeType::AnyIdReq => {
                require_reserved("AT_ANY_ID_REQ", value)?;
                Attribute::AnyIdReq
            }
            AttributeType::Identity => {
                Attribute::Identity(read_string("AT_IDENTITY", value)?)
            }
            AttributeType::VersionList => {
                let actual = read_u16("AT_VERSION_LIST", value)? as usize;
                let bytes = take("AT_VERSION_LIST", value, 2, actual)?;
                let versions = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                Attribute::VersionList(versions)
            }
            AttributeType::SelectedVersion => {
                Attribute::SelectedVersion(read_u16("AT_SELECTED_VERSION", value)?)
            }
            AttributeType::FullauthIdReq => {
                require_reserved("AT_FULLAUTH_ID_REQ", value)?;
                Attribute::FullauthIdReq
            }
            AttributeType::Counter => Attribute::Counter(read_u16("AT_COUNTER", value)?),
            AttributeType::CounterTooSmall => {
                require_reserved("AT_COUNTER_TOO_SMALL", value)?;
                Attribute::CounterTooSmall
            }
            AttributeType::NonceS => Attribute::NonceS(take("AT_NONCE_S", value, 2, 16)?),
            AttributeType::ClientErrorCode => {
                Attribute::ClientErrorCode(read_u16("AT_CLIENT_ERROR_CODE", value)?)
            }
            AttributeType::KdfInput => Attribute::KdfInput(read_string("AT_KDF_INPUT", value)?),
            AttributeType::Kdf => Attribute::Kdf(read_u16("AT_KDF", value)?),
            AttributeType::Iv => Attribute::Iv(take("AT_IV", value, 2, 16)?),
            AttributeType::EncrData => {
                require_reserved("AT_ENCR_DATA", value)?;
                Attribute::EncrData(value[2..].to_vec())
            }
            AttributeType::NextPseudonym => {
                Attribute::NextPseudonym(read_string("AT_NEXT_PSEUDONYM", value)?)
            }
            AttributeType::NextReauthId => {
                Attribute::NextReauthId(read_string("AT_NEXT_REAUTH_ID", value)?)
            }
            AttributeType::Checkcode => {
                require_reserved("AT_CHECKCODE", value)?;
                Attribute::Checkcode(value[2..].to_vec())
            }
            AttributeType::ResultInd => {
                require_reserved("AT_RESULT_IND", value)?;
                Attribute::ResultInd
            }
            AttributeType::Bidding => {
                require_reserved("AT_BIDDING", value)?;
                Attribute::Bidding
            }
        };

        Ok(attribute)
    }
}

/// Frame a value as `Type | Length-in-words | Value | zero padding`, padding
/// the total up to the next multiple of 4 bytes.
pub(crate) fn encode_tlv(attr_type: u8, value: &[u8]) -> Result<Vec<u8>, AttributeError> {
    let mut total = 2 + value.len();
    total += (4 - total % 4) % 4;

    // The length byte counts 4-byte words, so 255 words is the ceiling.
    if total > 255 * 4 {
        return Err(AttributeError::TooLong {
            attr_type,
            len: total,
        });
    }

    let mut buf = Vec::with_capacity(total);
    buf.push(attr_type);
    buf.push((total / 4) as u8);
    buf.extend_from_slice(value);
    buf.resize(total, 0);
    Ok(buf)
}

fn expect_len(attr: &'static str, expected: usize, value: &[u8]) -> Result<(), AttributeError> {
    if value.len() != expected {
        return Err(AttributeError::InvalidValueLength {
            attr,
            expected,
            actual: value.len(),
        });
    }
    Ok(())
}

/// Two reserved zero bytes followed by the payload
fn reserved_prefixed(value: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + value.len());
    buf.extend_from_slice(&[0x00, 0x00]);
    buf.extend_from_slice(value);
    buf
}

/// Two-byte big-endian byte count followed by the payload
fn length_prefixed(value: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + value.len());
    buf.extend_from_slice(&(value.len() as u16).to_be_bytes());
    buf.extend_from_slice(value);
    buf
}

fn take(
    attr: &'static str,
    value: &[u8],
    offset: usize,
    len: usize,
) -> Result<Vec<u8>, AttributeError> {
    if value.len() < offset + len {
        return Err(AttributeError::Truncated {
            attr,
            expected: offset + len,
            actual: value.len(),
        });
    }
    Ok(value[offset..offset + len].to_vec())
}

fn read_u16(attr: &'static str, value: &[u8]) -> Result<u16, AttributeError> {
    if value.len() < 2 {
        return Err(AttributeError::Truncated {
            attr,
            expected: 2,
            actual: value.len(),
        });
    }
    Ok(u16::from_be_bytes([value[0], value[1]]))
}

fn read_string(attr: &'static str, value: &[u8]) -> Result<String, AttributeError> {
    let len = read_u16(attr, value)? as usize;
    let bytes = take(attr, value, 2, len)?;
    String::from_utf8(bytes).map_err(|_| AttributeError::InvalidUtf8 { attr })
}

fn require_reserved(attr: &'static str, value: &[u8]) -> Result<(), AttributeError> {
    if value.len() < 2 {
        return Err(AttributeError::Truncated {
            attr,
            expected: 2,
            actual: value.len(),
        });
    }
    Ok(())
}
