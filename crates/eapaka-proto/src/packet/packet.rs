use super::code::{Code, EapType, Subtype};
use crate::attributes::{Attribute, AttributeError, AttributeType};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("packet too short: {0} bytes")]
    PacketTooShort(usize),

    #[error("invalid EAP code: {0}")]
    InvalidCode(u8),

    #[error("invalid declared packet length: {0}")]
    InvalidLength(usize),

    #[error("declared length {declared} exceeds buffer size {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("truncated EAP-AKA method header: {0} payload bytes")]
    TruncatedMethodHeader(usize),

    #[error("attribute header truncated: {0} bytes remaining")]
    TruncatedAttributeHeader(usize),

    #[error("attribute {0} has zero length")]
    ZeroLengthAttribute(u8),

    #[error("attribute {attr_type} length {declared} overflows remaining {remaining} bytes")]
    AttributeOverflow {
        attr_type: u8,
        declared: usize,
        remaining: usize,
    },

    #[error("failed to decode attribute {attr_type}: {source}")]
    AttributeDecode {
        attr_type: u8,
        #[source]
        source: AttributeError,
    },

    #[error("failed to encode attribute {attr_type}: {source}")]
    AttributeEncode {
        attr_type: u8,
        #[source]
        source: AttributeError,
    },

    #[error("packet too large: {0} bytes")]
    PacketTooLarge(usize),
}

/// EAP packet carrying EAP-AKA/AKA' data, per RFC 3748 Section 4 framing
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Subtype    |           Reserved            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attributes ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-
/// ```
///
/// Success and Failure packets are header-only: they carry no method type,
/// subtype, or attributes. Attribute order is wire-significant and preserved
/// through a decode/encode cycle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet type (1 byte)
    pub code: Code,
    /// Packet identifier for matching requests/responses (1 byte)
    pub identifier: u8,
    /// EAP method type; `None` for Success/Failure and empty packets
    pub eap_type: Option<EapType>,
    /// EAP-AKA subtype; present only when the method is AKA or AKA'
    pub subtype: Option<Subtype>,
    /// Attributes in wire order
    pub attributes: Vec<Attribute>,
}

impl Packet {
    /// EAP header size (1 code + 1 identifier + 2 length)
    pub const HEADER_LEN: usize = 4;
    /// Maximum encodable packet size (16-bit Length field)
    pub const MAX_PACKET_SIZE: usize = 65535;

    pub fn new(code: Code, identifier: u8) -> Self {
        Packet {
            code,
            identifier,
            eap_type: None,
            subtype: None,
            attributes: Vec::new(),
        }
    }

    /// Create an EAP-Request for the given AKA method and subtype
    pub fn request(identifier: u8, eap_type: EapType, subtype: Subtype) -> Self {
        Packet {
            code: Code::Request,
            identifier,
            eap_type: Some(eap_type),
            subtype: Some(subtype),
            attributes: Vec::new(),
        }
    }

    /// Create an EAP-Response for the given AKA method and subtype
    pub fn response(identifier: u8, eap_type: EapType, subtype: Subtype) -> Self {
        Packet {
            code: Code::Response,
            identifier,
            eap_type: Some(eap_type),
            subtype: Some(subtype),
            attributes: Vec::new(),
        }
    }

    /// Create an EAP Success packet (header only)
    pub fn success(identifier: u8) -> Self {
        Packet::new(Code::Success, identifier)
    }

    /// Create an EAP Failure packet (header only)
    pub fn failure(identifier: u8) -> Self {
        Packet::new(Code::Failure, identifier)
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Find the first attribute with the given type
    pub fn find_attribute(&self, attr_type: AttributeType) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.attribute_type() == attr_type.as_u8())
    }

    /// Encode the packet to bytes
    ///
    /// The AKA method header (type, subtype, reserved word) is emitted only
    /// for Request/Response packets whose method is AKA or AKA'; Success and
    /// Failure packets are the 4-byte EAP header alone.
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        let mut payload = Vec::new();

        if matches!(self.code, Code::Request | Code::Response) {
            if let Some(eap_type) = self.eap_type
                && eap_type.is_aka_method()
            {
                payload.push(eap_type.as_u8());
                payload.push(self.subtype.map_or(0, Subtype::as_u8));
                payload.extend_from_slice(&[0x00, 0x00]); // Reserved
            }

            for attribute in &self.attributes {
                let encoded =
                    attribute
                        .encode()
                        .map_err(|source| PacketError::AttributeEncode {
                            attr_type: attribute.attribute_type(),
                            source,
                        })?;
                payload.extend_from_slice(&encoded);
            }
        }

        let total = Self::HEADER_LEN + payload.len();
        if total > Self::MAX_PACKET_SIZE {
            return Err(PacketError::PacketTooLarge(total));
        }

        let mut buf = Vec::with_capacity(total);
        buf.push(self.code.as_u8());
        buf.push(self.identifier);
        buf.extend_from_slice(&(total as u16).to_be_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode a packet from bytes
    ///
    /// Header-only Success/Failure packets and empty Request/Response
    /// packets are valid outcomes, not errors. A Request/Response whose
    /// method type is neither AKA nor AKA' is returned with the type set and
    /// the payload left unparsed.
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        if data.len() < Self::HEADER_LEN {
            return Err(PacketError::PacketTooShort(data.len()));
        }

        let code = Code::from_u8(data[0]).ok_or(PacketError::InvalidCode(data[0]))?;
        let identifier = data[1];
        let declared = u16::from_be_bytes([data[2], data[3]]) as usize;

        if declared < Self::HEADER_LEN {
            return Err(PacketError::InvalidLength(declared));
        }
        if declared > data.len() {
            return Err(PacketError::LengthMismatch {
                declared,
                actual: data.len(),
            });
        }

        let mut packet = Packet::new(code, identifier);
        if matches!(code, Code::Success | Code::Failure) {
            return Ok(packet);
        }

        // Only the declared length is consulted; trailing bytes are ignored.
        let payload = &data[Self::HEADER_LEN..declared];
        if payload.is_empty() {
            return Ok(packet);
        }

        let eap_type = EapType::from_u8(payload[0]);
        packet.eap_type = Some(eap_type);
        if !eap_type.is_aka_method() {
            debug!(
                eap_type = payload[0],
                "unrecognized EAP method, leaving payload unparsed"
            );
            return Ok(packet);
        }

        if payload.len() < 4 {
            return Err(PacketError::TruncatedMethodHeader(payload.len()));
        }
        packet.subtype = Some(Subtype::from_u8(payload[1]));
        // payload[2..4] is the reserved word

        let attr_data = &payload[4..];
        let mut offset = 0;
        while offset < attr_data.len() {
            if offset + 2 > attr_data.len() {
                return Err(PacketError::TruncatedAttributeHeader(
                    attr_data.len() - offset,
                ));
            }
            let attr_type = attr_data[offset];
            let attr_len = attr_data[offset + 1] as usize * 4;

            if attr_len == 0 {
                return Err(PacketError::ZeroLengthAttribute(attr_type));
            }
            if offset + attr_len > attr_data.len() {
                return Err(PacketError::AttributeOverflow {
                    attr_type,
                    declared: attr_len,
                    remaining: attr_data.len() - offset,
                });
            }

            let value = &attr_data[offset + 2..offset + attr_len];
            let attribute = Attribute::decode(attr_type, value)
                .map_err(|source| PacketError::AttributeDecode { attr_type, source })?;
            packet.attributes.push(attribute);

            offset += attr_len;
        }

        Ok(packet)
    }
}
