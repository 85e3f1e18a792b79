//! EAP-AKA attribute model and TLV codec
//!
//! Attributes are the unit of payload inside an EAP-AKA/AKA' packet: a
//! one-byte type, a one-byte length in 4-byte words, and a value padded to a
//! word boundary. [`Attribute`] covers every type defined by RFC 4187,
//! RFC 4186 (shared type codes), and RFC 5448, with unrecognized types
//! passed through verbatim.

pub mod attribute;
pub mod types;

pub use attribute::{Attribute, AttributeError};
pub use types::AttributeType;
