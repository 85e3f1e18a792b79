//! EAP packet model, parser, and marshaler

pub mod code;
pub mod packet;

pub use code::{Code, EapType, Subtype};
pub use packet::{Packet, PacketError};
