//! Radio Link Protocol
//!
//! The framing contract shared by the sender and receiver: one ASCII frame
//! per transmission carrying `"<temperature>,<ph>,<tds>"`. No length prefix,
//! no checksum, no sequence number; the radio driver's own frame CRC is the
//! only integrity check.

mod codec;
mod error;
mod params;
mod reading;

pub use codec::{decode, encode};
pub use error::{DecodeError, ParamError};
pub use params::RadioParams;
pub use reading::Reading;
