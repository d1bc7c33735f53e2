//! Link Protocol Error Types

use thiserror::Error;

/// Errors from decoding a received payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload has fewer than the two field delimiters the triple needs
    #[error("malformed packet: expected 2 delimiters, found {found}")]
    MissingDelimiter { found: usize },

    /// A field substring did not parse as a number
    #[error("invalid {field} field: {text:?}")]
    InvalidField { field: &'static str, text: String },
}

/// Errors from validating radio modulation parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Spreading factor outside the modem's 7-12 range
    #[error("spreading factor {0} outside 7..=12")]
    SpreadingFactor(u8),

    /// Coding rate denominator outside 4/5..4/8
    #[error("coding rate 4/{0} outside 4/5..=4/8")]
    CodingRate(u8),

    /// Transmit power above the 22 dBm hardware limit
    #[error("transmit power {0} dBm above the 22 dBm limit")]
    TxPower(i8),

    /// Frequency outside the supported bands
    #[error("frequency {0} MHz outside supported bands")]
    Frequency(f32),
}
