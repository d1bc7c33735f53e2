//! Packet Encoder / Decoder
//!
//! Wire format: `"<temperature>,<ph>,<tds>"`, default float formatting on
//! encode. The decoder splits on the first two commas and parses each
//! substring; anything malformed surfaces as a `DecodeError` rather than a
//! zero-filled reading.

use crate::error::DecodeError;
use crate::reading::Reading;

/// Serialize a reading into its wire payload
pub fn encode(reading: &Reading) -> String {
    format!("{},{},{}", reading.temperature, reading.ph, reading.tds)
}

/// Parse a received payload back into a reading
pub fn decode(payload: &str) -> Result<Reading, DecodeError> {
    let c1 = payload
        .find(',')
        .ok_or(DecodeError::MissingDelimiter { found: 0 })?;
    let c2_rel = payload[c1 + 1..]
        .find(',')
        .ok_or(DecodeError::MissingDelimiter { found: 1 })?;
    let c2 = c1 + 1 + c2_rel;

    let temperature = parse_field("temperature", &payload[..c1])?;
    let ph = parse_field("ph", &payload[c1 + 1..c2])?;
    let tds = parse_field("tds", &payload[c2 + 1..])?;

    Ok(Reading {
        temperature,
        ph,
        tds,
    })
}

fn parse_field(field: &'static str, text: &str) -> Result<f32, DecodeError> {
    text.trim().parse().map_err(|_| DecodeError::InvalidField {
        field,
        text: text.to_string(),
    })
}
