//! Data URL codec
//!
//! Converts between `data:<mime>;base64,<payload>` strings and the
//! MIME type / base64 payload pairs sent to and received from Gemini.

use crate::ai::gemini::types::InlineData;
use crate::{Error, Result};
use base64::Engine as _;

const SCHEME: &str = "data";
const ENCODING: &str = "base64";

/// Split a data URL into its MIME type and base64 payload.
pub fn decode(data_url: &str) -> Result<InlineData> {
    let parts: Vec<&str> = data_url.split(',').collect();
    let [header, payload] = parts.as_slice() else {
        return Err(Error::MalformedInput(
            "expected exactly one ',' separating header and payload".to_string(),
        ));
    };

    let (scheme, rest) = header
        .split_once(':')
        .ok_or_else(|| Error::MalformedInput("missing ':' after scheme".to_string()))?;
    if scheme != SCHEME {
        return Err(Error::MalformedInput(format!(
            "unsupported scheme '{}'",
            scheme
        )));
    }

    let (mime_type, encoding) = rest
        .split_once(';')
        .ok_or_else(|| Error::MalformedInput("could not extract MIME type".to_string()))?;
    if mime_type.is_empty() {
        return Err(Error::MalformedInput("empty MIME type".to_string()));
    }
    if encoding != ENCODING {
        return Err(Error::MalformedInput(format!(
            "unsupported encoding '{}'",
            encoding
        )));
    }

    Ok(InlineData {
        mime_type: mime_type.to_string(),
        data: payload.to_string(),
    })
}

/// Compose a data URL from a MIME type and a base64 payload.
pub fn encode(mime_type: &str, payload: &str) -> String {
    format!("{}:{};{},{}", SCHEME, mime_type, ENCODING, payload)
}

/// Build a data URL from raw bytes.
pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    encode(mime_type, &payload)
}

/// Decode a data URL into its MIME type and raw bytes.
pub fn to_bytes(data_url: &str) -> Result<(String, Vec<u8>)> {
    let inline = decode(data_url)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&inline.data)
        .map_err(|e| Error::MalformedInput(format!("invalid base64 payload: {}", e)))?;
    Ok((inline.mime_type, bytes))
}
