use crate::{Error, Result};
use base64::Engine as _;

pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const WEBP: &str = "image/webp";

/// Sniff the image format from its magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some(JPEG),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(PNG),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some(WEBP),
        _ => None,
    }
}

/// Log when the payload does not look like the format the provider was asked for.
pub fn warn_on_mismatch(expected: &str, bytes: &[u8]) {
    match detect_image_mime(bytes) {
        Some(actual) if actual == expected => {}
        Some(actual) => tracing::warn!(
            "Image payload looks like {} but {} was requested",
            actual,
            expected
        ),
        None => tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?}), expected {}",
            &bytes[..bytes.len().min(4)],
            expected
        ),
    }
}

/// Compare a provider-declared MIME type with the requested one, logging a
/// warning on mismatch. A missing declaration counts as a match.
pub fn declared_matches(expected: &str, declared: Option<&str>) -> bool {
    match declared {
        Some(declared) if !declared.eq_ignore_ascii_case(expected) => {
            tracing::warn!(
                "Provider declared {} but {} was requested",
                declared,
                expected
            );
            false
        }
        _ => true,
    }
}

pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Split a base64 data URI into its MIME type and decoded payload.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| Error::Invariant("not a data URI".to_string()))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::Invariant("data URI is not base64 encoded".to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::Invariant(format!("Failed to decode data URI payload: {}", e)))?;

    Ok((mime_type.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some(PNG)
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(JPEG));
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some(WEBP)
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(detect_image_mime(&[0x00, 0x01, 0x02, 0x03]), None);
        assert_eq!(detect_image_mime(&[]), None);
    }

    #[test]
    fn test_declared_matches() {
        assert!(declared_matches(JPEG, Some("image/jpeg")));
        assert!(declared_matches(JPEG, Some("IMAGE/JPEG")));
        assert!(declared_matches(JPEG, None));
        assert!(!declared_matches(JPEG, Some("image/png")));
    }

    #[test]
    fn test_data_uri_format() {
        assert_eq!(to_data_uri(JPEG, b"abc"), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn test_decode_data_uri() {
        let (mime_type, bytes) = decode_data_uri("data:image/jpeg;base64,YWJj").unwrap();
        assert_eq!(mime_type, JPEG);
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn test_decode_rejects_malformed_uris() {
        assert!(decode_data_uri("https://example.com/a.jpg").is_err());
        assert!(decode_data_uri("data:image/jpeg,YWJj").is_err());
        assert!(decode_data_uri("data:image/jpeg;base64,!!!").is_err());
    }
}
