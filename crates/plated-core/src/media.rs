//! MIME classification and inline-blob helpers for uploaded media.
//!
//! Uploads arrive with a browser-supplied MIME type that may be missing or
//! generic (`application/octet-stream`), so the payload's own signature is
//! the fallback.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Whether `mime` names a raster image the compressor can work on.
///
/// Any `image/*` type except SVG counts. Parameters (`; charset=...`) and
/// case are ignored.
pub fn is_raster_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    kind.eq_ignore_ascii_case("image")
        && !subtype.is_empty()
        && !subtype.eq_ignore_ascii_case("svg+xml")
}

/// Identify common upload formats from their leading bytes.
///
/// Covers the images the compressor decodes plus the video containers used
/// for highlight reels, which pass through the size guard untouched.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] if bytes.len() >= 14 => Some("image/bmp"),
        [0x1A, 0x45, 0xDF, 0xA3, ..] => Some("video/webm"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'q', b't', b' ', b' ', ..] => Some("video/quicktime"),
        [_, _, _, _, b'f', b't', b'y', b'p', ..] => Some("video/mp4"),
        _ => None,
    }
}

/// Resolve the effective MIME type of an upload.
///
/// A specific hint wins; a missing, blank or `application/octet-stream` hint
/// falls back to sniffing.
pub fn resolve_mime<'a>(bytes: &[u8], hint: Option<&'a str>) -> Option<&'a str> {
    match hint.map(str::trim) {
        Some(mime) if !mime.is_empty() && !mime.eq_ignore_ascii_case("application/octet-stream") => {
            Some(mime)
        }
        _ => sniff_mime(bytes),
    }
}

/// Render bytes as a `data:` URL, the inline form stored against records.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    let payload = STANDARD.encode(bytes);
    let mut url = String::with_capacity(5 + mime.len() + 8 + payload.len());
    url.push_str("data:");
    url.push_str(mime);
    url.push_str(";base64,");
    url.push_str(&payload);
    url
}
