//! Path splitting, percent-decoding, and extension stripping for legacy paths.

/// Extracts the path of an absolute delivery URL.
///
/// Returns `None` when the URL cannot be parsed, has no host, or its path is
/// empty after trimming slashes. Callers then resolve the asset through an
/// already-stored public identifier instead of parsing.
pub fn legacy_path_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().filter(|h| !h.is_empty())?;
    let path = parsed.path();
    if path.trim_matches('/').is_empty() {
        return None;
    }
    Some(path.to_string())
}

/// Splits a raw legacy path into decoded, non-empty segments.
///
/// Decoding happens per segment so an encoded `%2F` never introduces a new
/// path level.
pub fn split_segments(raw_path: &str) -> Vec<String> {
    raw_path
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(percent_decode)
        .collect()
}

/// Removes everything from the final `.` of `segment` onward.
pub fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => segment,
    }
}

/// Percent-decodes a single segment; malformed escapes are kept verbatim.
pub(crate) fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
