//! Request Key Module
//!
//! Builds the request URL that doubles as the cache key.

use std::fmt::Write;

// == Build Key ==
/// Appends percent-encoded query parameters to a base URL.
///
/// Parameters are written in the iteration order of `params`, so callers that need
/// stable cache keys should pass an ordered collection such as a `BTreeMap`.
/// `?` starts the query unless the base URL already has one, in which case the
/// pairs are appended with `&`. The base URL itself is passed through untouched.
///
/// # Arguments
/// * `base_url` - URL of the server method
/// * `params` - Query string parameters as key/value pairs
pub fn build_key<I, K, V>(base_url: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut key = String::from(base_url);
    let mut separator = if base_url.contains('?') { '&' } else { '?' };

    for (name, value) in params {
        key.push(separator);
        key.push_str(&percent_encode(name.as_ref()));
        key.push('=');
        key.push_str(&percent_encode(value.as_ref()));
        separator = '&';
    }

    key
}

// == Percent Encode ==
/// Escapes every byte outside the unreserved set (`A-Z a-z 0-9 - _ . ~`).
///
/// Non-ASCII characters are escaped byte by byte from their UTF-8 encoding,
/// using uppercase hex digits.
pub fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());

    for byte in input.bytes() {
        if is_unreserved(byte) {
            encoded.push(byte as char);
        } else {
            // Writing into a String cannot fail
            let _ = write!(encoded, "%{:02X}", byte);
        }
    }

    encoded
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}
