//! Parameter extraction module
//!
//! Decodes path segments and query-string parameters into the plain values
//! handlers validate against the store.

/// Normalize a path segment into a store lookup value
///
/// Percent-decodes the segment and replaces `-` word separators with
/// spaces, so `smileys-and-people` resolves to "smileys and people".
pub fn normalize_segment(segment: &str) -> String {
    percent_decode(segment).replace('-', " ")
}

/// Extract a query parameter by key from a raw query string
///
/// Returns the decoded value of the first matching key. A key without a
/// value (`?q` or `?q=`) yields an empty string.
pub fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    let query = query?;
    for pair in query.split('&') {
        let (k, v) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        if k == key {
            return Some(percent_decode(&v.replace('+', " ")));
        }
    }
    None
}

/// Decode percent-encoded sequences, leaving malformed ones untouched
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                #[allow(clippy::cast_possible_truncation)]
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
