pub mod ndjson;
pub mod timestamp;

use memchr::memchr_iter;

/// Split `text` into lines, each keeping its `\n` (and any `\r` before it).
/// A trailing fragment without a newline is yielded as the last line.
pub fn lines_with_terminators(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut ends = memchr_iter(b'\n', bytes);
    std::iter::from_fn(move || match ends.next() {
        Some(nl) => {
            let line = &text[start..=nl];
            start = nl + 1;
            Some(line)
        }
        None if start < bytes.len() => {
            let line = &text[start..];
            start = bytes.len();
            Some(line)
        }
        None => None,
    })
}
