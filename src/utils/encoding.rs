use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;

/// UTF-8 (BOM stripped), falling back to Windows-1252 for legacy exports
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }

    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}
