pub mod observation_reader;
pub mod station_reader;

pub use observation_reader::ObservationReader;
pub use station_reader::StationReader;

use std::borrow::Cow;

/// Decode UTF-8 text, dropping a leading BOM. Falls back to Windows-1252 for
/// files that are not valid UTF-8.
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_bom() {
        let bytes = "\u{feff}Name,Station ID".as_bytes();
        assert_eq!(decode_text(bytes), "Name,Station ID");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "Qu\xe9bec" in Windows-1252
        let bytes = [b'Q', b'u', 0xe9, b'b', b'e', b'c'];
        assert_eq!(decode_text(&bytes), "Québec");
    }
}
