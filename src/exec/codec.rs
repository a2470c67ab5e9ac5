// src/exec/codec.rs

//! Codec lookup and per-line transcoding for the engine's streams.

use encoding_rs::{Encoding, WINDOWS_1251};
use tracing::warn;

use crate::errors::{AnalyzerError, Result};

/// Codec used to read captured output when the engine is given a file.
pub fn file_capture_codec() -> &'static Encoding {
    WINDOWS_1251
}

/// Line terminator written after text sent to the engine.
pub const NEWLINE: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Resolve a codec label such as `"utf-8"`, `"cp1251"`, `"koi8-r"` or
/// `"cp866"`.
///
/// Only codecs that can encode as well as decode are accepted. UTF-16 and
/// the `replacement` codec encode as UTF-8, which the engine would then
/// read in the wrong encoding.
pub fn resolve_codec(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .filter(|codec| codec.output_encoding() == *codec)
        .ok_or_else(|| AnalyzerError::UnknownEncoding(label.to_string()))
}

/// Encode `text` plus a line terminator for the engine's standard input.
pub fn encode_line(text: &str, codec: &'static Encoding) -> Vec<u8> {
    let mut line = String::with_capacity(text.len() + NEWLINE.len());
    line.push_str(text);
    line.push_str(NEWLINE);

    let (bytes, used, had_errors) = codec.encode(&line);
    if had_errors {
        warn!(
            encoding = used.name(),
            "input text contains characters the encoding cannot represent"
        );
    }
    bytes.into_owned()
}

/// Decode one raw output line, dropping its `\n` / `\r\n` terminator.
pub fn decode_line(raw: &[u8], codec: &'static Encoding) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    let (text, had_errors) = codec.decode_without_bom_handling(raw);
    if had_errors {
        warn!(
            encoding = codec.name(),
            "engine output is not valid in the expected encoding; replaced malformed bytes"
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{IBM866, KOI8_R, UTF_8};

    #[test]
    fn resolves_engine_encoding_names() {
        assert_eq!(resolve_codec("utf-8").unwrap(), UTF_8);
        assert_eq!(resolve_codec("cp1251").unwrap(), WINDOWS_1251);
        assert_eq!(resolve_codec("koi8-r").unwrap(), KOI8_R);
        assert_eq!(resolve_codec("cp866").unwrap(), IBM866);
    }

    #[test]
    fn unknown_label_is_an_error() {
        match resolve_codec("klingon-1") {
            Err(AnalyzerError::UnknownEncoding(label)) => assert_eq!(label, "klingon-1"),
            other => panic!("expected UnknownEncoding, got {other:?}"),
        }
    }

    #[test]
    fn decode_only_codecs_are_refused() {
        for label in ["utf-16le", "utf-16be", "iso-2022-kr"] {
            assert!(
                matches!(resolve_codec(label), Err(AnalyzerError::UnknownEncoding(ref l)) if l == label),
                "{label} should be refused"
            );
        }
    }

    #[test]
    fn cp1251_line_is_decoded_without_terminator() {
        let (bytes, _, _) = WINDOWS_1251.encode("привет{привет=S,жен,од=им,ед}\r\n");
        assert_eq!(
            decode_line(&bytes, WINDOWS_1251),
            "привет{привет=S,жен,од=им,ед}"
        );
    }

    #[test]
    fn encoded_line_ends_with_newline() {
        let bytes = encode_line("мир", KOI8_R);
        assert!(bytes.ends_with(NEWLINE.as_bytes()));
        assert_eq!(decode_line(&bytes, KOI8_R), "мир");
    }
}
