use std::path::Path;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use regex::bytes::Regex;

use crate::error::ExtractError;
use crate::warning::{ExtractWarning, WarningCode};

/// How far into the document a `<meta charset>` declaration is looked for.
const META_PRESCAN_BYTES: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("hardcoded meta charset regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EncodingSource {
    ByteOrderMark,
    MetaCharset,
    Utf8,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedDocument {
    pub(crate) text: String,
    pub(crate) encoding: &'static Encoding,
    pub(crate) source: EncodingSource,
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let label = META_CHARSET_RE.captures(head)?.get(1)?.as_bytes();
    let encoding = Encoding::for_label(label)?;
    // A meta tag can only be read if the document is ASCII-compatible.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Some(UTF_8);
    }
    Some(encoding)
}

fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize, EncodingSource) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return (encoding, bom_len, EncodingSource::ByteOrderMark);
    }
    if let Some(encoding) = sniff_meta_charset(bytes) {
        return (encoding, 0, EncodingSource::MetaCharset);
    }
    if std::str::from_utf8(bytes).is_ok() {
        return (UTF_8, 0, EncodingSource::Utf8);
    }
    (WINDOWS_1252, 0, EncodingSource::Fallback)
}

pub(crate) fn decode_html_bytes(
    bytes: &[u8],
    warnings: &mut Vec<ExtractWarning>,
) -> DecodedDocument {
    let (encoding, bom_len, source) = detect_encoding(bytes);
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);

    if source == EncodingSource::Fallback {
        warnings.push(ExtractWarning::new(
            WarningCode::EncodingFallback,
            "input is not valid UTF-8 and declares no charset; decoded as windows-1252",
        ));
    }
    if had_errors {
        tracing::debug!(
            encoding = encoding.name(),
            "input contained malformed sequences; replaced with U+FFFD"
        );
    }

    DecodedDocument {
        text: text.into_owned(),
        encoding,
        source,
    }
}

pub(crate) fn read_html_file(
    path: &Path,
    warnings: &mut Vec<ExtractWarning>,
) -> Result<DecodedDocument, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_html_bytes(&bytes, warnings);
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        encoding = decoded.encoding.name(),
        source = ?decoded.source,
        "read HTML input"
    );
    Ok(decoded)
}
