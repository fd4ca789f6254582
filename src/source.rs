//! Loading and decoding source files.
//!
//! A source unit reaches the scanner as a `Vec<char>`. The encoding is taken from a byte order mark
//! when there is one, else UTF-8 is assumed. BOMs are checked longest first, so a UTF-32 LE mark
//! (`FF FE 00 00`) is not mistaken for UTF-16 LE (`FF FE`).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::FatalError;

/// Largest source file accepted, in bytes.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Encodings recognised by [`detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

const BOMS: &[(&[u8], Encoding)] = &[
    (&[0xFF, 0xFE, 0x00, 0x00], Encoding::Utf32Le),
    (&[0x00, 0x00, 0xFE, 0xFF], Encoding::Utf32Be),
    (&[0xEF, 0xBB, 0xBF], Encoding::Utf8),
    (&[0xFF, 0xFE], Encoding::Utf16Le),
    (&[0xFE, 0xFF], Encoding::Utf16Be),
];

/// Sniff the encoding. Returns the encoding and the length of the BOM to skip.
pub fn detect(bytes: &[u8]) -> (Encoding, usize) {
    BOMS.iter()
        .find(|(bom, _)| bytes.starts_with(bom))
        .map(|(bom, encoding)| (*encoding, bom.len()))
        .unwrap_or((Encoding::Utf8, 0))
}

/// Decode a whole source unit into code points.
///
/// `name` is only used in error messages.
pub fn decode(name: &str, bytes: &[u8]) -> Result<Vec<char>, FatalError> {
    let (encoding, bom) = detect(bytes);
    let body = &bytes[bom..];
    tracing::trace!(?encoding, bytes = body.len(), "decoding source");

    match encoding {
        Encoding::Utf8 => {
            let text = std::str::from_utf8(body).map_err(|e| {
                FatalError::cannot_read(name, format!("invalid UTF-8 at byte {}", e.valid_up_to() + bom))
            })?;
            let mut out = reserve(name, text.len())?;
            out.extend(text.chars());
            Ok(out)
        }
        Encoding::Utf16Le | Encoding::Utf16Be => {
            if body.len() % 2 != 0 {
                return Err(FatalError::cannot_read(name, "truncated UTF-16 code unit"));
            }
            let units = body.chunks_exact(2).map(|pair| {
                let pair = [pair[0], pair[1]];
                if encoding == Encoding::Utf16Le {
                    u16::from_le_bytes(pair)
                } else {
                    u16::from_be_bytes(pair)
                }
            });
            let mut out = reserve(name, body.len() / 2)?;
            for c in char::decode_utf16(units) {
                let c = c.map_err(|e| {
                    FatalError::cannot_read(name, format!("unpaired surrogate 0x{:04X}", e.unpaired_surrogate()))
                })?;
                out.push(c);
            }
            Ok(out)
        }
        Encoding::Utf32Le | Encoding::Utf32Be => {
            if body.len() % 4 != 0 {
                return Err(FatalError::cannot_read(name, "truncated UTF-32 code unit"));
            }
            let mut out = reserve(name, body.len() / 4)?;
            for quad in body.chunks_exact(4) {
                let quad = [quad[0], quad[1], quad[2], quad[3]];
                let value = if encoding == Encoding::Utf32Le {
                    u32::from_le_bytes(quad)
                } else {
                    u32::from_be_bytes(quad)
                };
                let c = char::from_u32(value)
                    .ok_or_else(|| FatalError::cannot_read(name, format!("invalid code point 0x{value:X}")))?;
                out.push(c);
            }
            Ok(out)
        }
    }
}

/// Read and decode the file at `path`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Vec<char>, FatalError> {
    let name = path.display().to_string();
    let mut file = File::open(path).map_err(|source| FatalError::CannotOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let size = file
        .metadata()
        .map_err(|e| FatalError::cannot_read(&name, e))?
        .len();
    if size > MAX_SOURCE_SIZE {
        return Err(FatalError::out_of_memory(&name, size));
    }

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(size as usize)
        .map_err(|_| FatalError::out_of_memory(&name, size))?;
    file.read_to_end(&mut bytes)
        .map_err(|e| FatalError::cannot_read(&name, e))?;

    decode(&name, &bytes)
}

fn reserve(name: &str, capacity: usize) -> Result<Vec<char>, FatalError> {
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| FatalError::out_of_memory(name, capacity as u64))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn unique_temp_file(tag: &str) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("lark_source_test_{tag}_{}_{ts}.lark", std::process::id()))
    }

    #[test]
    fn plain_bytes_default_to_utf8() {
        assert_eq!(detect(b"x = 1"), (Encoding::Utf8, 0));
        assert_eq!(decode("a", "é = 1".as_bytes()).unwrap(), chars("é = 1"));
    }

    #[test]
    fn utf8_bom_is_skipped() {
        let bytes = [0xEF, 0xBB, 0xBF, b'x'];
        assert_eq!(decode("a", &bytes).unwrap(), chars("x"));
    }

    #[test]
    fn utf32_le_wins_over_utf16_le() {
        let bytes = [0xFF, 0xFE, 0x00, 0x00, b'x', 0, 0, 0];
        assert_eq!(detect(&bytes), (Encoding::Utf32Le, 4));
        assert_eq!(decode("a", &bytes).unwrap(), chars("x"));
    }

    #[test]
    fn utf16_both_byte_orders() {
        let le = [0xFF, 0xFE, b'o', 0, b'k', 0];
        let be = [0xFE, 0xFF, 0, b'o', 0, b'k'];
        assert_eq!(decode("a", &le).unwrap(), chars("ok"));
        assert_eq!(decode("a", &be).unwrap(), chars("ok"));
    }

    #[test]
    fn utf16_surrogate_pair_decodes() {
        // U+1F600 as D83D DE00
        let bytes = [0xFE, 0xFF, 0xD8, 0x3D, 0xDE, 0x00];
        assert_eq!(decode("a", &bytes).unwrap(), vec!['\u{1F600}']);
    }

    #[test]
    fn utf32_be_decodes() {
        let bytes = [0x00, 0x00, 0xFE, 0xFF, 0, 0, 0, b'z'];
        assert_eq!(decode("a", &bytes).unwrap(), chars("z"));
    }

    #[test]
    fn malformed_input_cannot_be_read() {
        let cases: &[&[u8]] = &[
            &[b'a', 0xC3],
            &[0xFF, 0xFE, b'a'],
            &[0xFE, 0xFF, 0xDC, 0x00],
            &[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x11, 0x00, 0x00],
        ];
        for bytes in cases {
            let err = decode("bad.lark", bytes).unwrap_err();
            assert!(matches!(err, FatalError::CannotRead { .. }), "{bytes:?}: {err}");
        }
    }

    #[test]
    fn missing_file_cannot_be_opened() {
        let err = load(Path::new("/definitely/not/here.lark")).unwrap_err();
        assert!(matches!(err, FatalError::CannotOpen { .. }));
    }

    #[test]
    fn load_reads_and_decodes() {
        let path = unique_temp_file("load");
        std::fs::write(&path, "total = 1\n").unwrap();
        let result = load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(result.unwrap(), chars("total = 1\n"));
    }
}
