use std::path::Path;

use crate::constants::LOSSLESS_EXTENSIONS;

/// Render bytes for error messages: printable ASCII as a byte string,
/// anything else as hex.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Number of whole bytes needed to hold `bits`.
#[inline]
pub fn bits_to_bytes_ceil(bits: u64) -> u64 {
    bits.div_ceil(8)
}

/// Lower-cased file extension, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// True when the path names a lossless raster format we accept.
pub fn is_lossless_path(path: &Path) -> bool {
    match extension_of(path) {
        Some(ext) => LOSSLESS_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_bytes_prints_ascii_or_hex() {
        assert_eq!(fmt_bytes(b"v1"), "b\"v1\"");
        assert_eq!(fmt_bytes(&[0x00, 0xff]), "0x00ff");
    }

    #[test]
    fn ceil_bytes() {
        assert_eq!(bits_to_bytes_ceil(0), 0);
        assert_eq!(bits_to_bytes_ceil(1), 1);
        assert_eq!(bits_to_bytes_ceil(176), 22);
        assert_eq!(bits_to_bytes_ceil(177), 23);
    }

    #[test]
    fn lossless_extensions_only() {
        assert!(is_lossless_path(Path::new("cover.PNG")));
        assert!(is_lossless_path(Path::new("a/b/scan.tiff")));
        assert!(!is_lossless_path(Path::new("photo.jpg")));
        assert!(!is_lossless_path(Path::new("noext")));
    }
}
