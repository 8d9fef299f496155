//! Loading YAML text from files or stdin for the command-line tool.
//!
//! The engine itself is text-in, text-out; this module only gets bytes to
//! it. Gzipped files are detected by their `.gz` extension, gzipped stdin
//! by the gzip magic bytes.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a document from the filesystem, decompressing `.gz` files.
///
/// # Errors
///
/// Returns an error when the file cannot be read, is not valid gzip
/// despite its extension, or does not decode as UTF-8.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "gz");
    if gzipped {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Reads a document from standard input until EOF, decompressing when the
/// stream starts with the gzip magic bytes.
///
/// # Errors
///
/// Returns an error when reading stdin fails or the content does not
/// decode as UTF-8.
pub fn load_from_stdin() -> Result<String> {
    use std::io::Read;

    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("failed to read from stdin")?;

    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip(&buffer)
    } else {
        String::from_utf8(buffer).context("stdin is not valid UTF-8")
    }
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decompress_gzip(&bytes)
        .with_context(|| format!("failed to decompress {}", path.display()))
}

fn decompress_gzip(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("failed to decompress gzip data")?;
    Ok(content)
}
