//! Archive packager: serializes an [`AssetBundle`] into a ZIP byte stream.
//!
//! Compression is CPU-bound; async callers run [`package_archive`] inside
//! `tokio::task::spawn_blocking`.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::export::bundle::{AssetBundle, PLACEHOLDER_NAME};

pub const PACKAGE_SUFFIX: &str = "_Website_Package";
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Writes every bundle file into an in-memory ZIP.
///
/// Entries carry a fixed timestamp, so equal bundles produce equal archives.
/// Any write error discards the buffer; callers never see a partial archive.
pub fn package_archive(bundle: &AssetBundle) -> zip::result::ZipResult<Vec<u8>> {
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(bundle.total_bytes() / 2)));
    for file in &bundle.files {
        writer.start_file(file.path, options)?;
        writer.write_all(file.contents.as_bytes())?;
    }
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Download filename for an owner, e.g. `Alex_Johnson_Website_Package.zip`.
///
/// Runs of non-alphanumeric characters collapse to one `_`; leading and trailing
/// separators are dropped. Letters outside ASCII are kept. A name with nothing
/// left falls back to the placeholder.
pub fn archive_filename(owner_name: &str) -> String {
    let mut stem = String::with_capacity(owner_name.len());
    let mut pending_separator = false;
    for c in owner_name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !stem.is_empty() {
                stem.push('_');
            }
            pending_separator = false;
            stem.push(c);
        } else {
            pending_separator = true;
        }
    }
    if stem.is_empty() {
        stem.push_str(PLACEHOLDER_NAME);
    }
    format!("{stem}{PACKAGE_SUFFIX}.{ARCHIVE_EXTENSION}")
}
