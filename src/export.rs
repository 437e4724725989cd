//! Export facade: encode a document and hand the bytes to the filesystem.
//!
//! This is the crate's single catch point. The encoder itself propagates
//! every failure unmodified; here a failed build is reported through the
//! logging sink and produces no file, so callers never observe a panic or a
//! partial document.

use std::path::Path;

use crate::definition::DocumentDefinition;
use crate::encoder::DocumentEncoder;
use crate::image::RasterHost;

/// Encode `doc` and save it under `path`.
///
/// Returns `true` when the file was written. On any failure (an image that
/// does not decode, a filesystem error) the failure is logged and no
/// partial document is left behind the encoder's back.
pub fn export_to_file(
    doc: &DocumentDefinition,
    host: &dyn RasterHost,
    path: impl AsRef<Path>,
) -> bool {
    let path = path.as_ref();
    let bytes = match DocumentEncoder::new(host).encode(doc) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("unable to generate PDF for {}: {}", path.display(), err);
            return false;
        },
    };
    match std::fs::write(path, &bytes) {
        Ok(()) => {
            log::debug!("saved {} byte PDF to {}", bytes.len(), path.display());
            true
        },
        Err(err) => {
            log::error!("unable to save PDF to {}: {}", path.display(), err);
            false
        },
    }
}
