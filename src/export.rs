//! Turn live charts and insight text into downloadable blobs.

use image::{ImageFormat, RgbImage};
use log::info;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::session::{RenderingSession, SurfaceHost};

pub const PNG_MIME: &str = "image/png";
pub const TEXT_MIME: &str = "text/plain";
pub const INSIGHTS_FILE_NAME: &str = "ai-insights.txt";

/// A named byte payload, ready to be saved or handed to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Blob {
    /// Write the blob into `dir` under its own file name and return the full path.
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// PNG snapshot of the chart currently live in `slot`, named `<geometry>-chart.png`.
pub fn export_image<H: SurfaceHost>(
    session: &RenderingSession<H>,
    slot: usize,
) -> Result<Blob, ExportError> {
    let instance = session
        .instance(slot)
        .ok_or(ExportError::NothingToExport { slot })?;
    let surface = instance.surface();
    let img = RgbImage::from_raw(surface.width(), surface.height(), surface.pixels().to_vec())
        .ok_or_else(|| ExportError::Encode("surface buffer does not match its size".into()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(Blob {
        file_name: format!("{}-chart.png", instance.geometry().name()),
        mime: PNG_MIME,
        bytes,
    })
}

/// Insight text as `ai-insights.txt`, byte for byte.
pub fn export_text(content: &str) -> Blob {
    Blob {
        file_name: INSIGHTS_FILE_NAME.to_string(),
        mime: TEXT_MIME,
        bytes: content.as_bytes().to_vec(),
    }
}

/// Export every slot independently; one failing slot never affects the others.
pub fn export_all<H: SurfaceHost>(
    session: &RenderingSession<H>,
) -> Vec<(usize, Result<Blob, ExportError>)> {
    session
        .live_geometries()
        .into_iter()
        .map(|(slot, _)| (slot, export_image(session, slot)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_blob_is_verbatim() {
        let b = export_text("line one\nline two ✓");
        assert_eq!(b.file_name, "ai-insights.txt");
        assert_eq!(b.mime, "text/plain");
        assert_eq!(b.bytes, "line one\nline two ✓".as_bytes());
    }

    #[test]
    fn save_in_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_text("hi").save_in(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hi");
    }
}
