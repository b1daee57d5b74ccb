#![forbid(unsafe_code)]

//! Metadata for files handed to the application by a drag-and-drop or
//! browse interaction.
//!
//! Terminals report drops as bare paths. The backend stats each path and
//! assembles a [`DroppedFile`], so widgets downstream only ever see
//! name/size/MIME metadata plus the path as an opaque handle. Widgets never
//! open or read the file themselves.

use std::path::{Path, PathBuf};

/// Static extension → MIME lookup used when assembling drop metadata.
///
/// Read-only configuration: extend by editing this table, not at runtime.
const MIME_TABLE: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("csv", "text/csv"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("zip", "application/zip"),
];

/// Fallback MIME type for unknown extensions.
pub const MIME_UNKNOWN: &str = "application/octet-stream";

/// Look up the MIME type for a file extension (without the dot).
///
/// Case-insensitive. Unknown extensions map to [`MIME_UNKNOWN`].
#[must_use]
pub fn mime_for_extension(ext: &str) -> &'static str {
    let ext = ext.to_ascii_lowercase();
    MIME_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, m)| *m)
        .unwrap_or(MIME_UNKNOWN)
}

/// A file delivered by drag-and-drop or a browse dialog.
///
/// `path` is an opaque handle owned by the caller; the widgets only consume
/// the metadata fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// Display name (final path component).
    pub name: String,
    /// Size in bytes.
    pub len: u64,
    /// MIME type, derived from the extension at assembly time.
    pub mime: String,
    /// Opaque handle to the underlying file.
    pub path: PathBuf,
}

impl DroppedFile {
    /// Create metadata directly. Used by backends with richer drop
    /// information and by tests.
    #[must_use]
    pub fn new(name: impl Into<String>, len: u64, mime: impl Into<String>) -> Self {
        let name = name.into();
        let path = PathBuf::from(&name);
        Self {
            name,
            len,
            mime: mime.into(),
            path,
        }
    }

    /// Assemble metadata from a path by statting it.
    ///
    /// The MIME type is derived from the extension via the static table.
    /// Returns an error if the file cannot be statted.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let meta = std::fs::metadata(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = path
            .extension()
            .map(|e| mime_for_extension(&e.to_string_lossy()))
            .unwrap_or(MIME_UNKNOWN)
            .to_string();
        Ok(Self {
            name,
            len: meta.len(),
            mime,
            path,
        })
    }

    /// The file's extension (without the dot), lowercased, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }
}
