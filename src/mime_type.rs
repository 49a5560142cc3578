//! Content types for attachments, looked up by file extension.
//!
//! The built-in table covers the usual mail attachments. More mappings can
//! be registered at runtime with [`add_extension_type`].

use crate::error::{Error, Result};
use crate::media_type::parse_media_type;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Built-in MIME type mappings (all lowercase extensions).
static BUILTIN_TYPES: &[(&str, &str)] = &[
    (".avif", "image/avif"),
    (".csv", "text/csv"),
    (".doc", "application/msword"),
    (".docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    (".eml", "message/rfc822"),
    (".gif", "image/gif"),
    (".gz", "application/gzip"),
    (".htm", "text/html"),
    (".html", "text/html"),
    (".ics", "text/calendar"),
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".json", "application/json"),
    (".md", "text/markdown"),
    (".mp3", "audio/mpeg"),
    (".mp4", "video/mp4"),
    (".pdf", "application/pdf"),
    (".png", "image/png"),
    (".svg", "image/svg+xml"),
    (".txt", "text/plain"),
    (".vcf", "text/vcard"),
    (".webp", "image/webp"),
    (".xls", "application/vnd.ms-excel"),
    (".xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    (".xml", "text/xml"),
    (".zip", "application/zip"),
];

/// Maps lowercase file extensions to MIME types.
static MIME_TYPES: Lazy<RwLock<HashMap<String, String>>> = Lazy::new(|| {
    RwLock::new(
        BUILTIN_TYPES
            .iter()
            .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
            .collect(),
    )
});

/// Returns the MIME type associated with the file extension `ext`.
///
/// The extension should begin with a leading dot, as in ".pdf". Lookup
/// ignores case.
///
/// # Examples
///
/// ```
/// use bead_mail::type_by_extension;
///
/// assert_eq!(type_by_extension(".PDF"), Some("application/pdf".to_string()));
/// assert_eq!(type_by_extension(".unknown"), None);
/// ```
pub fn type_by_extension(ext: &str) -> Option<String> {
    let mime_types = MIME_TYPES.read().unwrap_or_else(PoisonError::into_inner);
    mime_types.get(&ext.to_lowercase()).cloned()
}

/// Returns the MIME type for a file name, judged by its last extension.
pub fn type_by_filename(filename: &str) -> Option<String> {
    let dot = filename.rfind('.')?;
    type_by_extension(&filename[dot..])
}

/// Sets the MIME type associated with the extension `ext`.
///
/// The extension must begin with a leading dot and the type must be a valid
/// media type.
pub fn add_extension_type(ext: &str, mime_type: &str) -> Result<()> {
    if !ext.starts_with('.') || ext.len() < 2 {
        return Err(Error::invalid_argument(format!(
            "extension {:?} missing leading dot",
            ext
        )));
    }
    parse_media_type(mime_type)?;

    let mut mime_types = MIME_TYPES.write().unwrap_or_else(PoisonError::into_inner);
    mime_types.insert(ext.to_lowercase(), mime_type.to_string());
    Ok(())
}
