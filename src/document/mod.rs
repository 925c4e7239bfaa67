//! Translation document model and its JSON load/store boundary.

mod error;

use std::io::Write as _;
use std::path::Path;

use serde_json::{
    Map,
    Value,
};

pub use error::DocumentError;

/// A translation document: nested mappings with string leaves.
///
/// Backed by `serde_json`'s ordered map so rewritten files keep their key order.
pub type Document = Map<String, Value>;

/// Read a UTF-8 JSON file into a [`Document`].
///
/// # Errors
/// - [`DocumentError::FileNotFound`] if the file does not exist
/// - [`DocumentError::ReadFailure`] for any other I/O error
/// - [`DocumentError::MalformedDocument`] if the content is not valid JSON
/// - [`DocumentError::NotAnObject`] if the top-level value is not an object
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DocumentError::FileNotFound { path: path.to_path_buf() }
        } else {
            DocumentError::ReadFailure { path: path.to_path_buf(), source }
        }
    })?;

    parse_document(path, &content)
}

/// Parse JSON text into a [`Document`], attributing errors to `path`.
///
/// # Errors
/// See [`load_document`].
pub fn parse_document(path: &Path, content: &str) -> Result<Document, DocumentError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|source| DocumentError::MalformedDocument { path: path.to_path_buf(), source })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DocumentError::NotAnObject { path: path.to_path_buf() }),
    }
}

/// Serialize a document exactly as [`store_document`] writes it.
///
/// Two-space indentation, non-ASCII characters left unescaped, trailing newline.
///
/// # Errors
/// Returns the serializer error; this cannot happen for string-keyed maps in practice.
pub fn to_pretty_string(document: &Document) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

/// Atomically replace `path` with the serialized document.
///
/// The content is written to a temporary file in the same directory and then
/// renamed over the destination, so readers never observe a partial file.
///
/// # Errors
/// [`DocumentError::WriteFailure`] if the temporary file cannot be created,
/// written or persisted.
pub fn store_document(path: &Path, document: &Document) -> Result<(), DocumentError> {
    let write_failure =
        |source: std::io::Error| DocumentError::WriteFailure { path: path.to_path_buf(), source };

    let text = to_pretty_string(document).map_err(|e| write_failure(e.into()))?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_failure)?;
    temp.write_all(text.as_bytes()).map_err(write_failure)?;
    temp.as_file().sync_all().map_err(write_failure)?;
    temp.persist(path).map_err(|e| write_failure(e.error))?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "Document written");
    Ok(())
}
