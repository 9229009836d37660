//! Loading analysis input from the command line
//!
//! Documents on disk are classified by extension: PDFs and slide decks are
//! sent as base64 inline data, everything else is read as contract text.
//! Deep links carry a `url` query parameter naming the site to audit.

use crate::analysis::request::AnalysisInput;
use crate::error::{LegalisError, Result};
use base64::Engine;
use std::path::Path;
use url::Url;

/// Query parameter of a deep link naming the address to analyze
pub const DEEP_LINK_PARAM: &str = "url";

/// MIME type for a document path, by extension
///
/// # Examples
///
/// ```
/// use legalis::analysis::input::mime_type_for_path;
/// use std::path::Path;
///
/// assert_eq!(mime_type_for_path(Path::new("terms.PDF")), "application/pdf");
/// assert_eq!(mime_type_for_path(Path::new("notes.md")), "text/markdown");
/// assert_eq!(mime_type_for_path(Path::new("blob")), "application/octet-stream");
/// ```
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// Whether a MIME type must be sent as binary inline data
pub fn is_binary_document(mime_type: &str) -> bool {
    mime_type == "application/pdf"
        || mime_type.contains("powerpoint")
        || mime_type.contains("presentation")
}

/// Load a document from disk as analysis input
///
/// # Arguments
///
/// * `path` - Document path
/// * `max_bytes` - Largest accepted file size
///
/// # Errors
///
/// Returns `LegalisError::Validation` for oversized or non-UTF-8 text files
/// and IO errors for unreadable paths
pub async fn load_document(path: &Path, max_bytes: u64) -> Result<AnalysisInput> {
    let metadata = tokio::fs::metadata(path).await.map_err(LegalisError::from)?;
    if !metadata.is_file() {
        return Err(
            LegalisError::Validation(format!("{} is not a file.", path.display())).into(),
        );
    }
    if metadata.len() > max_bytes {
        return Err(LegalisError::Validation(format!(
            "{} is {} bytes; the limit is {} bytes.",
            path.display(),
            metadata.len(),
            max_bytes
        ))
        .into());
    }

    let mime_type = mime_type_for_path(path);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string());

    if is_binary_document(mime_type) {
        let bytes = tokio::fs::read(path).await.map_err(LegalisError::from)?;
        tracing::debug!(
            "Loaded binary document {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );
        return Ok(AnalysisInput::File {
            data: base64::engine::general_purpose::STANDARD.encode(&bytes),
            mime_type: mime_type.to_string(),
            file_name,
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(LegalisError::from)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        LegalisError::Validation(format!(
            "{} is not a text document; use a .txt, .md, .pdf, .ppt or .pptx file.",
            path.display()
        ))
    })?;
    tracing::debug!("Loaded text document {}", path.display());
    Ok(AnalysisInput::Text(text))
}

/// Extract the analysis target from a deep link
///
/// Accepts absolute links (`https://app.example/?url=example.com`) and bare
/// query strings (`?url=example.com`).
///
/// # Errors
///
/// Returns `LegalisError::Validation` if the link cannot be parsed or has no
/// non-empty `url` parameter
///
/// # Examples
///
/// ```
/// use legalis::analysis::input::target_from_deep_link;
///
/// let target = target_from_deep_link("https://legalis.app/?url=https%3A%2F%2Facme.test").unwrap();
/// assert_eq!(target, "https://acme.test");
/// ```
pub fn target_from_deep_link(link: &str) -> Result<String> {
    let parsed = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("legalis://open/")
            .and_then(|base| base.join(link))
            .map_err(|e| LegalisError::Validation(format!("Invalid deep link: {}", e)))?,
        Err(e) => {
            return Err(LegalisError::Validation(format!("Invalid deep link: {}", e)).into());
        }
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == DEEP_LINK_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            LegalisError::Validation(format!(
                "Deep link has no '{}' parameter: {}",
                DEEP_LINK_PARAM, link
            ))
            .into()
        })
}
