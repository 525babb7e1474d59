/// Identifier resolution: user reference → (object id, optional file path).
use std::path::{Path, PathBuf};

use super::{FilingError, validate_object_id};

/// Marker that makes a reference count as a file path.
///
/// Matched anywhere in the reference, not only as a suffix, so an id-like token
/// containing `.xml` in the middle is treated as a path.
pub const XML_MARKER: &str = ".xml";

/// A reference resolved to a filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// Object id, always non-empty.
    pub object_id: String,
    /// Set only when the reference named a local file.
    pub filepath: Option<PathBuf>,
}

/// Resolve a user-supplied reference.
///
/// Paths (anything containing [`XML_MARKER`]) yield the token before the first
/// `_` of the base file name as object id, e.g. `/tmp/93432084004350_public.xml`
/// → `93432084004350`. Everything else must pass [`validate_object_id`].
///
/// # Errors
///
/// Returns `FilingError::InvalidIdentifier` when the object id cannot be
/// derived or fails validation.
pub fn resolve(reference: &str) -> Result<ResolvedReference, FilingError> {
    if !reference.contains(XML_MARKER) {
        return Ok(ResolvedReference {
            object_id: validate_object_id(reference)?,
            filepath: None,
        });
    }

    let base = Path::new(reference)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(reference);
    let object_id = base.split('_').next().unwrap_or_default();

    if object_id.is_empty() {
        return Err(FilingError::InvalidIdentifier {
            reference: reference.to_owned(),
        });
    }

    Ok(ResolvedReference {
        object_id: object_id.to_owned(),
        filepath: Some(PathBuf::from(reference)),
    })
}
