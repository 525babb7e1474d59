/// Object id syntax validation.
///
/// E-file object ids are 18-digit tokens, e.g. `201642229349300909`. The first
/// four digits are the processing year. An EIN (9 digits) is a frequent mix-up,
/// so anything that is not exactly 18 digits is rejected.
use super::FilingError;

/// Number of digits in an e-file object id.
pub const OBJECT_ID_LEN: usize = 18;

/// Validate an object id and return it in canonical (trimmed) form.
///
/// # Errors
///
/// Returns `FilingError::InvalidIdentifier` when the trimmed reference is not
/// exactly [`OBJECT_ID_LEN`] ASCII digits.
pub fn validate_object_id(reference: &str) -> Result<String, FilingError> {
    let candidate = reference.trim();
    if candidate.len() == OBJECT_ID_LEN && candidate.bytes().all(|b| b.is_ascii_digit()) {
        Ok(candidate.to_owned())
    } else {
        Err(FilingError::InvalidIdentifier {
            reference: reference.to_owned(),
        })
    }
}
