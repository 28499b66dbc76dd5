//! Token extraction and conflict resolution

use capstore_core::{Error, Result};

/// Pick the candidate token out of the header and query values.
///
/// When both are present they must be byte-identical: a proxy or cache that
/// honours only one of the two must never see a different grant than the
/// verifier.
pub fn extract_token<'a>(header: Option<&'a str>, query: Option<&'a str>) -> Result<&'a str> {
    match (header, query) {
        (Some(header), Some(query)) if header != query => Err(Error::ConflictingAuthorization),
        (Some(token), _) | (None, Some(token)) => Ok(token),
        (None, None) => Err(Error::MissingAuthorization),
    }
}
