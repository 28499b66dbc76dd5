//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingAuthorization => write!(f, "no authorization token found"),
            Error::ConflictingAuthorization => write!(f, "conflicting authorization tokens"),
            Error::MalformedToken { reason } => write!(f, "malformed token: {reason}"),
            Error::InvalidSignature { reason } => write!(f, "invalid signature: {reason}"),
            Error::IssuerMismatch { expected, actual } => {
                write!(f, "token issuer '{actual}' does not match expected issuer '{expected}'")
            }
            Error::Expired { expired_at } => write!(f, "token expired at {expired_at}"),
            Error::NotYetValid { not_before } => {
                write!(f, "token is not valid before {not_before}")
            }
            Error::OperationMismatch { granted, attempted } => {
                write!(f, "this token is for {granted}, but used for {attempted}")
            }
            Error::ResourceMismatch { granted, requested } => {
                write!(f, "this token is for object '{granted}', but used for '{requested}'")
            }
            Error::UnsupportedVerb { verb } => write!(f, "unsupported method: {verb}"),
            Error::UnsupportedOperation { operation } => {
                write!(f, "unsupported operation: {operation}")
            }
            Error::NotFound { name } => write!(f, "object '{name}' not found"),
            Error::Incomplete { name } => write!(f, "object '{name}' found but not complete"),
            Error::Configuration { message } => write!(f, "configuration error: {message}"),
            Error::Json { message, .. } => write!(f, "JSON error: {message}"),
        }
    }
}
