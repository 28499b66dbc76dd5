//! Builder methods for creating errors with context, and classification helpers

use super::types::Error;

// Helper methods for creating errors with context
impl Error {
    /// Create a malformed token error
    #[must_use]
    pub fn malformed_token(reason: impl Into<String>) -> Self {
        Error::MalformedToken {
            reason: reason.into(),
        }
    }

    /// Create an invalid signature error
    #[must_use]
    pub fn invalid_signature(reason: impl Into<String>) -> Self {
        Error::InvalidSignature {
            reason: reason.into(),
        }
    }

    /// Create an issuer mismatch error
    #[must_use]
    pub fn issuer_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::IssuerMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an operation mismatch error
    #[must_use]
    pub fn operation_mismatch(granted: impl Into<String>, attempted: impl Into<String>) -> Self {
        Error::OperationMismatch {
            granted: granted.into(),
            attempted: attempted.into(),
        }
    }

    /// Create a resource mismatch error
    #[must_use]
    pub fn resource_mismatch(granted: impl Into<String>, requested: impl Into<String>) -> Self {
        Error::ResourceMismatch {
            granted: granted.into(),
            requested: requested.into(),
        }
    }

    /// Create an unsupported verb error
    #[must_use]
    pub fn unsupported_verb(verb: impl Into<String>) -> Self {
        Error::UnsupportedVerb { verb: verb.into() }
    }

    /// Create an unsupported operation error
    #[must_use]
    pub fn unsupported_operation(operation: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Error::NotFound { name: name.into() }
    }

    /// Create an incomplete object error
    #[must_use]
    pub fn incomplete(name: impl Into<String>) -> Self {
        Error::Incomplete { name: name.into() }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Stable taxonomy code handed to the transport layer.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingAuthorization => "missing_authorization",
            Error::ConflictingAuthorization => "conflicting_authorization",
            Error::MalformedToken { .. } => "malformed_token",
            Error::InvalidSignature { .. } => "invalid_signature",
            Error::IssuerMismatch { .. } => "issuer_mismatch",
            Error::Expired { .. } => "expired",
            Error::NotYetValid { .. } => "not_yet_valid",
            Error::OperationMismatch { .. } => "operation_mismatch",
            Error::ResourceMismatch { .. } => "resource_mismatch",
            Error::UnsupportedVerb { .. } => "unsupported_verb",
            Error::UnsupportedOperation { .. } => "unsupported_operation",
            Error::NotFound { .. } => "not_found",
            Error::Incomplete { .. } => "incomplete",
            Error::Configuration { .. } => "configuration",
            Error::Json { .. } => "json",
        }
    }

    /// Whether the failure stems from caller-supplied credentials.
    ///
    /// These are always client-class rejections: the request is refused and
    /// nothing in the store is touched.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingAuthorization
                | Error::ConflictingAuthorization
                | Error::MalformedToken { .. }
                | Error::InvalidSignature { .. }
                | Error::IssuerMismatch { .. }
                | Error::Expired { .. }
                | Error::NotYetValid { .. }
                | Error::OperationMismatch { .. }
                | Error::ResourceMismatch { .. }
        )
    }

    /// Whether the failure reports an object the caller cannot read.
    pub fn is_missing_object(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::Incomplete { .. })
    }
}
