//! Core error type definitions

/// Result type alias for capstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for capstore operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a header token nor a query token was presented
    MissingAuthorization,

    /// Header and query tokens were both presented and differ
    ConflictingAuthorization,

    /// Token could not be decoded into header, claims and signature
    MalformedToken { reason: String },

    /// Signature does not verify under the pinned algorithm and shared key
    InvalidSignature { reason: String },

    /// Token was signed by a different authority origin
    IssuerMismatch { expected: String, actual: String },

    /// Token validity window has ended
    Expired { expired_at: i64 },

    /// Token validity window has not started
    NotYetValid { not_before: i64 },

    /// Token grants a different operation than the verb implies
    OperationMismatch { granted: String, attempted: String },

    /// Token grants access to a different object name
    ResourceMismatch { granted: String, requested: String },

    /// Transport verb has no mapping in the active vocabulary
    UnsupportedVerb { verb: String },

    /// Operation is not a member of the active vocabulary
    UnsupportedOperation { operation: String },

    /// Object has no record
    NotFound { name: String },

    /// Object is reserved but not yet complete
    Incomplete { name: String },

    /// Configuration errors
    Configuration { message: String },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
