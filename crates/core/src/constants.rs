//! Constants used throughout the capstore codebase

// Token claims
pub const OBJECT_RESOURCE_TYPE: &str = "object";
pub const TOKEN_ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "JWT";

// Token transport
pub const TOKEN_QUERY_PARAM: &str = "token";
pub const BEARER_PREFIX: &str = "Bearer ";

// Upper bound on a presented token, checked before any decoding
pub const MAX_TOKEN_LENGTH: usize = 4096;

// Default validity window for issued tokens (5 minutes)
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 300;

// Length of a generated signing key in bytes
pub const GENERATED_KEY_LENGTH: usize = 32;

// Route prefix for object resources
pub const OBJECTS_PATH_SEGMENT: &str = "objects";

// Defaults for the authority origin
pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;

// Environment variable names
pub const CAPSTORE_PROTOCOL_VAR: &str = "CAPSTORE_PROTOCOL";
pub const CAPSTORE_HOST_VAR: &str = "CAPSTORE_HOST";
pub const CAPSTORE_PORT_VAR: &str = "CAPSTORE_PORT";
pub const PORT_VAR: &str = "PORT";
pub const CAPSTORE_SECRET_VAR: &str = "CAPSTORE_SECRET";
pub const CAPSTORE_TOKEN_TTL_VAR: &str = "CAPSTORE_TOKEN_TTL_SECS";
pub const CAPSTORE_VOCABULARY_VAR: &str = "CAPSTORE_VOCABULARY";
pub const CAPSTORE_CONCEAL_INCOMPLETE_VAR: &str = "CAPSTORE_CONCEAL_INCOMPLETE";
