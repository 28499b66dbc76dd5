//! Capability tokens for capstore
//!
//! A token grants exactly one operation on exactly one named object, is
//! bound to the origin of the authority that signed it and is valid for a
//! short window. This crate covers the whole life of such a token:
//!
//! - **`codec`**: signs and verifies compact HS256 tokens
//! - **`extract`**: picks the candidate token out of a request
//! - **`authorize`**: the pure authorization decision for a request
//! - **`issuer`**: mints signed URLs for a given operation and name
//! - **`clock`**: time source, swappable in tests

pub mod authorize;
pub mod claims;
pub mod clock;
pub mod codec;
pub mod extract;
pub mod issuer;

pub use authorize::Authorizer;
pub use claims::Claims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{HmacTokenCodec, TokenIssuer, TokenVerifier};
pub use extract::extract_token;
pub use issuer::{IssuanceAuthority, OpenAuthority, SignedUrl, SignedUrlIssuer};
