//! Inbound request descriptor shared by the authorization pipeline and the
//! object service

use bytes::Bytes;

/// A request as handed over by the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRequest {
    /// Transport verb, e.g. `"PUT"`
    pub verb: String,
    /// Token presented in the authorization header, if any
    pub header_token: Option<String>,
    /// Token presented as the `token` query parameter, if any
    pub query_token: Option<String>,
    /// Object name the request targets
    pub target_name: String,
    /// Request body, only meaningful for reservations
    pub body: Option<Bytes>,
}

impl ObjectRequest {
    pub fn new(verb: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            header_token: None,
            query_token: None,
            target_name: target_name.into(),
            body: None,
        }
    }

    pub fn with_header_token(mut self, token: impl Into<String>) -> Self {
        self.header_token = Some(token.into());
        self
    }

    pub fn with_query_token(mut self, token: impl Into<String>) -> Self {
        self.query_token = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}
