//! Authority configuration and its builder
//!
//! `AuthorityConfig` is immutable after construction and cheap to clone, so
//! the token codec, the signed-URL issuer and the HTTP layer can each hold a
//! copy.

use capstore_core::{
    Error, Result, SigningKey, Vocabulary, DEFAULT_HOSTNAME, DEFAULT_PORT, DEFAULT_PROTOCOL,
    DEFAULT_TOKEN_LIFETIME_SECS, GENERATED_KEY_LENGTH, OBJECTS_PATH_SEGMENT,
};
use rand::Rng;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Resolved configuration of the signing authority
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    /// Scheme the authority is reached through (`http` or `https`)
    pub protocol: String,
    /// Host name the authority is reached through
    pub hostname: String,
    /// Port the authority listens on
    pub port: u16,
    /// Key shared by issuance and verification
    pub signing_key: SigningKey,
    /// Validity window of issued tokens
    pub token_lifetime: Duration,
    /// Active verb table
    pub vocabulary: Vocabulary,
    /// Report incomplete objects exactly like missing ones
    pub conceal_incomplete: bool,
    base_url: Url,
}

impl AuthorityConfig {
    /// Create a builder with default settings
    pub fn builder() -> AuthorityConfigBuilder {
        AuthorityConfigBuilder::new()
    }

    /// Canonical origin (scheme, host and port) tokens are bound to.
    ///
    /// Default ports are elided, so `http://localhost:80` becomes
    /// `http://localhost`.
    pub fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }

    /// Root URL of the authority
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resource URL of a named object, with the name percent-encoded as a
    /// single path segment
    pub fn objects_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::configuration(format!("'{}' cannot be a base URL", self.base_url))
            })?
            .clear()
            .push(OBJECTS_PATH_SEGMENT)
            .push(name);
        Ok(url)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

/// Builder for creating authority configurations
#[derive(Debug, Default)]
pub struct AuthorityConfigBuilder {
    pub(crate) protocol: Option<String>,
    pub(crate) hostname: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) signing_key: Option<SigningKey>,
    pub(crate) token_lifetime: Option<Duration>,
    pub(crate) vocabulary: Option<Vocabulary>,
    pub(crate) conceal_incomplete: Option<bool>,
}

impl AuthorityConfigBuilder {
    /// Create a new builder with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol; a trailing `:` is accepted
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_signing_key(mut self, key: SigningKey) -> Self {
        self.signing_key = Some(key);
        self
    }

    /// Set the signing key from a UTF-8 secret
    pub fn with_secret(self, secret: &str) -> Self {
        self.with_signing_key(SigningKey::from_secret(secret))
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn with_conceal_incomplete(mut self, conceal: bool) -> Self {
        self.conceal_incomplete = Some(conceal);
        self
    }

    /// Overlay every value set on `other` on top of this builder
    pub fn merge(mut self, other: AuthorityConfigBuilder) -> Self {
        self.protocol = other.protocol.or(self.protocol);
        self.hostname = other.hostname.or(self.hostname);
        self.port = other.port.or(self.port);
        self.signing_key = other.signing_key.or(self.signing_key.take());
        self.token_lifetime = other.token_lifetime.or(self.token_lifetime);
        self.vocabulary = other.vocabulary.or(self.vocabulary);
        self.conceal_incomplete = other.conceal_incomplete.or(self.conceal_incomplete);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<AuthorityConfig> {
        let protocol = self
            .protocol
            .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string())
            .trim_end_matches(':')
            .to_ascii_lowercase();
        if protocol != "http" && protocol != "https" {
            return Err(Error::configuration(format!(
                "unsupported protocol '{protocol}', expected 'http' or 'https'"
            )));
        }

        let hostname = self
            .hostname
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string());
        if hostname.trim().is_empty() {
            return Err(Error::configuration("hostname must not be empty"));
        }

        let port = self.port.unwrap_or(DEFAULT_PORT);

        let token_lifetime = self
            .token_lifetime
            .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS));
        if token_lifetime.as_secs() == 0 {
            return Err(Error::configuration(
                "token lifetime must be at least one second",
            ));
        }

        let signing_key = match self.signing_key {
            Some(key) if key.is_empty() => {
                return Err(Error::configuration("signing key must not be empty"));
            }
            Some(key) => key,
            None => {
                warn!("No signing secret configured, generated an ephemeral key; issued tokens will not survive a restart");
                generate_signing_key()
            }
        };

        let base_url = Url::parse(&format!("{protocol}://{hostname}:{port}/")).map_err(|e| {
            Error::configuration(format!("invalid authority address '{hostname}:{port}': {e}"))
        })?;

        Ok(AuthorityConfig {
            protocol,
            hostname,
            port,
            signing_key,
            token_lifetime,
            vocabulary: self.vocabulary.unwrap_or_default(),
            conceal_incomplete: self.conceal_incomplete.unwrap_or(false),
            base_url,
        })
    }
}

fn generate_signing_key() -> SigningKey {
    let mut rng = rand::thread_rng();
    let mut key = vec![0u8; GENERATED_KEY_LENGTH];
    rng.fill(&mut key[..]);
    SigningKey::new(key)
}
