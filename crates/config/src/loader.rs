//! Environment loading for the authority configuration
//!
//! Every variable is optional. Values that are present but unparsable are
//! reported as configuration errors rather than silently replaced by a
//! default.

use crate::config::AuthorityConfigBuilder;
use capstore_core::{
    Error, Result, SigningKey, Vocabulary, CAPSTORE_CONCEAL_INCOMPLETE_VAR, CAPSTORE_HOST_VAR,
    CAPSTORE_PORT_VAR, CAPSTORE_PROTOCOL_VAR, CAPSTORE_SECRET_VAR, CAPSTORE_TOKEN_TTL_VAR,
    CAPSTORE_VOCABULARY_VAR, PORT_VAR,
};
use std::time::Duration;
use tracing::debug;

impl AuthorityConfigBuilder {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new();

        if let Some(protocol) = lookup(CAPSTORE_PROTOCOL_VAR) {
            builder = builder.with_protocol(protocol);
        }
        if let Some(hostname) = lookup(CAPSTORE_HOST_VAR) {
            builder = builder.with_hostname(hostname);
        }

        let port = lookup(CAPSTORE_PORT_VAR)
            .map(|value| (CAPSTORE_PORT_VAR, value))
            .or_else(|| lookup(PORT_VAR).map(|value| (PORT_VAR, value)));
        if let Some((variable, value)) = port {
            builder = builder.with_port(parse_number(variable, &value)?);
        }

        if let Some(secret) = lookup(CAPSTORE_SECRET_VAR) {
            builder = builder.with_signing_key(SigningKey::from_secret(&secret));
        }
        if let Some(ttl) = lookup(CAPSTORE_TOKEN_TTL_VAR) {
            let secs: u64 = parse_number(CAPSTORE_TOKEN_TTL_VAR, &ttl)?;
            builder = builder.with_token_lifetime(Duration::from_secs(secs));
        }
        if let Some(vocabulary) = lookup(CAPSTORE_VOCABULARY_VAR) {
            builder = builder.with_vocabulary(vocabulary.parse::<Vocabulary>()?);
        }
        if let Some(conceal) = lookup(CAPSTORE_CONCEAL_INCOMPLETE_VAR) {
            builder = builder.with_conceal_incomplete(parse_bool(
                CAPSTORE_CONCEAL_INCOMPLETE_VAR,
                &conceal,
            )?);
        }

        debug!("Loaded authority settings from environment");
        Ok(builder)
    }
}

fn parse_number<T: std::str::FromStr>(variable: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::configuration(format!("{variable} must be a number, got '{value}'"))
    })
}

fn parse_bool(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::configuration(format!(
            "{variable} must be a boolean, got '{value}'"
        ))),
    }
}
