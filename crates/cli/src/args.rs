//! Authority flags shared by every subcommand

use anyhow::{Context, Result};
use capstore_config::{AuthorityConfig, AuthorityConfigBuilder};
use capstore_core::Vocabulary;
use clap::Args;
use std::time::Duration;

/// Flags override the matching `CAPSTORE_*` environment variables
#[derive(Args, Debug, Default)]
pub struct AuthorityArgs {
    /// Protocol the authority is reached through (http or https)
    #[arg(long, global = true)]
    pub protocol: Option<String>,

    /// Host name to bind and to bind tokens to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Shared signing secret; a random key is generated when unset
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Token lifetime in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub token_ttl: Option<u64>,

    /// Verb table (standard or two-step)
    #[arg(long, global = true)]
    pub vocabulary: Option<Vocabulary>,

    /// Report incomplete objects as missing (`--conceal-incomplete false`
    /// turns it off again)
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub conceal_incomplete: Option<bool>,
}

impl AuthorityArgs {
    fn into_builder(self) -> AuthorityConfigBuilder {
        let mut builder = AuthorityConfigBuilder::new();
        if let Some(protocol) = self.protocol {
            builder = builder.with_protocol(protocol);
        }
        if let Some(host) = self.host {
            builder = builder.with_hostname(host);
        }
        if let Some(port) = self.port {
            builder = builder.with_port(port);
        }
        if let Some(secret) = self.secret {
            builder = builder.with_secret(&secret);
        }
        if let Some(ttl) = self.token_ttl {
            builder = builder.with_token_lifetime(Duration::from_secs(ttl));
        }
        if let Some(vocabulary) = self.vocabulary {
            builder = builder.with_vocabulary(vocabulary);
        }
        if let Some(conceal) = self.conceal_incomplete {
            builder = builder.with_conceal_incomplete(conceal);
        }
        builder
    }

    /// Layer the flags over the environment and validate the result
    pub fn resolve(self) -> Result<AuthorityConfig> {
        let from_env =
            AuthorityConfigBuilder::from_env().context("Invalid authority environment")?;
        from_env
            .merge(self.into_builder())
            .build()
            .context("Invalid authority configuration")
    }
}
