use anyhow::{Context, Result};
use capstore_config::AuthorityConfig;
use capstore_token::{HmacTokenCodec, SignedUrlIssuer};
use std::sync::Arc;

pub fn execute(config: AuthorityConfig, operation: &str, name: &str) -> Result<()> {
    let codec = Arc::new(HmacTokenCodec::from_config(&config));
    let issuer = SignedUrlIssuer::new(codec, config);

    let signed = issuer
        .issue_signed_url(operation, name)
        .with_context(|| format!("Cannot sign {operation} on '{name}'"))?;
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}
