//! Signed-URL issuance
//!
//! Deciding *who* may mint a capability is left to an [`IssuanceAuthority`].
//! The default [`OpenAuthority`] grants every request, standing in for a real
//! upstream authority.

use crate::codec::TokenIssuer;
use capstore_config::AuthorityConfig;
use capstore_core::{Operation, Result, TOKEN_QUERY_PARAM};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Gate consulted before a capability is minted
pub trait IssuanceAuthority: Send + Sync {
    fn permit(&self, operation: Operation, name: &str) -> Result<()>;
}

/// Permits every issuance request
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAuthority;

impl IssuanceAuthority for OpenAuthority {
    fn permit(&self, _operation: Operation, _name: &str) -> Result<()> {
        Ok(())
    }
}

/// A freshly minted capability in both presentation forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrl {
    /// Bare token, for header-based presentation
    pub token: String,
    /// Resource URL without the token
    pub url: String,
    /// Resource URL carrying the token as a query parameter
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

/// Mints signed URLs for the active vocabulary
pub struct SignedUrlIssuer {
    issuer: Arc<dyn TokenIssuer>,
    authority: Arc<dyn IssuanceAuthority>,
    config: AuthorityConfig,
}

impl SignedUrlIssuer {
    pub fn new(issuer: Arc<dyn TokenIssuer>, config: AuthorityConfig) -> Self {
        Self {
            issuer,
            authority: Arc::new(OpenAuthority),
            config,
        }
    }

    /// Replace the issuance gate
    pub fn with_authority(mut self, authority: Arc<dyn IssuanceAuthority>) -> Self {
        self.authority = authority;
        self
    }

    /// Mint a token and URLs for `operation` on `name`.
    ///
    /// The operation is validated against the active vocabulary before
    /// anything is signed.
    pub fn issue_signed_url(&self, operation: &str, name: &str) -> Result<SignedUrl> {
        let operation = self.config.vocabulary.validate_operation(operation)?;
        self.authority.permit(operation, name)?;

        let mut url = self.config.objects_url(name)?;
        let token = self.issuer.issue(operation, name, &self.config.origin())?;

        // Capture the bare URL before the token is attached
        let bare_url = url.to_string();
        url.query_pairs_mut().append_pair(TOKEN_QUERY_PARAM, &token);

        info!(operation = %operation, name, "Issued signed object URL");

        Ok(SignedUrl {
            token,
            url: bare_url,
            signed_url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{HmacTokenCodec, TokenVerifier};
    use capstore_core::{Error, Vocabulary};

    fn config(vocabulary: Vocabulary) -> AuthorityConfig {
        AuthorityConfig::builder()
            .with_secret("Spree")
            .with_vocabulary(vocabulary)
            .build()
            .unwrap()
    }

    #[test]
    fn test_issues_token_and_both_urls() {
        let config = config(Vocabulary::Standard);
        let codec = Arc::new(HmacTokenCodec::from_config(&config));
        let issuer = SignedUrlIssuer::new(codec.clone(), config.clone());

        let signed = issuer.issue_signed_url("get", "a").unwrap();
        assert_eq!(signed.url, "http://localhost:3000/objects/a");
        assert_eq!(
            signed.signed_url,
            format!("http://localhost:3000/objects/a?token={}", signed.token)
        );

        let claims = codec.verify(&signed.token, &config.origin()).unwrap();
        assert_eq!(claims.operation, Operation::Get);
        assert_eq!(claims.name, "a");
    }

    #[test]
    fn test_rejects_operations_outside_vocabulary() {
        let config = config(Vocabulary::Standard);
        let issuer =
            SignedUrlIssuer::new(Arc::new(HmacTokenCodec::from_config(&config)), config);

        for operation in ["junk", "complete", "GET"] {
            assert!(matches!(
                issuer.issue_signed_url(operation, "a"),
                Err(Error::UnsupportedOperation { .. })
            ));
        }
    }

    #[test]
    fn test_two_step_operations_are_issued() {
        let config = config(Vocabulary::TwoStep);
        let issuer =
            SignedUrlIssuer::new(Arc::new(HmacTokenCodec::from_config(&config)), config);

        for operation in ["initiate", "complete", "retrieve", "delete"] {
            assert!(issuer.issue_signed_url(operation, "a").is_ok());
        }
        assert!(issuer.issue_signed_url("create", "a").is_err());
    }

    struct DenyAll;

    impl IssuanceAuthority for DenyAll {
        fn permit(&self, operation: Operation, _name: &str) -> Result<()> {
            Err(Error::unsupported_operation(operation.as_str()))
        }
    }

    #[test]
    fn test_custom_authority_can_refuse() {
        let config = config(Vocabulary::Standard);
        let issuer =
            SignedUrlIssuer::new(Arc::new(HmacTokenCodec::from_config(&config)), config)
                .with_authority(Arc::new(DenyAll));

        assert!(issuer.issue_signed_url("get", "a").is_err());
    }

    #[test]
    fn test_signed_url_json_shape() {
        let signed = SignedUrl {
            token: "t".to_string(),
            url: "u".to_string(),
            signed_url: "s".to_string(),
        };
        let value = serde_json::to_value(&signed).unwrap();
        assert_eq!(value["signedUrl"], "s");
        assert_eq!(value["url"], "u");
        assert_eq!(value["token"], "t");
    }
}
