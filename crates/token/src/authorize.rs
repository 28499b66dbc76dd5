//! The authorization decision for a single object request

use crate::claims::Claims;
use crate::codec::TokenVerifier;
use crate::extract::extract_token;
use capstore_config::AuthorityConfig;
use capstore_core::{Error, ObjectRequest, Result, Vocabulary};
use std::sync::Arc;
use tracing::{debug, warn};

/// Decides whether a request may proceed.
///
/// The decision is pure: it reads the request and the token, and never
/// touches object state.
pub struct Authorizer {
    verifier: Arc<dyn TokenVerifier>,
    expected_issuer: String,
    vocabulary: Vocabulary,
}

impl Authorizer {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        expected_issuer: impl Into<String>,
        vocabulary: Vocabulary,
    ) -> Self {
        Self {
            verifier,
            expected_issuer: expected_issuer.into(),
            vocabulary,
        }
    }

    pub fn from_config(verifier: Arc<dyn TokenVerifier>, config: &AuthorityConfig) -> Self {
        Self::new(verifier, config.origin(), config.vocabulary)
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    pub fn expected_issuer(&self) -> &str {
        &self.expected_issuer
    }

    /// Authorize a request, returning the verified claims on success
    pub fn authorize(&self, request: &ObjectRequest) -> Result<Claims> {
        match self.decide(request) {
            Ok(claims) => {
                debug!(
                    verb = %request.verb,
                    name = %request.target_name,
                    operation = %claims.operation,
                    "Authorized object request"
                );
                Ok(claims)
            }
            Err(e) => {
                warn!(
                    code = e.code(),
                    verb = %request.verb,
                    name = %request.target_name,
                    "Rejected object request: {e}"
                );
                Err(e)
            }
        }
    }

    fn decide(&self, request: &ObjectRequest) -> Result<Claims> {
        let token = extract_token(
            request.header_token.as_deref(),
            request.query_token.as_deref(),
        )?;
        let claims = self.verifier.verify(token, &self.expected_issuer)?;

        let attempted = self.vocabulary.operation_for_verb(&request.verb)?;
        if claims.operation != attempted {
            return Err(Error::operation_mismatch(
                claims.operation.as_str(),
                attempted.as_str(),
            ));
        }
        if claims.name != request.target_name {
            return Err(Error::resource_mismatch(&claims.name, &request.target_name));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::codec::{HmacTokenCodec, TokenIssuer};
    use capstore_core::{Operation, SigningKey};
    use rstest::rstest;
    use std::time::Duration;

    const ORIGIN: &str = "http://localhost:3000";

    fn setup(vocabulary: Vocabulary) -> (Arc<HmacTokenCodec<FixedClock>>, Authorizer) {
        let codec = Arc::new(HmacTokenCodec::with_clock(
            SigningKey::from_secret("Spree"),
            Duration::from_secs(300),
            FixedClock::new(1_700_000_000),
        ));
        let authorizer = Authorizer::new(codec.clone(), ORIGIN, vocabulary);
        (codec, authorizer)
    }

    #[test]
    fn test_matching_request_is_authorized() {
        let (codec, authorizer) = setup(Vocabulary::Standard);
        let token = codec.issue(Operation::Create, "x", ORIGIN).unwrap();

        let put = ObjectRequest::new("PUT", "x").with_query_token(&token);
        assert_eq!(authorizer.authorize(&put).unwrap().name, "x");

        let patch = ObjectRequest::new("PATCH", "x").with_header_token(&token);
        assert_eq!(
            authorizer.authorize(&patch).unwrap().operation,
            Operation::Create
        );
    }

    #[rstest]
    #[case(Vocabulary::Standard, Operation::Create, "PUT", true)]
    #[case(Vocabulary::Standard, Operation::Create, "PATCH", true)]
    #[case(Vocabulary::Standard, Operation::Create, "GET", false)]
    #[case(Vocabulary::Standard, Operation::Get, "GET", true)]
    #[case(Vocabulary::Standard, Operation::Get, "DELETE", false)]
    #[case(Vocabulary::Standard, Operation::Delete, "DELETE", true)]
    #[case(Vocabulary::Standard, Operation::Delete, "PUT", false)]
    #[case(Vocabulary::TwoStep, Operation::Initiate, "PUT", true)]
    #[case(Vocabulary::TwoStep, Operation::Initiate, "PATCH", false)]
    #[case(Vocabulary::TwoStep, Operation::Complete, "PATCH", true)]
    #[case(Vocabulary::TwoStep, Operation::Complete, "PUT", false)]
    #[case(Vocabulary::TwoStep, Operation::Retrieve, "GET", true)]
    #[case(Vocabulary::TwoStep, Operation::Create, "PUT", false)]
    #[case(Vocabulary::TwoStep, Operation::Delete, "DELETE", true)]
    fn test_grant_against_verb(
        #[case] vocabulary: Vocabulary,
        #[case] granted: Operation,
        #[case] verb: &str,
        #[case] allowed: bool,
    ) {
        let (codec, authorizer) = setup(vocabulary);
        let token = codec.issue(granted, "x", ORIGIN).unwrap();
        let request = ObjectRequest::new(verb, "x").with_header_token(&token);

        match authorizer.authorize(&request) {
            Ok(claims) => {
                assert!(allowed, "{verb} must be refused for {granted}");
                assert_eq!(claims.operation, granted);
            }
            Err(e) => {
                assert!(!allowed, "{verb} must be allowed for {granted}: {e}");
                assert!(matches!(e, Error::OperationMismatch { .. }));
            }
        }
    }

    #[test]
    fn test_wrong_verb_is_operation_mismatch() {
        let (codec, authorizer) = setup(Vocabulary::Standard);
        let token = codec.issue(Operation::Create, "x", ORIGIN).unwrap();

        let get = ObjectRequest::new("GET", "x").with_query_token(&token);
        assert!(matches!(
            authorizer.authorize(&get),
            Err(Error::OperationMismatch { .. })
        ));
    }

    #[test]
    fn test_other_name_is_resource_mismatch() {
        let (codec, authorizer) = setup(Vocabulary::Standard);
        let token = codec.issue(Operation::Get, "x", ORIGIN).unwrap();

        let get = ObjectRequest::new("GET", "y").with_query_token(&token);
        assert!(matches!(
            authorizer.authorize(&get),
            Err(Error::ResourceMismatch { .. })
        ));
    }

    #[test]
    fn test_conflict_wins_even_when_one_token_is_valid() {
        let (codec, authorizer) = setup(Vocabulary::Standard);
        let good = codec.issue(Operation::Create, "x", ORIGIN).unwrap();
        let other = codec.issue(Operation::Create, "notright1", ORIGIN).unwrap();

        let request = ObjectRequest::new("PUT", "x")
            .with_query_token(&good)
            .with_header_token(&other);
        assert!(matches!(
            authorizer.authorize(&request),
            Err(Error::ConflictingAuthorization)
        ));
    }

    #[test]
    fn test_missing_token() {
        let (_, authorizer) = setup(Vocabulary::Standard);
        let request = ObjectRequest::new("PUT", "x");
        assert!(matches!(
            authorizer.authorize(&request),
            Err(Error::MissingAuthorization)
        ));
    }

    #[test]
    fn test_unsupported_verb() {
        let (codec, authorizer) = setup(Vocabulary::Standard);
        let token = codec.issue(Operation::Get, "x", ORIGIN).unwrap();
        let request = ObjectRequest::new("POST", "x").with_header_token(&token);
        assert!(matches!(
            authorizer.authorize(&request),
            Err(Error::UnsupportedVerb { .. })
        ));
    }

    #[test]
    fn test_two_step_vocabulary_separates_grants() {
        let (codec, authorizer) = setup(Vocabulary::TwoStep);
        let initiate = codec.issue(Operation::Initiate, "x", ORIGIN).unwrap();

        let put = ObjectRequest::new("PUT", "x").with_header_token(&initiate);
        assert!(authorizer.authorize(&put).is_ok());

        let patch = ObjectRequest::new("PATCH", "x").with_header_token(&initiate);
        assert!(matches!(
            authorizer.authorize(&patch),
            Err(Error::OperationMismatch { .. })
        ));
    }
}
