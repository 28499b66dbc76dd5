//! Assembly of the full authority and its listener

use crate::routes::{router, AppState};
use crate::service::ObjectService;
use anyhow::{Context, Result};
use axum::Router;
use capstore_config::AuthorityConfig;
use capstore_store::ObjectStore;
use capstore_token::{Authorizer, HmacTokenCodec, IssuanceAuthority, SignedUrlIssuer};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Signing authority and object store behind one HTTP listener
pub struct ObjectServer {
    config: AuthorityConfig,
    state: AppState,
}

impl ObjectServer {
    /// Wire codec, authorizer, issuer and a fresh store from `config`
    pub fn new(config: AuthorityConfig) -> Self {
        Self::with_store(config, Arc::new(ObjectStore::new()))
    }

    /// Same as [`ObjectServer::new`], serving an existing store
    pub fn with_store(config: AuthorityConfig, store: Arc<ObjectStore>) -> Self {
        let codec = Arc::new(HmacTokenCodec::from_config(&config));
        let authorizer = Authorizer::from_config(codec.clone(), &config);
        let service = ObjectService::new(authorizer, store)
            .with_conceal_incomplete(config.conceal_incomplete);
        let issuer = SignedUrlIssuer::new(codec, config.clone());

        Self {
            config,
            state: AppState {
                service: Arc::new(service),
                issuer: Arc::new(issuer),
            },
        }
    }

    /// Replace the gate consulted before signed URLs are minted
    pub fn with_authority(mut self, authority: Arc<dyn IssuanceAuthority>) -> Self {
        let codec = Arc::new(HmacTokenCodec::from_config(&self.config));
        self.state.issuer =
            Arc::new(SignedUrlIssuer::new(codec, self.config.clone()).with_authority(authority));
        self
    }

    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        info!(
            origin = %self.config.origin(),
            vocabulary = %self.config.vocabulary,
            "Object authority listening on {address}"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server terminated unexpectedly")?;

        info!("Object authority stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}
