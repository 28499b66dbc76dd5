use anyhow::Result;
use capstore_config::AuthorityConfig;
use capstore_server::ObjectServer;
use tracing::info;

pub async fn execute(config: AuthorityConfig) -> Result<()> {
    info!(
        "Token lifetime: {}s, incomplete objects {}",
        config.token_lifetime.as_secs(),
        if config.conceal_incomplete {
            "concealed"
        } else {
            "reported"
        }
    );

    ObjectServer::new(config).serve().await
}
