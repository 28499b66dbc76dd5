use anyhow::Result;
use capstore_config::AuthorityConfig;
use clap::Subcommand;

pub mod serve;
pub mod sign;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the object store and the signed-URL endpoint
    Serve,

    /// Mint a signed URL and print it as JSON
    Sign {
        /// Operation to grant (e.g. get, create, delete)
        #[arg(short, long)]
        operation: String,

        /// Object name the grant is bound to
        #[arg(short, long)]
        name: String,
    },
}

impl Commands {
    pub async fn execute(self, config: AuthorityConfig) -> Result<()> {
        match self {
            Commands::Serve => serve::execute(config).await,
            Commands::Sign { operation, name } => sign::execute(config, &operation, &name),
        }
    }
}
