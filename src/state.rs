use std::sync::Arc;

use crate::clients::graph::{GraphClient, ProfileSource};
use crate::config::Config;
use crate::db::Store;
use crate::services::{PokemonGenerator, SyncService};

/// Build a shared HTTP client with reasonable defaults for Graph API calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("graphsync/0.1")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything the endpoints, the scheduler, and the CLI share: one store,
/// one profile source, and the two job services wired to them.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub source: Arc<dyn ProfileSource>,

    pub sync: SyncService,

    pub pokemon: PokemonGenerator,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client =
            build_shared_http_client(config.graph.request_timeout_seconds.into())?;
        let source: Arc<dyn ProfileSource> = Arc::new(GraphClient::with_shared_client(
            http_client,
            &config.graph.base_url,
        ));

        Self::with_profile_source(config, source).await
    }

    /// Same wiring with the Graph API swapped out, for tests.
    pub async fn with_profile_source(
        config: Config,
        source: Arc<dyn ProfileSource>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let sync = SyncService::new(store.clone(), source.clone());
        let pokemon = PokemonGenerator::new(store.clone());

        Ok(Self {
            config,
            store,
            source,
            sync,
            pokemon,
        })
    }
}
