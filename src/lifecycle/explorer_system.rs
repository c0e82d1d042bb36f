use crate::clients::{
    BalanceClient, BlockClient, FeeTransactionClient, MetagraphClient, SnapshotClient,
    TransactionClient,
};
use crate::lifecycle::config::ExplorerConfig;
use explorer_query::{PaginationParams, PaginationRequest, QueryError, SearchBackend, SearchClient};
use std::sync::Arc;
use tracing::info;

/// Entry point of the explorer read API.
///
/// `ExplorerSystem` is responsible for:
/// - **Dependency Wiring**: every client shares one [`SearchClient`] and thus one backend handle
/// - **Request Defaults**: listings requested without a limit get the configured page size
///
/// Clients hold no state besides the backend handle, so the system is cheap to clone
/// and safe to share between request handlers.
///
/// # Example
///
/// ```ignore
/// let system = ExplorerSystem::new(ExplorerConfig::from_env()?, backend);
///
/// let latest = system.snapshot_client.find_snapshot(&Term::Latest).await?;
/// let page = system
///     .transaction_client
///     .list_transactions(system.pagination(params)?, &Namespace::Global)
///     .await?;
/// ```
#[derive(Clone)]
pub struct ExplorerSystem {
    pub snapshot_client: SnapshotClient,
    pub block_client: BlockClient,
    pub transaction_client: TransactionClient,
    pub fee_transaction_client: FeeTransactionClient,
    pub balance_client: BalanceClient,
    pub metagraph_client: MetagraphClient,
    config: ExplorerConfig,
}

impl ExplorerSystem {
    pub fn new(config: ExplorerConfig, backend: Arc<dyn SearchBackend>) -> Self {
        info!(search_node = %config.search_node, "Wiring explorer clients");
        let search = SearchClient::new(backend);

        // Derived listings resolve their snapshot through the snapshot client
        let snapshot_client = SnapshotClient::new(search.clone());

        Self {
            block_client: BlockClient::new(search.clone()),
            transaction_client: TransactionClient::new(search.clone(), snapshot_client.clone()),
            fee_transaction_client: FeeTransactionClient::new(
                search.clone(),
                snapshot_client.clone(),
            ),
            balance_client: BalanceClient::new(search.clone(), snapshot_client.clone()),
            metagraph_client: MetagraphClient::new(search),
            snapshot_client,
            config,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Validates raw pagination parameters. A first page or explicit resume without
    /// a limit is sized by `max_page_size`; a token keeps the size it was minted with.
    pub fn pagination(&self, params: PaginationParams) -> Result<PaginationRequest, QueryError> {
        let default_size = Some(self.config.max_page_size);
        Ok(match params.validate()? {
            PaginationRequest::FirstPage { size: None } => {
                PaginationRequest::FirstPage { size: default_size }
            }
            PaginationRequest::Resume {
                size: None,
                since,
                direction,
            } => PaginationRequest::Resume {
                size: default_size,
                since,
                direction,
            },
            request => request,
        })
    }
}
