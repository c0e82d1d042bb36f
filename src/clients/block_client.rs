use crate::clients::document_client::DocumentClient;
use crate::model::{Block, Index};
use explorer_query::{ItemResult, Namespace, QueryError, SearchClient};
use tracing::instrument;

#[derive(Clone)]
pub struct BlockClient {
    inner: SearchClient,
}

impl BlockClient {
    pub fn new(inner: SearchClient) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn find_block_by_hash(
        &self,
        hash: &str,
        ns: &Namespace,
    ) -> Result<ItemResult<Block>, QueryError> {
        self.find_by_hash(hash, ns).await
    }
}

impl DocumentClient<Block> for BlockClient {
    const INDEX: Index = Index::Blocks;

    fn inner(&self) -> &SearchClient {
        &self.inner
    }
}
