use crate::model::{Index, Metagraph, MetagraphField};
use explorer_query::{
    query, Namespace, PaginatedResult, PaginationRequest, QueryError, Resume, SearchClient,
};
use tracing::{debug, instrument};

/// Client for the metagraph registry. Metagraphs are global documents.
#[derive(Clone)]
pub struct MetagraphClient {
    inner: SearchClient,
}

impl MetagraphClient {
    pub fn new(inner: SearchClient) -> Self {
        Self { inner }
    }

    /// Metagraphs ordered by identifier. `since` is an identifier.
    #[instrument(skip(self))]
    pub async fn list_metagraphs(
        &self,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<Metagraph>, QueryError> {
        debug!("Sending request");
        let ns = Namespace::Global;
        let index = Index::Metagraphs.name(&ns);
        self.inner
            .paginate(
                pagination,
                &[MetagraphField::Identifier],
                Resume::SortKey,
                &ns,
                |spec| query::all(index, spec, &ns),
            )
            .await
    }
}
