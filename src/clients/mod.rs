//! Per-entity clients over a shared [`SearchClient`](explorer_query::SearchClient).

pub mod balance_client;
pub mod block_client;
pub mod document_client;
pub mod fee_transaction_client;
pub mod listing;
pub mod metagraph_client;
pub mod snapshot_client;
pub mod transaction_client;

pub use balance_client::*;
pub use block_client::*;
pub use document_client::*;
pub use fee_transaction_client::*;
pub use metagraph_client::*;
pub use snapshot_client::*;
pub use transaction_client::*;
