//! Stored document shapes and the API types built from them.
//!
//! Every entity that can be listed implements [`Document`](explorer_query::Document)
//! with its own field enum. The enum's serde names are the stored field names, so
//! they double as the field names inside continuation tokens.

pub mod balance;
pub mod block;
pub mod currency_snapshot;
pub mod fee_transaction;
pub mod index;
pub mod metagraph;
pub mod snapshot;
pub mod term;
pub mod transaction;

pub use balance::*;
pub use block::*;
pub use currency_snapshot::*;
pub use fee_transaction::*;
pub use index::*;
pub use metagraph::*;
pub use snapshot::*;
pub use term::*;
pub use transaction::*;
