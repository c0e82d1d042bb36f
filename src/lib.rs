//! # Explorer API
//!
//! > **Read queries of a block explorer, on top of [`explorer_query`].**
//!
//! Snapshots, blocks, transactions, fee transactions, balances and metagraphs are
//! stored as documents in a search cluster. This crate knows their shapes and
//! their natural orders; the engine crate knows how to page through them.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Documents ([`model`])
//! Stored entities, their queryable fields and the [`Term`](model::Term) that
//! addresses a snapshot (`latest`, an ordinal or a hash).
//! - **Role**: Implements [`Document`](explorer_query::Document) for every entity so the
//!   engine can read sort values off the last row of a page.
//!
//! ### 2. The Interface ([`clients`])
//! One client per entity family, each wrapping the shared
//! [`SearchClient`](explorer_query::SearchClient).
//! - **Role**: Every `find*` and `list*` operation of the API.
//! - **Key items**: [`SnapshotClient`](clients::SnapshotClient),
//!   [`TransactionClient`](clients::TransactionClient), [`BalanceClient`](clients::BalanceClient).
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Role**: Loads [`ExplorerConfig`](lifecycle::ExplorerConfig) and wires every client over
//!   one backend in [`ExplorerSystem`](lifecycle::ExplorerSystem).
//!
//! ## Namespaces
//!
//! Every operation takes a [`Namespace`](explorer_query::Namespace). `Global` reads the
//! primary indices; `Currency(identifier)` reads the `currency-*` indices and unwraps the
//! `{identifier, data}` envelope. Fee transactions and owner-address snapshot listings
//! exist for currencies only and take the identifier directly.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Walk a seeded in-memory index with request logs
//! RUST_LOG=debug cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod clients;
pub mod lifecycle;
pub mod model;
