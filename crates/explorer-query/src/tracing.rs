//! # Tracing Setup
//!
//! Structured logging for the query layer, built on `tracing` and `tracing-subscriber`.
//!
//! ## What gets logged
//!
//! - **Backend round trips**: `debug!` with the index and page size of every search
//! - **Resume lookups**: `debug!` with the `since` id and the index it is resolved in
//! - **Continuation tokens**: `debug!` when a full page emits a `next` token
//! - **Recovered NotFound**: `info!` when a derived listing turns NotFound into an empty page
//! - **Backend failures**: `warn!` with `error = %e` before the error is wrapped
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Every backend request
//! RUST_LOG=debug cargo run
//!
//! # Only the engine
//! RUST_LOG=explorer_query=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a two-page transaction listing reads:
//!
//! ```text
//! DEBUG paginate{request=FirstPage { size: Some(2) } ...}: Sending search request index="transactions" size=2
//! DEBUG paginate{request=FirstPage { size: Some(2) } ...}: Page is full, emitting next token rows=2
//! DEBUG paginate{request=Continue { size: None, token: "..." } ...}: Sending search request index="transactions" size=2
//! ```

/// Installs the global subscriber. Verbosity comes from `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // span names already say which operation logged
        .compact()
        .init();
}
