pub mod config;
pub mod explorer_system;

pub use config::{ConfigError, ExplorerConfig};
pub use explorer_system::ExplorerSystem;
