//! Core utilities and types shared across all Patterna crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{default_config, load_config, save_config, Config};
pub use error::{PatternaError, PatternaResult};
pub use logging::init_logging;

// Re-export core types
pub use types::{Sequence, Token, TokenType};

/// Version information for the Patterna project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
