//! Test utilities for the Patterna workspace
//!
//! Shared fixtures and assertions for the alignment tests:
//!
//! - **Fixtures**: row builders, a small tokenizer and seeded random rows
//! - **Assertions**: checks for the alignment invariants (equal width,
//!   preserved content, exact partitions)

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::{assert_content_preserved, assert_equal_width, assert_partition};
pub use fixtures::{generate_rows, row, row_of, street_rows, tokenize, tokenize_all};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};

/// Initialize test logging (call once per test module)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
