/// Core types shared with the tokenizer and across all Patterna modules
pub mod sequence;
pub mod token;

// Re-export commonly used types at module level
pub use sequence::Sequence;
pub use token::{Token, TokenType};
