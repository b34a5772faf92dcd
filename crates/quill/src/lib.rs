pub mod article;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod display;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod generate;
mod lenient;
pub mod news;
pub mod prompt;
pub mod state;
pub mod storage;

// Re-export commonly used types for easier testing
pub use article::{GeneratedArticle, GroundingSource, NewsItem};
pub use error::{QuillError, Result};
pub use gemini::{GenerationOutput, GenerationRequest, TextGenerator};
