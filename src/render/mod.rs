//! Renderer module: stateless Markdown formatting.

pub mod markdown;
pub mod table;

pub use markdown::MarkdownRenderer;
