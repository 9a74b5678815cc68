//! A minimal personal wiki server.
//!
//! Pages are plain-text files, one per title. Titles are checked against an
//! allowlist before any file is touched, and `[[...]]` link tokens in viewed
//! pages are rewritten into anchors on the way out.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use handlers::router;
pub use types::{AppState, Page};
pub use services::{LinkRewriter, LinkWriter, PageStore, TitleValidator};
pub use components::TemplateComponent;
