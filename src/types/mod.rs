use std::sync::Arc;

use crate::components::TemplateComponent;
use crate::services::{LinkRewriter, PageStore, TitleValidator};

/// Application state shared across all handlers.
///
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub validator: Arc<TitleValidator>,
    pub rewriter: Arc<LinkRewriter>,
    pub templates: Arc<TemplateComponent>,
}

impl AppState {
    pub fn new(store: PageStore, templates: TemplateComponent) -> Self {
        Self {
            store,
            validator: Arc::new(TitleValidator::new()),
            rewriter: Arc::new(LinkRewriter::new()),
            templates: Arc::new(templates),
        }
    }
}

/// A wiki page: a validated title and its raw body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// An empty page, used when editing a title that has no file yet
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }
}
