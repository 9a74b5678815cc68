pub mod link_rewriter;
pub mod page_store;
pub mod title_validator;

pub use link_rewriter::{LinkRewriter, LinkWriter};
pub use page_store::PageStore;
pub use title_validator::TitleValidator;
