//! Request extractors shared by the handlers.

pub mod page;

pub use page::PageQuery;
