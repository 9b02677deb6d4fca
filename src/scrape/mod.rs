//! Book metadata extraction from Amazon/Kindle product pages
//!
//! The pipeline: resolve the URL to a canonical product identifier, fetch
//! and classify the page, then run layered fallback extractors for each
//! metadata field. See [`fetcher::fetch_book_info`] for the orchestration.

mod asin;
mod book;
mod classify;
mod fetcher;
mod fields;

pub use book::BookInfo;
pub use fetcher::fetch_book_info_with_timeout;
