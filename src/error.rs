use thiserror::Error;

/// Failures surfaced by the book metadata fetch pipeline.
///
/// Only these variants escape the orchestrator; field-level extraction
/// failures and the paperback cross-reference path degrade the record
/// instead of erroring.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Short-link resolution exhausted every ASIN extraction strategy.
    #[error("could not extract ASIN from short URL")]
    ShortUrlAsin,

    /// The page failed both book-classifier signals.
    #[error("URL is not a book product page")]
    NotABook,

    /// No ASIN could be derived from the URL or the document.
    #[error("failed to obtain ASIN")]
    AsinNotFound,

    /// The overall fetch exceeded its deadline.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure fetching the primary document.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
