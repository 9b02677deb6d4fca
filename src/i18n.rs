//! User-facing message catalog (English and Japanese)
//!
//! Covers status and error text printed by the commands. This is separate
//! from the locale-tolerant pattern matching inside the extractors, which
//! deals with third-party page content rather than our own output.

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Ja,
}

impl Locale {
    /// Parse a two-letter locale code, defaulting to English.
    pub fn from_code(code: &str) -> Self {
        if code.starts_with("ja") {
            Locale::Ja
        } else {
            Locale::En
        }
    }

    /// Detect the locale from the `LANG` environment variable.
    pub fn detect() -> Self {
        std::env::var("LANG")
            .map(|lang| Locale::from_code(&lang))
            .unwrap_or(Locale::En)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Message {
    Fetching,
    CreatingNote,
    NoteCreated,
    NoUrlFound,
    ImageDownloadFailed,
}

/// Look up a status message for the given locale.
pub fn t(locale: Locale, message: Message) -> &'static str {
    match (locale, message) {
        (Locale::En, Message::Fetching) => "Fetching book information...",
        (Locale::Ja, Message::Fetching) => "書籍情報を取得中...",
        (Locale::En, Message::CreatingNote) => "Creating note...",
        (Locale::Ja, Message::CreatingNote) => "ノートを作成中...",
        (Locale::En, Message::NoteCreated) => "Note created",
        (Locale::Ja, Message::NoteCreated) => "ノートを作成しました",
        (Locale::En, Message::NoUrlFound) => "URL not found in input",
        (Locale::Ja, Message::NoUrlFound) => "URLが見つかりません",
        (Locale::En, Message::ImageDownloadFailed) => {
            "Cover download failed, keeping remote URL"
        }
        (Locale::Ja, Message::ImageDownloadFailed) => {
            "画像のダウンロードに失敗したため、リモートURLを使用します"
        }
    }
}

/// Localized user-facing text for a fetch failure.
pub fn localize_fetch_error(locale: Locale, error: &FetchError) -> String {
    match (locale, error) {
        (Locale::En, FetchError::ShortUrlAsin) => {
            "Could not extract ASIN from short URL".to_string()
        }
        (Locale::Ja, FetchError::ShortUrlAsin) => {
            "短縮URLからASINを抽出できませんでした".to_string()
        }
        (Locale::En, FetchError::NotABook) => {
            "This URL is not a book. Please use a Kindle book or paper book product page URL."
                .to_string()
        }
        (Locale::Ja, FetchError::NotABook) => {
            "このURLは書籍ではありません。Kindle本または紙書籍の商品ページURLをご使用ください。"
                .to_string()
        }
        (Locale::En, FetchError::AsinNotFound) => "Failed to get ASIN".to_string(),
        (Locale::Ja, FetchError::AsinNotFound) => "ASINの取得に失敗しました".to_string(),
        (Locale::En, FetchError::Timeout) => {
            "Communication timed out. Please check your connection and try again.".to_string()
        }
        (Locale::Ja, FetchError::Timeout) => {
            "通信がタイムアウトしました。接続を確認してからお試しください。".to_string()
        }
        (Locale::En, FetchError::Network(e)) => {
            format!("Failed to fetch book information: {}", e)
        }
        (Locale::Ja, FetchError::Network(e)) => {
            format!("書籍情報の取得に失敗しました: {}", e)
        }
    }
}
