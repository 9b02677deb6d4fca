//! Fetch command - print metadata for a product URL

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::commands::{extract_url, fetch_sync};
use crate::i18n::{localize_fetch_error, t, Locale, Message};
use crate::scrape::BookInfo;

pub fn run(url_text: &str, json: bool, locale: Locale, quiet: bool) -> Result<()> {
    let Some(url) = extract_url(url_text) else {
        bail!("{}", t(locale, Message::NoUrlFound));
    };

    if !quiet && !json {
        eprintln!("{}", t(locale, Message::Fetching));
    }

    let book = match fetch_sync(&url)? {
        Ok(book) => book,
        Err(e) => bail!("{}", localize_fetch_error(locale, &e)),
    };

    if json {
        let output = serde_json::to_string_pretty(&book)
            .context("Failed to serialize book metadata")?;
        println!("{}", output);
    } else {
        print_book(&book);
    }

    Ok(())
}

fn print_book(book: &BookInfo) {
    println!("{}: {}", "Title".bold(), book.title);
    println!("{}: {}", "Authors".bold(), book.authors.join(", "));

    if !book.series.is_empty() {
        println!(
            "{}: {} (volume {})",
            "Series".bold(),
            book.series,
            book.volume
        );
    }
    if !book.published.is_empty() {
        println!("{}: {}", "Published".bold(), book.published);
    }

    println!("{}: {}", "ASIN".bold(), book.asin);

    if !book.isbn10.is_empty() {
        println!("{}: {}", "ISBN-10".bold(), book.isbn10);
    }
    if !book.isbn13.is_empty() {
        println!("{}: {}", "ISBN-13".bold(), book.isbn13);
    }

    println!("{}: {}", "URL".bold(), book.url);

    if !book.thumbnail.is_empty() {
        println!("{}: {}", "Cover".bold(), book.thumbnail);
    }
    if !book.description.is_empty() {
        println!();
        println!("{}", crate::template::description_short(&book.description));
    }
}
