//! Create command - fetch metadata and write a rendered Markdown note

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::warn;

use crate::commands::extract_url;
use crate::config::Config;
use crate::i18n::{localize_fetch_error, t, Locale, Message};
use crate::scrape::{fetch_book_info_with_timeout, BookInfo};
use crate::template::{render_filename, render_template, DEFAULT_TEMPLATE};

/// Deadline for the optional cover image download.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Images larger than this are left remote.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[allow(clippy::too_many_arguments)]
pub fn run(
    url_text: &str,
    config: &Config,
    dest: Option<&PathBuf>,
    filename_template: Option<&str>,
    template_file: Option<&PathBuf>,
    no_download_image: bool,
    locale: Locale,
    quiet: bool,
) -> Result<()> {
    let Some(url) = extract_url(url_text) else {
        bail!("{}", t(locale, Message::NoUrlFound));
    };

    let download_images = config.notes.download_images && !no_download_image;
    let image_dir = config.notes.image_dir.clone();

    if !quiet {
        eprintln!("{}", t(locale, Message::Fetching));
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let client = reqwest::Client::new();

    let mut book = match rt.block_on(fetch_book_info_with_timeout(&client, &url)) {
        Ok(book) => book,
        Err(e) => bail!("{}", localize_fetch_error(locale, &e)),
    };

    if !quiet {
        eprintln!("{}", t(locale, Message::CreatingNote));
    }

    // The filename is rendered from the record as fetched; only the note
    // body sees the local image path.
    let filename = render_filename(&config.filename_template(filename_template), &book);

    if download_images && !book.thumbnail.is_empty() {
        match rt.block_on(download_image(&client, &book, &image_dir)) {
            Ok(local_name) => book.thumbnail = local_name,
            Err(e) => {
                warn!("cover image download failed: {}", e);
                if !quiet {
                    eprintln!("{}", t(locale, Message::ImageDownloadFailed));
                }
            }
        }
    }

    let template = load_template(config.template_file(template_file).as_deref());
    let content = render_template(&template, &book);

    let notes_dir = config.notes_dir(dest);
    std::fs::create_dir_all(&notes_dir)
        .with_context(|| format!("Failed to create directory {:?}", notes_dir))?;

    let note_path = unique_note_path(&notes_dir, &filename);
    std::fs::write(&note_path, content)
        .with_context(|| format!("Failed to write {:?}", note_path))?;

    println!(
        "{} {}: {}",
        "✓".green(),
        t(locale, Message::NoteCreated),
        note_path.display()
    );

    Ok(())
}

/// Read the configured template file, falling back to the built-in template
/// when unset or unreadable.
fn load_template(path: Option<&Path>) -> String {
    match path {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            warn!("template file {:?} not readable ({}), using built-in", path, e);
            DEFAULT_TEMPLATE.to_string()
        }),
        None => DEFAULT_TEMPLATE.to_string(),
    }
}

/// Append " 1", " 2", ... before the extension until the path is free.
fn unique_note_path(dir: &Path, filename: &str) -> PathBuf {
    let base = dir.join(format!("{}.md", filename));
    if !base.exists() {
        return base;
    }

    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{} {}.md", filename, counter));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Download the cover image into `image_dir`, returning the local filename
/// to substitute into the record. Every failure mode (transport, timeout,
/// oversized body, filesystem) surfaces as an error; the caller keeps the
/// remote URL and tells the user.
async fn download_image(
    client: &reqwest::Client,
    book: &BookInfo,
    image_dir: &Path,
) -> Result<String> {
    let ext = image_extension(&book.thumbnail);
    let filename = format!("{}.{}", book.asin, ext);
    let image_path = image_dir.join(&filename);

    // Already downloaded on a previous run
    if image_path.exists() {
        return Ok(filename);
    }

    let response = tokio::time::timeout(IMAGE_TIMEOUT, async {
        client.get(&book.thumbnail).send().await?.bytes().await
    })
    .await
    .map_err(|_| anyhow::anyhow!("cover download timed out"))??;

    persist_image(image_dir, &image_path, &response)?;
    Ok(filename)
}

/// Write downloaded image bytes to disk, enforcing the size cap.
fn persist_image(image_dir: &Path, image_path: &Path, bytes: &[u8]) -> Result<()> {
    if bytes.len() > MAX_IMAGE_BYTES {
        bail!(
            "cover image is {} bytes, over the {} byte limit",
            bytes.len(),
            MAX_IMAGE_BYTES
        );
    }

    std::fs::create_dir_all(image_dir)
        .with_context(|| format!("Failed to create directory {:?}", image_dir))?;
    std::fs::write(image_path, bytes)
        .with_context(|| format!("Failed to write {:?}", image_path))?;

    Ok(())
}

/// File extension from an image URL, defaulting to jpg.
fn image_extension(url: &str) -> String {
    url.rsplit('.')
        .next()
        .and_then(|tail| tail.split('?').next())
        .filter(|ext| !ext.is_empty() && ext.len() <= 4)
        .unwrap_or("jpg")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unique_note_path_no_collision() {
        let temp = TempDir::new().unwrap();
        let path = unique_note_path(temp.path(), "My Book");
        assert_eq!(path, temp.path().join("My Book.md"));
    }

    #[test]
    fn test_unique_note_path_appends_counter() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("My Book.md"), "x").unwrap();
        std::fs::write(temp.path().join("My Book 1.md"), "x").unwrap();
        let path = unique_note_path(temp.path(), "My Book");
        assert_eq!(path, temp.path().join("My Book 2.md"));
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("https://example.com/cover.jpg"), "jpg");
        assert_eq!(image_extension("https://example.com/cover.png?v=2"), "png");
        assert_eq!(image_extension("https://example.com/cover"), "jpg");
    }

    #[test]
    fn test_load_template_missing_file_falls_back() {
        let template = load_template(Some(Path::new("/nonexistent/template.md")));
        assert_eq!(template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_persist_image_writes_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("covers");
        let path = dir.join("B08XYZ12AB.jpg");
        persist_image(&dir, &path, b"fake image bytes").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"fake image bytes");
    }

    #[test]
    fn test_persist_image_rejects_oversized_body() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("B08XYZ12AB.jpg");
        let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = persist_image(temp.path(), &path, &oversized).unwrap_err();
        assert!(err.to_string().contains("byte limit"));
        assert!(!path.exists());
    }
}
