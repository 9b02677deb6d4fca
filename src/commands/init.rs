use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::config::Config;

/// Run the init command - write a config file with default settings
pub fn run(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() && !force {
        eprintln!(
            "{}: Config already exists at {}",
            "Error".red().bold(),
            config_path.display()
        );
        eprintln!();
        eprintln!("Use {} to overwrite.", "--force".cyan());
        bail!("Config file already exists");
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let config_content = r#"# booknotectl configuration
# See 'booknotectl fields' for available template placeholders

# locale = "en"  # or "ja"; defaults to the LANG environment variable

[notes]
dir = "Books"
image_dir = "Books/Covers"
download_images = true
filename_template = "{{title}}"
# template_file = "templates/book.md"
"#;

    std::fs::write(&config_path, config_content)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!(
        "{} Config written to {}",
        "✓".green(),
        config_path.display()
    );
    println!();
    println!("You can now use:");
    println!(
        "  {} - print metadata for a product URL",
        "booknotectl fetch <url>".cyan()
    );
    println!(
        "  {} - fetch metadata and write a Markdown note",
        "booknotectl create <url>".cyan()
    );

    Ok(())
}
