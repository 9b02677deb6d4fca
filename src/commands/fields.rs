use anyhow::Result;

use crate::template::PLACEHOLDERS;

/// Run the fields command - list available template placeholders
pub fn run() -> Result<()> {
    println!("Available template placeholders:");
    println!();

    for (name, description) in PLACEHOLDERS {
        println!("  {{{{{}}}}}  - {}", name, description);
    }

    println!();
    println!("Example filename template: \"{{{{title}}}} - {{{{authors}}}}\"");
    println!();
    println!(
        "Conditional blocks: wrap content in {{{{#isbn10}}}}...{{{{/isbn10}}}} (or isbn13) to"
    );
    println!("include it only when the field was found.");

    Ok(())
}
