use colored::Colorize;
use invdash_core::DashboardConfig;

/// Semantic level of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Warning,
}

/// Print a status line to stderr with its level's color
pub fn print_status(text: impl AsRef<str>, level: StatusLevel) {
    let text = text.as_ref();
    let line = match level {
        StatusLevel::Success => text.green(),
        StatusLevel::Warning => text.yellow(),
    };
    eprintln!("{}", line);
}

/// Print an error as title, message and details
pub fn print_error(title: &str, message: &str, details: &str) {
    eprintln!("{} {}", format!("{}:", title).red().bold(), message);
    if !details.is_empty() {
        for line in details.lines() {
            eprintln!("  {}", line);
        }
    }
}

/// Print the configured networks and galleries
pub fn print_views(config: &DashboardConfig) {
    println!("{}\n", config.title.bold());

    println!("{}", "Networks".underline());
    if config.networks.is_empty() {
        println!("  (none)");
    }
    for view in &config.networks {
        let interpretation = if view.interpretation.is_some() {
            " (with interpretation)"
        } else {
            ""
        };
        println!("  - {}{}", view.name, interpretation);
    }

    println!("\n{}", "Galleries".underline());
    if config.galleries.is_empty() {
        println!("  (none)");
    }
    for gallery in &config.galleries {
        println!("  - {} ({} images)", gallery.name, gallery.count);
    }
}
