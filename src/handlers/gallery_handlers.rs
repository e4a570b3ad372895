use anyhow::Result;
use colored::Colorize;
use invdash_core::{stray_files, PageState};
use std::fs;

use crate::state::AppState;
use crate::ui::{print_status, StatusLevel};

/// Print one page of a gallery; `page` is 1-based and clamped to the last page
pub fn show_gallery(state: &AppState, name: &str, page: usize) -> Result<()> {
    let gallery = state.config.gallery(name)?;
    let images = state.gallery_images(gallery);

    let requested = page.max(1) - 1;
    let paging = PageState::new(images.len(), gallery.page_size).at(requested);
    if paging.index != requested {
        print_status(
            format!(
                "Page {} is past the end, showing page {}",
                page,
                paging.index + 1
            ),
            StatusLevel::Warning,
        );
    }

    println!(
        "# {} (page {}/{})\n",
        gallery.name.bold(),
        paging.index + 1,
        paging.page_count()
    );

    for image in &images[paging.range()] {
        let missing = if image.path.exists() { "" } else { " (missing)" };
        println!("- {}: {}{}", image.caption, image.path.display(), missing.red());
    }

    // Files next to the gallery that its naming convention does not cover
    let dir = state.config.resolve(&gallery.dir);
    if let Ok(entries) = fs::read_dir(&dir) {
        let names = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok());
        for name in stray_files(gallery, names) {
            print_status(
                format!("{} is not part of gallery '{}'", name, gallery.name),
                StatusLevel::Warning,
            );
        }
    }

    let mut nav = Vec::new();
    if paging.has_prev() {
        nav.push(format!("prev: --page {}", paging.prev().index + 1));
    }
    if paging.has_next() {
        nav.push(format!("next: --page {}", paging.next().index + 1));
    }
    if !nav.is_empty() {
        println!("\n{}", nav.join("  ").dimmed());
    }

    Ok(())
}
