use crate::config::GalleryConfig;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::path::PathBuf;

/// One image of a gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub path: PathBuf,
    pub caption: String,
}

/// List the images of a gallery following the `{stem}{n}.{ext}` convention
pub fn gallery_files(gallery: &GalleryConfig) -> Vec<GalleryImage> {
    (1..=gallery.count)
        .map(|n| GalleryImage {
            path: gallery
                .dir
                .join(format!("{}{}.{}", gallery.stem, n, gallery.extension)),
            caption: format!("{} {}", gallery.name, n),
        })
        .collect()
}

/// Recover the 1-based image number from a file name, if it follows the convention
pub fn parse_image_index(file_name: &str, stem: &str) -> Option<usize> {
    let pattern = format!(r"^{}(\d+)\.[A-Za-z0-9]+$", regex::escape(stem));
    let re = Regex::new(&pattern).ok()?;
    re.captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .filter(|n| *n > 0)
}

/// File names that look like gallery images but fall outside it:
/// the number is missing or past `count`, or the extension differs
pub fn stray_files<I, S>(gallery: &GalleryConfig, names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let suffix = format!(".{}", gallery.extension);
    let mut stray: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .filter(|name| name.starts_with(&gallery.stem))
        .filter(|name| match parse_image_index(name, &gallery.stem) {
            Some(n) => n > gallery.count || !name.ends_with(&suffix),
            None => true,
        })
        .collect();
    stray.sort();
    stray
}

/// Explicit paging state; every transition returns a new value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    /// Zero-based page index
    pub index: usize,
    pub total: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            index: 0,
            total,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// Jump to a page, clamped to the last one
    pub fn at(self, index: usize) -> Self {
        Self {
            index: index.min(self.page_count() - 1),
            ..self
        }
    }

    pub fn next(self) -> Self {
        self.at(self.index + 1)
    }

    pub fn prev(self) -> Self {
        self.at(self.index.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    /// Item indices shown on the current page
    pub fn range(&self) -> Range<usize> {
        let start = (self.index * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }
}
