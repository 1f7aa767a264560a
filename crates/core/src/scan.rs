use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::{is_image_path, IgnoreMatcher, IGNORED_DIRECTORIES};
use crate::error::ScanError;
use crate::model::{ImageFile, ScanEvent, ScanReport, DEFAULT_MIN_IMAGES};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    /// Substrings matched case-sensitively against full directory paths.
    pub ignored_directories: Vec<String>,
    /// Directories need strictly more images than this to be reported.
    pub min_images: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignored_directories: IGNORED_DIRECTORIES.iter().map(|s| s.to_string()).collect(),
            min_images: DEFAULT_MIN_IMAGES,
        }
    }
}

pub fn run_scan(options: &ScanOptions) -> Result<ScanReport, ScanError> {
    run_scan_with_callback(options, |_| {})
}

/// Walks `options.root`, calling `on_event` for every image in visitation order.
///
/// The first unreadable entry aborts the walk; no partial report is returned.
pub fn run_scan_with_callback<F>(
    options: &ScanOptions,
    mut on_event: F,
) -> Result<ScanReport, ScanError>
where
    F: FnMut(ScanEvent),
{
    let started = Instant::now();
    let ignores = IgnoreMatcher::new(&options.ignored_directories);
    info!(root = %options.root.display(), "scanning for image files");

    let mut report = ScanReport {
        root: options.root.clone(),
        ..ScanReport::default()
    };
    let mut skipped_directories = 0_u64;

    let walker = WalkDir::new(&options.root)
        .follow_links(false)
        .sort_by_file_name();
    let iter = walker.into_iter().filter_entry(|entry| {
        if entry.file_type().is_dir() && ignores.is_ignored(&entry_path(entry)) {
            debug!(path = %entry.path().display(), "skipping ignored directory");
            skipped_directories += 1;
            return false;
        }
        true
    });

    for item in iter {
        let entry = item?;
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry_path(&entry);
        if !is_image_path(&path) {
            continue;
        }

        let metadata = entry.metadata().map_err(|source| ScanError::Metadata {
            path: path.clone(),
            source,
        })?;
        let size_bytes = metadata.len();

        report.total_size_bytes = report.total_size_bytes.saturating_add(size_bytes);
        report.metrics.image_files += 1;
        *report
            .directory_counts
            .entry(parent_key(&path))
            .or_insert(0) += 1;

        on_event(ScanEvent::ImageFound(ImageFile {
            path: path.to_string_lossy().to_string(),
            size_bytes,
        }));
    }

    report.metrics.skipped_directories = skipped_directories;
    report.metrics.elapsed_ms = started.elapsed().as_millis().try_into().unwrap_or(u64::MAX);

    info!(
        image_files = report.metrics.image_files,
        total_bytes = report.total_size_bytes,
        directories = report.directory_counts.len(),
        skipped_directories = report.metrics.skipped_directories,
        elapsed_ms = report.metrics.elapsed_ms,
        "scan complete"
    );

    Ok(report)
}

/// The root keeps the spelling it was given; everything below it is cleaned.
fn entry_path(entry: &walkdir::DirEntry) -> PathBuf {
    if entry.depth() == 0 {
        entry.path().to_path_buf()
    } else {
        clean_path(entry.path())
    }
}

/// Lexically drops `.` components and folds `name/..` pairs. An empty result is `.`.
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Key for the directory that directly contains `path`. A bare file name
/// belongs to `.`.
fn parent_key(path: &Path) -> String {
    match clean_path(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().to_string(),
        _ => ".".to_string(),
    }
}
