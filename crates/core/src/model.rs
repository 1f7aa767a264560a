use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_MIN_IMAGES: u64 = 5;

const KIB: f64 = 1024.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    ImageFound(ImageFile),
}

/// Aggregates produced by one traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanReport {
    pub root: PathBuf,
    pub total_size_bytes: u64,
    /// Image count keyed by the immediate parent directory of each match.
    pub directory_counts: HashMap<String, u64>,
    pub metrics: ScanMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanMetrics {
    pub image_files: u64,
    pub skipped_directories: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCount {
    pub path: String,
    pub image_files: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBreakdown {
    pub bytes: u64,
    pub kilobytes: f64,
    pub megabytes: f64,
    pub gigabytes: f64,
}

impl SizeBreakdown {
    pub fn from_bytes(bytes: u64) -> Self {
        let value = bytes as f64;
        Self {
            bytes,
            kilobytes: value / KIB,
            megabytes: value / (KIB * KIB),
            gigabytes: value / (KIB * KIB * KIB),
        }
    }
}
