pub mod catalog;
pub mod error;
pub mod model;
pub mod report;
pub mod scan;

pub use catalog::{
    extension_of, is_image_path, IgnoreMatcher, IGNORED_DIRECTORIES, IMAGE_EXTENSIONS,
};
pub use error::ScanError;
pub use model::{
    DirectoryCount, ImageFile, ScanEvent, ScanMetrics, ScanReport, SizeBreakdown,
    DEFAULT_MIN_IMAGES,
};
pub use report::{
    accepted_directories, rank_directories, render_directory_ranking, render_image_line,
    render_size_summary, RANKING_HEADER,
};
pub use scan::{run_scan, run_scan_with_callback, ScanOptions};
