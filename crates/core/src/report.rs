use std::collections::HashMap;

use crate::model::{DirectoryCount, ImageFile, SizeBreakdown};

pub const RANKING_HEADER: &str = "Directories sorted by number of image files:";

/// Sorts every directory by descending image count, ties by path.
pub fn rank_directories(counts: &HashMap<String, u64>) -> Vec<DirectoryCount> {
    let mut ranked = counts
        .iter()
        .map(|(path, image_files)| DirectoryCount {
            path: path.clone(),
            image_files: *image_files,
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.image_files
            .cmp(&a.image_files)
            .then_with(|| a.path.cmp(&b.path))
    });
    ranked
}

/// Directories holding strictly more than `min_images` images, busiest first.
pub fn accepted_directories(
    counts: &HashMap<String, u64>,
    min_images: u64,
) -> Vec<DirectoryCount> {
    rank_directories(counts)
        .into_iter()
        .filter(|entry| entry.image_files > min_images)
        .collect()
}

pub fn render_image_line(image: &ImageFile) -> String {
    format!("File: {} | Size: {} bytes", image.path, image.size_bytes)
}

pub fn render_size_summary(total_size_bytes: u64) -> String {
    let size = SizeBreakdown::from_bytes(total_size_bytes);
    format!(
        "\nTotal Size: {} bytes\nTotal Size: {:.2} KB\nTotal Size: {:.2} MB\nTotal Size: {:.2} GB\n",
        size.bytes, size.kilobytes, size.megabytes, size.gigabytes
    )
}

/// Blank line, header, then one line per accepted directory.
pub fn render_directory_ranking(accepted: &[DirectoryCount]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(RANKING_HEADER);
    out.push('\n');
    for entry in accepted {
        out.push_str(&format!(
            "Directory: {} | Image Files: {}\n",
            entry.path, entry.image_files
        ));
    }
    out
}
