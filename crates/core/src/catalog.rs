use std::path::Path;

/// Lowercase image extensions, leading dot included. Covers common web formats,
/// the HEIC/HEIF containers used on phones, and camera RAW formats.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".svg", ".webp", ".heic", ".heif", ".raw",
    ".cr2", ".nef", ".orf", ".sr2", ".arw", ".dng", ".rw2",
];

/// Directories whose full path contains any of these substrings are pruned.
pub const IGNORED_DIRECTORIES: &[&str] = &[
    "Windows",
    "Program Files",
    "System Volume Information",
    "$Recycle.Bin",
    "Users",
    "SmartPSS",
    "Python312",
    "ProgramData",
];

/// Returns the extension of the final path element, starting at its last `.`.
///
/// Unlike [`Path::extension`], a dotfile such as `.png` yields `.png`.
pub fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let dot = name.rfind('.')?;
    Some(name[dot..].to_string())
}

pub fn is_image_path(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Case-sensitive substring matcher over full directory paths.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    substrings: Vec<String>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let substrings = patterns
            .iter()
            .filter(|pattern| !pattern.is_empty())
            .cloned()
            .collect();
        Self { substrings }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.substrings.is_empty() {
            return false;
        }

        let text = path.to_string_lossy();
        self.substrings
            .iter()
            .any(|pattern| text.contains(pattern.as_str()))
    }
}
