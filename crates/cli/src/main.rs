use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use image_census_core::{
    accepted_directories, render_directory_ranking, render_image_line, render_size_summary,
    run_scan_with_callback, ScanEvent, ScanOptions,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: image-census <directory>";

#[derive(Debug, Parser)]
#[command(
    name = "image-census",
    version,
    about = "Find image files under a directory, total their size, and list image-heavy folders."
)]
struct Cli {
    /// Root directory to scan.
    #[arg(value_name = "DIRECTORY")]
    root: Option<PathBuf>,

    /// Anything after the root is ignored.
    #[arg(hide = true)]
    extra: Vec<OsString>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(root) = cli.root else {
        println!("{USAGE}");
        return Ok(());
    };
    if !cli.extra.is_empty() {
        warn!(ignored = ?cli.extra, "only the first directory argument is scanned");
    }

    let options = ScanOptions {
        root,
        ..ScanOptions::default()
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_census(&options, &mut out)
}

/// Scan errors are reported on `out` and swallowed; only write failures propagate.
fn run_census<W: Write>(options: &ScanOptions, out: &mut W) -> Result<()> {
    writeln!(out, "Scanning for image files in: {}", options.root.display())?;

    let mut write_error = None;
    let result = run_scan_with_callback(options, |event| match event {
        ScanEvent::ImageFound(image) => {
            if write_error.is_none() {
                if let Err(err) = writeln!(out, "{}", render_image_line(&image)) {
                    write_error = Some(err);
                }
            }
        }
    });
    if let Some(err) = write_error {
        return Err(err.into());
    }

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            writeln!(out, "Error scanning directory: {err}")?;
            return Ok(());
        }
    };

    write!(out, "{}", render_size_summary(report.total_size_bytes))?;

    let accepted = accepted_directories(&report.directory_counts, options.min_images);
    write!(out, "{}", render_directory_ranking(&accepted))?;
    for entry in &accepted {
        writeln!(out, "{}", entry.path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::{run_census, Cli};
    use anyhow::Result;
    use clap::Parser;
    use image_census_core::ScanOptions;
    use std::ffi::OsString;
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn census(options: &ScanOptions) -> Result<String> {
        let mut out = Vec::new();
        run_census(options, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn options_for(root: &Path) -> ScanOptions {
        ScanOptions {
            root: root.to_path_buf(),
            ignored_directories: Vec::new(),
            ..ScanOptions::default()
        }
    }

    /// Removes `target` once the first `File:` line reaches the buffer.
    struct RemoveAfterFirstImage {
        buf: Vec<u8>,
        target: PathBuf,
    }

    impl Write for RemoveAfterFirstImage {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            if self.target.exists() && String::from_utf8_lossy(&self.buf).contains("File: ") {
                fs::remove_dir_all(&self.target)?;
            }
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn root_argument_is_optional() {
        let cli = Cli::try_parse_from(["image-census"]).expect("parse");
        assert!(cli.root.is_none());

        let cli = Cli::try_parse_from(["image-census", "/photos", "extra"]).expect("parse");
        assert_eq!(cli.root.as_deref(), Some(Path::new("/photos")));
        assert_eq!(cli.extra, vec![OsString::from("extra")]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_extra_arguments_are_accepted() {
        use std::os::unix::ffi::OsStringExt;

        let junk = OsString::from_vec(vec![0x66, 0x6f, 0xff, 0x6f]);
        let args = vec![
            OsString::from("image-census"),
            OsString::from("/photos"),
            junk.clone(),
        ];
        let cli = Cli::try_parse_from(args).expect("parse");
        assert_eq!(cli.extra, vec![junk]);
    }

    #[test]
    fn prints_full_report_in_order() -> Result<()> {
        let temp = TempDir::new()?;
        let album = temp.path().join("album");
        fs::create_dir_all(&album)?;
        for i in 0..6 {
            fs::write(album.join(format!("{i}.png")), vec![0_u8; 1024])?;
        }
        fs::write(temp.path().join("cover.JPEG"), vec![0_u8; 512])?;

        let output = census(&options_for(temp.path()))?;

        let root = temp.path().display().to_string();
        let album = album.display().to_string();
        let mut expected = format!("Scanning for image files in: {root}\n");
        for i in 0..6 {
            expected.push_str(&format!("File: {album}/{i}.png | Size: 1024 bytes\n"));
        }
        expected.push_str(&format!("File: {root}/cover.JPEG | Size: 512 bytes\n"));
        expected.push_str("\nTotal Size: 6656 bytes\n");
        expected.push_str("Total Size: 6.50 KB\n");
        expected.push_str("Total Size: 0.01 MB\n");
        expected.push_str("Total Size: 0.00 GB\n");
        expected.push_str("\nDirectories sorted by number of image files:\n");
        expected.push_str(&format!("Directory: {album} | Image Files: 6\n"));
        expected.push_str(&format!("{album}\n"));

        assert_eq!(output, expected);
        Ok(())
    }

    #[test]
    fn scan_error_stops_before_summary() -> Result<()> {
        let temp = TempDir::new()?;
        let output = census(&options_for(&temp.path().join("missing")))?;

        let mut lines = output.lines();
        assert!(lines
            .next()
            .is_some_and(|line| line.starts_with("Scanning for image files in: ")));
        assert!(lines
            .next()
            .is_some_and(|line| line.starts_with("Error scanning directory: ")));
        assert!(lines.next().is_none());
        assert!(!output.contains("Total Size"));
        Ok(())
    }

    #[test]
    fn error_mid_walk_keeps_printed_files_and_skips_summary() -> Result<()> {
        let temp = TempDir::new()?;
        for dir in ["a", "b"] {
            fs::create_dir_all(temp.path().join(dir))?;
        }
        fs::write(temp.path().join("a").join("1.jpg"), vec![0_u8; 4])?;
        fs::write(temp.path().join("b").join("2.jpg"), vec![0_u8; 4])?;

        let mut out = RemoveAfterFirstImage {
            buf: Vec::new(),
            target: temp.path().join("b"),
        };
        run_census(&options_for(temp.path()), &mut out)?;
        let output = String::from_utf8(out.buf)?;

        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3, "{output}");
        assert!(lines[0].starts_with("Scanning for image files in: "));
        assert_eq!(
            lines[1],
            format!(
                "File: {} | Size: 4 bytes",
                temp.path().join("a").join("1.jpg").display()
            )
        );
        assert!(lines[2].starts_with("Error scanning directory: "));
        assert!(!output.contains("Total Size"));
        Ok(())
    }
}
