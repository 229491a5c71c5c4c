//! Atomic publication of the rendered page

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write the page under `output_dir` and swap it into place
///
/// The document is written to a temporary file in the same directory and
/// renamed over `index.html`, so a concurrent reader never observes a
/// partially written page.
pub fn publish_page(html: &str, output_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let tmp = output_dir.join("index.html.tmp");
    let target = output_dir.join("index.html");
    fs::write(&tmp, html)?;
    fs::rename(&tmp, &target)?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_creates_directory_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("web");

        let path = publish_page("<html></html>", &output_dir).unwrap();

        assert_eq!(path, output_dir.join("index.html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        assert!(!output_dir.join("index.html.tmp").exists());
    }

    #[test]
    fn test_publish_overwrites_prior_content() {
        let dir = tempfile::tempdir().unwrap();

        publish_page("first", dir.path()).unwrap();
        publish_page("second", dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(content, "second");
    }
}
