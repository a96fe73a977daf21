use std::fs;
use std::path::PathBuf;

use toolgen_core::pipeline::FileDownload;

/// Saves exports into a fixed directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn target(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileDownload for DirectoryDownload {
    fn trigger_file_download(&self, filename: &str, content: &str) -> std::io::Result<()> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.target(filename);
        fs::write(&path, content.as_bytes())?;
        tracing::info!(path = %path.display(), bytes = content.len(), "exported generated code");
        Ok(())
    }
}
