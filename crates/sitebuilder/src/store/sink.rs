//! Destinations for export files.

use crate::commands::transfer::ExportFile;
use crate::error::{Result, SiteError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Receives a finished export, the way a browser receives a download.
pub trait FileSink {
    /// Stores the file and returns where it ended up.
    fn deliver(&self, file: &ExportFile) -> Result<PathBuf>;
}

/// Writes exports into a directory.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirSink {
    fn deliver(&self, file: &ExportFile) -> Result<PathBuf> {
        if file.file_name.contains(['/', '\\']) || file.file_name.starts_with('.') {
            return Err(SiteError::Store(format!(
                "Refusing to write export as {:?}",
                file.file_name
            )));
        }
        fs::create_dir_all(&self.dir).map_err(SiteError::Io)?;

        let target = self.dir.join(&file.file_name);
        let tmp = self.dir.join(format!(".export-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, &file.contents).map_err(SiteError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(SiteError::Io(e));
        }
        tracing::debug!(path = %target.display(), "export written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str) -> ExportFile {
        ExportFile {
            file_name: name.to_string(),
            contents: "{\"pages\":[]}".to_string(),
        }
    }

    #[test]
    fn test_dir_sink_writes_file() {
        let dir = TempDir::new().unwrap();
        let sink = DirSink::new(dir.path().join("downloads"));

        let path = sink.deliver(&file("website-design-1.json")).unwrap();
        assert_eq!(path, dir.path().join("downloads").join("website-design-1.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"pages\":[]}");

        let leftovers = fs::read_dir(sink.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_dir_sink_rejects_paths() {
        let dir = TempDir::new().unwrap();
        let sink = DirSink::new(dir.path());
        assert!(sink.deliver(&file("../out.json")).is_err());
        assert!(sink.deliver(&file(".hidden.json")).is_err());
    }
}
