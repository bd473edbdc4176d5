//! Scratch files for staged and normalized videos.
//!
//! A [`ScratchFile`] exclusively owns a file inside the scratch directory and removes it
//! when dropped, so every exit path of the pipeline (success, error, cancellation) leaves
//! the directory as it found it.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

const SCRATCH_PREFIX: &str = "tubely-";

/// Directory in which scratch files are created.
#[derive(Debug, Clone)]
pub struct ScratchSpace {
    dir: PathBuf,
}

impl ScratchSpace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `dir` when given, the system temp directory otherwise. The directory is
    /// created if missing and must be a writable directory.
    pub fn from_config(dir: Option<&Path>) -> io::Result<Self> {
        let space = match dir {
            Some(dir) => Self::new(dir),
            None => Self::new(std::env::temp_dir()),
        };
        space.prepare()?;
        Ok(space)
    }

    fn prepare(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        if !std::fs::metadata(&self.dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("scratch path {} is not a directory", self.dir.display()),
            ));
        }
        // Fails early on a read-only directory instead of on the first upload.
        drop(self.reserve(".check")?);
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn builder<'a>(suffix: &'a str) -> tempfile::Builder<'static, 'a> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX).suffix(suffix);
        builder
    }

    /// Create a new scratch file and return an open async handle to it.
    pub fn create(&self, suffix: &str) -> io::Result<(tokio::fs::File, ScratchFile)> {
        let named = Self::builder(suffix).tempfile_in(&self.dir)?;
        let (file, path) = named.into_parts();
        Ok((tokio::fs::File::from_std(file), ScratchFile { path }))
    }

    /// Reserve a distinct, empty scratch file for an external tool to overwrite.
    pub fn reserve(&self, suffix: &str) -> io::Result<ScratchFile> {
        let path = Self::builder(suffix).tempfile_in(&self.dir)?.into_temp_path();
        Ok(ScratchFile { path })
    }
}

/// A file in the scratch directory, deleted on drop.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size on disk; a missing file reports zero.
    pub async fn len(&self) -> io::Result<u64> {
        match tokio::fs::metadata(self.path()).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    pub async fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncWriteExt;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_scratch_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let space = ScratchSpace::new(dir.path());

        let (mut file, scratch) = space.create(".upload").unwrap();
        file.write_all(b"hello").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        assert_eq!(scratch.len().await.unwrap(), 5);
        assert!(scratch.path().starts_with(dir.path()));
        assert_eq!(entries(dir.path()), 1);

        drop(scratch);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_reserved_files_are_distinct_and_empty() {
        let dir = TempDir::new().unwrap();
        let space = ScratchSpace::new(dir.path());

        let a = space.reserve(".mp4").unwrap();
        let b = space.reserve(".mp4").unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.is_empty().await.unwrap());

        drop(a);
        drop(b);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_file_reports_zero_length() {
        let dir = TempDir::new().unwrap();
        let scratch = ScratchSpace::new(dir.path()).reserve(".mp4").unwrap();
        std::fs::remove_file(scratch.path()).unwrap();
        assert_eq!(scratch.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_from_config_creates_missing_dir() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("nested").join("scratch");

        let space = ScratchSpace::from_config(Some(&dir)).unwrap();
        assert!(dir.is_dir());
        assert_eq!(entries(&dir), 0);

        let (_file, scratch) = space.create(".upload").unwrap();
        assert!(scratch.path().starts_with(&dir));
    }

    #[test]
    fn test_from_config_rejects_file_path() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        assert!(ScratchSpace::from_config(Some(&file)).is_err());
    }
}
