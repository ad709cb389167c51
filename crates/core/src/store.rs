use std::io;
use std::path::Path;

/// Output side of a build.
///
/// Paths are absolute or relative to the process working directory; the store never
/// interprets them against a site root.
pub trait FileStore {
    /// Write `content` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Recursively copy `source` into `dest`, overwriting existing files.
    fn copy_dir(&self, source: &Path, dest: &Path) -> io::Result<()>;

    /// Recursively remove `path`; a missing directory is not an error.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// [`FileStore`] backed by the local filesystem.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        log::trace!("Writing {}", path.display());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    fn copy_dir(&self, source: &Path, dest: &Path) -> io::Result<()> {
        log::debug!("Copying {} to {}", source.display(), dest.display());
        std::fs::create_dir_all(dest)?;
        for entry in walkdir::WalkDir::new(source)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::other)?;
            let rel = entry
                .path()
                .strip_prefix(source)
                .map_err(io::Error::other)?;
            let target = dest.join(rel);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                log::trace!("Copying {}", entry.path().display());
                std::fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => {
                log::debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/index.html");
        LocalFileStore.write(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn copy_dir_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("assets");
        std::fs::create_dir_all(src.join("css")).unwrap();
        std::fs::write(src.join("image.png"), "png").unwrap();
        std::fs::write(src.join("css/site.css"), "body {}").unwrap();

        let dest = dir.path().join("build/assets");
        LocalFileStore.copy_dir(&src, &dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest.join("image.png")).unwrap(), "png");
        assert_eq!(
            std::fs::read_to_string(dest.join("css/site.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn remove_missing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        LocalFileStore.remove_dir(&dir.path().join("nope")).unwrap();
    }
}
