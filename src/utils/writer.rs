use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Truncate (or create) the file at `path` and write `content` to it.
///
/// The file handle is dropped on every exit path.
pub fn overwrite_file(path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_ref())?;
    file.flush()
}

/// Write signature files to a target
pub trait SignatureWriter {
    fn overwrite(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Implementation based on the local file system
#[derive(Clone, Copy, Debug, Default)]
pub struct FsWriter;

impl SignatureWriter for FsWriter {
    fn overwrite(&self, path: &Path, content: &str) -> io::Result<()> {
        overwrite_file(path, content)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.asc");

        overwrite_file(&path, "a much longer first content").unwrap();
        FsWriter.overwrite(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_overwrite_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = overwrite_file(dir.path().join("missing/file.asc"), "content").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
