//! Storage ports used to persist change files.
//!
//! The change model never touches the filesystem directly. It reads through a
//! [`Reader`] and writes through a [`Writer`], so tests can substitute closures
//! and the CLI plugs in [`FsReader`] / [`FsWriter`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File mode used for change files: owner read/write, world readable.
pub const CHANGE_FILE_MODE: u32 = 0o644;

/// Reads the raw bytes stored at a path.
pub trait Reader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Writes bytes to a path with the given permission mode.
pub trait Writer {
    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()>;
}

impl<F> Reader for F
where
    F: Fn(&Path) -> io::Result<Vec<u8>>,
{
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self(path)
    }
}

impl<F> Writer for F
where
    F: Fn(&Path, &[u8], u32) -> io::Result<()>,
{
    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        self(path, contents, mode)
    }
}

/// Reads files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl Reader for FsReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Writes files to the local filesystem.
///
/// Parent directories are created on demand. Existing files are never
/// replaced: a second change deriving the same file name fails with
/// [`io::ErrorKind::AlreadyExists`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl Writer for FsWriter {
    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let file = options.open(path)?;
        write_or_remove(file, path, contents)
    }
}

/// Writes `contents` into the freshly created `file` at `path`.
///
/// On failure the partial file is removed so a retry does not hit
/// `AlreadyExists`; the write error is returned.
fn write_or_remove<F: Write>(mut file: F, path: &Path, contents: &[u8]) -> io::Result<()> {
    let result = file.write_all(contents).and_then(|_| file.flush());
    if let Err(e) = result {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %remove_err, "could not remove partial file");
        }
        return Err(e);
    }
    Ok(())
}

/// Lists the `.yaml` files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn list_yaml_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .map(|ext| ext == "yaml" || ext == "yml")
            .unwrap_or(false);
        if is_yaml && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
