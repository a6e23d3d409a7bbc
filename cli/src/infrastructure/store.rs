//! File store adapter
//!
//! Generation and deployment only touch the filesystem through [`FileStore`],
//! so they can run against an in-memory store in tests.

use std::io;
use std::path::Path;

/// Filesystem operations needed by the generator and sequencer
pub trait FileStore {
    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Names of the direct child directories of `path`, sorted
    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FileStore`] backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory [`FileStore`] for tests

    use super::FileStore;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct State {
        dirs: BTreeSet<PathBuf>,
        files: BTreeMap<PathBuf, String>,
        /// Every path passed to a read or write operation
        touched: Vec<PathBuf>,
    }

    /// Virtual filesystem; writes under any `fail_writes_under` prefix error out
    #[derive(Debug, Default)]
    pub struct MemoryFileStore {
        state: Mutex<State>,
        fail_writes_under: Vec<PathBuf>,
    }

    impl MemoryFileStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_writes_under(mut self, prefix: impl Into<PathBuf>) -> Self {
            self.fail_writes_under.push(prefix.into());
            self
        }

        pub fn add_dir(&self, path: impl AsRef<Path>) {
            let mut state = self.state.lock().unwrap();
            for ancestor in path.as_ref().ancestors() {
                if !ancestor.as_os_str().is_empty() {
                    state.dirs.insert(ancestor.to_path_buf());
                }
            }
        }

        pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.state
                .lock()
                .unwrap()
                .files
                .insert(path.to_path_buf(), contents.to_string());
        }

        pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
            self.state.lock().unwrap().files.get(path.as_ref()).cloned()
        }

        /// Files directly inside `dir`, sorted
        pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
            let dir = dir.as_ref();
            self.state
                .lock()
                .unwrap()
                .files
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .cloned()
                .collect()
        }

        pub fn touched(&self) -> Vec<PathBuf> {
            self.state.lock().unwrap().touched.clone()
        }

        fn touch(&self, path: &Path) {
            self.state.lock().unwrap().touched.push(path.to_path_buf());
        }

        fn write_denied(&self, path: &Path) -> bool {
            self.fail_writes_under.iter().any(|p| path.starts_with(p))
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
    }

    impl FileStore for MemoryFileStore {
        fn is_dir(&self, path: &Path) -> bool {
            self.state.lock().unwrap().dirs.contains(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.state.lock().unwrap().files.contains_key(path)
        }

        fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>> {
            let state = self.state.lock().unwrap();
            if !state.dirs.contains(path) {
                return Err(not_found(path));
            }
            Ok(state
                .dirs
                .iter()
                .filter(|d| d.parent() == Some(path))
                .filter_map(|d| d.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .collect())
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.touch(path);
            self.file(path).ok_or_else(|| not_found(path))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            self.touch(path);
            if self.write_denied(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            let parent_exists = path.parent().map_or(false, |p| self.is_dir(p));
            if !parent_exists {
                return Err(not_found(path));
            }
            self.state
                .lock()
                .unwrap()
                .files
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            self.touch(path);
            if self.write_denied(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.add_dir(path);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
            self.touch(path);
            let mut state = self.state.lock().unwrap();
            if !state.dirs.contains(path) {
                return Err(not_found(path));
            }
            state.dirs.retain(|d| !d.starts_with(path));
            state.files.retain(|f, _| !f.starts_with(path));
            Ok(())
        }
    }
}
