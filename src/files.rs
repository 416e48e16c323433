//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! Recursive directory listing for the bulk document loaders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MgmtError;

/// One file found under a walked directory root.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Bare file name, for example `myfile.xml`.
    pub name: String,
    /// Full path to the file on the local filesystem.
    pub path: PathBuf,
    /// Path between the walked root and the file, `/`-separated with a
    /// leading separator, for example `/files/myfile.xml`.
    pub relative: String,
}

/// Recursively list every file under `root`.
///
/// Directories are descended in directory-entry order; symlinks are not
/// followed as directories. Non-UTF-8 file names are skipped.
pub fn walk_directory(root: impl AsRef<Path>) -> Result<Vec<FileEntry>, MgmtError> {
    let root = root.as_ref();
    let mut entries = Vec::new();
    walk_into(root, root, &mut entries)?;
    Ok(entries)
}

fn walk_into(root: &Path, dir: &Path, out: &mut Vec<FileEntry>) -> Result<(), MgmtError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk_into(root, &path, out)?;
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let relative = match path.strip_prefix(root) {
            Ok(rel) => {
                let mut s = String::new();
                for part in rel.components() {
                    s.push('/');
                    s.push_str(&part.as_os_str().to_string_lossy());
                }
                s
            }
            // read_dir only yields paths under root
            Err(_) => format!("/{}", name),
        };
        out.push(FileEntry {
            name,
            path,
            relative,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(path: &Path, content: &str) {
        let mut f = File::create(path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn walks_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.xml"), "<a/>");
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub").join("inner.json"), "{}");

        let mut entries = walk_directory(dir.path()).unwrap();
        entries.sort_by(|a, b| a.relative.cmp(&b.relative));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "inner.json");
        assert_eq!(entries[0].relative, "/sub/inner.json");
        assert_eq!(entries[1].name, "top.xml");
        assert_eq!(entries[1].relative, "/top.xml");
        assert!(entries[1].path.ends_with("top.xml"));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(walk_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let err = walk_directory(&gone).unwrap_err();
        assert_eq!(err.code, crate::MgmtErrorCode::IoError);
    }
}
