//! Capability-based filesystem helpers for reading inputs and writing exports.
//!
//! Every operation resolves an ambient base directory once with `cap-std` and
//! then works relative to it, so absolute and relative `camino` paths go
//! through the same code.
#![forbid(unsafe_code)]

use std::io::{self, Read, Write};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Read a whole UTF-8 text file.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    let mut file = dir.open(name.as_str())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Metadata for `path`, or `None` when nothing exists there.
///
/// A missing parent directory counts as a missing entry rather than an error.
pub fn metadata(path: &Utf8Path) -> io::Result<Option<fs_utf8::Metadata>> {
    let (dir, name) = match open_parent(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(Some(meta)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Create `path` and any missing ancestors.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    if path.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_base(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Create or truncate the file at `path` and write `contents` to it.
///
/// The parent directory must already exist.
pub fn write_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    let (dir, name) = open_parent(path)?;
    let mut file = dir.create(name.as_str())?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

/// Open the parent directory of `path` and return it with the file name.
pub fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let (base, rest) = split_base(parent)?;
    if rest.as_str().is_empty() {
        return Ok((base, name));
    }
    Ok((base.open_dir(&rest)?, name))
}

/// Split `path` into an opened ambient root and the remainder below it.
///
/// Absolute paths are rooted at the filesystem root (or the drive prefix on
/// Windows); relative paths are rooted at the current directory. Leading `..`
/// components become part of the root, since the remainder may not leave it;
/// any later `..` is folded lexically into the remainder.
pub fn split_base(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut base = Utf8PathBuf::new();
    let mut rest = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => base.push(component.as_str()),
            Utf8Component::ParentDir if rest.as_str().is_empty() => base.push(".."),
            Utf8Component::ParentDir => {
                rest.pop();
            }
            Utf8Component::CurDir => {}
            Utf8Component::Normal(name) => rest.push(name),
        }
    }
    if base.as_str().is_empty() {
        base.push(".");
    }
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn writes_and_reads_back(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let path = root.join("points.txt");
        write_file(&path, "1 2\n3 4\n").expect("write file");
        assert_eq!(read_to_string(&path).expect("read file"), "1 2\n3 4\n");
        assert!(metadata(&path).expect("stat file").is_some_and(|meta| meta.is_file()));
    }

    #[rstest]
    fn creates_nested_directories(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let nested = root.join("plans").join("points_2_DRONES");
        ensure_dir(&nested).expect("create directories");
        ensure_dir(&nested).expect("existing directories are fine");
        assert!(nested.as_std_path().is_dir());
        assert!(metadata(&nested).expect("stat directory").is_some_and(|meta| meta.is_dir()));
    }

    #[rstest]
    fn missing_entries_have_no_metadata(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let missing_file = root.join("absent.txt");
        let missing_parent = root.join("absent").join("deeper.txt");
        assert!(metadata(&missing_file).expect("stat missing file").is_none());
        assert!(metadata(&missing_parent).expect("stat missing parent").is_none());
    }

    #[rstest]
    fn splits_absolute_paths_at_the_root(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let (_, relative) = split_base(&root).expect("split absolute path");
        assert!(relative.is_relative());
        assert!(root.as_str().ends_with(relative.as_str()));
    }

    #[rstest]
    fn splits_relative_paths_at_the_current_directory() {
        let (_, relative) = split_base(Utf8Path::new("out/plans")).expect("split relative path");
        assert_eq!(relative, Utf8PathBuf::from("out/plans"));
    }

    #[rstest]
    #[case("../plans", "plans")]
    #[case("../../plans/pecan_2_DRONES", "plans/pecan_2_DRONES")]
    #[case("./out/./plans", "out/plans")]
    #[case("out/drafts/../plans", "out/plans")]
    #[case("..", "")]
    fn parent_components_stay_out_of_the_remainder(#[case] path: &str, #[case] expected: &str) {
        let (_, relative) = split_base(Utf8Path::new(path)).expect("split relative path");
        assert_eq!(relative, Utf8PathBuf::from(expected));
    }

    #[rstest]
    fn creates_directories_through_parent_components(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let target = root.join("work").join("..").join("plans").join("pecan_2_DRONES");
        ensure_dir(&target).expect("create directories");
        assert!(root.join("plans").join("pecan_2_DRONES").as_std_path().is_dir());
    }

    #[cfg(unix)]
    #[rstest]
    fn creates_directories_above_the_current_directory(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let cwd = Utf8PathBuf::from_path_buf(std::env::current_dir().expect("current dir"))
            .expect("utf-8 current dir");
        let mut target = Utf8PathBuf::new();
        for _ in cwd
            .components()
            .filter(|component| matches!(component, Utf8Component::Normal(_)))
        {
            target.push("..");
        }
        target.push(root.strip_prefix("/").expect("absolute temp dir"));
        target.push("plans");

        ensure_dir(&target).expect("create directories above the current directory");
        assert!(root.join("plans").as_std_path().is_dir());
    }

    #[rstest]
    fn metadata_distinguishes_files_directories_and_gaps(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let file = root.join("points.txt");
        write_file(&file, "0 0\n").expect("write file");

        let file_meta = metadata(&file).expect("stat file").expect("file exists");
        assert!(file_meta.is_file());
        let dir_meta = metadata(&root).expect("stat dir").expect("dir exists");
        assert!(dir_meta.is_dir());
        assert!(metadata(&root.join("absent.txt")).expect("stat missing").is_none());
    }
}
