//! Test helpers for writing delivery files and building plan arguments.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

use crate::plan::PlanArgs;

/// Deliveries forming two well separated neighbourhoods.
pub(super) const TWO_NEIGHBOURHOODS: &str = "\
0 0
1.5 0.5
0.5 2
210 40
212 41.5
209.5 43
";

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write test file");
        path
    }
}

/// Fast, reproducible arguments for planning `input` into `output_dir`.
pub(super) fn quick_args(input: &Utf8Path, output_dir: &Utf8Path) -> PlanArgs {
    PlanArgs {
        input: Some(input.to_path_buf()),
        output_dir: Some(output_dir.to_path_buf()),
        restarts: Some(10),
        search_seconds: Some(0.01),
        max_drones: Some(3),
        seed: Some(7),
        ..PlanArgs::default()
    }
}
