//! Writing per-drone route files.
//!
//! Each fleet size gets its own directory, `{root}_{k}_DRONES`, beneath the
//! output directory. Inside it every drone's route is written to
//! `{root}_{drone}_SOLUTION_{length}.txt` as 1-based delivery indices, one per
//! line, with the length truncated to whole metres.

use std::fmt::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use skyroute_core::Solution;
use thiserror::Error;

/// Errors raised while exporting routes.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The fleet directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A route file could not be written.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The input's file name without its extension.
pub fn root_name(input: &Utf8Path) -> &str {
    input.file_stem().unwrap_or("skyroute")
}

/// Directory holding the routes of a `drones`-sized fleet.
pub fn fleet_dir(output_dir: &Utf8Path, root: &str, drones: u8) -> Utf8PathBuf {
    output_dir.join(format!("{root}_{drones}_DRONES"))
}

/// File name for the route of 1-based `drone`.
pub fn route_file_name(root: &str, drone: usize, length: f64) -> String {
    format!("{root}_{drone}_SOLUTION_{}.txt", length.trunc() as u64)
}

/// One-based indices of `route`, one per line.
pub fn route_contents(route: &[usize]) -> String {
    route.iter().fold(String::new(), |mut contents, index| {
        let _ = writeln!(contents, "{}", index + 1);
        contents
    })
}

/// Write every route of `solution` and return the paths written.
pub fn write_solution(
    output_dir: &Utf8Path,
    root: &str,
    solution: &Solution,
) -> Result<Vec<Utf8PathBuf>, ExportError> {
    let dir = fleet_dir(output_dir, root, solution.drone_count());
    skyroute_fs::ensure_dir(&dir).map_err(|source| ExportError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    solution
        .drones()
        .map(|drone| {
            let path = dir.join(route_file_name(root, drone.index + 1, drone.route_length));
            skyroute_fs::write_file(&path, &route_contents(drone.route)).map_err(|source| {
                ExportError::WriteFile {
                    path: path.clone(),
                    source,
                }
            })?;
            Ok(path)
        })
        .collect()
}
