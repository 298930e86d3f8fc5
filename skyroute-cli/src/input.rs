//! Loading delivery coordinates from text files.
//!
//! An input file holds one delivery per line as two whitespace-separated
//! numbers, `x y`, in metres. Blank lines are ignored.

use camino::{Utf8Path, Utf8PathBuf};
use skyroute_core::{Point, PointSet};
use thiserror::Error;

/// Largest number of deliveries accepted from one file.
pub const MAX_POINTS: usize = 4096;

const INPUT_EXTENSION: &str = "txt";

/// Errors raised while loading a delivery file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The path does not end in `.txt`.
    #[error("{path} must be a .txt file")]
    NotText { path: Utf8PathBuf },
    /// Nothing exists at the path.
    #[error("{path} not found")]
    Missing { path: Utf8PathBuf },
    /// The path exists but is not a regular file.
    #[error("{path} is not a file")]
    NotAFile { path: Utf8PathBuf },
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file holds no deliveries.
    #[error("{path} is empty")]
    Empty { path: Utf8PathBuf },
    /// The file holds more deliveries than a plan can take.
    #[error("{path} holds {count} deliveries; at most {MAX_POINTS} are allowed")]
    TooManyPoints { path: Utf8PathBuf, count: usize },
    /// A line does not hold exactly two fields.
    #[error("improper coordinate formatting at line {line}")]
    MalformedLine { line: usize },
    /// A field is not a finite number.
    #[error("improper coordinate {value:?} at line {line}")]
    InvalidCoordinate { line: usize, value: String },
}

/// Validate `path` and load its deliveries.
pub fn load_points(path: &Utf8Path) -> Result<PointSet, InputError> {
    if path.extension() != Some(INPUT_EXTENSION) {
        return Err(InputError::NotText {
            path: path.to_path_buf(),
        });
    }
    match skyroute_fs::metadata(path) {
        Ok(Some(meta)) if meta.is_file() => {}
        Ok(Some(_)) => {
            return Err(InputError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(None) => {
            return Err(InputError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(InputError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let text = skyroute_fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points(&text)?;
    if points.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }
    if points.len() > MAX_POINTS {
        return Err(InputError::TooManyPoints {
            path: path.to_path_buf(),
            count: points.len(),
        });
    }
    Ok(points)
}

/// Parse deliveries from `text`, reporting 1-based line numbers on failure.
pub fn parse_points(text: &str) -> Result<PointSet, InputError> {
    text.lines()
        .enumerate()
        .filter(|(_, content)| !content.trim().is_empty())
        .map(|(index, content)| parse_line(index + 1, content))
        .collect()
}

fn parse_line(line: usize, content: &str) -> Result<Point, InputError> {
    let mut fields = content.split_whitespace();
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(InputError::MalformedLine { line });
    };
    Ok(Point::new(parse_coordinate(line, x)?, parse_coordinate(line, y)?))
}

fn parse_coordinate(line: usize, field: &str) -> Result<f64, InputError> {
    field
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::InvalidCoordinate {
            line,
            value: field.to_owned(),
        })
}
