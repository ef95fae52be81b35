//! Input provider and output sink for delimited point files.
//!
//! Input rows are `lat,lon` without header; the row order defines the point ids.
//! Assignments are written as `pointId,clusterId`, centroids as `lon,lat` with six decimals.

use crate::{
    error::{InputError, OutputError},
    Centroid, Clustering, Point, Primitive,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

pub const CLUSTERS_FILE: &str = "clusters.csv";
pub const CENTROIDS_FILE: &str = "centroids.csv";

/// Parse `lat,lon` rows. Blank lines are skipped; every other row must hold exactly two
/// finite numbers.
pub fn read_points<T: Primitive, R: BufRead>(reader: R) -> Result<Vec<Point<T>>, InputError> {
    let mut points = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_nr = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 2 {
            return Err(InputError::FieldCount { line: line_nr, fields: fields.len() });
        }
        let lat = parse_coordinate::<T>(fields[0], line_nr)?;
        let lon = parse_coordinate::<T>(fields[1], line_nr)?;
        points.push(Point::new(points.len(), lat, lon));
    }
    Ok(points)
}

fn parse_coordinate<T: Primitive>(value: &str, line: usize) -> Result<T, InputError> {
    let v: T = value.parse()
        .map_err(|_| InputError::InvalidNumber { line, value: value.to_string() })?;
    if !v.is_finite() {
        return Err(InputError::NonFinite { line, value: value.to_string() });
    }
    Ok(v)
}

/// Read points from a file. A file that cannot be opened is reported right away.
pub fn load_points<T: Primitive>(path: impl AsRef<Path>) -> Result<Vec<Point<T>>, InputError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| InputError::Open { path: path.to_path_buf(), source })?;
    read_points(BufReader::new(file))
}

/// Write one `pointId,clusterId` line per point, ordered by point id.
pub fn write_assignments<W: Write>(mut writer: W, assignments: &[usize]) -> Result<(), OutputError> {
    for (point_id, cluster_id) in assignments.iter().enumerate() {
        writeln!(writer, "{},{}", point_id, cluster_id)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one `lon,lat` line per centroid, six decimals, in centroid-sequence order.
pub fn write_centroids<T: Primitive, W: Write>(mut writer: W, centroids: &[Centroid<T>]) -> Result<(), OutputError> {
    for c in centroids {
        writeln!(writer, "{:.6},{:.6}", c.lon, c.lat)?;
    }
    writer.flush()?;
    Ok(())
}

fn create(path: PathBuf) -> Result<BufWriter<File>, OutputError> {
    File::create(&path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::Create { path, source })
}

/// Write `clusters.csv` and `centroids.csv` into `dir`. Returns both paths.
pub fn save_clustering<T: Primitive>(dir: impl AsRef<Path>, clustering: &Clustering<T>) -> Result<(PathBuf, PathBuf), OutputError> {
    let dir = dir.as_ref();
    let clusters_path = dir.join(CLUSTERS_FILE);
    let centroids_path = dir.join(CENTROIDS_FILE);
    write_assignments(create(clusters_path.clone())?, &clustering.assignments)?;
    write_centroids(create(centroids_path.clone())?, &clustering.centroids)?;
    Ok((clusters_path, centroids_path))
}
