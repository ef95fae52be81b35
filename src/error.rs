use std::path::PathBuf;
use thiserror::Error;

/// Precondition violations of the clustering engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Cannot cluster an empty point set")]
    NoPoints,

    #[error("Cluster count must be at least 1")]
    ZeroClusters,

    #[error("Cannot draw {k} initial centroids from {points} points")]
    NotEnoughPoints { k: usize, points: usize },

    #[error("Initialization produced {got} centroids, expected {k}")]
    InitMismatch { k: usize, got: usize },

    #[error("Point at position {position} carries id {id} (ids must follow input order)")]
    NonSequentialId { position: usize, id: usize },

    #[error("Point {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: usize },
}

/// Failures of the input provider.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: std::io::Error },

    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("Line {line}: expected `lat,lon`, found {fields} field(s)")]
    FieldCount { line: usize, fields: usize },

    #[error("Line {line}: `{value}` is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: coordinate `{value}` is not finite")]
    NonFinite { line: usize, value: String },
}

/// Failures of the output sink.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create {}: {source}", path.display())]
    Create { path: PathBuf, source: std::io::Error },

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}
