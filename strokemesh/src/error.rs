//! Module containing the Strokemesh universal error type
use thiserror::Error;

/// Universal error type for Strokemesh
///
/// Meshing itself never fails; these errors come from reading point files and
/// writing meshes.
#[derive(Error, Debug)]
pub enum Error {
    /// A value in a point file could not be parsed as a number
    #[error("line {line}: could not parse `{text}` as a number")]
    ParseError {
        /// 1-based line number
        line: usize,
        /// Offending token
        text: String,
    },

    /// A line in a point file has the wrong number of values
    #[error("line {line}: expected {expected} values, found {count}")]
    BadPointArity {
        /// 1-based line number
        line: usize,
        /// Number of values found on the line
        count: usize,
        /// Human-readable description of the accepted counts
        expected: &'static str,
    },

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
