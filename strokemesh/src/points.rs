//! Plain-text point files
//!
//! Each line holds one point as whitespace-separated numbers.  Blank lines are
//! skipped, as is anything following a `#`.
//! ```
//! let text = "# a short stroke\n0 0 0\n0 0 0.5\n\n0 0.25 1.0\n";
//! let pts = strokemesh::points::read_points(text.as_bytes())?;
//! assert_eq!(pts.len(), 3);
//! # Ok::<(), strokemesh::Error>(())
//! ```
use crate::{Error, Point3};
use std::io::BufRead;

/// Confidence assigned to point cloud samples which don't specify one
pub const DEFAULT_CONFIDENCE: f32 = 1.0;

/// Reads a polyline, one `x y z` point per line
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<Point3>, Error> {
    let mut out = vec![];
    for_each_row(reader, |line, row| match row {
        [x, y, z] => {
            out.push(Point3::new(*x, *y, *z));
            Ok(())
        }
        _ => Err(Error::BadPointArity {
            line,
            count: row.len(),
            expected: "3",
        }),
    })?;
    Ok(out)
}

/// Reads a point cloud into a flat `x, y, z, confidence` buffer
///
/// Each line holds `x y z` or `x y z confidence`; a missing confidence is
/// set to [`DEFAULT_CONFIDENCE`].
pub fn read_cloud<R: BufRead>(reader: R) -> Result<Vec<f32>, Error> {
    let mut out = vec![];
    for_each_row(reader, |line, row| match row {
        [x, y, z] => {
            out.extend([*x, *y, *z, DEFAULT_CONFIDENCE]);
            Ok(())
        }
        [_, _, _, _] => {
            out.extend_from_slice(row);
            Ok(())
        }
        _ => Err(Error::BadPointArity {
            line,
            count: row.len(),
            expected: "3 or 4",
        }),
    })?;
    Ok(out)
}

/// Parses every non-empty line, calling `f` with its 1-based line number and
/// values
fn for_each_row<R: BufRead, F>(reader: R, mut f: F) -> Result<(), Error>
where
    F: FnMut(usize, &[f32]) -> Result<(), Error>,
{
    let mut row = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.split('#').next().unwrap_or_default();
        row.clear();
        for word in text.split_whitespace() {
            let v = word.parse::<f32>().map_err(|_| Error::ParseError {
                line: i + 1,
                text: word.to_owned(),
            })?;
            row.push(v);
        }
        if !row.is_empty() {
            f(i + 1, &row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn points() {
        let text = "1 2 3\n  4.5\t5 -6 # trailing\n";
        let pts = read_points(text.as_bytes()).unwrap();
        assert_eq!(
            pts,
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.5, 5.0, -6.0)]
        );
    }

    #[test]
    fn bad_arity() {
        let err = read_points("1 2 3\n1 2\n".as_bytes()).unwrap_err();
        assert!(
            matches!(err, Error::BadPointArity { line: 2, count: 2, .. }),
            "{err}"
        );
    }

    #[test]
    fn bad_number() {
        let err = read_points("1 2 zz\n".as_bytes()).unwrap_err();
        match err {
            Error::ParseError { line, text } => {
                assert_eq!(line, 1);
                assert_eq!(text, "zz");
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn cloud() {
        let text = "# x y z c\n1 2 3 0.5\n4 5 6\n";
        let buf = read_cloud(text.as_bytes()).unwrap();
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 0.5, 4.0, 5.0, 6.0, 1.0]);
        assert!(read_cloud("1 2 3 4 5".as_bytes()).is_err());
    }
}
