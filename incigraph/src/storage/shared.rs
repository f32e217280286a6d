use std::ops::Range;

use crate::core::{error::LayoutError, Vertex};

/// Number of header fields (vertex count, edge count) at the beginning of
/// every flat layout.
pub const HEADER_LEN: usize = 2;

/// Largest vertex count representable in the header.
pub const MAX_VERTEX_COUNT: usize = i32::MAX as usize;

/// Largest edge count representable in the header and as an edge index.
pub const MAX_EDGE_COUNT: usize = i32::MAX as usize;

pub fn read_header(data: &[i32]) -> Result<(usize, usize), LayoutError> {
    match data {
        [n, m, ..] if *n >= 0 && *m >= 0 => Ok((*n as usize, *m as usize)),
        [_, _, ..] => Err(LayoutError::NegativeCount),
        _ => Err(LayoutError::MissingHeader),
    }
}

/// Returns the range of out-edge entries of the vertex, relative to the start
/// of the out-edge zone.
///
/// `bounds[v]` holds the exclusive upper bound of the entries of `v`, the
/// lower bound is the upper bound of the previous vertex.
#[inline]
pub fn out_range(bounds: &[i32], vertex: Vertex) -> Range<usize> {
    if vertex < 0 {
        return 0..0;
    }

    let v = vertex as usize;
    match bounds.get(v) {
        Some(&upper) => {
            let lower = if v == 0 { 0 } else { bounds[v - 1] };
            lower as usize..upper as usize
        }
        None => 0..0,
    }
}

/// Appends the upper bounds computed from the per-vertex degrees.
pub fn push_bounds(data: &mut Vec<i32>, degrees: impl IntoIterator<Item = usize>) -> usize {
    let mut upper = 0;
    for degree in degrees {
        upper += degree;
        data.push(upper as i32);
    }
    upper
}

/// Checks that the bounds are non-decreasing and cover exactly `total`
/// entries.
pub fn check_bounds(bounds: &[i32], total: usize) -> Result<(), LayoutError> {
    let mut previous = 0;
    for (v, &upper) in bounds.iter().enumerate() {
        if upper < previous {
            return Err(LayoutError::DecreasingBounds(v as Vertex));
        }
        previous = upper;
    }

    if previous as usize != total {
        return Err(LayoutError::BoundsTotalMismatch {
            expected: total,
            actual: previous as usize,
        });
    }

    Ok(())
}

/// Returns the number of entries covered by the bounds, that is the upper
/// bound of the last vertex.
pub fn bounds_total(bounds: &[i32]) -> Result<usize, LayoutError> {
    match bounds.last() {
        Some(&total) if total < 0 => Err(LayoutError::DecreasingBounds(bounds.len() as Vertex - 1)),
        Some(&total) => Ok(total as usize),
        None => Ok(0),
    }
}

pub fn check_length(expected: usize, actual: usize) -> Result<(), LayoutError> {
    if expected == actual {
        Ok(())
    } else {
        Err(LayoutError::LengthMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        let bounds = [2, 2, 5];

        assert_eq!(out_range(&bounds, 0), 0..2);
        assert_eq!(out_range(&bounds, 1), 2..2);
        assert_eq!(out_range(&bounds, 2), 2..5);
        assert_eq!(out_range(&bounds, 3), 0..0);
        assert_eq!(out_range(&bounds, -1), 0..0);
    }

    #[test]
    fn bounds_roundtrip() {
        let mut data = Vec::new();
        let total = push_bounds(&mut data, [2, 0, 3]);

        assert_eq!(data, vec![2, 2, 5]);
        assert_eq!(total, 5);
        assert_eq!(check_bounds(&data, 5), Ok(()));
        assert_eq!(bounds_total(&data), Ok(5));
    }

    #[test]
    fn invalid_bounds() {
        assert_eq!(
            check_bounds(&[2, 1, 5], 5),
            Err(LayoutError::DecreasingBounds(1))
        );
        assert_eq!(
            check_bounds(&[2, 2, 4], 5),
            Err(LayoutError::BoundsTotalMismatch {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn header() {
        assert_eq!(read_header(&[3, 4, 0]), Ok((3, 4)));
        assert_eq!(read_header(&[3]), Err(LayoutError::MissingHeader));
        assert_eq!(read_header(&[-1, 0]), Err(LayoutError::NegativeCount));
    }
}
