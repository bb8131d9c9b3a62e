//! Row-major conversion between multi-dimensional coordinates and linear
//! element offsets.

use crate::errors::{Error, Result};

/// Number of elements a shape holds. A rank 0 shape holds one element.
pub(crate) fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Map a coordinate tuple to its linear element offset within `shape`.
///
/// The last dimension varies fastest.
pub fn linear_offset(shape: &[usize], coordinate: &[usize]) -> Result<usize> {
    if coordinate.len() != shape.len() {
        return Err(Error::Range(format!(
            "coordinate rank {} does not match shape rank {}",
            coordinate.len(),
            shape.len()
        )));
    }

    let mut offset = 0;
    for (i, (&index, &length)) in coordinate.iter().zip(shape).enumerate() {
        if index >= length {
            return Err(Error::Range(format!(
                "index {index} is out of bounds for dimension {i} with length {length}"
            )));
        }
        offset = offset * length + index;
    }

    Ok(offset)
}

/// Map a linear element offset back to its coordinate tuple within `shape`.
pub fn coordinate(shape: &[usize], offset: usize) -> Result<Vec<usize>> {
    if offset >= element_count(shape) {
        return Err(Error::Range(format!(
            "offset {offset} is out of bounds for shape with {} elements",
            element_count(shape)
        )));
    }

    let mut coordinate = vec![0; shape.len()];
    let mut remainder = offset;
    for i in (0..shape.len()).rev() {
        coordinate[i] = remainder % shape[i];
        remainder /= shape[i];
    }

    Ok(coordinate)
}
