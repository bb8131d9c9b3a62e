//! Strided per-dimension sub-range selection over a variable's shape.

use crate::{
    errors::{Error, Result},
    index::element_count,
};

/// A selection over one dimension: `start` through `stop` inclusive,
/// every `stride` elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub stop: usize,
    pub stride: usize,
}

impl Range {
    /// Build a range validated against a dimension of length `length`.
    pub fn new(start: usize, stop: usize, stride: usize, length: usize) -> Result<Self> {
        if stride < 1 {
            return Err(Error::Range(format!("stride {stride} is less than 1")));
        }
        if start > stop {
            return Err(Error::Range(format!(
                "start {start} is greater than stop {stop}"
            )));
        }
        if stop >= length {
            return Err(Error::Range(format!(
                "stop {stop} is out of bounds for dimension with length {length}"
            )));
        }

        Ok(Self {
            start,
            stop,
            stride,
        })
    }

    /// Number of elements this range selects.
    pub fn len(&self) -> usize {
        (self.stop - self.start) / self.stride + 1
    }
}

/// A per-dimension strided selection over a variable, validated against
/// the declared shape current at construction time. Materialization uses
/// that same shape, so a length resolved once can never be contradicted
/// mid-read by a grown record dimension.
#[derive(Clone, Debug)]
pub struct Section {
    ranges: Vec<Range>,
    variable_shape: Vec<usize>,
}

impl Section {
    /// Parse section text against a variable's declared shape.
    ///
    /// One comma-separated component per dimension: `start:stop:stride`,
    /// `start:stop` (stride 1), a bare index (single element), or empty
    /// for the full dimension. Stop is inclusive. The component count
    /// must equal the variable's rank; trailing components may not be
    /// omitted.
    pub fn parse(text: &str, variable_shape: &[usize]) -> Result<Self> {
        if variable_shape.is_empty() {
            if !text.trim().is_empty() {
                return Err(Error::SectionSyntax(format!(
                    "section \"{text}\" given for a scalar variable"
                )));
            }
            return Ok(Self {
                ranges: vec![],
                variable_shape: vec![],
            });
        }

        let components: Vec<&str> = text.split(',').collect();
        if components.len() != variable_shape.len() {
            return Err(Error::SectionSyntax(format!(
                "section \"{text}\" has {} components for a rank {} variable",
                components.len(),
                variable_shape.len()
            )));
        }

        let mut ranges = Vec::with_capacity(components.len());
        for (component, &length) in components.iter().zip(variable_shape) {
            ranges.push(parse_component(component, length)?);
        }

        Ok(Self {
            ranges,
            variable_shape: variable_shape.to_vec(),
        })
    }

    /// The stride-1 section equivalent to reading `shape` elements
    /// starting at `origin`.
    pub fn from_origin(origin: &[usize], shape: &[usize], variable_shape: &[usize]) -> Result<Self> {
        if origin.len() != variable_shape.len() || shape.len() != variable_shape.len() {
            return Err(Error::Range(format!(
                "origin rank {} and read shape rank {} must both match variable rank {}",
                origin.len(),
                shape.len(),
                variable_shape.len()
            )));
        }

        let mut ranges = Vec::with_capacity(variable_shape.len());
        for i in 0..variable_shape.len() {
            if shape[i] == 0 {
                return Err(Error::Range(format!("empty read shape for dimension {i}")));
            }
            ranges.push(Range::new(
                origin[i],
                origin[i] + shape[i] - 1,
                1,
                variable_shape[i],
            )?);
        }

        Ok(Self {
            ranges,
            variable_shape: variable_shape.to_vec(),
        })
    }

    /// The full extent of every dimension, stride 1.
    pub fn full(variable_shape: &[usize]) -> Result<Self> {
        let mut ranges = Vec::with_capacity(variable_shape.len());
        for &length in variable_shape {
            if length == 0 {
                return Err(Error::Range(
                    "cannot select from an empty dimension".to_string(),
                ));
            }
            ranges.push(Range {
                start: 0,
                stop: length - 1,
                stride: 1,
            });
        }

        Ok(Self {
            ranges,
            variable_shape: variable_shape.to_vec(),
        })
    }

    pub fn rank(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// The declared shape this section was validated against.
    pub fn variable_shape(&self) -> &[usize] {
        &self.variable_shape
    }

    /// The output shape: per-dimension selected counts.
    pub fn shape(&self) -> Vec<usize> {
        self.ranges.iter().map(|range| range.len()).collect()
    }

    /// Number of elements selected.
    pub fn len(&self) -> usize {
        element_count(&self.shape())
    }

    /// Iterate the selected source linear offsets in row-major order.
    ///
    /// Each call yields an independent iterator over the same sequence;
    /// the cross-product of selected coordinates is never allocated.
    pub fn offsets(&self) -> SectionOffsets {
        SectionOffsets::new(self)
    }
}

fn parse_component(component: &str, length: usize) -> Result<Range> {
    let component = component.trim();
    if component.is_empty() {
        if length == 0 {
            return Err(Error::Range(
                "cannot select from an empty dimension".to_string(),
            ));
        }
        return Ok(Range {
            start: 0,
            stop: length - 1,
            stride: 1,
        });
    }

    let mut numbers = Vec::new();
    for token in component.split(':') {
        let number = token
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::SectionSyntax(format!("\"{token}\" is not an integer")))?;
        if number < 0 {
            return Err(Error::Range(format!("negative index {number}")));
        }
        numbers.push(number as usize);
    }

    match numbers[..] {
        [index] => Range::new(index, index, 1, length),
        [start, stop] => Range::new(start, stop, 1, length),
        [start, stop, stride] => Range::new(start, stop, stride, length),
        _ => Err(Error::SectionSyntax(format!(
            "\"{component}\" has too many \":\" separated parts"
        ))),
    }
}

/// Row-major odometer over a section's selected coordinates, yielding
/// source linear offsets. The innermost dimension increments fastest and
/// carries into the next dimension out when it passes its stop.
pub struct SectionOffsets {
    steps: Vec<usize>,
    counts: Vec<usize>,
    cursor: Vec<usize>,
    offset: usize,
    done: bool,
}

impl SectionOffsets {
    fn new(section: &Section) -> Self {
        let rank = section.ranges.len();

        // Linear distance between consecutive elements of each dimension
        let mut dimension_steps = vec![1; rank];
        for i in (0..rank.saturating_sub(1)).rev() {
            dimension_steps[i] = dimension_steps[i + 1] * section.variable_shape[i + 1];
        }

        let mut offset = 0;
        let mut steps = Vec::with_capacity(rank);
        let mut counts = Vec::with_capacity(rank);
        for (range, step) in section.ranges.iter().zip(&dimension_steps) {
            offset += range.start * step;
            steps.push(range.stride * step);
            counts.push(range.len());
        }

        Self {
            steps,
            counts,
            cursor: vec![0; rank],
            offset,
            done: false,
        }
    }
}

impl Iterator for SectionOffsets {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.offset;

        // Advance the odometer, carrying outward on overflow
        let mut dimension = self.cursor.len();
        loop {
            if dimension == 0 {
                self.done = true;
                break;
            }
            dimension -= 1;
            self.cursor[dimension] += 1;
            if self.cursor[dimension] < self.counts[dimension] {
                self.offset += self.steps[dimension];
                break;
            }
            self.offset -= self.steps[dimension] * (self.cursor[dimension] - 1);
            self.cursor[dimension] = 0;
        }

        Some(offset)
    }
}
