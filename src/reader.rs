//! Reads a variable's data region — whole, origin/shape, or sectioned —
//! through the byte-supplying collaborator.

use std::sync::Arc;

use crate::{
    array::TypedArray,
    errors::{Error, Result},
    index::element_count,
    record::{decode_range, StructureData},
    section::Section,
    source::ByteSource,
    variable::{VarKind, Variable},
};

/// What a read produced: a flat array for plain variables, decoded rows
/// for structures.
pub enum ReadResult {
    Array(TypedArray),
    Records(Vec<StructureData>),
}

impl ReadResult {
    /// The array result.
    ///
    /// Panics on a structure result; the caller knows the variable kind.
    pub fn array(self) -> TypedArray {
        match self {
            Self::Array(array) => array,
            Self::Records(_) => panic!("Not an array result"),
        }
    }

    /// The decoded rows.
    ///
    /// Panics on an array result; the caller knows the variable kind.
    pub fn records(self) -> Vec<StructureData> {
        match self {
            Self::Records(rows) => rows,
            Self::Array(_) => panic!("Not a structure result"),
        }
    }
}

/// Reads one variable's data region through a `ByteSource`.
///
/// Holds nothing beyond the collaborator handle: no lengths or bytes are
/// cached between calls, and the unlimited length is resolved exactly
/// once per call, before validation, then used unchanged through
/// materialization.
pub struct VariableReader {
    source: Arc<dyn ByteSource>,
}

impl VariableReader {
    pub fn new(source: Arc<dyn ByteSource>) -> Self {
        Self { source }
    }

    /// Read the variable's full current extent.
    pub fn read_all(&self, variable: &Variable) -> Result<ReadResult> {
        let shape = self.resolve_shape(variable)?;

        match &variable.kind {
            VarKind::Array(dtype) => {
                let nbytes = element_count(&shape) * dtype.size();
                let bytes = self.source.read_bytes(0, nbytes)?;

                Ok(ReadResult::Array(TypedArray::decode(*dtype, &shape, &bytes)?))
            }
            VarKind::Structure(template) => {
                let rows = decode_range(template, self.source.as_ref(), shape[0], 0, shape[0], 1)?;

                Ok(ReadResult::Records(rows))
            }
        }
    }

    /// Read `shape` elements starting at `origin` — the stride-1 section.
    pub fn read_origin(
        &self,
        variable: &Variable,
        origin: &[usize],
        shape: &[usize],
    ) -> Result<ReadResult> {
        let variable_shape = self.resolve_shape(variable)?;
        let section = Section::from_origin(origin, shape, &variable_shape)?;

        self.read_resolved(variable, &section)
    }

    /// Read the sub-selection described by section text.
    pub fn read_section(&self, variable: &Variable, text: &str) -> Result<ReadResult> {
        if matches!(variable.kind, VarKind::Structure(_)) && text.contains(',') {
            // Only the record axis of a structure can be sectioned
            return Err(Error::UnsupportedSection(format!(
                "section \"{text}\" addresses record-internal dimensions of \"{}\"",
                variable.name
            )));
        }

        let variable_shape = self.resolve_shape(variable)?;
        let section = Section::parse(text, &variable_shape)?;

        self.read_resolved(variable, &section)
    }

    fn read_resolved(&self, variable: &Variable, section: &Section) -> Result<ReadResult> {
        match &variable.kind {
            VarKind::Array(dtype) => {
                // Gather element bytes at each materialized offset
                let size = dtype.size();
                let mut bytes = Vec::with_capacity(section.len() * size);
                for offset in section.offsets() {
                    bytes.extend(self.source.read_bytes((offset * size) as u64, size)?);
                }

                Ok(ReadResult::Array(TypedArray::decode(
                    *dtype,
                    &section.shape(),
                    &bytes,
                )?))
            }
            VarKind::Structure(template) => {
                let range = section.ranges()[0];
                let rows = decode_range(
                    template,
                    self.source.as_ref(),
                    section.variable_shape()[0],
                    range.start,
                    range.len(),
                    range.stride,
                )?;

                Ok(ReadResult::Records(rows))
            }
        }
    }

    /// The variable's shape with the unlimited length resolved, queried
    /// from the collaborator exactly once.
    fn resolve_shape(&self, variable: &Variable) -> Result<Vec<usize>> {
        let mut shape = variable.shape().to_vec();
        if variable.is_unlimited() {
            shape[0] = self.source.current_unlimited_length()?;
        }

        Ok(shape)
    }
}
