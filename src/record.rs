//! Fixed-layout record templates and the row decoder that applies them.

use std::{collections::HashMap, io, sync::Arc};

use crate::{
    array::{DataType, TypedArray, Value},
    errors::{Error, Result},
    index,
    source::ByteSource,
    variable::{VarKind, Variable},
};

/// One named field within a record: where its bytes sit and what they
/// decode to. The field shape is per record; the record axis itself is
/// consumed by the template.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub offset: usize,
    pub dtype: DataType,
    pub shape: Vec<usize>,
}

impl Field {
    pub fn new<S: Into<String>>(name: S, offset: usize, dtype: DataType, shape: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            offset,
            dtype,
            shape,
        }
    }

    /// Number of elements one record holds for this field.
    pub fn element_count(&self) -> usize {
        index::element_count(&self.shape)
    }

    /// Number of bytes one record holds for this field.
    pub fn nbytes(&self) -> usize {
        self.element_count() * self.dtype.size()
    }
}

/// The byte-layout schema applied to every record of a structure.
///
/// Immutable after construction; decoded rows share one template through
/// an `Arc` without synchronization.
#[derive(Debug)]
pub struct RecordTemplate {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
    record_size: usize,
}

impl RecordTemplate {
    /// Validate a field layout into a template.
    ///
    /// `declared_size` overrides the packed size when records carry
    /// trailing padding; it may not truncate any field span.
    pub fn new(fields: Vec<Field>, declared_size: Option<usize>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if by_name.insert(field.name.clone(), i).is_some() {
                return Err(Error::StructureConflict(format!(
                    "duplicate field \"{}\"",
                    field.name
                )));
            }
        }

        // No two field spans may claim the same bytes
        let mut spans: Vec<(usize, usize, &str)> = fields
            .iter()
            .map(|field| (field.offset, field.offset + field.nbytes(), field.name.as_str()))
            .collect();
        spans.sort();
        for pair in spans.windows(2) {
            if pair[1].0 < pair[0].1 {
                return Err(Error::StructureConflict(format!(
                    "fields \"{}\" and \"{}\" overlap",
                    pair[0].2, pair[1].2
                )));
            }
        }

        let packed = spans.last().map(|span| span.1).unwrap_or(0);
        let record_size = match declared_size {
            Some(size) if size < packed => {
                return Err(Error::StructureConflict(format!(
                    "declared record size {size} truncates a field ending at byte {packed}"
                )));
            }
            Some(size) => size,
            None => packed,
        };

        Ok(Self {
            fields,
            by_name,
            record_size,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fixed size of one record, in bytes.
    pub fn record_size(&self) -> usize {
        self.record_size
    }
}

/// Synthesize the template for a pseudo "record" structure from the
/// variables that share the unlimited outer dimension: one field per
/// variable in declaration order, packed at accumulated offsets, with
/// the record axis dropped from each field's shape.
///
/// Whether the synthesized structure is actually exposed is the
/// surrounding layer's decision; this is a pure construction.
pub fn build_record_template(candidates: &[Variable]) -> Result<RecordTemplate> {
    let mut fields = Vec::with_capacity(candidates.len());
    let mut offset = 0;
    for variable in candidates {
        let dtype = match variable.kind {
            VarKind::Array(dtype) => dtype,
            VarKind::Structure(_) => {
                return Err(Error::StructureConflict(format!(
                    "\"{}\" is already a structure",
                    variable.name
                )));
            }
        };
        if !variable.is_unlimited() || variable.rank() == 0 {
            return Err(Error::StructureConflict(format!(
                "\"{}\" is not on the record dimension",
                variable.name
            )));
        }

        let shape = variable.shape()[1..].to_vec();
        let field = Field::new(variable.name.clone(), offset, dtype, shape);
        offset += field.nbytes();
        fields.push(field);
    }

    RecordTemplate::new(fields, None)
}

/// Decode a strided subsequence of records into rows.
///
/// `record_count` is the record extent the caller resolved for this
/// call; it is threaded in explicitly so that one read validates and
/// materializes against a single length.
pub fn decode_range(
    template: &Arc<RecordTemplate>,
    source: &dyn ByteSource,
    record_count: usize,
    first: usize,
    count: usize,
    stride: usize,
) -> Result<Vec<StructureData>> {
    if count == 0 {
        return Ok(vec![]);
    }
    if stride < 1 {
        return Err(Error::Range(format!("stride {stride} is less than 1")));
    }

    let last = first + (count - 1) * stride;
    if last >= record_count {
        return Err(Error::Range(format!(
            "record {last} is out of bounds for {record_count} records"
        )));
    }

    let record_size = template.record_size();
    let mut rows = Vec::with_capacity(count);
    for i in 0..count {
        let start = (first + i * stride) * record_size;
        let bytes = source.read_bytes(start as u64, record_size)?;
        if bytes.len() != record_size {
            return Err(Error::IO(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("short record read: {} of {record_size} bytes", bytes.len()),
            )));
        }
        rows.push(StructureData {
            template: Arc::clone(template),
            bytes,
        });
    }

    Ok(rows)
}

/// One decoded record: a template reference plus the record's own bytes.
///
/// Field reads decode fresh from the span each time; the span is
/// read-only for the row's lifetime, so repeated reads are value-equal.
pub struct StructureData {
    template: Arc<RecordTemplate>,
    bytes: Vec<u8>,
}

impl StructureData {
    pub fn template(&self) -> &RecordTemplate {
        &self.template
    }

    /// Decode the named field as an array of its field shape.
    pub fn get_field(&self, name: &str) -> Result<TypedArray> {
        let field = self
            .template
            .field(name)
            .ok_or_else(|| Error::UnknownField(format!("no field \"{name}\" in record")))?;
        let bytes = &self.bytes[field.offset..field.offset + field.nbytes()];

        TypedArray::decode(field.dtype, &field.shape, bytes)
    }

    /// Decode a single-element field as a scalar.
    pub fn get_scalar(&self, name: &str) -> Result<Value> {
        let field = self
            .template
            .field(name)
            .ok_or_else(|| Error::UnknownField(format!("no field \"{name}\" in record")))?;
        if field.element_count() != 1 {
            return Err(Error::NotScalar(format!(
                "field \"{name}\" has shape {:?}",
                field.shape
            )));
        }

        self.get_field(name)?.get_linear(0)
    }
}
