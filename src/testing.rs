//! Shared fixtures and collaborator doubles for tests.
//!
//! The fixtures model a small forecast file: coordinate variables
//! `lat`/`lon` and record variables `time`, `rh` and `T` over a
//! growable outer dimension.

use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{
    array::DataType,
    errors::{Error, Result},
    extio::ExtendedWrite,
    record::{build_record_template, RecordTemplate},
    source::ByteSource,
    variable::Variable,
};

pub(crate) const NLAT: usize = 3;
pub(crate) const NLON: usize = 4;

/// Bytes of one record: `time`, then `rh`, then `T`.
pub(crate) const RECORD_SIZE: usize = 4 + NLAT * NLON * 4 + NLAT * NLON * 8;

/// A test implementation of ByteSource that serves one variable's data
/// region from RAM.
///
pub(crate) struct MemorySource {
    data: Mutex<Vec<u8>>,
    record_size: usize,
}

impl MemorySource {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        Self {
            data: Mutex::new(data),
            record_size: 0,
        }
    }

    /// A source whose unlimited length is counted in `record_size` byte
    /// records.
    pub(crate) fn with_records(data: Vec<u8>, record_size: usize) -> Self {
        Self {
            data: Mutex::new(data),
            record_size,
        }
    }

    /// Grow the unlimited dimension by one record.
    pub(crate) fn append_record(&self, record: &[u8]) {
        assert_eq!(record.len(), self.record_size);
        self.data.lock().extend_from_slice(record);
    }
}

impl ByteSource for MemorySource {
    fn read_bytes(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        let data = self.data.lock();
        let start = offset as usize;
        if start + length > data.len() {
            return Err(Error::IO(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "read past end of region: {}..{} of {}",
                    start,
                    start + length,
                    data.len()
                ),
            )));
        }

        Ok(data[start..start + length].to_vec())
    }

    fn current_unlimited_length(&self) -> Result<usize> {
        assert!(self.record_size > 0, "source has no record dimension");

        Ok(self.data.lock().len() / self.record_size)
    }
}

/// A file backed ByteSource, for exercising the collaborator seam
/// against real i/o.
///
pub(crate) struct FileSource {
    file: Mutex<File>,
    record_size: usize,
}

impl FileSource {
    pub(crate) fn new(file: File, record_size: usize) -> Self {
        Self {
            file: Mutex::new(file),
            record_size,
        }
    }
}

impl ByteSource for FileSource {
    fn read_bytes(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0; length];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn current_unlimited_length(&self) -> Result<usize> {
        assert!(self.record_size > 0, "source has no record dimension");
        let length = self.file.lock().metadata()?.len() as usize;

        Ok(length / self.record_size)
    }
}

pub(crate) fn lat_values() -> Vec<f32> {
    vec![41.0, 40.0, 39.0]
}

pub(crate) fn lon_values() -> Vec<f32> {
    vec![-109.0, -107.0, -105.0, -103.0]
}

pub(crate) fn time_value(record: usize) -> i32 {
    6 + 12 * record as i32
}

pub(crate) fn rh_value(record: usize, row: usize, col: usize) -> i32 {
    (20 * record + 4 * row + col + 1) as i32
}

pub(crate) fn t_value(record: usize, row: usize, col: usize) -> f64 {
    1.0 + 5.0 * record as f64 + 3.0 * row as f64 + col as f64
}

pub(crate) fn lat_region() -> Vec<u8> {
    let mut bytes = vec![];
    for value in lat_values() {
        bytes.write_f32(value).unwrap();
    }

    bytes
}

pub(crate) fn lon_region() -> Vec<u8> {
    let mut bytes = vec![];
    for value in lon_values() {
        bytes.write_f32(value).unwrap();
    }

    bytes
}

/// The de-interleaved region of `time`: one value per record.
pub(crate) fn time_region(records: usize) -> Vec<u8> {
    let mut bytes = vec![];
    for record in 0..records {
        bytes.write_i32(time_value(record)).unwrap();
    }

    bytes
}

pub(crate) fn rh_region(records: usize) -> Vec<u8> {
    let mut bytes = vec![];
    for record in 0..records {
        for row in 0..NLAT {
            for col in 0..NLON {
                bytes.write_i32(rh_value(record, row, col)).unwrap();
            }
        }
    }

    bytes
}

pub(crate) fn t_region(records: usize) -> Vec<u8> {
    let mut bytes = vec![];
    for record in 0..records {
        for row in 0..NLAT {
            for col in 0..NLON {
                bytes.write_f64(t_value(record, row, col)).unwrap();
            }
        }
    }

    bytes
}

/// One record of the interleaved record block.
pub(crate) fn record_bytes(record: usize) -> Vec<u8> {
    let mut bytes = vec![];
    bytes.write_i32(time_value(record)).unwrap();
    for row in 0..NLAT {
        for col in 0..NLON {
            bytes.write_i32(rh_value(record, row, col)).unwrap();
        }
    }
    for row in 0..NLAT {
        for col in 0..NLON {
            bytes.write_f64(t_value(record, row, col)).unwrap();
        }
    }

    bytes
}

/// The record block holding `records` records.
pub(crate) fn record_block(records: usize) -> Vec<u8> {
    let mut bytes = vec![];
    for record in 0..records {
        bytes.extend(record_bytes(record));
    }

    bytes
}

/// The variables that share the record dimension, in declaration order.
pub(crate) fn record_variables() -> Vec<Variable> {
    vec![
        Variable::array("time", DataType::I32, vec![0], true),
        Variable::array("rh", DataType::I32, vec![0, NLAT, NLON], true),
        Variable::array("T", DataType::F64, vec![0, NLAT, NLON], true),
    ]
}

/// The synthesized record template: `time` at byte 0, `rh` at 4, `T` at
/// 52.
pub(crate) fn record_template() -> Arc<RecordTemplate> {
    Arc::new(build_record_template(&record_variables()).unwrap())
}
