use crate::errors::Result;

/// A trait for supplying raw bytes from one variable's data region.
///
/// The container layer that understands the file format hands each
/// variable a source for its own span, so offsets here are relative to
/// the region, not the file. For a record structure the region is the
/// record block and `current_unlimited_length` reports how many records
/// it currently holds.
pub trait ByteSource: Send + Sync {
    /// Read exactly `length` bytes starting `offset` bytes into the
    /// region, or fail; short reads are not returned.
    fn read_bytes(&self, offset: u64, length: usize) -> Result<Vec<u8>>;

    /// The current length of the unlimited dimension.
    ///
    /// Queried once per read call and never cached by the core; the
    /// dimension may grow between calls.
    fn current_unlimited_length(&self) -> Result<usize>;
}
