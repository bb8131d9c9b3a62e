//! Extend Read and Write with some convenience methods for binary i/o
//!
//! The container's multi-byte values are Big Endian on disk.

use std::io::{self, Read};

#[cfg(test)]
use std::io::Write;

pub(crate) trait ExtendedRead: Read {
    /// Read a byte from a stream
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Read a signed byte from a stream
    fn read_i8(&mut self) -> io::Result<i8>;

    /// Read a Big Endian encoded 16 bit signed integer from a stream
    fn read_i16(&mut self) -> io::Result<i16>;

    /// Read a Big Endian encoded 32 bit signed integer from a stream
    fn read_i32(&mut self) -> io::Result<i32>;

    /// Read a Big Endian encoded 64 bit signed integer from a stream
    fn read_i64(&mut self) -> io::Result<i64>;

    /// Read a Big Endian encoded 32 bit float from a stream
    fn read_f32(&mut self) -> io::Result<f32>;

    /// Read a Big Endian encoded 64 bit float from a stream
    fn read_f64(&mut self) -> io::Result<f64>;
}

impl<R: Read> ExtendedRead for R {
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut buffer = [0; 1];
        self.read_exact(&mut buffer)?;

        Ok(buffer[0])
    }

    fn read_i8(&mut self) -> io::Result<i8> {
        Ok(self.read_byte()? as i8)
    }

    fn read_i16(&mut self) -> io::Result<i16> {
        let mut buffer = [0; 2];
        self.read_exact(&mut buffer)?;

        Ok(i16::from_be_bytes(buffer))
    }

    fn read_i32(&mut self) -> io::Result<i32> {
        let mut buffer = [0; 4];
        self.read_exact(&mut buffer)?;

        Ok(i32::from_be_bytes(buffer))
    }

    fn read_i64(&mut self) -> io::Result<i64> {
        let mut buffer = [0; 8];
        self.read_exact(&mut buffer)?;

        Ok(i64::from_be_bytes(buffer))
    }

    fn read_f32(&mut self) -> io::Result<f32> {
        let mut buffer = [0; 4];
        self.read_exact(&mut buffer)?;

        Ok(f32::from_be_bytes(buffer))
    }

    fn read_f64(&mut self) -> io::Result<f64> {
        let mut buffer = [0; 8];
        self.read_exact(&mut buffer)?;

        Ok(f64::from_be_bytes(buffer))
    }
}

// Only fixtures write; the public surface has no write paths.
#[cfg(test)]
pub(crate) trait ExtendedWrite: Write {
    /// Write a byte to a stream
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Write a Big Endian encoded 32 bit signed integer to a stream
    fn write_i32(&mut self, word: i32) -> io::Result<()>;

    /// Write a Big Endian encoded 64 bit signed integer to a stream
    fn write_i64(&mut self, word: i64) -> io::Result<()>;

    /// Write a Big Endian encoded 16 bit signed integer to a stream
    fn write_i16(&mut self, word: i16) -> io::Result<()>;

    /// Write a Big Endian encoded 32 bit float to a stream
    fn write_f32(&mut self, word: f32) -> io::Result<()>;

    /// Write a Big Endian encoded 64 bit float to a stream
    fn write_f64(&mut self, word: f64) -> io::Result<()>;
}

#[cfg(test)]
impl<W: Write> ExtendedWrite for W {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let buffer = [byte];
        self.write_all(&buffer)?;

        Ok(())
    }

    fn write_i16(&mut self, word: i16) -> io::Result<()> {
        let buffer = word.to_be_bytes();
        self.write_all(&buffer)?;

        Ok(())
    }

    fn write_i32(&mut self, word: i32) -> io::Result<()> {
        let buffer = word.to_be_bytes();
        self.write_all(&buffer)?;

        Ok(())
    }

    fn write_i64(&mut self, word: i64) -> io::Result<()> {
        let buffer = word.to_be_bytes();
        self.write_all(&buffer)?;

        Ok(())
    }

    fn write_f32(&mut self, word: f32) -> io::Result<()> {
        let buffer = word.to_be_bytes();
        self.write_all(&buffer)?;

        Ok(())
    }

    fn write_f64(&mut self, word: f64) -> io::Result<()> {
        let buffer = word.to_be_bytes();
        self.write_all(&buffer)?;

        Ok(())
    }
}
