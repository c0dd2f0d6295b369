//! Sequential forward cursor over one file's bytes.
//!
//! Every read is bounds-checked; running past the end of the buffer is the
//! only failure this module raises. The cursor never rewinds on its own,
//! but LOD bodies in the compiled format are reached by absolute seeks.

use crate::error::{FormatError, FormatResult};

/// Bounds-checked little-endian reader with an explicit position.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at position 0.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Takes the next `n` bytes, advancing the position.
    fn take(&mut self, n: usize) -> FormatResult<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(FormatError::Truncated {
            offset: self.pos,
            needed: n,
        })?;
        if end > self.data.len() {
            return Err(FormatError::Truncated {
                offset: self.pos,
                needed: end - self.data.len(),
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Reads exactly `n` raw bytes.
    pub fn read_exact(&mut self, n: usize) -> FormatResult<&'a [u8]> {
        self.take(n)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> FormatResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> FormatResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> FormatResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a little-endian `f32`.
    pub fn read_f32(&mut self) -> FormatResult<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a NUL-terminated ASCII string, consuming the terminator.
    pub fn read_asciiz(&mut self) -> FormatResult<String> {
        let rest = &self.data[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(FormatError::Truncated {
                offset: self.data.len(),
                needed: 1,
            })?;
        let s = rest[..nul].iter().map(|&b| char::from(b)).collect();
        self.pos += nul + 1;
        Ok(s)
    }

    /// Consumes a NUL-terminated string without materializing it.
    pub fn skip_asciiz(&mut self) -> FormatResult<()> {
        let rest = &self.data[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(FormatError::Truncated {
                offset: self.data.len(),
                needed: 1,
            })?;
        self.pos += nul + 1;
        Ok(())
    }

    /// Reads a fixed-length ASCII field, trimmed at the first NUL.
    pub fn read_fixed_str(&mut self, n: usize) -> FormatResult<String> {
        let raw = self.take(n)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(n);
        Ok(raw[..end].iter().map(|&b| char::from(b)).collect())
    }

    /// Skips `n` bytes.
    pub fn skip(&mut self, n: usize) -> FormatResult<()> {
        self.take(n).map(|_| ())
    }

    /// Jumps to an absolute position. The end of the buffer is a valid target.
    pub fn seek_to(&mut self, pos: usize) -> FormatResult<()> {
        if pos > self.data.len() {
            return Err(FormatError::Truncated {
                offset: self.pos,
                needed: pos - self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }
}
