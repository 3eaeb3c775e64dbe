//! Bounds-checked binary cursor over an in-memory byte buffer
//!
//! Every read advances the offset by exactly the decoded width and fails if
//! fewer bytes remain. Missing bytes are never zero-filled. The byte order
//! is switchable at runtime because Forge mesh files declare theirs in a
//! header field.

use glam::{Vec2, Vec3, Vec4};
use half::f16;

/// Byte order for multi-byte reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first (PC files)
    Little,
    /// Most significant byte first (PS4 files)
    Big,
}

/// Cursor ran out of bytes mid-read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadError {
    /// Offset the failed read started at
    pub offset: usize,
    /// Bytes the read required
    pub needed: usize,
    /// Bytes left in the buffer
    pub remaining: usize,
}

/// Sequential reader over an immutable byte buffer.
///
/// Starts in little-endian order; callers switch with
/// [`set_byte_order`](Reader::set_byte_order) once the file's endianness
/// field is known. The order applies to every subsequent multi-byte read.
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    /// Create a reader at offset 0, little-endian
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            order: ByteOrder::Little,
        }
    }

    /// Current read offset in bytes
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left between the offset and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Byte order applied to multi-byte reads
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Switch the byte order for all subsequent reads
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Consume `n` bytes, failing if fewer remain
    fn take(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(ReadError {
                offset: self.offset,
                needed: n,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    /// Skip `n` bytes whose contents are not interpreted
    pub fn skip(&mut self, n: usize) -> Result<(), ReadError> {
        self.take(n).map(|_| ())
    }

    /// Read a fixed run of `n` raw bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        self.take(n)
    }

    /// Read a fixed-length string of `n` bytes (lossy UTF-8, no NUL search)
    pub fn read_string(&mut self, n: usize) -> Result<String, ReadError> {
        let bytes = self.take(n)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read an unsigned 8-bit integer
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.take(1)?[0])
    }

    /// Read a signed 8-bit integer
    pub fn read_i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.take(1)?[0] as i8)
    }

    /// Read an unsigned 16-bit integer
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let b = self.take(2)?;
        let raw = [b[0], b[1]];
        Ok(match self.order {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        })
    }

    /// Read a signed 16-bit integer
    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        Ok(self.read_u16()? as i16)
    }

    /// Read an unsigned 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        let b = self.take(4)?;
        let raw = [b[0], b[1], b[2], b[3]];
        Ok(match self.order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        })
    }

    /// Read a signed 32-bit integer
    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a 32-bit float
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an IEEE-754 binary16 half float, widened to f32
    pub fn read_f16(&mut self) -> Result<f32, ReadError> {
        Ok(f16::from_bits(self.read_u16()?).to_f32())
    }

    /// Read two half floats as a 2-component vector
    pub fn read_vec2_f16(&mut self) -> Result<Vec2, ReadError> {
        let x = self.read_f16()?;
        let y = self.read_f16()?;
        Ok(Vec2::new(x, y))
    }

    /// Read three f32 as a 3-component vector
    pub fn read_vec3_f32(&mut self) -> Result<Vec3, ReadError> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read three u32 in one call (triangle indices)
    pub fn read_vec3_u32(&mut self) -> Result<[u32; 3], ReadError> {
        let a = self.read_u32()?;
        let b = self.read_u32()?;
        let c = self.read_u32()?;
        Ok([a, b, c])
    }

    /// Read four f32 as a 4-component vector
    pub fn read_vec4_f32(&mut self) -> Result<Vec4, ReadError> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        let w = self.read_f32()?;
        Ok(Vec4::new(x, y, z, w))
    }
}
