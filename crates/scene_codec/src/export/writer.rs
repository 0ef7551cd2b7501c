//! Binary primitive writer
//!
//! Appends fixed-width little-endian fields to a byte sink and tracks the
//! cumulative offset. The offset is informational (completion logging and
//! diagnostics); nothing seeks or aligns against it.
//!
//! Field widths are the wire contract: numeric fields are 4 bytes, booleans
//! are 4-byte 0/1 words, strings occupy fixed zero-padded UTF-8 slots. A
//! string longer than its slot is rejected rather than truncated; silently
//! cutting a medium name or image path would corrupt the lookup on the
//! renderer side.

use std::io::Write;

use crate::export::ExportError;
use crate::foundation::math::{Quat, Vec3};

/// Little-endian field writer with offset bookkeeping
pub struct BinaryWriter<W: Write> {
    inner: W,
    offset: u64,
}

impl<W: Write> BinaryWriter<W> {
    /// Wrap a byte sink
    pub fn new(inner: W) -> Self {
        Self { inner, offset: 0 }
    }

    /// Bytes written so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), ExportError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), ExportError> {
        self.inner.write_all(bytes)?;
        self.offset += bytes.len() as u64;
        Ok(())
    }

    /// Append a little-endian i32
    pub fn write_i32(&mut self, value: i32) -> Result<(), ExportError> {
        self.put(&value.to_le_bytes())
    }

    /// Append a little-endian f32
    pub fn write_f32(&mut self, value: f32) -> Result<(), ExportError> {
        self.put(&value.to_le_bytes())
    }

    /// Append a boolean as a 4-byte 0/1 word
    pub fn write_bool(&mut self, value: bool) -> Result<(), ExportError> {
        self.write_i32(i32::from(value))
    }

    /// Append three f32 components
    pub fn write_vec3(&mut self, value: Vec3) -> Result<(), ExportError> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }

    /// Append a quaternion as x, y, z, w
    pub fn write_quat(&mut self, value: Quat) -> Result<(), ExportError> {
        self.write_f32(value.coords.x)?;
        self.write_f32(value.coords.y)?;
        self.write_f32(value.coords.z)?;
        self.write_f32(value.coords.w)
    }

    /// Append a UTF-8 string into a fixed `slot`-byte zero-padded field
    ///
    /// Rejects strings whose encoding exceeds the slot; a slot-exact string
    /// serializes without padding.
    pub fn write_fixed_str(&mut self, value: &str, slot: usize) -> Result<(), ExportError> {
        let bytes = value.as_bytes();
        if bytes.len() > slot {
            return Err(ExportError::NameTooLong {
                name: value.to_string(),
                len: bytes.len(),
                limit: slot,
            });
        }
        self.put(bytes)?;
        let padding = slot - bytes.len();
        if padding > 0 {
            self.put(&vec![0u8; padding])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> BinaryWriter<Vec<u8>> {
        BinaryWriter::new(Vec::new())
    }

    #[test]
    fn test_little_endian_scalars() {
        let mut w = writer();
        w.write_i32(-2).unwrap();
        w.write_f32(1.0).unwrap();
        w.write_bool(true).unwrap();
        w.write_bool(false).unwrap();

        let bytes = w.into_inner();
        assert_eq!(&bytes[0..4], &(-2i32).to_le_bytes());
        assert_eq!(&bytes[4..8], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &[1, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_offset_tracks_every_field() {
        let mut w = writer();
        w.write_vec3(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(w.offset(), 12);
        w.write_quat(Quat::identity()).unwrap();
        assert_eq!(w.offset(), 28);
        w.write_fixed_str("fog", 128).unwrap();
        assert_eq!(w.offset(), 156);
    }

    #[test]
    fn test_quat_component_order() {
        let mut w = writer();
        w.write_quat(Quat::identity()).unwrap();
        let bytes = w.into_inner();
        // identity = (x=0, y=0, z=0, w=1)
        assert_eq!(&bytes[0..4], &0.0f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_fixed_str_zero_padded() {
        let mut w = writer();
        w.write_fixed_str("fog", 8).unwrap();
        assert_eq!(w.into_inner(), b"fog\0\0\0\0\0");
    }

    #[test]
    fn test_fixed_str_slot_exact_ok() {
        let name = "m".repeat(128);
        let mut w = writer();
        w.write_fixed_str(&name, 128).unwrap();
        assert_eq!(w.offset(), 128);
    }

    #[test]
    fn test_fixed_str_oversize_rejected() {
        let name = "m".repeat(129);
        let mut w = writer();
        let err = w.write_fixed_str(&name, 128).unwrap_err();
        match err {
            ExportError::NameTooLong { len, limit, .. } => {
                assert_eq!(len, 129);
                assert_eq!(limit, 128);
            }
            other => panic!("unexpected error: {other}"),
        }
        // nothing was committed to the stream
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_fixed_str_counts_utf8_bytes_not_chars() {
        // 43 three-byte characters: 129 bytes, over a 128-byte slot
        let name = "\u{4e2d}".repeat(43);
        let mut w = writer();
        assert!(w.write_fixed_str(&name, 128).is_err());
    }
}
