use std::io::{self, Read, Write};

/// Write a u32 in little-endian format
pub fn write_u32_le<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u32 in little-endian format
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Write a u64 in little-endian format
pub fn write_u64_le<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u64 in little-endian format
pub fn read_u64_le<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Little-endian u32 at a byte offset. Panics if out of bounds.
#[inline]
pub fn u32_le_at(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

/// Little-endian u64 at a byte offset. Panics if out of bounds.
#[inline]
pub fn u64_le_at(buf: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

/// Write u64s as little-endian, buffered 1024 entries at a time
pub fn write_u64s_le<W: Write>(writer: &mut W, values: impl IntoIterator<Item = u64>) -> io::Result<()> {
    let mut buffer = Vec::with_capacity(8 * 1024);
    for value in values {
        buffer.extend_from_slice(&value.to_le_bytes());
        if buffer.len() >= 8 * 1024 {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        writer.write_all(&buffer)?;
    }
    Ok(())
}

/// Write u32s as little-endian, buffered 2048 entries at a time
pub fn write_u32s_le<W: Write>(writer: &mut W, values: impl IntoIterator<Item = u32>) -> io::Result<()> {
    let mut buffer = Vec::with_capacity(8 * 1024);
    for value in values {
        buffer.extend_from_slice(&value.to_le_bytes());
        if buffer.len() >= 8 * 1024 {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        writer.write_all(&buffer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields_in_sequence() {
        let mut buf = Vec::new();
        write_u32_le(&mut buf, 0x58524153).unwrap();
        write_u64_le(&mut buf, 1 << 40).unwrap();

        let mut cursor = &buf[..];
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 0x58524153);
        assert_eq!(read_u64_le(&mut cursor).unwrap(), 1 << 40);
        assert!(read_u32_le(&mut cursor).is_err());
    }

    #[test]
    fn test_offset_reads() {
        let mut buf = Vec::new();
        write_u64s_le(&mut buf, [7u64, u64::MAX]).unwrap();
        write_u32s_le(&mut buf, [9u32]).unwrap();

        assert_eq!(u64_le_at(&buf, 0), 7);
        assert_eq!(u64_le_at(&buf, 8), u64::MAX);
        assert_eq!(u32_le_at(&buf, 16), 9);
    }

    #[test]
    fn test_slice_writer_flushes_large_input() {
        let mut buf = Vec::new();
        write_u64s_le(&mut buf, (0..3000u64).map(|v| v * 3)).unwrap();
        assert_eq!(buf.len(), 3000 * 8);
        assert_eq!(u64_le_at(&buf, 2999 * 8), 2999 * 3);
    }
}
