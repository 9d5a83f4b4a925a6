// ppc-wire/src/encode.rs

use crate::{WireError, WireResult};
use std::io::{Read, Write};

/// Largest payload a single message may carry
pub const MAX_MESSAGE_PAYLOAD: u64 = 32 * 1024 * 1024;

/// Number of bytes `write_var_int` uses for `value`
pub fn var_int_size(value: u64) -> usize {
    match value {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Append a CompactSize integer to an in-memory buffer
pub fn put_var_int(buf: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => buf.push(value as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Write a CompactSize integer
pub fn write_var_int<W: Write>(w: &mut W, value: u64) -> std::io::Result<()> {
    let mut buf = Vec::with_capacity(var_int_size(value));
    put_var_int(&mut buf, value);
    w.write_all(&buf)
}

/// Read a CompactSize integer, rejecting values not encoded in their
/// shortest form
pub fn read_var_int<R: Read>(r: &mut R) -> WireResult<u64> {
    let discriminant = read_u8(r)?;
    let (value, min) = match discriminant {
        0xff => (read_u64(r)?, 0x1_0000_0000),
        0xfe => (read_u32(r)? as u64, 0x1_0000),
        0xfd => (read_u16(r)? as u64, 0xfd),
        n => return Ok(n as u64),
    };
    if value < min {
        return Err(WireError::NonCanonicalVarInt(value));
    }
    Ok(value)
}

/// Append a length-prefixed byte string to an in-memory buffer
pub fn put_var_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    put_var_int(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Read a length-prefixed byte string of at most `max` bytes
pub fn read_var_bytes<R: Read>(r: &mut R, max: u64, field: &'static str) -> WireResult<Vec<u8>> {
    let count = read_var_int(r)?;
    if count > max {
        return Err(WireError::TooLarge { field, count, max });
    }
    let mut bytes = vec![0u8; count as usize];
    r.read_exact(&mut bytes)?;
    Ok(bytes)
}

pub(crate) fn read_u8<R: Read>(r: &mut R) -> WireResult<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_u16<R: Read>(r: &mut R) -> WireResult<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub(crate) fn read_u32<R: Read>(r: &mut R) -> WireResult<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub(crate) fn read_u64<R: Read>(r: &mut R) -> WireResult<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
