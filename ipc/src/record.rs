//! Fixed-size integer records
//!
//! Workers exchange `i32` values. Each value travels as exactly
//! [`RECORD_SIZE`] little-endian bytes, so a reader can always tell a clean
//! end-of-stream from one that cut a record in half.

use crate::{ChannelError, ReadEndpoint, WriteEndpoint};

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = std::mem::size_of::<i32>();

/// Encodes a value as a record
pub fn encode_record(value: i32) -> [u8; RECORD_SIZE] {
    value.to_le_bytes()
}

/// Decodes a record
pub fn decode_record(bytes: [u8; RECORD_SIZE]) -> i32 {
    i32::from_le_bytes(bytes)
}

impl WriteEndpoint {
    /// Writes one record with a single write
    ///
    /// Returns the bytes transferred. Anything less than [`RECORD_SIZE`] is a
    /// transport failure the caller must not paper over.
    pub fn write_record(&mut self, value: i32) -> Result<usize, ChannelError> {
        self.write(&encode_record(value))
    }
}

impl ReadEndpoint {
    /// Reads one record
    ///
    /// Returns `Ok(None)` on end-of-stream at a record boundary.
    pub fn read_record(&mut self) -> Result<Option<i32>, ChannelError> {
        let mut buf = [0u8; RECORD_SIZE];
        let mut filled = 0;
        while filled < RECORD_SIZE {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ChannelError::TruncatedRecord {
                    end: self.end(),
                    received: filled,
                    expected: RECORD_SIZE,
                });
            }
            filled += n;
        }
        Ok(Some(decode_record(buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_channel;

    #[test]
    fn test_record_size() {
        assert_eq!(RECORD_SIZE, 4);
    }

    #[test]
    fn test_negative_value_encoding() {
        assert_eq!(decode_record(encode_record(-42)), -42);
        assert_eq!(encode_record(1), [1, 0, 0, 0]);
    }

    #[test]
    fn test_records_then_end_of_stream() {
        let (mut write, mut read) = create_channel().unwrap().into_endpoints();
        for value in [5, 6, 7] {
            assert_eq!(write.write_record(value).unwrap(), RECORD_SIZE);
        }
        write.close();

        assert_eq!(read.read_record().unwrap(), Some(5));
        assert_eq!(read.read_record().unwrap(), Some(6));
        assert_eq!(read.read_record().unwrap(), Some(7));
        assert_eq!(read.read_record().unwrap(), None);
    }

    #[test]
    fn test_empty_stream_is_clean_end() {
        let (write, mut read) = create_channel().unwrap().into_endpoints();
        drop(write);
        assert_eq!(read.read_record().unwrap(), None);
    }

    #[test]
    fn test_partial_record_is_truncated() {
        let (mut write, mut read) = create_channel().unwrap().into_endpoints();
        write.write(&[1, 2]).unwrap();
        write.close();

        let err = read.read_record().unwrap_err();
        assert!(matches!(
            err,
            ChannelError::TruncatedRecord {
                received: 2,
                expected: 4,
                ..
            }
        ));
    }
}
