//! Binary reading records
//!
//! Each record is packed with no padding: a `u16` id, an `f64` value and an
//! `i64` timestamp, all little-endian, in that order.

use super::{Reading, SensorError, SensorResult};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Size in bytes of one encoded record
pub const RECORD_SIZE: usize = 2 + 8 + 8;

/// Iterator over the readings of a binary source
///
/// A clean end of input at a record boundary ends iteration. A short final
/// record or an I/O error is reported once, after which the iterator is
/// exhausted.
pub struct ReadingReader<R> {
    inner: R,
    offset: u64,
    finished: bool,
}

impl ReadingReader<BufReader<File>> {
    /// Open a binary readings file
    pub fn open(path: impl AsRef<Path>) -> SensorResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> ReadingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            finished: false,
        }
    }

    /// Byte offset of the next record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn read_record(&mut self) -> SensorResult<Option<Reading>> {
        let mut buf = [0u8; RECORD_SIZE];
        let mut filled = 0;

        while filled < RECORD_SIZE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SensorError::Io(e)),
            }
        }

        match filled {
            0 => Ok(None),
            RECORD_SIZE => {
                self.offset += RECORD_SIZE as u64;
                Ok(Some(decode(&buf)))
            }
            len => Err(SensorError::TruncatedRecord {
                offset: self.offset,
                len,
                expected: RECORD_SIZE,
            }),
        }
    }
}

impl<R: Read> Iterator for ReadingReader<R> {
    type Item = SensorResult<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_record() {
            Ok(Some(reading)) => Some(Ok(reading)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for ReadingReader<R> {}

fn decode(buf: &[u8; RECORD_SIZE]) -> Reading {
    let mut id = [0u8; 2];
    let mut value = [0u8; 8];
    let mut timestamp = [0u8; 8];
    id.copy_from_slice(&buf[0..2]);
    value.copy_from_slice(&buf[2..10]);
    timestamp.copy_from_slice(&buf[10..18]);

    Reading {
        id: u16::from_le_bytes(id),
        value: f64::from_le_bytes(value),
        timestamp: i64::from_le_bytes(timestamp),
    }
}

fn encode(reading: &Reading) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..2].copy_from_slice(&reading.id.to_le_bytes());
    buf[2..10].copy_from_slice(&reading.value.to_le_bytes());
    buf[10..18].copy_from_slice(&reading.timestamp.to_le_bytes());
    buf
}

/// Writes readings in the binary record layout
pub struct ReadingWriter<W: Write> {
    inner: W,
    written: usize,
}

impl ReadingWriter<BufWriter<File>> {
    /// Create (or truncate) a binary readings file
    pub fn create(path: impl AsRef<Path>) -> SensorResult<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReadingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn write(&mut self, reading: &Reading) -> SensorResult<()> {
        self.inner.write_all(&encode(reading))?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a>(
        &mut self,
        readings: impl IntoIterator<Item = &'a Reading>,
    ) -> SensorResult<()> {
        for reading in readings {
            self.write(reading)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> SensorResult<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encoded(readings: &[Reading]) -> Vec<u8> {
        let mut writer = ReadingWriter::new(Vec::new());
        writer.write_all(readings).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_record_layout_is_packed_little_endian() {
        let bytes = encoded(&[Reading::new(0x0102, 1.0, 0x0A0B)]);
        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(&bytes[0..2], &[0x02, 0x01]);
        assert_eq!(&bytes[2..10], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[10..18], &[0x0B, 0x0A, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_reads_records_in_source_order() {
        let readings = vec![
            Reading::new(1, 3.14, 1000),
            Reading::new(2, -0.5, 1001),
            Reading::new(3, 20.0, 1002),
        ];
        let reader = ReadingReader::new(Cursor::new(encoded(&readings)));

        let decoded: Vec<Reading> = reader.map(|r| r.unwrap()).collect();
        assert_eq!(decoded, readings);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let mut reader = ReadingReader::new(Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_truncated_trailing_record_reported_once() {
        let mut bytes = encoded(&[Reading::new(1, 1.5, 10)]);
        bytes.extend_from_slice(&[9, 0, 1]);
        let mut reader = ReadingReader::new(Cursor::new(bytes));

        assert_eq!(reader.next().unwrap().unwrap(), Reading::new(1, 1.5, 10));
        match reader.next() {
            Some(Err(SensorError::TruncatedRecord {
                offset,
                len,
                expected,
            })) => {
                assert_eq!(offset, RECORD_SIZE as u64);
                assert_eq!(len, 3);
                assert_eq!(expected, RECORD_SIZE);
            }
            other => panic!("expected truncated record, got {:?}", other),
        }
        assert!(reader.next().is_none());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_io_error_ends_iteration() {
        let mut reader = ReadingReader::new(FailingReader);
        assert!(matches!(reader.next(), Some(Err(SensorError::Io(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensor_data");
        let readings = vec![Reading::new(15, 20.25, 1_700_000_000), Reading::new(21, 18.5, 1_700_000_005)];

        let mut writer = ReadingWriter::create(&path).unwrap();
        writer.write_all(&readings).unwrap();
        assert_eq!(writer.written(), 2);
        writer.finish().unwrap();

        let decoded: Vec<Reading> = ReadingReader::open(&path)
            .unwrap()
            .collect::<SensorResult<_>>()
            .unwrap();
        assert_eq!(decoded, readings);
    }
}
