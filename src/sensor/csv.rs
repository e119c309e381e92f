//! CSV output sink
//!
//! One line per reading, `id,value,timestamp`, with the value rendered to two
//! decimals. Every line is flushed as soon as it is written.

use super::{Reading, SensorError, SensorResult};
use crate::queue::Sink;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render a reading as a CSV line (without the trailing newline)
pub fn format_line(reading: &Reading) -> String {
    format!("{},{:.2},{}", reading.id, reading.value, reading.timestamp)
}

/// Parse a line produced by [`format_line`]
pub fn parse_line(line: &str) -> SensorResult<Reading> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let parse_error = |reason: String| SensorError::Parse {
        line: trimmed.to_string(),
        reason,
    };

    let fields: Vec<&str> = trimmed.split(',').collect();
    if fields.len() != 3 {
        return Err(parse_error(format!("expected 3 fields, found {}", fields.len())));
    }

    let id = fields[0]
        .trim()
        .parse::<u16>()
        .map_err(|e| parse_error(format!("invalid id: {}", e)))?;
    let value = fields[1]
        .trim()
        .parse::<f64>()
        .map_err(|e| parse_error(format!("invalid value: {}", e)))?;
    let timestamp = fields[2]
        .trim()
        .parse::<i64>()
        .map_err(|e| parse_error(format!("invalid timestamp: {}", e)))?;

    Ok(Reading::new(id, value, timestamp))
}

/// Open the CSV output file, truncating it unless `append` is set
pub fn open_output(path: impl AsRef<Path>, append: bool) -> SensorResult<CsvSink<BufWriter<File>>> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    let file = options.open(path.as_ref())?;
    Ok(CsvSink::new(BufWriter::new(file)))
}

/// Append-only CSV writer for readings
pub struct CsvSink<W: Write> {
    writer: W,
    lines_written: usize,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    /// Write one line and flush it
    pub fn write_reading(&mut self, reading: &Reading) -> SensorResult<()> {
        writeln!(self.writer, "{}", format_line(reading))?;
        self.writer.flush()?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink<Reading> for CsvSink<W> {
    type Error = SensorError;

    fn write(&mut self, item: &Reading) -> Result<(), Self::Error> {
        self.write_reading(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_format_line_uses_two_decimals() {
        assert_eq!(format_line(&Reading::new(1, 3.14159, 1000)), "1,3.14,1000");
        assert_eq!(format_line(&Reading::new(2, -0.5, 1001)), "2,-0.50,1001");
        assert_eq!(format_line(&Reading::new(3, 20.0, -5)), "3,20.00,-5");
    }

    #[test]
    fn test_round_trip_to_two_decimals() {
        let original = Reading::new(129, 17.236, 1_699_999_999);
        let parsed = parse_line(&format_line(&original)).unwrap();

        assert_eq!(parsed.id, original.id);
        assert_eq!(parsed.timestamp, original.timestamp);
        assert!((parsed.value - original.value).abs() <= 0.005);
    }

    #[test]
    fn test_parse_line_accepts_trailing_newline() {
        let parsed = parse_line("5,1.25,42\n").unwrap();
        assert_eq!(parsed, Reading::new(5, 1.25, 42));
    }

    #[test]
    fn test_parse_line_rejects_malformed_input() {
        assert!(matches!(parse_line("1,2"), Err(SensorError::Parse { .. })));
        assert!(matches!(parse_line("x,2.0,3"), Err(SensorError::Parse { .. })));
        assert!(matches!(parse_line("1,abc,3"), Err(SensorError::Parse { .. })));
        assert!(matches!(parse_line("1,2.0,3,4"), Err(SensorError::Parse { .. })));
        assert!(matches!(parse_line("70000,2.0,3"), Err(SensorError::Parse { .. })));
    }

    #[test]
    fn test_sink_writes_one_line_per_reading() {
        let mut sink = CsvSink::new(Vec::new());
        sink.write(&Reading::new(1, 3.14, 1000)).unwrap();
        sink.write(&Reading::new(2, -0.5, 1001)).unwrap();

        assert_eq!(sink.lines_written(), 2);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "1,3.14,1000\n2,-0.50,1001\n");
    }

    struct UnflushableWriter {
        data: Vec<u8>,
    }

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "flush refused"))
        }
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let mut sink = CsvSink::new(UnflushableWriter { data: Vec::new() });
        let result = sink.write(&Reading::new(1, 1.0, 1));
        assert!(matches!(result, Err(SensorError::Io(_))));
        assert_eq!(sink.lines_written(), 0);
    }

    #[test]
    fn test_open_output_truncate_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensor_data_out.csv");

        let mut sink = open_output(&path, false).unwrap();
        sink.write_reading(&Reading::new(1, 1.0, 1)).unwrap();
        drop(sink);

        let mut sink = open_output(&path, true).unwrap();
        sink.write_reading(&Reading::new(2, 2.0, 2)).unwrap();
        drop(sink);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,1.00,1\n2,2.00,2\n");

        let mut sink = open_output(&path, false).unwrap();
        sink.write_reading(&Reading::new(3, 3.0, 3)).unwrap();
        drop(sink);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3,3.00,3\n");
    }
}
