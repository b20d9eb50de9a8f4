//! Chunked NDJSON reader for the statement corpus.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AppError;
use crate::models::RawStatement;

/// A batch of parsed records from consecutive input lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    /// Position of this chunk in the input, starting at 0.
    pub index: usize,
    pub rows: Vec<RawStatement>,
}

/// Line accounting for one pass over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    pub records: usize,
    pub blank: usize,
    pub malformed: usize,
}

/// Reads `chunk_size` lines at a time and parses each as a [`RawStatement`].
///
/// Lines are read as raw bytes, so invalid UTF-8 is just another malformed
/// record. Malformed lines are logged, counted in [`ReadStats::malformed`],
/// and skipped. I/O errors end iteration with an error.
pub struct ChunkReader<R> {
    reader: R,
    buf: Vec<u8>,
    chunk_size: usize,
    line_no: usize,
    next_index: usize,
    stats: ReadStats,
}

impl ChunkReader<BufReader<File>> {
    /// Open a corpus file.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, AppError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), chunk_size))
    }
}

impl<R: BufRead> ChunkReader<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            chunk_size: chunk_size.max(1),
            line_no: 0,
            next_index: 0,
            stats: ReadStats::default(),
        }
    }

    /// Counts accumulated so far.
    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    /// Next raw line into `buf` without its line terminator.
    /// `Ok(false)` at end of input.
    fn read_line(&mut self) -> Result<bool, AppError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(true)
    }

    fn parse_line(&mut self) -> Option<RawStatement> {
        let trimmed = self.buf.trim_ascii();
        if trimmed.is_empty() {
            self.stats.blank += 1;
            return None;
        }
        match serde_json::from_slice::<RawStatement>(trimmed) {
            Ok(record) => {
                self.stats.records += 1;
                Some(record)
            }
            Err(e) => {
                self.stats.malformed += 1;
                tracing::warn!(line = self.line_no, error = %e, "Skipping malformed record");
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for ChunkReader<R> {
    type Item = Result<Chunk, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = Vec::new();
        let mut consumed = 0;

        while consumed < self.chunk_size {
            match self.read_line() {
                Err(e) => return Some(Err(e)),
                Ok(false) => break,
                Ok(true) => {
                    consumed += 1;
                    self.line_no += 1;
                    self.stats.lines += 1;
                    if let Some(record) = self.parse_line() {
                        rows.push(record);
                    }
                }
            }
        }

        if consumed == 0 {
            return None;
        }

        let chunk = Chunk {
            index: self.next_index,
            rows,
        };
        self.next_index += 1;
        tracing::debug!(chunk = chunk.index, rows = chunk.rows.len(), "Read chunk");
        Some(Ok(chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn line(verb: &str) -> String {
        format!(r#"{{"pre":"people","verb":"{}","post":"x","date":"2020-01-01","urls":[]}}"#, verb)
    }

    #[test]
    fn test_chunks_by_line_count() {
        let input = [line("a"), line("b"), line("c")].join("\n");
        let reader = ChunkReader::new(Cursor::new(input), 2);
        let chunks: Vec<Chunk> = reader.map(|c| c.unwrap()).collect();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].rows.len(), 2);
        assert_eq!(chunks[1].index, 1);
        assert_eq!(chunks[1].rows[0].verb, "c");
    }

    #[test]
    fn test_malformed_lines_are_skipped_and_counted() {
        let input = format!("{}\n{{not json\n\n{}\n", line("a"), line("b"));
        let mut reader = ChunkReader::new(Cursor::new(input), 10);

        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk.rows.len(), 2);
        assert!(reader.next().is_none());

        let stats = reader.stats();
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.blank, 1);
    }

    #[test]
    fn test_invalid_utf8_line_is_malformed() {
        let mut input = line("a").into_bytes();
        input.extend_from_slice(b"\n{\"verb\":\"\xff\xfe\"}\r\n");
        input.extend_from_slice(line("b").as_bytes());

        let mut reader = ChunkReader::new(Cursor::new(input), 10);
        let chunk = reader.next().unwrap().unwrap();
        let verbs: Vec<&str> = chunk.rows.iter().map(|r| r.verb.as_str()).collect();
        assert_eq!(verbs, ["a", "b"]);
        assert!(reader.next().is_none());

        let stats = reader.stats();
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = format!("{}\r\n\r\n{}\r\n", line("a"), line("b"));
        let mut reader = ChunkReader::new(Cursor::new(input), 10);
        assert_eq!(reader.next().unwrap().unwrap().rows.len(), 2);
        assert_eq!(reader.stats().blank, 1);
        assert_eq!(reader.stats().malformed, 0);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let mut reader = ChunkReader::new(Cursor::new(""), 10);
        assert!(reader.next().is_none());
        assert_eq!(reader.stats(), ReadStats::default());
    }

    #[test]
    fn test_zero_chunk_size_reads_one_line_per_chunk() {
        let input = [line("a"), line("b")].join("\n");
        let reader = ChunkReader::new(Cursor::new(input), 0);
        assert_eq!(reader.count(), 2);
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", line("closed")).unwrap();

        let mut reader = ChunkReader::open(file.path(), 100).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk.rows[0].verb, "closed");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = ChunkReader::open(Path::new("/nonexistent/corpus.jsonl"), 10);
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
