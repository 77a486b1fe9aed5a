use crate::error::ConvertError;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination for projected CSV rows. One handle is held for the whole run.
pub enum RowSink {
    Stdout(BufWriter<io::Stdout>),
    CsvFile(BufWriter<File>),
    Buffer(Vec<u8>),
}

impl RowSink {
    pub fn write_line(&mut self, line: &str) -> Result<(), ConvertError> {
        let result = match self {
            RowSink::Stdout(writer) => writeln!(writer, "{}", line),
            RowSink::CsvFile(writer) => writeln!(writer, "{}", line),
            RowSink::Buffer(buf) => writeln!(buf, "{}", line),
        };
        result.map_err(ConvertError::Output)
    }

    /// Bytes collected so far by a `Buffer` sink.
    pub fn contents(&self) -> Option<&[u8]> {
        match self {
            RowSink::Buffer(buf) => Some(buf.as_slice()),
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Result<(), ConvertError> {
        let result = match self {
            RowSink::Stdout(writer) => writer.flush(),
            RowSink::CsvFile(writer) => writer.flush(),
            RowSink::Buffer(_) => Ok(()),
        };
        result.map_err(ConvertError::Output)
    }

    pub fn finish(mut self) -> Result<(), ConvertError> {
        self.flush()
    }
}

/// Open the row destination: stdout when `output` is `None`, otherwise the
/// file. A file is truncated when a header is going to be written and
/// appended to otherwise.
pub fn create_sink(output: Option<&Path>, with_header: bool) -> Result<RowSink, ConvertError> {
    let Some(path) = output else {
        return Ok(RowSink::Stdout(BufWriter::new(io::stdout())));
    };
    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };
    create_parent_dirs(path).map_err(io_err)?;

    let mut options = OpenOptions::new();
    options.create(true);
    if with_header {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    let file = options.open(path).map_err(io_err)?;
    Ok(RowSink::CsvFile(BufWriter::new(file)))
}

fn create_parent_dirs(file_path: &Path) -> io::Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
