#[allow(unused)]
use std::{
    ffi::OsStr,
    fmt::Display,
    fs::File,
    io::Read,
    path::Path,
};

pub use linereader_core::error::LineReaderError;
pub use linereader_core::ver;
use linereader_core::ver::{VERSION_MAJOR, VERSION_MINOR, VERSION_METADATA, VERSION_NUMBER, VERSION_STRING};
use linereader_core::{Line, ReaderVersion, VersionMetadata};

pub use crate::reader::{LineIterator, LineReader};

pub mod reader;

#[cfg(feature = "tokio_async")]
pub mod tokio;

pub mod types;

/// Carriage return.
pub const CR: u8 = b'\r';
/// Line feed.
pub const LF: u8 = b'\n';

/// The terminator set a reader splits on.
#[derive(Debug, Clone)]
pub enum Terminators {
    Lf,                     // \n (unix)
    Cr,                     // \r (classic mac)
    CrLf,                   // \r\n (network / dos)
    Any,                    // \n, \r and \r\n, longest match wins
    Custom(Vec<Vec<u8>>),   // arbitrary byte sequences
}

impl Default for Terminators {
    fn default() -> Self {
        Terminators::Any
    }
}

impl Display for Terminators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Terminators::Lf => f.write_str("lf"),
            Terminators::Cr => f.write_str("cr"),
            Terminators::CrLf => f.write_str("crlf"),
            Terminators::Any => f.write_str("any"),
            Terminators::Custom(_) => f.write_str("custom"),
        }
    }
}

impl Terminators {
    /// The byte sequences this set stands for.
    pub fn sequences(&self) -> Vec<Vec<u8>> {
        match self {
            Terminators::Lf => vec![vec![LF]],
            Terminators::Cr => vec![vec![CR]],
            Terminators::CrLf => vec![vec![CR, LF]],
            Terminators::Any => vec![vec![LF], vec![CR], vec![CR, LF]],
            Terminators::Custom(sequences) => sequences.clone(),
        }
    }
}

/// Default read-ahead, based off the Advanced Format disk buffer size.
pub const DEFAULT_BLOCK_SIZE: usize = 4 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on the data bytes of a single line. Exceeding it fails
    /// the read with [`LineReaderError::LineTooLong`]. `None` means no limit.
    pub max_line_length: Option<usize>,
    /// Block size used when reading from slices, readers and files.
    pub read_block_size: usize,
}

impl Config {
    pub fn new(max_line_length: Option<usize>, read_block_size: usize) -> Self {
        Self {
            max_line_length,
            read_block_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_length: None,
            read_block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

pub fn version() -> ReaderVersion {
    ReaderVersion {
        version_major: VERSION_MAJOR,
        version_minor: VERSION_MINOR,
        version_metadata: VERSION_METADATA
            .parse()
            .unwrap_or(VersionMetadata::Experimental),
    }
}

/// The numeric build-version identifier. Fixed per build, read-only.
pub fn version_number() -> f64 {
    VERSION_NUMBER
}

/// The textual build-version identifier. Fixed per build, read-only.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

/// Splits a byte slice into delimited lines.
///
/// # Parameters
/// - `bytes` - The raw input.
/// - `terminators` - The [`Terminators`] set to split on.
/// - `config` - [`Config`] with the line-length limit and block size.
///
/// # Returns
/// - `Ok(Vec<Line>)` - All lines, trailing unterminated data included.
/// - `Err(LineReaderError)` - A line exceeded the configured limit.
pub fn split_bytes_to_lines(
    bytes: &[u8],
    terminators: Terminators,
    config: Config,
) -> Result<Vec<Line>, LineReaderError> {
    let mut reader = LineReader::with_config(terminators, config);
    let mut lines = Vec::new();

    reader.feed(bytes, &mut lines)?;
    reader.flush(&mut lines)?;

    Ok(lines)
}

/// Lazily iterates over the lines of a byte slice.
///
/// The slice is consumed in blocks of [`DEFAULT_BLOCK_SIZE`]; use
/// [`LineIterator::with_config`] to change that.
pub fn lines(data: &[u8], terminators: Terminators) -> LineIterator<'_> {
    LineIterator::new(data, terminators)
}

/// Reads all delimited lines from any [`Read`] source, block by block.
///
/// # Parameters
/// - `input` - The source to drain.
/// - `terminators` - The [`Terminators`] set to split on.
/// - `config` - [`Config`] with the line-length limit and block size.
///
/// # Returns
/// - `Ok(Vec<Line>)` - All lines, trailing unterminated data included.
/// - `Err(LineReaderError)` - I/O failure or a line exceeded the limit.
pub fn read_lines_from_reader<R: Read>(
    mut input: R,
    terminators: Terminators,
    config: Config,
) -> Result<Vec<Line>, LineReaderError> {
    let block_size = config.read_block_size.max(1);
    let mut reader = LineReader::with_config(terminators, config);
    let mut lines = Vec::new();

    /* ===== Drain the source in blocks ===== */
    let mut block = vec![0u8; block_size];
    loop {
        let n = input.read(&mut block)?;
        if n == 0 {
            break;
        }
        reader.feed(&block[..n], &mut lines)?;
    }

    /* ===== Deliver trailing data ===== */
    reader.flush(&mut lines)?;

    Ok(lines)
}

/// Reads all delimited lines from a file.
///
/// # Parameters
/// - `input` - Path to the input file.
/// - `terminators` - The [`Terminators`] set to split on.
/// - `config` - [`Config`] with the line-length limit and block size.
///
/// # Returns
/// - `Ok(Vec<Line>)` - All lines, trailing unterminated data included.
/// - `Err(LineReaderError)` - I/O failure or a line exceeded the limit.
pub fn read_lines_from_file<P: AsRef<OsStr>>(
    input: P,
    terminators: Terminators,
    config: Config,
) -> Result<Vec<Line>, LineReaderError> {
    let file = File::open(Path::new(&input))?;
    read_lines_from_reader(file, terminators, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_reads_are_identical() {
        let first = (version_number(), version_string());
        let second = (version_number(), version_string());
        assert_eq!(first.0.to_bits(), second.0.to_bits());
        assert_eq!(first.1, second.1);
        assert!(first.0 >= 0.0);
        assert!(!first.1.is_empty());
    }

    #[test]
    fn test_version_struct_matches_constants() {
        let v = version();
        assert_eq!(v.version_major(), VERSION_MAJOR);
        assert_eq!(v.version_minor(), VERSION_MINOR);
        assert_eq!(v.version_metadata(), VersionMetadata::Experimental);
    }

    #[test]
    fn test_terminators_display() {
        assert_eq!(Terminators::Lf.to_string(), "lf");
        assert_eq!(Terminators::default().to_string(), "any");
        assert_eq!(Terminators::Custom(vec![vec![0]]).to_string(), "custom");
    }

    #[test]
    fn test_split_simple_lf() {
        let lines = split_bytes_to_lines(b"one\ntwo\n", Terminators::Lf, Config::default())
            .expect("split failed");
        assert_eq!(lines.len(), 2);
        assert_eq!(&lines[0].data[..], b"one");
        assert_eq!(&lines[0].terminator[..], b"\n");
        assert_eq!(&lines[1].data[..], b"two");
    }
}
