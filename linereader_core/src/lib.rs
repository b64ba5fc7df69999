pub mod error;
pub mod parse;
pub mod ver;

use std::collections::VecDeque;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::LineReaderError;

/// A single delimited block of input.
///
/// `data` holds the line bytes with the terminator excluded. `terminator`
/// holds the byte sequence that ended the block; it is empty when the block
/// was produced by a flush and the trailing data had no (or an incomplete)
/// terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub data: Bytes,
    pub terminator: Bytes,
}

impl Line {
    pub fn new(data: Bytes, terminator: Bytes) -> Self {
        Line { data, terminator }
    }

    /// Whether this block was ended by an actual terminator sequence.
    pub fn has_terminator(&self) -> bool {
        !self.terminator.is_empty()
    }

    /// Length of the line data, terminator excluded.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data_ref(&self) -> &Bytes {
        &self.data
    }

    pub fn terminator_ref(&self) -> &Bytes {
        &self.terminator
    }
}

/// Receives delimited blocks from a reader. Calls are synchronous.
pub trait LineSink {
    /// Receive a line-delimited block of data.
    fn accept_line(&mut self, line: Line);
}

impl LineSink for Vec<Line> {
    fn accept_line(&mut self, line: Line) {
        self.push(line);
    }
}

impl LineSink for VecDeque<Line> {
    fn accept_line(&mut self, line: Line) {
        self.push_back(line);
    }
}

#[derive(Debug, Clone)]
pub struct ReaderVersion {
    pub version_major: u16,
    pub version_minor: u16,
    pub version_metadata: VersionMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMetadata {
    Experimental,
    Beta,
    Stable,
}

impl FromStr for VersionMetadata {
    type Err = LineReaderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "experimental" => Ok(VersionMetadata::Experimental),
            "beta" => Ok(VersionMetadata::Beta),
            "stable" => Ok(VersionMetadata::Stable),
            _ => Err(LineReaderError::Error(
                "Unknown version metadata".to_string(),
            )),
        }
    }
}

impl Into<String> for VersionMetadata {
    fn into(self) -> String {
        match self {
            VersionMetadata::Experimental => "experimental".to_string(),
            VersionMetadata::Beta => "beta".to_string(),
            VersionMetadata::Stable => "stable".to_string(),
        }
    }
}

impl ReaderVersion {
    pub fn version(&self) -> (u16, u16, VersionMetadata) {
        (
            self.version_major,
            self.version_minor,
            self.version_metadata.clone(),
        )
    }
    pub fn version_major(&self) -> u16 {
        self.version_major
    }
    pub fn version_minor(&self) -> u16 {
        self.version_minor
    }
    pub fn version_metadata(&self) -> VersionMetadata {
        self.version_metadata.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ver::{VERSION_NUMBER, VERSION_STRING};

    #[test]
    fn test_version_constants_present() {
        assert!(VERSION_NUMBER >= 0.0, "version number must be non-negative");
        assert!(!VERSION_STRING.is_empty(), "version string must be non-empty");
    }

    #[test]
    fn test_version_constants_stable_across_reads() {
        let first = (VERSION_NUMBER, VERSION_STRING);
        let second = (VERSION_NUMBER, VERSION_STRING);
        assert_eq!(first.0.to_bits(), second.0.to_bits());
        assert_eq!(first.1.as_bytes(), second.1.as_bytes());
    }

    #[test]
    fn test_version_metadata_from_str() {
        assert_eq!(
            "Experimental".parse::<VersionMetadata>().ok(),
            Some(VersionMetadata::Experimental)
        );
        assert_eq!(
            "stable".parse::<VersionMetadata>().ok(),
            Some(VersionMetadata::Stable)
        );
        assert!("nightly".parse::<VersionMetadata>().is_err());
    }

    #[test]
    fn test_line_accessors() {
        let line = Line::new(bytes::Bytes::from_static(b"abc"), bytes::Bytes::new());
        assert_eq!(line.len(), 3);
        assert!(!line.has_terminator());
        assert!(!line.is_empty());
    }
}
