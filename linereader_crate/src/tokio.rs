extern crate __tk_rt_private as tokio; // use renamed tokio as tokio

use std::ffi::OsStr;

use tokio::task;

use crate::types::Line;
use crate::{
    Config, LineReaderError, Terminators, read_lines_from_file, read_lines_from_reader,
    split_bytes_to_lines,
};

// Tokio async wrappers for functions

pub fn split_bytes_to_lines_tokio(
    bytes: Vec<u8>,
    terminators: Terminators,
    config: Config,
) -> task::JoinHandle<Result<Vec<Line>, LineReaderError>> {
    task::spawn_blocking(move || split_bytes_to_lines(&bytes, terminators, config))
}

pub fn read_lines_from_reader_tokio<R: std::io::Read + Send + 'static>(
    input: R,
    terminators: Terminators,
    config: Config,
) -> task::JoinHandle<Result<Vec<Line>, LineReaderError>> {
    task::spawn_blocking(move || read_lines_from_reader(input, terminators, config))
}

pub fn read_lines_from_file_tokio<P: AsRef<OsStr> + Send + 'static>(
    input: P,
    terminators: Terminators,
    config: Config,
) -> task::JoinHandle<Result<Vec<Line>, LineReaderError>> {
    task::spawn_blocking(move || read_lines_from_file(input, terminators, config))
}
