/// `reader.rs` - streaming reader splitting raw data on a set of terminators
use std::collections::VecDeque;
use std::mem;

use bytes::Bytes;
use log::warn;

use crate::{Config, Terminators};
use linereader_core::error::LineReaderError;
use linereader_core::parse::ParseNode;
use linereader_core::{Line, LineSink};

/// Reads raw data in blocks separated by a given set of terminators.
///
/// Bytes are fed in through [`LineReader::feed`]; every completed block is
/// handed to a [`LineSink`] as a [`Line`] holding the data (terminator
/// excluded) and the terminator sequence that ended it. Matching is greedy:
/// when one terminator is a prefix of another (e.g. CR and CRLF), the longer
/// one wins whenever the following bytes complete it.
///
/// State is kept across calls, so terminators split over block boundaries
/// are still recognized. Call [`LineReader::flush`] once the input ends to
/// deliver any trailing data.
#[derive(Debug, Clone)]
pub struct LineReader {
    /// The parsing tree to match incoming bytes to any terminator.
    tree: ParseNode<u8>,
    /// Bytes of the line currently being assembled (terminator excluded).
    line: Vec<u8>,
    /// Bytes consumed into the current terminator candidate.
    pending: Vec<u8>,
    /// Length of the longest complete terminator prefix inside `pending`.
    matched: Option<usize>,
    config: Config,
}

impl LineReader {
    /// Initializes a new line-block reader with the default [`Config`].
    ///
    /// # Parameters
    /// - `terminators` - Set of byte sequences where each one can end a
    ///   block of input if encountered while streaming data.
    pub fn new(terminators: Terminators) -> Self {
        Self::with_config(terminators, Config::default())
    }

    /// Initializes a new line-block reader.
    ///
    /// Empty terminator sequences carry no parse tree and are skipped with
    /// a warning. With no usable sequences at all, the entire input becomes
    /// a single block delivered on flush.
    pub fn with_config(terminators: Terminators, config: Config) -> Self {
        let mut tree = ParseNode::new();
        for sequence in terminators.sequences() {
            if !tree.insert(&sequence) {
                warn!("empty terminator sequence ignored");
            }
        }

        LineReader {
            tree,
            line: Vec::new(),
            pending: Vec::new(),
            matched: None,
            config,
        }
    }

    /// The set of byte sequences that each can end a block of input,
    /// reconstructed from the parse tree.
    pub fn terminators(&self) -> Vec<Bytes> {
        self.tree
            .terminals()
            .into_iter()
            .map(Bytes::from)
            .collect()
    }

    /// Number of data bytes buffered for the line currently being read.
    pub fn buffered(&self) -> usize {
        self.line.len() + self.pending.len()
    }

    /// Streams a block of data through the reader.
    ///
    /// # Parameters
    /// - `data` - The next block of raw input.
    /// - `sink` - Receives every completed [`Line`]. Calls are synchronous.
    ///
    /// # Returns
    /// - `Ok(())` - Block consumed; zero or more lines were delivered.
    /// - `Err(LineReaderError)` - A line exceeded the configured limit.
    pub fn feed<S: LineSink>(&mut self, data: &[u8], sink: &mut S) -> Result<(), LineReaderError> {
        let mut queue: VecDeque<u8> = data.iter().copied().collect();
        self.process(&mut queue, sink)
    }

    /// Delivers any trailing data to the sink and clears the reader.
    ///
    /// A pending match that already completed a terminator is honored. A
    /// pending incomplete match is folded into the line data, and the final
    /// block is delivered with an *empty* terminator.
    pub fn flush<S: LineSink>(&mut self, sink: &mut S) -> Result<(), LineReaderError> {
        let mut queue = VecDeque::new();

        /* ===== Resolve candidate bytes still waiting on more input ===== */
        while !self.pending.is_empty() {
            if let Some(matched) = self.matched {
                // the longest completed terminator stands
                let rest = self.pending.split_off(matched);
                self.emit(sink);
                queue.extend(rest);
            } else {
                // no complete terminator in the candidate: its first byte is
                // plain data, the rest get rescanned one position later
                let head = self.pending.remove(0);
                let rest = mem::take(&mut self.pending);
                self.push_data_byte(head)?;
                queue.extend(rest);
            }
            self.process(&mut queue, sink)?;
        }

        /* ===== Deliver unterminated trailing data ===== */
        if !self.line.is_empty() {
            let data = mem::take(&mut self.line);
            sink.accept_line(Line::new(Bytes::from(data), Bytes::new()));
        }

        Ok(())
    }

    /// Discards all buffered state without delivering it.
    pub fn reset(&mut self) {
        self.line.clear();
        self.pending.clear();
        self.matched = None;
    }

    fn process<S: LineSink>(
        &mut self,
        queue: &mut VecDeque<u8>,
        sink: &mut S,
    ) -> Result<(), LineReaderError> {
        while let Some(byte) = queue.pop_front() {
            match self.candidate_step(byte) {
                Some((terminal, leaf)) => {
                    self.pending.push(byte);
                    if terminal {
                        self.matched = Some(self.pending.len());
                    }
                    if leaf {
                        // no terminator extends this one, the match is final
                        self.emit(sink);
                    }
                }
                None if self.pending.is_empty() => {
                    self.push_data_byte(byte)?;
                }
                None => {
                    if let Some(matched) = self.matched {
                        // fall back to the longest completed terminator;
                        // everything past it goes around again
                        let rest = self.pending.split_off(matched);
                        self.emit(sink);
                        Self::requeue(queue, rest, byte);
                    } else {
                        // failed candidate: its first byte is plain data,
                        // the rest get rescanned from the next position
                        let head = self.pending.remove(0);
                        let rest = mem::take(&mut self.pending);
                        self.push_data_byte(head)?;
                        Self::requeue(queue, rest, byte);
                    }
                }
            }
        }
        Ok(())
    }

    // Walk the tree over the pending bytes, then try one more step with
    // `byte`. Returns (terminal, leaf) of the node that step reaches.
    // `pending` always names a valid path, so the walk cannot dead-end.
    fn candidate_step(&self, byte: u8) -> Option<(bool, bool)> {
        let mut node = &self.tree;
        for pending_byte in &self.pending {
            node = node.follower(*pending_byte)?;
        }
        node.follower(byte)
            .map(|next| (next.is_terminal(), next.is_leaf()))
    }

    // Deliver the buffered line; `pending` holds exactly the terminator.
    fn emit<S: LineSink>(&mut self, sink: &mut S) {
        let data = mem::take(&mut self.line);
        let terminator = mem::take(&mut self.pending);
        self.matched = None;
        sink.accept_line(Line::new(Bytes::from(data), Bytes::from(terminator)));
    }

    fn push_data_byte(&mut self, byte: u8) -> Result<(), LineReaderError> {
        if let Some(limit) = self.config.max_line_length
            && self.line.len() >= limit
        {
            return Err(LineReaderError::LineTooLong {
                length: self.line.len() + 1,
                limit,
            });
        }
        self.line.push(byte);
        Ok(())
    }

    fn requeue(queue: &mut VecDeque<u8>, rest: Vec<u8>, byte: u8) {
        queue.push_front(byte);
        for b in rest.into_iter().rev() {
            queue.push_front(b);
        }
    }
}

/// Lazy iterator over the lines of a byte slice.
///
/// The slice is fed to a [`LineReader`] in fixed-size blocks
/// (`Config::read_block_size`), so read-ahead stays bounded even for large
/// inputs. Created through [`crate::lines`].
#[derive(Debug)]
pub struct LineIterator<'a> {
    data: &'a [u8],
    offset: usize,
    block_size: usize,
    reader: LineReader,
    ready: VecDeque<Line>,
    flushed: bool,
    failed: bool,
}

impl<'a> LineIterator<'a> {
    pub fn new(data: &'a [u8], terminators: Terminators) -> Self {
        Self::with_config(data, terminators, Config::default())
    }

    pub fn with_config(data: &'a [u8], terminators: Terminators, config: Config) -> Self {
        let block_size = config.read_block_size.max(1);
        LineIterator {
            data,
            offset: 0,
            block_size,
            reader: LineReader::with_config(terminators, config),
            ready: VecDeque::new(),
            flushed: false,
            failed: false,
        }
    }
}

impl<'a> Iterator for LineIterator<'a> {
    type Item = Result<Line, LineReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            if self.failed {
                return None;
            }

            if self.offset < self.data.len() {
                let end = (self.offset + self.block_size).min(self.data.len());
                let block = &self.data[self.offset..end];
                self.offset = end;
                if let Err(e) = self.reader.feed(block, &mut self.ready) {
                    self.failed = true;
                    return Some(Err(e));
                }
            } else if !self.flushed {
                self.flushed = true;
                if let Err(e) = self.reader.flush(&mut self.ready) {
                    self.failed = true;
                    return Some(Err(e));
                }
            } else {
                return None;
            }
        }
    }
}
