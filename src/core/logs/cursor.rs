//! Pure bookkeeping for tailing a growing file: line splitting, the initial
//! window ring and the follow cursor. Nothing here touches the filesystem.

use std::collections::VecDeque;
use std::time::SystemTime;

/// Split `bytes` into complete lines.
///
/// Returns the decoded lines and the number of bytes consumed, which stops
/// right after the last `\n`. Anything after it is an unterminated fragment.
/// A trailing `\r` is dropped and invalid UTF-8 is replaced.
pub fn split_lines(bytes: &[u8]) -> (Vec<String>, usize) {
    let mut lines = Vec::new();
    let mut start = 0;

    for (i, byte) in bytes.iter().enumerate() {
        if *byte == b'\n' {
            lines.push(decode_line(&bytes[start..i]));
            start = i + 1;
        }
    }

    (lines, start)
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Ring of the most recent lines, bounded by the tail count (0 = unbounded).
#[derive(Debug, Clone)]
pub struct TailWindow {
    limit: usize,
    lines: VecDeque<String>,
}

impl TailWindow {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            lines: VecDeque::new(),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.limit > 0 && self.lines.len() == self.limit {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into()
    }
}

/// Lines selected for the initial tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialWindow {
    pub lines: Vec<String>,
    /// Bytes up to and including the last line terminator
    pub consumed: usize,
}

/// Select the last `last_n` complete lines of `bytes` (all when 0).
pub fn initial_window(bytes: &[u8], last_n: usize) -> InitialWindow {
    let (lines, consumed) = split_lines(bytes);
    let mut window = TailWindow::new(last_n);
    for line in lines {
        window.push(line);
    }
    InitialWindow {
        lines: window.into_lines(),
        consumed,
    }
}

/// What a size check found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Same size and modification time
    Unchanged,
    /// Same size, new modification time; nothing to read
    Touched,
    /// New bytes in `[from, to)`
    Grown { from: u64, to: u64 },
    /// The file is now shorter than the read offset
    Truncated,
}

/// Read position in a followed file plus any unterminated fragment.
#[derive(Debug, Clone, Default)]
pub struct TailCursor {
    offset: u64,
    last_len: u64,
    last_modified: Option<SystemTime>,
    identity: Option<u64>,
    pending: Vec<u8>,
}

impl TailCursor {
    /// Cursor positioned at `offset`, holding the fragment after the last
    /// complete line that was read.
    pub fn new(offset: u64, pending: Vec<u8>) -> Self {
        Self {
            offset,
            last_len: offset,
            last_modified: None,
            identity: None,
            pending,
        }
    }

    /// Cursor tied to the file identity (inode) it was read from.
    pub fn with_identity(mut self, identity: Option<u64>) -> Self {
        self.identity = identity;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn last_len(&self) -> u64 {
        self.last_len
    }

    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Compare a fresh size/mtime reading against the cursor and remember it.
    pub fn observe(&mut self, len: u64, modified: Option<SystemTime>) -> Observation {
        let observation = if len < self.offset {
            Observation::Truncated
        } else if len > self.offset {
            Observation::Grown {
                from: self.offset,
                to: len,
            }
        } else if modified.is_some() && self.last_modified.is_some() && modified != self.last_modified {
            Observation::Touched
        } else {
            Observation::Unchanged
        };

        self.last_len = len;
        self.last_modified = modified;
        observation
    }

    /// Record the identity of the file now at the path. Returns true when a
    /// different file has replaced the one being read. Unknown identities
    /// never count as a replacement.
    pub fn replaced(&mut self, identity: Option<u64>) -> bool {
        let replaced = matches!((self.identity, identity), (Some(old), Some(new)) if old != new);
        if identity.is_some() {
            self.identity = identity;
        }
        replaced
    }

    /// Restart from the beginning of the file, dropping any fragment.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.pending.clear();
    }

    /// Take bytes read at the current offset and return the lines they
    /// complete. The unterminated remainder is kept for the next call.
    pub fn absorb(&mut self, bytes: &[u8]) -> Vec<String> {
        self.offset += bytes.len() as u64;
        self.pending.extend_from_slice(bytes);

        let (lines, consumed) = split_lines(&self.pending);
        self.pending.drain(..consumed);
        lines
    }
}
