//! Test fixtures and helpers.
//!
//! Message builders, temp files, and byte sources that misbehave on demand.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tempfile::NamedTempFile;

/// `0, 1, ..., 255, 0, 1, ...` of the given length, produced lazily.
pub fn sequential_bytes(len: usize) -> impl Iterator<Item = u8> + Clone {
    (0..len).map(|i| i as u8)
}

/// Same as [`sequential_bytes`], collected.
pub fn sequential_vec(len: usize) -> Vec<u8> {
    sequential_bytes(len).collect()
}

/// Deterministic pseudo-random message.
pub fn random_message(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Write `data` to a fresh temp file, deleted when the handle drops.
pub fn temp_file_with(data: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(data)?;
    file.flush()?;
    Ok(file)
}

/// Write a sequential-byte message of `len` bytes to a temp file without
/// holding it in memory.
pub fn sequential_temp_file(len: usize) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    let pattern = sequential_vec(256);
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(pattern.len());
        file.write_all(&pattern[..n])?;
        remaining -= n;
    }
    file.flush()?;
    Ok(file)
}

/// A seekable in-memory source with injectable failures.
#[derive(Debug)]
pub struct FlakySource {
    inner: Cursor<Vec<u8>>,
    fail_read_at: Option<u64>,
    fail_seek_to: Option<u64>,
    interrupt_every: Option<usize>,
    reads: usize,
}

impl FlakySource {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(data),
            fail_read_at: None,
            fail_seek_to: None,
            interrupt_every: None,
            reads: 0,
        }
    }

    /// Fail every read once `offset` bytes have been served.
    pub fn fail_read_at(mut self, offset: u64) -> Self {
        self.fail_read_at = Some(offset);
        self
    }

    /// Refuse absolute seeks to `offset`.
    pub fn fail_seek_to(mut self, offset: u64) -> Self {
        self.fail_seek_to = Some(offset);
        self
    }

    /// Return `ErrorKind::Interrupted` on every `n`th read call.
    pub fn interrupt_every(mut self, n: usize) -> Self {
        self.interrupt_every = Some(n.max(1));
        self
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn set_position(&mut self, position: u64) {
        self.inner.set_position(position);
    }
}

impl Read for FlakySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if let Some(n) = self.interrupt_every {
            if self.reads % n == 0 {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
        }
        let position = self.inner.position();
        match self.fail_read_at {
            Some(limit) if position >= limit => {
                Err(io::Error::new(io::ErrorKind::Other, "injected read failure"))
            }
            Some(limit) => {
                let len = buf.len().min((limit - position) as usize);
                self.inner.read(&mut buf[..len])
            }
            None => self.inner.read(buf),
        }
    }
}

impl Seek for FlakySource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if let (Some(refused), SeekFrom::Start(target)) = (self.fail_seek_to, pos) {
            if refused == target {
                return Err(io::Error::new(io::ErrorKind::Other, "injected seek failure"));
            }
        }
        self.inner.seek(pos)
    }
}
