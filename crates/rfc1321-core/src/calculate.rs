//! Input adapters: buffers, seekable streams, plain readers, and lazy byte
//! sequences, all feeding an [`Md5Context`].

use std::convert::Infallible;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::context::Md5Context;
use crate::digest::Md5Hash;
use crate::error::{CoreError, Result};

/// Chunk size used when the caller does not pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// A cooperative cancellation flag, checked between chunk updates.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every computation holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

fn ensure_not_cancelled(cancel: Option<&CancelToken>) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(CoreError::Cancelled),
        _ => Ok(()),
    }
}

fn check_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(CoreError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Hash an in-memory buffer in one call.
pub fn hash_slice(data: &[u8]) -> Md5Hash {
    let mut ctx = Md5Context::new();
    ctx.update(data);
    ctx.finalize()
}

/// Hash the whole contents of a seekable source, then put the read position
/// back where it was.
///
/// The source is rewound to its start and read in `chunk_size` pieces until a
/// read returns nothing or the length observed up front has been consumed.
/// A failed restore is logged and swallowed so the caller still sees the
/// outcome of the read itself.
pub fn hash_seekable<R: Read + Seek + ?Sized>(
    reader: &mut R,
    chunk_size: usize,
    cancel: Option<&CancelToken>,
) -> Result<Md5Hash> {
    check_chunk_size(chunk_size)?;
    let saved = reader.stream_position()?;
    let result = hash_stream_contents(reader, chunk_size, cancel);
    if let Err(err) = reader.seek(SeekFrom::Start(saved)) {
        tracing::warn!(position = saved, error = %err, "failed to restore stream position");
    }
    result
}

/// Like [`hash_seekable`], but leaves the position wherever reading stopped.
pub fn hash_stream_contents<R: Read + Seek + ?Sized>(
    reader: &mut R,
    chunk_size: usize,
    cancel: Option<&CancelToken>,
) -> Result<Md5Hash> {
    check_chunk_size(chunk_size)?;
    let length = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    let mut ctx = Md5Context::new();
    let mut buffer = vec![0u8; chunk_size];
    let mut total = 0u64;
    while total < length {
        ensure_not_cancelled(cancel)?;
        let read = match read_chunk(reader, &mut buffer)? {
            0 => break,
            n => n,
        };
        ctx.update(&buffer[..read]);
        total += read as u64;
    }
    Ok(ctx.finalize())
}

/// Hash a forward-only reader until it reports end of input.
pub fn hash_reader<R: Read>(
    mut reader: R,
    chunk_size: usize,
    cancel: Option<&CancelToken>,
) -> Result<Md5Hash> {
    check_chunk_size(chunk_size)?;
    let mut ctx = Md5Context::new();
    let mut buffer = vec![0u8; chunk_size];
    loop {
        ensure_not_cancelled(cancel)?;
        match read_chunk(&mut reader, &mut buffer)? {
            0 => break,
            n => ctx.update(&buffer[..n]),
        }
    }
    Ok(ctx.finalize())
}

fn read_chunk<R: Read + ?Sized>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buffer) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Hash a lazy, single-pass byte sequence of any length.
///
/// Bytes are gathered into `chunk_size` pieces before each update, so memory
/// use does not grow with the input.
pub fn hash_iter<I: IntoIterator<Item = u8>>(
    bytes: I,
    chunk_size: usize,
    cancel: Option<&CancelToken>,
) -> Result<Md5Hash> {
    check_chunk_size(chunk_size)?;
    fold_chunks(bytes, chunk_size, || ensure_not_cancelled(cancel))
}

fn fold_chunks<I, E, F>(
    bytes: I,
    chunk_size: usize,
    mut before_update: F,
) -> std::result::Result<Md5Hash, E>
where
    I: IntoIterator<Item = u8>,
    F: FnMut() -> std::result::Result<(), E>,
{
    let mut ctx = Md5Context::new();
    let mut chunk = Vec::with_capacity(chunk_size);
    for byte in bytes {
        chunk.push(byte);
        if chunk.len() == chunk_size {
            before_update()?;
            ctx.update(&chunk);
            chunk.clear();
        }
    }
    if !chunk.is_empty() {
        before_update()?;
        ctx.update(&chunk);
    }
    Ok(ctx.finalize())
}

impl Md5Hash {
    /// Hash a buffer.
    pub fn compute<T: AsRef<[u8]>>(data: T) -> Self {
        hash_slice(data.as_ref())
    }

    /// Hash a byte sequence in [`DEFAULT_CHUNK_SIZE`] pieces.
    pub fn compute_iter<I: IntoIterator<Item = u8>>(bytes: I) -> Self {
        match fold_chunks::<_, Infallible, _>(bytes, DEFAULT_CHUNK_SIZE, || Ok(())) {
            Ok(hash) => hash,
            Err(never) => match never {},
        }
    }

    /// Hash the whole of a seekable stream, restoring its position afterwards.
    pub fn compute_stream<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<Self> {
        hash_seekable(reader, DEFAULT_CHUNK_SIZE, None)
    }

    /// Hash everything a reader yields.
    pub fn compute_reader<R: Read>(reader: R) -> Result<Self> {
        hash_reader(reader, DEFAULT_CHUNK_SIZE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn sequential(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    /// Reader that fails once `fail_after` bytes have been served.
    struct FailingReader {
        inner: Cursor<Vec<u8>>,
        fail_after: u64,
        fail_seek_to: Option<u64>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.inner.position() >= self.fail_after {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            let limit = (self.fail_after - self.inner.position()) as usize;
            let len = buf.len().min(limit);
            self.inner.read(&mut buf[..len])
        }
    }

    impl Seek for FailingReader {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            if let (Some(bad), SeekFrom::Start(target)) = (self.fail_seek_to, pos) {
                if bad == target {
                    return Err(io::Error::new(io::ErrorKind::Other, "seek refused"));
                }
            }
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_compute_buffer() {
        assert_eq!(Md5Hash::compute(b"").to_hex(), EMPTY_MD5);
        assert_eq!(
            Md5Hash::compute("abc").to_hex(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_iter_empty_sequence() {
        assert_eq!(Md5Hash::compute_iter(std::iter::empty()).to_hex(), EMPTY_MD5);
    }

    #[test]
    fn test_iter_matches_buffer_across_chunk_sizes() {
        let data = sequential(10_000);
        let expected = hash_slice(&data);
        for chunk_size in [1, 3, 63, 64, 65, 4096, 20_000] {
            let actual = hash_iter(data.iter().copied(), chunk_size, None).unwrap();
            assert_eq!(actual, expected, "chunk size {chunk_size}");
        }
        assert_eq!(Md5Hash::compute_iter(data.iter().copied()), expected);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            hash_iter(vec![1, 2, 3], 0, None),
            Err(CoreError::InvalidArgument(_))
        ));
        let mut cursor = Cursor::new(vec![1u8]);
        assert!(matches!(
            hash_seekable(&mut cursor, 0, None),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_stream_hashes_from_start_and_restores_position() {
        let data = sequential(9_000);
        let mut cursor = Cursor::new(data.clone());
        cursor.set_position(1234);

        let hash = Md5Hash::compute_stream(&mut cursor).unwrap();
        assert_eq!(hash, hash_slice(&data));
        assert_eq!(cursor.position(), 1234);
    }

    #[test]
    fn test_stream_contents_leaves_position_at_end() {
        let data = sequential(100);
        let mut cursor = Cursor::new(data.clone());
        let hash = hash_stream_contents(&mut cursor, 16, None).unwrap();
        assert_eq!(hash, hash_slice(&data));
        assert_eq!(cursor.position(), 100);
    }

    #[test]
    fn test_stream_read_error_propagates_and_restores() {
        let mut reader = FailingReader {
            inner: Cursor::new(sequential(10_000)),
            fail_after: 5_000,
            fail_seek_to: None,
        };
        reader.inner.set_position(7);

        let err = Md5Hash::compute_stream(&mut reader).unwrap_err();
        match err {
            CoreError::Io(io_err) => assert_eq!(io_err.to_string(), "disk on fire"),
            other => panic!("expected I/O error, got {other:?}"),
        }
        assert_eq!(reader.inner.position(), 7);
    }

    #[test]
    fn test_restore_failure_does_not_mask_read_error() {
        let mut reader = FailingReader {
            inner: Cursor::new(sequential(10_000)),
            fail_after: 100,
            fail_seek_to: Some(7),
        };
        reader.inner.set_position(7);

        let err = Md5Hash::compute_stream(&mut reader).unwrap_err();
        match err {
            CoreError::Io(io_err) => assert_eq!(io_err.to_string(), "disk on fire"),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_restore_failure_is_swallowed_on_success() {
        let data = sequential(300);
        let mut reader = FailingReader {
            inner: Cursor::new(data.clone()),
            fail_after: u64::MAX,
            fail_seek_to: Some(7),
        };
        reader.inner.set_position(7);

        let hash = Md5Hash::compute_stream(&mut reader).unwrap();
        assert_eq!(hash, hash_slice(&data));
    }

    #[test]
    fn test_reader_adapter() {
        let data = sequential(5_000);
        let hash = Md5Hash::compute_reader(&data[..]).unwrap();
        assert_eq!(hash, hash_slice(&data));
    }

    #[test]
    fn test_cancelled_token_stops_adapters() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.clone().is_cancelled());

        let data = sequential(1_000);
        assert!(matches!(
            hash_iter(data.iter().copied(), 64, Some(&token)),
            Err(CoreError::Cancelled)
        ));
        assert!(matches!(
            hash_reader(&data[..], 64, Some(&token)),
            Err(CoreError::Cancelled)
        ));

        let mut cursor = Cursor::new(data);
        cursor.set_position(10);
        assert!(matches!(
            hash_seekable(&mut cursor, 64, Some(&token)),
            Err(CoreError::Cancelled)
        ));
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn test_uncancelled_token_is_transparent() {
        let token = CancelToken::new();
        let data = sequential(1_000);
        assert_eq!(
            hash_iter(data.iter().copied(), 64, Some(&token)).unwrap(),
            hash_slice(&data)
        );
    }
}
