//! Frame stream reader
//!
//! Reads fixed-size frame records sequentially from any byte source that
//! implements `embedded_io::{Read, Seek}`. The stream can only move forward
//! or rewind to the first frame.
//!
//! Running out of data is not an error: `next_frame` returns `Ok(None)`,
//! and a truncated trailing record is reported the same way.

use embedded_io::{Error as _, ErrorKind, ErrorType, Read, Seek, SeekFrom};

use crate::frame::{Frame, FRAME_SIZE};

/// Errors from the backing frame source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// Backing resource could not be read or repositioned
    Unavailable(ErrorKind),
    /// Source length is not a whole number of frame records
    Misaligned {
        /// Source length in bytes
        len: u64,
    },
}

/// Sequential reader over a frame source
///
/// Owns its source exclusively for the lifetime of playback.
pub struct FrameStream<S> {
    source: S,
    /// Index of the next frame to be read
    position: u32,
    /// Number of whole frames in the source
    frame_count: u32,
}

impl<S: Read + Seek> FrameStream<S> {
    /// Open a stream over `source`
    ///
    /// Measures the source, rejects lengths that are not a multiple of
    /// [`FRAME_SIZE`], and positions the cursor on the first frame.
    pub fn open(mut source: S) -> Result<Self, StreamError> {
        let len = source.seek(SeekFrom::End(0)).map_err(unavailable)?;
        if len % FRAME_SIZE as u64 != 0 {
            return Err(StreamError::Misaligned { len });
        }
        source.seek(SeekFrom::Start(0)).map_err(unavailable)?;

        let frame_count = u32::try_from(len / FRAME_SIZE as u64).unwrap_or(u32::MAX);

        Ok(Self {
            source,
            position: 0,
            frame_count,
        })
    }

    /// Read the next frame
    ///
    /// Returns `Ok(None)` at end of stream. A partial record at the tail
    /// also yields `Ok(None)`.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, StreamError> {
        let mut record = [0u8; FRAME_SIZE];
        let mut filled = 0;

        while filled < FRAME_SIZE {
            match self.source.read(&mut record[filled..]) {
                Ok(0) => return Ok(None),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(unavailable(e)),
            }
        }

        self.position = self.position.saturating_add(1);
        Ok(Some(Frame::new(record)))
    }

    /// Move the cursor back to the first frame
    pub fn rewind(&mut self) -> Result<(), StreamError> {
        self.source.seek(SeekFrom::Start(0)).map_err(unavailable)?;
        self.position = 0;
        Ok(())
    }

    /// Index of the next frame to be read (0 right after open or rewind)
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Number of frames in the stream
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Check if every frame has been read
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.frame_count
    }

    /// Release the underlying source
    pub fn into_inner(self) -> S {
        self.source
    }
}

fn unavailable<E: embedded_io::Error>(e: E) -> StreamError {
    StreamError::Unavailable(e.kind())
}

/// Frame source backed by a byte slice
///
/// Used for frame data linked into flash and for host tests.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source positioned at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the source holds no data at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ErrorType for SliceSource<'_> {
    type Error = ErrorKind;
}

impl Read for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let remaining = self.data.get(self.pos..).unwrap_or(&[]);
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Seek for SliceSource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ErrorKind> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(offset) => (self.data.len() as u64).checked_add_signed(offset),
            SeekFrom::Current(offset) => (self.pos as u64).checked_add_signed(offset),
        };
        let target = target.ok_or(ErrorKind::InvalidInput)?;
        self.pos = usize::try_from(target).map_err(|_| ErrorKind::InvalidInput)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{frames_bytes, FlakySource};
    use core::cell::Cell;

    #[test]
    fn test_reads_frames_in_order() {
        let data = frames_bytes::<24>(3);
        let mut stream = FrameStream::open(SliceSource::new(&data)).unwrap();
        assert_eq!(stream.frame_count(), 3);

        for i in 0..3u8 {
            let frame = stream.next_frame().unwrap().unwrap();
            assert_eq!(frame.rows(), &[i + 1; FRAME_SIZE]);
        }
        assert_eq!(stream.next_frame(), Ok(None));
        assert!(stream.is_exhausted());
    }

    #[test]
    fn test_end_of_stream_is_sticky() {
        let data = frames_bytes::<8>(1);
        let mut stream = FrameStream::open(SliceSource::new(&data)).unwrap();
        assert!(stream.next_frame().unwrap().is_some());
        assert_eq!(stream.next_frame(), Ok(None));
        assert_eq!(stream.next_frame(), Ok(None));
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_empty_source_is_valid() {
        let mut stream = FrameStream::open(SliceSource::new(&[])).unwrap();
        assert_eq!(stream.frame_count(), 0);
        assert_eq!(stream.next_frame(), Ok(None));
    }

    #[test]
    fn test_rewind_reproduces_sequence() {
        let data = frames_bytes::<32>(4);
        let mut stream = FrameStream::open(SliceSource::new(&data)).unwrap();

        let mut first = heapless::Vec::<Frame, 4>::new();
        while let Some(frame) = stream.next_frame().unwrap() {
            first.push(frame).unwrap();
        }

        stream.rewind().unwrap();
        assert_eq!(stream.position(), 0);

        let mut second = heapless::Vec::<Frame, 4>::new();
        while let Some(frame) = stream.next_frame().unwrap() {
            second.push(frame).unwrap();
        }

        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_rewind_mid_stream() {
        let data = frames_bytes::<24>(3);
        let mut stream = FrameStream::open(SliceSource::new(&data)).unwrap();
        stream.next_frame().unwrap();
        stream.next_frame().unwrap();

        stream.rewind().unwrap();

        let frame = stream.next_frame().unwrap().unwrap();
        assert_eq!(frame.rows(), &[1; FRAME_SIZE]);
    }

    #[test]
    fn test_misaligned_length_rejected_at_open() {
        let data = [0u8; 12];
        let result = FrameStream::open(SliceSource::new(&data));
        assert!(matches!(result, Err(StreamError::Misaligned { len: 12 })));
    }

    #[test]
    fn test_short_tail_is_end_of_stream() {
        // Bypass the open-time check to simulate a source that shrinks
        let data = [7u8; 12];
        let mut stream = FrameStream {
            source: SliceSource::new(&data),
            position: 0,
            frame_count: 1,
        };

        assert!(stream.next_frame().unwrap().is_some());
        assert_eq!(stream.next_frame(), Ok(None));
    }

    #[test]
    fn test_unavailable_source_fails_open() {
        let data = frames_bytes::<8>(1);
        let online = Cell::new(false);

        let result = FrameStream::open(FlakySource::new(&data, &online));
        assert!(matches!(result, Err(StreamError::Unavailable(_))));
    }

    #[test]
    fn test_rewind_reports_unavailable() {
        let data = frames_bytes::<8>(1);
        let online = Cell::new(true);
        let mut stream = FrameStream::open(FlakySource::new(&data, &online)).unwrap();

        online.set(false);

        assert_eq!(
            stream.rewind(),
            Err(StreamError::Unavailable(ErrorKind::NotConnected))
        );
    }

    #[test]
    fn test_slice_source_seek() {
        let data = [0u8; 16];
        let mut source = SliceSource::new(&data);
        assert_eq!(source.seek(SeekFrom::End(0)), Ok(16));
        assert_eq!(source.seek(SeekFrom::Current(-8)), Ok(8));
        assert_eq!(source.seek(SeekFrom::End(-17)), Err(ErrorKind::InvalidInput));
        assert_eq!(source.seek(SeekFrom::Start(0)), Ok(0));
    }
}
